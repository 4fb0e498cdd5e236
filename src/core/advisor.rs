use crate::core::matcher::find_latest_advice;
use crate::core::AdviceTable;
use crate::domain::model::{TravelAdvice, TravelRequest};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_fields;

/// 一次互動的完整流程：驗證 -> 新增列 -> 讀取並比對
pub struct Advisor<T: AdviceTable> {
    table: T,
}

impl<T: AdviceTable> Advisor<T> {
    pub fn new(table: T) -> Self {
        Self { table }
    }

    /// Rejects blank fields before any network call is made.
    pub fn validate_request(request: &TravelRequest) -> Result<()> {
        validate_required_fields(&[
            ("Home Country", request.home_country.as_str()),
            ("Desired Country", request.desired_country.as_str()),
            ("Preferred Activity", request.activity.as_str()),
        ])
    }

    pub async fn submit(&self, request: &TravelRequest) -> Result<()> {
        Self::validate_request(request)?;
        self.table.add_row(request).await
    }

    pub async fn retrieve(&self, request: &TravelRequest) -> Result<TravelAdvice> {
        let rows = self.table.list_rows().await?;
        tracing::debug!("Scanning {} rows for a matching request", rows.len());

        let outcome = find_latest_advice(&rows, self.table.columns(), request);
        outcome.into_result().inspect_err(|e| {
            tracing::warn!("⚠️ {}", e);
        })
    }

    pub async fn advise(&self, request: &TravelRequest) -> Result<TravelAdvice> {
        tracing::info!(
            "Requesting travel advice: {} -> {} ({})",
            request.home_country,
            request.desired_country,
            request.activity
        );

        self.submit(request).await?;
        let advice = self.retrieve(request).await?;

        tracing::info!("✅ Travel advice retrieved");
        Ok(advice)
    }
}
