use crate::core::{AdviceTable, ConfigProvider};
use crate::domain::model::{RowsPage, TableColumns, TableRow, TravelRequest};
use crate::utils::error::{AdvisorError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use std::time::Duration;

const ADD_ROWS_PATH: &str = "/api/v1/gen_tables/action/rows/add";
const PROJECT_ID_HEADER: &str = "x-project-id";

/// JamAI Base 生成表格的 HTTP 客戶端
pub struct GenTableClient<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> GenTableClient<C> {
    pub fn new(config: C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            config,
            client: builder.build()?,
        })
    }

    fn add_rows_url(&self) -> String {
        format!("{}{}", self.config.base_url().trim_end_matches('/'), ADD_ROWS_PATH)
    }

    fn list_rows_url(&self) -> String {
        format!(
            "{}/api/v1/gen_tables/action/{}/rows",
            self.config.base_url().trim_end_matches('/'),
            self.config.table_id()
        )
    }

    fn headers(&self) -> Result<HeaderMap> {
        let invalid = |field: &str, e: reqwest::header::InvalidHeaderValue| {
            AdvisorError::InvalidConfigValueError {
                field: field.to_string(),
                value: "<redacted>".to_string(),
                reason: format!("Not a valid header value: {}", e),
            }
        };

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.config.api_key()))
                .map_err(|e| invalid("service.api_key", e))?,
        );
        headers.insert(
            HeaderName::from_static(PROJECT_ID_HEADER),
            HeaderValue::from_str(self.config.project_id())
                .map_err(|e| invalid("service.project_id", e))?,
        );
        Ok(headers)
    }

    fn add_row_payload(&self, request: &TravelRequest) -> serde_json::Value {
        let columns = self.config.columns();
        let mut row = serde_json::Map::new();
        row.insert(
            columns.home_country.clone(),
            serde_json::Value::String(request.home_country.clone()),
        );
        row.insert(
            columns.desired_country.clone(),
            serde_json::Value::String(request.desired_country.clone()),
        );
        row.insert(
            columns.activity.clone(),
            serde_json::Value::String(request.activity.clone()),
        );

        serde_json::json!({
            "data": [row],
            "table_id": self.config.table_id(),
            "stream": false,
        })
    }
}

#[async_trait]
impl<C: ConfigProvider> AdviceTable for GenTableClient<C> {
    async fn add_row(&self, request: &TravelRequest) -> Result<()> {
        let url = self.add_rows_url();
        tracing::debug!("Adding row to table {} via {}", self.config.table_id(), url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&self.add_row_payload(request))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Add row response status: {}", status);

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::SubmissionError {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!("✅ Travel details added to table {}", self.config.table_id());
        Ok(())
    }

    async fn list_rows(&self) -> Result<Vec<TableRow>> {
        let url = self.list_rows_url();
        tracing::debug!("Fetching rows from {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("List rows response status: {}", status);

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::RetrievalError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let page: RowsPage = serde_json::from_str(&body)?;
        tracing::debug!("Fetched {} rows", page.items.len());

        Ok(page.items)
    }

    fn columns(&self) -> &TableColumns {
        self.config.columns()
    }
}
