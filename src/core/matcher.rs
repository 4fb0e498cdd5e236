use crate::domain::model::{TableColumns, TableRow, TravelAdvice, TravelRequest};
use crate::utils::error::{AdvisorError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Found(TravelAdvice),
    /// 表格內沒有任何資料
    NoData,
    NoMatch,
    /// 最新的相符列缺少輸出欄位
    MissingDetails(Vec<&'static str>),
}

impl MatchOutcome {
    pub fn into_result(self) -> Result<TravelAdvice> {
        match self {
            MatchOutcome::Found(advice) => Ok(advice),
            MatchOutcome::NoData => Err(AdvisorError::NoDataError),
            MatchOutcome::NoMatch => Err(AdvisorError::NoMatchError),
            MatchOutcome::MissingDetails(missing) => Err(AdvisorError::MissingDetailsError {
                missing: missing.join(", "),
            }),
        }
    }
}

/// Scans `rows` newest-first (the API lists oldest-first) for the first row
/// echoing `request`. That row alone decides the outcome: an older complete
/// row never stands in for a newer incomplete one.
pub fn find_latest_advice(
    rows: &[TableRow],
    columns: &TableColumns,
    request: &TravelRequest,
) -> MatchOutcome {
    if rows.is_empty() {
        return MatchOutcome::NoData;
    }

    match rows.iter().rev().find(|row| row.echoes(columns, request)) {
        Some(row) => {
            let advice = row.advice(columns);
            let missing = advice.missing_fields();
            if missing.is_empty() {
                MatchOutcome::Found(advice)
            } else {
                MatchOutcome::MissingDetails(missing)
            }
        }
        None => MatchOutcome::NoMatch,
    }
}
