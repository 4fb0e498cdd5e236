use crate::utils::error::{AdvisorError, ErrorCategory};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

impl AdvisorError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdvisorError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            AdvisorError::NoDataError
            | AdvisorError::NoMatchError
            | AdvisorError::MissingDetailsError { .. } => StatusCode::NOT_FOUND,
            AdvisorError::SubmissionError { .. }
            | AdvisorError::RetrievalError { .. }
            | AdvisorError::ApiError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn category_name(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::Input => "input",
        ErrorCategory::Configuration => "configuration",
        ErrorCategory::Remote => "remote",
        ErrorCategory::Lookup => "lookup",
        ErrorCategory::Export => "export",
        ErrorCategory::System => "system",
    }
}

/// JSON API 的錯誤回應
impl IntoResponse for AdvisorError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": self.user_friendly_message(),
            "category": category_name(self.category()),
        });

        (status, Json(body)).into_response()
    }
}
