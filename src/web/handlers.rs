use crate::core::report::{render_pdf, ReportContent, DOWNLOAD_FILENAME};
use crate::core::AdviceTable;
use crate::domain::model::{TravelAdvice, TravelRequest};
use crate::utils::error::AdvisorError;
use crate::web::render::{self, NoticeKind};
use crate::web::AppState;
use axum::{
    extract::{Form, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use handlebars::Handlebars;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AdviceForm {
    #[serde(default)]
    pub home_country: String,
    #[serde(default)]
    pub desired_country: String,
    #[serde(default)]
    pub activity: String,
}

impl From<AdviceForm> for TravelRequest {
    fn from(form: AdviceForm) -> Self {
        TravelRequest::new(form.home_country, form.desired_country, form.activity)
    }
}

#[derive(Debug, Deserialize)]
pub struct ReportForm {
    #[serde(default)]
    pub flight_duration: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub activity_locations: String,
}

impl From<ReportForm> for TravelAdvice {
    fn from(form: ReportForm) -> Self {
        TravelAdvice {
            flight_duration: form.flight_duration,
            currency: form.currency,
            activity_locations: form.activity_locations,
        }
    }
}

pub async fn index_handler<T: AdviceTable + 'static>(State(state): State<AppState<T>>) -> Response {
    match render::index_page(&state.template_engine) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            log_failure(&e);
            e.into_response()
        }
    }
}

pub async fn health_handler() -> &'static str {
    "ok"
}

fn error_page(
    engine: &Handlebars<'static>,
    request: Option<&TravelRequest>,
    error: &AdvisorError,
) -> Response {
    let kind = if error.is_warning() {
        NoticeKind::Warning
    } else {
        NoticeKind::Error
    };
    match render::message_page(engine, request, kind, &error.user_friendly_message()) {
        Ok(html) => (error.status_code(), Html(html)).into_response(),
        Err(e) => {
            log_failure(&e);
            e.into_response()
        }
    }
}

pub async fn submit_advice_handler<T: AdviceTable + 'static>(
    State(state): State<AppState<T>>,
    Form(form): Form<AdviceForm>,
) -> Response {
    let request = TravelRequest::from(form);

    let rendered = match state.advisor.advise(&request).await {
        Ok(advice) => render::advice_page(&state.template_engine, &request, &advice),
        Err(e) => {
            log_failure(&e);
            return error_page(&state.template_engine, Some(&request), &e);
        }
    };

    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            log_failure(&e);
            e.into_response()
        }
    }
}

pub async fn download_report_handler<T: AdviceTable + 'static>(
    State(state): State<AppState<T>>,
    Form(form): Form<ReportForm>,
) -> Response {
    let advice = TravelAdvice::from(form);

    if !advice.is_complete() {
        let e = AdvisorError::ValidationError {
            message: format!("Report is missing: {}", advice.missing_fields().join(", ")),
        };
        tracing::warn!("⚠️ {}", e);
        return error_page(&state.template_engine, None, &e);
    }

    let content = ReportContent::from_advice(&state.report_title, &advice);
    match render_pdf(&content, &state.report_font) {
        Ok(bytes) => {
            tracing::info!("📄 Serving PDF report ({} bytes)", bytes.len());
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", DOWNLOAD_FILENAME),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            log_failure(&e);
            error_page(&state.template_engine, None, &e)
        }
    }
}

/// 缺少的欄位視為空白，交由驗證回報 400
pub async fn api_advice_handler<T: AdviceTable + 'static>(
    State(state): State<AppState<T>>,
    Json(body): Json<AdviceForm>,
) -> Result<Json<TravelAdvice>, AdvisorError> {
    let request = TravelRequest::from(body);
    state.advisor.advise(&request).await.map(Json).inspect_err(log_failure)
}

fn log_failure(e: &AdvisorError) {
    if e.is_warning() {
        tracing::warn!("⚠️ {}", e);
    } else {
        tracing::error!(
            "❌ Advice request failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    }
}
