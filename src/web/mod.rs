pub mod error;
pub mod handlers;
pub mod render;

use crate::config::toml_config::ReportConfig;
use crate::core::advisor::Advisor;
use crate::core::report::ReportFont;
use crate::core::AdviceTable;
use crate::utils::error::{AdvisorError, Result};
use axum::{
    routing::{get, post},
    Router,
};
use handlebars::Handlebars;
use std::sync::Arc;
use tokio::{
    net::TcpListener,
    signal::{self, ctrl_c},
};
use tower_http::trace::TraceLayer;
use tracing::info;

use handlers::{
    api_advice_handler, download_report_handler, health_handler, index_handler,
    submit_advice_handler,
};

pub struct AppState<T: AdviceTable> {
    pub advisor: Arc<Advisor<T>>,
    pub template_engine: Arc<Handlebars<'static>>,
    pub report_title: Arc<str>,
    pub report_font: ReportFont,
}

impl<T: AdviceTable> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self {
            advisor: Arc::clone(&self.advisor),
            template_engine: Arc::clone(&self.template_engine),
            report_title: Arc::clone(&self.report_title),
            report_font: self.report_font.clone(),
        }
    }
}

impl<T: AdviceTable> AppState<T> {
    /// 註冊頁面模板並載入報告字型；任一失敗都在啟動時回報
    pub fn new(advisor: Advisor<T>, report: &ReportConfig) -> Result<Self> {
        Ok(Self {
            advisor: Arc::new(advisor),
            template_engine: Arc::new(render::template_engine()?),
            report_title: Arc::from(report.title.as_str()),
            report_font: ReportFont::load(report.font_path.as_deref())?,
        })
    }
}

pub fn router<T: AdviceTable + 'static>(state: AppState<T>) -> Router {
    Router::new()
        .route("/", get(index_handler::<T>))
        .route("/health", get(health_handler))
        .route("/advice", post(submit_advice_handler::<T>))
        .route("/advice/report", post(download_report_handler::<T>))
        .route("/api/advice", post(api_advice_handler::<T>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve<T: AdviceTable + 'static>(state: AppState<T>, address: &str) -> Result<()> {
    let listener = TcpListener::bind(address).await?;
    info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AdvisorError::IoError)?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
