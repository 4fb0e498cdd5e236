use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Failed to add travel details. Error {status}: {body}")]
    SubmissionError { status: u16, body: String },

    #[error("Failed to fetch the travel advice. Error {status}: {body}")]
    RetrievalError { status: u16, body: String },

    #[error("No data found in the table")]
    NoDataError,

    #[error("No matching travel advice found for the given inputs")]
    NoMatchError,

    #[error("Some travel details are missing: {missing}")]
    MissingDetailsError { missing: String },

    #[error("PDF rendering error: {message}")]
    PdfError { message: String },

    #[error("Page template error: {message}")]
    TemplateError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Remote,
    Lookup,
    Export,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 使用者可以直接修正後重新送出 (顯示為警告)
    Low,
    Medium,
    High,
    Critical,
}

impl AdvisorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AdvisorError::ValidationError { .. } => ErrorCategory::Input,
            AdvisorError::ConfigError { .. }
            | AdvisorError::MissingConfigError { .. }
            | AdvisorError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AdvisorError::ApiError(_)
            | AdvisorError::SubmissionError { .. }
            | AdvisorError::RetrievalError { .. } => ErrorCategory::Remote,
            AdvisorError::NoDataError
            | AdvisorError::NoMatchError
            | AdvisorError::MissingDetailsError { .. } => ErrorCategory::Lookup,
            AdvisorError::PdfError { .. } | AdvisorError::TemplateError { .. } => {
                ErrorCategory::Export
            }
            AdvisorError::IoError(_) | AdvisorError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Lookup => ErrorSeverity::Low,
            ErrorCategory::Remote => ErrorSeverity::Medium,
            ErrorCategory::Export => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 警告類錯誤：流程中止，但不是系統故障
    pub fn is_warning(&self) -> bool {
        self.severity() == ErrorSeverity::Low
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AdvisorError::ValidationError { .. } => {
                "Please fill in all the required fields.".to_string()
            }
            AdvisorError::NoDataError => "No data found in the table.".to_string(),
            AdvisorError::NoMatchError => {
                "No matching travel advice found for the given inputs.".to_string()
            }
            AdvisorError::MissingDetailsError { .. } => {
                "Some travel details are missing. Please try again.".to_string()
            }
            AdvisorError::SubmissionError { .. } | AdvisorError::RetrievalError { .. } => {
                self.to_string()
            }
            AdvisorError::ApiError(_) => {
                "Could not reach the travel advice service.".to_string()
            }
            AdvisorError::ConfigError { .. }
            | AdvisorError::MissingConfigError { .. }
            | AdvisorError::InvalidConfigValueError { .. } => {
                format!("The advisor is misconfigured: {}", self)
            }
            AdvisorError::PdfError { .. } => "Failed to generate the PDF report.".to_string(),
            AdvisorError::TemplateError { .. } => "Failed to render the page.".to_string(),
            AdvisorError::IoError(_) | AdvisorError::SerializationError(_) => {
                format!("Internal error: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AdvisorError::ValidationError { .. } => {
                "Enter a home country, a desired country and a preferred activity."
            }
            AdvisorError::NoDataError | AdvisorError::NoMatchError => {
                "Submit the request again; the table may not have generated the row yet."
            }
            AdvisorError::MissingDetailsError { .. } => {
                "Submit the request again to regenerate the missing columns."
            }
            AdvisorError::SubmissionError { status, .. }
            | AdvisorError::RetrievalError { status, .. }
                if *status == 401 || *status == 403 =>
            {
                "Check API_KEY and PROJECT_ID in the credentials file."
            }
            AdvisorError::SubmissionError { .. }
            | AdvisorError::RetrievalError { .. }
            | AdvisorError::ApiError(_) => {
                "Check the service base URL, the table id and your network connection."
            }
            AdvisorError::ConfigError { .. }
            | AdvisorError::MissingConfigError { .. }
            | AdvisorError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or the credentials file and restart."
            }
            AdvisorError::PdfError { .. } => "Retry the download.",
            AdvisorError::TemplateError { .. } => "Check the server logs for the failing template.",
            AdvisorError::IoError(_) => "Check that the report output directory is writable.",
            AdvisorError::SerializationError(_) => {
                "The service returned an unexpected response; check the table schema."
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
