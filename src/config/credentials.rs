use crate::utils::error::{AdvisorError, Result};
use std::path::Path;

pub const DEFAULT_CREDENTIALS_FILE: &str = "Credentials.env";

/// 載入憑證檔 (API_KEY / PROJECT_ID) 到環境變數。
///
/// Variables already present in the environment win over the file. A missing
/// file is not an error: the existing environment is used as-is.
pub fn load_credentials_file(path: &Path) -> Result<bool> {
    if !path.exists() {
        tracing::warn!(
            "Credentials file {} not found, using the process environment",
            path.display()
        );
        return Ok(false);
    }

    dotenv::from_path(path).map_err(|e| AdvisorError::ConfigError {
        message: format!("Failed to load credentials from {}: {}", path.display(), e),
    })?;

    tracing::debug!("Loaded credentials from {}", path.display());
    Ok(true)
}
