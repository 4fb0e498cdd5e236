use crate::core::ConfigProvider;
use crate::domain::model::TableColumns;
use crate::utils::error::{AdvisorError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::net::ToSocketAddrs;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://api.jamaibase.com";
pub const DEFAULT_TABLE_ID: &str = "Travel_Advisor";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub columns: TableColumns,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_table_id")]
    pub table_id: String,
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_project_id")]
    pub project_id: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_report_title")]
    pub title: String,
    /// TrueType font embedded into reports. Without it non-WinAnsi characters
    /// are drawn as placeholders.
    pub font_path: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_table_id() -> String {
    DEFAULT_TABLE_ID.to_string()
}

// 未在 TOML 中設定時，直接讀取憑證檔載入的環境變數
fn default_api_key() -> String {
    std::env::var("API_KEY").unwrap_or_default()
}

fn default_project_id() -> String {
    std::env::var("PROJECT_ID").unwrap_or_default()
}

fn default_bind_address() -> String {
    "127.0.0.1:8501".to_string()
}

fn default_output_path() -> String {
    "./reports".to_string()
}

fn default_report_title() -> String {
    "Travel Advice Report".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            table_id: default_table_id(),
            api_key: default_api_key(),
            project_id: default_project_id(),
            timeout_seconds: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            title: default_report_title(),
            font_path: None,
        }
    }
}

impl AdvisorConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AdvisorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 沒有配置檔時，全部使用預設值與環境變數
    pub fn from_env() -> Result<Self> {
        Self::from_toml_str("")
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AdvisorError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_KEY})；未設定的變數保留原字串，由驗證階段回報
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AdvisorError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("service.base_url", &self.service.base_url)?;
        validation::validate_non_empty_string("service.table_id", &self.service.table_id)?;
        validation::validate_secret("service.api_key (API_KEY)", &self.service.api_key)?;
        validation::validate_secret("service.project_id (PROJECT_ID)", &self.service.project_id)?;

        if let Some(timeout) = self.service.timeout_seconds {
            validation::validate_positive_number("service.timeout_seconds", timeout, 1)?;
        }

        // 與 TcpListener::bind 相同的解析規則，允許主機名稱
        let resolves = self
            .server
            .bind_address
            .to_socket_addrs()
            .map(|mut addrs| addrs.next().is_some())
            .unwrap_or(false);
        if !resolves {
            return Err(AdvisorError::InvalidConfigValueError {
                field: "server.bind_address".to_string(),
                value: self.server.bind_address.clone(),
                reason: "Expected host:port such as 127.0.0.1:8501 or localhost:8501".to_string(),
            });
        }

        validation::validate_path("report.output_path", &self.report.output_path)?;
        validation::validate_non_empty_string("report.title", &self.report.title)?;
        if let Some(font_path) = &self.report.font_path {
            validation::validate_path("report.font_path", font_path)?;
        }

        Ok(())
    }

    pub fn bind_address(&self) -> &str {
        &self.server.bind_address
    }

    pub fn output_path(&self) -> &str {
        &self.report.output_path
    }
}

impl ConfigProvider for AdvisorConfig {
    fn base_url(&self) -> &str {
        &self.service.base_url
    }

    fn table_id(&self) -> &str {
        &self.service.table_id
    }

    fn api_key(&self) -> &str {
        &self.service.api_key
    }

    fn project_id(&self) -> &str {
        &self.service.project_id
    }

    fn columns(&self) -> &TableColumns {
        &self.columns
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.service.timeout_seconds
    }
}

impl Validate for AdvisorConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
