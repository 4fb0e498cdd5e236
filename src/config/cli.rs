use super::{credentials, AdvisorConfig};
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "travel-advisor")]
#[command(about = "Travel advice from a JamAI Base generative table")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, default_value = credentials::DEFAULT_CREDENTIALS_FILE)]
    pub env_file: PathBuf,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the web form
    Serve {
        #[arg(long, help = "Override server.bind_address")]
        bind: Option<String>,
    },
    /// Request advice once and write the PDF report
    Advise {
        #[arg(long)]
        home_country: String,
        #[arg(long)]
        desired_country: String,
        #[arg(long)]
        activity: String,
        #[arg(long, help = "Override report.output_path")]
        output_path: Option<String>,
    },
}

impl CliConfig {
    /// 載入憑證檔與配置檔，並套用命令列覆寫
    pub fn load_config(&self) -> Result<AdvisorConfig> {
        credentials::load_credentials_file(&self.env_file)?;

        let mut config = match &self.config {
            Some(path) => AdvisorConfig::from_file(path)?,
            None => AdvisorConfig::from_env()?,
        };

        match &self.command {
            Command::Serve { bind: Some(bind) } => {
                config.server.bind_address = bind.clone();
            }
            Command::Advise {
                output_path: Some(output_path),
                ..
            } => {
                config.report.output_path = output_path.clone();
            }
            _ => {}
        }

        Ok(config)
    }
}
