pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{GenTableClient, LocalStorage};
pub use config::AdvisorConfig;
pub use core::advisor::Advisor;
pub use domain::model::{TravelAdvice, TravelRequest};
pub use utils::error::{AdvisorError, Result};
