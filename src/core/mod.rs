pub mod advisor;
pub mod matcher;
pub mod report;

pub use crate::domain::model::{TableColumns, TableRow, TravelAdvice, TravelRequest};
pub use crate::domain::ports::{AdviceTable, ConfigProvider, Storage};
pub use crate::utils::error::Result;
