use crate::domain::model::{TableColumns, TableRow, TravelRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn table_id(&self) -> &str;
    fn api_key(&self) -> &str;
    fn project_id(&self) -> &str;
    fn columns(&self) -> &TableColumns;
    fn timeout_seconds(&self) -> Option<u64>;
}

/// 遠端生成表格 (add row / list rows)
#[async_trait]
pub trait AdviceTable: Send + Sync {
    async fn add_row(&self, request: &TravelRequest) -> Result<()>;
    async fn list_rows(&self) -> Result<Vec<TableRow>>;
    fn columns(&self) -> &TableColumns;
}
