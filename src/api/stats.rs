use async_trait::async_trait;

use super::ApiClient;
use crate::error::ClientResult;
use crate::model::DashboardStats;
use crate::models::ApiResponse;

#[async_trait]
pub trait StatsApi: Send + Sync {
    /// `GET /stats`
    async fn get_stats(&self) -> ClientResult<ApiResponse<DashboardStats>>;
}

#[async_trait]
impl StatsApi for ApiClient {
    async fn get_stats(&self) -> ClientResult<ApiResponse<DashboardStats>> {
        self.get("/stats").await
    }
}
