use async_trait::async_trait;

use super::{ApiClient, RawResponse};
use crate::error::ClientResult;
use crate::model::Department;
use crate::models::{ApiResponse, DepartmentPayload};

#[async_trait]
pub trait DepartmentApi: Send + Sync {
    async fn list_departments(&self) -> ClientResult<ApiResponse<Vec<Department>>>;
    async fn get_department(&self, id: u64) -> ClientResult<ApiResponse<Department>>;
    async fn create_department(&self, payload: &DepartmentPayload) -> ClientResult<RawResponse>;
    async fn update_department(
        &self,
        id: u64,
        payload: &DepartmentPayload,
    ) -> ClientResult<RawResponse>;
    async fn delete_department(&self, id: u64) -> ClientResult<RawResponse>;
}

#[async_trait]
impl DepartmentApi for ApiClient {
    async fn list_departments(&self) -> ClientResult<ApiResponse<Vec<Department>>> {
        self.get("/departments").await
    }

    async fn get_department(&self, id: u64) -> ClientResult<ApiResponse<Department>> {
        self.get(&format!("/departments/{id}")).await
    }

    async fn create_department(&self, payload: &DepartmentPayload) -> ClientResult<RawResponse> {
        self.post("/departments", payload).await
    }

    async fn update_department(
        &self,
        id: u64,
        payload: &DepartmentPayload,
    ) -> ClientResult<RawResponse> {
        self.put(&format!("/departments/{id}"), payload).await
    }

    async fn delete_department(&self, id: u64) -> ClientResult<RawResponse> {
        self.delete(&format!("/departments/{id}")).await
    }
}
