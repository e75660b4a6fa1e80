use async_trait::async_trait;

use super::{ApiClient, RawResponse};
use crate::error::ClientResult;
use crate::model::Employee;
use crate::models::{ApiResponse, DeleteManyRequest, EmployeePayload, EmployeeQuery};

#[async_trait]
pub trait EmployeeApi: Send + Sync {
    /// `GET /employees`
    async fn list_employees(&self, query: &EmployeeQuery)
    -> ClientResult<ApiResponse<Vec<Employee>>>;

    /// `GET /employees/{id}`
    async fn get_employee(&self, id: u64) -> ClientResult<ApiResponse<Employee>>;

    /// `POST /employees`
    async fn create_employee(&self, payload: &EmployeePayload) -> ClientResult<RawResponse>;

    /// `PUT /employees/{id}`
    async fn update_employee(&self, id: u64, payload: &EmployeePayload)
    -> ClientResult<RawResponse>;

    /// `DELETE /employees/{id}`
    async fn delete_employee(&self, id: u64) -> ClientResult<RawResponse>;

    /// `DELETE /employees` with `{ids}` in the body. One request for the whole set.
    async fn delete_employees(&self, ids: &[u64]) -> ClientResult<RawResponse>;
}

#[async_trait]
impl EmployeeApi for ApiClient {
    async fn list_employees(
        &self,
        query: &EmployeeQuery,
    ) -> ClientResult<ApiResponse<Vec<Employee>>> {
        if query.is_empty() {
            self.get("/employees").await
        } else {
            self.get_with_query("/employees", query).await
        }
    }

    async fn get_employee(&self, id: u64) -> ClientResult<ApiResponse<Employee>> {
        self.get(&format!("/employees/{id}")).await
    }

    async fn create_employee(&self, payload: &EmployeePayload) -> ClientResult<RawResponse> {
        self.post("/employees", payload).await
    }

    async fn update_employee(
        &self,
        id: u64,
        payload: &EmployeePayload,
    ) -> ClientResult<RawResponse> {
        self.put(&format!("/employees/{id}"), payload).await
    }

    async fn delete_employee(&self, id: u64) -> ClientResult<RawResponse> {
        self.delete(&format!("/employees/{id}")).await
    }

    async fn delete_employees(&self, ids: &[u64]) -> ClientResult<RawResponse> {
        let body = DeleteManyRequest { ids: ids.to_vec() };
        self.delete_with_body("/employees", &body).await
    }
}
