use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};
use crate::model::EmployeeStatus;

/// Backend response wrapper: `{ data, error?, message? }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// Payload, or `InvalidResponse` when the envelope came back empty.
    pub fn into_data(self) -> ClientResult<T> {
        match self.data {
            Some(data) => Ok(data),
            None => Err(ClientError::InvalidResponse(
                self.error
                    .or(self.message)
                    .unwrap_or_else(|| "Missing data in response".to_string()),
            )),
        }
    }
}

/// Body of the employee create/update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    /// The employee code, sent under the backend's `employeeId` key
    #[serde(rename = "employeeId")]
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub department_id: Option<u64>,
    pub position: String,
    pub salary: f64,
    /// `YYYY-MM-DD`
    pub hire_date: String,
    pub status: EmployeeStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentPayload {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteManyRequest {
    pub ids: Vec<u64>,
}

/// Optional filters for the employee list; unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
}

impl EmployeeQuery {
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.department_id.is_none() && self.status.is_none()
    }
}
