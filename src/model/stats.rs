use serde::{Deserialize, Serialize};

use super::employee::Employee;
use crate::utils::serde_utils;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentCount {
    pub department: String,
    #[serde(deserialize_with = "serde_utils::number")]
    pub count: u64,
}

/// Read-only dashboard projection computed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "serde_utils::opt_number")]
    pub total_employees: Option<u64>,
    #[serde(default, deserialize_with = "serde_utils::opt_number")]
    pub active_employees: Option<u64>,
    #[serde(default, deserialize_with = "serde_utils::opt_number")]
    pub average_salary: Option<f64>,
    #[serde(default)]
    pub department_breakdown: Vec<DepartmentCount>,
    #[serde(default)]
    pub recent_employees: Vec<Employee>,
}

impl DashboardStats {
    pub fn department_count(&self) -> usize {
        self.department_breakdown.len()
    }
}
