use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::{Record, contains_ci};
use crate::utils::serde_utils;

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl EmployeeStatus {
    /// Dropdown options: (label, value).
    pub const OPTIONS: [(&'static str, EmployeeStatus); 2] = [
        ("Active", EmployeeStatus::Active),
        ("Inactive", EmployeeStatus::Inactive),
    ];
}

/// Employee as the backend returns it. `department_name` is joined in server side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(deserialize_with = "serde_utils::number")]
    pub id: u64,

    /// Human-facing employee code, e.g. `EMP-001`
    #[serde(rename = "employee_id")]
    pub employee_code: String,

    pub first_name: String,
    pub last_name: String,
    pub email: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "serde_utils::opt_number")]
    pub department_id: Option<u64>,

    #[serde(default)]
    pub department_name: Option<String>,

    pub position: String,

    #[serde(deserialize_with = "serde_utils::number")]
    pub salary: f64,

    #[serde(deserialize_with = "serde_utils::date")]
    pub hire_date: NaiveDate,

    #[serde(default)]
    pub status: EmployeeStatus,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

impl Record for Employee {
    fn id(&self) -> u64 {
        self.id
    }

    fn matches(&self, needle: &str) -> bool {
        let salary = self.salary.to_string();
        let hire_date = self.hire_date.to_string();
        let status = self.status.to_string();
        [
            self.employee_code.as_str(),
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
            self.phone.as_deref().unwrap_or_default(),
            self.department_name.as_deref().unwrap_or_default(),
            self.position.as_str(),
            salary.as_str(),
            hire_date.as_str(),
            status.as_str(),
        ]
        .into_iter()
        .any(|field| contains_ci(field, needle))
            || contains_ci(&self.full_name(), needle)
    }
}
