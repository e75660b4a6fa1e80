use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Record, contains_ci};
use crate::utils::serde_utils;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    #[serde(deserialize_with = "serde_utils::number")]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Computed by the backend; never sent back.
    #[serde(default, deserialize_with = "serde_utils::opt_number")]
    pub employee_count: Option<u64>,
    #[serde(default, deserialize_with = "serde_utils::opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Department {
    pub fn employee_count(&self) -> u64 {
        self.employee_count.unwrap_or(0)
    }

    /// A department that still has employees cannot be deleted.
    pub fn can_delete(&self) -> bool {
        self.employee_count() == 0
    }
}

impl Record for Department {
    fn id(&self) -> u64 {
        self.id
    }

    fn matches(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle)
            || contains_ci(self.description.as_deref().unwrap_or_default(), needle)
            || contains_ci(&self.employee_count().to_string(), needle)
    }
}
