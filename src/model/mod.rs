pub mod department;
pub mod employee;
pub mod stats;

pub use department::Department;
pub use employee::{Employee, EmployeeStatus};
pub use stats::{DashboardStats, DepartmentCount};

/// A row a list page can show, select and search.
pub trait Record: Clone {
    fn id(&self) -> u64;

    /// Global filter: case-insensitive substring over the displayed columns.
    fn matches(&self, needle: &str) -> bool;
}

pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
