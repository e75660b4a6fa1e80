use std::sync::Arc;

use tracing::{debug, error};

use super::PageState;
use super::notify::Notifier;
use crate::api::StatsApi;
use crate::model::{DashboardStats, Employee};
use crate::utils::format;

pub const CHART_COLORS: [&str; 5] = ["#667eea", "#764ba2", "#f093fb", "#f5576c", "#4facfe"];
pub const CHART_HOVER_COLORS: [&str; 5] = ["#5a6fd8", "#6a4190", "#ee7ae9", "#f3455a", "#3d9afc"];

/// Doughnut series for "Employees by Department".
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub data: Vec<u64>,
    pub background_colors: &'static [&'static str],
    pub hover_background_colors: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
}

pub struct DashboardPage<A> {
    api: A,
    notifier: Arc<dyn Notifier>,
    phase: PageState,
    stats: Option<DashboardStats>,
}

impl<A: StatsApi> DashboardPage<A> {
    pub fn new(api: A, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            phase: PageState::Idle,
            stats: None,
        }
    }

    pub fn phase(&self) -> PageState {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == PageState::Loading
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    pub async fn load(&mut self) -> bool {
        self.phase = PageState::Loading;

        match self.api.get_stats().await.and_then(|env| env.into_data()) {
            Ok(stats) => {
                debug!(
                    departments = stats.department_count(),
                    recent = stats.recent_employees.len(),
                    "Dashboard statistics loaded"
                );
                self.stats = Some(stats);
                self.phase = PageState::Ready;
                true
            }
            Err(e) => {
                error!(error = %e, "Error fetching stats");
                self.notifier
                    .error("Error", "Failed to fetch dashboard statistics");
                self.phase = PageState::Error;
                false
            }
        }
    }

    /// Total, active, average salary and department count. Zeroes before the first load.
    pub fn cards(&self) -> [StatCard; 4] {
        let stats = self.stats.as_ref();
        [
            StatCard {
                label: "Total Employees",
                value: stats
                    .and_then(|s| s.total_employees)
                    .unwrap_or(0)
                    .to_string(),
            },
            StatCard {
                label: "Active Employees",
                value: stats
                    .and_then(|s| s.active_employees)
                    .unwrap_or(0)
                    .to_string(),
            },
            StatCard {
                label: "Average Salary",
                value: format::peso(stats.and_then(|s| s.average_salary).unwrap_or(0.0)),
            },
            StatCard {
                label: "Departments",
                value: stats.map_or(0, |s| s.department_count()).to_string(),
            },
        ]
    }

    pub fn chart_data(&self) -> Option<ChartData> {
        let breakdown = &self.stats.as_ref()?.department_breakdown;
        Some(ChartData {
            labels: breakdown.iter().map(|d| d.department.clone()).collect(),
            data: breakdown.iter().map(|d| d.count).collect(),
            background_colors: &CHART_COLORS,
            hover_background_colors: &CHART_HOVER_COLORS,
        })
    }

    pub fn recent_employees(&self) -> &[Employee] {
        self.stats
            .as_ref()
            .map(|s| s.recent_employees.as_slice())
            .unwrap_or_default()
    }
}
