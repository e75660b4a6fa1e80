//! Text renderings of the three pages.

use super::table::{Paginator, Table};
use crate::model::{Department, Employee};
use crate::pages::FormErrors;
use crate::pages::dashboard::{ChartData, StatCard};
use crate::utils::format;

pub fn employees_table(employees: &[&Employee], selection: &[u64]) -> Table {
    let mut table = Table::new([
        "", "", "ID", "Name", "Email", "Phone", "Department", "Position", "Salary",
        "Hire Date", "Status",
    ]);
    for e in employees {
        let marker = if selection.contains(&e.id) { "[x]" } else { "[ ]" };
        table.push_row([
            marker.to_string(),
            format::initials(&e.first_name, &e.last_name),
            e.employee_code.clone(),
            e.full_name(),
            e.email.clone(),
            e.phone.clone().unwrap_or_default(),
            e.department_name
                .clone()
                .unwrap_or_else(|| "No Department".to_string()),
            e.position.clone(),
            format::peso(e.salary),
            format::date(e.hire_date),
            e.status.to_string(),
        ]);
    }
    table
}

pub fn departments_table(departments: &[&Department]) -> Table {
    let mut table = Table::new(["#", "Department", "Description", "Employees", "Created", "Delete"]);
    for d in departments {
        table.push_row([
            d.id.to_string(),
            d.name.clone(),
            d.description.clone().unwrap_or_default(),
            format::employee_count(d.employee_count()),
            d.created_at
                .as_ref()
                .map(format::timestamp)
                .unwrap_or_default(),
            if d.can_delete() { "yes" } else { "disabled" }.to_string(),
        ]);
    }
    table
}

/// A page of rows followed by the paginator report line.
pub fn paged<T>(
    items: &[T],
    pager: Paginator,
    noun: &str,
    render: impl FnOnce(&[T]) -> Table,
) -> String {
    let mut out = render(pager.slice(items)).to_string();
    out.push_str(&pager.report(items.len(), noun));
    out.push('\n');
    out
}

pub fn employee_detail(e: &Employee) -> String {
    let fields = [
        ("Email", e.email.clone()),
        ("Phone", e.phone.clone().unwrap_or_else(|| "-".to_string())),
        (
            "Department",
            e.department_name
                .clone()
                .unwrap_or_else(|| "No Department".to_string()),
        ),
        ("Position", e.position.clone()),
        ("Salary", format::peso(e.salary)),
        ("Hire Date", format::date(e.hire_date)),
        ("Status", e.status.to_string()),
    ];

    let mut out = format!("{} ({})\n", e.full_name(), e.employee_code);
    for (label, value) in fields {
        out.push_str(&format!("  {:<12}{value}\n", format!("{label}:")));
    }
    out
}

pub fn dashboard(cards: &[StatCard], chart: Option<&ChartData>, recent: &[Employee]) -> String {
    let mut out = String::new();
    for card in cards {
        out.push_str(&format!("{:<18}{}\n", card.label, card.value));
    }

    out.push_str("\nEmployees by Department\n");
    match chart {
        Some(chart) if !chart.labels.is_empty() => {
            let mut table = Table::new(["Department", "Employees"]);
            for (label, count) in chart.labels.iter().zip(&chart.data) {
                table.push_row([label.clone(), count.to_string()]);
            }
            out.push_str(&table.to_string());
        }
        _ => out.push_str("(no data)\n"),
    }

    out.push_str("\nRecent Employees\n");
    if recent.is_empty() {
        out.push_str("(none)\n");
    }
    for e in recent {
        out.push_str(&format!(
            "{}  {}  {} • {}  {}  {}\n",
            format::initials(&e.first_name, &e.last_name),
            e.full_name(),
            e.position,
            e.department_name.as_deref().unwrap_or("No Department"),
            format::peso(e.salary),
            format::date(e.hire_date),
        ));
    }
    out
}

/// One `field: message` line per validation error.
pub fn form_errors(errors: &FormErrors) -> String {
    errors
        .messages()
        .map(|(field, message)| format!("{field}: {message}\n"))
        .collect()
}
