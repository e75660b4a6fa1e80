//! Employees page: list, filter, create/edit form, single and bulk delete.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, error, info};

use super::notify::{Confirm, ConfirmPrompt, Notifier};
use super::{DeleteOutcome, FieldError, FormErrors, FormState, ListState, PageState, SaveOutcome};
use crate::api::{DepartmentApi, EmployeeApi};
use crate::model::{Department, Employee, EmployeeStatus, Record};
use crate::models::{EmployeePayload, EmployeeQuery};

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Unsaved state of the employee dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeDraft {
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub department_id: Option<u64>,
    pub position: String,
    pub salary: Option<f64>,
    pub hire_date: Option<NaiveDate>,
    pub status: EmployeeStatus,
}

impl From<&Employee> for EmployeeDraft {
    fn from(e: &Employee) -> Self {
        Self {
            employee_code: e.employee_code.clone(),
            first_name: e.first_name.clone(),
            last_name: e.last_name.clone(),
            email: e.email.clone(),
            phone: e.phone.clone().unwrap_or_default(),
            department_id: e.department_id,
            position: e.position.clone(),
            salary: Some(e.salary),
            hire_date: Some(e.hire_date),
            status: e.status,
        }
    }
}

impl EmployeeDraft {
    /// Builds the request body, or every reason the draft cannot be sent.
    pub fn to_payload(&self) -> Result<EmployeePayload, FormErrors> {
        let mut errors = FormErrors::new();

        let required = [
            ("employeeId", &self.employee_code, "Employee ID is required"),
            ("firstName", &self.first_name, "First name is required"),
            ("lastName", &self.last_name, "Last name is required"),
            ("position", &self.position, "Position is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.insert(field, FieldError::Required, message);
            }
        }

        if self.email.trim().is_empty() {
            errors.insert("email", FieldError::Required, "Email is required");
        } else if !EMAIL_SHAPE.is_match(&self.email) {
            errors.insert("email", FieldError::Invalid, "Email is invalid");
        }

        let salary = match self.salary {
            Some(s) if s.is_finite() && s > 0.0 => Some(s),
            Some(_) => {
                errors.insert("salary", FieldError::Invalid, "Valid salary is required");
                None
            }
            None => {
                errors.insert("salary", FieldError::Required, "Valid salary is required");
                None
            }
        };

        if self.hire_date.is_none() {
            errors.insert("hireDate", FieldError::Required, "Hire date is required");
        }

        match (salary, self.hire_date) {
            (Some(salary), Some(hire_date)) if errors.is_empty() => Ok(EmployeePayload {
                employee_code: self.employee_code.clone(),
                first_name: self.first_name.clone(),
                last_name: self.last_name.clone(),
                email: self.email.clone(),
                phone: self.phone.clone(),
                department_id: self.department_id,
                position: self.position.clone(),
                salary,
                hire_date: hire_date.format("%Y-%m-%d").to_string(),
                status: self.status,
            }),
            _ => Err(errors),
        }
    }
}

/// Field-presence and format checks. Empty iff the draft can be saved.
pub fn validate(draft: &EmployeeDraft) -> FormErrors {
    draft.to_payload().err().unwrap_or_default()
}

pub struct EmployeesPage<A> {
    api: A,
    notifier: Arc<dyn Notifier>,
    phase: PageState,
    query: EmployeeQuery,
    list: ListState<Employee>,
    form: FormState<EmployeeDraft, Employee>,
    departments: Vec<Department>,
    selection: BTreeSet<u64>,
}

impl<A: EmployeeApi + DepartmentApi> EmployeesPage<A> {
    pub fn new(api: A, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            phase: PageState::Idle,
            query: EmployeeQuery::default(),
            list: ListState::default(),
            form: FormState::default(),
            departments: Vec::new(),
            selection: BTreeSet::new(),
        }
    }

    pub fn phase(&self) -> PageState {
        self.phase
    }

    pub fn list(&self) -> &ListState<Employee> {
        &self.list
    }

    pub fn records(&self) -> &[Employee] {
        self.list.records()
    }

    pub fn visible(&self) -> Vec<&Employee> {
        self.list.visible()
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.list.set_filter(text);
    }

    /// Server-side filters sent with every subsequent `load`.
    pub fn set_query(&mut self, query: EmployeeQuery) {
        self.query = query;
    }

    pub fn form(&self) -> &FormState<EmployeeDraft, Employee> {
        &self.form
    }

    pub fn draft_mut(&mut self) -> &mut EmployeeDraft {
        self.form.draft_mut()
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// Department selector options: (label, id).
    pub fn department_options(&self) -> Vec<(String, u64)> {
        self.departments
            .iter()
            .map(|d| (d.name.clone(), d.id))
            .collect()
    }

    /// Initial fetch when the page is shown.
    pub async fn mount(&mut self) {
        self.load().await;
        self.load_departments().await;
    }

    /// Fetches the employee list. On failure the previous list is kept.
    pub async fn load(&mut self) -> bool {
        self.phase = PageState::Loading;
        self.list.begin_load();

        let result = self
            .api
            .list_employees(&self.query)
            .await
            .and_then(|env| env.into_data());

        match self.list.finish_load(result) {
            Ok(()) => {
                debug!(count = self.list.records().len(), "Employees loaded");
                let known: BTreeSet<u64> = self.list.records().iter().map(|e| e.id).collect();
                self.selection.retain(|id| known.contains(id));
                self.phase = PageState::Ready;
                true
            }
            Err(e) => {
                error!(error = %e, "Error fetching employees");
                self.notifier.error("Error", "Failed to fetch employees");
                self.phase = PageState::Error;
                false
            }
        }
    }

    pub async fn load_departments(&mut self) -> bool {
        match self
            .api
            .list_departments()
            .await
            .and_then(|env| env.into_data())
        {
            Ok(departments) => {
                self.departments = departments;
                true
            }
            Err(e) => {
                error!(error = %e, "Error fetching departments");
                self.notifier.error("Error", "Failed to fetch departments");
                false
            }
        }
    }

    pub fn open_create(&mut self) {
        self.form.open_create();
        self.phase = PageState::FormOpen;
    }

    pub fn open_edit(&mut self, employee: &Employee) {
        self.form
            .open_edit(employee.clone(), EmployeeDraft::from(employee));
        self.phase = PageState::FormOpen;
    }

    pub fn cancel(&mut self) {
        if self.form.is_submitting() {
            return;
        }
        self.form.close();
        self.phase = PageState::Ready;
    }

    pub fn validate(&self) -> FormErrors {
        validate(self.form.draft())
    }

    /// Whether the dialog's Save action is enabled.
    pub fn can_save(&self) -> bool {
        self.form.is_open() && !self.form.is_submitting()
    }

    /// Validates, then creates or updates depending on whether a record is under edit.
    /// On success the form closes and the list is fetched again.
    pub async fn save(&mut self) -> SaveOutcome {
        if self.form.is_submitting() {
            return SaveOutcome::Busy;
        }

        let payload = match self.form.draft().to_payload() {
            Ok(payload) => payload,
            Err(errors) => {
                debug!(%errors, "Employee draft rejected");
                self.form.set_errors(errors);
                self.phase = PageState::FormOpen;
                return SaveOutcome::Invalid;
            }
        };
        self.form.set_errors(FormErrors::new());
        self.form.set_submitting(true);
        self.phase = PageState::Saving;

        let result = match self.form.selected().map(|e| e.id) {
            Some(id) => self
                .api
                .update_employee(id, &payload)
                .await
                .map(|_| "Employee updated successfully"),
            None => self
                .api
                .create_employee(&payload)
                .await
                .map(|_| "Employee created successfully"),
        };
        self.form.set_submitting(false);

        match result {
            Ok(message) => {
                info!(code = %payload.employee_code, outcome = message, "Employee saved");
                self.notifier.success("Success", message);
                self.form.close();
                self.load().await;
                SaveOutcome::Saved
            }
            Err(e) => {
                error!(error = %e, "Error saving employee");
                self.notifier
                    .error("Error", e.user_message("Failed to save employee"));
                self.phase = PageState::FormOpen;
                SaveOutcome::Failed
            }
        }
    }

    pub async fn delete(&mut self, employee: &Employee, confirm: &dyn Confirm) -> DeleteOutcome {
        self.phase = PageState::ConfirmingDelete;
        let prompt = ConfirmPrompt::delete(format!(
            "Are you sure you want to delete {}?",
            employee.full_name()
        ));
        if !confirm.confirm(&prompt) {
            self.phase = PageState::Ready;
            return DeleteOutcome::Cancelled;
        }

        self.phase = PageState::Deleting;
        match self.api.delete_employee(employee.id).await {
            Ok(_) => {
                info!(id = employee.id, "Employee deleted");
                self.notifier
                    .success("Success", "Employee deleted successfully");
                self.selection.remove(&employee.id);
                self.load().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!(error = %e, id = employee.id, "Error deleting employee");
                self.notifier
                    .error("Error", e.user_message("Failed to delete employee"));
                self.phase = PageState::Ready;
                DeleteOutcome::Failed
            }
        }
    }

    /// Deletes every given employee with a single request.
    pub async fn delete_many(
        &mut self,
        employees: &[Employee],
        confirm: &dyn Confirm,
    ) -> DeleteOutcome {
        if employees.is_empty() {
            return DeleteOutcome::Blocked;
        }

        self.phase = PageState::ConfirmingDelete;
        let count = employees.len();
        let prompt = ConfirmPrompt::delete(format!(
            "Are you sure you want to delete {count} selected employees?"
        ));
        if !confirm.confirm(&prompt) {
            self.phase = PageState::Ready;
            return DeleteOutcome::Cancelled;
        }

        self.phase = PageState::Deleting;
        let ids: Vec<u64> = employees.iter().map(|e| e.id).collect();
        match self.api.delete_employees(&ids).await {
            Ok(_) => {
                info!(?ids, "Employees deleted");
                self.notifier.success(
                    "Success",
                    &format!("{count} employees deleted successfully"),
                );
                self.selection.clear();
                self.load().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!(error = %e, ?ids, "Error deleting employees");
                self.notifier
                    .error("Error", e.user_message("Failed to delete employees"));
                self.phase = PageState::Ready;
                DeleteOutcome::Failed
            }
        }
    }

    /// Bulk delete of the current selection.
    pub async fn delete_selected(&mut self, confirm: &dyn Confirm) -> DeleteOutcome {
        let selected: Vec<Employee> = self.selected_records().into_iter().cloned().collect();
        self.delete_many(&selected, confirm).await
    }

    /// Adds a loaded record to the bulk selection. Unknown ids are ignored.
    pub fn select(&mut self, id: u64) -> bool {
        if self.list.find(id).is_some() {
            self.selection.insert(id)
        } else {
            false
        }
    }

    pub fn deselect(&mut self, id: u64) {
        self.selection.remove(&id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> Vec<u64> {
        self.selection.iter().copied().collect()
    }

    pub fn selected_records(&self) -> Vec<&Employee> {
        self.list
            .records()
            .iter()
            .filter(|e| self.selection.contains(&e.id()))
            .collect()
    }

    /// Whether "Delete Selected" is enabled.
    pub fn can_delete_selected(&self) -> bool {
        !self.selection.is_empty()
    }
}
