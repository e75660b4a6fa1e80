use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::notify::{Confirm, ConfirmPrompt, Notifier};
use super::{DeleteOutcome, FieldError, FormErrors, FormState, ListState, PageState, SaveOutcome};
use crate::api::DepartmentApi;
use crate::model::Department;
use crate::models::DepartmentPayload;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentDraft {
    pub name: String,
    pub description: String,
}

impl From<&Department> for DepartmentDraft {
    fn from(d: &Department) -> Self {
        Self {
            name: d.name.clone(),
            description: d.description.clone().unwrap_or_default(),
        }
    }
}

impl DepartmentDraft {
    pub fn to_payload(&self) -> Result<DepartmentPayload, FormErrors> {
        let mut errors = FormErrors::new();
        if self.name.trim().is_empty() {
            errors.insert("name", FieldError::Required, "Department name is required");
            return Err(errors);
        }
        Ok(DepartmentPayload {
            name: self.name.clone(),
            description: self.description.clone(),
        })
    }
}

pub fn validate(draft: &DepartmentDraft) -> FormErrors {
    draft.to_payload().err().unwrap_or_default()
}

pub struct DepartmentsPage<A> {
    api: A,
    notifier: Arc<dyn Notifier>,
    phase: PageState,
    list: ListState<Department>,
    form: FormState<DepartmentDraft, Department>,
}

impl<A: DepartmentApi> DepartmentsPage<A> {
    pub fn new(api: A, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            phase: PageState::Idle,
            list: ListState::default(),
            form: FormState::default(),
        }
    }

    pub fn phase(&self) -> PageState {
        self.phase
    }

    pub fn list(&self) -> &ListState<Department> {
        &self.list
    }

    pub fn records(&self) -> &[Department] {
        self.list.records()
    }

    pub fn visible(&self) -> Vec<&Department> {
        self.list.visible()
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.list.set_filter(text);
    }

    pub fn form(&self) -> &FormState<DepartmentDraft, Department> {
        &self.form
    }

    pub fn draft_mut(&mut self) -> &mut DepartmentDraft {
        self.form.draft_mut()
    }

    pub async fn load(&mut self) -> bool {
        self.phase = PageState::Loading;
        self.list.begin_load();

        let result = self
            .api
            .list_departments()
            .await
            .and_then(|env| env.into_data());

        match self.list.finish_load(result) {
            Ok(()) => {
                debug!(count = self.list.records().len(), "Departments loaded");
                self.phase = PageState::Ready;
                true
            }
            Err(e) => {
                error!(error = %e, "Error fetching departments");
                self.notifier.error("Error", "Failed to fetch departments");
                self.phase = PageState::Error;
                false
            }
        }
    }

    pub fn open_create(&mut self) {
        self.form.open_create();
        self.phase = PageState::FormOpen;
    }

    pub fn open_edit(&mut self, department: &Department) {
        self.form
            .open_edit(department.clone(), DepartmentDraft::from(department));
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

    pub fn can_save(&self) -> bool {
        self.form.is_open() && !self.form.is_submitting()
    }

    pub async fn save(&mut self) -> SaveOutcome {
        if self.form.is_submitting() {
            return SaveOutcome::Busy;
        }

        let payload = match self.form.draft().to_payload() {
            Ok(payload) => payload,
            Err(errors) => {
                debug!(%errors, "Department draft rejected");
                self.form.set_errors(errors);
                self.phase = PageState::FormOpen;
                return SaveOutcome::Invalid;
            }
        };
        self.form.set_errors(FormErrors::new());
        self.form.set_submitting(true);
        self.phase = PageState::Saving;

        let result = match self.form.selected().map(|d| d.id) {
            Some(id) => self
                .api
                .update_department(id, &payload)
                .await
                .map(|_| "Department updated successfully"),
            None => self
                .api
                .create_department(&payload)
                .await
                .map(|_| "Department created successfully"),
        };
        self.form.set_submitting(false);

        match result {
            Ok(message) => {
                info!(name = %payload.name, outcome = message, "Department saved");
                self.notifier.success("Success", message);
                self.form.close();
                self.load().await;
                SaveOutcome::Saved
            }
            Err(e) => {
                error!(error = %e, "Error saving department");
                self.notifier
                    .error("Error", e.user_message("Failed to save department"));
                self.phase = PageState::FormOpen;
                SaveOutcome::Failed
            }
        }
    }

    /// Whether the delete action is enabled for this row.
    pub fn can_delete(&self, department: &Department) -> bool {
        department.can_delete()
    }

    /// Refused outright while the department still has employees.
    pub async fn delete(&mut self, department: &Department, confirm: &dyn Confirm) -> DeleteOutcome {
        if !self.can_delete(department) {
            warn!(
                id = department.id,
                employees = department.employee_count(),
                "Delete disabled for department with employees"
            );
            return DeleteOutcome::Blocked;
        }

        self.phase = PageState::ConfirmingDelete;
        let prompt = ConfirmPrompt::delete(format!(
            "Are you sure you want to delete the {} department?",
            department.name
        ));
        if !confirm.confirm(&prompt) {
            self.phase = PageState::Ready;
            return DeleteOutcome::Cancelled;
        }

        self.phase = PageState::Deleting;
        match self.api.delete_department(department.id).await {
            Ok(_) => {
                info!(id = department.id, "Department deleted");
                self.notifier
                    .success("Success", "Department deleted successfully");
                self.load().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!(error = %e, id = department.id, "Error deleting department");
                self.notifier
                    .error("Error", e.user_message("Failed to delete department"));
                self.phase = PageState::Ready;
                DeleteOutcome::Failed
            }
        }
    }
}
