//! View-state controllers, one per page.
//!
//! A list page moves through
//!
//! ```text
//! Idle ─► Loading ─► Ready | Error
//! Ready ─► FormOpen ─► Saving ─► Ready            (saved, list re-fetched)
//!                          └───► FormOpen         (validation or server error)
//!                  └─► Ready                      (cancelled)
//! Ready ─► ConfirmingDelete ─► Deleting ─► Ready
//!                          └─► Ready              (cancelled)
//! ```
//!
//! Every operation takes `&mut self` for its whole duration, so a page can never have
//! two mutations in flight, and dropping an operation's future drops its request with
//! it. Nothing is ever written into a page that has gone away.

pub mod dashboard;
pub mod departments;
pub mod employees;
pub mod notify;

pub use dashboard::DashboardPage;
pub use departments::{DepartmentDraft, DepartmentsPage};
pub use employees::{EmployeeDraft, EmployeesPage};
pub use notify::{AutoConfirm, Confirm, ConfirmPrompt, Notification, Notifier, Severity};

use std::collections::BTreeMap;
use std::fmt;

use strum_macros::Display;

use crate::error::ClientResult;
use crate::model::Record;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Last load failed; records still hold the previous successful load.
    Error,
    FormOpen,
    Saving,
    ConfirmingDelete,
    Deleting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Draft rejected client side; nothing was sent.
    Invalid,
    Saved,
    /// The backend or the transport refused; the form stays open.
    Failed,
    /// A save is already running.
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
    /// The action is disabled for this input; nothing was asked or sent.
    Blocked,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FieldError {
    Required,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldEntry {
    kind: FieldError,
    message: String,
}

/// Validation errors keyed by form field. Empty iff the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, FieldEntry>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, kind: FieldError, message: impl Into<String>) {
        self.fields.insert(
            field,
            FieldEntry {
                kind,
                message: message.into(),
            },
        );
    }

    pub fn get(&self, field: &str) -> Option<FieldError> {
        self.fields.get(field).map(|e| e.kind)
    }

    pub fn message(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, FieldError)> + '_ {
        self.fields.iter().map(|(k, v)| (*k, v.kind))
    }

    pub fn messages(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.fields.iter().map(|(k, v)| (*k, v.message.as_str()))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, kind)) in self.fields().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {kind}")?;
        }
        Ok(())
    }
}

/// Records of one list page plus its global filter.
#[derive(Debug, Clone)]
pub struct ListState<R> {
    records: Vec<R>,
    loading: bool,
    filter_text: String,
}

impl<R> Default for ListState<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            loading: false,
            filter_text: String::new(),
        }
    }
}

impl<R: Record> ListState<R> {
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
    }

    /// Records passing the global filter, in backend order.
    pub fn visible(&self) -> Vec<&R> {
        let needle = self.filter_text.trim();
        self.records
            .iter()
            .filter(|r| needle.is_empty() || r.matches(needle))
            .collect()
    }

    pub fn find(&self, id: u64) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub(crate) fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Replaces the records on success; on failure keeps the previous ones.
    pub(crate) fn finish_load(&mut self, result: ClientResult<Vec<R>>) -> ClientResult<()> {
        self.loading = false;
        self.records = result?;
        Ok(())
    }
}

/// The create/edit dialog: draft, errors, and which record is being edited.
#[derive(Debug, Clone)]
pub struct FormState<D, R> {
    open: bool,
    draft: D,
    errors: FormErrors,
    selected: Option<R>,
    submitting: bool,
}

impl<D: Default, R> Default for FormState<D, R> {
    fn default() -> Self {
        Self {
            open: false,
            draft: D::default(),
            errors: FormErrors::default(),
            selected: None,
            submitting: false,
        }
    }
}

impl<D: Default, R> FormState<D, R> {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Record under edit; `None` while creating.
    pub fn selected(&self) -> Option<&R> {
        self.selected.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub(crate) fn open_create(&mut self) {
        self.draft = D::default();
        self.errors.clear();
        self.selected = None;
        self.open = true;
    }

    pub(crate) fn open_edit(&mut self, record: R, draft: D) {
        self.draft = draft;
        self.errors.clear();
        self.selected = Some(record);
        self.open = true;
    }

    pub(crate) fn set_errors(&mut self, errors: FormErrors) {
        self.errors = errors;
    }

    pub(crate) fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    pub(crate) fn close(&mut self) {
        self.open = false;
    }
}
