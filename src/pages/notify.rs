//! Seams between the controllers and whatever presents them: transient
//! notifications and the synchronous confirm gate in front of destructive calls.

use std::time::Duration;

use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warn,
    Error,
}

impl Severity {
    /// How long a toast of this severity stays on screen.
    pub fn life(self) -> Duration {
        match self {
            Severity::Success | Severity::Info => Duration::from_millis(3000),
            Severity::Warn => Duration::from_millis(4000),
            Severity::Error => Duration::from_millis(5000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn success(&self, summary: &str, detail: &str) {
        self.notify(Notification {
            severity: Severity::Success,
            summary: summary.to_string(),
            detail: detail.to_string(),
        });
    }

    fn error(&self, summary: &str, detail: &str) {
        self.notify(Notification {
            severity: Severity::Error,
            summary: summary.to_string(),
            detail: detail.to_string(),
        });
    }

    fn warn(&self, summary: &str, detail: &str) {
        self.notify(Notification {
            severity: Severity::Warn,
            summary: summary.to_string(),
            detail: detail.to_string(),
        });
    }

    fn info(&self, summary: &str, detail: &str) {
        self.notify(Notification {
            severity: Severity::Info,
            summary: summary.to_string(),
            detail: detail.to_string(),
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub header: String,
    pub message: String,
}

impl ConfirmPrompt {
    pub fn delete(message: impl Into<String>) -> Self {
        Self {
            header: "Confirm Delete".to_string(),
            message: message.into(),
        }
    }
}

/// Blocks until the user accepts or rejects. Nothing destructive is sent unless this
/// returns `true`.
pub trait Confirm {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}

/// Always answers the same way; backs `--yes` on the command line.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _prompt: &ConfirmPrompt) -> bool {
        self.0
    }
}
