use std::io::{self, BufRead, Write};

use tracing::info;

use crate::pages::{Confirm, ConfirmPrompt, Notification, Notifier, Severity};

/// Prints notifications to stderr, one line each, and records them in the log.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, n: Notification) {
        info!(severity = %n.severity, summary = %n.summary, detail = %n.detail, "Notification");
        let tag = match n.severity {
            Severity::Success => "ok",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        };
        if n.detail.is_empty() {
            eprintln!("[{tag}] {}", n.summary);
        } else {
            eprintln!("[{tag}] {}: {}", n.summary, n.detail);
        }
    }
}

/// Asks on the terminal. Anything but `y`/`yes` declines.
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "{}\n{} [y/N] ", prompt.header, prompt.message);
        let _ = stderr.flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
