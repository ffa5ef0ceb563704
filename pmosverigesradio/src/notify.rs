//! User-visible notices
//!
//! The host decides how a notice is shown (a modal dialog, a line on
//! stderr...). Handlers emit at most one notice per failed request.

use std::sync::{Mutex, PoisonError};

pub trait Notifier: Send + Sync {
    fn notify(&self, heading: &str, message: &str);
}

/// Writes notices to the log only
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, heading: &str, message: &str) {
        tracing::warn!(heading, "{}", message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub heading: String,
    pub message: String,
}

/// Keeps every notice in memory
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, heading: &str, message: &str) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notice {
                heading: heading.to_string(),
                message: message.to_string(),
            });
    }
}
