//! Toast sink.
//!
//! Every toast is written to the log and kept in a bounded history so a
//! front end (or a test) can drain what the user would have seen.

use std::collections::VecDeque;

use parking_lot::Mutex;
use serde::Serialize;
use theradmin_core::Notifier;
use tracing::{info, warn};

const HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ToastNotifier {
    history: Mutex<VecDeque<Toast>>,
}

impl ToastNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: ToastLevel, message: &str) {
        let mut history = self.history.lock();
        if history.len() == HISTORY_CAPACITY {
            history.pop_front();
        }
        history.push_back(Toast { level, message: message.to_string() });
    }

    /// Toasts shown so far, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.history.lock().iter().cloned().collect()
    }

    /// Remove and return every pending toast.
    pub fn drain(&self) -> Vec<Toast> {
        self.history.lock().drain(..).collect()
    }

    pub fn last(&self) -> Option<Toast> {
        self.history.lock().back().cloned()
    }
}

impl Notifier for ToastNotifier {
    fn success(&self, message: &str) {
        info!(toast = message, "success");
        self.push(ToastLevel::Success, message);
    }

    fn error(&self, message: &str) {
        warn!(toast = message, "error");
        self.push(ToastLevel::Error, message);
    }
}
