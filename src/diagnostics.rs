//! Warning sink injected into discovery components.
//!
//! Components never log recoverable problems straight to the process; they
//! report them through a [`Diagnostics`] handle so callers decide where the
//! messages go.

use std::sync::Mutex;
use tracing::warn;

pub trait Diagnostics: Send + Sync {
    fn warn(&self, message: &str);
}

/// Drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn warn(&self, _message: &str) {}
}

/// Forwards messages to `tracing` at WARN level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, message: &str) {
        warn!(target: "phpnx::discovery", "{}", message);
    }
}

/// Keeps messages in memory so tests can assert on them.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    messages: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.messages().is_empty()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn warn(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
