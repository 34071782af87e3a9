//! Non-fatal diagnostics emitted while a catalog is assembled.

use std::sync::{Mutex, PoisonError};

/// Receives warnings from a [`DependenciesModelBuilder`](crate::DependenciesModelBuilder).
pub trait DiagnosticSink: Send + Sync {
    /// Report a warning that does not abort the current operation.
    fn warn(&self, message: &str);
}

/// Forwards warnings to `tracing` at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "stratum_catalog", "{message}");
    }
}

/// Keeps every warning in memory so it can be inspected later.
#[derive(Debug, Default)]
pub struct RecordingSink {
    warnings: Mutex<Vec<String>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All warnings received so far, oldest first.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn warn(&self, message: &str) {
        let mut warnings = self
            .warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        warnings.push(message.to_string());
    }
}
