//! Collaborators that receive soft and hard per-stanza failures.
//!
//! The reader and the extractor never fail on content problems. They report
//! them through a [`Logger`] and, for entries that cannot be materialized,
//! through a [`FailureRecorder`].

use std::sync::{Mutex, PoisonError};

/// Leveled text sink.
///
/// Implementations must not panic. Thread-safety is the implementation's
/// responsibility; all methods take `&self`.
pub trait Logger {
    /// Something was skipped or guessed.
    fn warning(&self, message: &str);

    /// Progress worth showing at normal verbosity.
    fn info(&self, message: &str);

    /// Detail only useful when debugging a lockfile.
    fn verbose(&self, message: &str);
}

/// Receives the names of packages whose stanza could not be turned into an entry.
pub trait FailureRecorder {
    /// Records a hard per-package failure. Called at least once per failure;
    /// no deduplication is expected.
    fn register_package_parse_failure(&self, name: &str);
}

/// [`Logger`] that forwards to `tracing` under the `lockgraph` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warning(&self, message: &str) {
        tracing::warn!(target: "lockgraph", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "lockgraph", "{message}");
    }

    fn verbose(&self, message: &str) {
        tracing::debug!(target: "lockgraph", "{message}");
    }
}

/// [`FailureRecorder`] that keeps every recorded name in call order.
#[derive(Debug, Default)]
pub struct FailureLog {
    failures: Mutex<Vec<String>>,
}

impl FailureLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded names.
    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FailureRecorder for FailureLog {
    fn register_package_parse_failure(&self, name: &str) {
        tracing::debug!(package = %name, "Recorded package parse failure");
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(name.to_string());
    }
}
