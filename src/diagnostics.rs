//! Deprecation notices emitted as a side effect of otherwise normal calls.
//!
//! Notices never change the outcome of a call. They go to a [`Diagnostics`]
//! sink carried by each compiled pattern, so embedders can route or capture
//! them instead of relying on a process-wide stream.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// Receiver for non-fatal deprecation notices.
pub trait Diagnostics: fmt::Debug + Send + Sync {
    /// Record a one-line deprecation notice.
    fn deprecated(&self, notice: &str);
}

/// Writes notices through the `log` facade at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn deprecated(&self, notice: &str) {
        log::warn!(target: "kodegen_regex::deprecated", "{notice}");
    }
}

/// Keeps every notice in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordedDiagnostics {
    notices: Mutex<Vec<String>>,
}

impl RecordedDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the notices received so far.
    #[must_use]
    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().clone()
    }

    /// Drain the notices received so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.notices.lock())
    }
}

impl Diagnostics for RecordedDiagnostics {
    fn deprecated(&self, notice: &str) {
        self.notices.lock().push(notice.to_string());
    }
}

/// The sink used when the caller does not supply one.
pub(crate) fn default_sink() -> Arc<dyn Diagnostics> {
    Arc::new(LogDiagnostics)
}
