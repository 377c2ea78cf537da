//! Pluggable diagnostic output.
//!
//! The evaluator never depends on a sink being present: the default handle
//! swallows everything. Hosts install their own sink to receive the messages
//! produced for malformed trees and failed transform assertions.

use crate::errors::CsgError;
use std::fmt;
use std::sync::Arc;

/// Receiver for diagnostic messages and break requests.
pub trait DiagnosticSink: Send + Sync {
    /// Record a human readable message.
    fn log(&self, message: &str);

    /// Ask the host to pause, e.g. to stop in a debugger.
    fn debug_break(&self) {}
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn log(&self, _message: &str) {}
}

/// Forwards messages to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn log(&self, message: &str) {
        log::info!(target: "csgshape::diagnostics", "{message}");
    }

    fn debug_break(&self) {
        log::error!(target: "csgshape::diagnostics", "debug break requested");
    }
}

type OutputFn = Arc<dyn Fn(&str) + Send + Sync>;
type BreakFn = Arc<dyn Fn() + Send + Sync>;

/// A pair of optional closures, each of which can be replaced on its own.
///
/// A missing closure turns the corresponding call into a no-op.
#[derive(Clone, Default)]
pub struct CallbackSink {
    output: Option<OutputFn>,
    trap: Option<BreakFn>,
}

impl CallbackSink {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_output<F>(mut self, output: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.output = Some(Arc::new(output));
        self
    }

    #[must_use]
    pub fn with_break<F>(mut self, trap: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.trap = Some(Arc::new(trap));
        self
    }

    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    pub fn has_break(&self) -> bool {
        self.trap.is_some()
    }
}

impl fmt::Debug for CallbackSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSink")
            .field("output", &self.output.is_some())
            .field("break", &self.trap.is_some())
            .finish()
    }
}

impl DiagnosticSink for CallbackSink {
    fn log(&self, message: &str) {
        if let Some(output) = &self.output {
            output(message);
        }
    }

    fn debug_break(&self) {
        if let Some(trap) = &self.trap {
            trap();
        }
    }
}

/// Shared handle to the active sink. Cloning is cheap.
#[derive(Clone)]
pub struct Diagnostics {
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(NoopSink)
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics").finish_non_exhaustive()
    }
}

impl Diagnostics {
    pub fn new<S: DiagnosticSink + 'static>(sink: S) -> Self {
        Self { sink: Arc::new(sink) }
    }

    pub fn from_arc(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { sink }
    }

    pub fn log(&self, message: &str) {
        self.sink.log(message);
    }

    /// Log `message`, then request a break.
    pub fn debug_break(&self, message: &str) {
        self.sink.log(message);
        self.sink.debug_break();
    }

    /// Route an error to the sink. Assertion-class errors also request a break.
    pub fn report(&self, error: &CsgError) {
        log::warn!("{error}");
        let message = error.to_string();
        if error.is_assertion() {
            self.debug_break(&message);
        } else {
            self.log(&message);
        }
    }
}
