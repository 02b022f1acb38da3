//! Trait for reporting bootstrap progress.

use tracing::info;

/// Sink for human-readable bootstrap step messages.
///
/// This trait allows the core library to report progress without
/// directly writing to stdout/stderr. Callers that do not care about
/// progress pass `None` wherever an `Option<&dyn ProgressReporter>` is
/// accepted; behavior is identical either way.
pub trait ProgressReporter: Send + Sync {
    /// Reports a single step message.
    fn report(&self, message: &str);
}

/// Forwards progress messages to the `tracing` subscriber.
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn report(&self, message: &str) {
        info!("{}", message);
    }
}

/// Sends `message` to `reporter` when one is present.
#[inline]
pub fn emit(reporter: Option<&dyn ProgressReporter>, message: &str) {
    if let Some(reporter) = reporter {
        reporter.report(message);
    }
}
