//! Diagnostic reporting channel.
//!
//! Every pipeline failure is reported once to a diagnostic sink before it
//! is returned to the caller. Suppression has two levels: the process-wide
//! toggle set through [`set_disable_log`], and a per-call override that
//! wins over the toggle for that call only.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::error;

/// Fixed prefix on every diagnostic line.
pub const LOG_PREFIX: &str = "lintfmt error";

static DISABLE_LOG: AtomicBool = AtomicBool::new(false);

/// Suppresses (or restores) diagnostic logging process-wide.
pub fn set_disable_log(disabled: bool) {
    DISABLE_LOG.store(disabled, Ordering::Relaxed);
}

/// Whether process-wide logging is currently suppressed.
pub fn log_disabled() -> bool {
    DISABLE_LOG.load(Ordering::Relaxed)
}

/// Receives diagnostic messages from the pipeline.
///
/// Injected per pipeline so callers and tests can substitute their own
/// channel instead of capturing log output.
pub trait DiagnosticSink: Send + Sync {
    /// Reports one error-level diagnostic.
    fn error(&self, message: &str);
}

/// Default sink backed by `tracing`.
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn error(&self, message: &str) {
        error!("{message}");
    }
}
