//! Pipeline error types.

use thiserror::Error;

use lintfmt_host::ToolError;

/// Errors surfaced by the formatting pipeline.
///
/// The variant records which stage failed; `Display` passes the
/// collaborator's own message through unchanged, so the caller always sees
/// the original failure. Logging is a side effect, never a substitute for
/// propagation.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Auto-discovery of a tool's configuration failed.
    #[error("{0}")]
    ConfigResolution(#[source] ToolError),

    /// An explicit tool installation could not be loaded.
    #[error("{0}")]
    ModuleResolution(#[source] ToolError),

    /// The autofix pass itself failed.
    #[error("{0}")]
    Autofix(#[source] ToolError),

    /// The format pass itself failed.
    #[error("{0}")]
    Format(#[source] ToolError),
}

impl FormatError {
    /// Label of the failing stage, used by the diagnostic channel.
    pub fn stage(&self) -> &'static str {
        match self {
            FormatError::ConfigResolution(_) => "config resolution",
            FormatError::ModuleResolution(_) => "module resolution",
            FormatError::Autofix(_) => "autofix pass",
            FormatError::Format(_) => "format pass",
        }
    }
}
