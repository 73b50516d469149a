//! Host error types.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::ToolKind;

/// Errors that can occur while resolving or driving an external tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// An explicit installation path could not be resolved.
    #[error("unable to load {} from the {} {:?}: path does not exist", .tool, .tool.path_option(), .path)]
    Unresolvable { tool: ToolKind, path: PathBuf },

    /// The bridge process could not be started or awaited.
    #[error("failed to launch {tool}: {source}")]
    Spawn {
        tool: ToolKind,
        #[source]
        source: io::Error,
    },

    /// The tool itself failed; the message is the tool's own error text.
    #[error("{0}")]
    Execution(String),

    /// The bridge produced a reply the host could not decode.
    #[error("unexpected {tool} reply: {message}")]
    Protocol { tool: ToolKind, message: String },
}

impl ToolError {
    /// Creates an unresolvable-path error.
    pub fn unresolvable(tool: ToolKind, path: impl AsRef<Path>) -> Self {
        Self::Unresolvable {
            tool,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates a spawn error.
    pub fn spawn(tool: ToolKind, source: io::Error) -> Self {
        Self::Spawn { tool, source }
    }

    /// Creates an execution error carrying the tool's message verbatim.
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Creates a protocol error.
    pub fn protocol(tool: ToolKind, message: impl Into<String>) -> Self {
        Self::Protocol {
            tool,
            message: message.into(),
        }
    }
}
