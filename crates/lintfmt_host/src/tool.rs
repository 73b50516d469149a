//! Capability traits and shared wire types for the external tools.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ToolError;

/// Identifies one of the two external tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    /// The autofixing linter.
    Eslint,
    /// The opinionated formatter.
    Prettier,
}

impl ToolKind {
    /// Human-readable tool name used in error messages and logs.
    pub fn display_name(&self) -> &'static str {
        match self {
            ToolKind::Eslint => "ESLint",
            ToolKind::Prettier => "prettier",
        }
    }

    /// Package name of the bundled installation.
    pub fn package(&self) -> &'static str {
        match self {
            ToolKind::Eslint => "eslint",
            ToolKind::Prettier => "prettier",
        }
    }

    /// Name of the caller-facing option carrying an explicit installation
    /// path for this tool.
    pub fn path_option(&self) -> &'static str {
        match self {
            ToolKind::Eslint => "eslintPath",
            ToolKind::Prettier => "prettierPath",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Result of a fix-and-execute run of the linter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixReport {
    /// The autofixed text. Equals the input text when no fix applied.
    pub output: String,

    /// Number of unfixable errors remaining after the run.
    #[serde(default)]
    pub error_count: usize,
}

impl FixReport {
    /// Creates a report for a run that changed nothing.
    pub fn unchanged(text: impl Into<String>) -> Self {
        Self {
            output: text.into(),
            error_count: 0,
        }
    }
}

/// Capabilities the pipeline needs from the linter.
///
/// Options cross the boundary as plain JSON so host implementations stay
/// decoupled from the translator's typed views.
pub trait LinterHost: Send + Sync {
    /// Runs the linter in fix mode over `text` and returns the fixed text.
    fn execute_with_fix(
        &self,
        text: &str,
        options: &Value,
        file_path: Option<&Path>,
    ) -> Result<FixReport, ToolError>;

    /// Resolves the merged linter configuration that applies to a file.
    ///
    /// With no path, the linter resolves for the working directory.
    fn config_for_file(&self, file_path: Option<&Path>) -> Result<Value, ToolError>;
}

/// Capabilities the pipeline needs from the formatter.
pub trait FormatterHost: Send + Sync {
    /// Renders `text` with the given formatter options.
    fn format(&self, text: &str, options: &Value) -> Result<String, ToolError>;

    /// Resolves the formatter's own file-level configuration for a path.
    ///
    /// Returns `None` when no configuration file applies.
    fn resolve_config(&self, file_path: &Path) -> Result<Option<Value>, ToolError>;
}
