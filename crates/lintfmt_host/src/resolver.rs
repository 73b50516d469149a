//! Tool installation resolution.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::bridge::{ModuleSpec, NodeFormatter, NodeLinter};
use crate::{FormatterHost, LinterHost, ToolError, ToolKind};

/// Resolves collaborator handles, either from an explicit installation path
/// or from the bundled default.
///
/// Resolution happens fresh on every call; handles are never cached.
pub trait ToolResolver: Send + Sync {
    /// Resolves the linter.
    fn linter(&self, path: Option<&Path>) -> Result<Box<dyn LinterHost>, ToolError>;

    /// Resolves the formatter.
    fn formatter(&self, path: Option<&Path>) -> Result<Box<dyn FormatterHost>, ToolError>;
}

/// Resolver for the bundled Node installations.
///
/// Search order for a tool with no explicit path:
/// 1. `node_modules/<package>` in the search root or any ancestor
/// 2. The bare package name, left to Node's own resolution
///
/// An explicit path must exist on disk or resolution fails with an error
/// naming the tool and the path.
pub struct BundledResolver {
    search_root: PathBuf,
}

impl BundledResolver {
    /// Creates a resolver searching upward from the working directory.
    pub fn new() -> Self {
        Self {
            search_root: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Creates a resolver searching upward from `root`.
    pub fn with_search_root(root: impl Into<PathBuf>) -> Self {
        Self {
            search_root: root.into(),
        }
    }

    fn resolve(&self, tool: ToolKind, explicit: Option<&Path>) -> Result<ModuleSpec, ToolError> {
        if let Some(path) = explicit {
            if path.exists() {
                debug!("resolved {} from explicit path {}", tool, path.display());
                return Ok(ModuleSpec::Path(path.to_path_buf()));
            }
            return Err(ToolError::unresolvable(tool, path));
        }

        for dir in self.search_root.ancestors() {
            let candidate = dir.join("node_modules").join(tool.package());
            if candidate.is_dir() {
                debug!("resolved {} from {}", tool, candidate.display());
                return Ok(ModuleSpec::Path(candidate));
            }
        }

        Ok(ModuleSpec::Package(tool.package()))
    }
}

impl Default for BundledResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolResolver for BundledResolver {
    fn linter(&self, path: Option<&Path>) -> Result<Box<dyn LinterHost>, ToolError> {
        let module = self.resolve(ToolKind::Eslint, path)?;
        Ok(Box::new(NodeLinter::new(module)))
    }

    fn formatter(&self, path: Option<&Path>) -> Result<Box<dyn FormatterHost>, ToolError> {
        let module = self.resolve(ToolKind::Prettier, path)?;
        Ok(Box::new(NodeFormatter::new(module)))
    }
}
