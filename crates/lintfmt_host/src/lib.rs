//! # lintfmt_host
//!
//! Collaborator boundary for lintfmt.
//!
//! This crate provides:
//! - The narrow capability traits the pipeline consumes (`LinterHost`,
//!   `FormatterHost`)
//! - Host resolution from an explicit installation path or the bundled
//!   default (`ToolResolver`, `BundledResolver`)
//! - Production hosts that drive the real ESLint and Prettier modules over
//!   a synchronous Node subprocess bridge
//!
//! ## Architecture
//!
//! The external tools are Node packages, so every capability call spawns a
//! short-lived `node -e` bridge process: options go in as JSON on stdin,
//! results come back as JSON on stdout. Nothing is cached between calls;
//! resolution and execution are repeated fresh on every invocation.
//!
//! ## Example
//!
//! ```rust,ignore
//! use lintfmt_host::{BundledResolver, ToolResolver};
//!
//! let resolver = BundledResolver::new();
//! let linter = resolver.linter(None)?;
//! let report = linter.execute_with_fix("var x = 1", &options, None)?;
//! ```

mod bridge;
mod error;
mod resolver;
mod tool;

pub use bridge::{ModuleSpec, NodeFormatter, NodeLinter};
pub use error::ToolError;
pub use resolver::{BundledResolver, ToolResolver};
pub use tool::{FixReport, FormatterHost, LinterHost, ToolKind};
