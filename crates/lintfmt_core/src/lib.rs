//! # lintfmt_core
//!
//! Reconciles an autofixing linter (ESLint) with an opinionated formatter
//! (Prettier): translates the linter's active rule set into the equivalent
//! formatter configuration, then runs an autofix pass followed by a format
//! pass so the two tools stop fighting over the same text.
//!
//! This crate provides:
//! - The rule-to-option translation engine (`compute_options`)
//! - The layered overlay merge used by every configuration merge
//! - The two-pass `Pipeline` orchestrator and its `format` entry point
//! - The pipeline error taxonomy and the diagnostic reporting channel
//!
//! ## Example
//!
//! ```rust,ignore
//! use lintfmt_core::{FormatInput, format};
//!
//! let input = FormatInput::new("const x = \"hi\";")
//!     .with_eslint_config(serde_json::from_str(
//!         r#"{ "rules": { "semi": [2, "never"], "quotes": [2, "single"] } }"#,
//!     )?);
//! let formatted = format(&input)?;
//! ```

mod config;
mod error;
mod merge;
mod options;
mod pipeline;
mod report;
mod translate;

pub use config::{LinterConfig, RuleSpecifier, Severity};
pub use error::FormatError;
pub use merge::overlay;
pub use options::{EslintOptions, FormatterOptions, TrailingComma};
pub use pipeline::{FormatInput, Pipeline, format};
pub use report::{DiagnosticSink, LOG_PREFIX, TracingSink, log_disabled, set_disable_log};
pub use translate::{ComputedOptions, compute_options, default_eslint_config};

pub use lintfmt_host::{
    BundledResolver, FixReport, FormatterHost, LinterHost, ToolError, ToolKind, ToolResolver,
};
