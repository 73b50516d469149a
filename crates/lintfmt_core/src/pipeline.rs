//! The two-pass formatting pipeline.
//!
//! Orchestrates one synchronous run: resolve the collaborator handles,
//! discover whichever configurations the caller did not supply, translate
//! the rules, autofix, then format. No step retries and nothing is cached;
//! every collaborator failure is reported once to the diagnostic channel
//! (unless suppressed) and then returned to the caller unchanged.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use lintfmt_host::{BundledResolver, ToolError, ToolKind, ToolResolver};

use crate::config::LinterConfig;
use crate::error::FormatError;
use crate::options::FormatterOptions;
use crate::report::{DiagnosticSink, LOG_PREFIX, TracingSink, log_disabled};
use crate::translate::compute_options;

/// Input to [`Pipeline::format`].
#[derive(Debug, Clone, Default)]
pub struct FormatInput {
    /// Source text to fix and format.
    pub text: String,

    /// Path the text came from; used for config auto-discovery and for the
    /// formatter's parser inference.
    pub file_path: Option<PathBuf>,

    /// Linter configuration; supplying one skips auto-discovery.
    pub eslint_config: Option<LinterConfig>,

    /// Formatter options; they win over everything derived from the rules.
    pub prettier_options: Option<FormatterOptions>,

    /// Alternate linter installation to load instead of the bundled one.
    pub eslint_path: Option<PathBuf>,

    /// Alternate formatter installation to load instead of the bundled one.
    pub prettier_path: Option<PathBuf>,

    /// Per-call logging override; wins over the process-wide toggle.
    pub disable_log: Option<bool>,
}

impl FormatInput {
    /// Creates an input for the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Sets the source path.
    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Supplies the linter configuration directly.
    pub fn with_eslint_config(mut self, config: LinterConfig) -> Self {
        self.eslint_config = Some(config);
        self
    }

    /// Supplies explicit formatter options.
    pub fn with_prettier_options(mut self, options: FormatterOptions) -> Self {
        self.prettier_options = Some(options);
        self
    }

    /// Points at an alternate linter installation.
    pub fn with_eslint_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.eslint_path = Some(path.into());
        self
    }

    /// Points at an alternate formatter installation.
    pub fn with_prettier_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.prettier_path = Some(path.into());
        self
    }

    /// Overrides logging suppression for this call only.
    pub fn with_disable_log(mut self, disabled: bool) -> Self {
        self.disable_log = Some(disabled);
        self
    }
}

/// The autofix-then-format pipeline.
pub struct Pipeline {
    resolver: Box<dyn ToolResolver>,
    sink: Arc<dyn DiagnosticSink>,
}

impl Pipeline {
    /// Creates a pipeline over the bundled tool installations.
    pub fn new() -> Self {
        Self::with_resolver(Box::new(BundledResolver::new()))
    }

    /// Creates a pipeline over a custom resolver.
    pub fn with_resolver(resolver: Box<dyn ToolResolver>) -> Self {
        Self {
            resolver,
            sink: Arc::new(TracingSink),
        }
    }

    /// Replaces the diagnostic sink.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Autofixes `input.text`, then formats the result.
    ///
    /// Any failure aborts the whole call; no text is returned on error. The
    /// failure is reported once through the diagnostic channel first,
    /// unless suppressed for this call or process-wide.
    pub fn format(&self, input: &FormatInput) -> Result<String, FormatError> {
        match self.run(input) {
            Ok(text) => Ok(text),
            Err(err) => {
                let suppressed = input.disable_log.unwrap_or_else(log_disabled);
                if !suppressed {
                    self.sink
                        .error(&format!("{LOG_PREFIX}: {}: {}", err.stage(), err));
                }
                Err(err)
            }
        }
    }

    fn run(&self, input: &FormatInput) -> Result<String, FormatError> {
        let linter = self
            .resolver
            .linter(input.eslint_path.as_deref())
            .map_err(FormatError::ModuleResolution)?;
        let formatter = self
            .resolver
            .formatter(input.prettier_path.as_deref())
            .map_err(FormatError::ModuleResolution)?;

        let eslint_config = match &input.eslint_config {
            Some(config) => config.clone(),
            None => {
                let discovered = linter
                    .config_for_file(input.file_path.as_deref())
                    .map_err(FormatError::ConfigResolution)?;
                serde_json::from_value(discovered).map_err(|e| {
                    FormatError::ConfigResolution(ToolError::protocol(
                        ToolKind::Eslint,
                        e.to_string(),
                    ))
                })?
            }
        };

        let explicit = match &input.prettier_options {
            Some(options) => Some(options.clone()),
            None => self.discover_formatter_options(formatter.as_ref(), input)?,
        };

        let computed = compute_options(&eslint_config, explicit.as_ref());
        debug!("running autofix pass");

        let eslint_value = serde_json::to_value(&computed.eslint).unwrap_or(Value::Null);
        let report = linter
            .execute_with_fix(&input.text, &eslint_value, input.file_path.as_deref())
            .map_err(FormatError::Autofix)?;

        let mut prettier = computed.prettier;
        if let Some(path) = &input.file_path {
            prettier.filepath = Some(path.to_string_lossy().into_owned());
        }
        debug!("running format pass");

        let prettier_value = serde_json::to_value(&prettier).unwrap_or(Value::Null);
        formatter
            .format(&report.output, &prettier_value)
            .map_err(FormatError::Format)
    }

    fn discover_formatter_options(
        &self,
        formatter: &dyn lintfmt_host::FormatterHost,
        input: &FormatInput,
    ) -> Result<Option<FormatterOptions>, FormatError> {
        let Some(path) = &input.file_path else {
            return Ok(None);
        };
        let resolved = formatter
            .resolve_config(path)
            .map_err(FormatError::ConfigResolution)?;
        resolved
            .map(|value| {
                serde_json::from_value(value).map_err(|e| {
                    FormatError::ConfigResolution(ToolError::protocol(
                        ToolKind::Prettier,
                        e.to_string(),
                    ))
                })
            })
            .transpose()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats `input.text` with the bundled pipeline.
pub fn format(input: &FormatInput) -> Result<String, FormatError> {
    Pipeline::new().format(input)
}
