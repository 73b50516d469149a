//! End-to-end pipeline tests over scripted collaborator doubles.
//!
//! The doubles apply genuinely simple text transformations driven by the
//! options the pipeline hands them, so these tests exercise the full
//! translate-autofix-format contract without the real Node tools.

use std::path::Path;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use lintfmt_core::{
    DiagnosticSink, FormatError, FormatInput, LinterConfig, Pipeline, set_disable_log,
};
use lintfmt_host::{
    BundledResolver, FixReport, FormatterHost, LinterHost, ToolError, ToolKind, ToolResolver,
};

#[derive(Default)]
struct CountingSink {
    messages: Mutex<Vec<String>>,
}

impl CountingSink {
    fn count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

impl DiagnosticSink for CountingSink {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Autofix double: honors the `semi` and `quotes` rules it receives by
/// stripping semicolons and normalizing quote characters.
#[derive(Default)]
struct FixingLinter {
    discovered_config: Option<Value>,
    fail: Option<String>,
}

impl LinterHost for FixingLinter {
    fn execute_with_fix(
        &self,
        text: &str,
        options: &Value,
        _file_path: Option<&Path>,
    ) -> Result<FixReport, ToolError> {
        if let Some(message) = &self.fail {
            return Err(ToolError::execution(message.clone()));
        }

        let mut output = text.to_string();
        let rules = &options["rules"];
        if rules["semi"] == json!([2, "never"]) || rules["semi"] == json!(["error", "never"]) {
            output = output.replace(';', "");
        }
        if rules["quotes"][1] == json!("single") {
            output = output.replace('"', "'");
        }
        Ok(FixReport {
            output,
            error_count: 0,
        })
    }

    fn config_for_file(&self, _file_path: Option<&Path>) -> Result<Value, ToolError> {
        match &self.discovered_config {
            Some(config) => Ok(config.clone()),
            None => Ok(json!({})),
        }
    }
}

/// Format double: collapses runs of spaces and terminates with exactly one
/// newline, recording the options it saw.
#[derive(Default)]
struct CollapsingFormatter {
    resolved_config: Option<Value>,
    fail: Option<String>,
    seen_options: Mutex<Vec<Value>>,
}

impl FormatterHost for CollapsingFormatter {
    fn format(&self, text: &str, options: &Value) -> Result<String, ToolError> {
        if let Some(message) = &self.fail {
            return Err(ToolError::execution(message.clone()));
        }
        self.seen_options.lock().unwrap().push(options.clone());

        let mut output = text.trim_end().to_string();
        while output.contains("  ") {
            output = output.replace("  ", " ");
        }
        output.push('\n');
        Ok(output)
    }

    fn resolve_config(&self, _file_path: &Path) -> Result<Option<Value>, ToolError> {
        Ok(self.resolved_config.clone())
    }
}

struct Doubles {
    linter: Arc<FixingLinter>,
    formatter: Arc<CollapsingFormatter>,
}

impl ToolResolver for Doubles {
    fn linter(&self, path: Option<&Path>) -> Result<Box<dyn LinterHost>, ToolError> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(ToolError::unresolvable(ToolKind::Eslint, path));
            }
        }
        Ok(Box::new(LinterRef(Arc::clone(&self.linter))))
    }

    fn formatter(&self, path: Option<&Path>) -> Result<Box<dyn FormatterHost>, ToolError> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(ToolError::unresolvable(ToolKind::Prettier, path));
            }
        }
        Ok(Box::new(FormatterRef(Arc::clone(&self.formatter))))
    }
}

struct LinterRef(Arc<FixingLinter>);

impl LinterHost for LinterRef {
    fn execute_with_fix(
        &self,
        text: &str,
        options: &Value,
        file_path: Option<&Path>,
    ) -> Result<FixReport, ToolError> {
        self.0.execute_with_fix(text, options, file_path)
    }

    fn config_for_file(&self, file_path: Option<&Path>) -> Result<Value, ToolError> {
        self.0.config_for_file(file_path)
    }
}

struct FormatterRef(Arc<CollapsingFormatter>);

impl FormatterHost for FormatterRef {
    fn format(&self, text: &str, options: &Value) -> Result<String, ToolError> {
        self.0.format(text, options)
    }

    fn resolve_config(&self, file_path: &Path) -> Result<Option<Value>, ToolError> {
        self.0.resolve_config(file_path)
    }
}

fn pipeline_over(
    linter: FixingLinter,
    formatter: CollapsingFormatter,
) -> (
    Pipeline,
    Arc<FixingLinter>,
    Arc<CollapsingFormatter>,
    Arc<CountingSink>,
) {
    let linter = Arc::new(linter);
    let formatter = Arc::new(formatter);
    let sink = Arc::new(CountingSink::default());
    let pipeline = Pipeline::with_resolver(Box::new(Doubles {
        linter: Arc::clone(&linter),
        formatter: Arc::clone(&formatter),
    }))
    .with_sink(sink.clone());
    (pipeline, linter, formatter, sink)
}

fn config_with_default_rules() -> LinterConfig {
    serde_json::from_value(json!({
        "parserOptions": { "ecmaVersion": 7 },
        "rules": {
            "semi": [2, "never"],
            "max-len": [2, 120, 2],
            "indent": [2, 2, { "SwitchCase": 1 }],
            "quotes": [2, "single", { "avoidEscape": true, "allowTemplateLiterals": true }],
            "comma-dangle": [2, {
                "arrays": "always-multiline",
                "objects": "always-multiline",
                "imports": "always-multiline",
                "exports": "always-multiline",
                "functions": "always-multiline"
            }]
        }
    }))
    .unwrap()
}

#[test]
fn sanity_autofix_then_format() {
    let (pipeline, _, _, _) =
        pipeline_over(FixingLinter::default(), CollapsingFormatter::default());

    let input = FormatInput::new("function  foo (){ console.log( \"hi\" ); }")
        .with_eslint_config(config_with_default_rules())
        .with_disable_log(false);
    let output = pipeline.format(&input).unwrap();

    // Semicolon-free, single-quoted, collapsed, newline-terminated.
    assert_eq!(output, "function foo (){ console.log( 'hi' ) }\n");
}

#[test]
fn two_runs_match_byte_for_byte() {
    let (pipeline, _, _, _) =
        pipeline_over(FixingLinter::default(), CollapsingFormatter::default());

    let input = FormatInput::new("function  foo (){ console.log( 'hi' ); }")
        .with_eslint_config(config_with_default_rules());
    let first = pipeline.format(&input).unwrap();
    let second = pipeline.format(&input).unwrap();

    assert_eq!(first.as_bytes(), second.as_bytes());
    assert!(first.ends_with('\n'));
    assert!(!first.contains(';'));
    assert!(!first.contains('"'));
}

#[test]
fn derived_options_reach_the_formatter() {
    let (pipeline, _, formatter, _) =
        pipeline_over(FixingLinter::default(), CollapsingFormatter::default());

    let input = FormatInput::new("x").with_eslint_config(config_with_default_rules());
    pipeline.format(&input).unwrap();

    let seen = formatter.seen_options.lock().unwrap();
    assert_eq!(seen[0]["printWidth"], json!(120));
    assert_eq!(seen[0]["tabWidth"], json!(2));
    assert_eq!(seen[0]["useTabs"], json!(false));
    assert_eq!(seen[0]["semi"], json!(false));
    assert_eq!(seen[0]["singleQuote"], json!(true));
    assert_eq!(seen[0]["trailingComma"], json!("all"));
}

#[test]
fn config_discovery_feeds_translation() {
    let linter = FixingLinter {
        discovered_config: Some(json!({
            "rules": { "semi": [2, "never"], "quotes": [2, "single"] }
        })),
        ..Default::default()
    };
    let (pipeline, _, formatter, _) = pipeline_over(linter, CollapsingFormatter::default());

    let input = FormatInput::new("const x = \"hi\";").with_file_path("/mock/default-config.js");
    let output = pipeline.format(&input).unwrap();

    assert_eq!(output, "const x = 'hi'\n");
    let seen = formatter.seen_options.lock().unwrap();
    assert_eq!(seen[0]["semi"], json!(false));
    assert_eq!(seen[0]["filepath"], json!("/mock/default-config.js"));
}

#[test]
fn resolved_formatter_config_beats_derived_options() {
    let formatter = CollapsingFormatter {
        resolved_config: Some(json!({ "printWidth": 100 })),
        ..Default::default()
    };
    let (pipeline, _, formatter, _) = pipeline_over(FixingLinter::default(), formatter);

    let input = FormatInput::new("x")
        .with_eslint_config(config_with_default_rules())
        .with_file_path("/project/a.js");
    pipeline.format(&input).unwrap();

    // The file-level formatter config occupies the explicit slot and wins
    // over the rule-derived width; untouched derivations still apply.
    let seen = formatter.seen_options.lock().unwrap();
    assert_eq!(seen[0]["printWidth"], json!(100));
    assert_eq!(seen[0]["singleQuote"], json!(true));
}

#[test]
fn global_toggle_suppresses_until_reset() {
    let linter = FixingLinter {
        fail: Some("Something happened".to_string()),
        ..Default::default()
    };
    let (pipeline, _, _, sink) = pipeline_over(linter, CollapsingFormatter::default());

    set_disable_log(true);
    let silent = FormatInput::new("x").with_eslint_config(config_with_default_rules());
    pipeline.format(&silent).unwrap_err();
    assert_eq!(sink.count(), 0);

    // The per-call override wins over the process-wide toggle.
    let overridden = silent.clone().with_disable_log(false);
    pipeline.format(&overridden).unwrap_err();
    assert_eq!(sink.count(), 1);

    set_disable_log(false);
    pipeline.format(&silent).unwrap_err();
    assert_eq!(sink.count(), 2);
}

#[test]
fn autofix_failure_surfaces_original_message() {
    let linter = FixingLinter {
        fail: Some("Something happened".to_string()),
        ..Default::default()
    };
    let (pipeline, _, _, sink) = pipeline_over(linter, CollapsingFormatter::default());

    let input = FormatInput::new("x")
        .with_eslint_config(config_with_default_rules())
        .with_disable_log(false);
    let err = pipeline.format(&input).unwrap_err();

    assert!(matches!(err, FormatError::Autofix(_)));
    assert_eq!(err.to_string(), "Something happened");
    assert_eq!(sink.count(), 1);
}

#[test]
fn unresolvable_eslint_path_with_the_bundled_resolver() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("non-existent-eslint-module");

    let sink = Arc::new(CountingSink::default());
    let pipeline = Pipeline::with_resolver(Box::new(BundledResolver::with_search_root(
        dir.path(),
    )))
    .with_sink(sink.clone());

    let input = FormatInput::new("")
        .with_eslint_config(config_with_default_rules())
        .with_eslint_path(&missing)
        .with_disable_log(false);
    let err = pipeline.format(&input).unwrap_err();

    assert!(matches!(err, FormatError::ModuleResolution(_)));
    let message = err.to_string();
    assert!(message.contains("ESLint"));
    assert!(message.contains("eslintPath"));
    assert!(message.contains("non-existent-eslint-module"));
    assert_eq!(sink.count(), 1);
}

#[test]
fn unresolvable_prettier_path_logs_zero_times_when_suppressed() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("non-existent-prettier-module");

    let sink = Arc::new(CountingSink::default());
    let pipeline = Pipeline::with_resolver(Box::new(BundledResolver::with_search_root(
        dir.path(),
    )))
    .with_sink(sink.clone());

    let input = FormatInput::new("")
        .with_eslint_config(config_with_default_rules())
        .with_prettier_path(&missing)
        .with_disable_log(true);
    let err = pipeline.format(&input).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("prettier"));
    assert!(message.contains("non-existent-prettier-module"));
    assert_eq!(sink.count(), 0);
}
