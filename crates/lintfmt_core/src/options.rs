//! Typed views of the option sets handed to the external tools.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::merge::overlay;

/// The formatter's trailing comma policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingComma {
    /// No trailing commas anywhere.
    None,
    /// Trailing commas everywhere except function parameter lists.
    Es5,
    /// Trailing commas everywhere.
    All,
}

/// Formatter options, partially ordered by merge precedence: explicit
/// caller options beat rule-derived values, which beat [tool defaults].
///
/// Unset fields serialize to nothing at all, so the formatter's own
/// defaults stand wherever this set has no opinion. Unrecognized keys pass
/// through `extra` verbatim.
///
/// [tool defaults]: FormatterOptions::tool_defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatterOptions {
    /// Maximum rendered line width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_width: Option<u64>,

    /// Spaces per indentation level. Absent when indentation uses tabs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_width: Option<u64>,

    /// Whether statements end in semicolons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semi: Option<bool>,

    /// Whether strings prefer single quotes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_quote: Option<bool>,

    /// Trailing comma policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailing_comma: Option<TrailingComma>,

    /// Whether object braces get inner spacing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bracket_spacing: Option<bool>,

    /// Whether indentation uses tabs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_tabs: Option<bool>,

    /// Parser the formatter should use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,

    /// Path of the text being formatted; lets the formatter infer a parser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filepath: Option<String>,

    /// Unrecognized options, passed through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FormatterOptions {
    /// Creates an empty option set with no opinion on anything.
    pub fn new() -> Self {
        Self::default()
    }

    /// The fallback defaults, the lowest merge layer: width 80, two-space
    /// indentation, semicolons, double quotes, no trailing commas,
    /// unspaced brackets, the `babel` parser.
    ///
    /// These track what the corresponding linter rules default to, so a
    /// rule set that says nothing formats the way an unconfigured linter
    /// expects.
    pub fn tool_defaults() -> Self {
        Self {
            print_width: Some(80),
            tab_width: Some(2),
            semi: Some(true),
            single_quote: Some(false),
            trailing_comma: Some(TrailingComma::None),
            bracket_spacing: Some(false),
            use_tabs: Some(false),
            parser: Some("babel".to_string()),
            filepath: None,
            extra: Map::new(),
        }
    }

    /// Overlays `over` onto `self`: every key `over` has an opinion on
    /// wins, everything else is kept, and unrecognized keys merge the same
    /// way as typed ones.
    pub fn merged_with(&self, over: &FormatterOptions) -> Self {
        let base = Value::Object(to_object(self));
        let over = Value::Object(to_object(over));
        serde_json::from_value(overlay(&base, &over)).unwrap_or_default()
    }
}

fn to_object(options: &FormatterOptions) -> Map<String, Value> {
    match serde_json::to_value(options) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// The normalized option set for an autofix invocation.
///
/// Contains exactly the keys meaningful to a fix run; report formatting
/// and other output-side options never appear here. Absent keys are
/// omitted from the serialized form, never null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EslintOptions {
    /// Always true: the whole point of the pass.
    #[serde(default)]
    pub fix: bool,

    /// Whether the linter may consult its own config files.
    #[serde(default)]
    pub use_eslintrc: bool,

    /// The rules mapping, verbatim from the configuration.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub rules: Map<String, Value>,

    /// Global declarations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub globals: Option<Value>,

    /// Parser options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser_options: Option<Value>,

    /// Parser override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser: Option<Value>,

    /// Environment presets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Value>,

    /// Plugin list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Value>,

    /// Shared settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,

    /// Config extensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Value>,

    /// Ignore handling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore: Option<Value>,
}
