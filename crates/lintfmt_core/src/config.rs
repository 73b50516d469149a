//! Linter configuration model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A linter configuration, as supplied by the caller or discovered for a
/// file by the linter itself.
///
/// Only the fields the translator and the autofix pass care about are
/// typed. Everything else lands in `extra` and is preserved verbatim
/// through merges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinterConfig {
    /// Rule name to rule specifier, kept as raw JSON so that any specifier
    /// shape survives a round trip untouched.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub rules: Map<String, Value>,

    /// Parser options forwarded to the autofix pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser_options: Option<Value>,

    /// Global declarations forwarded to the autofix pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub globals: Option<Value>,

    /// Whether the autofix pass may consult the linter's own config files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_eslintrc: Option<bool>,

    /// Unrecognized keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LinterConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Rule severity in any of the linter's encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The rule is disabled.
    Off,
    /// Violations are reported but do not fail the run.
    Warn,
    /// Violations fail the run.
    Error,
}

impl Severity {
    /// Decodes a severity from `0|1|2` or `"off"|"warn"|"error"`.
    ///
    /// Returns `None` for anything else.
    pub fn decode(raw: &Value) -> Option<Self> {
        match raw {
            Value::Number(n) => match n.as_u64()? {
                0 => Some(Severity::Off),
                1 => Some(Severity::Warn),
                2 => Some(Severity::Error),
                _ => None,
            },
            Value::String(s) => match s.as_str() {
                "off" => Some(Severity::Off),
                "warn" => Some(Severity::Warn),
                "error" => Some(Severity::Error),
                _ => None,
            },
            _ => None,
        }
    }

    /// Whether the rule takes part in translation at all.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Severity::Off)
    }
}

/// Decoded shape of a single rule's configuration value.
///
/// The translator pattern-matches on shape, not just value: a bare
/// severity, a `[severity, value, ...]` sequence, or something else
/// entirely, which degrades to "no derivation" rather than failing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleSpecifier<'a> {
    /// A bare severity: `2`, `"error"`, `"off"`.
    Severity(Severity),
    /// Sequence form; the rule value is the second element when present.
    /// Elements past the second stay with the raw rules mapping and are
    /// only meaningful to the autofix pass.
    Entry(Severity, Option<&'a Value>),
    /// Anything else. Contributes nothing to translation.
    Malformed,
}

impl<'a> RuleSpecifier<'a> {
    /// Decodes a raw rule configuration value.
    pub fn decode(raw: &'a Value) -> Self {
        if let Some(severity) = Severity::decode(raw) {
            return RuleSpecifier::Severity(severity);
        }
        if let Value::Array(items) = raw {
            if let Some(severity) = items.first().and_then(Severity::decode) {
                return RuleSpecifier::Entry(severity, items.get(1));
            }
        }
        RuleSpecifier::Malformed
    }

    /// The decoded severity, if the shape carried one.
    pub fn severity(&self) -> Option<Severity> {
        match self {
            RuleSpecifier::Severity(severity) | RuleSpecifier::Entry(severity, _) => {
                Some(*severity)
            }
            RuleSpecifier::Malformed => None,
        }
    }

    /// The effective rule value: the second element of the sequence form.
    pub fn value(&self) -> Option<&'a Value> {
        match self {
            RuleSpecifier::Entry(_, value) => *value,
            _ => None,
        }
    }

    /// Whether the rule is enabled.
    pub fn is_enabled(&self) -> bool {
        self.severity().is_some_and(|severity| severity.is_enabled())
    }
}
