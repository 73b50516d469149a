//! Rule-to-option translation.
//!
//! Derives the formatter configuration equivalent to a linter's active rule
//! set, one small pure decoder per formatter option, then assembles the
//! layers in precedence order: tool defaults, then rule-derived values,
//! then explicit caller options.
//!
//! Rule state is three-valued. A rule that is *disabled* suppresses its
//! target option entirely, leaving the formatter's own default in charge. A
//! rule that is *not configured* (absent, or enabled without a usable
//! value) lets the tool-default layer stand. Only a *configured* rule
//! contributes a derived value. Malformed specifiers count as not
//! configured; translation has no failure mode.

use serde_json::{Map, Value};
use tracing::debug;

use crate::config::{LinterConfig, RuleSpecifier};
use crate::merge::overlay;
use crate::options::{EslintOptions, FormatterOptions, TrailingComma};

/// Both option sets derived from one linter configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedOptions {
    /// Normalized options for the autofix pass.
    pub eslint: EslintOptions,
    /// Merged options for the format pass.
    pub prettier: FormatterOptions,
}

/// Translates a linter configuration into the normalized option pair.
///
/// `explicit` options win over everything derived from the rules. This
/// function never fails; anything it cannot make sense of simply
/// contributes nothing.
pub fn compute_options(
    config: &LinterConfig,
    explicit: Option<&FormatterOptions>,
) -> ComputedOptions {
    let eslint = normalize_eslint(config);
    let derived = prettier_from_rules(&config.rules);
    let prettier = match explicit {
        Some(explicit) => derived.merged_with(explicit),
        None => derived,
    };

    debug!(
        rules = config.rules.len(),
        "translated linter rules into formatter options"
    );

    ComputedOptions { eslint, prettier }
}

/// Overlays `config` onto `defaults`, field by field.
///
/// Used to build a reference configuration from a partial one: scalar and
/// sequence fields from `config` replace the default, mapping fields merge
/// recursively, and keys absent from both sides stay absent.
pub fn default_eslint_config(config: &LinterConfig, defaults: &LinterConfig) -> LinterConfig {
    let base = serde_json::to_value(defaults).unwrap_or(Value::Null);
    let over = serde_json::to_value(config).unwrap_or(Value::Null);
    serde_json::from_value(overlay(&base, &over)).unwrap_or_default()
}

/// Keeps exactly the configuration keys meaningful to a fix run.
fn normalize_eslint(config: &LinterConfig) -> EslintOptions {
    EslintOptions {
        fix: true,
        use_eslintrc: config.use_eslintrc.unwrap_or(false),
        rules: config.rules.clone(),
        globals: config.globals.clone(),
        parser_options: config.parser_options.clone(),
        parser: config.extra.get("parser").cloned(),
        env: config.extra.get("env").cloned(),
        plugins: config.extra.get("plugins").cloned(),
        settings: config.extra.get("settings").cloned(),
        extends: config.extra.get("extends").cloned(),
        ignore: config.extra.get("ignore").cloned(),
    }
}

/// Effective state of one rule with respect to translation.
enum RuleValue<'a> {
    /// Severity resolved to off.
    Disabled,
    /// Absent, enabled without a value, or unintelligible.
    NotConfigured,
    /// Enabled with this value.
    Value(&'a Value),
}

fn rule_value<'a>(rules: &'a Map<String, Value>, name: &str) -> RuleValue<'a> {
    let Some(raw) = rules.get(name) else {
        return RuleValue::NotConfigured;
    };
    let spec = RuleSpecifier::decode(raw);
    match spec {
        RuleSpecifier::Malformed => RuleValue::NotConfigured,
        _ if !spec.is_enabled() => RuleValue::Disabled,
        _ => match spec.value() {
            Some(value) => RuleValue::Value(value),
            None => RuleValue::NotConfigured,
        },
    }
}

/// Outcome of deriving one formatter option from the rule set.
enum Derived<T> {
    /// The governing rule is disabled: drop the option entirely so the
    /// formatter's own default stands.
    Suppress,
    /// No usable rule value: the tool-default layer stays in charge.
    Fallback,
    /// A value derived from the rule.
    Value(T),
}

fn apply<T>(slot: &mut Option<T>, derived: Derived<T>) {
    match derived {
        Derived::Suppress => *slot = None,
        Derived::Fallback => {}
        Derived::Value(value) => *slot = Some(value),
    }
}

/// Assembles the rule-derived layer on top of the tool defaults.
fn prettier_from_rules(rules: &Map<String, Value>) -> FormatterOptions {
    let mut options = FormatterOptions::tool_defaults();
    apply(&mut options.print_width, print_width(rules));
    apply(&mut options.tab_width, tab_width(rules));
    apply(&mut options.use_tabs, use_tabs(rules));
    apply(&mut options.semi, semi(rules));
    apply(&mut options.single_quote, single_quote(rules));
    apply(&mut options.trailing_comma, trailing_comma(rules));
    apply(&mut options.bracket_spacing, bracket_spacing(rules));
    options
}

/// `max-len`: a bare number, or an options mapping's `code` field.
fn print_width(rules: &Map<String, Value>) -> Derived<u64> {
    match rule_value(rules, "max-len") {
        RuleValue::Disabled => Derived::Suppress,
        RuleValue::NotConfigured => Derived::Fallback,
        RuleValue::Value(value) => match value {
            Value::Number(n) => n.as_u64().map_or(Derived::Fallback, Derived::Value),
            Value::Object(opts) => opts
                .get("code")
                .and_then(Value::as_u64)
                .map_or(Derived::Fallback, Derived::Value),
            _ => Derived::Fallback,
        },
    }
}

/// `indent` numeric value. The `"tab"` value suppresses the width outright
/// rather than deriving one.
fn tab_width(rules: &Map<String, Value>) -> Derived<u64> {
    match rule_value(rules, "indent") {
        RuleValue::Disabled => Derived::Suppress,
        RuleValue::NotConfigured => Derived::Fallback,
        RuleValue::Value(value) => match value {
            Value::String(s) if s == "tab" => Derived::Suppress,
            Value::Number(n) => n.as_u64().map_or(Derived::Fallback, Derived::Value),
            _ => Derived::Fallback,
        },
    }
}

/// `indent`: `"tab"` means tabs, a numeric width means spaces.
fn use_tabs(rules: &Map<String, Value>) -> Derived<bool> {
    match rule_value(rules, "indent") {
        RuleValue::Disabled => Derived::Suppress,
        RuleValue::NotConfigured => Derived::Fallback,
        RuleValue::Value(value) => match value {
            Value::String(s) if s == "tab" => Derived::Value(true),
            Value::Number(_) => Derived::Value(false),
            _ => Derived::Fallback,
        },
    }
}

/// `semi`: `"never"` drops semicolons, `"always"` keeps them.
fn semi(rules: &Map<String, Value>) -> Derived<bool> {
    match rule_value(rules, "semi") {
        RuleValue::Disabled => Derived::Suppress,
        RuleValue::NotConfigured => Derived::Fallback,
        RuleValue::Value(value) => match value.as_str() {
            Some("never") => Derived::Value(false),
            Some("always") => Derived::Value(true),
            _ => Derived::Fallback,
        },
    }
}

/// `quotes`: only `"single"` turns single quotes on; any other enabled
/// style derives an explicit false.
fn single_quote(rules: &Map<String, Value>) -> Derived<bool> {
    match rule_value(rules, "quotes") {
        RuleValue::Disabled => Derived::Suppress,
        RuleValue::NotConfigured => Derived::Fallback,
        RuleValue::Value(value) => match value.as_str() {
            Some("single") => Derived::Value(true),
            Some(_) => Derived::Value(false),
            None => Derived::Fallback,
        },
    }
}

/// `comma-dangle`: a string enum, or the five-field options mapping
/// collapsed by [`aggregate_trailing_comma`].
fn trailing_comma(rules: &Map<String, Value>) -> Derived<TrailingComma> {
    match rule_value(rules, "comma-dangle") {
        RuleValue::Disabled => Derived::Suppress,
        RuleValue::NotConfigured => Derived::Fallback,
        RuleValue::Value(value) => match value {
            Value::String(s) if s == "never" => Derived::Value(TrailingComma::None),
            Value::String(_) => Derived::Value(TrailingComma::All),
            Value::Object(fields) => Derived::Value(aggregate_trailing_comma(fields)),
            _ => Derived::Fallback,
        },
    }
}

/// Collapses the five per-construct comma policies into the formatter's
/// single three-valued policy.
///
/// The mapping is inherently lossy, so it is pinned to a total function: a
/// field is *enabled* when it is `"always"` or `"always-multiline"`, and a
/// missing field counts as `"never"`. All four non-function fields enabled
/// plus functions enabled gives `all`; all four enabled with functions
/// disabled gives `es5`; every other combination, ambiguous ones included,
/// gives `none`.
fn aggregate_trailing_comma(fields: &Map<String, Value>) -> TrailingComma {
    fn enabled(fields: &Map<String, Value>, name: &str) -> bool {
        matches!(
            fields.get(name).and_then(Value::as_str),
            Some("always") | Some("always-multiline")
        )
    }

    let es5 = ["arrays", "objects", "imports", "exports"]
        .iter()
        .all(|name| enabled(fields, name));
    let functions = enabled(fields, "functions");

    match (es5, functions) {
        (true, true) => TrailingComma::All,
        (true, false) => TrailingComma::Es5,
        (false, _) => TrailingComma::None,
    }
}

/// `object-curly-spacing`: `"always"` spaces brackets, `"never"` does not.
fn bracket_spacing(rules: &Map<String, Value>) -> Derived<bool> {
    match rule_value(rules, "object-curly-spacing") {
        RuleValue::Disabled => Derived::Suppress,
        RuleValue::NotConfigured => Derived::Fallback,
        RuleValue::Value(value) => match value.as_str() {
            Some("always") => Derived::Value(true),
            Some("never") => Derived::Value(false),
            _ => Derived::Fallback,
        },
    }
}
