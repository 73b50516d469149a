//! Layered overlay merge for configuration mappings.

use serde_json::Value;

/// Deeply overlays `over` onto `base`.
///
/// Mappings merge key by key, recursing into nested mappings; any other
/// kind of value in `over` (scalars and sequences included) replaces the
/// corresponding `base` value wholesale. Keys absent from both sides stay
/// absent; "no opinion" is expressed by omission, never by null.
///
/// Key order is stable: `base` keys keep their positions, new `over` keys
/// are appended in their own order.
pub fn overlay(base: &Value, over: &Value) -> Value {
    match (base, over) {
        (Value::Object(base), Value::Object(over)) => {
            let mut merged = base.clone();
            for (key, value) in over {
                let layered = match merged.get(key) {
                    Some(existing) => overlay(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), layered);
            }
            Value::Object(merged)
        }
        (_, over) => over.clone(),
    }
}
