//! Payload building blocks shared by the operation descriptors

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// `Err("<field> is required")` for empty or whitespace-only input.
pub fn require_non_empty(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field} is required"))
    } else {
        Ok(())
    }
}

/// Server properties are multi-valued: scalars become one-element arrays,
/// arrays pass through untouched and `null` becomes an empty array.
pub fn wrap_values(value: &Value) -> Value {
    match value {
        Value::Array(_) => value.clone(),
        Value::Null => Value::Array(Vec::new()),
        scalar => Value::Array(vec![scalar.clone()]),
    }
}

/// Wrap every value of a property map.
pub fn wrap_property_map(properties: &BTreeMap<String, Value>) -> Map<String, Value> {
    properties
        .iter()
        .map(|(name, value)| (name.clone(), wrap_values(value)))
        .collect()
}
