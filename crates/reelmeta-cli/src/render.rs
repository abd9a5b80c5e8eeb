//! Dotted field paths and plain-text rendering of decoded values.

use anyhow::{Result, ensure};
use reelmeta_api::value::{Data, Object, Value};

/// Builds a lazy accessor for a dotted path such as `credits.cast.0.name`.
///
/// Numeric segments index into arrays; every other segment names an object
/// member. The first segment always names a member of `object`.
///
/// # Errors
///
/// Returns an error if the path is empty or has an empty segment.
pub fn select<'a>(object: &'a Object, path: &str) -> Result<Data<'a, &'a Value>> {
    let mut segments = path.split('.');
    let first = segments.next().unwrap_or_default();
    ensure!(!first.is_empty(), "empty segment in field path {path:?}");

    let mut data = Data::root(object).field(first);
    for segment in segments {
        ensure!(!segment.is_empty(), "empty segment in field path {path:?}");
        data = match segment.parse::<i64>() {
            Ok(index) => data.array().index(index),
            Err(_) => data.object().field(segment),
        };
    }
    Ok(data)
}

/// Renders a value for display: strings verbatim, everything else as JSON.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn render(value: &Value) -> Result<String> {
    Ok(match value {
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => serde_json::to_string_pretty(value)?,
        Value::Bool(_) | Value::Number(_) => serde_json::to_string(value)?,
    })
}

/// Renders a whole object as pretty JSON.
///
/// # Errors
///
/// Returns an error if the object cannot be serialized.
pub fn render_object(object: &Object) -> Result<String> {
    Ok(serde_json::to_string_pretty(object)?)
}
