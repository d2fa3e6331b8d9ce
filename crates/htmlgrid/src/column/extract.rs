//! Value lookup over serialized rows.

use serde_json::Value;

/// Walks a dot-separated path (`"author.name"`, `"tags.0"`) through a JSON
/// value.
///
/// Object segments are looked up by key, array segments by numeric index.
/// Returns `Ok(None)` when a `null` is met before the end of the path and
/// `null_safe` is set. Missing keys, out-of-range indices and attempts to
/// descend into scalars are errors, reported as a human-readable reason.
pub fn lookup_path<'v>(
    data: &'v Value,
    path: &str,
    null_safe: bool,
) -> Result<Option<&'v Value>, String> {
    let mut current = data;
    for part in path.split('.') {
        current = match current {
            Value::Object(map) => map
                .get(part)
                .ok_or_else(|| format!("missing property '{}'", part))?,
            Value::Array(items) => {
                let index = part
                    .parse::<usize>()
                    .map_err(|_| format!("'{}' is not an array index", part))?;
                items
                    .get(index)
                    .ok_or_else(|| format!("index {} is out of bounds", index))?
            }
            Value::Null if null_safe => return Ok(None),
            Value::Null => return Err(format!("cannot read '{}' from null", part)),
            other => {
                return Err(format!(
                    "cannot read '{}' from {}",
                    part,
                    json_type_name(other)
                ))
            }
        };
    }
    Ok(Some(current))
}

/// Converts a JSON leaf to cell text. `null` becomes the empty string and
/// structured values are rendered as compact JSON.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
