//! Coercion of loosely-typed values.
//!
//! Column positions and table properties can arrive from configuration,
//! form posts or designer tooling as strings or JSON values. Everything is
//! funneled through these helpers so a bad value fails the same way
//! everywhere: [`TableError::InvalidCast`].

use serde_json::Value;

use crate::error::TableError;

/// Conversion into a signed column position.
///
/// Negative positions are meaningful (they append on insert), so the target
/// is `i64` rather than `usize`.
pub trait IntoColumnIndex {
    fn into_column_index(self) -> Result<i64, TableError>;
}

macro_rules! lossless_index {
    ($($t:ty),*) => {
        $(impl IntoColumnIndex for $t {
            fn into_column_index(self) -> Result<i64, TableError> {
                Ok(i64::from(self))
            }
        })*
    };
}

lossless_index!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! checked_index {
    ($($t:ty),*) => {
        $(impl IntoColumnIndex for $t {
            fn into_column_index(self) -> Result<i64, TableError> {
                i64::try_from(self).map_err(|_| invalid(self.to_string(), "integer"))
            }
        })*
    };
}

checked_index!(isize, usize, u64);

impl IntoColumnIndex for &str {
    fn into_column_index(self) -> Result<i64, TableError> {
        cast_integer_str(self)
    }
}

impl IntoColumnIndex for String {
    fn into_column_index(self) -> Result<i64, TableError> {
        cast_integer_str(&self)
    }
}

impl IntoColumnIndex for &Value {
    fn into_column_index(self) -> Result<i64, TableError> {
        cast_integer(self)
    }
}

impl IntoColumnIndex for Value {
    fn into_column_index(self) -> Result<i64, TableError> {
        cast_integer(&self)
    }
}

fn invalid(value: impl Into<String>, target: &'static str) -> TableError {
    TableError::InvalidCast {
        value: value.into(),
        target,
    }
}

fn cast_integer_str(s: &str) -> Result<i64, TableError> {
    s.trim().parse::<i64>().map_err(|_| invalid(s, "integer"))
}

/// Coerces a JSON value to an integer.
///
/// Accepts integers, floats without a fractional part and numeric strings.
pub fn cast_integer(value: &Value) -> Result<i64, TableError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
                _ => Err(invalid(n.to_string(), "integer")),
            }
        }
        Value::String(s) => cast_integer_str(s),
        other => Err(invalid(other.to_string(), "integer")),
    }
}

/// Coerces a JSON value to a boolean.
///
/// Strings `true/false`, `yes/no`, `on/off`, `1/0` (any case) and the
/// numbers `0`/`1` are accepted alongside real booleans.
pub fn cast_bool(value: &Value) -> Result<bool, TableError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(invalid(n.to_string(), "boolean")),
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" | "" => Ok(false),
            _ => Err(invalid(s.as_str(), "boolean")),
        },
        other => Err(invalid(other.to_string(), "boolean")),
    }
}

/// Coerces a JSON value to an optional string. `null` clears the value.
pub fn cast_opt_string(value: &Value) -> Result<Option<String>, TableError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(invalid(other.to_string(), "string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_convert_directly() {
        assert_eq!(3i32.into_column_index().unwrap(), 3);
        assert_eq!((-1i64).into_column_index().unwrap(), -1);
        assert_eq!(5usize.into_column_index().unwrap(), 5);
    }

    #[test]
    fn oversized_usize_is_rejected() {
        let err = usize::MAX.into_column_index().unwrap_err();
        assert!(matches!(err, TableError::InvalidCast { target: "integer", .. }));
    }

    #[test]
    fn numeric_strings_are_accepted() {
        assert_eq!(" 2 ".into_column_index().unwrap(), 2);
        assert_eq!("-1".to_string().into_column_index().unwrap(), -1);
    }

    #[test]
    fn non_numeric_strings_fail() {
        assert!(matches!(
            "second".into_column_index(),
            Err(TableError::InvalidCast { .. })
        ));
        assert!("1.5".into_column_index().is_err());
    }

    #[test]
    fn json_values() {
        assert_eq!(cast_integer(&json!(4)).unwrap(), 4);
        assert_eq!(cast_integer(&json!(4.0)).unwrap(), 4);
        assert_eq!(cast_integer(&json!("7")).unwrap(), 7);
        assert!(cast_integer(&json!(4.5)).is_err());
        assert!(cast_integer(&json!([1])).is_err());
        assert!(cast_integer(&json!(true)).is_err());
    }

    #[test]
    fn booleans() {
        assert!(cast_bool(&json!(true)).unwrap());
        assert!(cast_bool(&json!("Yes")).unwrap());
        assert!(!cast_bool(&json!("off")).unwrap());
        assert!(!cast_bool(&json!(0)).unwrap());
        assert!(cast_bool(&json!(2)).is_err());
        assert!(cast_bool(&json!("maybe")).is_err());
    }

    #[test]
    fn optional_strings() {
        assert_eq!(cast_opt_string(&json!(null)).unwrap(), None);
        assert_eq!(cast_opt_string(&json!("x")).unwrap().as_deref(), Some("x"));
        assert_eq!(cast_opt_string(&json!(12)).unwrap().as_deref(), Some("12"));
        assert!(cast_opt_string(&json!({"a": 1})).is_err());
    }
}
