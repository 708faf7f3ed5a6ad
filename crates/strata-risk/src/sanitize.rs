//! Input sanitization.
//!
//! Upstream callers may hand the scorer `null`, `NaN`, numeric strings, or
//! negative values even though the contract is numeric. Every such value
//! is replaced by a safe default instead of rejecting the request:
//! `0.0` for levels and factors, `0` for counts, `false` for flags.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Replace a non-finite or negative level/factor with `0.0`.
#[must_use]
pub fn level(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}

/// Sanitize an optional level/factor; absent values become `0.0`.
#[must_use]
pub fn optional_level(value: Option<f64>) -> f64 {
    value.map_or(0.0, level)
}

/// Convert an arbitrary float into a non-negative count.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn count(value: f64) -> u32 {
    let value = level(value).floor();
    if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value as u32
    }
}

fn value_to_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    }
}

fn value_to_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.is_finite() && f != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "y"
        ),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

/// Serde adapter: any JSON value → sanitized non-negative `f64`.
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce a JSON value.
pub fn lenient_level<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(level(value.as_ref().map_or(0.0, value_to_f64)))
}

/// Serde adapter: any JSON value → sanitized `u32` count.
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce a JSON value.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(count(value.as_ref().map_or(0.0, value_to_f64)))
}

/// Serde adapter: any JSON value → `bool` (`false` unless clearly true).
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce a JSON value.
pub fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().is_some_and(value_to_bool))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_replaces_nan_infinite_and_negative() {
        assert!(level(f64::NAN).abs() < f64::EPSILON);
        assert!(level(f64::INFINITY).abs() < f64::EPSILON);
        assert!(level(-2.0).abs() < f64::EPSILON);
        assert!((level(2.5) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn optional_level_defaults_missing_to_zero() {
        assert!(optional_level(None).abs() < f64::EPSILON);
        assert!((optional_level(Some(3.0)) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn count_floors_and_saturates() {
        assert_eq!(count(4.9), 4);
        assert_eq!(count(f64::NAN), 0);
        assert_eq!(count(-1.0), 0);
        assert_eq!(count(1e20), u32::MAX);
    }

    #[test]
    fn value_to_bool_accepts_common_spellings() {
        assert!(value_to_bool(&Value::String("yes".into())));
        assert!(value_to_bool(&serde_json::json!(1)));
        assert!(!value_to_bool(&serde_json::json!(0)));
        assert!(!value_to_bool(&Value::Null));
    }
}
