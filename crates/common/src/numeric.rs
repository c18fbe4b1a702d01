//! Lenient number normalisation for upstream payloads.
//!
//! Upstream services send amounts and points as JSON numbers, numeric strings,
//! or occasionally garbage. Everything is normalised to a number here; any
//! value that does not parse as a finite number becomes zero.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Converts an arbitrary JSON value into a decimal amount.
///
/// Numbers and numeric strings are parsed; `null`, booleans, objects,
/// unparseable strings and non-finite values yield zero.
pub fn decimal_from_value(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Decimal::from(i)
            } else if let Some(u) = n.as_u64() {
                Decimal::from(u)
            } else {
                n.as_f64().map(decimal_from_f64).unwrap_or_default()
            }
        }
        Value::String(s) => decimal_from_str(s),
        _ => Decimal::ZERO,
    }
}

/// Converts an arbitrary JSON value into a whole number of points.
///
/// Fractional values are rounded to the nearest integer.
pub fn points_from_value(value: &Value) -> i64 {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else if let Some(u) = n.as_u64() {
                i64::try_from(u).unwrap_or(i64::MAX)
            } else {
                n.as_f64().map(points_from_f64).unwrap_or_default()
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(points_from_f64))
                .unwrap_or_default()
        }
        _ => 0,
    }
}

fn decimal_from_str(s: &str) -> Decimal {
    let trimmed = s.trim();
    Decimal::from_str(trimmed)
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().map(decimal_from_f64))
        .unwrap_or_default()
}

fn decimal_from_f64(f: f64) -> Decimal {
    if !f.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::try_from(f).unwrap_or_default()
}

fn points_from_f64(f: f64) -> i64 {
    if !f.is_finite() {
        return 0;
    }
    // `as` saturates at the i64 bounds
    f.round() as i64
}

/// `deserialize_with` adapter producing a [`Decimal`] from any JSON value.
pub mod lenient_decimal {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(decimal_from_value(&value))
    }
}

/// `deserialize_with` adapter producing a point count from any JSON value.
pub mod lenient_points {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(points_from_value(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_numbers_and_numeric_strings_parse() {
        assert_eq!(decimal_from_value(&json!(50)), dec!(50));
        assert_eq!(decimal_from_value(&json!(12.5)), dec!(12.5));
        assert_eq!(decimal_from_value(&json!("7.25")), dec!(7.25));
        assert_eq!(decimal_from_value(&json!(" 3 ")), dec!(3));
    }

    #[test]
    fn test_garbage_defaults_to_zero() {
        assert_eq!(decimal_from_value(&json!("abc")), Decimal::ZERO);
        assert_eq!(decimal_from_value(&json!("NaN")), Decimal::ZERO);
        assert_eq!(decimal_from_value(&json!("inf")), Decimal::ZERO);
        assert_eq!(decimal_from_value(&json!(null)), Decimal::ZERO);
        assert_eq!(decimal_from_value(&json!({"x": 1})), Decimal::ZERO);
        assert_eq!(decimal_from_value(&json!(true)), Decimal::ZERO);
    }

    #[test]
    fn test_points_round_and_default() {
        assert_eq!(points_from_value(&json!(10)), 10);
        assert_eq!(points_from_value(&json!("42")), 42);
        assert_eq!(points_from_value(&json!("4.6")), 5);
        assert_eq!(points_from_value(&json!(2.4)), 2);
        assert_eq!(points_from_value(&json!("ten")), 0);
        assert_eq!(points_from_value(&json!(null)), 0);
    }

    #[derive(Deserialize)]
    struct Wire {
        #[serde(default, deserialize_with = "lenient_decimal::deserialize")]
        amount: Decimal,
        #[serde(default, deserialize_with = "lenient_points::deserialize")]
        points: i64,
    }

    #[test]
    fn test_adapters_tolerate_missing_and_mistyped_fields() {
        let wire: Wire = serde_json::from_value(json!({"amount": "19.99"})).unwrap();
        assert_eq!(wire.amount, dec!(19.99));
        assert_eq!(wire.points, 0);

        let wire: Wire = serde_json::from_value(json!({"amount": [], "points": "8"})).unwrap();
        assert_eq!(wire.amount, Decimal::ZERO);
        assert_eq!(wire.points, 8);
    }
}
