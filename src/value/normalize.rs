//! Value Normalization
//!
//! Every value handed to the facade is flattened to the single string
//! representation the backing store persists. The encoding is deterministic
//! and intentionally lossy at the null-like end:
//!
//! - `Null` / `Undefined` / `NaN` all become the empty string, so on read
//!   they collapse to the same observable state.
//! - Booleans, numbers, and strings coerce directly.
//! - Arrays and objects become JSON text.
//! - Opaque host values have no representation and fail hard. The error is
//!   never swallowed and no placeholder is ever written.
//!
//! The normalizer rejects values nested deeper than [`MAX_VALUE_DEPTH`].
//! An owned [`Value`] tree cannot contain a reference cycle, so unbounded
//! depth is the structural failure mode here; it gets the same hard
//! serialization error a cyclic structure would.

use crate::error::{Result, StoreError};
use crate::value::Value;
use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};

/// Maximum value nesting depth (prevents stack overflow during encoding).
pub const MAX_VALUE_DEPTH: usize = 128;

/// Converts a value into the string the backing store persists.
///
/// # Returns
///
/// The encoded string, or [`StoreError::Serialization`] for opaque values
/// and for nesting beyond [`MAX_VALUE_DEPTH`].
///
/// # Example
///
/// ```
/// use keystash::value::{normalize, Value};
///
/// assert_eq!(normalize(&Value::from(123)).unwrap(), "123");
/// assert_eq!(normalize(&Value::Null).unwrap(), "");
/// assert_eq!(
///     normalize(&Value::array([Value::from(1), Value::from("a")])).unwrap(),
///     r#"[1,"a"]"#
/// );
/// ```
pub fn normalize(value: &Value) -> Result<String> {
    if value.kind().is_null_like() {
        return Ok(String::new());
    }
    match value {
        Value::Bool(b) => Ok(b.to_string()),
        // NaN was caught by the null-like group above
        Value::Number(n) => Ok(coerce_number(*n)),
        Value::Str(s) => Ok(s.clone()),
        Value::Array(_) | Value::Object(_) | Value::Opaque(_) => {
            check_depth(value, MAX_VALUE_DEPTH)?;
            Ok(serde_json::to_string(value)?)
        }
        Value::Null | Value::Undefined => Ok(String::new()),
    }
}

/// Direct string coercion for numbers.
///
/// Integral finite values render without a fractional part (`123`, not
/// `123.0`); the infinities keep the host spelling. `NaN` never reaches this
/// function because it classifies as null-like.
fn coerce_number(n: f64) -> String {
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    // Exactly representable integers print as integers
    if n == n.trunc() && n.abs() < 9.007_199_254_740_992e15 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

fn check_depth(value: &Value, remaining: usize) -> Result<()> {
    if remaining == 0 {
        return Err(StoreError::Serialization(serde_json::Error::custom(
            format!("value nesting exceeds {} levels", MAX_VALUE_DEPTH),
        )));
    }
    match value {
        Value::Array(items) => {
            for item in items {
                check_depth(item, remaining - 1)?;
            }
        }
        Value::Object(pairs) => {
            for (_, v) in pairs {
                check_depth(v, remaining - 1)?;
            }
        }
        _ => {}
    }
    Ok(())
}

impl Serialize for Value {
    /// JSON encoding with host-coercion parity: null-likes and non-finite
    /// numbers nest as JSON `null`; opaque values abort the whole encode.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null | Value::Undefined => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => {
                if !n.is_finite() {
                    serializer.serialize_unit()
                } else if *n == n.trunc() && n.abs() < 9.007_199_254_740_992e15 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Value::Str(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (k, v) in pairs {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::Opaque(type_name) => Err(S::Error::custom(format!(
                "opaque value of type `{}` is not representable",
                type_name
            ))),
        }
    }
}
