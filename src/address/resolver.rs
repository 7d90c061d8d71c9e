//! Key Addressing Resolver
//!
//! Turns one logical key argument into a list of concrete (key, value)
//! operations, or rejects the argument's shape outright.
//!
//! ## Accepted shapes
//!
//! - **Scalar**: one key, paired with the caller's value as-is.
//! - **List**: a list of keys. Paired with an array value by index (missing
//!   positions resolve to the absent sentinel), or with any other value by
//!   broadcast.
//! - **Map**: the map's own keys are the storage keys and its own values are
//!   the stored values (the destructuring-assignment form). The caller's
//!   separate value argument is ignored.
//!
//! Anything else is an [`InvalidKeyType`](crate::StoreError::InvalidKeyType)
//! error. Classification happens before any write, so a rejected call is a
//! complete no-op.

use crate::error::{Result, StoreError};
use crate::value::Value;

/// The logical shape of a key argument to a batch operation.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyAddress {
    /// A single key.
    Scalar(String),

    /// An ordered list of keys.
    List(Vec<String>),

    /// A mapping whose own keys are the storage keys. The value payload is
    /// what gets stored (for writes) or a nested key reference (for reads).
    Map(Vec<(String, Value)>),
}

impl KeyAddress {
    /// Classifies a dynamic key argument into its address shape.
    ///
    /// A list containing a non-string element rejects the whole argument;
    /// partial coercion never happens.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidKeyType`] when the argument is neither a string,
    /// a list of strings, nor a map.
    pub fn classify(key: &Value) -> Result<KeyAddress> {
        match key {
            Value::Str(s) => Ok(KeyAddress::Scalar(s.clone())),
            Value::Array(items) => {
                let mut keys = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Str(s) => keys.push(s.clone()),
                        other => {
                            return Err(StoreError::InvalidKeyType {
                                found: other.kind(),
                            })
                        }
                    }
                }
                Ok(KeyAddress::List(keys))
            }
            Value::Object(pairs) => Ok(KeyAddress::Map(pairs.clone())),
            other => Err(StoreError::InvalidKeyType {
                found: other.kind(),
            }),
        }
    }

    /// Expands this address and a caller-supplied value into concrete
    /// (key, value) pairs, in address order.
    ///
    /// Fan-out rules:
    /// - Scalar key: one pair, the value as-is.
    /// - List key + array value: pairwise by index. A value list shorter
    ///   than the key list fills the tail with `Value::Undefined`, which
    ///   normalizes to the empty string.
    /// - List key + any other value: the value is broadcast to every key.
    /// - Map key: the map's own entries; `value` is ignored.
    pub fn resolve_with(&self, value: &Value) -> Vec<(String, Value)> {
        match self {
            KeyAddress::Scalar(key) => vec![(key.clone(), value.clone())],
            KeyAddress::List(keys) => match value {
                Value::Array(vals) => keys
                    .iter()
                    .enumerate()
                    .map(|(i, key)| {
                        let val = vals.get(i).cloned().unwrap_or(Value::Undefined);
                        (key.clone(), val)
                    })
                    .collect(),
                broadcast => keys
                    .iter()
                    .map(|key| (key.clone(), broadcast.clone()))
                    .collect(),
            },
            KeyAddress::Map(pairs) => pairs.clone(),
        }
    }

    /// Flattens this address to a plain key list (for removal, where any
    /// value payload is irrelevant).
    pub fn keys(&self) -> Vec<String> {
        match self {
            KeyAddress::Scalar(key) => vec![key.clone()],
            KeyAddress::List(keys) => keys.clone(),
            KeyAddress::Map(pairs) => pairs.iter().map(|(k, _)| k.clone()).collect(),
        }
    }
}

/// Destructures a container value into new top-level (key, value) pairs.
///
/// Used by the deep write path: an object contributes its own entries, an
/// array contributes (decimal index, element) pairs. Scalars destructure to
/// nothing.
pub fn destructure(container: &Value) -> Vec<(String, Value)> {
    match container {
        Value::Object(pairs) => pairs.clone(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| (i.to_string(), item.clone()))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;

    fn key_list(keys: &[&str]) -> Value {
        Value::array(keys.iter().map(|k| Value::from(*k)))
    }

    #[test]
    fn test_classify_scalar() {
        let addr = KeyAddress::classify(&Value::from("k1")).unwrap();
        assert_eq!(addr, KeyAddress::Scalar("k1".to_string()));
    }

    #[test]
    fn test_classify_list() {
        let addr = KeyAddress::classify(&key_list(&["a", "b"])).unwrap();
        assert_eq!(
            addr,
            KeyAddress::List(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_classify_map() {
        let key = Value::object([("a", Value::from(1)), ("b", Value::from(2))]);
        let addr = KeyAddress::classify(&key).unwrap();
        assert_eq!(addr.keys(), vec!["a", "b"]);
    }

    #[test]
    fn test_classify_rejects_scalar_non_string() {
        let err = KeyAddress::classify(&Value::from(42)).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidKeyType {
                found: ValueKind::Number
            }
        ));
    }

    #[test]
    fn test_classify_rejects_list_with_non_string_element() {
        let key = Value::array([Value::from("ok"), Value::from(1)]);
        assert!(KeyAddress::classify(&key).is_err());
    }

    #[test]
    fn test_resolve_pairwise() {
        let addr = KeyAddress::classify(&key_list(&["k1", "k2"])).unwrap();
        let vals = Value::array([Value::from("v1"), Value::from("v2")]);
        let pairs = addr.resolve_with(&vals);
        assert_eq!(
            pairs,
            vec![
                ("k1".to_string(), Value::from("v1")),
                ("k2".to_string(), Value::from("v2")),
            ]
        );
    }

    #[test]
    fn test_resolve_short_value_list_fills_with_absent() {
        let addr = KeyAddress::classify(&key_list(&["k1", "k2", "k3"])).unwrap();
        let vals = Value::array([Value::from("v1")]);
        let pairs = addr.resolve_with(&vals);
        assert_eq!(pairs[0].1, Value::from("v1"));
        assert_eq!(pairs[1].1, Value::Undefined);
        assert_eq!(pairs[2].1, Value::Undefined);
    }

    #[test]
    fn test_resolve_broadcast() {
        let addr = KeyAddress::classify(&key_list(&["k1", "k2"])).unwrap();
        let pairs = addr.resolve_with(&Value::from("same"));
        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().all(|(_, v)| *v == Value::from("same")));
    }

    #[test]
    fn test_resolve_map_ignores_value_argument() {
        let key = Value::object([("a", Value::from(1))]);
        let addr = KeyAddress::classify(&key).unwrap();
        let pairs = addr.resolve_with(&Value::from("ignored"));
        assert_eq!(pairs, vec![("a".to_string(), Value::from(1))]);
    }

    #[test]
    fn test_destructure_object_and_array() {
        let obj = Value::object([("x", Value::from(1)), ("y", Value::from(2))]);
        let pairs = destructure(&obj);
        assert_eq!(pairs[0].0, "x");
        assert_eq!(pairs[1].0, "y");

        let arr = Value::array([Value::from("p"), Value::from("q")]);
        let pairs = destructure(&arr);
        assert_eq!(
            pairs,
            vec![
                ("0".to_string(), Value::from("p")),
                ("1".to_string(), Value::from("q")),
            ]
        );

        assert!(destructure(&Value::from("scalar")).is_empty());
    }
}
