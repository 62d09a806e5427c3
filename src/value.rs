//! The `Value` type: a closed, JSON-like variant over which every operator in
//! this crate works.
//!
//! Equality is deep and structural, and `Null == Null`. Numbers are canonical
//! 64-bit floats so that equality is a true equivalence relation (every NaN is
//! equal to every other NaN, and `-0.0 == 0.0`), which lets values serve as
//! grouping keys.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// The fields of a `Value::Map`, in insertion order.
pub type Record = IndexMap<String, Value>;

/// A structured datum: scalar, sequence, or record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    /// The null (or absent) value
    #[default]
    Null,
    /// `true` or `false`
    Bool(bool),
    /// A canonical 64-bit float
    Number(Number),
    /// A UTF-8 string
    String(String),
    /// An ordered sequence of values
    Seq(Vec<Value>),
    /// A record with string keys, in insertion order
    Map(Record),
}

impl Value {
    /// Is this the null value?
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The name of this value's variant, for error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "record",
        }
    }

    /// Returns the string contents if this is a `Value::String`
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this is a `Value::Seq`
    #[must_use]
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the fields if this is a `Value::Map`
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Map(fields) => Some(fields),
            _ => None,
        }
    }

    /// Field lookup. Anything but a record, and any missing field, gives `None`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.as_record().and_then(|fields| fields.get(field))
    }

    /// Renders this value as a mapping key: strings verbatim, everything else
    /// as JSON text.
    #[must_use]
    pub fn to_key_string(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

// Record equality ignores field order, so the hash must too: fields are hashed
// in key order.
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Number(n) => n.hash(state),
            Value::String(s) => s.hash(state),
            Value::Seq(items) => items.hash(state),
            Value::Map(fields) => {
                fields.len().hash(state);
                let mut sorted: Vec<(&String, &Value)> = fields.iter().collect();
                sorted.sort_unstable_by(|a, b| a.0.cmp(b.0));
                for (k, v) in sorted {
                    k.hash(state);
                    v.hash(state);
                }
            }
        }
    }
}

/// A 64-bit float with canonical NaN and zero, so that `Eq` and `Hash` are
/// well defined.
///
/// Integers beyond 2^53 lose precision, as in jq: distinct 64-bit integers
/// that round to the same float compare equal and print rounded.
#[derive(Clone, Copy)]
pub struct Number(f64);

impl Number {
    fn canonicalize(x: f64) -> f64 {
        if x.is_nan() {
            f64::NAN
        } else if x == 0.0 {
            0.0
        } else {
            x
        }
    }

    /// The raw float
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// `Some(i)` if the number is integral and fits in an `i64`
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn as_i64(self) -> Option<i64> {
        let x = self.0;
        if x.fract() == 0.0 && x >= i64::MIN as f64 && x < i64::MAX as f64 {
            Some(x as i64)
        } else {
            None
        }
    }
}

impl From<f64> for Number {
    fn from(x: f64) -> Self {
        Number(Self::canonicalize(x))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        (self.0.is_nan() && other.0.is_nan()) || self.0 == other.0
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.to_bits());
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_i64() {
            Some(i) => write!(f, "{i}"),
            None => write!(f, "{}", self.0),
        }
    }
}

impl fmt::Display for Value {
    /// JSON text, compact.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(text) => f.write_str(&text),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(Number::from(x))
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(i: i64) -> Self {
        Value::Number(Number::from(i as f64))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Number(Number::from(f64::from(i)))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}

impl From<Record> for Value {
    fn from(fields: Record) -> Self {
        Value::Map(fields)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::from(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::Seq(items.into_iter().map(Value::from).collect()),
            Json::Object(fields) => {
                Value::Map(fields.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        use serde_json::Value as Json;
        match value {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Json::from(i),
                None => serde_json::Number::from_f64(n.get()).map_or(Json::Null, Json::Number),
            },
            Value::String(s) => Json::String(s),
            Value::Seq(items) => Json::Array(items.into_iter().map(Json::from).collect()),
            Value::Map(fields) => {
                Json::Object(fields.into_iter().map(|(k, v)| (k, Json::from(v))).collect())
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(n.get()),
            },
            Value::String(s) => serializer.serialize_str(s),
            Value::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn hash_of(v: &Value) -> u64 {
        fxhash::hash64(v)
    }

    #[test]
    fn null_equals_null() {
        assert_eq!(Value::Null, Value::Null);
        assert_eq!(Value::from(json!([null, {"a": null}])), Value::from(json!([null, {"a": null}])));
    }

    #[test]
    fn nan_and_signed_zero_are_canonical() {
        assert_eq!(Value::from(f64::NAN), Value::from(-f64::NAN));
        assert_eq!(Value::from(-0.0), Value::from(0.0));
        assert_eq!(hash_of(&Value::from(-0.0)), hash_of(&Value::from(0.0)));
    }

    #[test]
    fn integers_and_floats_with_the_same_value_are_equal() {
        assert_eq!(Value::from(json!(1)), Value::from(json!(1.0)));
        assert_ne!(Value::from(json!(1)), Value::from(json!("1")));
    }

    #[test]
    fn integers_past_two_to_the_53_round() {
        let big = Value::from(json!(9_007_199_254_740_993_u64));
        assert_eq!(big, Value::from(json!(9_007_199_254_740_992_u64)));
        assert_eq!(big.to_string(), "9007199254740992");
    }

    #[test]
    fn record_equality_ignores_field_order() {
        let ab = Value::from(json!({"a": 1, "b": [2, 3]}));
        let ba = Value::from(json!({"b": [2, 3], "a": 1}));
        assert_eq!(ab, ba);
        assert_eq!(hash_of(&ab), hash_of(&ba));
        assert_ne!(ab, Value::from(json!({"a": 1, "b": [3, 2]})));
    }

    #[test]
    fn json_text_keeps_field_order_and_integers() {
        let v = Value::from(json!({"z": 1, "a": [2.5, null, true, "s"]}));
        assert_eq!(v.to_string(), r#"{"z":1,"a":[2.5,null,true,"s"]}"#);
        let back: Value = serde_json::from_str(&v.to_string()).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn key_strings() {
        assert_eq!(Value::from("abc").to_key_string(), "abc");
        assert_eq!(Value::from(7).to_key_string(), "7");
        assert_eq!(Value::Null.to_key_string(), "null");
    }
}
