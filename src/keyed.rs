//! Keyed entries, the `by` builder, and key paths.
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::value::{Record, Value};

/// A value tagged with the key derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedEntry {
    /// The derived key
    pub key: Value,
    /// The original value
    pub value: Value,
}

impl KeyedEntry {
    /// An entry keyed by its own value
    #[must_use]
    pub fn identity(value: Value) -> Self {
        KeyedEntry { key: value.clone(), value }
    }
}

impl From<KeyedEntry> for Value {
    fn from(entry: KeyedEntry) -> Self {
        let mut fields = Record::with_capacity(2);
        fields.insert("key".to_owned(), entry.key);
        fields.insert("value".to_owned(), entry.value);
        Value::Map(fields)
    }
}

/// Keys every value with `key_of`, keeping input order. The first failing
/// call aborts the whole operation.
pub fn by<F>(values: impl IntoIterator<Item = Value>, mut key_of: F) -> Result<Vec<KeyedEntry>>
where
    F: FnMut(&Value) -> Result<Value>,
{
    values
        .into_iter()
        .map(|value| Ok(KeyedEntry { key: key_of(&value)?, value }))
        .collect()
}

/// Keys every value by itself.
pub fn by_identity(values: impl IntoIterator<Item = Value>) -> Vec<KeyedEntry> {
    values.into_iter().map(KeyedEntry::identity).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Field(String),
    Index(usize),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Field(name) => write!(f, ".{name}"),
            Step::Index(i) => write!(f, ".{i}"),
        }
    }
}

/// A key path such as `.customer.id` or `.items.0`, usable as a key function.
///
/// * A field missing from a record gives null, as does an index past the end
///   of a sequence: absent and null are the same thing.
/// * Any step applied to null gives null.
/// * A step applied to any other scalar is an error, as is a field name
///   applied to a sequence.
/// * The empty path (`""` or `"."`) is the identity.
/// * A segment of digits with no leading zero is an index, which also names
///   a record field spelled the same way. `.01` is always a field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    steps: Vec<Step>,
}

impl Path {
    /// The identity path
    #[must_use]
    pub fn identity() -> Self {
        Path::default()
    }

    /// Follows the path from `value`.
    pub fn get(&self, value: &Value) -> Result<Value> {
        let mut here = value;
        for step in &self.steps {
            let next = match (here, step) {
                (Value::Null, _) => None,
                (Value::Map(fields), Step::Field(name)) => fields.get(name),
                (Value::Map(fields), Step::Index(i)) => fields.get(&i.to_string()),
                (Value::Seq(items), Step::Index(i)) => items.get(*i),
                (other, step) => {
                    return Err(Error::NotIndexable { step: step.to_string(), found: other.kind() })
                }
            };
            match next {
                Some(v) => here = v,
                None => return Ok(Value::Null),
            }
        }
        Ok(here.clone())
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let body = trimmed.strip_prefix('.').unwrap_or(trimmed);
        if body.is_empty() {
            return Ok(Path::identity());
        }
        let steps = body
            .split('.')
            .map(|segment| {
                if segment.is_empty() || segment.contains(char::is_whitespace) {
                    Err(Error::InvalidPath(text.to_owned()))
                } else if segment.bytes().all(|b| b.is_ascii_digit())
                    && (segment == "0" || !segment.starts_with('0'))
                {
                    segment.parse().map(Step::Index).map_err(|_| Error::InvalidPath(text.to_owned()))
                } else {
                    Ok(Step::Field(segment.to_owned()))
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Path { steps })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str(".");
        }
        for step in &self.steps {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn val(j: serde_json::Value) -> Value {
        Value::from(j)
    }

    #[test]
    fn by_keeps_input_order() {
        let entries = by(vec![val(json!(3)), val(json!(4)), val(json!(5))], |v| {
            Ok(Value::from(v.as_seq().is_none()))
        })
        .unwrap();
        let values: Vec<_> = entries.iter().map(|e| e.value.clone()).collect();
        assert_eq!(values, vec![val(json!(3)), val(json!(4)), val(json!(5))]);
        assert!(entries.iter().all(|e| e.key == Value::from(true)));
    }

    #[test]
    fn by_stops_at_the_first_failure() {
        let mut calls = 0;
        let result = by(vec![val(json!(1)), val(json!("x")), val(json!(2))], |v| {
            calls += 1;
            match v {
                Value::Number(_) => Ok(v.clone()),
                other => Err(Error::KeyFunction(format!("not a number: {other}"))),
            }
        });
        assert_eq!(result, Err(Error::KeyFunction(r#"not a number: "x""#.to_owned())));
        assert_eq!(calls, 2);
    }

    #[test]
    fn paths_follow_fields_and_indexes() {
        let doc = val(json!({"a": {"b": [10, {"c": "deep"}]}, "0": "zero"}));
        let get = |p: &str| p.parse::<Path>().unwrap().get(&doc);
        assert_eq!(get(".a.b.0"), Ok(val(json!(10))));
        assert_eq!(get("a.b.1.c"), Ok(val(json!("deep"))));
        assert_eq!(get(".0"), Ok(val(json!("zero"))));
        assert_eq!(get("."), Ok(doc.clone()));
        assert_eq!(get(""), Ok(doc.clone()));
    }

    #[test]
    fn leading_zeros_name_a_field() {
        let doc = val(json!({"01": "zero-one", "1": "one"}));
        let path: Path = ".01".parse().unwrap();
        assert_eq!(path.get(&doc), Ok(val(json!("zero-one"))));
        assert_eq!(path.to_string(), ".01");
        assert_eq!(".1".parse::<Path>().unwrap().get(&doc), Ok(val(json!("one"))));
        assert_eq!(
            path.get(&val(json!(["a", "b"]))),
            Err(Error::NotIndexable { step: ".01".to_owned(), found: "sequence" })
        );
    }

    #[test]
    fn absent_is_null() {
        let doc = val(json!({"a": null, "s": [1]}));
        let get = |p: &str| p.parse::<Path>().unwrap().get(&doc);
        assert_eq!(get(".missing"), Ok(Value::Null));
        assert_eq!(get(".a.b.c"), Ok(Value::Null));
        assert_eq!(get(".s.5"), Ok(Value::Null));
    }

    #[test]
    fn paths_into_scalars_fail() {
        let doc = val(json!({"n": 1, "s": [1]}));
        let get = |p: &str| p.parse::<Path>().unwrap().get(&doc);
        assert_eq!(
            get(".n.x"),
            Err(Error::NotIndexable { step: ".x".to_owned(), found: "number" })
        );
        assert_eq!(
            get(".s.x"),
            Err(Error::NotIndexable { step: ".x".to_owned(), found: "sequence" })
        );
    }

    #[test]
    fn malformed_paths_are_rejected() {
        for bad in ["a..b", ".a.", "a. b"] {
            assert_eq!(bad.parse::<Path>(), Err(Error::InvalidPath(bad.to_owned())), "for {bad}");
        }
        assert_eq!(".a.0".parse::<Path>().unwrap().to_string(), ".a.0");
    }
}
