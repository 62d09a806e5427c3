//! String trimming and field renaming for individual values.
use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::value::{Record, Value};

fn trimmed(op: &'static str, value: &Value, trim: impl Fn(&str) -> &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::from(trim(s))),
        other => Err(Error::NotAString { op, found: other.kind() }),
    }
}

/// Removes leading and trailing whitespace from a string value.
pub fn trim(value: &Value) -> Result<Value> {
    trimmed("trim", value, str::trim)
}

/// Removes leading whitespace from a string value.
pub fn ltrim(value: &Value) -> Result<Value> {
    trimmed("ltrim", value, str::trim_start)
}

/// Removes trailing whitespace from a string value.
pub fn rtrim(value: &Value) -> Result<Value> {
    trimmed("rtrim", value, str::trim_end)
}

/// Returns `record` with each field named in `renames` renamed, keeping its
/// position. Fields not named in `renames` are kept as they are. If a new name
/// collides with another field, the field later in `record` wins, at the
/// earlier position.
pub fn rename_keys(record: &Value, renames: &IndexMap<String, String>) -> Result<Value> {
    let Value::Map(fields) = record else {
        return Err(Error::NotARecord { op: "rename keys of", found: record.kind() });
    };
    let mut renamed = Record::with_capacity(fields.len());
    for (name, value) in fields {
        let name = renames.get(name).unwrap_or(name);
        renamed.insert(name.clone(), value.clone());
    }
    Ok(Value::Map(renamed))
}
