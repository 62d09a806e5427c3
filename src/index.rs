//! Indexing: group a sequence by a derived key into an ordered mapping.
use crate::equality::Equality;
use crate::error::Result;
use crate::group::Groups;
use crate::value::{Record, Value};

/// An ordered mapping from key to `T`, keys in first-seen order.
pub type Index<E, T> = Groups<E, T>;

/// Maps each distinct key to the bag of values that produced it, in input
/// order.
pub fn index_all<E, F>(
    eq: E,
    values: impl IntoIterator<Item = Value>,
    mut key_of: F,
) -> Result<Index<E, Vec<Value>>>
where
    E: Equality,
    F: FnMut(&Value) -> Result<Value>,
{
    let mut index = Index::new(eq);
    for value in values {
        index.entry(key_of(&value)?, Vec::new).push(value);
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(keys = index.len(), "index_all");

    Ok(index)
}

/// Maps each distinct key to the last value (in input order) that produced
/// it. The key keeps the position where it was first seen.
pub fn index<E, F>(
    eq: E,
    values: impl IntoIterator<Item = Value>,
    mut key_of: F,
) -> Result<Index<E, Value>>
where
    E: Equality,
    F: FnMut(&Value) -> Result<Value>,
{
    let mut index = Index::new(eq);
    for value in values {
        index.insert(key_of(&value)?, value);
    }
    Ok(index)
}

impl<E, T: Into<Value>> From<Groups<E, T>> for Value {
    /// A record whose field names are the keys rendered with
    /// [`Value::to_key_string`]. Two keys that render alike (`"1"` and `1`)
    /// share one field, and the later one wins.
    fn from(index: Groups<E, T>) -> Self {
        let mut fields = Record::with_capacity(index.len());
        for (key, bag) in index {
            fields.insert(key.to_key_string(), bag.into());
        }
        Value::Map(fields)
    }
}
