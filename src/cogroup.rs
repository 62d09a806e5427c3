//! Houses `cogroup`, the two-way grouped union every join is built on, and
//! `cross_join`, which expands a matched group into rows.
use crate::equality::Equality;
use crate::group::Groups;
use crate::keyed::KeyedEntry;
use crate::value::{Record, Value};

/// Which input an entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The first input
    Left,
    /// The second input
    Right,
}

/// All the values from both inputs that share one key. At least one of the
/// bags is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// The shared key (as first seen)
    pub key: Value,
    /// Values from the left input, in input order
    pub left: Vec<Value>,
    /// Values from the right input, in input order
    pub right: Vec<Value>,
}

impl Group {
    /// Does this key occur in both inputs?
    #[must_use]
    pub fn is_matched(&self) -> bool {
        !self.left.is_empty() && !self.right.is_empty()
    }
}

impl From<Group> for Value {
    fn from(group: Group) -> Self {
        let mut fields = Record::with_capacity(3);
        fields.insert("key".to_owned(), group.key);
        fields.insert("left".to_owned(), Value::Seq(group.left));
        fields.insert("right".to_owned(), Value::Seq(group.right));
        Value::Map(fields)
    }
}

/// The bookkeeping kept per key while grouping: one bag per side.
#[derive(Default)]
struct Bags {
    left: Vec<Value>,
    right: Vec<Value>,
}

impl Bags {
    fn side(&mut self, side: Side) -> &mut Vec<Value> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Groups `left` and `right` by equal key.
///
/// Every entry is tagged with its side and the two tagged sequences are
/// concatenated, left first, then partitioned by key under `eq`. The result has
/// one `Group` per distinct key, in the order keys are first seen in that
/// concatenation; each bag keeps its entries' original relative order. Each
/// input entry lands in exactly one group, on its own side.
pub fn cogroup<E: Equality>(
    eq: &E,
    left: impl IntoIterator<Item = KeyedEntry>,
    right: impl IntoIterator<Item = KeyedEntry>,
) -> Vec<Group> {
    let tagged = left
        .into_iter()
        .map(|entry| (Side::Left, entry))
        .chain(right.into_iter().map(|entry| (Side::Right, entry)));

    let mut groups = Groups::new(eq);
    for (side, KeyedEntry { key, value }) in tagged {
        groups.entry(key, Bags::default).side(side).push(value);
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(groups = groups.len(), "cogroup");

    groups
        .into_iter()
        .map(|(key, Bags { left, right })| Group { key, left, right })
        .collect()
}

/// Every pairing of an element of `left` with an element of `right`, in
/// row-major order: `left.len() * right.len()` pairs.
pub fn cross_join<L: Clone, R: Clone>(left: &[L], right: &[R]) -> Vec<(L, R)> {
    let mut rows = Vec::with_capacity(left.len() * right.len());
    for l in left {
        for r in right {
            rows.push((l.clone(), r.clone()));
        }
    }
    rows
}
