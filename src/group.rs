//! Provides the `Groups` structure: an insertion-ordered mapping from key to a
//! per-key bookkeeping value (usually a bag of values), with keys compared by
//! an [`Equality`] strategy.
//!
//! * Keys iterate in the order they were first inserted, and a key's bag keeps
//!   the order its values arrived in. Cogroup, the set operations and `index`'s
//!   "last value wins" all rely on this.
//! * Lookup hashes the key with the strategy's `hash` and then scans the few
//!   entries sharing that hash with the strategy's `equal`, so a strategy whose
//!   equality is not reflexive (SQL nulls) still groups correctly: such a key
//!   just never finds an existing group.
use fxhash::FxHashMap;

use crate::equality::Equality;
use crate::value::Value;

/// Keys in first-seen order, each with its `Bag`.
#[derive(Debug, Clone)]
pub struct Groups<E, Bag> {
    eq: E,
    entries: Vec<(Value, Bag)>,
    buckets: FxHashMap<u64, Vec<usize>>,
}

impl<E: Equality, Bag> Groups<E, Bag> {
    /// An empty `Groups` comparing keys with `eq`
    pub fn new(eq: E) -> Self {
        Groups { eq, entries: Vec::new(), buckets: FxHashMap::default() }
    }

    /// Position of `key` in insertion order, if present
    fn position(&self, hash: u64, key: &Value) -> Option<usize> {
        self.buckets
            .get(&hash)?
            .iter()
            .copied()
            .find(|&i| self.eq.equal(&self.entries[i].0, key))
    }

    fn push(&mut self, hash: u64, key: Value, bag: Bag) -> usize {
        let i = self.entries.len();
        self.entries.push((key, bag));
        self.buckets.entry(hash).or_default().push(i);
        i
    }

    /// The bag for `key`, created with `init` if `key` is new. A new key goes
    /// to the end of the insertion order; an existing key keeps its place.
    pub fn entry(&mut self, key: Value, init: impl FnOnce() -> Bag) -> &mut Bag {
        let hash = self.eq.hash(&key);
        let i = match self.position(hash, &key) {
            Some(i) => i,
            None => self.push(hash, key, init()),
        };
        &mut self.entries[i].1
    }

    /// Sets the bag for `key`, returning the previous one. Replacing keeps the
    /// key's original position.
    pub fn insert(&mut self, key: Value, bag: Bag) -> Option<Bag> {
        let hash = self.eq.hash(&key);
        match self.position(hash, &key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, bag)),
            None => {
                self.push(hash, key, bag);
                None
            }
        }
    }

    /// Does `key` have a group?
    pub fn contains_key(&self, key: &Value) -> bool {
        self.position(self.eq.hash(key), key).is_some()
    }

    /// The bag for `key`
    pub fn get(&self, key: &Value) -> Option<&Bag> {
        self.position(self.eq.hash(key), key).map(|i| &self.entries[i].1)
    }
}

impl<E, Bag> Groups<E, Bag> {
    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no key has been inserted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(key, bag)` pairs in first-seen key order
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Bag)> {
        self.entries.iter().map(|(k, b)| (k, b))
    }

    /// Keys in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl<E, Bag> IntoIterator for Groups<E, Bag> {
    type Item = (Value, Bag);
    type IntoIter = std::vec::IntoIter<(Value, Bag)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
