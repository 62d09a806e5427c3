//! Set algebra over bags of values. The `_all` forms keep duplicates; the
//! plain forms de-duplicate the `_all` result with [`dedup`], which keeps the
//! first occurrence of each value in place.
//!
//! * `union_all(a, b)` is `a` followed by `b`,
//! * `intersect_all(a, b)` is the elements of `a` that occur in `b`,
//! * `except_all(a, b)` is the elements of `a` that don't occur in `b`.
use crate::cogroup::cogroup;
use crate::equality::Equality;
use crate::group::Groups;
use crate::join::antijoin;
use crate::keyed::by_identity;
use crate::value::Value;

/// Removes repeated values, keeping each value's first occurrence in order.
pub fn dedup<E: Equality>(eq: &E, values: impl IntoIterator<Item = Value>) -> Vec<Value> {
    let mut seen = Groups::new(eq);
    for value in values {
        seen.entry(value, || ());
    }
    seen.into_iter().map(|(value, ())| value).collect()
}

/// `a` followed by `b`, duplicates and order kept.
pub fn union_all(
    a: impl IntoIterator<Item = Value>,
    b: impl IntoIterator<Item = Value>,
) -> Vec<Value> {
    a.into_iter().chain(b).collect()
}

/// The distinct values of `a` and `b`, in first-seen order.
pub fn union<E: Equality>(
    eq: &E,
    a: impl IntoIterator<Item = Value>,
    b: impl IntoIterator<Item = Value>,
) -> Vec<Value> {
    dedup(eq, a.into_iter().chain(b))
}

/// Keys both inputs by identity and cogroups them; every group with both
/// sides non-empty contributes its left bag. So a value occurring three times
/// in `a` and once in `b` appears three times, not `min(3, 1)` times.
pub fn intersect_all<E: Equality>(
    eq: &E,
    a: impl IntoIterator<Item = Value>,
    b: impl IntoIterator<Item = Value>,
) -> Vec<Value> {
    cogroup(eq, by_identity(a), by_identity(b))
        .into_iter()
        .filter(|group| group.is_matched())
        .flat_map(|group| group.left)
        .collect()
}

/// The distinct values of `intersect_all(a, b)`.
pub fn intersect<E: Equality>(
    eq: &E,
    a: impl IntoIterator<Item = Value>,
    b: impl IntoIterator<Item = Value>,
) -> Vec<Value> {
    dedup(eq, intersect_all(eq, a, b))
}

/// The anti join of `a` against `b`, both keyed by identity: elements of `a`
/// with no equal element in `b`. Being an anti join, null elements of `a` are
/// dropped.
pub fn except_all<E: Equality>(
    eq: &E,
    a: impl IntoIterator<Item = Value>,
    b: impl IntoIterator<Item = Value>,
) -> Vec<Value> {
    antijoin(eq, by_identity(a), by_identity(b))
}

/// The distinct values of `except_all(a, b)`.
pub fn except<E: Equality>(
    eq: &E,
    a: impl IntoIterator<Item = Value>,
    b: impl IntoIterator<Item = Value>,
) -> Vec<Value> {
    dedup(eq, except_all(eq, a, b))
}
