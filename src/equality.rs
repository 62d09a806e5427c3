//! Key equality as an explicit strategy.
//!
//! Every operator that compares values takes an `&impl Equality`. The crate's
//! semantics are those of [`NullSafe`]: deep structural equality where two nulls
//! are equal, deliberately unlike SQL. [`SqlNulls`] is the SQL reading, where a
//! null key matches nothing, not even another null.

use crate::value::Value;

/// Decides whether two keys are the same key.
///
/// Implementations must keep `hash` consistent with `equal`: values that are
/// `equal` must have the same hash. `equal` need not be reflexive; a value that
/// is not equal to itself simply never shares a group with anything.
pub trait Equality {
    /// Are `a` and `b` the same key?
    fn equal(&self, a: &Value, b: &Value) -> bool;

    /// A hash consistent with `equal`
    fn hash(&self, value: &Value) -> u64 {
        fxhash::hash64(value)
    }
}

/// Deep structural equality with `null == null`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NullSafe;

impl Equality for NullSafe {
    fn equal(&self, a: &Value, b: &Value) -> bool {
        a == b
    }
}

/// Deep structural equality, except that a null key equals nothing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SqlNulls;

impl Equality for SqlNulls {
    fn equal(&self, a: &Value, b: &Value) -> bool {
        !a.is_null() && !b.is_null() && a == b
    }
}

impl<E: Equality + ?Sized> Equality for &E {
    fn equal(&self, a: &Value, b: &Value) -> bool {
        (**self).equal(a, b)
    }
    fn hash(&self, value: &Value) -> u64 {
        (**self).hash(value)
    }
}
