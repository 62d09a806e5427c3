//! Membership tests.
use crate::equality::Equality;
use crate::value::Value;

/// Is `value` equal to some element of `values`?
pub fn in_values<E: Equality>(eq: &E, value: &Value, values: &[Value]) -> bool {
    values.iter().any(|candidate| eq.equal(candidate, value))
}

/// Does `values` contain an element equal to `value`?
pub fn has_value<E: Equality>(eq: &E, values: &[Value], value: &Value) -> bool {
    in_values(eq, value, values)
}
