//! Relational and set operations over sequences of JSON-like values.
//!
//! Everything is built from one primitive, [`cogroup`], which groups two keyed
//! sequences by key under an [`Equality`] strategy. The joins are filters over
//! the full join, and the set operations are joins over values keyed by
//! themselves. Results keep a stable order: groups appear in the order their
//! keys were first seen, left input before right.
//!
//! The `args`, `operands` and `calculate` modules make up the `relzet` command
//! line tool; the rest is the library proper.

#![deny(unused_must_use)]
#![deny(clippy::all)]
#![allow(clippy::needless_return)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![deny(missing_docs)]

pub mod args;
pub mod calculate;
pub mod cogroup;
pub mod equality;
pub mod error;
pub mod group;
pub mod index;
pub mod join;
pub mod keyed;
pub mod membership;
pub mod operands;
pub mod record;
pub mod set;
pub mod value;

pub use crate::cogroup::{cogroup, cross_join, Group, Side};
pub use crate::equality::{Equality, NullSafe, SqlNulls};
pub use crate::error::{Error, Result};
pub use crate::group::Groups;
pub use crate::index::{index, index_all, Index};
pub use crate::join::{
    antijoin, disjoin, full_join, inner_join, left_join, right_join, semijoin, JoinRow,
};
pub use crate::keyed::{by, by_identity, KeyedEntry, Path};
pub use crate::membership::{has_value, in_values};
pub use crate::record::{ltrim, rename_keys, rtrim, trim};
pub use crate::set::{dedup, except, except_all, intersect, intersect_all, union, union_all};
pub use crate::value::{Number, Record, Value};
