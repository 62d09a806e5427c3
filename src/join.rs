//! The join family. Everything here reshapes or filters the output of
//! [`full_join`], which is [`cogroup`] plus [`cross_join`]:
//!
//! * `full_join` keeps every row,
//! * `left_join` keeps rows with a non-null left value,
//! * `right_join` keeps rows with a non-null right value,
//! * `inner_join` keeps rows where both sides are non-null,
//! * `disjoin` keeps rows where exactly one side is *present*,
//! * `semijoin` and `antijoin` keep just the left values of `left_join` rows
//!   with, respectively without, a non-null right value.
//!
//! Note that `disjoin` looks only at whether a side is present, not whether it
//! is null, while `inner_join` treats a null side as missing. So a matched row
//! whose left value is itself null is in neither `inner_join` nor `disjoin`.
use crate::cogroup::{cogroup, cross_join, Group};
use crate::equality::Equality;
use crate::keyed::KeyedEntry;
use crate::value::{Record, Value};

/// One output row of a join. At least one of `left` and `right` is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRow {
    /// The key both sides share
    pub key: Value,
    /// The left value, absent if the key occurs only on the right
    pub left: Option<Value>,
    /// The right value, absent if the key occurs only on the left
    pub right: Option<Value>,
}

impl JoinRow {
    /// Exchanges the left and right sides.
    #[must_use]
    pub fn swap(self) -> Self {
        JoinRow { key: self.key, left: self.right, right: self.left }
    }

    fn has_left(&self) -> bool {
        matches!(&self.left, Some(v) if !v.is_null())
    }

    fn has_right(&self) -> bool {
        matches!(&self.right, Some(v) if !v.is_null())
    }
}

impl From<JoinRow> for Value {
    /// A record `{key, left?, right?}`; an absent side has no field at all.
    fn from(row: JoinRow) -> Self {
        let mut fields = Record::with_capacity(3);
        fields.insert("key".to_owned(), row.key);
        if let Some(left) = row.left {
            fields.insert("left".to_owned(), left);
        }
        if let Some(right) = row.right {
            fields.insert("right".to_owned(), right);
        }
        Value::Map(fields)
    }
}

/// Expands one group into rows: a lone side gives one row per value, and a
/// matched group gives the cross join of its bags, each row carrying the key.
fn rows_of(group: Group, rows: &mut Vec<JoinRow>) {
    let Group { key, left, right } = group;
    if left.is_empty() {
        rows.extend(right.into_iter().map(|r| JoinRow { key: key.clone(), left: None, right: Some(r) }));
    } else if right.is_empty() {
        rows.extend(left.into_iter().map(|l| JoinRow { key: key.clone(), left: Some(l), right: None }));
    } else {
        rows.extend(cross_join(&left, &right).into_iter().map(|(l, r)| JoinRow {
            key: key.clone(),
            left: Some(l),
            right: Some(r),
        }));
    }
}

/// Full outer join: every left and right entry appears, matched pairs
/// expanded many-to-many. Rows come group by group, in cogroup order.
pub fn full_join<E: Equality>(
    eq: &E,
    left: impl IntoIterator<Item = KeyedEntry>,
    right: impl IntoIterator<Item = KeyedEntry>,
) -> Vec<JoinRow> {
    let mut rows = Vec::new();
    for group in cogroup(eq, left, right) {
        rows_of(group, &mut rows);
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(rows = rows.len(), "full join");

    rows
}

/// Full join rows whose left value is present and non-null.
pub fn left_join<E: Equality>(
    eq: &E,
    left: impl IntoIterator<Item = KeyedEntry>,
    right: impl IntoIterator<Item = KeyedEntry>,
) -> Vec<JoinRow> {
    full_join(eq, left, right).into_iter().filter(JoinRow::has_left).collect()
}

/// Full join rows whose right value is present and non-null: the left join of
/// the swapped inputs, with each row swapped back.
pub fn right_join<E: Equality>(
    eq: &E,
    left: impl IntoIterator<Item = KeyedEntry>,
    right: impl IntoIterator<Item = KeyedEntry>,
) -> Vec<JoinRow> {
    left_join(eq, right, left).into_iter().map(JoinRow::swap).collect()
}

/// Full join rows where both sides are present and non-null.
pub fn inner_join<E: Equality>(
    eq: &E,
    left: impl IntoIterator<Item = KeyedEntry>,
    right: impl IntoIterator<Item = KeyedEntry>,
) -> Vec<JoinRow> {
    full_join(eq, left, right)
        .into_iter()
        .filter(|row| row.has_left() && row.has_right())
        .collect()
}

/// Full join rows where exactly one side is present. Presence only: a side
/// holding null still counts as present.
pub fn disjoin<E: Equality>(
    eq: &E,
    left: impl IntoIterator<Item = KeyedEntry>,
    right: impl IntoIterator<Item = KeyedEntry>,
) -> Vec<JoinRow> {
    full_join(eq, left, right)
        .into_iter()
        .filter(|row| row.left.is_some() != row.right.is_some())
        .collect()
}

/// Left values of the left join rows that found a non-null right value. A
/// left value matching several right entries appears once per match.
pub fn semijoin<E: Equality>(
    eq: &E,
    left: impl IntoIterator<Item = KeyedEntry>,
    right: impl IntoIterator<Item = KeyedEntry>,
) -> Vec<Value> {
    left_join(eq, left, right)
        .into_iter()
        .filter(JoinRow::has_right)
        .filter_map(|row| row.left)
        .collect()
}

/// Left values of the left join rows with no non-null right value.
pub fn antijoin<E: Equality>(
    eq: &E,
    left: impl IntoIterator<Item = KeyedEntry>,
    right: impl IntoIterator<Item = KeyedEntry>,
) -> Vec<Value> {
    left_join(eq, left, right)
        .into_iter()
        .filter(|row| !row.has_right())
        .filter_map(|row| row.left)
        .collect()
}
