//! Houses the `calculate` function, which applies one operation to the operand
//! files and writes the result as JSON.
use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use std::io::Write;
use std::path::PathBuf;

use crate::args::{Format, KeySpec, Nulls, OpName};
use crate::cogroup::{cogroup, cross_join};
use crate::equality::{Equality, NullSafe, SqlNulls};
use crate::index::{index, index_all};
use crate::join::{antijoin, disjoin, full_join, inner_join, left_join, right_join, semijoin};
use crate::keyed::{by, KeyedEntry, Path};
use crate::operands::{first_and_rest, read_all};
use crate::set::{dedup, except_all, intersect_all, union_all};
use crate::value::{Record, Value};

/// What an operation produces: a sequence of values, or a single record (the
/// index operations).
#[derive(Debug, PartialEq)]
enum Output {
    Many(Vec<Value>),
    One(Value),
}

/// Calculates the operation named by `op` over `files` and prints the result.
///
/// * The set operations fold their operands left to right: `union` gives the
///   values present in any file, `intersect` those of the first file present in
///   every other file, and `except` those of the first file present in no other
///   file. The `-all` forms keep duplicates. No files means an empty result.
/// * The joins, `cross` and `cogroup` take exactly two files, keyed by
///   `keys.left` and `keys.right`.
/// * `index` and `index-all` take exactly one file, keyed by `keys.left`.
pub fn calculate(
    op: OpName,
    files: &[PathBuf],
    keys: &KeySpec,
    format: Format,
    out: impl Write,
) -> Result<()> {
    if let Some(arity) = op.arity() {
        if files.len() != arity {
            let s = if arity == 1 { "" } else { "s" };
            bail!("{} takes exactly {arity} file{s}, got {}", op_name(op), files.len());
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(op = %op_name(op), files = files.len(), "calculate");

    let output = match keys.nulls {
        Nulls::Safe => evaluate(&NullSafe, op, files, keys, format.lines)?,
        Nulls::Sql => evaluate(&SqlNulls, op, files, keys, format.lines)?,
    };
    write_output(output, format, out)
}

fn op_name(op: OpName) -> String {
    op.to_possible_value().map_or_else(|| format!("{op:?}"), |v| v.get_name().to_owned())
}

fn evaluate<E: Equality>(
    eq: &E,
    op: OpName,
    files: &[PathBuf],
    keys: &KeySpec,
    lines: bool,
) -> Result<Output> {
    use OpName::{
        Anti, Cogroup, Cross, Disjoin, Except, ExceptAll, Full, Index, IndexAll, Inner, Intersect,
        IntersectAll, Left, Right, Semi, Union, UnionAll,
    };
    match op {
        Union | UnionAll | Intersect | IntersectAll | Except | ExceptAll => {
            fold_sets(eq, op, files, lines).map(Output::Many)
        }

        IndexAll | Index => {
            let values = read_all(files, lines)?.into_iter().flatten();
            let key = |v: &Value| keys.left.get(v);
            let record = if op == IndexAll {
                Value::from(index_all(eq, values, key).with_context(|| key_failure(&keys.left))?)
            } else {
                Value::from(index(eq, values, key).with_context(|| key_failure(&keys.left))?)
            };
            Ok(Output::One(record))
        }

        Cross => {
            let (left, right) = two_operands(files, lines)?;
            let rows = cross_join(&left, &right).into_iter().map(|(l, r)| pair(l, r));
            Ok(Output::Many(rows.collect()))
        }

        Cogroup | Full | Left | Right | Inner | Semi | Anti | Disjoin => {
            let (left, right) = two_operands(files, lines)?;
            let left = keyed(left, &keys.left)?;
            let right = keyed(right, &keys.right)?;
            let values: Vec<Value> = match op {
                Cogroup => cogroup(eq, left, right).into_iter().map(Value::from).collect(),
                Semi => semijoin(eq, left, right),
                Anti => antijoin(eq, left, right),
                _ => {
                    let rows = match op {
                        Full => full_join(eq, left, right),
                        Left => left_join(eq, left, right),
                        Right => right_join(eq, left, right),
                        Inner => inner_join(eq, left, right),
                        _ => disjoin(eq, left, right),
                    };
                    rows.into_iter().map(Value::from).collect()
                }
            };
            Ok(Output::Many(values))
        }
    }
}

/// The `-all` set operations fold over the operands; the distinct forms
/// de-duplicate once at the end, which gives the same values as
/// de-duplicating after every step.
fn fold_sets<E: Equality>(eq: &E, op: OpName, files: &[PathBuf], lines: bool) -> Result<Vec<Value>> {
    use OpName::{Except, Intersect, IntersectAll, Union, UnionAll};
    let Some((first, rest)) = first_and_rest(files, lines)? else { return Ok(Vec::new()) };
    let mut result = first;
    for operand in rest {
        let operand = operand?;
        result = match op {
            Union | UnionAll => union_all(result, operand),
            Intersect | IntersectAll => intersect_all(eq, result, operand),
            _ => except_all(eq, result, operand),
        };
    }
    if matches!(op, Union | Intersect | Except) {
        result = dedup(eq, result);
    }
    Ok(result)
}

fn two_operands(files: &[PathBuf], lines: bool) -> Result<(Vec<Value>, Vec<Value>)> {
    let mut operands = read_all(files, lines)?.into_iter();
    match (operands.next(), operands.next()) {
        (Some(left), Some(right)) => Ok((left, right)),
        _ => bail!("expected two files"),
    }
}

fn keyed(values: Vec<Value>, path: &Path) -> Result<Vec<KeyedEntry>> {
    by(values, |v| path.get(v)).with_context(|| key_failure(path))
}

fn key_failure(path: &Path) -> String {
    format!("Can't compute key {path}")
}

fn pair(left: Value, right: Value) -> Value {
    let mut fields = Record::with_capacity(2);
    fields.insert("left".to_owned(), left);
    fields.insert("right".to_owned(), right);
    Value::Map(fields)
}

fn write_output(output: Output, format: Format, mut out: impl Write) -> Result<()> {
    match output {
        Output::Many(values) if format.lines => {
            for value in &values {
                serde_json::to_writer(&mut out, value)?;
                out.write_all(b"\n")?;
            }
        }
        Output::Many(values) => write_json(&mut out, &Value::Seq(values), format.pretty)?,
        Output::One(value) => write_json(&mut out, &value, format.pretty && !format.lines)?,
    }
    out.flush()?;
    Ok(())
}

fn write_json(out: &mut impl Write, value: &Value, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    out.write_all(b"\n")?;
    Ok(())
}
