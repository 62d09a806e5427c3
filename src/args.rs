//! Code to parse the command line using `clap`, and definitions of the parsed
//! result
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::keyed::Path;

/// Returns the parsed command line: the `Args` return value's `op` field is the
/// operation desired, and the `files` field holds the files to take as
/// operands.
#[must_use]
pub fn parsed() -> Args {
    Args::from(CliArgs::parse())
}

/// The parsed command line
#[derive(Debug)]
pub struct Args {
    /// `op` is the operation requested
    pub op: OpName,
    /// `files` is the list of files from the command line
    pub files: Vec<PathBuf>,
    /// How the operands are keyed, and how keys compare
    pub keys: KeySpec,
    /// How operands are read and the result written
    pub format: Format,
}

/// Key paths for each side, and the null rule for comparing keys
#[derive(Debug, Clone, Default)]
pub struct KeySpec {
    /// Key path for the first operand
    pub left: Path,
    /// Key path for the second operand
    pub right: Path,
    /// Whether a null key matches another null key
    pub nulls: Nulls,
}

/// Input and output layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Format {
    /// Operands are JSON Lines and so is the output
    pub lines: bool,
    /// Pretty-print the output (ignored with `lines`)
    pub pretty: bool,
}

/// The null rule for key comparison
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, ValueEnum)]
pub enum Nulls {
    /// A null key matches a null key
    #[default]
    Safe,
    /// A null key matches nothing, as in SQL
    Sql,
}

/// Name of the requested operation
#[derive(PartialEq, Eq, Debug, Clone, Copy, ValueEnum)]
pub enum OpName {
    /// Print the distinct values present in any file
    Union,
    /// Print every value of every file, in order
    UnionAll,
    /// Print the distinct values of the first file present in every other file
    Intersect,
    /// Print the values of the first file present in every other file
    IntersectAll,
    /// Print the distinct values of the first file present in no other file
    Except,
    /// Print the values of the first file present in no other file
    ExceptAll,
    /// Print every pairing of a value of the first file with one of the second
    Cross,
    /// Print, per key, the values of each file having that key
    Cogroup,
    /// Print the full outer join of two files
    Full,
    /// Print the left outer join of two files
    Left,
    /// Print the right outer join of two files
    Right,
    /// Print the inner join of two files
    Inner,
    /// Print the values of the first file with a match in the second
    Semi,
    /// Print the values of the first file with no match in the second
    Anti,
    /// Print the rows of the full join having just one side
    Disjoin,
    /// Print each key of one file with all the values having that key
    IndexAll,
    /// Print each key of one file with the last value having that key
    Index,
}

impl OpName {
    /// How many file operands the operation takes: `None` means one or more
    #[must_use]
    pub fn arity(self) -> Option<usize> {
        match self {
            OpName::Union
            | OpName::UnionAll
            | OpName::Intersect
            | OpName::IntersectAll
            | OpName::Except
            | OpName::ExceptAll => None,
            OpName::IndexAll | OpName::Index => Some(1),
            _ => Some(2),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "relzet", version, about)]
/// `CliArgs` contains the parsed command line.
struct CliArgs {
    #[arg(value_enum)]
    /// `op` is the operation requested
    op: OpName,
    #[arg(value_name = "FILES")]
    /// Files holding a JSON array each (or JSON Lines, with --lines)
    files: Vec<PathBuf>,
    #[arg(long, short = 'k', default_value = ".")]
    /// Key path for both operands, such as `.id` or `.customer.0`
    key: Path,
    #[arg(long)]
    /// Key path for the first operand (overrides --key)
    left_key: Option<Path>,
    #[arg(long)]
    /// Key path for the second operand (overrides --key)
    right_key: Option<Path>,
    #[arg(long, value_enum, default_value_t = Nulls::Safe)]
    /// Whether null keys match each other
    nulls: Nulls,
    #[arg(long, short = 'l')]
    /// Read and write JSON Lines instead of JSON arrays
    lines: bool,
    #[arg(long, short = 'p')]
    /// Pretty-print the output
    pretty: bool,
}

impl From<CliArgs> for Args {
    fn from(cli: CliArgs) -> Self {
        let keys = KeySpec {
            left: cli.left_key.unwrap_or_else(|| cli.key.clone()),
            right: cli.right_key.unwrap_or(cli.key),
            nulls: cli.nulls,
        };
        let format = Format { lines: cli.lines, pretty: cli.pretty };
        Args { op: cli.op, files: cli.files, keys, format }
    }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::from(CliArgs::try_parse_from(argv).unwrap())
    }

    #[test]
    fn key_falls_back_to_identity() {
        let args = parse(&["relzet", "inner", "a.json", "b.json"]);
        assert_eq!(args.op, OpName::Inner);
        assert_eq!(args.keys.left, Path::identity());
        assert_eq!(args.keys.right, Path::identity());
        assert_eq!(args.keys.nulls, Nulls::Safe);
        assert_eq!(args.format, Format::default());
    }

    #[test]
    fn side_keys_override_the_shared_key() {
        let args = parse(&["relzet", "left", "--key", ".id", "--right-key", ".owner", "a", "b"]);
        assert_eq!(args.keys.left, ".id".parse::<Path>().unwrap());
        assert_eq!(args.keys.right, ".owner".parse::<Path>().unwrap());
    }

    #[test]
    fn multi_word_operation_names_are_kebab_case() {
        let args = parse(&["relzet", "intersect-all", "--nulls", "sql", "--lines", "a"]);
        assert_eq!(args.op, OpName::IntersectAll);
        assert_eq!(args.keys.nulls, Nulls::Sql);
        assert!(args.format.lines);
    }

    #[test]
    fn bad_key_paths_are_rejected() {
        assert!(CliArgs::try_parse_from(["relzet", "inner", "--key", "a..b"]).is_err());
    }

    #[test]
    fn arity() {
        assert_eq!(OpName::Union.arity(), None);
        assert_eq!(OpName::Index.arity(), Some(1));
        assert_eq!(OpName::Disjoin.arity(), Some(2));
    }
}
