//! Provides the `first_and_rest` function, which returns the values of the
//! first operand and an iterator over the remaining operands, each read and
//! parsed only when the iterator reaches it.
//!
//! An operand file holds a JSON array, or with `--lines` one JSON value per
//! line. UTF-16 files with a Byte Order Mark are translated to UTF-8, and a
//! UTF-8 Byte Order Mark is skipped.
use anyhow::{bail, Context, Result};
use memchr::memchr;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::value::Value;

/// Return the values of the first file named in `files`, and an iterator over
/// the values of the subsequent files.
pub fn first_and_rest(files: &[PathBuf], lines: bool) -> Result<Option<(Vec<Value>, Remaining)>> {
    match files {
        [] => Ok(None),
        [first, rest @ ..] => {
            let first_operand = read_operand(first, lines)?;
            Ok(Some((first_operand, Remaining { files: rest.to_vec().into_iter(), lines })))
        }
    }
}

/// Reads and parses every file in `files`.
pub fn read_all(files: &[PathBuf], lines: bool) -> Result<Vec<Vec<Value>>> {
    files.iter().map(|path| read_operand(path, lines)).collect()
}

/// Reads and parses one operand file.
pub fn read_operand(path: &Path, lines: bool) -> Result<Vec<Value>> {
    let bytes = fs::read(path).with_context(|| format!("Can't read file: {}", path.display()))?;
    let bytes = decode_if_utf16(bytes);
    let name = path.display().to_string();
    if lines {
        parse_lines(&bytes, &name)
    } else {
        parse_array(&bytes, &name)
    }
}

/// The second and subsequent operands, read one at a time.
pub struct Remaining {
    files: std::vec::IntoIter<PathBuf>,
    lines: bool,
}

impl Iterator for Remaining {
    type Item = Result<Vec<Value>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.files.next().map(|path| read_operand(&path, self.lines))
    }
}

/// Decode UTF-16 to UTF-8 if we see a UTF-16 Byte Order Mark at the beginning of `candidate`.
/// Otherwise return `candidate` unchanged
fn decode_if_utf16(candidate: Vec<u8>) -> Vec<u8> {
    // Malformed sequences become the Unicode REPLACEMENT CHARACTER, which
    // JSON parsing will then usually reject.
    if let Some((enc, _)) = encoding_rs::Encoding::for_bom(&candidate) {
        if [encoding_rs::UTF_16LE, encoding_rs::UTF_16BE].contains(&enc) {
            let (translated, _had_malformed_sequences) =
                enc.decode_without_bom_handling(&candidate);
            return translated.into_owned().into_bytes();
        }
    }
    return candidate;
}

const BOM_BYTES: &[u8] = b"\xEF\xBB\xBF";

fn without_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(BOM_BYTES).unwrap_or(bytes)
}

/// Parses `bytes` as a single JSON array.
fn parse_array(bytes: &[u8], name: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_slice(without_bom(bytes))
        .with_context(|| format!("Can't parse {name} as JSON"))?;
    match value {
        Value::Seq(items) => Ok(items),
        other => bail!("{name} holds a {}, not a JSON array", other.kind()),
    }
}

/// Parses `bytes` as JSON Lines, skipping blank lines.
fn parse_lines(bytes: &[u8], name: &str) -> Result<Vec<Value>> {
    let mut slice = without_bom(bytes);
    let mut values = Vec::new();
    let mut line_number = 0_usize;
    loop {
        let (line, rest) = match memchr(b'\n', slice) {
            Some(end) => (&slice[..end], Some(&slice[end + 1..])),
            None => (slice, None),
        };
        line_number += 1;
        if !line.iter().all(u8::is_ascii_whitespace) {
            let value: Value = serde_json::from_slice(line)
                .with_context(|| format!("Can't parse line {line_number} of {name} as JSON"))?;
            values.push(value);
        }
        match rest {
            Some(rest) => slice = rest,
            None => return Ok(values),
        }
    }
}
