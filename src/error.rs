//! The library's error type.
use thiserror::Error;

/// Result type for every fallible operator in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Operators never fail on their own; these are the ways the key functions and
/// record helpers they call can fail. Any failure aborts the whole operator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A key path step was applied to something that has no fields or elements
    #[error("cannot index {found} with \"{step}\"")]
    NotIndexable {
        /// The offending step, rendered as in a path (`.name` or `.0`)
        step: String,
        /// Kind of the value the step was applied to
        found: &'static str,
    },

    /// A string helper was applied to a non-string
    #[error("cannot {op} {found}, expected a string")]
    NotAString {
        /// Name of the helper
        op: &'static str,
        /// Kind of the value it was given
        found: &'static str,
    },

    /// A record helper was applied to a non-record
    #[error("cannot {op} {found}, expected a record")]
    NotARecord {
        /// Name of the helper
        op: &'static str,
        /// Kind of the value it was given
        found: &'static str,
    },

    /// A key path could not be parsed
    #[error("invalid key path \"{0}\"")]
    InvalidPath(String),

    /// Raised by a caller-supplied key function
    #[error("key function failed: {0}")]
    KeyFunction(String),
}
