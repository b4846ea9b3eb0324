//! Error types for SHON transcoding.
//!
//! Errors follow a three-level taxonomy mirroring the pipeline stages:
//!
//! - [`LexError`]: invalid raw text (unterminated string/comment, bad escape)
//! - [`ParseError`]: token stream violates the grammar (unexpected token,
//!   unbalanced delimiter, duplicate key, malformed reference)
//! - [`BridgeError`]: JSON/CSV import failures (empty CSV, ragged rows,
//!   invalid JSON)
//!
//! plus [`Error::DanglingReference`], raised only by the explicit reference
//! resolution pass and never by default transcoding.
//!
//! Every conversion is one-shot and deterministic: the first error aborts it,
//! and all errors are returned as values with a source position where one
//! exists.
//!
//! ## Examples
//!
//! ```rust
//! use shon::{parse, Error, ParseError};
//!
//! let err = parse("@config { id: 1, id: 2 }").unwrap_err();
//! match err {
//!     Error::Parse(ParseError::DuplicateKey { key, .. }) => assert_eq!(key, "id"),
//!     other => panic!("unexpected error: {other}"),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// A 1-based line/column position in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub line: usize,
    pub col: usize,
}

impl Pos {
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Pos { line, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.col)
    }
}

/// Errors produced while tokenizing SHON source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A string literal was still open at end of input.
    #[error("unterminated string literal starting at {0}")]
    UnterminatedString(Pos),

    /// A `/* ... */` comment was still open at end of input.
    #[error("unterminated block comment starting at {0}")]
    UnterminatedComment(Pos),

    /// Only `\"` and `\\` are valid escapes inside strings.
    #[error("invalid escape sequence '\\{ch}' at {pos}")]
    InvalidEscape { ch: char, pos: Pos },

    /// A character with no meaning in the format.
    #[error("unexpected character '{ch}' at {pos}")]
    UnexpectedChar { ch: char, pos: Pos },
}

/// Errors produced while parsing a token stream into a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found} at {pos}")]
    UnexpectedToken {
        expected: String,
        found: String,
        pos: Pos,
    },

    /// Input ended before a `{` or `[` was closed.
    #[error("unbalanced '{open}' opened at {pos}: input ended before it was closed")]
    UnbalancedDelimiter { open: char, pos: Pos },

    /// Keys must be unique within one object scope.
    #[error("duplicate key '{key}' at {pos}")]
    DuplicateKey { key: String, pos: Pos },

    /// References take the form `&namespace.id`.
    #[error("malformed reference at {pos}: expected '&namespace.id'")]
    MalformedReference { pos: Pos },

    /// `$type` is only legal as the first entry of a block's top-level object.
    #[error("'$type' is only legal as the first entry of a block's top-level object ({pos})")]
    MisplacedTypeDecl { pos: Pos },

    /// A document must contain at least one block, or be a lone schema
    /// declaration.
    #[error("document contains no blocks")]
    EmptyDocument,
}

/// Errors produced by the JSON and CSV bridges.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("CSV input must have a header row and at least one data row")]
    EmptyCsv,

    /// A data row whose field count disagrees with the header.
    #[error("CSV row {row} has {found} fields, expected {expected}")]
    Row {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("CSV read error: {0}")]
    Csv(String),

    #[error("JSON error: {0}")]
    Json(String),
}

/// The top-level error type returned by every fallible operation in the crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// A reference whose namespace or id does not exist in the document.
    /// Only surfaced by [`crate::Document::verify_references`] and
    /// [`crate::Document::resolve`]; default transcoding passes references
    /// through untouched.
    #[error("dangling reference '&{namespace}.{id}'")]
    DanglingReference { namespace: String, id: String },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Bridge(BridgeError::Json(err.to_string()))
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::UnequalLengths {
                pos,
                expected_len,
                len,
            } => Error::Bridge(BridgeError::Row {
                row: pos.as_ref().map_or(0, |p| p.record() as usize),
                expected: *expected_len as usize,
                found: *len as usize,
            }),
            _ => Error::Bridge(BridgeError::Csv(err.to_string())),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
