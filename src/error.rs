//! Error types for S-expression parsing, formatting, and the serde bridge.
//!
//! Every fallible operation in this crate reports through the single [`Error`]
//! enum. Parsing never recovers: the first lexical or syntactic problem aborts
//! the whole parse. Formatting fails when a value has no spelling in the
//! chosen dialect. Bridge errors carry the full field path of the value that
//! could not be converted.
//!
//! ## Examples
//!
//! ```rust
//! use serde_sexp::{Error, Sexp};
//!
//! let result: Result<Sexp, Error> = "(1 2".parse();
//! assert!(result.is_err());
//! ```

use std::fmt;
use thiserror::Error;

use crate::number::Number;
use crate::options::Syntax;

/// Represents all possible errors that can occur while tokenizing, parsing,
/// formatting, encoding, or decoding S-expressions.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// No lexical rule matched the input at the given byte offset
    #[error("no lexical rule matched at offset {offset}: {snippet:?}")]
    NoRuleMatched { offset: usize, snippet: String },

    /// Input continues after one complete datum
    #[error("trailing garbage after datum: {snippet:?}")]
    TrailingGarbage { snippet: String },

    /// A token that cannot begin or continue the current construct
    #[error("unexpected token {text:?} at offset {offset}")]
    UnexpectedToken { text: String, offset: usize },

    /// The token stream ended inside an unfinished construct
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// Boolean token that does not convert
    #[error("invalid boolean: {0}")]
    InvalidBoolean(String),

    /// Bytevector element outside the exact byte range 0..=255
    #[error("invalid bytevector element: {0}")]
    InvalidBytevectorElement(Number),

    /// Character token that does not convert
    #[error("invalid character: {0}")]
    InvalidCharacter(String),

    /// Number token that is lexically plausible but does not convert
    #[error("invalid number: {0}")]
    InvalidNumber(String),

    /// String token whose escapes do not convert
    #[error("invalid string: {0}")]
    InvalidString(String),

    /// Symbol token that converts to a special symbol, or whose escapes fail
    #[error("invalid symbol: {0}")]
    InvalidSymbol(String),

    /// The value has no spelling in the requested dialect
    #[error("cannot represent {value} in {syntax} syntax")]
    CannotRepresent { value: String, syntax: Syntax },

    /// A keyed container is missing a requested key
    #[error("key not found: {key:?}")]
    KeyNotFound { key: String },

    /// The stored value has the wrong kind for the requested type
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: String,
        found: String,
    },

    /// Input bytes are not valid UTF-8, or the datum is structurally unusable
    #[error("data corrupted: {0}")]
    DataCorrupted(String),

    /// A value that cannot be encoded (for example a non-string map key)
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Generic message (serde custom errors)
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a lexical error at the given byte offset, keeping a short
    /// snippet of the unmatched input for the message.
    pub(crate) fn no_rule_matched(offset: usize, rest: &str) -> Self {
        Error::NoRuleMatched {
            offset,
            snippet: snippet(rest),
        }
    }

    pub(crate) fn trailing_garbage(rest: &str) -> Self {
        Error::TrailingGarbage {
            snippet: snippet(rest),
        }
    }

    pub(crate) fn unexpected_token(text: &str, offset: usize) -> Self {
        Error::UnexpectedToken {
            text: text.to_string(),
            offset,
        }
    }

    pub(crate) fn cannot_represent(value: impl fmt::Display, syntax: Syntax) -> Self {
        Error::CannotRepresent {
            value: value.to_string(),
            syntax,
        }
    }

    /// Creates a type mismatch error for the decode bridge.
    pub(crate) fn type_mismatch(path: &str, expected: &str, found: impl fmt::Display) -> Self {
        Error::TypeMismatch {
            path: display_path(path),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

fn snippet(rest: &str) -> String {
    rest.chars().take(16).collect()
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    fn missing_field(field: &'static str) -> Self {
        Error::KeyNotFound {
            key: field.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
