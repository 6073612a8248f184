//! # serde_sexp
//!
//! A Serde-compatible serialization library for Scheme S-expressions.
//!
//! ## What does it speak?
//!
//! S-expressions as data: booleans, the full numeric tower (exact integers
//! and rationals of arbitrary width, inexact reals), characters, strings,
//! symbols, proper and dotted lists, vectors, and bytevectors. Two dialects
//! are supported:
//!
//! - **R5RS**: a conservative lexical grammar (only `#t`/`#f`, two character
//!   names, minimal string escapes)
//! - **R7RS (partial)**: a rich grammar adding `#true`/`#false`, bytevectors,
//!   named and hex characters, mnemonic string escapes, pipe-quoted symbols,
//!   and the special reals `+inf.0`/`-inf.0`/`+nan.0` (the default)
//!
//! ## Key Features
//!
//! - **Serde Compatible**: works with existing Rust types via
//!   `#[derive(Serialize, Deserialize)]`
//! - **Association-list convention**: structs and maps travel as proper
//!   lists of `(key . value)` pairs, ordered and human-readable
//! - **Full numeric tower**: big integers and reduced rationals survive a
//!   round trip exactly
//! - **Dialect-checked output**: formatting fails early when a value has no
//!   spelling in the chosen dialect
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! serde_sexp = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Basic Serialization and Deserialization
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_sexp::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Package {
//!     version: u32,
//!     name: String,
//! }
//!
//! let package = Package {
//!     version: 666,
//!     name: "foobar".to_string(),
//! };
//!
//! let text = to_string(&package).unwrap();
//! assert_eq!(text, "((version . 666) (name . foobar))");
//!
//! let package_back: Package = from_str(&text).unwrap();
//! assert_eq!(package, package_back);
//! ```
//!
//! ### Working with Raw Values
//!
//! [`Sexp`] is the dynamic value tree; it parses from text via [`FromStr`]
//! and renders via [`Display`](std::fmt::Display):
//!
//! ```rust
//! use serde_sexp::Sexp;
//!
//! let datum: Sexp = "(1/2 #\\a \"text\" (a . b))".parse().unwrap();
//! assert_eq!(datum.to_string(), "(1/2 #\\a \"text\" (a . b))");
//! ```
//!
//! ### Dialects and Pretty-Printing
//!
//! ```rust
//! use serde_sexp::{to_string_with_options, Options, Syntax};
//!
//! let options = Options::pretty().with_syntax(Syntax::R5rs);
//! let text = to_string_with_options(&vec![1, 2, 3], options).unwrap();
//! assert_eq!(text, "(1 2 3)");
//! ```
//!
//! [`FromStr`]: std::str::FromStr

mod chars;

pub mod de;
pub mod error;
pub mod format;
pub mod lexer;
pub mod map;
pub mod number;
pub mod options;
pub mod parser;
pub mod ser;
pub mod value;

pub use de::{from_value, SexpDeserializer};
pub use error::{Error, Result};
pub use format::Formatter;
pub use lexer::{Token, TokenKind, Tokenizer};
pub use map::SexpMap;
pub use number::Number;
pub use options::{Options, Syntax, Verbosity};
pub use parser::Parser;
pub use ser::{to_value, SexpSerializer};
pub use value::{Sexp, Symbol};

use serde::{de::DeserializeOwned, Serialize};
use std::io;

/// Serialize any `T: Serialize` to a compact S-expression string.
///
/// # Examples
///
/// ```rust
/// use serde_sexp::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// let text = to_string(&point).unwrap();
/// assert_eq!(text, "((x . 1) (y . 2))");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized (e.g., a map with
/// non-string keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, Options::default())
}

/// Serialize any `T: Serialize` to a pretty-printed S-expression string.
///
/// Pretty-printing puts the elements of any value whose complexity reaches
/// the line-break threshold on their own lines, aligned under the opening
/// delimiter.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, Options::pretty())
}

/// Serialize any `T: Serialize` to an S-expression string with custom
/// options.
///
/// # Examples
///
/// ```rust
/// use serde_sexp::{to_string_with_options, Options, Syntax};
///
/// let options = Options::new().with_syntax(Syntax::R5rs);
/// let text = to_string_with_options(&true, options).unwrap();
/// assert_eq!(text, "#t");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized, or if it has no
/// spelling in the requested dialect (an infinity under R5RS, for example).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: Options) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let tree = to_value(value)?;
    Formatter::new(options.syntax, options.pretty).format(&tree)
}

/// Serialize any `T: Serialize` to a compact S-expression as UTF-8 bytes.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    Ok(to_string(value)?.into_bytes())
}

/// Serialize any `T: Serialize` to a writer as a compact S-expression.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, Options::default())
}

/// Serialize any `T: Serialize` to a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: Options) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from S-expression text.
///
/// The input must hold exactly one datum; anything after it is trailing
/// garbage.
///
/// # Examples
///
/// ```rust
/// use serde_sexp::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("((x . 1) (y . 2))").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not a valid S-expression in the rich
/// dialect or cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, Options::default())
}

/// Deserialize an instance of type `T` from S-expression text with custom
/// options.
///
/// # Examples
///
/// ```rust
/// use serde_sexp::{from_str_with_options, Options, Syntax};
///
/// let options = Options::new().with_syntax(Syntax::R5rs);
/// let flag: bool = from_str_with_options("#t", options).unwrap();
/// assert!(flag);
/// ```
///
/// # Errors
///
/// Returns an error if the input is not a valid S-expression in the chosen
/// dialect or cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: Options) -> Result<T>
where
    T: DeserializeOwned,
{
    let tree = Parser::new(options.syntax, options.tracing).parse(s)?;
    from_value(tree)
}

/// Deserialize an instance of type `T` from an I/O stream of S-expression
/// text.
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not a
/// valid S-expression, or the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of S-expression text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not a valid
/// S-expression, or cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::DataCorrupted(e.to_string()))?;
    from_str(s)
}
