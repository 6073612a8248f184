//! Configuration options for parsing and formatting S-expressions.
//!
//! - [`Syntax`]: which Scheme dialect governs the lexical grammar
//! - [`Verbosity`]: optional tokenizer rule tracing
//! - [`Options`]: combined configuration accepted by the `*_with_options`
//!   entry points
//!
//! ## Examples
//!
//! ```rust
//! use serde_sexp::{Options, Syntax, to_string_with_options};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, y: i32 }
//!
//! let options = Options::new().with_syntax(Syntax::R5rs);
//! let text = to_string_with_options(&Data { x: 1, y: 2 }, options).unwrap();
//! assert_eq!(text, "((x . 1) (y . 2))");
//! ```

use std::fmt;

/// The Scheme dialect governing the lexical grammar.
///
/// Both dialects share the datum-level grammar (pairs, vectors, quotes,
/// comments); they differ in the lexical forms they accept:
///
/// - **R5RS**: conservative. Only `#t`/`#f`, only the character names
///   `newline` and `space`, string escapes limited to `\"` and `\\`,
///   digit-grouping `#` suffixes on numbers, exponent markers `d e f l s`,
///   and `|` is a reserved character.
/// - **R7RS (partial)**: rich. Adds `#true`/`#false`, bytevectors `#u8(…)`,
///   nine named characters plus `#\xHH` hex characters, mnemonic and
///   `\xHH;` string escapes, pipe-quoted symbols, peculiar identifiers,
///   and the special reals `+inf.0`, `-inf.0`, `+nan.0`, `-nan.0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Syntax {
    R5rs,
    #[default]
    R7rsPartial,
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Syntax::R5rs => f.write_str("R5RS"),
            Syntax::R7rsPartial => f.write_str("R7RS (partial)"),
        }
    }
}

/// How much the tokenizer reports about rule matching.
///
/// Tracing goes through the `log` facade at `trace` level and never affects
/// tokenization results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// No tracing.
    #[default]
    Silent,
    /// Log every rule attempt and match.
    Rules,
}

/// Configuration options for parsing and formatting.
///
/// # Examples
///
/// ```rust
/// use serde_sexp::{Options, Syntax};
///
/// // Default: rich dialect, compact output, no tracing
/// let options = Options::new();
///
/// // Pretty-printed output
/// let options = Options::pretty();
///
/// // Conservative dialect
/// let options = Options::new().with_syntax(Syntax::R5rs);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    pub syntax: Syntax,
    pub pretty: bool,
    pub tracing: Verbosity,
}

impl Options {
    /// Creates default options (rich dialect, compact output).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for pretty-printed output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_sexp::Options;
    ///
    /// let options = Options::pretty();
    /// assert!(options.pretty);
    /// ```
    #[must_use]
    pub fn pretty() -> Self {
        Options {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the dialect.
    #[must_use]
    pub fn with_syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Enables or disables pretty-printing.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the tokenizer tracing level.
    #[must_use]
    pub fn with_tracing(mut self, tracing: Verbosity) -> Self {
        self.tracing = tracing;
        self
    }
}
