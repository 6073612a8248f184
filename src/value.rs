//! The S-expression value tree.
//!
//! [`Sexp`] is an immutable tagged union of nine kinds. The only recursive
//! kind is the pair; proper lists are right-nested pair chains ending in
//! null, and association lists are proper lists of `(key . value)` pairs.
//!
//! ## Examples
//!
//! ```rust
//! use serde_sexp::Sexp;
//!
//! let list = Sexp::list([Sexp::from(1), Sexp::from(2), Sexp::from(3)]);
//! assert_eq!(list.to_string(), "(1 2 3)");
//!
//! let parsed: Sexp = "(1 2 3)".parse().unwrap();
//! assert_eq!(parsed, list);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::chars;
use crate::error::Error;
use crate::format::Formatter;
use crate::map::SexpMap;
use crate::number::Number;
use crate::options::Syntax;
use crate::parser::Parser;

/// A symbol with its specialness computed at construction.
///
/// A symbol is *special* when its text is empty, does not begin with a
/// symbol-head character, or contains a character outside the symbol-tail
/// set. Special symbols can only be written pipe-quoted, which the rich
/// dialect alone supports. Construction never rejects; specialness only
/// matters when writing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    text: String,
    special: bool,
}

impl Symbol {
    /// Creates a symbol, computing whether it is special.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let special = Self::is_special_text(&text);
        Symbol { text, special }
    }

    /// Whether the given text would form a special symbol.
    pub fn is_special_text(text: &str) -> bool {
        let mut iter = text.chars();
        match iter.next() {
            None => true,
            Some(first) if !chars::is_symbol_head(first) => true,
            Some(_) => iter.any(|c| !chars::is_symbol_tail(c)),
        }
    }

    /// The symbol's text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the symbol needs pipe-quoting to be written.
    #[must_use]
    pub fn is_special(&self) -> bool {
        self.special
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Symbol {
    fn from(text: &str) -> Self {
        Symbol::new(text)
    }
}

impl From<String> for Symbol {
    fn from(text: String) -> Self {
        Symbol::new(text)
    }
}

/// An S-expression value.
///
/// Values are acyclic by construction and compare structurally; NaN numbers
/// compare equal to themselves so round-trip comparisons work.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Sexp {
    Boolean(bool),
    Bytevector(Vec<u8>),
    Character(char),
    #[default]
    Null,
    Number(Number),
    Pair(Box<Sexp>, Box<Sexp>),
    String(String),
    Symbol(Symbol),
    Vector(Vec<Sexp>),
}

impl Sexp {
    /// Creates a pair from head and tail.
    pub fn pair(head: Sexp, tail: Sexp) -> Self {
        Sexp::Pair(Box::new(head), Box::new(tail))
    }

    /// Creates a proper list: a right-nested pair chain ending in null.
    pub fn list<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = Sexp>,
        I::IntoIter: DoubleEndedIterator,
    {
        elements
            .into_iter()
            .rev()
            .fold(Sexp::Null, |tail, head| Sexp::pair(head, tail))
    }

    /// Creates a symbol value.
    pub fn symbol(text: impl Into<String>) -> Self {
        Sexp::Symbol(Symbol::new(text))
    }

    /// A short name for the kind, used in diagnostics.
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Sexp::Boolean(_) => "boolean",
            Sexp::Bytevector(_) => "bytevector",
            Sexp::Character(_) => "character",
            Sexp::Null => "null",
            Sexp::Number(_) => "number",
            Sexp::Pair(_, _) => "pair",
            Sexp::String(_) => "string",
            Sexp::Symbol(_) => "symbol",
            Sexp::Vector(_) => "vector",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Sexp::Null)
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Sexp::Pair(_, _))
    }

    /// Whether the value is a proper list (null, or a pair chain ending in
    /// null).
    pub fn is_list(&self) -> bool {
        let mut node = self;
        loop {
            match node {
                Sexp::Null => return true,
                Sexp::Pair(_, tail) => node = tail,
                _ => return false,
            }
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Sexp::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Sexp::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Sexp::Character(c) => Some(*c),
            _ => None,
        }
    }

    /// The text of a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Sexp::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Sexp::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Sexp::Bytevector(b) => Some(b),
            _ => None,
        }
    }

    /// The head and tail of a pair.
    pub fn as_pair(&self) -> Option<(&Sexp, &Sexp)> {
        match self {
            Sexp::Pair(head, tail) => Some((head, tail)),
            _ => None,
        }
    }

    /// Projects a proper list or a vector onto a flat array of values.
    pub fn array_value(&self) -> Option<Vec<Sexp>> {
        self.clone().into_array()
    }

    /// Consuming form of [`Sexp::array_value`].
    pub(crate) fn into_array(self) -> Option<Vec<Sexp>> {
        match self {
            Sexp::Vector(elements) => Some(elements),
            Sexp::Null => Some(Vec::new()),
            Sexp::Pair(_, _) => {
                let mut elements = Vec::new();
                let mut node = self;
                loop {
                    match node {
                        Sexp::Null => return Some(elements),
                        Sexp::Pair(head, tail) => {
                            elements.push(*head);
                            node = *tail;
                        }
                        _ => return None,
                    }
                }
            }
            _ => None,
        }
    }

    /// Projects a proper list of `(key . value)` pairs onto an ordered
    /// dictionary.
    ///
    /// Keys must be strings or non-special symbols. A duplicate key keeps
    /// its first position and its last value.
    pub fn dictionary_value(&self) -> Option<SexpMap> {
        self.clone().into_dictionary()
    }

    /// Consuming form of [`Sexp::dictionary_value`].
    pub(crate) fn into_dictionary(self) -> Option<SexpMap> {
        let entries = match self {
            Sexp::Null => return Some(SexpMap::new()),
            Sexp::Pair(_, _) => self.into_array()?,
            _ => return None,
        };
        let mut map = SexpMap::with_capacity(entries.len());
        for entry in entries {
            let (key, value) = match entry {
                Sexp::Pair(key, value) => (*key, *value),
                _ => return None,
            };
            let key = match key {
                Sexp::String(s) => s,
                Sexp::Symbol(sym) if !sym.is_special() => sym.text,
                _ => return None,
            };
            map.insert(key, value);
        }
        Some(map)
    }
}

impl fmt::Display for Sexp {
    /// Renders the value compactly in the rich dialect, which can spell
    /// every value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Formatter::new(Syntax::R7rsPartial, false).format(self) {
            Ok(text) => f.write_str(&text),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl FromStr for Sexp {
    type Err = Error;

    /// Parses a single datum in the rich dialect.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Parser::default().parse(input)
    }
}

impl From<bool> for Sexp {
    fn from(value: bool) -> Self {
        Sexp::Boolean(value)
    }
}

impl From<char> for Sexp {
    fn from(value: char) -> Self {
        Sexp::Character(value)
    }
}

impl From<&str> for Sexp {
    fn from(value: &str) -> Self {
        Sexp::String(value.to_string())
    }
}

impl From<String> for Sexp {
    fn from(value: String) -> Self {
        Sexp::String(value)
    }
}

impl From<Symbol> for Sexp {
    fn from(value: Symbol) -> Self {
        Sexp::Symbol(value)
    }
}

impl From<Number> for Sexp {
    fn from(value: Number) -> Self {
        Sexp::Number(value)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Sexp {
                fn from(value: $ty) -> Self {
                    Sexp::Number(Number::from(value))
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, f32, f64);
