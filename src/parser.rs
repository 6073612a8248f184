//! The recursive-descent parser over the token list.
//!
//! Parsing is two-phase: the tokenizer materializes the whole token list,
//! then the matcher walks it with single-token lookahead and builds the
//! value tree. Exactly one datum is allowed per parse; anything after it is
//! trailing garbage. Token-to-value conversion happens here, so a token can
//! still fail semantically (an out-of-range bytevector element, a symbol
//! that classifies as special) even though it lexed.

use crate::chars;
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind, Tokenizer};
use crate::number::Number;
use crate::options::{Syntax, Verbosity};
use crate::value::{Sexp, Symbol};

/// Parses a single S-expression datum in one dialect.
pub struct Parser {
    syntax: Syntax,
    tracing: Verbosity,
}

impl Default for Parser {
    /// The rich dialect without tracing.
    fn default() -> Self {
        Parser::new(Syntax::default(), Verbosity::default())
    }
}

impl Parser {
    pub fn new(syntax: Syntax, tracing: Verbosity) -> Self {
        Parser { syntax, tracing }
    }

    /// Parses exactly one datum from the input.
    pub fn parse(&self, input: &str) -> Result<Sexp> {
        let tokens = Tokenizer::new(self.syntax, self.tracing).tokenize(input)?;
        Matcher::new(self.syntax, tokens).match_sexp()
    }
}

struct TokenReader<'a> {
    tokens: Vec<Token<'a>>,
    index: usize,
}

impl<'a> TokenReader<'a> {
    fn new(tokens: Vec<Token<'a>>) -> Self {
        TokenReader { tokens, index: 0 }
    }

    fn has_more(&self) -> bool {
        self.index < self.tokens.len()
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.index)
    }

    fn next_matches(&self, kind: TokenKind) -> bool {
        self.peek().map_or(false, |t| t.kind == kind)
    }

    fn read_if_matches(&mut self, kind: TokenKind) -> Option<Token<'a>> {
        if self.next_matches(kind) {
            let token = self.tokens[self.index];
            self.index += 1;
            Some(token)
        } else {
            None
        }
    }

    fn read_must_match(&mut self, kind: TokenKind) -> Result<Token<'a>> {
        self.read_if_matches(kind).ok_or_else(|| self.fail_on_next())
    }

    fn fail_on_next(&self) -> Error {
        match self.peek() {
            Some(token) => Error::unexpected_token(token.text, token.offset),
            None => Error::UnexpectedEnd,
        }
    }
}

struct Matcher<'a> {
    syntax: Syntax,
    reader: TokenReader<'a>,
}

impl<'a> Matcher<'a> {
    fn new(syntax: Syntax, tokens: Vec<Token<'a>>) -> Self {
        Matcher {
            syntax,
            reader: TokenReader::new(tokens),
        }
    }

    fn match_sexp(&mut self) -> Result<Sexp> {
        let datum = self.match_datum()?;
        match self.reader.peek() {
            Some(token) => Err(Error::trailing_garbage(token.text)),
            None => Ok(datum),
        }
    }

    fn match_datum(&mut self) -> Result<Sexp> {
        let Some(token) = self.reader.peek() else {
            return Err(Error::UnexpectedEnd);
        };
        match token.kind {
            TokenKind::Boolean => self.match_boolean(),
            TokenKind::ByteVectorBegin if self.syntax == Syntax::R7rsPartial => {
                self.match_bytevector()
            }
            TokenKind::Character => self.match_character(),
            TokenKind::Number => self.match_number(),
            TokenKind::PairBegin => self.match_pair_or_null(),
            TokenKind::String => self.match_string(),
            TokenKind::Symbol => self.match_symbol(),
            TokenKind::VectorBegin => self.match_vector(),
            _ => Err(self.reader.fail_on_next()),
        }
    }

    fn match_boolean(&mut self) -> Result<Sexp> {
        let token = self.reader.read_must_match(TokenKind::Boolean)?;
        let value = convert_boolean(token.text)
            .ok_or_else(|| Error::InvalidBoolean(token.text.to_string()))?;
        Ok(Sexp::Boolean(value))
    }

    fn match_bytevector(&mut self) -> Result<Sexp> {
        self.reader.read_must_match(TokenKind::ByteVectorBegin)?;

        let mut bytes = Vec::new();
        while let Some(token) = self.reader.read_if_matches(TokenKind::Number) {
            let number = Number::parse(token.text)
                .ok_or_else(|| Error::InvalidNumber(token.text.to_string()))?;
            let byte = byte_value(&number).ok_or(Error::InvalidBytevectorElement(number))?;
            bytes.push(byte);
        }

        self.reader.read_must_match(TokenKind::SequenceEnd)?;
        Ok(Sexp::Bytevector(bytes))
    }

    fn match_character(&mut self) -> Result<Sexp> {
        let token = self.reader.read_must_match(TokenKind::Character)?;
        let value = convert_character(token.text)
            .ok_or_else(|| Error::InvalidCharacter(token.text.to_string()))?;
        Ok(Sexp::Character(value))
    }

    fn match_number(&mut self) -> Result<Sexp> {
        let token = self.reader.read_must_match(TokenKind::Number)?;
        let value = Number::parse(token.text)
            .ok_or_else(|| Error::InvalidNumber(token.text.to_string()))?;
        Ok(Sexp::Number(value))
    }

    /// Builds a pair chain (or null) from a parenthesized sequence.
    ///
    /// A leading dot is tolerated: `(. x)` parses as `x`, because the dot
    /// handler does not care how many elements precede it.
    fn match_pair_or_null(&mut self) -> Result<Sexp> {
        self.reader.read_must_match(TokenKind::PairBegin)?;

        let mut stack = Vec::new();
        let mut last = Sexp::Null;

        while !self.reader.next_matches(TokenKind::SequenceEnd) {
            if self.reader.read_if_matches(TokenKind::Dot).is_some() {
                last = self.match_datum()?;
                break;
            }
            stack.push(self.match_datum()?);
        }

        self.reader.read_must_match(TokenKind::SequenceEnd)?;

        let mut list = last;
        while let Some(element) = stack.pop() {
            list = Sexp::pair(element, list);
        }
        Ok(list)
    }

    fn match_string(&mut self) -> Result<Sexp> {
        let token = self.reader.read_must_match(TokenKind::String)?;
        let value = convert_stringish(token.text)
            .ok_or_else(|| Error::InvalidString(token.text.to_string()))?;
        Ok(Sexp::String(value))
    }

    fn match_symbol(&mut self) -> Result<Sexp> {
        let token = self.reader.read_must_match(TokenKind::Symbol)?;
        let value = convert_symbol(token.text)
            .ok_or_else(|| Error::InvalidSymbol(token.text.to_string()))?;
        Ok(Sexp::Symbol(value))
    }

    fn match_vector(&mut self) -> Result<Sexp> {
        self.reader.read_must_match(TokenKind::VectorBegin)?;

        let mut elements = Vec::new();
        while !self.reader.next_matches(TokenKind::SequenceEnd) {
            elements.push(self.match_datum()?);
        }

        self.reader.read_must_match(TokenKind::SequenceEnd)?;
        Ok(Sexp::Vector(elements))
    }
}

fn convert_boolean(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "#f" | "#false" => Some(false),
        "#t" | "#true" => Some(true),
        _ => None,
    }
}

fn convert_character(text: &str) -> Option<char> {
    let tail = text.strip_prefix("#\\")?;

    // #\ followed by exactly one character
    let mut iter = tail.chars();
    if let (Some(c), None) = (iter.next(), iter.next()) {
        return Some(c);
    }

    // #\ character-name; the conversion table is shared, the tokenizer
    // already gated which names each dialect produces
    if let Some(c) = chars::named_char(tail, Syntax::R7rsPartial) {
        return Some(c);
    }

    // #\x hex-digits
    if let Some(hex) = tail.strip_prefix(['x', 'X']) {
        return convert_hex(hex);
    }

    None
}

fn convert_hex(hex: &str) -> Option<char> {
    let value = u32::from_str_radix(hex, 16).ok()?;
    char::from_u32(value)
}

/// Unescapes a delimiter-enclosed body; the first character of the token is
/// the delimiter (`"` for strings, `|` for piped symbols).
fn convert_stringish(text: &str) -> Option<String> {
    let mut iter = text.chars();
    let delimiter = iter.next()?;
    let mut value = String::new();

    while let Some(c) = iter.next() {
        if c == '\\' {
            value.push(convert_escaped(&mut iter)?);
        } else if c != delimiter {
            value.push(c);
        } else {
            return Some(value);
        }
    }

    None
}

fn convert_escaped(iter: &mut std::str::Chars<'_>) -> Option<char> {
    let c = iter.next()?;
    match c {
        '"' | '\\' | '|' => Some(c),
        'a' | 'A' | 'b' | 'B' | 'n' | 'N' | 'r' | 'R' | 't' | 'T' => chars::mnemonic_char(c),
        'x' | 'X' => {
            let mut hex = String::new();
            for h in iter.by_ref() {
                if h == ';' {
                    break;
                }
                hex.push(h);
            }
            convert_hex(&hex)
        }
        _ => None,
    }
}

fn convert_symbol(text: &str) -> Option<Symbol> {
    if text.starts_with('|') {
        return Some(Symbol::new(convert_stringish(text)?));
    }
    let symbol = Symbol::new(text);
    if symbol.is_special() {
        return None;
    }
    Some(symbol)
}

fn byte_value(number: &Number) -> Option<u8> {
    if !number.is_exact() || !number.is_integer() || number.is_negative() {
        return None;
    }
    number.as_u8()
}
