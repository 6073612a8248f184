//! The dialect-aware tokenizer.
//!
//! Tokenization walks an ordered rule list at each input position and takes
//! the first rule that matches; when no rule matches, the whole tokenize
//! call fails. Rules that form complete data (booleans, characters, numbers,
//! the dot, symbols) additionally require the next character to be a
//! delimiter or the end of input, so `#tx` is a lexical error rather than a
//! boolean followed by a symbol.
//!
//! Tokens borrow their text from the input; conversion to values happens in
//! the parser, never here. With [`Verbosity::Rules`] the tokenizer logs each
//! rule attempt and match through the `log` facade.

use log::trace;

use crate::chars;
use crate::error::{Error, Result};
use crate::options::{Syntax, Verbosity};

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Boolean,
    ByteVectorBegin,
    Character,
    Dot,
    Number,
    PairBegin,
    Quasiquote,
    Quote,
    Reserved,
    SequenceEnd,
    String,
    Symbol,
    Unquote,
    UnquoteSplicing,
    VectorBegin,
}

/// A lexical token: its kind, its exact text, and its byte offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: usize,
}

struct Rule {
    name: &'static str,
    kind: Option<TokenKind>,
    matcher: fn(&Tokenizer, &str) -> Option<usize>,
}

/// Rule order matters: common punctuation first, then the dialect rules.
/// Unquote-splicing precedes unquote, and the dot rule precedes the number
/// rule so that a lone `.` never starts a number.
const RULES: &[Rule] = &[
    Rule {
        name: "whitespace",
        kind: None,
        matcher: match_whitespace,
    },
    Rule {
        name: "comment",
        kind: None,
        matcher: match_comment,
    },
    Rule {
        name: "quote",
        kind: Some(TokenKind::Quote),
        matcher: |_, rest| literal(rest, "'"),
    },
    Rule {
        name: "quasiquote",
        kind: Some(TokenKind::Quasiquote),
        matcher: |_, rest| literal(rest, "`"),
    },
    Rule {
        name: "unquote-splicing",
        kind: Some(TokenKind::UnquoteSplicing),
        matcher: |_, rest| literal(rest, ",@"),
    },
    Rule {
        name: "unquote",
        kind: Some(TokenKind::Unquote),
        matcher: |_, rest| literal(rest, ","),
    },
    Rule {
        name: "pair-begin",
        kind: Some(TokenKind::PairBegin),
        matcher: |_, rest| literal(rest, "("),
    },
    Rule {
        name: "sequence-end",
        kind: Some(TokenKind::SequenceEnd),
        matcher: |_, rest| literal(rest, ")"),
    },
    Rule {
        name: "vector-begin",
        kind: Some(TokenKind::VectorBegin),
        matcher: |_, rest| literal(rest, "#("),
    },
    Rule {
        name: "dot",
        kind: Some(TokenKind::Dot),
        matcher: match_dot,
    },
    Rule {
        name: "boolean",
        kind: Some(TokenKind::Boolean),
        matcher: match_boolean,
    },
    Rule {
        name: "bytevector-begin",
        kind: Some(TokenKind::ByteVectorBegin),
        matcher: match_bytevector_begin,
    },
    Rule {
        name: "character",
        kind: Some(TokenKind::Character),
        matcher: match_character,
    },
    Rule {
        name: "number",
        kind: Some(TokenKind::Number),
        matcher: match_number,
    },
    Rule {
        name: "reserved",
        kind: Some(TokenKind::Reserved),
        matcher: match_reserved,
    },
    Rule {
        name: "string",
        kind: Some(TokenKind::String),
        matcher: match_string,
    },
    Rule {
        name: "symbol",
        kind: Some(TokenKind::Symbol),
        matcher: match_symbol,
    },
];

/// Splits input text into a token list for one dialect.
pub struct Tokenizer {
    syntax: Syntax,
    tracing: Verbosity,
}

impl Tokenizer {
    pub fn new(syntax: Syntax, tracing: Verbosity) -> Self {
        Tokenizer { syntax, tracing }
    }

    /// Tokenizes the whole input, materializing every token up front.
    pub fn tokenize<'a>(&self, input: &'a str) -> Result<Vec<Token<'a>>> {
        let mut tokens = Vec::new();
        let mut offset = 0;

        while offset < input.len() {
            let rest = &input[offset..];
            let mut matched = false;

            for rule in RULES {
                if self.tracing == Verbosity::Rules {
                    trace!("trying rule {} at offset {}", rule.name, offset);
                }
                if let Some(len) = (rule.matcher)(self, rest) {
                    debug_assert!(len > 0);
                    if self.tracing == Verbosity::Rules {
                        trace!("rule {} matched {:?} at offset {}", rule.name, &rest[..len], offset);
                    }
                    if let Some(kind) = rule.kind {
                        tokens.push(Token {
                            kind,
                            text: &rest[..len],
                            offset,
                        });
                    }
                    offset += len;
                    matched = true;
                    break;
                }
            }

            if !matched {
                return Err(Error::no_rule_matched(offset, rest));
            }
        }

        Ok(tokens)
    }

    /// Whether the character after a candidate match allows the match to
    /// complete.
    fn delimited(&self, rest: &str, len: usize) -> bool {
        match rest[len..].chars().next() {
            None => true,
            Some(c) => chars::is_delimiter(c, self.syntax),
        }
    }
}

fn literal(rest: &str, text: &'static str) -> Option<usize> {
    rest.starts_with(text).then_some(text.len())
}

fn match_whitespace(_t: &Tokenizer, rest: &str) -> Option<usize> {
    let len = rest
        .char_indices()
        .find(|(_, c)| !chars::is_whitespace(*c))
        .map_or(rest.len(), |(i, _)| i);
    (len > 0).then_some(len)
}

/// A line comment runs from `;` up to (not including) the newline.
fn match_comment(_t: &Tokenizer, rest: &str) -> Option<usize> {
    if !rest.starts_with(';') {
        return None;
    }
    Some(rest.find('\n').unwrap_or(rest.len()))
}

fn match_dot(t: &Tokenizer, rest: &str) -> Option<usize> {
    (rest.starts_with('.') && t.delimited(rest, 1)).then_some(1)
}

fn match_boolean(t: &Tokenizer, rest: &str) -> Option<usize> {
    let tail = rest.strip_prefix('#')?;
    let candidates: &[&str] = match t.syntax {
        Syntax::R5rs => &["f", "t"],
        Syntax::R7rsPartial => &["false", "true", "f", "t"],
    };
    for word in candidates {
        if starts_with_ignore_case(tail, word) && t.delimited(rest, 1 + word.len()) {
            return Some(1 + word.len());
        }
    }
    None
}

fn match_bytevector_begin(t: &Tokenizer, rest: &str) -> Option<usize> {
    if t.syntax != Syntax::R7rsPartial {
        return None;
    }
    starts_with_ignore_case(rest, "#u8(").then_some(4)
}

fn match_character(t: &Tokenizer, rest: &str) -> Option<usize> {
    let tail = rest.strip_prefix("#\\")?;

    // any single character
    if let Some(c) = tail.chars().next() {
        let len = 2 + c.len_utf8();
        if t.delimited(rest, len) {
            return Some(len);
        }
    }

    // character name
    for name in chars::char_names(t.syntax) {
        if starts_with_ignore_case(tail, name) && t.delimited(rest, 2 + name.len()) {
            return Some(2 + name.len());
        }
    }

    // hex scalar value, rich dialect only
    if t.syntax == Syntax::R7rsPartial {
        if let Some(hex) = tail.strip_prefix(['x', 'X']) {
            let digits = hex.bytes().take_while(u8::is_ascii_hexdigit).count();
            if digits > 0 && t.delimited(rest, 3 + digits) {
                return Some(3 + digits);
            }
        }
    }

    None
}

fn match_reserved(t: &Tokenizer, rest: &str) -> Option<usize> {
    let c = rest.chars().next()?;
    let reserved = matches!(c, '[' | ']' | '{' | '}') || (t.syntax == Syntax::R5rs && c == '|');
    reserved.then_some(1)
}

fn match_string(t: &Tokenizer, rest: &str) -> Option<usize> {
    quoted(t, rest, '"')
}

fn match_symbol(t: &Tokenizer, rest: &str) -> Option<usize> {
    match t.syntax {
        Syntax::R5rs => {
            if starts_with_ignore_case(rest, "...") && t.delimited(rest, 3) {
                return Some(3);
            }
            if rest.starts_with(['+', '-']) && t.delimited(rest, 1) {
                return Some(1);
            }
            let len = bare_identifier(rest)?;
            t.delimited(rest, len).then_some(len)
        }
        Syntax::R7rsPartial => {
            if let Some(len) = peculiar_identifier(rest) {
                if t.delimited(rest, len) {
                    return Some(len);
                }
            }
            if let Some(len) = bare_identifier(rest) {
                if t.delimited(rest, len) {
                    return Some(len);
                }
            }
            if let Some(len) = quoted(t, rest, '|') {
                if t.delimited(rest, len) {
                    return Some(len);
                }
            }
            None
        }
    }
}

/// Identifier-shaped symbol text: an initial followed by subsequents.
///
/// The subsequent set here includes `@`, which the value-level classifier
/// rejects; such tokens lex but fail symbol conversion in the parser.
fn bare_identifier(rest: &str) -> Option<usize> {
    let mut iter = rest.char_indices();
    let (_, first) = iter.next()?;
    if !sym_initial(first) {
        return None;
    }
    for (i, c) in iter {
        if !sym_subsequent(c) {
            return Some(i);
        }
    }
    Some(rest.len())
}

/// R7RS peculiar identifiers: a lone sign, a sign followed by a
/// sign-subsequent, or an optionally signed dot form (this also covers
/// `...`).
fn peculiar_identifier(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut pos = 0;
    let signed = matches!(bytes.first(), Some(b'+' | b'-'));
    if signed {
        pos = 1;
    }

    match bytes.get(pos) {
        Some(&c) if signed && sym_sign_subsequent(c as char) => {
            pos += 1;
            pos += subsequent_run(&rest[pos..]);
            Some(pos)
        }
        Some(b'.') => {
            pos += 1;
            match bytes.get(pos) {
                Some(&c) if sym_sign_subsequent(c as char) || c == b'.' => {
                    pos += 1;
                    pos += subsequent_run(&rest[pos..]);
                    Some(pos)
                }
                _ => None,
            }
        }
        _ if signed => Some(1),
        _ => None,
    }
}

fn subsequent_run(rest: &str) -> usize {
    rest.char_indices()
        .find(|(_, c)| !sym_subsequent(*c))
        .map_or(rest.len(), |(i, _)| i)
}

fn sym_initial(c: char) -> bool {
    chars::is_symbol_head(c)
}

fn sym_subsequent(c: char) -> bool {
    chars::is_symbol_tail(c) || c == '@'
}

fn sym_sign_subsequent(c: char) -> bool {
    sym_initial(c) || matches!(c, '+' | '-' | '@')
}

/// Matches a delimiter-enclosed body (strings and pipe symbols) including
/// its closing delimiter. Escape forms are dialect-gated: the conservative
/// dialect only knows `\"` and `\\`.
fn quoted(t: &Tokenizer, rest: &str, delimiter: char) -> Option<usize> {
    let mut iter = rest.char_indices();
    let (_, first) = iter.next()?;
    if first != delimiter {
        return None;
    }

    while let Some((i, c)) = iter.next() {
        if c == delimiter {
            return Some(i + c.len_utf8());
        }
        if c != '\\' {
            continue;
        }
        let (_, escaped) = iter.next()?;
        match escaped {
            '"' | '\\' => {}
            '|' if t.syntax == Syntax::R7rsPartial => {}
            'a' | 'A' | 'b' | 'B' | 'n' | 'N' | 'r' | 'R' | 't' | 'T'
                if t.syntax == Syntax::R7rsPartial => {}
            'x' | 'X' if t.syntax == Syntax::R7rsPartial => {
                let mut digits = 0;
                loop {
                    match iter.next() {
                        Some((_, ';')) if digits > 0 => break,
                        Some((_, h)) if h.is_ascii_hexdigit() => digits += 1,
                        _ => return None,
                    }
                }
            }
            _ => return None,
        }
    }

    None
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.as_bytes()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}

// --- number rule ---------------------------------------------------------

fn match_number(t: &Tokenizer, rest: &str) -> Option<usize> {
    let first = rest.chars().next()?;
    if first != '#' && first != '.' && !chars::is_number_head(first) {
        return None;
    }

    let bytes = rest.as_bytes();
    let mut pos = 0;
    let mut radix = 10;
    let mut radix_seen = false;
    let mut exactness_seen = false;

    while bytes.get(pos) == Some(&b'#') {
        match bytes.get(pos + 1).map(u8::to_ascii_lowercase) {
            Some(b'b') if !radix_seen => (radix, radix_seen) = (2, true),
            Some(b'o') if !radix_seen => (radix, radix_seen) = (8, true),
            Some(b'd') if !radix_seen => (radix, radix_seen) = (10, true),
            Some(b'h') if !radix_seen => (radix, radix_seen) = (16, true),
            Some(b'e' | b'i') if !exactness_seen => exactness_seen = true,
            _ => return None,
        }
        pos += 2;
    }

    // Candidate ends in grammar preference order; the first one followed by
    // a delimiter wins, which emulates the backtracking the grammar needs.
    let mut candidates = Vec::new();

    if let Some(real_end) = match_real(t, rest, pos, radix) {
        if bytes.get(real_end) == Some(&b'@') {
            if let Some(angle_end) = match_real(t, rest, real_end + 1, radix) {
                candidates.push(angle_end);
            }
        }
        if matches!(bytes.get(real_end), Some(b'+' | b'-')) {
            extend_imaginary(t, rest, real_end, radix, &mut candidates);
        }
        candidates.push(real_end);
    }
    if matches!(bytes.get(pos), Some(b'+' | b'-')) {
        extend_imaginary(t, rest, pos, radix, &mut candidates);
    }

    candidates.into_iter().find(|&end| t.delimited(rest, end))
}

/// Candidate ends for `sign ureal? i` (and `sign infnan i` in the rich
/// dialect) starting at the sign.
fn extend_imaginary(t: &Tokenizer, rest: &str, sign_at: usize, radix: u32, out: &mut Vec<usize>) {
    let bytes = rest.as_bytes();
    let after_sign = sign_at + 1;
    if let Some(end) = match_ureal(t, rest, after_sign, radix) {
        if matches!(bytes.get(end), Some(b'i' | b'I')) {
            out.push(end + 1);
        }
    }
    if t.syntax == Syntax::R7rsPartial {
        if let Some(end) = match_infnan(rest, after_sign) {
            if matches!(bytes.get(end), Some(b'i' | b'I')) {
                out.push(end + 1);
            }
        }
    }
    if matches!(bytes.get(after_sign), Some(b'i' | b'I')) {
        out.push(after_sign + 1);
    }
}

/// `sign? ureal`, or `sign infnan` in the rich dialect. Returns the end
/// offset.
fn match_real(t: &Tokenizer, rest: &str, start: usize, radix: u32) -> Option<usize> {
    let bytes = rest.as_bytes();
    let signed = matches!(bytes.get(start), Some(b'+' | b'-'));
    let body = if signed { start + 1 } else { start };

    if signed && t.syntax == Syntax::R7rsPartial {
        if let Some(end) = match_infnan(rest, body) {
            return Some(end);
        }
    }
    match_ureal(t, rest, body, radix)
}

fn match_infnan(rest: &str, start: usize) -> Option<usize> {
    let tail = rest.get(start..)?;
    (starts_with_ignore_case(tail, "inf.0") || starts_with_ignore_case(tail, "nan.0"))
        .then_some(start + 5)
}

/// Unsigned real: a rational `uinteger [/ uinteger]`, or a decimal float.
/// Greedy; the delimiter check in the caller rejects a short match that
/// stops mid-literal.
fn match_ureal(t: &Tokenizer, rest: &str, start: usize, radix: u32) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut best = None;

    if let Some(mut end) = match_uinteger(t, rest, start, radix) {
        if bytes.get(end) == Some(&b'/') {
            if let Some(denom_end) = match_uinteger(t, rest, end + 1, radix) {
                end = denom_end;
            }
        }
        best = Some(end);
    }

    if radix == 10 {
        if let Some(end) = match_ufloat(t, rest, start) {
            if best.map_or(true, |b| end > b) {
                best = Some(end);
            }
        }
    }

    best
}

/// Digits in the radix, with trailing digit-grouping `#` markers in the
/// conservative dialect.
fn match_uinteger(t: &Tokenizer, rest: &str, start: usize, radix: u32) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut pos = start;
    while bytes
        .get(pos)
        .is_some_and(|b| (*b as char).is_digit(radix))
    {
        pos += 1;
    }
    if pos == start {
        return None;
    }
    if t.syntax == Syntax::R5rs {
        while bytes.get(pos) == Some(&b'#') {
            pos += 1;
        }
    }
    Some(pos)
}

/// Decimal float: integer and/or fractional digits around a point, with an
/// optional exponent suffix. The conservative dialect also accepts grouping
/// markers and the exponent markers `d e f l s`; the rich dialect only `e`.
fn match_ufloat(t: &Tokenizer, rest: &str, start: usize) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut pos = start;

    let int_digits = digit_run(bytes, pos);
    pos += int_digits;
    let mut grouped = 0;
    if t.syntax == Syntax::R5rs && int_digits > 0 {
        grouped = marker_run(bytes, pos);
        pos += grouped;
    }

    let mut fract_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        if grouped > 0 {
            // after grouped integer digits only grouping markers may follow
            pos += marker_run(bytes, pos);
        } else {
            fract_digits = digit_run(bytes, pos);
            pos += fract_digits;
            if t.syntax == Syntax::R5rs {
                pos += marker_run(bytes, pos);
            }
        }
        if int_digits == 0 && fract_digits == 0 {
            return None;
        }
    } else if int_digits == 0 {
        return None;
    }

    // exponent suffix
    let marker = bytes.get(pos).map(u8::to_ascii_lowercase);
    let is_marker = match t.syntax {
        Syntax::R5rs => matches!(marker, Some(b'd' | b'e' | b'f' | b'l' | b's')),
        Syntax::R7rsPartial => matches!(marker, Some(b'e')),
    };
    if is_marker {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digit_run(bytes, exp);
        if exp_digits > 0 {
            pos = exp + exp_digits;
        }
    }

    Some(pos)
}

fn digit_run(bytes: &[u8], start: usize) -> usize {
    bytes[start.min(bytes.len())..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count()
}

fn marker_run(bytes: &[u8], start: usize) -> usize {
    bytes[start.min(bytes.len())..]
        .iter()
        .take_while(|b| **b == b'#')
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(syntax: Syntax, input: &str) -> Vec<TokenKind> {
        Tokenizer::new(syntax, Verbosity::Silent)
            .tokenize(input)
            .unwrap_or_else(|e| panic!("{input:?} should tokenize: {e}"))
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn texts(syntax: Syntax, input: &str) -> Vec<String> {
        Tokenizer::new(syntax, Verbosity::Silent)
            .tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.text.to_string())
            .collect()
    }

    fn fails(syntax: Syntax, input: &str) {
        let result = Tokenizer::new(syntax, Verbosity::Silent).tokenize(input);
        assert!(result.is_err(), "{input:?} should not tokenize");
    }

    #[test]
    fn punctuation_and_structure() {
        use TokenKind::*;
        assert_eq!(
            kinds(Syntax::R7rsPartial, "'(a . b) `#(1) ,x ,@y"),
            vec![
                Quote, PairBegin, Symbol, Dot, Symbol, SequenceEnd, Quasiquote, VectorBegin,
                Number, SequenceEnd, Unquote, Symbol, UnquoteSplicing, Symbol
            ]
        );
    }

    #[test]
    fn whitespace_and_comments_are_skipped() {
        assert_eq!(
            texts(Syntax::R5rs, "  a ; rest of line\n  b"),
            vec!["a", "b"]
        );
        assert_eq!(texts(Syntax::R5rs, "; only a comment"), Vec::<String>::new());
    }

    #[test]
    fn booleans_differ_by_dialect() {
        assert_eq!(kinds(Syntax::R5rs, "#t #f"), vec![TokenKind::Boolean; 2]);
        assert_eq!(
            kinds(Syntax::R7rsPartial, "#t #true #F #FALSE"),
            vec![TokenKind::Boolean; 4]
        );
        fails(Syntax::R5rs, "#true");
        fails(Syntax::R7rsPartial, "#tx");
    }

    #[test]
    fn characters() {
        assert_eq!(kinds(Syntax::R5rs, "#\\a #\\space #\\newline"), vec![TokenKind::Character; 3]);
        assert_eq!(
            kinds(Syntax::R7rsPartial, "#\\x41 #\\delete #\\x #\\("),
            vec![TokenKind::Character; 4]
        );
        fails(Syntax::R5rs, "#\\delete");
        fails(Syntax::R7rsPartial, "#\\spacex");
    }

    #[test]
    fn bytevector_begin_is_rich_only() {
        assert_eq!(
            kinds(Syntax::R7rsPartial, "#u8(1)"),
            vec![TokenKind::ByteVectorBegin, TokenKind::Number, TokenKind::SequenceEnd]
        );
        fails(Syntax::R5rs, "#u8(1)");
    }

    #[test]
    fn numbers_across_radixes() {
        for text in ["0", "-42", "+17", "#b101", "#o17", "#hFF", "#e1.5", "#i5", "1/2", "3.14", ".5", "6.", "1e3"] {
            assert_eq!(kinds(Syntax::R7rsPartial, text), vec![TokenKind::Number], "{text}");
        }
        // conservative extras
        for text in ["12#", "1d4", "1s2", "12#.##"] {
            assert_eq!(kinds(Syntax::R5rs, text), vec![TokenKind::Number], "{text}");
        }
        // rich-only special reals
        for text in ["+inf.0", "-inf.0", "+nan.0", "1+2i", "3@4"] {
            assert_eq!(kinds(Syntax::R7rsPartial, text), vec![TokenKind::Number], "{text}");
        }
        fails(Syntax::R5rs, "+inf.0");
        fails(Syntax::R7rsPartial, "12#");
        fails(Syntax::R7rsPartial, "1d4");
        fails(Syntax::R7rsPartial, "1e");
    }

    #[test]
    fn dot_requires_delimiter() {
        assert_eq!(kinds(Syntax::R5rs, "."), vec![TokenKind::Dot]);
        assert_eq!(kinds(Syntax::R5rs, ".5"), vec![TokenKind::Number]);
        assert_eq!(kinds(Syntax::R7rsPartial, "..."), vec![TokenKind::Symbol]);
    }

    #[test]
    fn strings() {
        assert_eq!(kinds(Syntax::R5rs, r#""abc" "a\"b" "a\\b""#), vec![TokenKind::String; 3]);
        assert_eq!(
            kinds(Syntax::R7rsPartial, r#""a\nb" "a\x41;b""#),
            vec![TokenKind::String; 2]
        );
        fails(Syntax::R5rs, r#""a\nb""#);
        fails(Syntax::R5rs, r#""unterminated"#);
        fails(Syntax::R7rsPartial, r#""bad\qescape""#);
    }

    #[test]
    fn symbols_differ_by_dialect() {
        assert_eq!(kinds(Syntax::R5rs, "foo list->vector ... + -"), vec![TokenKind::Symbol; 5]);
        assert_eq!(
            kinds(Syntax::R7rsPartial, "+x -> .. |two words| a@b"),
            vec![TokenKind::Symbol; 5]
        );
        fails(Syntax::R5rs, "+x");
    }

    #[test]
    fn pipe_is_reserved_in_the_conservative_dialect() {
        use TokenKind::*;
        assert_eq!(kinds(Syntax::R5rs, "| a |"), vec![Reserved, Symbol, Reserved]);
        // a bare symbol cannot run into the reserved pipe
        fails(Syntax::R5rs, "|piped|");
    }

    #[test]
    fn reserved_characters_tokenize() {
        assert_eq!(kinds(Syntax::R7rsPartial, "["), vec![TokenKind::Reserved]);
        assert_eq!(kinds(Syntax::R5rs, "{"), vec![TokenKind::Reserved]);
    }

    #[test]
    fn lexical_error_carries_offset() {
        let err = Tokenizer::new(Syntax::R7rsPartial, Verbosity::Silent)
            .tokenize("abc #q")
            .unwrap_err();
        match err {
            crate::error::Error::NoRuleMatched { offset, .. } => assert_eq!(offset, 4),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
