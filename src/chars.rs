//! Character classification shared by the tokenizer, parser, and formatter.
//!
//! All predicates here are pure functions over `char`; the tokenizer and the
//! formatter must agree on them, so this module is the single source of
//! truth for delimiters, symbol shapes, escape mnemonics, and character
//! names.

use crate::options::Syntax;

/// Inter-token whitespace.
pub(crate) fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Characters that may legally follow a complete token.
///
/// The rich dialect additionally treats `|` as a delimiter because it opens
/// a pipe-quoted symbol.
pub(crate) fn is_delimiter(c: char, syntax: Syntax) -> bool {
    if is_whitespace(c) || matches!(c, ';' | '"' | '(' | ')') {
        return true;
    }
    syntax == Syntax::R7rsPartial && c == '|'
}

/// Characters that may begin a number literal (after any `#` prefixes).
pub(crate) fn is_number_head(c: char) -> bool {
    c.is_ascii_digit() || c == '-' || c == '+'
}

/// Characters that may continue a number literal.
///
/// This is the coarse continuation set; the tokenizer's number rule applies
/// the actual grammar on top of it.
#[allow(dead_code)]
pub(crate) fn is_number_tail(c: char) -> bool {
    is_number_head(c) || matches!(c, '.' | '@' | '/' | 'e' | 'E' | 'i' | 'I')
}

/// Characters that may begin a bare symbol.
pub(crate) fn is_symbol_head(c: char) -> bool {
    c.is_ascii_alphabetic()
        || matches!(
            c,
            '_' | ':' | '!' | '?' | '*' | '/' | '&' | '%' | '^' | '<' | '=' | '>' | '~' | '$'
        )
}

/// Characters that may continue a bare symbol.
///
/// Narrower than what the tokenizer's bare-symbol rule accepts (`@` is
/// missing here); a lexed symbol whose text fails this classification is a
/// special symbol and the matcher rejects it.
pub(crate) fn is_symbol_tail(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '-' | '.' | '+') || is_symbol_head(c)
}

/// Whether a character may be emitted literally by the formatter.
///
/// Excludes the C0 and C1 control ranges, DEL, and U+034F (combining
/// grapheme joiner).
pub(crate) fn is_visible(c: char) -> bool {
    let v = c as u32;
    !(v < 0x20 || v == 0x7f || (0x80..=0x9f).contains(&v) || v == 0x034f)
}

/// The mnemonic letter for a control character escape, if one exists.
pub(crate) fn mnemonic_escape(c: char) -> Option<char> {
    match c {
        '\u{07}' => Some('a'),
        '\u{08}' => Some('b'),
        '\t' => Some('t'),
        '\n' => Some('n'),
        '\r' => Some('r'),
        _ => None,
    }
}

/// The control character named by a mnemonic escape letter.
pub(crate) fn mnemonic_char(letter: char) -> Option<char> {
    match letter.to_ascii_lowercase() {
        'a' => Some('\u{07}'),
        'b' => Some('\u{08}'),
        't' => Some('\t'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        _ => None,
    }
}

const NAMED_CHARS: &[(&str, char)] = &[
    ("alarm", '\u{07}'),
    ("backspace", '\u{08}'),
    ("delete", '\u{7f}'),
    ("escape", '\u{1b}'),
    ("newline", '\n'),
    ("null", '\u{00}'),
    ("return", '\r'),
    ("space", ' '),
    ("tab", '\t'),
];

fn name_in_dialect(name: &str, syntax: Syntax) -> bool {
    match syntax {
        Syntax::R5rs => matches!(name, "newline" | "space"),
        Syntax::R7rsPartial => true,
    }
}

/// The character names a dialect recognizes.
pub(crate) fn char_names(syntax: Syntax) -> impl Iterator<Item = &'static str> {
    NAMED_CHARS
        .iter()
        .filter(move |(name, _)| name_in_dialect(name, syntax))
        .map(|(name, _)| *name)
}

/// The dialect's name for a character, if it has one.
pub(crate) fn char_name(c: char, syntax: Syntax) -> Option<&'static str> {
    NAMED_CHARS
        .iter()
        .find(|(name, ch)| *ch == c && name_in_dialect(name, syntax))
        .map(|(name, _)| *name)
}

/// The character a dialect name refers to, if the dialect knows the name.
pub(crate) fn named_char(name: &str, syntax: Syntax) -> Option<char> {
    let lower = name.to_ascii_lowercase();
    NAMED_CHARS
        .iter()
        .find(|(n, _)| *n == lower && name_in_dialect(n, syntax))
        .map(|(_, c)| *c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiters_differ_by_dialect() {
        assert!(is_delimiter('|', Syntax::R7rsPartial));
        assert!(!is_delimiter('|', Syntax::R5rs));
        for c in [' ', '\t', '\r', '\n', ';', '"', '(', ')'] {
            assert!(is_delimiter(c, Syntax::R5rs));
            assert!(is_delimiter(c, Syntax::R7rsPartial));
        }
    }

    #[test]
    fn number_heads_and_tails() {
        assert!(is_number_head('0'));
        assert!(is_number_head('-'));
        assert!(!is_number_head('.'));
        assert!(is_number_tail('.'));
        assert!(is_number_tail('@'));
        assert!(is_number_tail('/'));
        assert!(!is_number_tail('x'));
    }

    #[test]
    fn symbol_tail_excludes_at_sign() {
        assert!(is_symbol_head('a'));
        assert!(is_symbol_tail('9'));
        assert!(is_symbol_tail('.'));
        assert!(!is_symbol_tail('@'));
        assert!(!is_symbol_head('-'));
        assert!(is_symbol_tail('-'));
    }

    #[test]
    fn visibility_excludes_control_ranges() {
        assert!(is_visible('a'));
        assert!(is_visible(' '));
        assert!(is_visible('~'));
        assert!(!is_visible('\n'));
        assert!(!is_visible('\u{7f}'));
        assert!(!is_visible('\u{85}'));
        assert!(!is_visible('\u{034f}'));
        assert!(is_visible('\u{e9}'));
    }

    #[test]
    fn char_names_differ_by_dialect() {
        assert_eq!(char_name('\n', Syntax::R5rs), Some("newline"));
        assert_eq!(char_name('\u{07}', Syntax::R5rs), None);
        assert_eq!(char_name('\u{07}', Syntax::R7rsPartial), Some("alarm"));
        assert_eq!(named_char("DELETE", Syntax::R7rsPartial), Some('\u{7f}'));
        assert_eq!(named_char("delete", Syntax::R5rs), None);
    }
}
