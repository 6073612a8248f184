//! Formatting tests: compact and pretty layouts, dialect capability checks,
//! and escaping.

use serde_sexp::{Error, Formatter, Sexp, Symbol, Syntax};

fn compact(syntax: Syntax, sexp: &Sexp) -> String {
    Formatter::new(syntax, false)
        .format(sexp)
        .unwrap_or_else(|e| panic!("{sexp:?} should format: {e}"))
}

fn pretty(sexp: &Sexp) -> String {
    Formatter::new(Syntax::R7rsPartial, true).format(sexp).unwrap()
}

fn fails(syntax: Syntax, sexp: &Sexp) {
    let result = Formatter::new(syntax, false).format(sexp);
    assert!(
        matches!(result, Err(Error::CannotRepresent { .. })),
        "{sexp:?} should not format under {syntax:?}"
    );
}

fn datum(input: &str) -> Sexp {
    input.parse().unwrap()
}

#[test]
fn leaves_render_compactly() {
    for syntax in [Syntax::R5rs, Syntax::R7rsPartial] {
        assert_eq!(compact(syntax, &Sexp::Boolean(true)), "#t");
        assert_eq!(compact(syntax, &Sexp::Boolean(false)), "#f");
        assert_eq!(compact(syntax, &Sexp::Null), "()");
        assert_eq!(compact(syntax, &Sexp::from(42)), "42");
        assert_eq!(compact(syntax, &Sexp::from(-1.5)), "-1.5");
        assert_eq!(compact(syntax, &Sexp::symbol("foo")), "foo");
        assert_eq!(compact(syntax, &Sexp::from("bar")), "\"bar\"");
    }
}

#[test]
fn floats_keep_their_point() {
    assert_eq!(compact(Syntax::R7rsPartial, &Sexp::from(1000.0)), "1000.0");
    assert_eq!(compact(Syntax::R7rsPartial, &Sexp::from(0.5)), "0.5");
    assert_eq!(compact(Syntax::R7rsPartial, &datum("1/2")), "1/2");
}

#[test]
fn character_spelling_prefers_names() {
    for syntax in [Syntax::R5rs, Syntax::R7rsPartial] {
        assert_eq!(compact(syntax, &Sexp::Character(' ')), "#\\space");
        assert_eq!(compact(syntax, &Sexp::Character('\n')), "#\\newline");
        assert_eq!(compact(syntax, &Sexp::Character('a')), "#\\a");
        assert_eq!(compact(syntax, &Sexp::Character('(')), "#\\(");
    }
    // named in the rich dialect, unnameable in the conservative one
    assert_eq!(compact(Syntax::R7rsPartial, &Sexp::Character('\u{7f}')), "#\\delete");
    fails(Syntax::R5rs, &Sexp::Character('\u{7f}'));
    // hex fallback for invisible characters without a name
    assert_eq!(compact(Syntax::R7rsPartial, &Sexp::Character('\u{9c}')), "#\\x9c");
    fails(Syntax::R5rs, &Sexp::Character('\u{9c}'));
}

#[test]
fn rich_only_values_fail_conservatively() {
    fails(Syntax::R5rs, &Sexp::Bytevector(vec![1, 2]));
    fails(Syntax::R5rs, &Sexp::from(f64::INFINITY));
    fails(Syntax::R5rs, &Sexp::from(f64::NEG_INFINITY));
    fails(Syntax::R5rs, &Sexp::from(f64::NAN));
    fails(Syntax::R5rs, &Sexp::symbol("two words"));

    assert_eq!(
        compact(Syntax::R7rsPartial, &Sexp::Bytevector(vec![1, 2])),
        "#u8(1 2)"
    );
    assert_eq!(compact(Syntax::R7rsPartial, &Sexp::from(f64::INFINITY)), "+inf.0");
    assert_eq!(compact(Syntax::R7rsPartial, &Sexp::from(f64::NAN)), "+nan.0");
}

#[test]
fn special_symbols_pipe_quote() {
    let spaced = Sexp::symbol("two words");
    assert_eq!(compact(Syntax::R7rsPartial, &spaced), "|two words|");
    let tricky = Sexp::Symbol(Symbol::new("pipe|and\\slash"));
    assert_eq!(
        compact(Syntax::R7rsPartial, &tricky),
        "|pipe\\|and\\\\slash|"
    );
    let control = Sexp::Symbol(Symbol::new("a\nb"));
    assert_eq!(compact(Syntax::R7rsPartial, &control), "|a\\nb|");
}

#[test]
fn string_escaping_differs_by_dialect() {
    let plain = Sexp::from("say \"hi\"\\");
    for syntax in [Syntax::R5rs, Syntax::R7rsPartial] {
        assert_eq!(compact(syntax, &plain), "\"say \\\"hi\\\"\\\\\"");
    }
    let control = Sexp::from("a\nb\u{7f}c");
    // the conservative dialect writes control characters literally
    assert_eq!(compact(Syntax::R5rs, &control), "\"a\nb\u{7f}c\"");
    // the rich dialect escapes them, mnemonic first, hex otherwise
    assert_eq!(compact(Syntax::R7rsPartial, &control), "\"a\\nb\\x7f;c\"");
}

#[test]
fn compact_lists_and_vectors() {
    assert_eq!(compact(Syntax::R5rs, &datum("(1 2 3)")), "(1 2 3)");
    assert_eq!(compact(Syntax::R5rs, &datum("(1 . 2)")), "(1 . 2)");
    assert_eq!(compact(Syntax::R5rs, &datum("(1 2 . 3)")), "(1 2 . 3)");
    assert_eq!(compact(Syntax::R5rs, &datum("#(1 #(2) ())")), "#(1 #(2) ())");
}

#[test]
fn pretty_keeps_simple_nodes_on_one_line() {
    // below the complexity threshold nothing breaks
    assert_eq!(pretty(&datum("(1 2 3 4)")), "(1 2 3 4)");
    assert_eq!(pretty(&datum("(1 . 2)")), "(1 . 2)");
    assert_eq!(pretty(&Sexp::Null), "()");
}

#[test]
fn pretty_breaks_heavy_lists() {
    assert_eq!(pretty(&datum("(1 2 3 4 5)")), "(1\n 2\n 3\n 4\n 5)");
    // nested simple nodes stay inline while the outer node breaks
    assert_eq!(
        pretty(&datum("((a . 1) (b . 2) (c . 3))")),
        "((a . 1)\n (b . 2)\n (c . 3))"
    );
}

#[test]
fn pretty_indents_to_the_opening_column() {
    let nested = datum("(outer (1 2 3 4 5))");
    assert_eq!(pretty(&nested), "(outer\n (1\n  2\n  3\n  4\n  5))");
}

#[test]
fn pretty_vectors_close_at_column_zero() {
    assert_eq!(
        pretty(&datum("#(1 2 3 4 5)")),
        "#(1\n  2\n  3\n  4\n  5\n)"
    );
    assert_eq!(pretty(&datum("#(1 2)")), "#(1 2)");
}

#[test]
fn dotted_tail_breaks_with_the_chain() {
    assert_eq!(
        pretty(&datum("(1 2 3 4 . 5)")),
        "(1\n 2\n 3\n 4 . 5)"
    );
}

#[test]
fn formatted_output_parses_back() {
    let inputs = [
        "(1 2 3 4 5)",
        "((a . 1) (b . 2))",
        "#(1 #\\a \"text\" |two words|)",
        "#u8(0 255)",
        "(+inf.0 -inf.0 +nan.0 1/2)",
    ];
    for input in inputs {
        let value = datum(input);
        for rendered in [
            compact(Syntax::R7rsPartial, &value),
            pretty(&value),
        ] {
            assert_eq!(rendered.parse::<Sexp>().unwrap(), value, "{input}");
        }
    }
}
