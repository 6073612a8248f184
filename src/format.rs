//! The dialect-aware formatter.
//!
//! Formatting is canonicalizing: numbers are rendered from their values,
//! redundant digit-grouping markers and case variations are not reproduced.
//! It is also capability-checked: a value whose spelling needs a rich-only
//! lexical form (bytevectors, infinities, NaN, hex character escapes, piped
//! symbols) fails with [`Error::CannotRepresent`] under the conservative
//! dialect. The rich dialect can spell every value.
//!
//! Pretty-printing keys off a per-node complexity count: null weighs 0, any
//! leaf 1, and a composite the sum of its children. A node under 5 renders
//! on one line; anything heavier puts each element on its own line, aligned
//! to the column after the opening delimiter.

use crate::chars;
use crate::error::{Error, Result};
use crate::number::Number;
use crate::options::Syntax;
use crate::value::{Sexp, Symbol};

/// Renders values as text in one dialect.
pub struct Formatter {
    syntax: Syntax,
    pretty: bool,
}

/// Per-call emit state: the work buffer and the current column.
struct Context {
    position: usize,
    out: String,
}

impl Context {
    fn emit(&mut self, text: &str) {
        self.out.push_str(text);
        self.position += text.chars().count();
    }

    fn emit_char(&mut self, c: char) {
        self.out.push(c);
        self.position += 1;
    }

    fn emitln(&mut self) {
        self.out.push('\n');
        self.position = 0;
    }

    fn indent_to(&mut self, pos: usize) {
        while self.position < pos {
            self.emit_char(' ');
        }
    }
}

impl Formatter {
    pub fn new(syntax: Syntax, pretty: bool) -> Self {
        Formatter { syntax, pretty }
    }

    /// Renders one value, or fails when the dialect cannot spell it.
    pub fn format(&self, sexp: &Sexp) -> Result<String> {
        let mut ctx = Context {
            position: 0,
            out: String::new(),
        };
        self.format_datum(&mut ctx, sexp)?;
        Ok(ctx.out)
    }

    fn format_datum(&self, ctx: &mut Context, sexp: &Sexp) -> Result<()> {
        let simple = !self.pretty || complexity(sexp) < 5;

        match sexp {
            Sexp::Boolean(value) => {
                ctx.emit(if *value { "#t" } else { "#f" });
                Ok(())
            }
            Sexp::Bytevector(bytes) => self.format_bytevector(ctx, sexp, bytes),
            Sexp::Character(c) => self.format_character(ctx, *c),
            Sexp::Null => {
                ctx.emit("()");
                Ok(())
            }
            Sexp::Number(number) => self.format_number(ctx, number),
            Sexp::Pair(head, tail) => self.format_pair(ctx, head, tail, simple),
            Sexp::String(text) => self.format_string(ctx, text),
            Sexp::Symbol(symbol) => self.format_symbol(ctx, symbol),
            Sexp::Vector(elements) => self.format_vector(ctx, elements, simple),
        }
    }

    fn format_bytevector(&self, ctx: &mut Context, sexp: &Sexp, bytes: &[u8]) -> Result<()> {
        if self.syntax != Syntax::R7rsPartial {
            return Err(Error::cannot_represent(sexp, self.syntax));
        }
        ctx.emit("#u8(");
        for (i, byte) in bytes.iter().enumerate() {
            if i > 0 {
                ctx.emit_char(' ');
            }
            ctx.emit(&byte.to_string());
        }
        ctx.emit_char(')');
        Ok(())
    }

    fn format_character(&self, ctx: &mut Context, c: char) -> Result<()> {
        let spelled = if let Some(name) = chars::char_name(c, self.syntax) {
            name.to_string()
        } else if chars::is_visible(c) {
            c.to_string()
        } else if self.syntax == Syntax::R7rsPartial {
            format!("x{:x}", c as u32)
        } else {
            return Err(Error::cannot_represent(Sexp::Character(c), self.syntax));
        };
        ctx.emit("#\\");
        ctx.emit(&spelled);
        Ok(())
    }

    fn format_number(&self, ctx: &mut Context, number: &Number) -> Result<()> {
        if (number.is_infinite() || number.is_nan()) && self.syntax != Syntax::R7rsPartial {
            return Err(Error::cannot_represent(number, self.syntax));
        }
        ctx.emit(&number.to_string());
        Ok(())
    }

    /// Renders a pair chain iteratively; a dotted tail ends the chain with
    /// ` . tail`.
    fn format_pair(&self, ctx: &mut Context, head: &Sexp, tail: &Sexp, simple: bool) -> Result<()> {
        ctx.emit_char('(');
        let pos = ctx.position;

        let mut head = head;
        let mut tail = tail;
        loop {
            if !simple {
                ctx.indent_to(pos);
            }
            self.format_datum(ctx, head)?;

            match tail {
                Sexp::Null => {
                    ctx.emit_char(')');
                }
                Sexp::Pair(next_head, next_tail) => {
                    if simple {
                        ctx.emit_char(' ');
                    } else {
                        ctx.emitln();
                    }
                    head = next_head;
                    tail = next_tail;
                    continue;
                }
                other => {
                    ctx.emit(" . ");
                    self.format_datum(ctx, other)?;
                    ctx.emit_char(')');
                }
            }
            break;
        }
        Ok(())
    }

    fn format_string(&self, ctx: &mut Context, text: &str) -> Result<()> {
        ctx.emit_char('"');
        for c in text.chars() {
            match c {
                '"' => ctx.emit("\\\""),
                '\\' => ctx.emit("\\\\"),
                _ if self.syntax == Syntax::R5rs || chars::is_visible(c) => ctx.emit_char(c),
                _ => emit_escaped(ctx, c),
            }
        }
        ctx.emit_char('"');
        Ok(())
    }

    fn format_symbol(&self, ctx: &mut Context, symbol: &Symbol) -> Result<()> {
        if !symbol.is_special() {
            ctx.emit(symbol.as_str());
            return Ok(());
        }
        if self.syntax != Syntax::R7rsPartial {
            return Err(Error::cannot_represent(symbol, self.syntax));
        }
        ctx.emit_char('|');
        for c in symbol.as_str().chars() {
            match c {
                '|' => ctx.emit("\\|"),
                '\\' => ctx.emit("\\\\"),
                _ if chars::is_visible(c) => ctx.emit_char(c),
                _ => emit_escaped(ctx, c),
            }
        }
        ctx.emit_char('|');
        Ok(())
    }

    fn format_vector(&self, ctx: &mut Context, elements: &[Sexp], simple: bool) -> Result<()> {
        ctx.emit("#(");
        let pos = ctx.position;

        let mut first_done = false;
        for element in elements {
            if !simple {
                ctx.indent_to(pos);
            } else if first_done {
                ctx.emit_char(' ');
            }
            self.format_datum(ctx, element)?;
            if !simple {
                ctx.emitln();
            }
            first_done = true;
        }
        ctx.emit_char(')');
        Ok(())
    }
}

/// A non-visible character inside a string or piped symbol: mnemonic escape
/// when one exists, inline hex escape otherwise.
fn emit_escaped(ctx: &mut Context, c: char) {
    if let Some(mnemonic) = chars::mnemonic_escape(c) {
        ctx.emit_char('\\');
        ctx.emit_char(mnemonic);
    } else {
        ctx.emit(&format!("\\x{:x};", c as u32));
    }
}

fn complexity(sexp: &Sexp) -> usize {
    match sexp {
        Sexp::Null => 0,
        Sexp::Pair(head, tail) => complexity(head) + complexity(tail),
        Sexp::Vector(elements) => elements.iter().map(complexity).sum(),
        _ => 1,
    }
}
