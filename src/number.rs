//! The numeric tower backing S-expression number values.
//!
//! Numbers come in three kinds:
//!
//! - [`Number::Integer`]: exact integers of arbitrary width
//! - [`Number::Rational`]: exact non-integer rationals, always reduced
//! - [`Number::Float`]: inexact reals, including infinities and NaN
//!
//! [`Number::parse`] understands the full literal grammar the tokenizer
//! accepts: radix prefixes (`#b`, `#o`, `#d`, `#h`), exactness prefixes
//! (`#e`, `#i`, in either order with the radix), rationals (`n/d`), decimal
//! floats with exponent suffixes, digit-grouping `#` suffixes (each stands
//! for an unknown digit, read as `0`, and makes the value inexact), and the
//! special reals `inf.0`/`nan.0`. Complex forms (`a+bi`, polar `a@b`) are
//! lexically valid but only convert when their imaginary part or angle is
//! exactly zero; there is no complex kind in the value tree.

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{FromPrimitive, Num, One, Signed, ToPrimitive, Zero};

/// An S-expression number: exact integer, exact rational, or inexact real.
#[derive(Debug, Clone)]
pub enum Number {
    Integer(BigInt),
    Rational(BigRational),
    Float(f64),
}

#[derive(Clone, Copy, PartialEq)]
enum Exactness {
    Exact,
    Inexact,
}

impl Number {
    /// Parses a number literal, returning `None` when the text is lexically
    /// plausible but has no value in the tower.
    pub fn parse(text: &str) -> Option<Number> {
        let lower = text.to_ascii_lowercase();
        let mut rest = lower.as_str();
        let mut radix: u32 = 10;
        let mut radix_seen = false;
        let mut exactness: Option<Exactness> = None;

        while let Some(tail) = rest.strip_prefix('#') {
            let mut it = tail.chars();
            let marker = it.next()?;
            match marker {
                'b' | 'o' | 'd' | 'h' if !radix_seen => {
                    radix = match marker {
                        'b' => 2,
                        'o' => 8,
                        'd' => 10,
                        _ => 16,
                    };
                    radix_seen = true;
                }
                'e' if exactness.is_none() => exactness = Some(Exactness::Exact),
                'i' if exactness.is_none() => exactness = Some(Exactness::Inexact),
                _ => return None,
            }
            rest = it.as_str();
        }

        if rest.is_empty() {
            return None;
        }

        // Rectangular complex: the body ends in `i` and holds a sign that
        // starts the imaginary part. Only a zero imaginary part converts.
        if let Some(body) = rest.strip_suffix('i') {
            if let Some(split) = imaginary_split(body, radix) {
                let real = parse_real(&body[..split], radix, exactness)?;
                let imag = parse_real(&body[split..], radix, exactness)
                    .or_else(|| unit_imaginary(&body[split..]))?;
                return if imag.is_zero() { Some(real) } else { None };
            }
            if body.starts_with(['+', '-']) {
                let imag = parse_real(body, radix, exactness).or_else(|| unit_imaginary(body))?;
                return if imag.is_zero() {
                    Some(Number::Integer(BigInt::zero()))
                } else {
                    None
                };
            }
            return None;
        }

        // Polar complex: only a zero angle converts.
        if let Some((mag, ang)) = rest.split_once('@') {
            let mag = parse_real(mag, radix, exactness)?;
            let ang = parse_real(ang, radix, exactness)?;
            return if ang.is_zero() { Some(mag) } else { None };
        }

        parse_real(rest, radix, exactness)
    }

    /// Whether the number is exact (integer or rational).
    pub fn is_exact(&self) -> bool {
        !matches!(self, Number::Float(_))
    }

    /// Whether the number has an integral value.
    ///
    /// Rationals are always reduced, so the rational kind is never integral;
    /// floats count when finite with a zero fraction.
    pub fn is_integer(&self) -> bool {
        match self {
            Number::Integer(_) => true,
            Number::Rational(_) => false,
            Number::Float(f) => f.is_finite() && f.fract() == 0.0,
        }
    }

    /// Whether the number is strictly negative.
    pub fn is_negative(&self) -> bool {
        match self {
            Number::Integer(i) => i.is_negative(),
            Number::Rational(r) => r.is_negative(),
            Number::Float(f) => *f < 0.0,
        }
    }

    /// Whether the number is an infinity.
    pub fn is_infinite(&self) -> bool {
        matches!(self, Number::Float(f) if f.is_infinite())
    }

    /// Whether the number is NaN.
    pub fn is_nan(&self) -> bool {
        matches!(self, Number::Float(f) if f.is_nan())
    }

    pub(crate) fn is_zero(&self) -> bool {
        match self {
            Number::Integer(i) => i.is_zero(),
            Number::Rational(r) => r.is_zero(),
            Number::Float(f) => *f == 0.0,
        }
    }

    /// The integral value of the number, when it has one.
    fn integral(&self) -> Option<BigInt> {
        match self {
            Number::Integer(i) => Some(i.clone()),
            Number::Rational(_) => None,
            Number::Float(f) if f.is_finite() && f.fract() == 0.0 => BigInt::from_f64(*f),
            Number::Float(_) => None,
        }
    }

    pub fn as_i8(&self) -> Option<i8> {
        self.integral()?.to_i8()
    }

    pub fn as_i16(&self) -> Option<i16> {
        self.integral()?.to_i16()
    }

    pub fn as_i32(&self) -> Option<i32> {
        self.integral()?.to_i32()
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.integral()?.to_i64()
    }

    pub fn as_i128(&self) -> Option<i128> {
        self.integral()?.to_i128()
    }

    pub fn as_u8(&self) -> Option<u8> {
        self.integral()?.to_u8()
    }

    pub fn as_u16(&self) -> Option<u16> {
        self.integral()?.to_u16()
    }

    pub fn as_u32(&self) -> Option<u32> {
        self.integral()?.to_u32()
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.integral()?.to_u64()
    }

    pub fn as_u128(&self) -> Option<u128> {
        self.integral()?.to_u128()
    }

    pub fn as_f32(&self) -> Option<f32> {
        self.as_f64().map(|f| f as f32)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Number::Integer(i) => i.to_f64(),
            Number::Rational(r) => r.to_f64(),
            Number::Float(f) => Some(*f),
        }
    }

    /// A short name for the kind, used in diagnostics.
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Number::Integer(_) => "integer",
            Number::Rational(_) => "rational",
            Number::Float(_) => "float",
        }
    }
}

/// Finds the byte index of the sign that begins the imaginary part of a
/// rectangular complex body, skipping signs that open the body or follow a
/// decimal exponent marker.
fn imaginary_split(body: &str, radix: u32) -> Option<usize> {
    let mut split = None;
    let mut prev = None;
    for (i, c) in body.char_indices() {
        if (c == '+' || c == '-') && i > 0 {
            let after_marker = radix == 10 && matches!(prev, Some('d' | 'e' | 'f' | 'l' | 's'));
            if !after_marker {
                split = Some(i);
            }
        }
        prev = Some(c);
    }
    split
}

/// A bare sign in imaginary position means magnitude one.
fn unit_imaginary(body: &str) -> Option<Number> {
    match body {
        "+" => Some(Number::Integer(BigInt::one())),
        "-" => Some(Number::Integer(-BigInt::one())),
        _ => None,
    }
}

fn parse_real(text: &str, radix: u32, exactness: Option<Exactness>) -> Option<Number> {
    let (sign, body) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => match text.strip_prefix('+') {
            Some(rest) => (1, rest),
            None => (0, text),
        },
    };

    // inf.0 and nan.0 always carry an explicit sign.
    if sign != 0 {
        if body == "inf.0" {
            return Some(Number::Float(f64::INFINITY * sign as f64));
        }
        if body == "nan.0" {
            return Some(Number::Float(f64::NAN));
        }
    }
    if body.is_empty() {
        return None;
    }

    let negative = sign < 0;

    if let Some((numer, denom)) = body.split_once('/') {
        let (numer, grouped_n) = parse_uinteger(numer, radix)?;
        let (denom, grouped_d) = parse_uinteger(denom, radix)?;
        if denom.is_zero() {
            return None;
        }
        let mut value = BigRational::new(numer, denom);
        if negative {
            value = -value;
        }
        let inexact = match exactness {
            Some(Exactness::Exact) => false,
            Some(Exactness::Inexact) => true,
            None => grouped_n || grouped_d,
        };
        return Some(if inexact {
            Number::Float(value.to_f64()?)
        } else {
            normalize_rational(value)
        });
    }

    let has_point = body.contains('.');
    let has_suffix = radix == 10 && body.contains(['d', 'e', 'f', 'l', 's']);
    if has_point || has_suffix {
        if radix != 10 {
            return None;
        }
        let normalized: String = body
            .chars()
            .map(|c| match c {
                '#' => '0',
                'd' | 'f' | 'l' | 's' => 'e',
                other => other,
            })
            .collect();
        let mut value: f64 = normalized.parse().ok()?;
        if negative {
            value = -value;
        }
        return Some(match exactness {
            Some(Exactness::Exact) => normalize_rational(BigRational::from_float(value)?),
            _ => Number::Float(value),
        });
    }

    let (mut value, grouped) = parse_uinteger(body, radix)?;
    if negative {
        value = -value;
    }
    let inexact = match exactness {
        Some(Exactness::Exact) => false,
        Some(Exactness::Inexact) => true,
        None => grouped,
    };
    Some(if inexact {
        Number::Float(value.to_f64()?)
    } else {
        Number::Integer(value)
    })
}

/// Parses digits in the given radix with optional trailing digit-grouping
/// markers. Returns the value and whether grouping made it inexact.
fn parse_uinteger(text: &str, radix: u32) -> Option<(BigInt, bool)> {
    let trimmed = text.trim_end_matches('#');
    if trimmed.is_empty() || trimmed.contains('#') {
        return None;
    }
    let grouped = trimmed.len() < text.len();
    let padded: String = text.chars().map(|c| if c == '#' { '0' } else { c }).collect();
    let value = BigInt::from_str_radix(&padded, radix).ok()?;
    Some((value, grouped))
}

fn normalize_rational(value: BigRational) -> Number {
    if value.is_integer() {
        Number::Integer(value.to_integer())
    } else {
        Number::Rational(value)
    }
}

impl PartialEq for Number {
    /// Numeric equality across kinds; NaN compares equal to itself.
    fn eq(&self, other: &Self) -> bool {
        use Number::*;
        match (self, other) {
            (Integer(a), Integer(b)) => a == b,
            (Rational(a), Rational(b)) => a == b,
            (Float(a), Float(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Integer(a), Rational(b)) | (Rational(b), Integer(a)) => {
                *b == BigRational::from(a.clone())
            }
            (Integer(a), Float(b)) | (Float(b), Integer(a)) => a.to_f64() == Some(*b),
            (Rational(a), Float(b)) | (Float(b), Rational(a)) => a.to_f64() == Some(*b),
        }
    }
}

impl fmt::Display for Number {
    /// Canonical rendering: exact values in decimal, floats in shortest
    /// round-trip form, special reals in their rich-dialect spelling.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Rational(r) => write!(f, "{}", r),
            Number::Float(v) if v.is_nan() => f.write_str("+nan.0"),
            Number::Float(v) if *v == f64::INFINITY => f.write_str("+inf.0"),
            Number::Float(v) if *v == f64::NEG_INFINITY => f.write_str("-inf.0"),
            Number::Float(v) => write!(f, "{:?}", v),
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::Integer(BigInt::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        Number::Integer(value)
    }
}

impl From<BigRational> for Number {
    fn from(value: BigRational) -> Self {
        normalize_rational(value)
    }
}
