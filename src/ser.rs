//! The encode half of the serde bridge.
//!
//! [`to_value`] turns any `Serialize` type into a [`Sexp`] tree; the
//! `to_string` family in the crate root renders that tree through the
//! formatter. The mapping follows the association-list convention:
//!
//! - integers, floats, booleans, and characters map onto their value kinds
//! - a string becomes a symbol when its text reads as a bare symbol, and a
//!   string value otherwise
//! - byte slices become bytevectors
//! - `None`, unit, and unit structs become null
//! - sequences and tuples become proper lists
//! - maps and structs become association lists of `(key . value)` pairs in
//!   field order; keys must serialize as strings or symbols
//! - an enum variant with a payload becomes a single-entry association
//!   `((variant . payload))`; a unit variant is just its name
//!
//! ## Usage
//!
//! ```rust
//! use serde::Serialize;
//! use serde_sexp::to_string;
//!
//! #[derive(Serialize)]
//! struct Package {
//!     version: u32,
//!     name: String,
//! }
//!
//! let package = Package { version: 666, name: "foobar".to_string() };
//! assert_eq!(
//!     to_string(&package).unwrap(),
//!     "((version . 666) (name . foobar))"
//! );
//! ```

use serde::{ser, Serialize};

use crate::error::{Error, Result};
use crate::number::Number;
use crate::value::{Sexp, Symbol};

/// Converts a serializable value into an S-expression tree.
pub fn to_value<T>(value: &T) -> Result<Sexp>
where
    T: Serialize + ?Sized,
{
    value.serialize(SexpSerializer)
}

/// Serializer producing [`Sexp`] values.
pub struct SexpSerializer;

/// A string encodes as a symbol when its text reads as a bare symbol, and as
/// a string value otherwise.
fn stringish(text: &str) -> Sexp {
    if Symbol::is_special_text(text) {
        Sexp::String(text.to_string())
    } else {
        Sexp::symbol(text)
    }
}

/// Wraps a variant payload as a single-entry association.
fn variant_entry(variant: &str, payload: Sexp) -> Sexp {
    Sexp::list([Sexp::pair(stringish(variant), payload)])
}

/// Builds an association list from `(key . value)` entries in call order.
fn association<I>(entries: I) -> Sexp
where
    I: IntoIterator<Item = (String, Sexp)>,
    I::IntoIter: DoubleEndedIterator,
{
    Sexp::list(
        entries
            .into_iter()
            .map(|(key, value)| Sexp::pair(stringish(&key), value)),
    )
}

impl ser::Serializer for SexpSerializer {
    type Ok = Sexp;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Sexp> {
        Ok(Sexp::Boolean(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Sexp> {
        Ok(Sexp::Number(Number::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Sexp> {
        Ok(Sexp::Number(Number::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Sexp> {
        Ok(Sexp::Number(Number::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Sexp> {
        Ok(Sexp::Number(Number::from(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<Sexp> {
        Ok(Sexp::Number(Number::from(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Sexp> {
        Ok(Sexp::Number(Number::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Sexp> {
        Ok(Sexp::Number(Number::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Sexp> {
        Ok(Sexp::Number(Number::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Sexp> {
        Ok(Sexp::Number(Number::from(v)))
    }

    fn serialize_u128(self, v: u128) -> Result<Sexp> {
        Ok(Sexp::Number(Number::from(v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Sexp> {
        Ok(Sexp::Number(Number::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Sexp> {
        Ok(Sexp::Number(Number::from(v)))
    }

    fn serialize_char(self, v: char) -> Result<Sexp> {
        Ok(Sexp::Character(v))
    }

    fn serialize_str(self, v: &str) -> Result<Sexp> {
        Ok(stringish(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Sexp> {
        Ok(Sexp::Bytevector(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Sexp> {
        Ok(Sexp::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Sexp>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Sexp> {
        Ok(Sexp::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Sexp> {
        Ok(Sexp::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Sexp> {
        Ok(stringish(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Sexp>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Sexp>
    where
        T: Serialize + ?Sized,
    {
        Ok(variant_entry(variant, value.serialize(SexpSerializer)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(SerializeMap {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            current_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            entries: Vec::with_capacity(len),
        })
    }
}

/// Sequence builder shared by seqs, tuples, and tuple structs.
pub struct SerializeVec {
    vec: Vec<Sexp>,
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Sexp;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.vec.push(value.serialize(SexpSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Sexp> {
        Ok(Sexp::list(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Sexp;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Sexp> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Sexp;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Sexp> {
        ser::SerializeSeq::end(self)
    }
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    vec: Vec<Sexp>,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Sexp;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.vec.push(value.serialize(SexpSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Sexp> {
        Ok(variant_entry(self.variant, Sexp::list(self.vec)))
    }
}

/// Association builder shared by maps and structs. Entries keep call order;
/// duplicate keys are kept as-is, matching the duplicate tolerance of the
/// dictionary projection on the decode side.
pub struct SerializeMap {
    entries: Vec<(String, Sexp)>,
    current_key: Option<String>,
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Sexp;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.current_key = Some(key_text(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::InvalidValue("map value without a key".to_string()))?;
        self.entries.push((key, value.serialize(SexpSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Sexp> {
        Ok(association(self.entries))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Sexp;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.entries
            .push((key.to_string(), value.serialize(SexpSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Sexp> {
        Ok(association(self.entries))
    }
}

pub struct SerializeStructVariant {
    variant: &'static str,
    entries: Vec<(String, Sexp)>,
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Sexp;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.entries
            .push((key.to_string(), value.serialize(SexpSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Sexp> {
        Ok(variant_entry(self.variant, association(self.entries)))
    }
}

/// A map key must serialize as a string or a symbol.
fn key_text<T>(key: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    match key.serialize(SexpSerializer)? {
        Sexp::String(text) => Ok(text),
        Sexp::Symbol(symbol) => Ok(symbol.as_str().to_string()),
        other => Err(Error::InvalidValue(format!(
            "map keys must be strings or symbols, got {}",
            other.kind_name()
        ))),
    }
}
