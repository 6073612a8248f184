//! The decode half of the serde bridge.
//!
//! [`from_value`] walks a parsed [`Sexp`] tree and drives a serde visitor
//! over it; the `from_str` family in the crate root parses first and decodes
//! second. Decoding mirrors the encode conventions: lists and vectors decode
//! as sequences, association lists as maps and structs, symbols and strings
//! interchangeably as text, null as `None` or unit, and a single-entry
//! association as an enum variant with payload.
//!
//! Errors carry the dotted path of the failing value (`items[2].name`), built
//! up as the walk descends through keys and indices.
//!
//! ## Usage
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_sexp::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Package {
//!     version: u32,
//!     name: String,
//! }
//!
//! let package: Package = from_str("((version . 666) (name . foobar))").unwrap();
//! assert_eq!(package.version, 666);
//! assert_eq!(package.name, "foobar");
//! ```

use serde::de::{self, IntoDeserializer};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::value::Sexp;

/// Decodes a deserializable type from an S-expression tree.
pub fn from_value<'de, T>(value: Sexp) -> Result<T>
where
    T: Deserialize<'de>,
{
    T::deserialize(SexpDeserializer::new(value))
}

/// Deserializer walking a [`Sexp`] tree, carrying the dotted path to the
/// current value for diagnostics.
pub struct SexpDeserializer {
    value: Sexp,
    path: String,
}

impl SexpDeserializer {
    pub fn new(value: Sexp) -> Self {
        SexpDeserializer {
            value,
            path: String::new(),
        }
    }

    fn child(value: Sexp, path: String) -> Self {
        SexpDeserializer { value, path }
    }

    fn mismatch(&self, expected: &str) -> Error {
        Error::type_mismatch(&self.path, expected, self.value.kind_name())
    }
}

/// Typed integer accessors share one shape: the value must be a number with
/// an integral value in range.
macro_rules! deserialize_integer {
    ($method:ident, $visit:ident, $accessor:ident, $expected:expr) => {
        fn $method<V>(self, visitor: V) -> Result<V::Value>
        where
            V: de::Visitor<'de>,
        {
            let narrowed = self.value.as_number().and_then(|n| n.$accessor());
            match narrowed {
                Some(v) => visitor.$visit(v),
                None => Err(self.mismatch($expected)),
            }
        }
    };
}

impl<'de> de::Deserializer<'de> for SexpDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Sexp::Boolean(b) => visitor.visit_bool(b),
            Sexp::Bytevector(bytes) => visitor.visit_byte_buf(bytes),
            Sexp::Character(c) => visitor.visit_char(c),
            Sexp::Null => visitor.visit_unit(),
            Sexp::Number(ref number) => {
                // an inexact number stays a float even when it is whole
                if !number.is_exact() {
                    match number.as_f64() {
                        Some(v) => visitor.visit_f64(v),
                        None => Err(self.mismatch("representable number")),
                    }
                } else if let Some(v) = number.as_i64() {
                    visitor.visit_i64(v)
                } else if let Some(v) = number.as_u64() {
                    visitor.visit_u64(v)
                } else if let Some(v) = number.as_i128() {
                    visitor.visit_i128(v)
                } else if let Some(v) = number.as_u128() {
                    visitor.visit_u128(v)
                } else if let Some(v) = number.as_f64() {
                    visitor.visit_f64(v)
                } else {
                    Err(self.mismatch("representable number"))
                }
            }
            Sexp::String(text) => visitor.visit_string(text),
            Sexp::Symbol(symbol) => visitor.visit_string(symbol.as_str().to_string()),
            Sexp::Pair(_, _) => {
                // A proper list of dotted pairs with text keys reads as a
                // map; any other proper list reads as a sequence.
                if let Some(map) = self.value.dictionary_value() {
                    let path = self.path;
                    visitor.visit_map(MapDeserializer::new(map, path))
                } else if self.value.is_list() {
                    self.deserialize_seq(visitor)
                } else {
                    Err(self.mismatch("list or association list"))
                }
            }
            Sexp::Vector(_) => self.deserialize_seq(visitor),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value.as_bool() {
            Some(b) => visitor.visit_bool(b),
            None => Err(self.mismatch("boolean")),
        }
    }

    deserialize_integer!(deserialize_i8, visit_i8, as_i8, "i8");
    deserialize_integer!(deserialize_i16, visit_i16, as_i16, "i16");
    deserialize_integer!(deserialize_i32, visit_i32, as_i32, "i32");
    deserialize_integer!(deserialize_i64, visit_i64, as_i64, "i64");
    deserialize_integer!(deserialize_i128, visit_i128, as_i128, "i128");
    deserialize_integer!(deserialize_u8, visit_u8, as_u8, "u8");
    deserialize_integer!(deserialize_u16, visit_u16, as_u16, "u16");
    deserialize_integer!(deserialize_u32, visit_u32, as_u32, "u32");
    deserialize_integer!(deserialize_u64, visit_u64, as_u64, "u64");
    deserialize_integer!(deserialize_u128, visit_u128, as_u128, "u128");

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value.as_number().and_then(|n| n.as_f32()) {
            Some(v) => visitor.visit_f32(v),
            None => Err(self.mismatch("f32")),
        }
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value.as_number().and_then(|n| n.as_f64()) {
            Some(v) => visitor.visit_f64(v),
            None => Err(self.mismatch("f64")),
        }
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value.as_char() {
            Some(c) => visitor.visit_char(c),
            None => Err(self.mismatch("character")),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Sexp::String(text) => visitor.visit_string(text),
            Sexp::Symbol(symbol) => visitor.visit_string(symbol.as_str().to_string()),
            _ => Err(self.mismatch("string or symbol")),
        }
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_byte_buf(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Sexp::Bytevector(bytes) => visitor.visit_byte_buf(bytes),
            _ => Err(self.mismatch("bytevector")),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Sexp::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Sexp::Null => visitor.visit_unit(),
            _ => Err(self.mismatch("null")),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let mismatch = self.mismatch("list or vector");
        let path = self.path;
        match self.value.into_array() {
            Some(elements) => visitor.visit_seq(SeqDeserializer::new(elements, path)),
            None => Err(mismatch),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let mismatch = self.mismatch("association list");
        let path = self.path;
        match self.value.into_dictionary() {
            Some(map) => visitor.visit_map(MapDeserializer::new(map, path)),
            None => Err(mismatch),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Sexp::Symbol(ref symbol) => visitor.visit_enum(EnumDeserializer {
                variant: symbol.as_str().to_string(),
                value: None,
                path: self.path,
            }),
            Sexp::String(text) => visitor.visit_enum(EnumDeserializer {
                variant: text,
                value: None,
                path: self.path,
            }),
            Sexp::Pair(_, _) => {
                let mismatch = self.mismatch("single-entry association");
                let path = self.path;
                let map = match self.value.into_dictionary() {
                    Some(map) if map.len() == 1 => map,
                    _ => return Err(mismatch),
                };
                let Some((variant, value)) = map.into_iter().next() else {
                    return Err(mismatch);
                };
                visitor.visit_enum(EnumDeserializer {
                    variant,
                    value: Some(value),
                    path,
                })
            }
            _ => Err(self.mismatch("variant symbol or single-entry association")),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Sexp>,
    path: String,
    index: usize,
}

impl SeqDeserializer {
    fn new(elements: Vec<Sexp>, path: String) -> Self {
        SeqDeserializer {
            iter: elements.into_iter(),
            path,
            index: 0,
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        let Some(element) = self.iter.next() else {
            return Ok(None);
        };
        let path = format!("{}[{}]", self.path, self.index);
        self.index += 1;
        seed.deserialize(SexpDeserializer::child(element, path))
            .map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Sexp>,
    entry: Option<(String, Sexp)>,
    path: String,
}

impl MapDeserializer {
    fn new(map: crate::map::SexpMap, path: String) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            entry: None,
            path,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        let Some((key, value)) = self.iter.next() else {
            return Ok(None);
        };
        let result = seed.deserialize(key.clone().into_deserializer())?;
        self.entry = Some((key, value));
        Ok(Some(result))
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        let (key, value) = self
            .entry
            .take()
            .ok_or_else(|| Error::custom("map value requested before key"))?;
        let path = if self.path.is_empty() {
            key
        } else {
            format!("{}.{}", self.path, key)
        };
        seed.deserialize(SexpDeserializer::child(value, path))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Sexp>,
    path: String,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let path = if self.path.is_empty() {
            self.variant.clone()
        } else {
            format!("{}.{}", self.path, self.variant)
        };
        let variant = seed.deserialize(self.variant.into_deserializer())?;
        Ok((
            variant,
            VariantDeserializer {
                value: self.value,
                path,
            },
        ))
    }
}

struct VariantDeserializer {
    value: Option<Sexp>,
    path: String,
}

impl VariantDeserializer {
    fn payload(self, expected: &str) -> Result<SexpDeserializer> {
        match self.value {
            Some(value) => Ok(SexpDeserializer::child(value, self.path)),
            None => Err(Error::type_mismatch(&self.path, expected, "unit variant")),
        }
    }
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            None => Ok(()),
            Some(value) => Err(Error::type_mismatch(
                &self.path,
                "unit variant",
                value.kind_name(),
            )),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(self.payload("newtype variant payload")?)
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(self.payload("tuple variant payload")?, visitor)
    }

    fn struct_variant<V>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_map(self.payload("struct variant payload")?, visitor)
    }
}
