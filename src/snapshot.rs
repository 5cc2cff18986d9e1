//! Lossless capture of a record as a JSON value, for merging a document
//! into it.
//!
//! `serde_json::to_value` writes NaN and infinities as `null`, which a float
//! field cannot read back. [`snapshot`] writes them as a one-entry marker
//! object instead, and [`restore`] turns each marker back into its float.
//! Everything else matches `serde_json`'s own value representation.

use serde::de::value::{MapAccessDeserializer, MapDeserializer, SeqDeserializer};
use serde::de::{DeserializeOwned, Deserializer, IntoDeserializer, Visitor};
use serde::ser::{self, Serialize};
use serde_json::{Map, Number, Value};

const NON_FINITE: &str = "$bindfig::non_finite";

/// Serialize `value`, keeping non-finite floats as markers.
pub fn snapshot<T: Serialize + ?Sized>(value: &T) -> Result<Value, serde_json::Error> {
    value.serialize(SnapshotSerializer)
}

/// Deserialize a value produced by [`snapshot`] (possibly merged with other
/// JSON), reading markers back as floats.
pub fn restore<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    T::deserialize(Restore(value))
}

fn marker(float: f64) -> Value {
    let text = if float.is_nan() {
        "NaN"
    } else if float.is_sign_positive() {
        "inf"
    } else {
        "-inf"
    };
    let mut map = Map::new();
    map.insert(NON_FINITE.to_string(), Value::String(text.to_string()));
    Value::Object(map)
}

fn marked_float(value: &Value) -> Option<f64> {
    let Value::Object(map) = value else {
        return None;
    };
    if map.len() != 1 {
        return None;
    }
    match map.get(NON_FINITE)?.as_str()? {
        "NaN" => Some(f64::NAN),
        "inf" => Some(f64::INFINITY),
        "-inf" => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

fn holds_marker(value: &Value) -> bool {
    match value {
        Value::Object(map) => marked_float(value).is_some() || map.values().any(holds_marker),
        Value::Array(items) => items.iter().any(holds_marker),
        _ => false,
    }
}

fn custom(msg: &str) -> serde_json::Error {
    <serde_json::Error as ser::Error>::custom(msg)
}

// --- Serializer ---

struct SnapshotSerializer;

impl ser::Serializer for SnapshotSerializer {
    type Ok = Value;
    type Error = serde_json::Error;
    type SerializeSeq = SeqSnapshot;
    type SerializeTuple = SeqSnapshot;
    type SerializeTupleStruct = SeqSnapshot;
    type SerializeTupleVariant = TupleVariantSnapshot;
    type SerializeMap = MapSnapshot;
    type SerializeStruct = MapSnapshot;
    type SerializeStructVariant = StructVariantSnapshot;

    fn serialize_bool(self, v: bool) -> Result<Value, Self::Error> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, Self::Error> {
        self.serialize_i64(v.into())
    }

    fn serialize_i16(self, v: i16) -> Result<Value, Self::Error> {
        self.serialize_i64(v.into())
    }

    fn serialize_i32(self, v: i32) -> Result<Value, Self::Error> {
        self.serialize_i64(v.into())
    }

    fn serialize_i64(self, v: i64) -> Result<Value, Self::Error> {
        Ok(Value::Number(v.into()))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, Self::Error> {
        self.serialize_u64(v.into())
    }

    fn serialize_u16(self, v: u16) -> Result<Value, Self::Error> {
        self.serialize_u64(v.into())
    }

    fn serialize_u32(self, v: u32) -> Result<Value, Self::Error> {
        self.serialize_u64(v.into())
    }

    fn serialize_u64(self, v: u64) -> Result<Value, Self::Error> {
        Ok(Value::Number(v.into()))
    }

    fn serialize_f32(self, v: f32) -> Result<Value, Self::Error> {
        self.serialize_f64(v.into())
    }

    fn serialize_f64(self, v: f64) -> Result<Value, Self::Error> {
        Ok(Number::from_f64(v).map_or_else(|| marker(v), Value::Number))
    }

    fn serialize_char(self, v: char) -> Result<Value, Self::Error> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, Self::Error> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, Self::Error> {
        Ok(Value::Array(v.iter().map(|b| Value::Number((*b).into())).collect()))
    }

    fn serialize_none(self) -> Result<Value, Self::Error> {
        Ok(Value::Null)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Value, Self::Error> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, Self::Error> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value, Self::Error> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<Value, Self::Error> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, Self::Error> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, Self::Error> {
        let mut map = Map::new();
        map.insert(variant.to_string(), snapshot(value)?);
        Ok(Value::Object(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqSnapshot, Self::Error> {
        Ok(SeqSnapshot {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqSnapshot, Self::Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SeqSnapshot, Self::Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<TupleVariantSnapshot, Self::Error> {
        Ok(TupleVariantSnapshot {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<MapSnapshot, Self::Error> {
        Ok(MapSnapshot {
            map: Map::new(),
            next_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<MapSnapshot, Self::Error> {
        self.serialize_map(None)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<StructVariantSnapshot, Self::Error> {
        Ok(StructVariantSnapshot {
            variant,
            map: Map::new(),
        })
    }
}

struct SeqSnapshot {
    items: Vec<Value>,
}

impl ser::SerializeSeq for SeqSnapshot {
    type Ok = Value;
    type Error = serde_json::Error;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        self.items.push(snapshot(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, Self::Error> {
        Ok(Value::Array(self.items))
    }
}

impl ser::SerializeTuple for SeqSnapshot {
    type Ok = Value;
    type Error = serde_json::Error;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, Self::Error> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SeqSnapshot {
    type Ok = Value;
    type Error = serde_json::Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, Self::Error> {
        ser::SerializeSeq::end(self)
    }
}

struct TupleVariantSnapshot {
    variant: &'static str,
    items: Vec<Value>,
}

impl ser::SerializeTupleVariant for TupleVariantSnapshot {
    type Ok = Value;
    type Error = serde_json::Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        self.items.push(snapshot(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, Self::Error> {
        let mut map = Map::new();
        map.insert(self.variant.to_string(), Value::Array(self.items));
        Ok(Value::Object(map))
    }
}

struct MapSnapshot {
    map: Map<String, Value>,
    next_key: Option<String>,
}

impl ser::SerializeMap for MapSnapshot {
    type Ok = Value;
    type Error = serde_json::Error;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), Self::Error> {
        let key = match snapshot(key)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return Err(custom("key must be a string")),
        };
        self.next_key = Some(key);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| custom("map value serialized before its key"))?;
        self.map.insert(key, snapshot(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, Self::Error> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for MapSnapshot {
    type Ok = Value;
    type Error = serde_json::Error;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        self.map.insert(key.to_string(), snapshot(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, Self::Error> {
        Ok(Value::Object(self.map))
    }
}

struct StructVariantSnapshot {
    variant: &'static str,
    map: Map<String, Value>,
}

impl ser::SerializeStructVariant for StructVariantSnapshot {
    type Ok = Value;
    type Error = serde_json::Error;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        self.map.insert(key.to_string(), snapshot(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, Self::Error> {
        let mut outer = Map::new();
        outer.insert(self.variant.to_string(), Value::Object(self.map));
        Ok(Value::Object(outer))
    }
}

// --- Deserializer ---

/// A JSON value that may contain non-finite float markers.
///
/// Subtrees without markers are handed straight to `serde_json`'s own
/// `Value` deserializer.
struct Restore(Value);

impl<'de> IntoDeserializer<'de, serde_json::Error> for Restore {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

fn entries(map: Map<String, Value>) -> impl Iterator<Item = (String, Restore)> {
    map.into_iter().map(|(key, value)| (key, Restore(value)))
}

impl<'de> Deserializer<'de> for Restore {
    type Error = serde_json::Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        if let Some(float) = marked_float(&self.0) {
            return visitor.visit_f64(float);
        }
        if !holds_marker(&self.0) {
            return self.0.deserialize_any(visitor);
        }
        match self.0 {
            Value::Object(map) => {
                let mut access: MapDeserializer<'_, _, serde_json::Error> =
                    MapDeserializer::new(entries(map));
                let value = visitor.visit_map(&mut access)?;
                access.end()?;
                Ok(value)
            }
            Value::Array(items) => {
                let mut access: SeqDeserializer<_, serde_json::Error> =
                    SeqDeserializer::new(items.into_iter().map(Restore));
                let value = visitor.visit_seq(&mut access)?;
                access.end()?;
                Ok(value)
            }
            other => other.deserialize_any(visitor),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.0 {
            Value::Null => visitor.visit_none(),
            value => visitor.visit_some(Restore(value)),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        if holds_marker(&self.0) {
            visitor.visit_newtype_struct(self)
        } else {
            self.0.deserialize_newtype_struct(name, visitor)
        }
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        match self.0 {
            Value::Object(map) if map.values().any(holds_marker) => {
                let access: MapDeserializer<'_, _, serde_json::Error> =
                    MapDeserializer::new(entries(map));
                visitor.visit_enum(MapAccessDeserializer::new(access))
            }
            other => other.deserialize_enum(name, variants, visitor),
        }
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::Server;
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Shape {
        Unit,
        Scaled(f64),
        Pair(f32, f32),
        Bounded { low: f64, high: f64 },
    }

    #[test]
    fn finite_values_match_serde_json() {
        let server = Server {
            port: 8080,
            hosts: vec!["a".into(), "b".into()],
        };
        assert_eq!(
            snapshot(&server).unwrap(),
            serde_json::to_value(&server).unwrap()
        );
        assert_eq!(
            snapshot(&Shape::Unit).unwrap(),
            serde_json::to_value(Shape::Unit).unwrap()
        );
    }

    #[test]
    fn non_finite_floats_survive() {
        let floats = vec![f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1.5];
        let restored: Vec<f64> = restore(snapshot(&floats).unwrap()).unwrap();
        assert!(restored[0].is_nan());
        assert_eq!(restored[1..], [f64::INFINITY, f64::NEG_INFINITY, 1.5]);

        let single: Option<f32> = restore(snapshot(&Some(f32::NEG_INFINITY)).unwrap()).unwrap();
        assert_eq!(single, Some(f32::NEG_INFINITY));
    }

    #[test]
    fn non_finite_floats_inside_enums_and_maps() {
        let shapes = vec![
            Shape::Scaled(f64::INFINITY),
            Shape::Pair(1.0, f32::NEG_INFINITY),
            Shape::Bounded {
                low: f64::NEG_INFINITY,
                high: 2.0,
            },
            Shape::Unit,
        ];
        let restored: Vec<Shape> = restore(snapshot(&shapes).unwrap()).unwrap();
        assert_eq!(restored, shapes);

        let mut limits = BTreeMap::new();
        limits.insert("max".to_string(), f64::INFINITY);
        limits.insert("min".to_string(), 0.0);
        let restored: BTreeMap<String, f64> = restore(snapshot(&limits).unwrap()).unwrap();
        assert_eq!(restored, limits);
    }

    #[test]
    fn none_stays_null() {
        assert_eq!(snapshot(&None::<f64>).unwrap(), Value::Null);
        let restored: Option<f64> = restore(Value::Null).unwrap();
        assert_eq!(restored, None);
    }

    #[test]
    fn non_string_map_keys_are_stringified() {
        let mut ports = BTreeMap::new();
        ports.insert(80u16, "http");
        let value = snapshot(&ports).unwrap();
        assert_eq!(value, serde_json::json!({"80": "http"}));
    }
}
