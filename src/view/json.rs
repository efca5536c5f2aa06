use std::fmt;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Number, Value as JsonValue};

use super::Value;
use crate::types::Kind;

impl Value<'_> {
    /// Copies this subtree into an owned `serde_json::Value`. Repeated object keys
    /// keep their first value, matching lookup semantics.
    pub fn to_json(&self) -> JsonValue {
        match self.kind() {
            Kind::Null => JsonValue::Null,
            Kind::Bool => JsonValue::Bool(self.as_bool().unwrap_or_default()),
            Kind::Int => self.as_i64().map_or(JsonValue::Null, JsonValue::from),
            Kind::Float => self
                .as_f64()
                .ok()
                .and_then(Number::from_f64)
                .map_or(JsonValue::Null, JsonValue::Number),
            Kind::String => JsonValue::String(self.as_str().unwrap_or_default().to_string()),
            Kind::Array => match self.as_array() {
                Ok(array) => JsonValue::Array(array.iter().map(|item| item.to_json()).collect()),
                Err(_) => JsonValue::Null,
            },
            Kind::Object => match self.as_object() {
                Ok(object) => {
                    let mut map = Map::with_capacity(object.len());
                    for (key, value) in object.iter() {
                        map.entry(key).or_insert_with(|| value.to_json());
                    }
                    JsonValue::Object(map)
                }
                Err(_) => JsonValue::Null,
            },
        }
    }
}

/// Writes every member, repeated keys included, in document order.
impl Serialize for Value<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::Error as _;

        match self.kind() {
            Kind::Null => serializer.serialize_unit(),
            Kind::Bool => serializer.serialize_bool(self.as_bool().map_err(S::Error::custom)?),
            Kind::Int => serializer.serialize_i64(self.as_i64().map_err(S::Error::custom)?),
            Kind::Float => serializer.serialize_f64(self.as_f64().map_err(S::Error::custom)?),
            Kind::String => serializer.serialize_str(self.as_str().map_err(S::Error::custom)?),
            Kind::Array => {
                let array = self.as_array().map_err(S::Error::custom)?;
                let mut seq = serializer.serialize_seq(Some(array.len()))?;
                for item in array.iter() {
                    seq.serialize_element(&item)?;
                }
                seq.end()
            }
            Kind::Object => {
                let object = self.as_object().map_err(S::Error::custom)?;
                let mut map = serializer.serialize_map(Some(object.len()))?;
                for (key, value) in object.iter() {
                    map.serialize_entry(key, &value)?;
                }
                map.end()
            }
        }
    }
}

/// Compact JSON.
impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

/// Same rules as `Value == Value`: an `Int` equals a serde_json integer that fits
/// `i64`; a `Float` equals a serde_json float or an unsigned integer beyond `i64`.
impl PartialEq<JsonValue> for Value<'_> {
    fn eq(&self, other: &JsonValue) -> bool {
        match (self.kind(), other) {
            (Kind::Null, JsonValue::Null) => true,
            (Kind::Bool, JsonValue::Bool(expected)) => self.as_bool().ok() == Some(*expected),
            (Kind::Int, JsonValue::Number(number)) => {
                !number.is_f64() && number.as_i64().is_some() && self.as_i64().ok() == number.as_i64()
            }
            (Kind::Float, JsonValue::Number(number)) => {
                let classified_as_float = number.is_f64() || number.as_i64().is_none();
                classified_as_float && self.as_f64().ok() == number.as_f64()
            }
            (Kind::String, JsonValue::String(expected)) => {
                self.as_str().ok() == Some(expected.as_str())
            }
            (Kind::Array, JsonValue::Array(expected)) => match self.as_array() {
                Ok(array) => {
                    array.len() == expected.len()
                        && array.iter().zip(expected).all(|(item, json)| item == *json)
                }
                Err(_) => false,
            },
            (Kind::Object, JsonValue::Object(expected)) => match self.as_object() {
                Ok(object) => {
                    let distinct = object
                        .iter()
                        .enumerate()
                        .filter(|(position, (key, _))| {
                            !object.keys().take(*position).any(|earlier| earlier == *key)
                        })
                        .count();
                    distinct == expected.len()
                        && expected.iter().all(|(key, json)| {
                            object.get(key).is_some_and(|value| value == *json)
                        })
                }
                Err(_) => false,
            },
            _ => false,
        }
    }
}

impl PartialEq<Value<'_>> for JsonValue {
    fn eq(&self, other: &Value<'_>) -> bool {
        other == self
    }
}
