//! Payload values produced by the generator.
//!
//! A `Payload` is a schema-free tree. It carries no reference to the schema
//! it was generated from and serializes directly to JSON.

use base64::Engine;
use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Key of the marker payload emitted when a mutation cannot be performed.
pub const INVALID_MARKER: &str = "_is_invalid";

/// Key of the marker payload emitted when no valid payload could be generated.
pub const FAILED_MARKER: &str = "_failed";

/// Dynamically typed payload tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Null value
    Null,

    /// Boolean value
    Bool(bool),

    /// Integer value (covers both `int` and `long`)
    Int(i64),

    /// Floating point value (covers both `float` and `double`)
    Float(f64),

    /// String value
    String(String),

    /// Binary data, base64 encoded on the wire
    Bytes(Vec<u8>),

    /// Ordered sequence of values
    Array(Vec<Payload>),

    /// String-keyed mapping, insertion ordered
    Map(IndexMap<String, Payload>),
}

impl Payload {
    /// The `{"_is_invalid": true}` marker.
    pub fn invalid_sentinel() -> Self {
        Self::marker(INVALID_MARKER)
    }

    /// The `{"_failed": true}` marker.
    pub fn failed_sentinel() -> Self {
        Self::marker(FAILED_MARKER)
    }

    fn marker(key: &str) -> Self {
        let mut map = IndexMap::with_capacity(1);
        map.insert(key.to_string(), Self::Bool(true));
        Self::Map(map)
    }

    /// Check if this is the `{"_is_invalid": true}` marker.
    pub fn is_invalid_sentinel(&self) -> bool {
        *self == Self::invalid_sentinel()
    }

    /// Check if this is the `{"_failed": true}` marker.
    pub fn is_failed_sentinel(&self) -> bool {
        *self == Self::failed_sentinel()
    }

    /// Build a mapping from `(key, value)` pairs, keeping their order.
    pub fn map_from<K: Into<String>>(entries: impl IntoIterator<Item = (K, Payload)>) -> Self {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a sequence.
    pub fn as_array(&self) -> Option<&[Payload]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get this value as a mapping.
    pub fn as_map(&self) -> Option<&IndexMap<String, Payload>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key when this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&Payload> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Short name of the value's shape, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
        }
    }

    /// Convert to a `serde_json::Value`.
    ///
    /// Bytes become standard base64 strings. Non-finite floats have no JSON
    /// representation and become null.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::String(s) => Value::String(s.clone()),
            Self::Bytes(b) => Value::String(encode_base64(b)),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Standard base64 encoding used for every binary value on the wire.
pub fn encode_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Decode a standard base64 string, `None` if it is not valid base64.
pub fn decode_base64(text: &str) -> Option<Vec<u8>> {
    base64::engine::general_purpose::STANDARD.decode(text).ok()
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::Bytes(b) => serializer.serialize_str(&encode_base64(b)),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

impl From<&serde_json::Value> for Payload {
    fn from(value: &serde_json::Value) -> Self {
        Self::from(value.clone())
    }
}
