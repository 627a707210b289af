//! Primitive and logical type names of the contract grammar.
//!
//! This module defines `PrimitiveKind` (the eight Avro primitives) and
//! `LogicalType` (semantic refinements of a primitive that change its wire
//! encoding but not its storage kind).

use std::fmt;

/// Primitive type of the contract grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// The single value `null`
    Null,
    /// `true` / `false`
    Boolean,
    /// 32-bit signed integer
    Int,
    /// 64-bit signed integer
    Long,
    /// Single precision IEEE 754 number
    Float,
    /// Double precision IEEE 754 number
    Double,
    /// UTF-8 text
    String,
    /// Arbitrary byte sequence
    Bytes,
}

impl PrimitiveKind {
    /// Look up a primitive by its schema name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "null" => Some(Self::Null),
            "boolean" => Some(Self::Boolean),
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            "string" => Some(Self::String),
            "bytes" => Some(Self::Bytes),
            _ => None,
        }
    }

    /// Schema name of this primitive.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Bytes => "bytes",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Logical type tag attached to a primitive.
///
/// Only the tags the generator knows how to encode get their own variant.
/// Everything else is kept verbatim in `Other` so the generator can fall back
/// to the base primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalType {
    /// Days since 1970-01-01, stored as `int`
    Date,
    /// Milliseconds since the epoch, stored as `long`
    TimestampMillis,
    /// Microseconds since the epoch, stored as `long`
    TimestampMicros,
    /// Any tag without a dedicated encoder, or a known tag on the wrong base
    Other(String),
}

impl LogicalType {
    /// Interpret a `logicalType` attribute found on a primitive of kind `base`.
    ///
    /// A known tag only counts when it sits on its storage primitive
    /// (`date` on `int`, `timestamp-*` on `long`).
    pub fn parse(tag: &str, base: PrimitiveKind) -> Self {
        match (tag, base) {
            ("date", PrimitiveKind::Int) => Self::Date,
            ("timestamp-millis", PrimitiveKind::Long) => Self::TimestampMillis,
            ("timestamp-micros", PrimitiveKind::Long) => Self::TimestampMicros,
            _ => Self::Other(tag.to_string()),
        }
    }

    /// The tag as written in the schema.
    pub fn tag(&self) -> &str {
        match self {
            Self::Date => "date",
            Self::TimestampMillis => "timestamp-millis",
            Self::TimestampMicros => "timestamp-micros",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_names_round_trip() {
        for name in [
            "null", "boolean", "int", "long", "float", "double", "string", "bytes",
        ] {
            let kind = PrimitiveKind::from_name(name).unwrap();
            assert_eq!(kind.name(), name);
        }
        assert_eq!(PrimitiveKind::from_name("record"), None);
    }

    #[test]
    fn test_logical_type_requires_matching_base() {
        assert_eq!(LogicalType::parse("date", PrimitiveKind::Int), LogicalType::Date);
        assert_eq!(
            LogicalType::parse("date", PrimitiveKind::Long),
            LogicalType::Other("date".to_string())
        );
        assert_eq!(
            LogicalType::parse("timestamp-micros", PrimitiveKind::Long),
            LogicalType::TimestampMicros
        );
        assert_eq!(
            LogicalType::parse("uuid", PrimitiveKind::String),
            LogicalType::Other("uuid".to_string())
        );
    }
}
