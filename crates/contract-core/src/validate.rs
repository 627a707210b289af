//! Payload validation against a schema.
//!
//! The generator never decides validity on its own: it asks a
//! `PayloadValidator`. `AvroValidator` is the bundled implementation and
//! follows the JSON-side semantics of common Avro validators:
//!
//! - a record must be a mapping; keys the record does not declare are ignored
//! - a missing field falls back to its default, otherwise it is a violation
//! - `int` must fit in 32 bits; `float`/`double` accept integers
//! - `bytes`/`fixed` accept raw bytes or base64 text
//! - a union accepts a value if any branch does

use crate::schema::{Schema, SchemaNode};
use crate::types::PrimitiveKind;
use crate::values::{decode_base64, Payload};

/// Structured reason a payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViolationKind {
    /// The value has the wrong shape for the node
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: String,
        found: &'static str,
    },

    /// A field without default is absent
    #[error("missing required field '{0}'")]
    MissingField(String),

    /// A string that is not one of the enum's symbols
    #[error("unknown enum symbol '{0}'")]
    UnknownSymbol(String),

    /// A fixed value of the wrong length
    #[error("expected {expected} bytes, found {found}")]
    FixedSizeMismatch { expected: usize, found: usize },

    /// A number outside the range of its primitive
    #[error("{value} is out of range for {kind}")]
    OutOfRange { kind: PrimitiveKind, value: i64 },

    /// No union branch accepts the value
    #[error("no union branch accepts {found}")]
    NoMatchingBranch { found: &'static str },

    /// The schema references an undeclared named type
    #[error("unresolved type reference '{0}'")]
    UnresolvedReference(String),
}

/// A rejected payload: where and why.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{path}: {kind}")]
pub struct Violation {
    /// Slash-separated location of the offending value (`""` is the root)
    pub path: String,
    /// What went wrong
    pub kind: ViolationKind,
}

impl Violation {
    fn new(path: &str, kind: ViolationKind) -> Self {
        Self {
            path: if path.is_empty() {
                "/".to_string()
            } else {
                path.to_string()
            },
            kind,
        }
    }
}

/// "Does payload P conform to schema S" predicate.
pub trait PayloadValidator {
    /// Validate `payload` against the root of `schema`.
    fn validate(&self, schema: &Schema, payload: &Payload) -> Result<(), Violation>;

    /// Convenience wrapper returning a plain boolean.
    fn is_valid(&self, schema: &Schema, payload: &Payload) -> bool {
        self.validate(schema, payload).is_ok()
    }
}

impl<V: PayloadValidator + ?Sized> PayloadValidator for &V {
    fn validate(&self, schema: &Schema, payload: &Payload) -> Result<(), Violation> {
        (**self).validate(schema, payload)
    }
}

/// Structural validator for Avro-style contracts.
#[derive(Debug, Default, Clone, Copy)]
pub struct AvroValidator;

impl PayloadValidator for AvroValidator {
    fn validate(&self, schema: &Schema, payload: &Payload) -> Result<(), Violation> {
        check(schema, schema.root(), payload, "")
    }
}

fn mismatch(path: &str, node: &SchemaNode, value: &Payload) -> Violation {
    Violation::new(
        path,
        ViolationKind::TypeMismatch {
            expected: node.describe(),
            found: value.kind_name(),
        },
    )
}

fn check(schema: &Schema, node: &SchemaNode, value: &Payload, path: &str) -> Result<(), Violation> {
    match node {
        SchemaNode::Primitive(kind) | SchemaNode::LogicalPrimitive { base: kind, .. } => {
            check_primitive(*kind, node, value, path)
        }

        SchemaNode::Record(record) => {
            let Payload::Map(map) = value else {
                return Err(mismatch(path, node, value));
            };
            for field in &record.fields {
                let field_path = format!("{path}/{}", field.name);
                match (map.get(&field.name), &field.default) {
                    (Some(v), _) => check(schema, &field.node, v, &field_path)?,
                    (None, Some(default)) => check(schema, &field.node, default, &field_path)?,
                    (None, None) => {
                        return Err(Violation::new(
                            &field_path,
                            ViolationKind::MissingField(field.name.clone()),
                        ));
                    }
                }
            }
            Ok(())
        }

        SchemaNode::Enum(e) => match value {
            Payload::String(symbol) if e.symbols.contains(symbol) => Ok(()),
            Payload::String(symbol) => Err(Violation::new(
                path,
                ViolationKind::UnknownSymbol(symbol.clone()),
            )),
            other => Err(mismatch(path, node, other)),
        },

        SchemaNode::Array(items) => {
            let Payload::Array(values) = value else {
                return Err(mismatch(path, node, value));
            };
            values
                .iter()
                .enumerate()
                .try_for_each(|(i, v)| check(schema, items, v, &format!("{path}/{i}")))
        }

        SchemaNode::Map(values) => {
            let Payload::Map(map) = value else {
                return Err(mismatch(path, node, value));
            };
            map.iter()
                .try_for_each(|(k, v)| check(schema, values, v, &format!("{path}/{k}")))
        }

        SchemaNode::Fixed(fixed) => {
            let len = match value {
                Payload::Bytes(bytes) => bytes.len(),
                Payload::String(text) => match decode_base64(text) {
                    Some(bytes) => bytes.len(),
                    None => return Err(mismatch(path, node, value)),
                },
                other => return Err(mismatch(path, node, other)),
            };
            if len == fixed.size {
                Ok(())
            } else {
                Err(Violation::new(
                    path,
                    ViolationKind::FixedSizeMismatch {
                        expected: fixed.size,
                        found: len,
                    },
                ))
            }
        }

        SchemaNode::Union(branches) => {
            if branches
                .iter()
                .any(|branch| check(schema, branch, value, path).is_ok())
            {
                Ok(())
            } else {
                Err(Violation::new(
                    path,
                    ViolationKind::NoMatchingBranch {
                        found: value.kind_name(),
                    },
                ))
            }
        }

        SchemaNode::Reference(name) => {
            let resolved = schema.resolve(node).map_err(|_| {
                Violation::new(path, ViolationKind::UnresolvedReference(name.clone()))
            })?;
            check(schema, resolved, value, path)
        }
    }
}

fn check_primitive(
    kind: PrimitiveKind,
    node: &SchemaNode,
    value: &Payload,
    path: &str,
) -> Result<(), Violation> {
    let accepted = match (kind, value) {
        (PrimitiveKind::Null, Payload::Null) => true,
        (PrimitiveKind::Boolean, Payload::Bool(_)) => true,
        (PrimitiveKind::Int, Payload::Int(i)) => {
            if i32::try_from(*i).is_err() {
                return Err(Violation::new(
                    path,
                    ViolationKind::OutOfRange { kind, value: *i },
                ));
            }
            true
        }
        (PrimitiveKind::Long, Payload::Int(_)) => true,
        (PrimitiveKind::Float | PrimitiveKind::Double, Payload::Int(_) | Payload::Float(_)) => {
            true
        }
        (PrimitiveKind::String, Payload::String(_)) => true,
        (PrimitiveKind::Bytes, Payload::Bytes(_)) => true,
        (PrimitiveKind::Bytes, Payload::String(text)) => decode_base64(text).is_some(),
        _ => false,
    };

    if accepted {
        Ok(())
    } else {
        Err(mismatch(path, node, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(value: serde_json::Value) -> Schema {
        Schema::from_json(&value).unwrap()
    }

    fn user_schema() -> Schema {
        schema(json!({
            "type": "record",
            "name": "User",
            "fields": [
                {"name": "age", "type": "int"},
                {"name": "email", "type": ["null", "string"]},
                {"name": "role", "type": {"type": "enum", "name": "Role", "symbols": ["A", "B", "C"]}},
                {"name": "score", "type": "double", "default": 1.5}
            ]
        }))
    }

    fn payload(value: serde_json::Value) -> Payload {
        Payload::from(value)
    }

    #[test]
    fn test_valid_record() {
        let s = user_schema();
        let p = payload(json!({"age": 30, "email": "a@b.c", "role": "B", "score": 3}));
        assert_eq!(AvroValidator.validate(&s, &p), Ok(()));
    }

    #[test]
    fn test_missing_field_uses_default() {
        let s = user_schema();
        let p = payload(json!({"age": 30, "email": null, "role": "A"}));
        assert!(AvroValidator.is_valid(&s, &p));
    }

    #[test]
    fn test_missing_nullable_field_without_default() {
        let s = schema(json!({
            "type": "record",
            "name": "Profile",
            "fields": [{"name": "nick", "type": ["null", "string"]}]
        }));

        let err = AvroValidator.validate(&s, &payload(json!({}))).unwrap_err();
        assert_eq!(err.path, "/nick");
        assert_eq!(err.kind, ViolationKind::MissingField("nick".to_string()));

        assert!(!AvroValidator.is_valid(&s, &Payload::invalid_sentinel()));
        assert!(AvroValidator.is_valid(&s, &payload(json!({"nick": null}))));
    }

    #[test]
    fn test_missing_required_field() {
        let s = user_schema();
        let p = payload(json!({"email": null, "role": "A"}));
        let err = AvroValidator.validate(&s, &p).unwrap_err();
        assert_eq!(err.path, "/age");
        assert_eq!(err.kind, ViolationKind::MissingField("age".to_string()));
    }

    #[test]
    fn test_unknown_enum_symbol() {
        let s = user_schema();
        let p = payload(json!({"age": 1, "email": null, "role": "INVALID_SYMBOLS"}));
        let err = AvroValidator.validate(&s, &p).unwrap_err();
        assert_eq!(
            err.kind,
            ViolationKind::UnknownSymbol("INVALID_SYMBOLS".to_string())
        );
    }

    #[test]
    fn test_int_range_and_type_mismatch() {
        let s = user_schema();
        let too_big = payload(json!({"age": 3_000_000_000i64, "role": "A"}));
        assert!(matches!(
            AvroValidator.validate(&s, &too_big).unwrap_err().kind,
            ViolationKind::OutOfRange { kind: PrimitiveKind::Int, .. }
        ));

        let wrong = payload(json!({"age": "InvalidNumber", "role": "A"}));
        assert!(matches!(
            AvroValidator.validate(&s, &wrong).unwrap_err().kind,
            ViolationKind::TypeMismatch { found: "string", .. }
        ));
    }

    #[test]
    fn test_union_without_matching_branch() {
        let s = user_schema();
        let p = payload(json!({"age": 1, "role": "A", "email": 1337}));
        let err = AvroValidator.validate(&s, &p).unwrap_err();
        assert_eq!(err.path, "/email");
        assert_eq!(
            err.kind,
            ViolationKind::NoMatchingBranch { found: "integer" }
        );
    }

    #[test]
    fn test_non_record_payload_rejected() {
        let s = user_schema();
        let err = AvroValidator
            .validate(&s, &Payload::String("InvalidRecord".into()))
            .unwrap_err();
        assert_eq!(err.path, "/");
    }

    #[test]
    fn test_fixed_and_bytes() {
        let s = schema(json!({
            "type": "record",
            "name": "Blob",
            "fields": [
                {"name": "raw", "type": "bytes"},
                {"name": "hash", "type": {"type": "fixed", "name": "H", "size": 4}}
            ]
        }));

        let ok = Payload::map_from([
            ("raw", Payload::Bytes(vec![1, 2, 3])),
            ("hash", Payload::Bytes(vec![0; 4])),
        ]);
        assert!(AvroValidator.is_valid(&s, &ok));

        // Same payload after a JSON round trip: base64 strings
        let from_wire = Payload::from(ok.to_json());
        assert!(AvroValidator.is_valid(&s, &from_wire));

        let short = Payload::map_from([
            ("raw", Payload::Bytes(vec![])),
            ("hash", Payload::Bytes(vec![0; 3])),
        ]);
        assert_eq!(
            AvroValidator.validate(&s, &short).unwrap_err().kind,
            ViolationKind::FixedSizeMismatch {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn test_array_map_and_recursive_reference() {
        let s = schema(json!({
            "type": "record",
            "name": "Node",
            "fields": [
                {"name": "tags", "type": {"type": "array", "items": "string"}},
                {"name": "attrs", "type": {"type": "map", "values": "long"}},
                {"name": "next", "type": ["null", "Node"]}
            ]
        }));

        let p = payload(json!({
            "tags": ["a", "b"],
            "attrs": {"x": 1},
            "next": {"tags": [], "attrs": {}, "next": null}
        }));
        assert!(AvroValidator.is_valid(&s, &p));

        let bad = payload(json!({
            "tags": ["a", 2],
            "attrs": {"x": 1},
            "next": null
        }));
        assert_eq!(AvroValidator.validate(&s, &bad).unwrap_err().path, "/tags/1");

        let bad_nested = payload(json!({
            "tags": [],
            "attrs": {},
            "next": {"tags": [], "attrs": {"y": "no"}, "next": null}
        }));
        assert_eq!(
            AvroValidator.validate(&s, &bad_nested).unwrap_err().path,
            "/next"
        );
    }

    #[test]
    fn test_extra_keys_ignored() {
        let s = schema(json!({"type": "record", "name": "Empty", "fields": []}));
        assert!(AvroValidator.is_valid(&s, &Payload::invalid_sentinel()));
    }
}
