//! Schema model for avroman contracts.
//!
//! A contract is an Avro-style JSON schema. It is parsed once into a tree of
//! `SchemaNode`s and is read-only afterwards.
//!
//! ## Named types
//!
//! Records, enums and fixed types carry a name. The first occurrence of a
//! named type holds its definition inline; every later use of the name is a
//! `SchemaNode::Reference` resolved through the owning `Schema`. This is what
//! lets a record refer to itself (linked lists, trees) without the tree
//! becoming cyclic.

use crate::types::{LogicalType, PrimitiveKind};
use crate::values::Payload;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing JSON
    #[error("Failed to parse schema JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A required attribute is absent
    #[error("Missing attribute '{attribute}' in {context}")]
    MissingAttribute {
        attribute: &'static str,
        context: String,
    },

    /// An attribute has the wrong shape
    #[error("Invalid attribute '{attribute}' in {context}: {reason}")]
    InvalidAttribute {
        attribute: &'static str,
        context: String,
        reason: String,
    },

    /// A type name that is neither a primitive nor a declared named type
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// JSON that is not a string, array or object where a schema was expected
    #[error("Invalid schema node: {0}")]
    InvalidNode(String),

    /// Enum without symbols
    #[error("Enum '{0}' declares no symbols")]
    EmptyEnum(String),

    /// Union without branches
    #[error("Union declares no branches")]
    EmptyUnion,

    /// Union directly containing another union
    #[error("Union may not directly contain another union")]
    NestedUnion,

    /// Two fields with the same name in one record
    #[error("Duplicate field '{field}' in record '{record}'")]
    DuplicateField { record: String, field: String },

    /// Named type declared twice
    #[error("Named type '{0}' is declared more than once")]
    DuplicateName(String),

    /// Reference to a named type with no definition
    #[error("Unresolved type reference: {0}")]
    UnresolvedReference(String),
}

// ============================================================================
// Schema Nodes
// ============================================================================

/// A record field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name, unique within its record
    pub name: String,

    /// Field type
    pub node: SchemaNode,

    /// Declared default value
    pub default: Option<Payload>,
}

impl Field {
    /// Create a field without a default.
    pub fn new(name: impl Into<String>, node: SchemaNode) -> Self {
        Self {
            name: name.into(),
            node,
            default: None,
        }
    }

    /// A field is required when its type does not admit null.
    pub fn is_required(&self) -> bool {
        !self.node.accepts_null()
    }
}

/// Record type: an ordered list of named fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    /// Full name (namespace-qualified when a namespace applies)
    pub name: String,

    /// Fields in declaration order
    pub fields: Vec<Field>,
}

impl RecordSchema {
    /// Get a field by name.
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get all field names.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Enum type: a closed set of string symbols.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumSchema {
    pub name: String,
    pub symbols: Vec<String>,
}

/// Fixed type: a byte buffer of an exact size.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedSchema {
    pub name: String,
    pub size: usize,
}

/// One node of the contract grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Plain primitive
    Primitive(PrimitiveKind),

    /// Primitive refined by a logical type tag
    LogicalPrimitive {
        base: PrimitiveKind,
        logical: LogicalType,
    },

    /// Record definition
    Record(RecordSchema),

    /// Enum definition
    Enum(EnumSchema),

    /// Array of `items`
    Array(Box<SchemaNode>),

    /// String-keyed map of `values`
    Map(Box<SchemaNode>),

    /// Fixed definition
    Fixed(FixedSchema),

    /// Ordered alternatives
    Union(Vec<SchemaNode>),

    /// Use of a named type declared elsewhere in the schema
    Reference(String),
}

impl SchemaNode {
    /// The primitive this node stores values as, if it is primitive.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            Self::Primitive(kind) | Self::LogicalPrimitive { base: kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// The logical type tag, if any.
    pub fn logical_type(&self) -> Option<&LogicalType> {
        match self {
            Self::LogicalPrimitive { logical, .. } => Some(logical),
            _ => None,
        }
    }

    /// Whether this node is the null primitive.
    pub fn is_null(&self) -> bool {
        self.primitive_kind() == Some(PrimitiveKind::Null)
    }

    /// Whether `null` is a valid value for this node.
    ///
    /// Named references never accept null: they always point at a record,
    /// enum or fixed.
    pub fn accepts_null(&self) -> bool {
        match self {
            Self::Union(branches) => branches.iter().any(SchemaNode::is_null),
            other => other.is_null(),
        }
    }

    /// Short description of the node, used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Self::Primitive(kind) => kind.name().to_string(),
            Self::LogicalPrimitive { base, logical } => format!("{base}({logical})"),
            Self::Record(record) => format!("record {}", record.name),
            Self::Enum(e) => format!("enum {}", e.name),
            Self::Array(_) => "array".to_string(),
            Self::Map(_) => "map".to_string(),
            Self::Fixed(fixed) => format!("fixed {}[{}]", fixed.name, fixed.size),
            Self::Union(branches) => format!(
                "union[{}]",
                branches
                    .iter()
                    .map(SchemaNode::describe)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Self::Reference(name) => name.clone(),
        }
    }
}

// ============================================================================
// Schema
// ============================================================================

/// A parsed contract: the root node plus the table of named types.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    root: SchemaNode,
    named: HashMap<String, SchemaNode>,
}

impl Schema {
    /// Build a schema from an already-constructed root without named types.
    pub fn new(root: SchemaNode) -> Self {
        let mut named = HashMap::new();
        collect_named(&root, &mut named);
        Self { root, named }
    }

    /// Load schema from a JSON (`.avsc`) file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse schema from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json(&value)
    }

    /// Parse schema from a JSON value.
    pub fn from_json(value: &Value) -> Result<Self, SchemaError> {
        let mut parser = Parser::default();
        let root = parser.parse(value, None)?;
        Ok(Self {
            root,
            named: parser.named,
        })
    }

    /// The root node.
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// Get a named type definition by full name.
    pub fn get_named(&self, name: &str) -> Option<&SchemaNode> {
        self.named.get(name)
    }

    /// All declared named types, sorted by name.
    pub fn named_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.named.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Follow references until a definition is reached.
    pub fn resolve<'a>(&'a self, node: &'a SchemaNode) -> Result<&'a SchemaNode, SchemaError> {
        let mut current = node;
        // A reference always names a record, enum or fixed, so one hop suffices;
        // the loop only guards against hand-built schemas.
        for _ in 0..=self.named.len() {
            match current {
                SchemaNode::Reference(name) => {
                    current = self
                        .named
                        .get(name)
                        .ok_or_else(|| SchemaError::UnresolvedReference(name.clone()))?;
                }
                other => return Ok(other),
            }
        }
        Err(SchemaError::UnresolvedReference(node.describe()))
    }

    /// The root record, if the root (after resolution) is a record.
    pub fn root_record(&self) -> Option<&RecordSchema> {
        match self.resolve(&self.root) {
            Ok(SchemaNode::Record(record)) => Some(record),
            _ => None,
        }
    }
}

fn collect_named(node: &SchemaNode, named: &mut HashMap<String, SchemaNode>) {
    match node {
        SchemaNode::Record(record) => {
            named.insert(record.name.clone(), node.clone());
            for field in &record.fields {
                collect_named(&field.node, named);
            }
        }
        SchemaNode::Enum(e) => {
            named.insert(e.name.clone(), node.clone());
        }
        SchemaNode::Fixed(fixed) => {
            named.insert(fixed.name.clone(), node.clone());
        }
        SchemaNode::Array(inner) | SchemaNode::Map(inner) => collect_named(inner, named),
        SchemaNode::Union(branches) => {
            for branch in branches {
                collect_named(branch, named);
            }
        }
        SchemaNode::Primitive(_)
        | SchemaNode::LogicalPrimitive { .. }
        | SchemaNode::Reference(_) => {}
    }
}

// ============================================================================
// Parser
// ============================================================================

#[derive(Default)]
struct Parser {
    /// Completed named type definitions
    named: HashMap<String, SchemaNode>,
    /// Names declared so far, including records whose fields are still being parsed
    declared: HashSet<String>,
}

impl Parser {
    fn parse(&mut self, value: &Value, namespace: Option<&str>) -> Result<SchemaNode, SchemaError> {
        match value {
            Value::String(name) => self.parse_name(name, namespace),
            Value::Array(branches) => self.parse_union(branches, namespace),
            Value::Object(object) => self.parse_object(object, namespace),
            other => Err(SchemaError::InvalidNode(other.to_string())),
        }
    }

    fn parse_name(&self, name: &str, namespace: Option<&str>) -> Result<SchemaNode, SchemaError> {
        if let Some(kind) = PrimitiveKind::from_name(name) {
            return Ok(SchemaNode::Primitive(kind));
        }
        self.lookup(name, namespace)
            .map(SchemaNode::Reference)
            .ok_or_else(|| SchemaError::UnknownType(name.to_string()))
    }

    fn lookup(&self, name: &str, namespace: Option<&str>) -> Option<String> {
        let qualified = full_name(name, namespace);
        if self.declared.contains(&qualified) {
            return Some(qualified);
        }
        if self.declared.contains(name) {
            return Some(name.to_string());
        }
        None
    }

    fn parse_union(
        &mut self,
        branches: &[Value],
        namespace: Option<&str>,
    ) -> Result<SchemaNode, SchemaError> {
        if branches.is_empty() {
            return Err(SchemaError::EmptyUnion);
        }
        let mut parsed = Vec::with_capacity(branches.len());
        for branch in branches {
            let node = self.parse(branch, namespace)?;
            if matches!(node, SchemaNode::Union(_)) {
                return Err(SchemaError::NestedUnion);
            }
            parsed.push(node);
        }
        Ok(SchemaNode::Union(parsed))
    }

    fn parse_object(
        &mut self,
        object: &Map<String, Value>,
        namespace: Option<&str>,
    ) -> Result<SchemaNode, SchemaError> {
        let type_value = object
            .get("type")
            .ok_or_else(|| SchemaError::MissingAttribute {
                attribute: "type",
                context: Value::Object(object.clone()).to_string(),
            })?;

        let type_name = match type_value {
            Value::String(type_name) => type_name.as_str(),
            // `{"type": {...}}` and `{"type": [...]}` wrap another schema
            nested => return self.parse(nested, namespace),
        };

        if let Some(base) = PrimitiveKind::from_name(type_name) {
            return Ok(match object.get("logicalType").and_then(Value::as_str) {
                Some(tag) => SchemaNode::LogicalPrimitive {
                    base,
                    logical: LogicalType::parse(tag, base),
                },
                None => SchemaNode::Primitive(base),
            });
        }

        match type_name {
            "record" | "error" => self.parse_record(object, namespace),
            "enum" => self.parse_enum(object, namespace),
            "fixed" => self.parse_fixed(object, namespace),
            "array" => {
                let items = object
                    .get("items")
                    .ok_or_else(|| SchemaError::MissingAttribute {
                        attribute: "items",
                        context: "array".to_string(),
                    })?;
                Ok(SchemaNode::Array(Box::new(self.parse(items, namespace)?)))
            }
            "map" => {
                let values = object
                    .get("values")
                    .ok_or_else(|| SchemaError::MissingAttribute {
                        attribute: "values",
                        context: "map".to_string(),
                    })?;
                Ok(SchemaNode::Map(Box::new(self.parse(values, namespace)?)))
            }
            other => self.parse_name(other, namespace),
        }
    }

    /// Resolve the full name of a named type and reserve it.
    fn declare(
        &mut self,
        object: &Map<String, Value>,
        kind: &'static str,
        namespace: Option<&str>,
    ) -> Result<String, SchemaError> {
        let name = object
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| SchemaError::MissingAttribute {
                attribute: "name",
                context: kind.to_string(),
            })?;
        let own_namespace = object
            .get("namespace")
            .and_then(Value::as_str)
            .filter(|ns| !ns.is_empty());
        let name = full_name(name, own_namespace.or(namespace));

        if !self.declared.insert(name.clone()) {
            return Err(SchemaError::DuplicateName(name));
        }
        Ok(name)
    }

    fn parse_record(
        &mut self,
        object: &Map<String, Value>,
        namespace: Option<&str>,
    ) -> Result<SchemaNode, SchemaError> {
        let name = self.declare(object, "record", namespace)?;
        let record_namespace = namespace_of(&name).map(str::to_string);

        let fields_value = object
            .get("fields")
            .ok_or_else(|| SchemaError::MissingAttribute {
                attribute: "fields",
                context: format!("record {name}"),
            })?;
        let field_values =
            fields_value
                .as_array()
                .ok_or_else(|| SchemaError::InvalidAttribute {
                    attribute: "fields",
                    context: format!("record {name}"),
                    reason: "expected an array".to_string(),
                })?;

        let mut fields: Vec<Field> = Vec::with_capacity(field_values.len());
        for field_value in field_values {
            let field = self.parse_field(field_value, &name, record_namespace.as_deref())?;
            if fields.iter().any(|f| f.name == field.name) {
                return Err(SchemaError::DuplicateField {
                    record: name,
                    field: field.name,
                });
            }
            fields.push(field);
        }

        let node = SchemaNode::Record(RecordSchema {
            name: name.clone(),
            fields,
        });
        self.named.insert(name, node.clone());
        Ok(node)
    }

    fn parse_field(
        &mut self,
        value: &Value,
        record: &str,
        namespace: Option<&str>,
    ) -> Result<Field, SchemaError> {
        let object = value
            .as_object()
            .ok_or_else(|| SchemaError::InvalidAttribute {
                attribute: "fields",
                context: format!("record {record}"),
                reason: format!("field must be an object, got {value}"),
            })?;
        let name = object
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| SchemaError::MissingAttribute {
                attribute: "name",
                context: format!("field of record {record}"),
            })?;
        let type_value = object
            .get("type")
            .ok_or_else(|| SchemaError::MissingAttribute {
                attribute: "type",
                context: format!("field {record}.{name}"),
            })?;

        Ok(Field {
            name: name.to_string(),
            node: self.parse(type_value, namespace)?,
            default: object.get("default").map(Payload::from),
        })
    }

    fn parse_enum(
        &mut self,
        object: &Map<String, Value>,
        namespace: Option<&str>,
    ) -> Result<SchemaNode, SchemaError> {
        let name = self.declare(object, "enum", namespace)?;
        let symbols = object
            .get("symbols")
            .and_then(Value::as_array)
            .ok_or_else(|| SchemaError::MissingAttribute {
                attribute: "symbols",
                context: format!("enum {name}"),
            })?
            .iter()
            .map(|symbol| {
                symbol
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| SchemaError::InvalidAttribute {
                        attribute: "symbols",
                        context: format!("enum {name}"),
                        reason: format!("symbol must be a string, got {symbol}"),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if symbols.is_empty() {
            return Err(SchemaError::EmptyEnum(name));
        }

        let node = SchemaNode::Enum(EnumSchema {
            name: name.clone(),
            symbols,
        });
        self.named.insert(name, node.clone());
        Ok(node)
    }

    fn parse_fixed(
        &mut self,
        object: &Map<String, Value>,
        namespace: Option<&str>,
    ) -> Result<SchemaNode, SchemaError> {
        let name = self.declare(object, "fixed", namespace)?;
        let size = object
            .get("size")
            .ok_or_else(|| SchemaError::MissingAttribute {
                attribute: "size",
                context: format!("fixed {name}"),
            })?
            .as_u64()
            .ok_or_else(|| SchemaError::InvalidAttribute {
                attribute: "size",
                context: format!("fixed {name}"),
                reason: "expected a non-negative integer".to_string(),
            })?;

        let node = SchemaNode::Fixed(FixedSchema {
            name: name.clone(),
            size: size as usize,
        });
        self.named.insert(name, node.clone());
        Ok(node)
    }
}

fn full_name(name: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) if !name.contains('.') => format!("{ns}.{name}"),
        _ => name.to_string(),
    }
}

fn namespace_of(full_name: &str) -> Option<&str> {
    full_name.rsplit_once('.').map(|(ns, _)| ns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Result<Schema, SchemaError> {
        Schema::from_json(&value)
    }

    #[test]
    fn test_parse_record_with_nullable_email() {
        let schema = parse(json!({
            "type": "record",
            "name": "User",
            "fields": [
                {"name": "age", "type": "int"},
                {"name": "email", "type": ["null", "string"], "default": null}
            ]
        }))
        .unwrap();

        let record = schema.root_record().unwrap();
        assert_eq!(record.name, "User");
        assert_eq!(record.field_names(), vec!["age", "email"]);

        let age = record.get_field("age").unwrap();
        assert_eq!(age.node, SchemaNode::Primitive(PrimitiveKind::Int));
        assert!(age.is_required());

        let email = record.get_field("email").unwrap();
        assert!(!email.is_required());
        assert_eq!(email.default, Some(Payload::Null));
    }

    #[test]
    fn test_parse_primitive_wrapper_and_logical_type() {
        let schema = parse(json!({
            "type": "record",
            "name": "Event",
            "fields": [
                {"name": "day", "type": {"type": "int", "logicalType": "date"}},
                {"name": "at", "type": {"type": "long", "logicalType": "timestamp-millis"}},
                {"name": "id", "type": {"type": "string", "logicalType": "uuid"}},
                {"name": "plain", "type": {"type": "double"}}
            ]
        }))
        .unwrap();
        let record = schema.root_record().unwrap();

        assert_eq!(
            record.get_field("day").unwrap().node.logical_type(),
            Some(&LogicalType::Date)
        );
        assert_eq!(
            record.get_field("at").unwrap().node.logical_type(),
            Some(&LogicalType::TimestampMillis)
        );
        assert_eq!(
            record.get_field("id").unwrap().node.logical_type(),
            Some(&LogicalType::Other("uuid".to_string()))
        );
        assert_eq!(
            record.get_field("plain").unwrap().node,
            SchemaNode::Primitive(PrimitiveKind::Double)
        );
    }

    #[test]
    fn test_parse_complex_types() {
        let schema = parse(json!({
            "type": "record",
            "name": "Order",
            "namespace": "shop",
            "fields": [
                {"name": "status", "type": {"type": "enum", "name": "Status", "symbols": ["A", "B", "C"]}},
                {"name": "tags", "type": {"type": "array", "items": "string"}},
                {"name": "attrs", "type": {"type": "map", "values": "long"}},
                {"name": "hash", "type": {"type": "fixed", "name": "Hash", "size": 16}}
            ]
        }))
        .unwrap();

        assert_eq!(
            schema.named_types(),
            vec!["shop.Hash", "shop.Order", "shop.Status"]
        );
        let record = schema.root_record().unwrap();
        assert!(matches!(
            &record.get_field("status").unwrap().node,
            SchemaNode::Enum(e) if e.symbols == vec!["A", "B", "C"]
        ));
        assert!(matches!(
            &record.get_field("hash").unwrap().node,
            SchemaNode::Fixed(f) if f.size == 16
        ));
    }

    #[test]
    fn test_named_reference_and_recursion() {
        let schema = parse(json!({
            "type": "record",
            "name": "Node",
            "fields": [
                {"name": "value", "type": "int"},
                {"name": "next", "type": ["null", "Node"]}
            ]
        }))
        .unwrap();

        let record = schema.root_record().unwrap();
        let next = &record.get_field("next").unwrap().node;
        let SchemaNode::Union(branches) = next else {
            panic!("Expected union, got {next:?}");
        };
        assert_eq!(branches[1], SchemaNode::Reference("Node".to_string()));
        assert!(matches!(
            schema.resolve(&branches[1]).unwrap(),
            SchemaNode::Record(r) if r.name == "Node"
        ));
    }

    #[test]
    fn test_reference_uses_enclosing_namespace() {
        let schema = parse(json!({
            "type": "record",
            "name": "Person",
            "namespace": "com.example",
            "fields": [
                {"name": "home", "type": {"type": "record", "name": "Address", "fields": [
                    {"name": "city", "type": "string"}
                ]}},
                {"name": "work", "type": "Address"}
            ]
        }))
        .unwrap();
        let record = schema.root_record().unwrap();
        assert_eq!(
            record.get_field("work").unwrap().node,
            SchemaNode::Reference("com.example.Address".to_string())
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse(json!("decimal")),
            Err(SchemaError::UnknownType(name)) if name == "decimal"
        ));
        assert!(matches!(parse(json!([])), Err(SchemaError::EmptyUnion)));
        assert!(matches!(
            parse(json!(["null", ["int", "string"]])),
            Err(SchemaError::NestedUnion)
        ));
        assert!(matches!(
            parse(json!({"type": "enum", "name": "E", "symbols": []})),
            Err(SchemaError::EmptyEnum(_))
        ));
        assert!(matches!(
            parse(json!({"type": "record", "name": "R"})),
            Err(SchemaError::MissingAttribute { attribute: "fields", .. })
        ));
        assert!(matches!(
            parse(json!({"type": "array"})),
            Err(SchemaError::MissingAttribute { attribute: "items", .. })
        ));
        assert!(matches!(
            parse(json!({"type": "fixed", "name": "F", "size": -1})),
            Err(SchemaError::InvalidAttribute { attribute: "size", .. })
        ));
        assert!(matches!(
            parse(json!({"type": "record", "name": "R", "fields": [
                {"name": "a", "type": "int"},
                {"name": "a", "type": "long"}
            ]})),
            Err(SchemaError::DuplicateField { .. })
        ));
        assert!(matches!(parse(json!(42)), Err(SchemaError::InvalidNode(_))));
    }

    #[test]
    fn test_empty_record_parses() {
        let schema = parse(json!({"type": "record", "name": "Empty", "fields": []})).unwrap();
        assert!(schema.root_record().unwrap().fields.is_empty());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.avsc");
        std::fs::write(
            &path,
            r#"{"type": "record", "name": "User", "fields": [{"name": "id", "type": "long"}]}"#,
        )
        .unwrap();

        let schema = Schema::from_file(&path).unwrap();
        assert_eq!(schema.root_record().unwrap().name, "User");

        let missing = Schema::from_file(dir.path().join("missing.avsc"));
        assert!(matches!(missing, Err(SchemaError::IoError(_))));
    }

    #[test]
    fn test_schema_new_collects_named_types() {
        let root = SchemaNode::Record(RecordSchema {
            name: "Wrapper".to_string(),
            fields: vec![Field::new(
                "kind",
                SchemaNode::Enum(EnumSchema {
                    name: "Kind".to_string(),
                    symbols: vec!["X".to_string()],
                }),
            )],
        });
        let schema = Schema::new(root);
        assert_eq!(schema.named_types(), vec!["Kind", "Wrapper"]);
    }
}
