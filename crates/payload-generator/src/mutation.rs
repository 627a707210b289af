//! Single-fault mutation of valid payloads.
//!
//! A mutation applies exactly one [`FaultStrategy`] to a deep copy of a valid
//! record payload so that a rejected case can be attributed to one violation.
//! When a strategy has nothing to work on (no fields, non-record root) the
//! result is the `{"_is_invalid": true}` sentinel.

use crate::context::GenerationContext;
use crate::generator::{GeneratorError, PayloadGenerator};
use contract_core::{
    EnumSchema, Field, Payload, PayloadValidator, PrimitiveKind, RecordSchema, Schema, SchemaNode,
};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Symbol used for out-of-set enum values.
pub const INVALID_ENUM_SYMBOL: &str = "INVALID_SYMBOLS";

/// The four ways a valid record is turned into an invalid one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultStrategy {
    /// Remove a non-nullable field
    DropRequiredField,
    /// Replace a field's value with a wrong-shaped value
    WrongType,
    /// Put an undeclared symbol in an enum field
    InvalidEnumSymbol,
    /// Set a non-nullable field to null
    NullRequiredField,
}

impl FaultStrategy {
    /// All strategies, in selection order.
    pub const ALL: [FaultStrategy; 4] = [
        FaultStrategy::DropRequiredField,
        FaultStrategy::WrongType,
        FaultStrategy::InvalidEnumSymbol,
        FaultStrategy::NullRequiredField,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FaultStrategy::DropRequiredField => "drop_required_field",
            FaultStrategy::WrongType => "wrong_type",
            FaultStrategy::InvalidEnumSymbol => "invalid_enum_symbol",
            FaultStrategy::NullRequiredField => "null_required_field",
        }
    }
}

impl fmt::Display for FaultStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of mutating a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub payload: Payload,
    /// Strategy that produced the payload, `None` for the sentinel
    pub strategy: Option<FaultStrategy>,
    /// Field the fault was applied to
    pub field: Option<String>,
}

impl Mutation {
    /// The invalid-by-convention sentinel.
    pub fn sentinel() -> Self {
        Self {
            payload: Payload::invalid_sentinel(),
            strategy: None,
            field: None,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.strategy.is_none()
    }

    fn applied(
        strategy: FaultStrategy,
        field: &Field,
        payload: IndexMap<String, Payload>,
    ) -> Self {
        Self {
            payload: Payload::Map(payload),
            strategy: Some(strategy),
            field: Some(field.name.clone()),
        }
    }
}

/// Apply a uniformly chosen fault strategy to `valid`.
pub fn mutate(schema: &Schema, valid: &Payload, ctx: &mut GenerationContext) -> Mutation {
    let strategy = FaultStrategy::ALL[ctx.index(FaultStrategy::ALL.len())];
    mutate_with(strategy, schema, valid, ctx)
}

/// Apply a specific fault strategy to `valid`.
pub fn mutate_with(
    strategy: FaultStrategy,
    schema: &Schema,
    valid: &Payload,
    ctx: &mut GenerationContext,
) -> Mutation {
    let (Some(record), Payload::Map(fields)) = (schema.root_record(), valid) else {
        return Mutation::sentinel();
    };
    if record.fields.is_empty() {
        return Mutation::sentinel();
    }
    let mut payload = fields.clone();

    let mutation = match strategy {
        FaultStrategy::DropRequiredField => {
            let Some(field) = pick_required(record, ctx, true) else {
                return Mutation::sentinel();
            };
            payload.shift_remove(&field.name);
            Mutation::applied(strategy, field, payload)
        }

        FaultStrategy::WrongType => {
            let Some(field) = ctx.choose(&record.fields) else {
                return Mutation::sentinel();
            };
            payload.insert(field.name.clone(), wrong_value(schema, &field.node));
            Mutation::applied(strategy, field, payload)
        }

        FaultStrategy::InvalidEnumSymbol => {
            let enum_fields: Vec<(&Field, &EnumSchema)> = record
                .fields
                .iter()
                .filter_map(|field| match schema.resolve(&field.node) {
                    Ok(SchemaNode::Enum(e)) => Some((field, e)),
                    _ => None,
                })
                .collect();

            match ctx.choose(&enum_fields) {
                Some((field, e)) => {
                    payload.insert(field.name.clone(), Payload::String(undeclared_symbol(e)));
                    Mutation::applied(strategy, field, payload)
                }
                None => {
                    let Some(field) = ctx.choose(&record.fields) else {
                        return Mutation::sentinel();
                    };
                    payload.insert(field.name.clone(), invalid_marker("enum_type"));
                    Mutation::applied(strategy, field, payload)
                }
            }
        }

        FaultStrategy::NullRequiredField => {
            let Some(field) = pick_required(record, ctx, false) else {
                return Mutation::sentinel();
            };
            payload.insert(field.name.clone(), Payload::Null);
            Mutation::applied(strategy, field, payload)
        }
    };

    debug!(
        "Applied {} to field {}",
        strategy,
        mutation.field.as_deref().unwrap_or("-")
    );
    mutation
}

/// Pick a non-nullable field, falling back to any field.
///
/// With `prefer_no_default`, required fields without a declared default are
/// tried first since dropping a defaulted field is not a violation.
fn pick_required<'r>(
    record: &'r RecordSchema,
    ctx: &mut GenerationContext,
    prefer_no_default: bool,
) -> Option<&'r Field> {
    let required: Vec<&Field> = record.fields.iter().filter(|f| f.is_required()).collect();

    if prefer_no_default {
        let undefaulted: Vec<&Field> = required
            .iter()
            .copied()
            .filter(|f| f.default.is_none())
            .collect();
        if let Some(field) = ctx.choose(&undefaulted) {
            return Some(*field);
        }
    }

    match ctx.choose(&required) {
        Some(field) => Some(*field),
        None => ctx.choose(&record.fields),
    }
}

fn invalid_marker(value: &str) -> Payload {
    Payload::map_from([("invalid", Payload::String(value.to_string()))])
}

/// A value whose shape the node cannot accept.
pub fn wrong_value(schema: &Schema, node: &SchemaNode) -> Payload {
    match schema.resolve(node).unwrap_or(node) {
        SchemaNode::Primitive(kind) | SchemaNode::LogicalPrimitive { base: kind, .. } => {
            match kind {
                PrimitiveKind::Int
                | PrimitiveKind::Long
                | PrimitiveKind::Float
                | PrimitiveKind::Double => Payload::String("InvalidNumber".to_string()),
                PrimitiveKind::Boolean => Payload::String("InvalidBoolean".to_string()),
                PrimitiveKind::String => Payload::Int(1337),
                PrimitiveKind::Null | PrimitiveKind::Bytes => {
                    Payload::map_from([("invalid", Payload::Bool(true))])
                }
            }
        }
        SchemaNode::Array(_) => Payload::String("InvalidArray".to_string()),
        SchemaNode::Map(_) => Payload::Array(vec![
            Payload::String("Invalid".to_string()),
            Payload::String("Map".to_string()),
        ]),
        SchemaNode::Record(_) => Payload::String("InvalidRecord".to_string()),
        SchemaNode::Enum(_) => invalid_marker("enum_type"),
        SchemaNode::Fixed(_) | SchemaNode::Union(_) | SchemaNode::Reference(_) => {
            invalid_marker("data_type")
        }
    }
}

/// A symbol the enum does not declare.
pub fn undeclared_symbol(e: &EnumSchema) -> String {
    let mut symbol = INVALID_ENUM_SYMBOL.to_string();
    while e.symbols.contains(&symbol) {
        symbol.push('_');
    }
    symbol
}

/// Generate a valid payload, mutate it, and guarantee the result is invalid.
///
/// If the mutated payload still passes `validator`, the sentinel is returned
/// instead.
pub fn generate_invalid<V: PayloadValidator>(
    schema: &Schema,
    ctx: &mut GenerationContext,
    validator: &V,
) -> Result<Mutation, GeneratorError> {
    let valid = PayloadGenerator::new(schema).generate(ctx)?;
    let mutation = mutate(schema, &valid, ctx);

    if !mutation.is_sentinel() && validator.is_valid(schema, &mutation.payload) {
        warn!(
            "Mutation {} on field {} still validates, using sentinel",
            mutation.strategy.map(|s| s.name()).unwrap_or("-"),
            mutation.field.as_deref().unwrap_or("-")
        );
        return Ok(Mutation::sentinel());
    }
    Ok(mutation)
}
