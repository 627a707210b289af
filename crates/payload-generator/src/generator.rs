//! Recursive valid-payload generator.

use crate::context::GenerationContext;
use crate::generators::{email, generate_logical, primitive, union};
use contract_core::{Field, Payload, PayloadValidator, RecordSchema, Schema, SchemaNode};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

/// Depth past which the generator prefers terminating choices.
pub const MAX_DEPTH: usize = 32;

/// Depth at which generation gives up on a schema that cannot terminate.
pub const HARD_DEPTH_LIMIT: usize = 64;

/// Probability of reusing a field's declared default.
pub const DEFAULT_REUSE_PROBABILITY: f64 = 0.15;

/// Maximum length of generated arrays and maps.
pub const MAX_COLLECTION_LEN: usize = 5;

/// Inclusive length range for generated map keys.
pub const MAP_KEY_LEN: (usize, usize) = (3, 10);

/// Default number of attempts for [`generate_valid_record`].
pub const DEFAULT_ATTEMPTS: usize = 5;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// A reference names a type the schema does not declare
    #[error("Unresolved type reference: {0}")]
    UnresolvedReference(String),

    /// The schema recurses without any terminating choice
    #[error("Recursion limit of {limit} exceeded while generating {node}")]
    RecursionLimit { limit: usize, node: String },

    /// A union with no branches reached the generator
    #[error("Union has no branches")]
    EmptyUnion,

    /// An enum with no symbols reached the generator
    #[error("Enum {0} has no symbols")]
    EmptyEnum(String),
}

/// Generator that walks a schema and produces a conforming payload.
///
/// The generator holds no randomness of its own; every call draws from the
/// caller's [`GenerationContext`].
#[derive(Debug, Clone, Copy)]
pub struct PayloadGenerator<'s> {
    schema: &'s Schema,
}

impl<'s> PayloadGenerator<'s> {
    /// Create a generator for `schema`.
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    /// Generate a payload for the schema root.
    pub fn generate(&self, ctx: &mut GenerationContext) -> Result<Payload, GeneratorError> {
        self.generate_node(self.schema.root(), ctx)
    }

    /// Generate a payload for an arbitrary node of the schema.
    pub fn generate_node(
        &self,
        node: &SchemaNode,
        ctx: &mut GenerationContext,
    ) -> Result<Payload, GeneratorError> {
        self.walk(node, ctx, 0)
    }

    fn walk(
        &self,
        node: &SchemaNode,
        ctx: &mut GenerationContext,
        depth: usize,
    ) -> Result<Payload, GeneratorError> {
        if depth > HARD_DEPTH_LIMIT {
            return Err(GeneratorError::RecursionLimit {
                limit: HARD_DEPTH_LIMIT,
                node: node.describe(),
            });
        }
        let terminal = depth >= MAX_DEPTH;

        match node {
            SchemaNode::Primitive(kind) => Ok(primitive::generate_primitive(*kind, ctx)),

            SchemaNode::LogicalPrimitive { base, logical } => {
                Ok(generate_logical(*base, logical, ctx))
            }

            SchemaNode::Union(branches) => {
                let branch = if terminal && !branches.iter().any(SchemaNode::is_null) {
                    self.shallow_branch(branches, ctx)
                } else {
                    union::select_branch(branches, ctx, terminal)
                }
                .ok_or(GeneratorError::EmptyUnion)?;
                self.walk(branch, ctx, depth + 1)
            }

            SchemaNode::Record(record) => self.walk_record(record, ctx, depth, terminal),

            SchemaNode::Array(items) => {
                let len = if terminal {
                    0
                } else {
                    ctx.len_in(0, MAX_COLLECTION_LEN)
                };
                let values = (0..len)
                    .map(|_| self.walk(items, ctx, depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Payload::Array(values))
            }

            SchemaNode::Map(values) => {
                let len = if terminal {
                    0
                } else {
                    ctx.len_in(0, MAX_COLLECTION_LEN)
                };
                let mut map = IndexMap::with_capacity(len);
                for _ in 0..len {
                    let key = ctx.alphanumeric(MAP_KEY_LEN.0, MAP_KEY_LEN.1);
                    let value = self.walk(values, ctx, depth + 1)?;
                    map.insert(key, value);
                }
                Ok(Payload::Map(map))
            }

            SchemaNode::Enum(e) => ctx
                .choose(&e.symbols)
                .map(|symbol| Payload::String(symbol.clone()))
                .ok_or_else(|| GeneratorError::EmptyEnum(e.name.clone())),

            SchemaNode::Fixed(fixed) => Ok(Payload::Bytes(primitive::generate_fixed_bytes(
                ctx, fixed.size,
            ))),

            SchemaNode::Reference(name) => {
                let resolved = self
                    .schema
                    .resolve(node)
                    .map_err(|_| GeneratorError::UnresolvedReference(name.clone()))?;
                self.walk(resolved, ctx, depth)
            }
        }
    }

    /// Pick a branch that does not open another record, if the union has one.
    fn shallow_branch<'b>(
        &self,
        branches: &'b [SchemaNode],
        ctx: &mut GenerationContext,
    ) -> Option<&'b SchemaNode> {
        let shallow: Vec<&SchemaNode> = branches
            .iter()
            .filter(|b| !matches!(self.schema.resolve(b), Ok(SchemaNode::Record(_)) | Err(_)))
            .collect();
        match ctx.choose(&shallow) {
            Some(branch) => Some(*branch),
            None => ctx.choose(branches),
        }
    }

    fn walk_record(
        &self,
        record: &RecordSchema,
        ctx: &mut GenerationContext,
        depth: usize,
        terminal: bool,
    ) -> Result<Payload, GeneratorError> {
        let mut map = IndexMap::with_capacity(record.fields.len());
        for field in &record.fields {
            let value = self.walk_field(field, ctx, depth, terminal)?;
            map.insert(field.name.clone(), value);
        }
        Ok(Payload::Map(map))
    }

    fn walk_field(
        &self,
        field: &Field,
        ctx: &mut GenerationContext,
        depth: usize,
        terminal: bool,
    ) -> Result<Payload, GeneratorError> {
        if let Some(default) = &field.default {
            if terminal || ctx.chance(DEFAULT_REUSE_PROBABILITY) {
                return Ok(default.clone());
            }
        }

        if email::is_email_field(&field.name) && email::accepts_string(&field.node) {
            return Ok(Payload::String(email::generate_email(ctx)));
        }

        self.walk(&field.node, ctx, depth + 1)
    }
}

/// Outcome of the bounded valid-generation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    /// A payload passed validation
    Valid,
    /// Every attempt was rejected; the payload is the failure sentinel
    Failed,
}

/// A generated case payload together with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub payload: Payload,
    pub status: GenerationStatus,
    /// Number of attempts consumed
    pub attempts: usize,
}

impl Generated {
    /// Whether generation gave up and produced the failure sentinel.
    pub fn is_failed(&self) -> bool {
        self.status == GenerationStatus::Failed
    }
}

/// Generate a record payload that `validator` accepts.
///
/// Retries up to `attempts` times (at least once). When nothing validates,
/// or the root does not produce a mapping, the result is the
/// `{"_failed": true}` sentinel. Schema-level errors are returned as-is.
pub fn generate_valid_record<V: PayloadValidator>(
    schema: &Schema,
    ctx: &mut GenerationContext,
    validator: &V,
    attempts: usize,
) -> Result<Generated, GeneratorError> {
    let attempts = attempts.max(1);
    let generator = PayloadGenerator::new(schema);

    for attempt in 1..=attempts {
        let payload = generator.generate(ctx)?;
        if !matches!(payload, Payload::Map(_)) {
            warn!(
                "Schema root produced {} instead of a record; giving up",
                payload.kind_name()
            );
            break;
        }
        match validator.validate(schema, &payload) {
            Ok(()) => {
                debug!("Generated valid payload on attempt {attempt}");
                return Ok(Generated {
                    payload,
                    status: GenerationStatus::Valid,
                    attempts: attempt,
                });
            }
            Err(violation) => {
                debug!("Attempt {attempt} rejected: {violation}");
            }
        }
    }

    warn!("No valid payload after {attempts} attempts, emitting failure sentinel");
    Ok(Generated {
        payload: Payload::failed_sentinel(),
        status: GenerationStatus::Failed,
        attempts,
    })
}
