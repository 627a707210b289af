//! Core types for avroman contract testing.
//!
//! This crate provides the foundational types shared by the generator and
//! the runner:
//!
//! - [`Schema`] / [`SchemaNode`] - the parsed contract grammar
//! - [`Payload`] - schema-free value tree produced by the generator
//! - [`PayloadValidator`] - the "does P conform to S" predicate, with the
//!   bundled [`AvroValidator`]
//!
//! # Architecture
//!
//! ```text
//! contract-core (this crate)
//!    │
//!    ├─── payload-generator  (valid generation + mutation over SchemaNode)
//!    │
//!    └─── contract-runner    (HTTP probing and reporting of Payloads)
//! ```
//!
//! # Example
//!
//! ```rust
//! use contract_core::{AvroValidator, Payload, PayloadValidator, Schema};
//!
//! let schema = Schema::from_json_str(r#"{
//!     "type": "record",
//!     "name": "User",
//!     "fields": [{"name": "age", "type": "int"}]
//! }"#).unwrap();
//!
//! let payload = Payload::map_from([("age", Payload::Int(42))]);
//! assert!(AvroValidator.is_valid(&schema, &payload));
//! ```

pub mod schema;
pub mod types;
pub mod validate;
pub mod values;

// Re-exports for convenience
pub use schema::{EnumSchema, Field, FixedSchema, RecordSchema, Schema, SchemaError, SchemaNode};
pub use types::{LogicalType, PrimitiveKind};
pub use validate::{AvroValidator, PayloadValidator, Violation, ViolationKind};
pub use values::{Payload, FAILED_MARKER, INVALID_MARKER};
