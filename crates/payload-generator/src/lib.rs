//! Payload synthesis for avroman contract testing.
//!
//! This crate turns a parsed [`contract_core::Schema`] into JSON-ready
//! payloads: valid ones from a recursive walk over the schema, and invalid
//! ones by applying exactly one fault to a valid payload.
//!
//! # Architecture
//!
//! ```text
//! Schema (.avsc)
//!        │
//!        ▼
//! ┌──────────────────┐        ┌──────────────────────┐
//! │ PayloadGenerator │───────▶│ mutate / mutate_with │
//! │ walk(node, ctx)  │        │ (one FaultStrategy)  │
//! └────────┬─────────┘        └──────────┬───────────┘
//!          │                             │
//!          ▼                             ▼
//!   Payload (valid)            validator post-check
//!                          Payload (invalid or sentinel)
//! ```
//!
//! All randomness comes from a caller-owned [`GenerationContext`]; the same
//! seed and call sequence always yields the same payloads, apart from
//! timestamp logical types which read the wall clock.
//!
//! # Example
//!
//! ```rust
//! use contract_core::{AvroValidator, PayloadValidator, Schema};
//! use payload_generator::{generate_invalid, GenerationContext, PayloadGenerator};
//!
//! let schema = Schema::from_json_str(r#"{
//!     "type": "record",
//!     "name": "User",
//!     "fields": [
//!         {"name": "age", "type": "int"},
//!         {"name": "email", "type": ["null", "string"]}
//!     ]
//! }"#).unwrap();
//!
//! let mut ctx = GenerationContext::new(42);
//! let valid = PayloadGenerator::new(&schema).generate(&mut ctx).unwrap();
//! assert!(AvroValidator.is_valid(&schema, &valid));
//!
//! let invalid = generate_invalid(&schema, &mut ctx, &AvroValidator).unwrap();
//! assert!(!AvroValidator.is_valid(&schema, &invalid.payload) || invalid.is_sentinel());
//! ```

pub mod context;
pub mod generator;
pub mod generators;
pub mod mutation;

// Re-exports for convenience
pub use context::GenerationContext;
pub use generator::{
    generate_valid_record, Generated, GenerationStatus, GeneratorError,
    PayloadGenerator, DEFAULT_ATTEMPTS, MAX_COLLECTION_LEN, MAX_DEPTH,
};
pub use mutation::{generate_invalid, mutate, mutate_with, FaultStrategy, Mutation};
