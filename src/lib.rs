//! avroman
//!
//! Contract-conformance testing for HTTP endpoints. Given an Avro schema
//! describing a request body, avroman generates payloads that conform to it
//! and payloads that violate it in exactly one way, sends them to the
//! endpoint, and reports whether valid payloads were accepted and invalid
//! ones rejected.
//!
//! # Crates
//!
//! - `contract_core` - schema model, Avro JSON parser, payload values and validation
//! - `payload_generator` - seeded valid payload generation and fault injection
//! - `contract_runner` - HTTP delivery, outcome classification and reports
//!
//! # CLI Usage
//!
//! ```bash
//! # Run 25 valid and 25 invalid cases against an endpoint
//! avroman run --schema user.avsc --url http://localhost:8080/users
//!
//! # Reproduce a run's payloads offline
//! avroman generate --schema user.avsc --count 5 --seed 7
//! avroman generate --schema user.avsc --count 5 --seed 7 --invalid
//!
//! # Inspect a schema
//! avroman check-schema --schema user.avsc
//! ```

pub mod cli;
pub mod commands;

// Re-export workspace crates for convenience
pub use contract_core;
pub use contract_runner;
pub use payload_generator;
