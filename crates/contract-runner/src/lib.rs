//! Contract run orchestration for avroman.
//!
//! Takes a parsed schema, generates `n_valid` valid and `n_invalid`
//! single-fault cases, sends them to an HTTP endpoint and checks that valid
//! payloads are accepted (2xx) and invalid ones rejected (4xx).
//!
//! ```text
//! Schema ──▶ prepare_cases ──▶ [PreparedCase] ──▶ HttpProbe (buffered, N in flight)
//!                                                        │
//!                                                        ▼
//!                                      classify ──▶ RunReport ──▶ table / markdown / json
//! ```

pub mod args;
pub mod outcome;
pub mod probe;
pub mod report;
pub mod runner;

#[cfg(any(test, feature = "test-util"))]
pub mod test_server;

// Re-exports for convenience
pub use args::{parse_headers, OutputFormat, RunArgs};
pub use outcome::{classify, status_matches, Expectation, Verdict};
pub use probe::{HttpProbe, ProbeError, ProbeOutcome};
pub use report::{format_json, format_markdown, format_table, render, CaseResult, RunReport};
pub use runner::{
    execute_case, prepare_cases, run, run_with_validator, PreparedCase, RunConfig,
};
