//! Run orchestration: generate cases, deliver them concurrently, classify.

use crate::outcome::{classify, Expectation};
use crate::probe::HttpProbe;
use crate::report::{CaseResult, RunReport};
use anyhow::{Context, Result};
use chrono::Utc;
use contract_core::{AvroValidator, Payload, PayloadValidator, Schema};
use futures::stream::{self, StreamExt};
use payload_generator::{
    generate_invalid, generate_valid_record, FaultStrategy, GenerationContext, GenerationStatus,
    GeneratorError,
};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Context stream for valid cases.
pub const VALID_STREAM: u64 = 0;

/// Context stream for invalid cases.
pub const INVALID_STREAM: u64 = 1;

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub url: String,
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
    pub n_valid: u64,
    pub n_invalid: u64,
    pub seed: u64,
    /// Count 3xx as success for valid cases
    pub accept_3xx: bool,
    /// Requests in flight at once (at least 1)
    pub concurrency: usize,
    /// Generation attempts per valid case (at least 1)
    pub attempts: usize,
}

impl RunConfig {
    /// Configuration with the CLI defaults for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: "POST".to_string(),
            headers: Vec::new(),
            timeout: Duration::from_secs(10),
            n_valid: 25,
            n_invalid: 25,
            seed: 0,
            accept_3xx: false,
            concurrency: 4,
            attempts: payload_generator::DEFAULT_ATTEMPTS,
        }
    }
}

/// A generated case waiting to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedCase {
    pub case_id: String,
    pub expectation: Expectation,
    pub payload: Payload,
    pub fault: Option<FaultStrategy>,
    pub field: Option<String>,
    pub generation: GenerationStatus,
}

impl PreparedCase {
    pub fn is_valid_case(&self) -> bool {
        self.expectation == Expectation::Pass
    }
}

/// Generate all cases of a run.
///
/// Each case gets its own context derived from the seed, its stream and its
/// index, so any single case can be regenerated in isolation.
pub fn prepare_cases<V: PayloadValidator>(
    schema: &Schema,
    config: &RunConfig,
    validator: &V,
) -> Result<Vec<PreparedCase>, GeneratorError> {
    let capacity = usize::try_from(config.n_valid + config.n_invalid).unwrap_or(0);
    let mut cases = Vec::with_capacity(capacity);

    for index in 0..config.n_valid {
        let mut ctx = GenerationContext::for_case(config.seed, VALID_STREAM, index);
        let generated = generate_valid_record(schema, &mut ctx, validator, config.attempts)?;
        if generated.is_failed() {
            warn!("Case V{index:03}: generation failed after {} attempts", generated.attempts);
        }
        cases.push(PreparedCase {
            case_id: format!("V{index:03}"),
            expectation: Expectation::Pass,
            payload: generated.payload,
            fault: None,
            field: None,
            generation: generated.status,
        });
    }

    for index in 0..config.n_invalid {
        let mut ctx = GenerationContext::for_case(config.seed, INVALID_STREAM, index);
        let mutation = generate_invalid(schema, &mut ctx, validator)?;
        debug!(
            "Case I{index:03}: {}",
            mutation
                .strategy
                .map(|s| s.to_string())
                .unwrap_or_else(|| "sentinel".to_string())
        );
        cases.push(PreparedCase {
            case_id: format!("I{index:03}"),
            expectation: Expectation::Fail,
            payload: mutation.payload,
            fault: mutation.strategy,
            field: mutation.field,
            generation: GenerationStatus::Valid,
        });
    }

    Ok(cases)
}

/// Send one case and classify the outcome.
///
/// Cases whose generation failed are not sent.
pub async fn execute_case(probe: &HttpProbe, case: PreparedCase, accept_3xx: bool) -> CaseResult {
    let outcome = match case.generation {
        GenerationStatus::Failed => None,
        GenerationStatus::Valid => Some(probe.send(&case.payload).await),
    };
    let verdict = classify(case.expectation, outcome.as_ref(), accept_3xx);
    debug!("Case {}: {verdict}", case.case_id);

    CaseResult {
        was_generated_valid: case.is_valid_case(),
        case_id: case.case_id,
        expected: case.expectation,
        fault: case.fault,
        field: case.field,
        generation: case.generation,
        payload: case.payload,
        probe: outcome,
        ok: verdict.is_ok(),
        verdict,
    }
}

/// Run all cases against the configured endpoint using `validator` for the
/// generation self-checks.
pub async fn run_with_validator<V: PayloadValidator>(
    schema: &Schema,
    config: &RunConfig,
    validator: &V,
) -> Result<RunReport> {
    let probe = HttpProbe::new(&config.method, &config.url, &config.headers, config.timeout)
        .context("Failed to set up HTTP probe")?;

    let started_at = Utc::now();
    let cases =
        prepare_cases(schema, config, validator).context("Failed to generate test cases")?;

    info!(
        "Sending {} valid and {} invalid cases to {} {} (seed={}, concurrency={})",
        config.n_valid,
        config.n_invalid,
        probe.method(),
        probe.url(),
        config.seed,
        config.concurrency
    );

    let results: Vec<CaseResult> = stream::iter(cases)
        .map(|case| execute_case(&probe, case, config.accept_3xx))
        .buffered(config.concurrency.max(1))
        .collect()
        .await;

    let report = RunReport::new(
        config.url.clone(),
        probe.method().to_string(),
        config.seed,
        started_at,
        results,
    );
    info!("{}", report.summary_line());
    Ok(report)
}

/// Run all cases with the bundled [`AvroValidator`].
pub async fn run(schema: &Schema, config: &RunConfig) -> Result<RunReport> {
    run_with_validator(schema, config, &AvroValidator).await
}
