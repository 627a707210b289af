//! CLI argument definitions for a contract run.

use crate::runner::RunConfig;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Output format for the run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Markdown,
}

/// Arguments for running generated cases against an endpoint.
#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// Path to the Avro schema (.avsc) describing the request body
    #[arg(long, short = 's', env = "AVROMAN_SCHEMA")]
    pub schema: PathBuf,

    /// Endpoint URL the payloads are sent to
    #[arg(long, short = 'u', env = "AVROMAN_URL")]
    pub url: String,

    /// HTTP method
    #[arg(long, default_value = "POST", env = "AVROMAN_METHOD")]
    pub method: String,

    /// Number of valid cases
    #[arg(long, default_value = "25")]
    pub n_valid: u64,

    /// Number of invalid cases
    #[arg(long, default_value = "25")]
    pub n_invalid: u64,

    /// Random seed; the same seed reproduces the same cases
    #[arg(long, default_value = "0", env = "AVROMAN_SEED")]
    pub seed: u64,

    /// Extra request headers as a JSON object, e.g. '{"Authorization": "Bearer x"}'
    #[arg(long, env = "AVROMAN_HEADERS")]
    pub headers: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "10.0", env = "AVROMAN_TIMEOUT")]
    pub timeout: f64,

    /// Count 3xx responses as success for valid cases
    #[arg(long)]
    pub valid_accept_3xx: bool,

    /// Exit with status 2 if any case is not ok
    #[arg(long)]
    pub fail_on_any: bool,

    /// Number of requests in flight at once
    #[arg(long, default_value = "4", env = "AVROMAN_CONCURRENCY")]
    pub concurrency: usize,

    /// Generation attempts per valid case before giving up
    #[arg(long, default_value = "5")]
    pub attempts: usize,

    /// Report format
    #[arg(long, value_enum, default_value = "table")]
    pub output_format: OutputFormat,
}

impl RunArgs {
    /// Validate the arguments and build the run configuration.
    pub fn to_config(&self) -> Result<RunConfig> {
        let headers = parse_headers(self.headers.as_deref())?;

        if !self.timeout.is_finite() || self.timeout <= 0.0 {
            anyhow::bail!("Timeout must be a positive number of seconds");
        }
        let timeout = match Duration::try_from_secs_f64(self.timeout) {
            Ok(timeout) => timeout,
            Err(e) => anyhow::bail!("Invalid timeout {}: {e}", self.timeout),
        };

        Ok(RunConfig {
            url: self.url.clone(),
            method: self.method.to_uppercase(),
            headers,
            timeout,
            n_valid: self.n_valid,
            n_invalid: self.n_invalid,
            seed: self.seed,
            accept_3xx: self.valid_accept_3xx,
            concurrency: self.concurrency.max(1),
            attempts: self.attempts.max(1),
        })
    }
}

/// Parse `--headers` into name/value pairs.
///
/// The input must be a JSON object. String values are used as-is; other
/// values are sent as their JSON text.
pub fn parse_headers(raw: Option<&str>) -> Result<Vec<(String, String)>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(Vec::new());
    };

    let value: serde_json::Value =
        serde_json::from_str(raw).context("Failed to parse --headers as JSON")?;
    let serde_json::Value::Object(object) = value else {
        anyhow::bail!("Header must be a JSON object.");
    };

    Ok(object
        .into_iter()
        .map(|(name, value)| {
            let value = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (name, value)
        })
        .collect())
}
