//! Expected-vs-actual classification of delivered cases.

use crate::probe::ProbeOutcome;
use serde::Serialize;
use std::fmt;

/// What the endpoint is expected to do with a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Expectation {
    /// Accept (the payload was generated valid)
    Pass,
    /// Reject (the payload was generated invalid)
    Fail,
}

impl Expectation {
    pub fn for_case(generated_valid: bool) -> Self {
        if generated_valid {
            Self::Pass
        } else {
            Self::Fail
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Final classification of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The endpoint behaved as expected
    Ok,
    /// No valid payload could be generated; nothing was sent
    GenerationFailed,
    /// The request got no response
    TransportError,
    /// A response arrived with the wrong status class
    UnexpectedStatus,
}

impl Verdict {
    pub fn is_ok(&self) -> bool {
        *self == Self::Ok
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::GenerationFailed => "generation_failed",
            Self::TransportError => "transport_error",
            Self::UnexpectedStatus => "unexpected_status",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether `status` matches the expectation.
///
/// Valid cases pass on 2xx, or on any status below 400 when `accept_3xx`
/// is set. Invalid cases pass only on 4xx. No status never passes.
pub fn status_matches(expectation: Expectation, status: Option<u16>, accept_3xx: bool) -> bool {
    let Some(status) = status else {
        return false;
    };
    match expectation {
        Expectation::Pass if accept_3xx => (200..400).contains(&status),
        Expectation::Pass => (200..300).contains(&status),
        Expectation::Fail => (400..500).contains(&status),
    }
}

/// Classify a case from its expectation and probe outcome.
///
/// `probe` is `None` when generation failed and nothing was sent.
pub fn classify(
    expectation: Expectation,
    probe: Option<&ProbeOutcome>,
    accept_3xx: bool,
) -> Verdict {
    match probe {
        None => Verdict::GenerationFailed,
        Some(outcome) if outcome.is_transport_error() => Verdict::TransportError,
        Some(outcome) if status_matches(expectation, outcome.status, accept_3xx) => Verdict::Ok,
        Some(_) => Verdict::UnexpectedStatus,
    }
}
