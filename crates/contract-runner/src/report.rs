//! Run results and their table, markdown and JSON renderings.

use crate::args::OutputFormat;
use crate::outcome::{Expectation, Verdict};
use crate::probe::ProbeOutcome;
use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use contract_core::Payload;
use payload_generator::{FaultStrategy, GenerationStatus};
use serde::Serialize;

/// Longest response excerpt shown in table and markdown output.
const RESPONSE_COLUMN_WIDTH: usize = 60;

/// Result of one generated case.
#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    /// `V000`-style id for valid cases, `I000` for invalid ones
    pub case_id: String,
    pub was_generated_valid: bool,
    pub expected: Expectation,
    /// Fault applied to an invalid case, `None` for valid cases and sentinels
    pub fault: Option<FaultStrategy>,
    /// Field the fault was applied to
    pub field: Option<String>,
    pub generation: GenerationStatus,
    pub payload: Payload,
    /// `None` when nothing was sent
    pub probe: Option<ProbeOutcome>,
    pub ok: bool,
    pub verdict: Verdict,
}

impl CaseResult {
    fn status_label(&self) -> String {
        match &self.probe {
            Some(ProbeOutcome {
                status: Some(status),
                ..
            }) => status.to_string(),
            Some(_) => "ERR".to_string(),
            None => "-".to_string(),
        }
    }

    fn elapsed_label(&self) -> String {
        self.probe
            .as_ref()
            .map(|p| p.elapsed_ms.to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    fn fault_label(&self) -> String {
        match (&self.fault, self.was_generated_valid) {
            (Some(fault), _) => fault.to_string(),
            (None, true) => "-".to_string(),
            (None, false) => "sentinel".to_string(),
        }
    }

    fn response_label(&self) -> String {
        let text = match &self.probe {
            Some(ProbeOutcome {
                error: Some(error), ..
            }) => error.as_str(),
            Some(probe) => probe.snippet.as_str(),
            None => "generation failed",
        };
        excerpt(text, RESPONSE_COLUMN_WIDTH)
    }
}

/// All case results of a run plus totals.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub url: String,
    pub method: String,
    pub seed: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total: usize,
    pub good: usize,
    pub bad: usize,
    pub cases: Vec<CaseResult>,
}

impl RunReport {
    /// Build a report; totals are computed from `cases`.
    pub fn new(
        url: impl Into<String>,
        method: impl Into<String>,
        seed: u64,
        started_at: DateTime<Utc>,
        cases: Vec<CaseResult>,
    ) -> Self {
        let good = cases.iter().filter(|c| c.ok).count();
        Self {
            url: url.into(),
            method: method.into(),
            seed,
            started_at,
            finished_at: Utc::now(),
            total: cases.len(),
            good,
            bad: cases.len() - good,
            cases,
        }
    }

    pub fn all_ok(&self) -> bool {
        self.bad == 0
    }

    /// `Total: N  GOOD: g  BAD: b`
    pub fn summary_line(&self) -> String {
        format!(
            "Total: {}  GOOD: {}  BAD: {}",
            self.total, self.good, self.bad
        )
    }

    /// Number of cases with the given verdict.
    pub fn count(&self, verdict: Verdict) -> usize {
        self.cases.iter().filter(|c| c.verdict == verdict).count()
    }
}

/// Render a report in the requested format.
pub fn render(report: &RunReport, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Table => Ok(format_table(report)),
        OutputFormat::Markdown => Ok(format_markdown(report)),
        OutputFormat::Json => format_json(report),
    }
}

/// Format report as a console table.
pub fn format_table(report: &RunReport) -> String {
    let mut output = String::new();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Case", "Valid", "Expected", "Fault", "Status", "Ok", "ms", "Response",
    ]);

    for case in &report.cases {
        let ok_cell = if case.ok {
            Cell::new("OK").fg(Color::Green)
        } else {
            Cell::new(case.verdict.label()).fg(Color::Red)
        };

        table.add_row(vec![
            Cell::new(&case.case_id),
            Cell::new(case.was_generated_valid),
            Cell::new(case.expected),
            Cell::new(case.fault_label()),
            Cell::new(case.status_label()),
            ok_cell,
            Cell::new(case.elapsed_label()),
            Cell::new(case.response_label()),
        ]);
    }

    output.push_str(&table.to_string());
    output.push('\n');
    output.push_str(&report.summary_line());
    output.push('\n');
    output
}

/// Format report as markdown.
pub fn format_markdown(report: &RunReport) -> String {
    let mut output = String::new();

    output.push_str("# Contract Test Results\n\n");
    output.push_str(&format!(
        "**Target:** `{} {}`  \n**Seed:** {}  \n**Finished at:** {}\n\n",
        report.method,
        report.url,
        report.seed,
        report.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output.push_str("## Summary\n\n");
    output.push_str(&format!("- **Total:** {}\n", report.total));
    output.push_str(&format!("- **Good:** {}\n", report.good));
    output.push_str(&format!("- **Bad:** {}\n", report.bad));
    for verdict in [
        Verdict::UnexpectedStatus,
        Verdict::TransportError,
        Verdict::GenerationFailed,
    ] {
        let count = report.count(verdict);
        if count > 0 {
            output.push_str(&format!("  - {verdict}: {count}\n"));
        }
    }

    output.push_str("\n## Cases\n\n");
    output.push_str("| Case | Valid | Expected | Fault | Status | Ok | ms | Response |\n");
    output.push_str("|------|-------|----------|-------|--------|----|----|----------|\n");

    for case in &report.cases {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
            case.case_id,
            case.was_generated_valid,
            case.expected,
            case.fault_label(),
            case.status_label(),
            if case.ok { "OK" } else { case.verdict.label() },
            case.elapsed_label(),
            case.response_label().replace('|', "\\|"),
        ));
    }

    output.push('\n');
    output.push_str(&report.summary_line());
    output.push('\n');
    output
}

/// Format report as pretty-printed JSON.
pub fn format_json(report: &RunReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Single-line excerpt of at most `width` characters.
fn excerpt(text: &str, width: usize) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= width {
        flat
    } else {
        let mut cut: String = flat.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
