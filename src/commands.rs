//! Subcommand implementations.
//!
//! Each command writes its primary output to the given writer (stdout in
//! the binary) and logs through `tracing`, which goes to stderr.

use crate::cli::{GenerateArgs, SchemaArgs};
use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use contract_core::{AvroValidator, Schema, SchemaNode};
use contract_runner::runner::{INVALID_STREAM, VALID_STREAM};
use contract_runner::{render, RunArgs, RunReport};
use payload_generator::{generate_invalid, generate_valid_record, GenerationContext};
use std::io::Write;
use std::path::Path;

/// Exit status when `--fail-on-any` is set and a case was not ok.
pub const EXIT_CASES_FAILED: i32 = 2;

fn load_schema(path: &Path) -> Result<Schema> {
    Schema::from_file(path).with_context(|| format!("Failed to load schema from {path:?}"))
}

/// Run generated cases against the endpoint and write the report.
pub async fn run_contract<W: Write>(args: &RunArgs, out: &mut W) -> Result<RunReport> {
    let schema = load_schema(&args.schema)?;
    let config = args.to_config()?;

    let report = contract_runner::run(&schema, &config).await?;

    let rendered = render(&report, args.output_format).context("Failed to render report")?;
    out.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(report)
}

/// Process exit status for a finished run.
pub fn exit_code(args: &RunArgs, report: &RunReport) -> i32 {
    if args.fail_on_any && !report.all_ok() {
        EXIT_CASES_FAILED
    } else {
        0
    }
}

/// Print generated payloads as JSON lines.
///
/// Uses the same per-case contexts as `run`, so payload `i` here equals
/// case `V{i}` (or `I{i}` with `--invalid`) of a run with the same seed.
pub fn generate<W: Write>(args: &GenerateArgs, out: &mut W) -> Result<()> {
    let schema = load_schema(&args.schema)?;

    for index in 0..args.count {
        let payload = if args.invalid {
            let mut ctx = GenerationContext::for_case(args.seed, INVALID_STREAM, index);
            generate_invalid(&schema, &mut ctx, &AvroValidator)
                .with_context(|| format!("Failed to generate invalid payload {index}"))?
                .payload
        } else {
            let mut ctx = GenerationContext::for_case(args.seed, VALID_STREAM, index);
            generate_valid_record(&schema, &mut ctx, &AvroValidator, args.attempts)
                .with_context(|| format!("Failed to generate payload {index}"))?
                .payload
        };
        writeln!(out, "{}", serde_json::to_string(&payload)?)?;
    }

    tracing::info!(
        "Generated {} {} payloads (seed={})",
        args.count,
        if args.invalid { "invalid" } else { "valid" },
        args.seed
    );
    Ok(())
}

/// Print a summary of the schema.
pub fn check_schema<W: Write>(args: &SchemaArgs, out: &mut W) -> Result<()> {
    let schema = load_schema(&args.schema)?;

    let named = schema.named_types();
    match schema.root_record() {
        Some(record) => {
            writeln!(
                out,
                "Schema: {} (record, {} fields)",
                record.name,
                record.fields.len()
            )?;
            if !named.is_empty() {
                writeln!(out, "Named types: {}", named.join(", "))?;
            }

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Field", "Type", "Required", "Default"]);
            for field in &record.fields {
                let default = field
                    .default
                    .as_ref()
                    .map(|d| d.to_json().to_string())
                    .unwrap_or_else(|| "-".to_string());
                table.add_row(vec![
                    Cell::new(&field.name),
                    Cell::new(describe(&schema, &field.node)),
                    Cell::new(if field.is_required() { "yes" } else { "no" }),
                    Cell::new(default),
                ]);
            }
            writeln!(out, "{table}")?;
        }
        None => {
            writeln!(out, "Schema: {}", schema.root().describe())?;
            if !named.is_empty() {
                writeln!(out, "Named types: {}", named.join(", "))?;
            }
            writeln!(
                out,
                "Root is not a record: invalid cases will use the {{\"_is_invalid\": true}} sentinel"
            )?;
        }
    }

    Ok(())
}

/// Node description with references expanded one level.
fn describe(schema: &Schema, node: &SchemaNode) -> String {
    match node {
        SchemaNode::Reference(name) => match schema.get_named(name) {
            Some(resolved) => resolved.describe(),
            None => format!("{name} (unresolved)"),
        },
        other => other.describe(),
    }
}
