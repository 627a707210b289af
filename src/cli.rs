//! Command-line definitions.

use clap::{Args, Parser, Subcommand};
use contract_runner::RunArgs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "avroman")]
#[command(about = "Contract tests for HTTP endpoints driven by Avro schemas")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send valid and invalid payloads to an endpoint and report how it responded
    Run(RunArgs),

    /// Print generated payloads as JSON lines without sending them
    Generate(GenerateArgs),

    /// Parse a schema and print a summary of it
    CheckSchema(SchemaArgs),
}

/// Arguments for offline payload generation.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Path to the Avro schema (.avsc)
    #[arg(long, short = 's', env = "AVROMAN_SCHEMA")]
    pub schema: PathBuf,

    /// Number of payloads to print
    #[arg(long, short = 'n', default_value = "10")]
    pub count: u64,

    /// Print single-fault invalid payloads instead of valid ones
    #[arg(long)]
    pub invalid: bool,

    /// Random seed (matches the cases of `run` with the same seed)
    #[arg(long, default_value = "0", env = "AVROMAN_SEED")]
    pub seed: u64,

    /// Generation attempts per valid payload before giving up
    #[arg(long, default_value = "5")]
    pub attempts: usize,
}

/// Arguments for schema inspection.
#[derive(Args, Clone, Debug)]
pub struct SchemaArgs {
    /// Path to the Avro schema (.avsc)
    #[arg(long, short = 's', env = "AVROMAN_SCHEMA")]
    pub schema: PathBuf,
}
