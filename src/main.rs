//! Command-line interface for avroman
//!
//! # Usage Examples
//!
//! ```bash
//! # Valid cases must get 2xx, invalid cases 4xx
//! avroman run --schema user.avsc --url http://localhost:8080/users \
//!   --n-valid 50 --n-invalid 50 --seed 7
//!
//! # Extra headers, markdown report, non-zero exit on any bad case
//! avroman run --schema user.avsc --url http://localhost:8080/users \
//!   --headers '{"Authorization": "Bearer token"}' \
//!   --output-format markdown --fail-on-any
//!
//! # Print payloads without sending them
//! avroman generate --schema user.avsc --count 3 --invalid
//! ```
//!
//! Logging is controlled with `RUST_LOG` (e.g. `RUST_LOG=debug`) and goes to
//! stderr; reports and generated payloads go to stdout.

use avroman::cli::{Cli, Commands};
use avroman::commands;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match run().await {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
    Ok(())
}

async fn run() -> anyhow::Result<i32> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout();

    match cli.command {
        Commands::Run(args) => {
            let report = commands::run_contract(&args, &mut stdout).await?;
            Ok(commands::exit_code(&args, &report))
        }
        Commands::Generate(args) => {
            commands::generate(&args, &mut stdout)?;
            Ok(0)
        }
        Commands::CheckSchema(args) => {
            commands::check_schema(&args, &mut stdout)?;
            Ok(0)
        }
    }
}
