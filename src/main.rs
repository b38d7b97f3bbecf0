//! jsonburst - Concurrent HTTP burst tester
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use jsonburst::burst::Coordinator;
use jsonburst::config::{CliArgs, RunConfig};
use jsonburst::report::{print_header, print_outcome, print_summary};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments (missing URL exits with clap's usage error)
    let args = CliArgs::parse();

    setup_logging(args.verbose)?;

    let config = RunConfig::from_args(args).context("Invalid arguments")?;

    let coordinator = Coordinator::new(config).context("Failed to initialize coordinator")?;
    let config = coordinator.config();
    print_header(&config.url, config.workers, config.timeout);

    // Multi-threaded so workers run in parallel, not just concurrently
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create async runtime")?;

    let report = runtime.block_on(coordinator.run(print_outcome));

    print_summary(&report);

    if report.failures() > 0 {
        info!(failures = report.failures(), "Burst completed with failures");
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let default = if verbose {
        "jsonburst=debug,warn"
    } else {
        "jsonburst=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
