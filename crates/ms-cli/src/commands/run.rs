//! Run command implementation

use anyhow::{Context, Result};
use ms_apply::{PhaseReport, RunReport, Runner};
use ms_core::{BlobReader, FsBlobReader, Roots, RunConfig};
use ms_db::{MariaDbBackend, SqlExecutor};

use crate::cli::{GlobalArgs, RunArgs};
use crate::commands::common::{
    build_roots, load_config, ExitCode, EXIT_ABORTED, EXIT_CONFIG, EXIT_CONNECTION,
};

/// Execute the run command
pub(crate) async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    log::info!("Script begin");

    let config = load_config(global)?;
    let connection = config.connection().map_err(|e| {
        log::error!("{}", e);
        ExitCode(EXIT_CONFIG)
    })?;

    log::info!("Starting database connection");
    let backend = MariaDbBackend::connect(connection).await.map_err(|e| {
        log::error!("{}", e);
        ExitCode(EXIT_CONNECTION)
    })?;
    log::info!("Database connection started");

    let roots = build_roots(&config, global);
    let report = run_project(&backend, &FsBlobReader, roots, &config).await?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    }

    log::info!("Script end");
    Ok(())
}

/// Run both phases over `executor`, which is closed before this returns.
///
/// A fatal abort is logged and returned as [`ExitCode`] `4`.
pub(crate) async fn run_project(
    executor: &dyn SqlExecutor,
    blobs: &dyn BlobReader,
    roots: Roots,
    config: &RunConfig,
) -> Result<RunReport> {
    let runner = Runner::new(executor, blobs, roots);
    match runner.run(config).await {
        Ok(report) => {
            log::debug!("{}", summarize(&report.schema));
            log::debug!("{}", summarize(&report.data));
            Ok(report)
        }
        Err(e) => {
            log::error!("{}", e);
            Err(ExitCode(EXIT_ABORTED).into())
        }
    }
}

/// One-line tally of a phase
pub(crate) fn summarize(phase: &PhaseReport) -> String {
    format!(
        "{} phase: {} created, {} already existed, {} skipped, {} failed",
        phase.phase,
        phase.created(),
        phase.already_existing(),
        phase.skipped(),
        phase.failed()
    )
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
