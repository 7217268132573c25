//! Shared utilities for CLI commands

use anyhow::Result;
use ms_core::{Roots, RunConfig};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Commands log the failure themselves and return `Err(ExitCode(N).into())`;
/// `main` turns it into the process exit status.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Empty: the failure was already logged by the command
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Configuration could not be loaded or is invalid
pub(crate) const EXIT_CONFIG: i32 = 1;
/// The connection pool could not be created
pub(crate) const EXIT_CONNECTION: i32 = 3;
/// The run aborted: server too old, or an invalid database name
pub(crate) const EXIT_ABORTED: i32 = 4;

/// Initialise `env_logger`. `RUST_LOG` wins over `--verbose`.
pub(crate) fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .try_init();
}

/// Project directory from the global arguments
pub(crate) fn project_dir(global: &GlobalArgs) -> PathBuf {
    PathBuf::from(&global.project_dir)
}

/// Load the run configuration and apply the password override.
///
/// Failures are logged and returned as [`ExitCode`] `1`.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<RunConfig> {
    let dir = project_dir(global);
    let loaded = match &global.config {
        Some(path) => RunConfig::load(Path::new(path)),
        None => RunConfig::load_from_dir(&dir),
    };

    match loaded {
        Ok(config) => Ok(config.with_password(global.password.clone())),
        Err(e) => {
            log::error!("{}", e);
            Err(ExitCode(EXIT_CONFIG).into())
        }
    }
}

/// Script roots for the loaded configuration
pub(crate) fn build_roots(config: &RunConfig, global: &GlobalArgs) -> Roots {
    Roots::from_config(config, &project_dir(global))
}

/// Calculate column widths for a table given headers and row data.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }
    widths
}

/// Render a left-aligned table: header row, dashed separator, data rows.
/// Columns are separated by two spaces.
pub(crate) fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths = calculate_column_widths(headers, rows);
    let render = |cells: &[&str]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let separator: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    let mut lines = vec![render(headers), separator.join("  ")];
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(render(&cells));
    }
    lines.join("\n")
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
