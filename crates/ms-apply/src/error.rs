//! Fatal run errors
//!
//! Anything in here stops the run before the remaining targets are
//! processed. Per-target problems are never errors; they are recorded as
//! an [`ApplyOutcome`](crate::outcome::ApplyOutcome) instead.

use ms_db::DbError;
use thiserror::Error;

/// Errors that abort a whole run
#[derive(Error, Debug)]
pub enum RunError {
    /// R001: The server version could not be queried
    #[error("[R001] Could not query server version: {0}")]
    VersionQuery(#[source] DbError),

    /// R002: The server version has no numeric major component
    #[error("[R002] Could not parse server version '{version}'")]
    UnparseableVersion { version: String },

    /// R003: The server is older than required
    #[error(
        "[R003] Server version is too old! Use at least {required}.0 or newer. Your version: {version}"
    )]
    VersionTooOld { required: u32, version: String },

    /// R004: A definition target names a database containing whitespace
    #[error("[R004] Invalid database name '{database}' in target '{target}'")]
    InvalidDatabaseName { database: String, target: String },
}

/// Result type alias for RunError
pub type RunResult<T> = Result<T, RunError>;
