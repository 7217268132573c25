//! Server version gate

use crate::error::{RunError, RunResult};
use ms_db::SqlExecutor;

/// Leading numeric segment of a version string, e.g. `10` for `10.5.9-MariaDB`
pub fn parse_major(version: &str) -> Option<u32> {
    version.split('.').next()?.trim().parse().ok()
}

/// Query the server version and fail the run unless its major version is at
/// least `required`. Returns the reported version string.
pub async fn check_version(executor: &dyn SqlExecutor, required: u32) -> RunResult<String> {
    let version = executor
        .server_version()
        .await
        .map_err(RunError::VersionQuery)?;

    match parse_major(&version) {
        None => Err(RunError::UnparseableVersion { version }),
        Some(major) if major < required => Err(RunError::VersionTooOld { required, version }),
        Some(major) => {
            log::debug!(
                "Server version {} (major {}) satisfies minimum {}",
                version,
                major,
                required
            );
            Ok(version)
        }
    }
}
