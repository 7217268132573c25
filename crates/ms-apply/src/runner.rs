//! Run orchestration

use crate::error::RunResult;
use crate::outcome::RunReport;
use crate::schema::SchemaApplier;
use crate::seed::DataSeeder;
use crate::version::check_version;
use ms_core::{BlobReader, Roots, RunConfig};
use ms_db::SqlExecutor;

/// Sequences the version gate, schema phase and data phase over one
/// executor, and closes that executor exactly once when the run ends.
pub struct Runner<'a> {
    executor: &'a dyn SqlExecutor,
    blobs: &'a dyn BlobReader,
    roots: Roots,
}

impl<'a> Runner<'a> {
    pub fn new(executor: &'a dyn SqlExecutor, blobs: &'a dyn BlobReader, roots: Roots) -> Self {
        Self {
            executor,
            blobs,
            roots,
        }
    }

    /// Run every phase, then close the executor whether or not a phase
    /// aborted.
    pub async fn run(&self, config: &RunConfig) -> RunResult<RunReport> {
        let result = self.run_phases(config).await;
        self.executor.close().await;
        log::debug!("Closed {} executor", self.executor.db_type());
        result
    }

    async fn run_phases(&self, config: &RunConfig) -> RunResult<RunReport> {
        let server_version = match config.meta.required_major_version {
            Some(required) => Some(check_version(self.executor, required).await?),
            None => None,
        };

        let schema = SchemaApplier::new(self.executor, self.blobs, &self.roots)
            .apply(&config.definitions)
            .await?;

        let data = DataSeeder::new(self.executor, self.blobs, &self.roots)
            .with_duplicates(config.meta.seed_duplicates)
            .apply(&config.data)
            .await;

        Ok(RunReport {
            server_version,
            schema,
            data,
        })
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
