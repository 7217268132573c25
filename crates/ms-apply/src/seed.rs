//! Data seeder
//!
//! Seeds only tables that are empty. The row count runs before every insert
//! script, whether or not the script guards itself with `INSERT IGNORE`.

use crate::outcome::{
    seed_row_counts, ApplyOutcome, FailureReason, Phase, PhaseReport, SkipReason, TargetReport,
};
use ms_core::{BlobReader, Roots, SeedDuplicates, TargetKind};
use ms_db::SqlExecutor;

/// Applies data targets
pub struct DataSeeder<'a> {
    executor: &'a dyn SqlExecutor,
    blobs: &'a dyn BlobReader,
    roots: &'a Roots,
    duplicates: SeedDuplicates,
}

impl<'a> DataSeeder<'a> {
    pub fn new(executor: &'a dyn SqlExecutor, blobs: &'a dyn BlobReader, roots: &'a Roots) -> Self {
        Self {
            executor,
            blobs,
            roots,
            duplicates: SeedDuplicates::default(),
        }
    }

    /// How duplicate rows are read from the executor status
    pub fn with_duplicates(mut self, duplicates: SeedDuplicates) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Seed every target in order. Nothing in this phase is fatal.
    pub async fn apply(&self, targets: &[String]) -> PhaseReport {
        log::info!("Starting SQL table data initialization script");

        let mut report = PhaseReport::new(Phase::Data);
        for target in targets {
            report.push(self.apply_target(target).await);
        }

        log::info!(
            "SQL table data initialization script succeeded. {} tables initialized",
            report.created()
        );
        report
    }

    /// Seed a single target
    pub async fn apply_target(&self, target: &str) -> TargetReport {
        let resolved = match self.roots.resolve(target, TargetKind::Data) {
            Ok(resolved) => resolved,
            Err(e) => {
                log::warn!("{}, skipping", e);
                return TargetReport::new(target, target, ApplyOutcome::Skipped(e.into()));
            }
        };

        let content = match self.blobs.read(&resolved.path) {
            Ok(content) => content,
            Err(e) => {
                if self.roots.is_shared(target, TargetKind::Data) {
                    log::warn!("{}.sql is not a shared data file! Skipping... ({})", target, e);
                } else {
                    log::warn!(
                        "An error occurred while reading data file {}.sql! Skipping... ({})",
                        target,
                        e
                    );
                }
                return TargetReport::new(
                    target,
                    resolved.description,
                    ApplyOutcome::Failed(FailureReason::Read(e.to_string())),
                );
            }
        };

        let rows = match self
            .executor
            .count_rows(&resolved.database, &resolved.object)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                log::warn!(
                    "An error occurred while counting rows in {}! Skipping... ({})",
                    resolved.description,
                    e
                );
                return TargetReport::new(
                    target,
                    resolved.description,
                    ApplyOutcome::Failed(FailureReason::Count(e.to_string())),
                );
            }
        };

        if rows > 0 {
            log::info!(
                "Skipped initializing {} - table is not empty",
                resolved.description
            );
            return TargetReport::new(
                target,
                resolved.description,
                ApplyOutcome::Skipped(SkipReason::TableNotEmpty { rows }),
            );
        }

        match self.executor.execute(&content).await {
            Ok(result) => {
                let counts = seed_row_counts(&result, self.duplicates);
                log::info!(
                    "{} inserted {} rows ({} were already present)",
                    resolved.description,
                    counts.inserted,
                    counts.duplicates
                );
                TargetReport::new(target, resolved.description, ApplyOutcome::Created)
                    .with_rows(counts)
            }
            Err(e) => {
                log::warn!(
                    "An error occurred while executing {}.sql! Skipping... ({})",
                    target,
                    e
                );
                TargetReport::new(
                    target,
                    resolved.description,
                    ApplyOutcome::Failed(FailureReason::Execute(e.to_string())),
                )
            }
        }
    }
}

#[cfg(test)]
#[path = "seed_test.rs"]
mod tests;
