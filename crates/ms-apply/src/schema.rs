//! Schema applier
//!
//! Runs definition scripts in list order. Every target ends in exactly one
//! [`ApplyOutcome`]; only an invalid database name stops the phase.

use crate::error::{RunError, RunResult};
use crate::outcome::{
    classify_definition, ApplyOutcome, FailureReason, Phase, PhaseReport, TargetReport,
};
use ms_core::{BlobReader, DatabaseName, Roots, TargetKind};
use ms_db::SqlExecutor;
use std::collections::HashSet;

/// Databases already confirmed during the current run.
///
/// Created empty for each schema phase and dropped with it. A database is
/// recorded after its first check whether or not creation succeeded, so the
/// server is asked at most once per database.
#[derive(Debug, Default)]
pub struct DatabaseExistenceCache {
    seen: HashSet<DatabaseName>,
}

impl DatabaseExistenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, database: &str) -> bool {
        self.seen.contains(database)
    }

    pub fn insert(&mut self, database: DatabaseName) {
        self.seen.insert(database);
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Applies definition targets
pub struct SchemaApplier<'a> {
    executor: &'a dyn SqlExecutor,
    blobs: &'a dyn BlobReader,
    roots: &'a Roots,
}

impl<'a> SchemaApplier<'a> {
    pub fn new(executor: &'a dyn SqlExecutor, blobs: &'a dyn BlobReader, roots: &'a Roots) -> Self {
        Self {
            executor,
            blobs,
            roots,
        }
    }

    /// Apply every target with a fresh existence cache
    pub async fn apply(&self, targets: &[String]) -> RunResult<PhaseReport> {
        let mut cache = DatabaseExistenceCache::new();
        self.apply_with_cache(targets, &mut cache).await
    }

    /// Apply every target, in order, sharing `cache`
    pub async fn apply_with_cache(
        &self,
        targets: &[String],
        cache: &mut DatabaseExistenceCache,
    ) -> RunResult<PhaseReport> {
        log::info!("Starting SQL table definition script");

        let mut report = PhaseReport::new(Phase::Schema);
        for target in targets {
            let result = self.apply_target(target, cache).await?;
            report.push(result);
        }

        log::info!(
            "SQL table definition script succeeded. {} objects created",
            report.created()
        );
        Ok(report)
    }

    /// Apply a single target
    pub async fn apply_target(
        &self,
        target: &str,
        cache: &mut DatabaseExistenceCache,
    ) -> RunResult<TargetReport> {
        let resolved = match self.roots.resolve(target, TargetKind::Definition) {
            Ok(resolved) => resolved,
            Err(e) => {
                log::warn!("{}, skipping", e);
                return Ok(TargetReport::new(target, target, ApplyOutcome::Skipped(e.into())));
            }
        };

        let content = match self.blobs.read(&resolved.path) {
            Ok(content) => content,
            Err(e) => {
                if self.roots.is_shared(target, TargetKind::Definition) {
                    log::warn!(
                        "{}.sql is not a shared definition file! Skipping... ({})",
                        target,
                        e
                    );
                } else {
                    log::warn!(
                        "An error occurred while reading definition file {}.sql! Skipping... ({})",
                        target,
                        e
                    );
                }
                return Ok(TargetReport::new(
                    target,
                    resolved.description,
                    ApplyOutcome::Failed(FailureReason::Read(e.to_string())),
                ));
            }
        };

        self.ensure_database(target, &resolved.database, cache).await?;

        let outcome = match self.executor.execute(&content).await {
            Ok(result) => classify_definition(&result),
            Err(e) => {
                log::warn!(
                    "An error occurred while executing {}.sql! Skipping... ({})",
                    target,
                    e
                );
                return Ok(TargetReport::new(
                    target,
                    resolved.description,
                    ApplyOutcome::Failed(FailureReason::Execute(e.to_string())),
                ));
            }
        };

        match outcome {
            ApplyOutcome::Created => log::info!("{} created successfully", resolved.description),
            _ => log::info!("{} skipped - already exists", resolved.description),
        }

        Ok(TargetReport::new(target, resolved.description, outcome))
    }

    /// Make sure `database` exists, creating it on first sight.
    ///
    /// The name is validated before the server is asked anything; an invalid
    /// name is fatal. Check or create failures are logged and the target
    /// goes on to run (its own script will report the real problem).
    async fn ensure_database(
        &self,
        target: &str,
        database: &str,
        cache: &mut DatabaseExistenceCache,
    ) -> RunResult<()> {
        if cache.contains(database) {
            return Ok(());
        }

        let name = DatabaseName::parse(database).map_err(|_| {
            log::error!("Invalid database name: {}", database);
            RunError::InvalidDatabaseName {
                database: database.to_string(),
                target: target.to_string(),
            }
        })?;

        match self.executor.schema_exists(name.as_str()).await {
            Ok(true) => log::debug!("Database {} already exists", name),
            Ok(false) => match self.executor.create_database(name.as_str()).await {
                Ok(_) => log::info!("Database {} created", name),
                Err(e) => log::warn!("Could not create database {}: {}", name, e),
            },
            Err(e) => log::warn!("Could not check whether database {} exists: {}", name, e),
        }

        cache.insert(name);
        Ok(())
    }
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
