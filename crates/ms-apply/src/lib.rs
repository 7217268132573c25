//! ms-apply - Idempotent schema and seed application for Mariseed
//!
//! Drives the target resolver, blob reader and SQL executor over the
//! configured definition and data targets, classifying each outcome without
//! aborting the run. Only the version gate and an invalid database name stop
//! a run early.

pub mod error;
pub mod outcome;
pub mod runner;
pub mod schema;
pub mod seed;
pub mod version;

pub use error::{RunError, RunResult};
pub use outcome::{
    ApplyOutcome, FailureReason, Phase, PhaseReport, RowCounts, RunReport, SkipReason,
    TargetReport,
};
pub use runner::Runner;
pub use schema::{DatabaseExistenceCache, SchemaApplier};
pub use seed::DataSeeder;
pub use version::{check_version, parse_major};
