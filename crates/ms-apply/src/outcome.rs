//! Per-target outcomes and phase reports
//!
//! Raw executor status (affected rows, warning count) is translated into an
//! [`ApplyOutcome`] here and nowhere else, so the policy can be tested
//! without a server.

use ms_core::{SeedDuplicates, TargetError};
use ms_db::ExecResult;
use serde::Serialize;
use std::fmt;

/// Why a target was passed over without running its script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Category segment not recognised
    UnknownObjectType { category: String },
    /// Target string has the wrong shape
    MalformedTarget { message: String },
    /// Seed table already holds rows
    TableNotEmpty { rows: u64 },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnknownObjectType { category } => {
                write!(f, "unknown object type '{}'", category)
            }
            SkipReason::MalformedTarget { message } => write!(f, "{}", message),
            SkipReason::TableNotEmpty { rows } => {
                write!(f, "table is not empty ({} rows)", rows)
            }
        }
    }
}

impl From<TargetError> for SkipReason {
    fn from(err: TargetError) -> Self {
        match err {
            TargetError::UnknownObjectType { category, .. } => {
                SkipReason::UnknownObjectType { category }
            }
            e @ TargetError::Malformed { .. } => SkipReason::MalformedTarget {
                message: e.to_string(),
            },
        }
    }
}

/// Why a target failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", content = "message", rename_all = "snake_case")]
pub enum FailureReason {
    /// The script could not be read
    Read(String),
    /// The seed table could not be counted
    Count(String),
    /// The server rejected the script
    Execute(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Read(m) => write!(f, "read failed: {}", m),
            FailureReason::Count(m) => write!(f, "row count failed: {}", m),
            FailureReason::Execute(m) => write!(f, "execution failed: {}", m),
        }
    }
}

/// Outcome of applying one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ApplyOutcome {
    /// Script ran and changed the database
    Created,
    /// Script ran but the server reported the object already existed
    AlreadyExists,
    /// Script was not run
    Skipped(SkipReason),
    /// Script could not be read or run
    Failed(FailureReason),
}

impl ApplyOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, ApplyOutcome::Created)
    }
}

/// Row counts reported for a seed script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RowCounts {
    pub inserted: u64,
    pub duplicates: u64,
}

/// Translate a definition script result.
///
/// A clean run means the object was created; any warning means a
/// `CREATE ... IF NOT EXISTS` found it already there.
pub fn classify_definition(result: &ExecResult) -> ApplyOutcome {
    if result.warnings == 0 {
        ApplyOutcome::Created
    } else {
        ApplyOutcome::AlreadyExists
    }
}

/// Translate a seed script result into row counts.
pub fn seed_row_counts(result: &ExecResult, duplicates: SeedDuplicates) -> RowCounts {
    RowCounts {
        inserted: result.rows_affected,
        duplicates: match duplicates {
            SeedDuplicates::Warnings => result.warnings,
            SeedDuplicates::Ignore => 0,
        },
    }
}

/// Result of one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetReport {
    pub target: String,
    /// Human-readable description; the raw target when it could not be resolved
    pub description: String,
    pub outcome: ApplyOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<RowCounts>,
}

impl TargetReport {
    pub fn new(target: &str, description: impl Into<String>, outcome: ApplyOutcome) -> Self {
        Self {
            target: target.to_string(),
            description: description.into(),
            outcome,
            rows: None,
        }
    }

    pub fn with_rows(mut self, rows: RowCounts) -> Self {
        self.rows = Some(rows);
        self
    }
}

/// Run phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Schema,
    Data,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Schema => write!(f, "schema"),
            Phase::Data => write!(f, "data"),
        }
    }
}

/// Ordered results of one phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseReport {
    pub phase: Phase,
    pub targets: Vec<TargetReport>,
}

impl PhaseReport {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            targets: Vec::new(),
        }
    }

    pub fn push(&mut self, report: TargetReport) {
        self.targets.push(report);
    }

    /// Targets whose script ran cleanly: objects created, or tables seeded
    pub fn created(&self) -> usize {
        self.count(ApplyOutcome::is_created)
    }

    pub fn already_existing(&self) -> usize {
        self.count(|o| matches!(o, ApplyOutcome::AlreadyExists))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ApplyOutcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ApplyOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&ApplyOutcome) -> bool) -> usize {
        self.targets.iter().filter(|t| pred(&t.outcome)).count()
    }
}

/// Results of a complete run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Server version, when the version gate ran
    pub server_version: Option<String>,
    pub schema: PhaseReport,
    pub data: PhaseReport,
}

#[cfg(test)]
#[path = "outcome_test.rs"]
mod tests;
