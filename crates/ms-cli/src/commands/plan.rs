//! Plan command implementation
//!
//! Resolves every configured target and checks that its script can be read,
//! without opening a database connection.

use anyhow::{Context, Result};
use ms_apply::{Phase, SkipReason};
use ms_core::{BlobReader, DatabaseName, FsBlobReader, Roots, RunConfig, TargetKind};
use serde::Serialize;
use std::fmt;

use crate::cli::{GlobalArgs, OutputFormat, PlanArgs};
use crate::commands::common::{build_roots, format_table, load_config};

/// What a run would do with one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub(crate) enum PlanStatus {
    Ready,
    Unreadable { error: String },
    Skipped { reason: SkipReason },
    /// The run would abort on this target
    InvalidDatabase { database: String },
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanStatus::Ready => write!(f, "ready"),
            PlanStatus::Unreadable { error } => write!(f, "unreadable: {}", error),
            PlanStatus::Skipped { reason } => write!(f, "skipped: {}", reason),
            PlanStatus::InvalidDatabase { database } => {
                write!(f, "invalid database name '{}'", database)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PlanEntry {
    pub phase: Phase,
    pub target: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(flatten)]
    pub status: PlanStatus,
}

/// Execute the plan command
pub(crate) async fn execute(args: &PlanArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let roots = build_roots(&config, global);
    let entries = build_plan(&config, &roots, &FsBlobReader);

    match args.output {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&entries).context("Failed to serialize plan")?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = entries
                .iter()
                .map(|e| {
                    vec![
                        e.phase.to_string(),
                        e.description.clone(),
                        e.path.clone().unwrap_or_default(),
                        e.status.to_string(),
                    ]
                })
                .collect();
            println!("{}", format_table(&["PHASE", "TARGET", "FILE", "STATUS"], &rows));
        }
    }

    Ok(())
}

/// Plan every definition target, then every data target, in list order
pub(crate) fn build_plan(
    config: &RunConfig,
    roots: &Roots,
    blobs: &dyn BlobReader,
) -> Vec<PlanEntry> {
    let definitions = config
        .definitions
        .iter()
        .map(|t| plan_target(t, Phase::Schema, roots, blobs));
    let data = config
        .data
        .iter()
        .map(|t| plan_target(t, Phase::Data, roots, blobs));
    definitions.chain(data).collect()
}

fn plan_target(target: &str, phase: Phase, roots: &Roots, blobs: &dyn BlobReader) -> PlanEntry {
    let kind = match phase {
        Phase::Schema => TargetKind::Definition,
        Phase::Data => TargetKind::Data,
    };

    let resolved = match roots.resolve(target, kind) {
        Ok(resolved) => resolved,
        Err(e) => {
            return PlanEntry {
                phase,
                target: target.to_string(),
                description: target.to_string(),
                path: None,
                status: PlanStatus::Skipped { reason: e.into() },
            }
        }
    };

    let status = match blobs.read(&resolved.path) {
        Err(e) => PlanStatus::Unreadable {
            error: e.to_string(),
        },
        Ok(_) if kind == TargetKind::Definition
            && DatabaseName::parse(&resolved.database).is_err() =>
        {
            PlanStatus::InvalidDatabase {
                database: resolved.database.clone(),
            }
        }
        Ok(_) => PlanStatus::Ready,
    };

    PlanEntry {
        phase,
        target: target.to_string(),
        description: resolved.description,
        path: Some(resolved.path.display().to_string()),
        status,
    }
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
