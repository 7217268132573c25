//! Target names and their resolution to script files
//!
//! A schema target is `<database>/<category>/<name>` where the category is
//! one of `tables`, `triggers` or `database`. A data target is
//! `<database>/<table>`. Both resolve to `<root>/<target>.sql`.
//!
//! Resolution is a pure string transformation: no file is touched here, and
//! the database segment is not validated (the applier decides what an
//! invalid database name means).

use crate::config::RunConfig;
use crate::database_name::ObjectName;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory name for definition scripts under the shared root
pub const SHARED_DEFINITIONS_DIR: &str = "definitions";

/// Directory name for data scripts under the shared root
pub const SHARED_DATA_DIR: &str = "initial-data";

/// Why a target could not be resolved. Always a per-target skip.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    /// The target does not have the expected `a/b/c` or `a/b` shape
    #[error("malformed target '{target}': {reason}")]
    Malformed { target: String, reason: String },

    /// The category segment is not one we know how to describe
    #[error("unknown object type '{category}' in target '{target}'")]
    UnknownObjectType { target: String, category: String },
}

/// Which list a target came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Schema definition (tables, triggers, databases)
    Definition,
    /// Seed data
    Data,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Definition => write!(f, "definition"),
            TargetKind::Data => write!(f, "data"),
        }
    }
}

/// Kind of object a schema target creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Database,
    Table,
    Trigger,
}

impl ObjectKind {
    fn from_category(category: &str) -> Option<Self> {
        match category {
            "database" => Some(ObjectKind::Database),
            "tables" => Some(ObjectKind::Table),
            "triggers" => Some(ObjectKind::Trigger),
            _ => None,
        }
    }
}

/// Parsed `<database>/<category>/<name>` target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaTarget {
    /// Raw database segment, not yet validated
    pub database: String,
    pub kind: ObjectKind,
    pub name: ObjectName,
}

impl SchemaTarget {
    /// Parse a schema target string
    pub fn parse(target: &str) -> Result<Self, TargetError> {
        let segments = split_segments(target, 3)?;
        let (database, category, name) = (segments[0], segments[1], segments[2]);

        let kind =
            ObjectKind::from_category(category).ok_or_else(|| TargetError::UnknownObjectType {
                target: target.to_string(),
                category: category.to_string(),
            })?;

        Ok(Self {
            database: database.to_string(),
            kind,
            name: object_name(target, name)?,
        })
    }

    /// Human-readable description, e.g. `Table shop.users`
    pub fn description(&self) -> String {
        match self.kind {
            ObjectKind::Database => format!("Database {}", self.database),
            ObjectKind::Table => format!("Table {}.{}", self.database, self.name),
            ObjectKind::Trigger => format!("Trigger {}.{}", self.database, self.name),
        }
    }
}

/// Parsed `<database>/<table>` target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTarget {
    pub database: String,
    pub table: ObjectName,
}

impl DataTarget {
    /// Parse a data target string
    pub fn parse(target: &str) -> Result<Self, TargetError> {
        let segments = split_segments(target, 2)?;
        Ok(Self {
            database: segments[0].to_string(),
            table: object_name(target, segments[1])?,
        })
    }

    /// Human-readable description, e.g. `shop.users`
    pub fn description(&self) -> String {
        format!("{}.{}", self.database, self.table)
    }
}

fn split_segments(target: &str, expected: usize) -> Result<Vec<&str>, TargetError> {
    let segments: Vec<&str> = target.split('/').collect();
    if segments.len() != expected {
        return Err(TargetError::Malformed {
            target: target.to_string(),
            reason: format!(
                "expected {} '/'-separated segments, found {}",
                expected,
                segments.len()
            ),
        });
    }
    if segments.iter().any(|s| s.is_empty()) {
        return Err(TargetError::Malformed {
            target: target.to_string(),
            reason: "empty segment".to_string(),
        });
    }
    Ok(segments)
}

fn object_name(target: &str, raw: &str) -> Result<ObjectName, TargetError> {
    ObjectName::try_new(raw).ok_or_else(|| TargetError::Malformed {
        target: target.to_string(),
        reason: "empty object name".to_string(),
    })
}

/// A target resolved to its script path and description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub path: PathBuf,
    pub description: String,
    /// Raw database segment
    pub database: String,
    /// Object (schema targets) or table (data targets) segment
    pub object: String,
}

/// Resolve `target` of the given kind against `root`.
pub fn resolve(target: &str, kind: TargetKind, root: &Path) -> Result<Resolved, TargetError> {
    let (description, database, object) = match kind {
        TargetKind::Definition => {
            let parsed = SchemaTarget::parse(target)?;
            (parsed.description(), parsed.database, parsed.name.into_inner())
        }
        TargetKind::Data => {
            let parsed = DataTarget::parse(target)?;
            (parsed.description(), parsed.database, parsed.table.into_inner())
        }
    };
    Ok(Resolved {
        path: script_path(root, target),
        description,
        database,
        object,
    })
}

/// `<root>/<target>.sql`
pub fn script_path(root: &Path, target: &str) -> PathBuf {
    root.join(format!("{}.sql", target))
}

/// Root directories used to locate scripts
#[derive(Debug, Clone)]
pub struct Roots {
    pub definitions: PathBuf,
    pub data: PathBuf,
    pub shared: PathBuf,
    shared_definitions: HashSet<String>,
    shared_data: HashSet<String>,
}

impl Roots {
    /// Build roots from the configuration, resolving relative paths
    /// against `project_dir`.
    pub fn from_config(config: &RunConfig, project_dir: &Path) -> Self {
        Self {
            definitions: project_dir.join(&config.meta.definition_path),
            data: project_dir.join(&config.meta.data_path),
            shared: project_dir.join(&config.meta.shared_path),
            shared_definitions: config.shared.definitions.iter().cloned().collect(),
            shared_data: config.shared.data.iter().cloned().collect(),
        }
    }

    /// Root directory to resolve `target` against
    pub fn root_for(&self, target: &str, kind: TargetKind) -> PathBuf {
        match kind {
            TargetKind::Definition if self.shared_definitions.contains(target) => {
                self.shared.join(SHARED_DEFINITIONS_DIR)
            }
            TargetKind::Data if self.shared_data.contains(target) => {
                self.shared.join(SHARED_DATA_DIR)
            }
            TargetKind::Definition => self.definitions.clone(),
            TargetKind::Data => self.data.clone(),
        }
    }

    /// Whether `target` is served from the shared root
    pub fn is_shared(&self, target: &str, kind: TargetKind) -> bool {
        match kind {
            TargetKind::Definition => self.shared_definitions.contains(target),
            TargetKind::Data => self.shared_data.contains(target),
        }
    }

    /// Resolve `target` against whichever root serves it
    pub fn resolve(&self, target: &str, kind: TargetKind) -> Result<Resolved, TargetError> {
        resolve(target, kind, &self.root_for(target, kind))
    }
}

#[cfg(test)]
#[path = "target_test.rs"]
mod tests;
