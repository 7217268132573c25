//! SQL executor trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Structured outcome of executing a script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecResult {
    /// Rows changed by the script (summed over its statements)
    pub rows_affected: u64,

    /// Session warning count after the last statement.
    ///
    /// `CREATE ... IF NOT EXISTS` raises a note when the object is already
    /// there and `INSERT IGNORE` raises one per skipped row.
    pub warnings: u64,
}

impl ExecResult {
    pub fn new(rows_affected: u64, warnings: u64) -> Self {
        Self {
            rows_affected,
            warnings,
        }
    }
}

/// Executor abstraction used by the applier.
///
/// Implementations must be Send + Sync for async operation. Calls are
/// issued strictly one at a time by the applier.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Execute a (possibly multi-statement) script
    async fn execute(&self, sql: &str) -> DbResult<ExecResult>;

    /// Server version string, e.g. `10.11.6-MariaDB`
    async fn server_version(&self) -> DbResult<String>;

    /// Check `INFORMATION_SCHEMA.SCHEMATA` for a database
    async fn schema_exists(&self, database: &str) -> DbResult<bool>;

    /// `CREATE DATABASE IF NOT EXISTS` with the fixed utf8mb4 charset
    async fn create_database(&self, database: &str) -> DbResult<ExecResult>;

    /// Number of rows currently in `database.table`
    async fn count_rows(&self, database: &str, table: &str) -> DbResult<u64>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;

    /// Release the underlying connections
    async fn close(&self);
}
