//! In-memory executor that records every call, for tests.
//!
//! Behaviour is scripted up front (server version, existing databases,
//! table row counts, per-script results) and every call is appended to a
//! log that tests can inspect afterwards.

use crate::error::{DbError, DbResult};
use crate::mariadb::create_database_sql;
use crate::traits::{ExecResult, SqlExecutor};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// One recorded executor call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Execute(String),
    ServerVersion,
    SchemaExists(String),
    CreateDatabase(String),
    CountRows(String, String),
    Close,
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    schemas: HashSet<String>,
}

/// Scriptable spy implementing [`SqlExecutor`]
pub struct RecordingExecutor {
    version: Result<String, String>,
    rows: HashMap<(String, String), Result<u64, String>>,
    scripts: HashMap<String, Result<ExecResult, String>>,
    failing_creates: HashSet<String>,
    state: Mutex<State>,
}

impl Default for RecordingExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingExecutor {
    /// Executor reporting `10.11.6-MariaDB`, with no databases and empty tables
    pub fn new() -> Self {
        Self {
            version: Ok("10.11.6-MariaDB".to_string()),
            rows: HashMap::new(),
            scripts: HashMap::new(),
            failing_creates: HashSet::new(),
            state: Mutex::new(State::default()),
        }
    }

    /// Report `version` from `server_version`
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Ok(version.to_string());
        self
    }

    /// Fail the version query
    pub fn with_version_error(mut self, message: &str) -> Self {
        self.version = Err(message.to_string());
        self
    }

    /// Treat `database` as already present on the server
    pub fn with_schema(self, database: &str) -> Self {
        self.lock().schemas.insert(database.to_string());
        self
    }

    /// Report `count` rows in `database.table`
    pub fn with_rows(mut self, database: &str, table: &str, count: u64) -> Self {
        self.rows
            .insert((database.to_string(), table.to_string()), Ok(count));
        self
    }

    /// Fail the row count for `database.table`
    pub fn with_count_error(mut self, database: &str, table: &str, message: &str) -> Self {
        self.rows.insert(
            (database.to_string(), table.to_string()),
            Err(message.to_string()),
        );
        self
    }

    /// Return `result` when exactly `sql` is executed
    pub fn on_script(mut self, sql: &str, result: ExecResult) -> Self {
        self.scripts.insert(sql.to_string(), Ok(result));
        self
    }

    /// Fail with `message` when exactly `sql` is executed
    pub fn failing_script(mut self, sql: &str, message: &str) -> Self {
        self.scripts
            .insert(sql.to_string(), Err(message.to_string()));
        self
    }

    /// Fail `CREATE DATABASE` for `database`
    pub fn failing_create(mut self, database: &str) -> Self {
        self.failing_creates.insert(database.to_string());
        self
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Scripts passed to `execute`, in order
    pub fn executed_scripts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Execute(sql) => Some(sql),
                _ => None,
            })
            .collect()
    }

    /// Databases passed to `create_database`, in order
    pub fn created_databases(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateDatabase(db) => Some(db),
                _ => None,
            })
            .collect()
    }

    /// Number of times `close` was called
    pub fn close_count(&self) -> usize {
        self.calls().iter().filter(|c| **c == Call::Close).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: Call) {
        self.lock().calls.push(call);
    }
}

#[async_trait]
impl SqlExecutor for RecordingExecutor {
    async fn execute(&self, sql: &str) -> DbResult<ExecResult> {
        self.record(Call::Execute(sql.to_string()));
        match self.scripts.get(sql) {
            Some(Ok(result)) => Ok(*result),
            Some(Err(message)) => Err(DbError::ExecutionError(message.clone())),
            None => Ok(ExecResult::default()),
        }
    }

    async fn server_version(&self) -> DbResult<String> {
        self.record(Call::ServerVersion);
        self.version.clone().map_err(DbError::ExecutionError)
    }

    async fn schema_exists(&self, database: &str) -> DbResult<bool> {
        self.record(Call::SchemaExists(database.to_string()));
        Ok(self.lock().schemas.contains(database))
    }

    async fn create_database(&self, database: &str) -> DbResult<ExecResult> {
        self.record(Call::CreateDatabase(database.to_string()));
        if self.failing_creates.contains(database) {
            return Err(DbError::ExecutionError(format!(
                "access denied: {}",
                create_database_sql(database)
            )));
        }
        let created = self.lock().schemas.insert(database.to_string());
        Ok(ExecResult::new(u64::from(created), u64::from(!created)))
    }

    async fn count_rows(&self, database: &str, table: &str) -> DbResult<u64> {
        self.record(Call::CountRows(database.to_string(), table.to_string()));
        match self.rows.get(&(database.to_string(), table.to_string())) {
            Some(Ok(count)) => Ok(*count),
            Some(Err(message)) => Err(DbError::TableNotFound(message.clone())),
            None => Ok(0),
        }
    }

    fn db_type(&self) -> &'static str {
        "recording"
    }

    async fn close(&self) {
        self.record(Call::Close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_calls_in_order() {
        let db = RecordingExecutor::new();
        db.server_version().await.unwrap();
        db.execute("SELECT 1").await.unwrap();
        db.close().await;

        assert_eq!(
            db.calls(),
            vec![
                Call::ServerVersion,
                Call::Execute("SELECT 1".to_string()),
                Call::Close
            ]
        );
        assert_eq!(db.close_count(), 1);
    }

    #[tokio::test]
    async fn test_scripted_results() {
        let db = RecordingExecutor::new()
            .on_script("A", ExecResult::new(3, 1))
            .failing_script("B", "syntax error");

        assert_eq!(db.execute("A").await.unwrap(), ExecResult::new(3, 1));
        assert!(db.execute("B").await.is_err());
        assert_eq!(db.execute("C").await.unwrap(), ExecResult::default());
    }

    #[tokio::test]
    async fn test_create_database_makes_schema_exist() {
        let db = RecordingExecutor::new();
        assert!(!db.schema_exists("shop").await.unwrap());
        db.create_database("shop").await.unwrap();
        assert!(db.schema_exists("shop").await.unwrap());
        assert_eq!(db.created_databases(), vec!["shop".to_string()]);
    }

    #[tokio::test]
    async fn test_row_counts() {
        let db = RecordingExecutor::new()
            .with_rows("shop", "users", 4)
            .with_count_error("shop", "ghost", "no such table");
        assert_eq!(db.count_rows("shop", "users").await.unwrap(), 4);
        assert_eq!(db.count_rows("shop", "orders").await.unwrap(), 0);
        assert!(db.count_rows("shop", "ghost").await.is_err());
    }
}
