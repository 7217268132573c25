//! Error types for ms-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Table not found (D003)
    #[error("[D003] Table or view not found: {0}")]
    TableNotFound(String),

    /// Invalid connection parameters (D004)
    #[error("[D004] Invalid connection options: {0}")]
    InvalidOptions(String),

    /// Unexpected result shape (D007)
    #[error("[D007] Internal database error: {0}")]
    Internal(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

/// SQLSTATE reported by MariaDB for a missing table (errno 1146)
const SQLSTATE_NO_SUCH_TABLE: &str = "42S02";

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db_err) => {
                if db_err.code().as_deref() == Some(SQLSTATE_NO_SUCH_TABLE) {
                    DbError::TableNotFound(db_err.message().to_string())
                } else {
                    DbError::ExecutionError(db_err.to_string())
                }
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => DbError::ConnectionError(err.to_string()),
            sqlx::Error::Configuration(_) => DbError::InvalidOptions(err.to_string()),
            sqlx::Error::RowNotFound
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::Decode(_) => DbError::Internal(err.to_string()),
            other => DbError::ExecutionError(other.to_string()),
        }
    }
}
