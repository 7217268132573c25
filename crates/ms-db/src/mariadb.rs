//! MariaDB / MySQL backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::{ExecResult, SqlExecutor};
use async_trait::async_trait;
use ms_core::sql_utils::{quote_ident, quote_qualified};
use ms_core::ConnectionConfig;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Charset applied to databases created on demand
pub const DATABASE_CHARSET: &str = "utf8mb4";

/// Collation applied to databases created on demand
pub const DATABASE_COLLATION: &str = "utf8mb4_general_ci";

/// `CREATE DATABASE IF NOT EXISTS` statement for `database`
pub fn create_database_sql(database: &str) -> String {
    format!(
        "CREATE DATABASE IF NOT EXISTS {} CHARACTER SET = '{}' COLLATE = '{}'",
        quote_ident(database),
        DATABASE_CHARSET,
        DATABASE_COLLATION
    )
}

/// `SELECT COUNT(*)` statement for `database.table`
pub fn count_rows_sql(database: &str, table: &str) -> String {
    format!("SELECT COUNT(*) FROM {}", quote_qualified(database, table))
}

const SCHEMA_EXISTS_SQL: &str =
    "SELECT COUNT(*) FROM INFORMATION_SCHEMA.SCHEMATA WHERE SCHEMA_NAME = ?";

const WARNING_COUNT_SQL: &str = "SELECT CAST(@@warning_count AS SIGNED)";

/// MariaDB backend over a `sqlx` connection pool
pub struct MariaDbBackend {
    pool: MySqlPool,
}

impl MariaDbBackend {
    /// Build connect options from configuration.
    ///
    /// A `url` is parsed first; the individual fields are applied on top of
    /// it only when set, so an unset `port` keeps the url's port.
    pub fn connect_options(config: &ConnectionConfig) -> DbResult<MySqlConnectOptions> {
        let mut options = match &config.url {
            Some(url) => MySqlConnectOptions::from_str(url)
                .map_err(|e| DbError::InvalidOptions(e.to_string()))?,
            None => MySqlConnectOptions::new(),
        };

        if let Some(host) = &config.host {
            options = options.host(host);
        }
        if let Some(port) = config.port {
            options = options.port(port);
        }
        if let Some(socket) = &config.socket {
            options = options.socket(socket);
        }
        if let Some(user) = &config.user {
            options = options.username(user);
        }
        if let Some(password) = &config.password {
            options = options.password(password);
        }
        if let Some(database) = &config.database {
            options = options.database(database);
        }

        Ok(options.charset(DATABASE_CHARSET))
    }

    /// Open a pool and verify that one connection can be established
    pub async fn connect(config: &ConnectionConfig) -> DbResult<Self> {
        let options = Self::connect_options(config)?;
        let pool = MySqlPoolOptions::new()
            .max_connections(config.connection_limit)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl SqlExecutor for MariaDbBackend {
    async fn execute(&self, sql: &str) -> DbResult<ExecResult> {
        // The warning count is per session, so both statements must share
        // one connection.
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::Executor::execute(&mut *conn, sqlx::raw_sql(sql)).await?;
        let warnings: i64 = sqlx::query_scalar(WARNING_COUNT_SQL)
            .fetch_one(&mut *conn)
            .await?;

        Ok(ExecResult::new(
            result.rows_affected(),
            u64::try_from(warnings).unwrap_or(0),
        ))
    }

    async fn server_version(&self) -> DbResult<String> {
        let version: String = sqlx::query_scalar("SELECT VERSION()")
            .fetch_one(&self.pool)
            .await?;
        Ok(version)
    }

    async fn schema_exists(&self, database: &str) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar(SCHEMA_EXISTS_SQL)
            .bind(database)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    async fn create_database(&self, database: &str) -> DbResult<ExecResult> {
        self.execute(&create_database_sql(database)).await
    }

    async fn count_rows(&self, database: &str, table: &str) -> DbResult<u64> {
        let sql = count_rows_sql(database, table);
        let count: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await?;
        u64::try_from(count).map_err(|e| DbError::Internal(e.to_string()))
    }

    fn db_type(&self) -> &'static str {
        "mariadb"
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
#[path = "mariadb_test.rs"]
mod tests;
