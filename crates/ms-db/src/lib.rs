//! ms-db - Database abstraction layer for Mariseed
//!
//! This crate provides the `SqlExecutor` trait and its MariaDB / MySQL
//! implementation on top of a `sqlx` connection pool.

pub mod error;
pub mod mariadb;
pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod recording;

pub use error::{DbError, DbResult};
pub use mariadb::MariaDbBackend;
pub use traits::{ExecResult, SqlExecutor};
