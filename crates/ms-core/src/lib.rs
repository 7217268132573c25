//! ms-core - Core library for Mariseed
//!
//! This crate provides the run configuration, target resolution, database
//! name validation and the blob reader used to load SQL scripts from disk.

pub mod blob;
pub mod config;
pub mod database_name;
pub mod error;
mod newtype_string;
pub mod sql_utils;
pub mod target;

pub use blob::{BlobError, BlobReader, FsBlobReader};
#[cfg(any(test, feature = "test-support"))]
pub use blob::MemoryBlobReader;
pub use config::{ConnectionConfig, Meta, RunConfig, SeedDuplicates, SharedTargets};
pub use database_name::{DatabaseName, ObjectName};
pub use error::{CoreError, CoreResult};
pub use target::{
    resolve, DataTarget, ObjectKind, Resolved, Roots, SchemaTarget, TargetError, TargetKind,
};
