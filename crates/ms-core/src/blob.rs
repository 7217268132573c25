//! Access to SQL script contents
//!
//! The applier never touches the filesystem directly. It asks a
//! [`BlobReader`] for the contents of a resolved path, which keeps the core
//! loop testable with in-memory fixtures.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to read a script
#[derive(Error, Debug)]
pub enum BlobError {
    /// Nothing exists at the path
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The path exists but could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

/// Source of script contents keyed by resolved path
pub trait BlobReader: Send + Sync {
    /// Return the full contents of the script at `path`
    fn read(&self, path: &Path) -> Result<String, BlobError>;
}

/// Reads scripts from the local filesystem
#[derive(Debug, Clone, Default)]
pub struct FsBlobReader;

impl BlobReader for FsBlobReader {
    fn read(&self, path: &Path) -> Result<String, BlobError> {
        std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => BlobError::NotFound {
                path: path.to_path_buf(),
            },
            _ => BlobError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })
    }
}

/// Reads scripts from an in-memory map, for tests
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobReader {
    files: std::collections::HashMap<PathBuf, String>,
    unreadable: std::collections::HashSet<PathBuf>,
}

#[cfg(any(test, feature = "test-support"))]
impl MemoryBlobReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `content` at `path`
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), content.to_string());
        self
    }

    /// Fail reads of `path` with a permission error
    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        self.unreadable.insert(path.into());
        self
    }
}

#[cfg(any(test, feature = "test-support"))]
impl BlobReader for MemoryBlobReader {
    fn read(&self, path: &Path) -> Result<String, BlobError> {
        if self.unreadable.contains(path) {
            return Err(BlobError::Io {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
            });
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| BlobError::NotFound {
                path: path.to_path_buf(),
            })
    }
}
