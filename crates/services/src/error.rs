//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `SessionLoader`.
///
/// Malformed records are not errors: the loader skips the affected instance
/// and keeps going. Only storage access failures surface here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionLoadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ExportService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("export document could not be assembled: {0}")]
    Serialization(String),
}

/// Errors emitted while bootstrapping module services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModuleServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
