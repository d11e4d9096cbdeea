//! Project persistence backends.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::plan::Plan;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("project not found: {0}")]
    NotFound(String),
    #[error("storage quota exceeded")]
    QuotaExceeded,
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for project storage backends.
///
/// Implementations can keep plans in memory, on the filesystem, or behind a
/// browser storage API. A backend with bounded space reports
/// [`StorageError::QuotaExceeded`] from `save`; callers are expected to
/// degrade to an in-memory fallback rather than lose the live document.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Save a plan under the given project id.
    fn save(&self, id: &str, plan: &Plan) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a plan.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Plan>>;

    /// Delete a plan.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all stored project ids.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check whether a project exists.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Trait for project storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Save a plan under the given project id.
    fn save(&self, id: &str, plan: &Plan) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a plan.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Plan>>;

    /// Delete a plan.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all stored project ids.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check whether a project exists.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}
