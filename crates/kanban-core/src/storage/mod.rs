//! Storage abstraction for board persistence.

mod memory;
mod store;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStorage;
pub use store::{BOARD_STATE_KEY, BoardStore, create_default_storage};

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use crate::board::Board;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Board not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for board storage backends.
///
/// Every backend in use (browser local storage, the filesystem, memory)
/// answers synchronously, so the calls are plain functions.
///
/// On native platforms implementations must be Send + Sync. On WASM the
/// bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Save a board under a key.
    fn save(&self, key: &str, board: &Board) -> StorageResult<()>;

    /// Load the board stored under a key.
    fn load(&self, key: &str) -> StorageResult<Board>;

    /// Delete a stored board.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// List all stored keys.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;
}

/// Trait for board storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Save a board under a key.
    fn save(&self, key: &str, board: &Board) -> StorageResult<()>;

    /// Load the board stored under a key.
    fn load(&self, key: &str) -> StorageResult<Board>;

    /// Delete a stored board.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// List all stored keys.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;
}
