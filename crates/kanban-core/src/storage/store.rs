//! Persistence gateway for the board.
//!
//! Loads the board once at startup and mirrors it to storage after every
//! mutation. The in-memory board is the authority; storage is best-effort.

use crate::board::Board;
use crate::storage::{Storage, StorageError, StorageResult};
use std::sync::Arc;

/// Key the board is stored under.
pub const BOARD_STATE_KEY: &str = "kanban-board-state";

/// Reads and writes the board through a storage backend.
pub struct BoardStore<S: Storage> {
    /// Storage backend.
    storage: Arc<S>,
    /// Key the board lives under.
    key: String,
    /// Whether the in-memory board has changes storage does not have.
    dirty: bool,
}

impl<S: Storage> BoardStore<S> {
    /// Create a store over the given backend using the default key.
    pub fn new(storage: Arc<S>) -> Self {
        Self::with_key(storage, BOARD_STATE_KEY)
    }

    /// Create a store that uses a custom key.
    pub fn with_key(storage: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            dirty: false,
        }
    }

    /// The key the board is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the last save failed (or nothing has been saved since a change).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Load the stored board.
    ///
    /// Absent, unreadable or structurally invalid data yields `None`.
    pub fn load(&self) -> Option<Board> {
        match self.storage.load(&self.key) {
            Ok(board) => match board.validate() {
                Ok(()) => {
                    log::info!(
                        "Loaded board '{}': {} columns, {} cards",
                        self.key,
                        board.columns.len(),
                        board.card_count()
                    );
                    Some(board)
                }
                Err(e) => {
                    log::error!("Stored board '{}' is invalid: {}", self.key, e);
                    None
                }
            },
            Err(StorageError::NotFound(_)) => {
                log::info!("No stored board under '{}'", self.key);
                None
            }
            Err(e) => {
                log::error!("Error loading board '{}': {}", self.key, e);
                None
            }
        }
    }

    /// Load the stored board, falling back to the built-in default.
    pub fn load_or_default(&self) -> Board {
        self.load().unwrap_or_default()
    }

    /// Write the board to storage.
    pub fn save(&mut self, board: &Board) -> StorageResult<()> {
        self.dirty = true;
        self.storage.save(&self.key, board)?;
        self.dirty = false;
        Ok(())
    }

    /// Write the board, logging instead of propagating a failure.
    ///
    /// Returns whether the write succeeded.
    pub fn persist(&mut self, board: &Board) -> bool {
        match self.save(board) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Error saving board '{}': {}", self.key, e);
                false
            }
        }
    }

    /// Remove the stored board.
    pub fn clear(&self) -> StorageResult<()> {
        self.storage.delete(&self.key)
    }

    /// Get a reference to the storage backend.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

/// Create a platform-appropriate storage backend.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage() -> StorageResult<Arc<crate::storage::FileStorage>> {
    Ok(Arc::new(crate::storage::FileStorage::default_location()?))
}

#[cfg(target_arch = "wasm32")]
pub fn create_default_storage() -> StorageResult<Arc<crate::storage::LocalStorage>> {
    Ok(Arc::new(crate::storage::LocalStorage::new()))
}
