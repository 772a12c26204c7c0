//! Browser local storage implementation for WebAssembly.

use super::{Storage, StorageError, StorageResult};
use crate::board::Board;

/// Board storage backed by `window.localStorage`.
///
/// Boards are stored as JSON strings under their key.
#[derive(Default)]
pub struct LocalStorage;

impl LocalStorage {
    /// Create a new local storage handle.
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> StorageResult<web_sys::Storage> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::Other("No window object".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Other(format!("localStorage error: {:?}", e)))?
            .ok_or_else(|| StorageError::Other("localStorage not available".to_string()))
    }
}

impl Storage for LocalStorage {
    fn save(&self, key: &str, board: &Board) -> StorageResult<()> {
        let json = board
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage()?
            .set_item(key, &json)
            .map_err(|e| StorageError::Io(format!("setItem failed: {:?}", e)))
    }

    fn load(&self, key: &str) -> StorageResult<Board> {
        let json = self
            .storage()?
            .get_item(key)
            .map_err(|e| StorageError::Io(format!("getItem failed: {:?}", e)))?
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;

        Board::from_json(&json).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Io(format!("removeItem failed: {:?}", e)))
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let storage = self.storage()?;
        let len = storage
            .length()
            .map_err(|e| StorageError::Io(format!("length failed: {:?}", e)))?;

        let mut keys = Vec::new();
        for i in 0..len {
            if let Ok(Some(key)) = storage.key(i) {
                keys.push(key);
            }
        }
        Ok(keys)
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        let item = self
            .storage()?
            .get_item(key)
            .map_err(|e| StorageError::Io(format!("getItem failed: {:?}", e)))?;
        Ok(item.is_some())
    }
}
