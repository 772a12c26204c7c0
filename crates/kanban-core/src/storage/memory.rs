//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult};
use crate::board::Board;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    boards: RwLock<HashMap<String, Board>>,
    /// When set, every write fails. Lets callers exercise save-failure paths.
    read_only: bool,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage that rejects every write.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }
}

impl Storage for MemoryStorage {
    fn save(&self, key: &str, board: &Board) -> StorageResult<()> {
        if self.read_only {
            return Err(StorageError::Io(format!("Storage is read-only: {}", key)));
        }
        let mut boards = self
            .boards
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        boards.insert(key.to_string(), board.clone());
        Ok(())
    }

    fn load(&self, key: &str) -> StorageResult<Board> {
        let boards = self
            .boards
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        boards
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let mut boards = self
            .boards
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        boards.remove(key);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let boards = self
            .boards
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(boards.keys().cloned().collect())
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        let boards = self
            .boards
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(boards.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let mut board = Board::new();
        board.add_card("column-1", "X").unwrap();

        storage.save("test", &board).unwrap();
        let loaded = storage.load("test").unwrap();

        assert_eq!(loaded, board);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = storage.load("nonexistent");

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_exists_and_delete() {
        let storage = MemoryStorage::new();
        let board = Board::new();

        assert!(!storage.exists("test").unwrap());
        storage.save("test", &board).unwrap();
        assert!(storage.exists("test").unwrap());
        storage.delete("test").unwrap();
        assert!(!storage.exists("test").unwrap());
    }

    #[test]
    fn test_list() {
        let storage = MemoryStorage::new();
        let board = Board::new();

        storage.save("board1", &board).unwrap();
        storage.save("board2", &board).unwrap();

        let list = storage.list().unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(&"board1".to_string()));
        assert!(list.contains(&"board2".to_string()));
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let storage = MemoryStorage::read_only();
        assert!(matches!(
            storage.save("test", &Board::new()),
            Err(StorageError::Io(_))
        ));
        assert!(!storage.exists("test").unwrap());
    }
}
