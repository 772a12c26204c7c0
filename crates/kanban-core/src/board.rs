//! Board model: ordered columns holding ordered cards.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a card.
pub type CardId = Uuid;

/// Stable identifier for a column (e.g. `column-1`).
pub type ColumnId = String;

/// Board model errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("Column not found: {0}")]
    ColumnNotFound(ColumnId),
    #[error("Card not found: {0}")]
    CardNotFound(CardId),
    #[error("Card {card} is not at index {index} of column {column}")]
    CardNotAtIndex {
        card: CardId,
        column: ColumnId,
        index: usize,
    },
    #[error("Index {index} out of bounds for column {column} (len {len})")]
    IndexOutOfBounds {
        column: ColumnId,
        index: usize,
        len: usize,
    },
    #[error("Card content must not be empty")]
    EmptyContent,
    #[error("Duplicate card id: {0}")]
    DuplicateCard(CardId),
    #[error("Duplicate column id: {0}")]
    DuplicateColumn(ColumnId),
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// A single card. Content is fixed once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub content: String,
}

impl Card {
    /// Create a card with a fresh id.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
        }
    }
}

/// A named, ordered bucket of cards. Display order is stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub cards: Vec<Card>,
}

impl Column {
    /// Create an empty column.
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            cards: Vec::new(),
        }
    }

    /// Position of a card within this column.
    pub fn position(&self, card_id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// A request to move one card between (or within) columns.
///
/// `to_index` is the position in the target sequence *after* the card has
/// been removed from its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMove {
    pub card_id: CardId,
    pub from_column: ColumnId,
    pub from_index: usize,
    pub to_column: ColumnId,
    pub to_index: usize,
}

impl CardMove {
    /// Whether this move leaves the card where it already is.
    pub fn is_noop(&self) -> bool {
        self.from_column == self.to_column && self.from_index == self.to_index
    }
}

/// The root aggregate: an ordered list of columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<Column>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            columns: vec![
                Column::new("column-1", "TODO"),
                Column::new("column-2", "In Progress"),
                Column::new("column-3", "Done"),
            ],
        }
    }
}

impl Board {
    /// Create the built-in default board (three empty columns).
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a column by ID.
    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Get a mutable reference to a column by ID.
    pub fn column_mut(&mut self, id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == id)
    }

    /// Index of a column in board order.
    pub fn column_index(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    /// Locate a card: owning column and index within it.
    pub fn find_card(&self, card_id: CardId) -> Option<(ColumnId, usize)> {
        self.columns
            .iter()
            .find_map(|col| col.position(card_id).map(|idx| (col.id.clone(), idx)))
    }

    /// Get a card by ID.
    pub fn card(&self, card_id: CardId) -> Option<&Card> {
        self.columns
            .iter()
            .flat_map(|col| col.cards.iter())
            .find(|c| c.id == card_id)
    }

    /// Total number of cards across all columns.
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// All card IDs in board order.
    pub fn card_ids(&self) -> Vec<CardId> {
        self.columns
            .iter()
            .flat_map(|col| col.cards.iter().map(|c| c.id))
            .collect()
    }

    /// Append a new card to a column. Returns the new card's ID.
    pub fn add_card(&mut self, column_id: &str, content: &str) -> BoardResult<CardId> {
        let content = content.trim();
        if content.is_empty() {
            return Err(BoardError::EmptyContent);
        }
        let column = self
            .column_mut(column_id)
            .ok_or_else(|| BoardError::ColumnNotFound(column_id.to_string()))?;
        let card = Card::new(content);
        let id = card.id;
        column.cards.push(card);
        Ok(id)
    }

    /// Remove a card from a column.
    pub fn delete_card(&mut self, column_id: &str, card_id: CardId) -> BoardResult<Card> {
        let column = self
            .column_mut(column_id)
            .ok_or_else(|| BoardError::ColumnNotFound(column_id.to_string()))?;
        let idx = column
            .position(card_id)
            .ok_or(BoardError::CardNotFound(card_id))?;
        Ok(column.cards.remove(idx))
    }

    /// Apply a card move as a single step.
    ///
    /// Everything is validated before either sequence is touched, so an
    /// error leaves the board exactly as it was.
    pub fn move_card(&mut self, mv: &CardMove) -> BoardResult<()> {
        let from = self
            .column_index(&mv.from_column)
            .ok_or_else(|| BoardError::ColumnNotFound(mv.from_column.clone()))?;
        let to = self
            .column_index(&mv.to_column)
            .ok_or_else(|| BoardError::ColumnNotFound(mv.to_column.clone()))?;

        let source = &self.columns[from];
        if source.cards.get(mv.from_index).map(|c| c.id) != Some(mv.card_id) {
            return Err(BoardError::CardNotAtIndex {
                card: mv.card_id,
                column: mv.from_column.clone(),
                index: mv.from_index,
            });
        }

        let target_len = if from == to {
            self.columns[to].len() - 1
        } else {
            self.columns[to].len()
        };
        if mv.to_index > target_len {
            return Err(BoardError::IndexOutOfBounds {
                column: mv.to_column.clone(),
                index: mv.to_index,
                len: target_len,
            });
        }

        let card = self.columns[from].cards.remove(mv.from_index);
        self.columns[to].cards.insert(mv.to_index, card);
        Ok(())
    }

    /// Check structural sanity: unique column IDs and unique card IDs.
    pub fn validate(&self) -> BoardResult<()> {
        let mut columns = HashSet::new();
        let mut cards = HashSet::new();
        for column in &self.columns {
            if !columns.insert(column.id.as_str()) {
                return Err(BoardError::DuplicateColumn(column.id.clone()));
            }
            for card in &column.cards {
                if !cards.insert(card.id) {
                    return Err(BoardError::DuplicateCard(card.id));
                }
            }
        }
        Ok(())
    }

    /// Serialize the board to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize a board from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
