//! Drag session and transfer payload.

use crate::board::{CardId, ColumnId};
use crate::surface::PlaceholderSlot;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Ephemeral state for one in-progress drag gesture. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// The card being moved.
    pub card_id: CardId,
    /// Column the card was in when the gesture started.
    pub source_column: ColumnId,
    /// Index of the card in its column when the gesture started.
    pub source_index: usize,
    /// Pointer position at gesture start.
    pub start: Point,
    /// Where the placeholder was last attached.
    pub placeholder: Option<PlaceholderSlot>,
    /// Rendered height of the dragged card, captured on activation.
    pub placeholder_height: f64,
}

impl DragSession {
    pub(crate) fn new(card_id: CardId, source_column: ColumnId, source_index: usize, start: Point) -> Self {
        Self {
            card_id,
            source_column,
            source_index,
            start,
            placeholder: None,
            placeholder_height: 0.0,
        }
    }

    /// Transfer payload identifying this session.
    pub fn payload(&self) -> DragPayload {
        DragPayload {
            card_id: self.card_id,
            original_column_id: self.source_column.clone(),
            original_card_index: self.source_index,
        }
    }

    /// Transfer payload as JSON, for platforms that pass drag data as text.
    pub fn payload_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.payload())
    }
}

/// Session identity carried through a platform drag-data channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub card_id: CardId,
    pub original_column_id: ColumnId,
    pub original_card_index: usize,
}

impl DragPayload {
    /// Parse a payload from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether this payload describes the given session.
    pub fn matches(&self, session: &DragSession) -> bool {
        self.card_id == session.card_id
            && self.original_column_id == session.source_column
            && self.original_card_index == session.source_index
    }
}
