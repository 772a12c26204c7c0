//! Actions raised by clicks on board controls.

use kanban_core::{CardId, ColumnId};

/// A user-interface request, applied with [`crate::App::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Open the add-card form under a column.
    ShowAddCardForm { column_id: ColumnId },
    /// Close the add-card form without adding.
    HideAddCardForm,
    /// Submit the add-card form.
    AddCard { column_id: ColumnId, content: String },
    /// Remove a card.
    DeleteCard { column_id: ColumnId, card_id: CardId },
}
