//! Board session: the single owner of the board while the app runs.
//!
//! Ties together the board model, the persistence gateway and the drag
//! controller. Every mutation is followed by a view rebuild and a save.
//! Edits that arrive while a gesture is live are queued and applied once
//! the gesture ends, so the view is never rebuilt mid-drag.

use crate::board::{Board, BoardResult, Card, CardId, ColumnId};
use crate::drag::{DragConfig, DragController, DragError, DropEvent, DropOutcome, TrackOutcome};
use crate::storage::{BoardStore, Storage};
use crate::surface::BoardView;
use kurbo::Point;

/// A model edit requested by the user interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEdit {
    AddCard { column_id: ColumnId, content: String },
    DeleteCard { column_id: ColumnId, card_id: CardId },
}

/// What happened to an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Added(CardId),
    Deleted(Card),
    /// Queued until the current gesture ends.
    Deferred,
}

/// Owns the board, its store and the drag controller.
pub struct BoardSession<S: Storage> {
    board: Board,
    store: BoardStore<S>,
    drag: DragController,
    pending: Vec<BoardEdit>,
}

impl<S: Storage> BoardSession<S> {
    /// Open a session on whatever the store holds, or the default board.
    pub fn open(store: BoardStore<S>, config: DragConfig) -> Self {
        let board = store.load_or_default();
        Self::with_board(board, store, config)
    }

    /// Start a session on a given board.
    pub fn with_board(board: Board, store: BoardStore<S>, config: DragConfig) -> Self {
        Self {
            board,
            store,
            drag: DragController::with_config(config),
            pending: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn store(&self) -> &BoardStore<S> {
        &self.store
    }

    /// Edits waiting for the current gesture to end.
    pub fn pending_edits(&self) -> &[BoardEdit] {
        &self.pending
    }

    /// Project the board onto a view and save it.
    pub fn render<V: BoardView>(&mut self, view: &mut V) {
        view.rebuild(&self.board);
        self.store.persist(&self.board);
    }

    /// Press on the board.
    pub fn begin_drag<V: BoardView>(&mut self, position: Point, view: &mut V) -> Result<(), DragError> {
        self.drag.begin(&self.board, position, view)
    }

    /// Pointer moved.
    pub fn track_drag<V: BoardView>(&mut self, position: Point, view: &mut V) -> TrackOutcome {
        self.drag.track(position, view)
    }

    /// Release. A committed move re-renders and saves.
    pub fn drop_drag<V: BoardView>(&mut self, drop: &DropEvent, view: &mut V) -> DropOutcome {
        let outcome = self.drag.commit(drop, &mut self.board, view);
        if outcome.is_committed() {
            self.render(view);
        }
        self.flush_pending(view);
        outcome
    }

    /// Abandon the current gesture.
    pub fn cancel_drag<V: BoardView>(&mut self, view: &mut V) -> bool {
        let cancelled = self.drag.cancel(view);
        self.flush_pending(view);
        cancelled
    }

    /// Apply (or queue) an edit.
    pub fn apply<V: BoardView>(&mut self, edit: BoardEdit, view: &mut V) -> BoardResult<EditOutcome> {
        if !self.drag.is_idle() {
            log::debug!("Deferring edit until gesture ends: {:?}", edit);
            self.pending.push(edit);
            return Ok(EditOutcome::Deferred);
        }

        let outcome = match edit {
            BoardEdit::AddCard { column_id, content } => {
                let id = self.board.add_card(&column_id, &content)?;
                log::info!("Added card {} to {}", id, column_id);
                EditOutcome::Added(id)
            }
            BoardEdit::DeleteCard { column_id, card_id } => {
                let card = self.board.delete_card(&column_id, card_id)?;
                log::info!("Deleted card {} from {}", card_id, column_id);
                EditOutcome::Deleted(card)
            }
        };
        self.render(view);
        Ok(outcome)
    }

    /// Add a card to a column.
    pub fn add_card<V: BoardView>(
        &mut self,
        column_id: &str,
        content: &str,
        view: &mut V,
    ) -> BoardResult<EditOutcome> {
        self.apply(
            BoardEdit::AddCard {
                column_id: column_id.to_string(),
                content: content.to_string(),
            },
            view,
        )
    }

    /// Delete a card from a column.
    pub fn delete_card<V: BoardView>(
        &mut self,
        column_id: &str,
        card_id: CardId,
        view: &mut V,
    ) -> BoardResult<EditOutcome> {
        self.apply(
            BoardEdit::DeleteCard {
                column_id: column_id.to_string(),
                card_id,
            },
            view,
        )
    }

    /// Replace the board with what storage holds (or the default).
    ///
    /// Refused while a gesture is live.
    pub fn reload<V: BoardView>(&mut self, view: &mut V) -> bool {
        if !self.drag.is_idle() {
            return false;
        }
        self.board = self.store.load_or_default();
        view.rebuild(&self.board);
        true
    }

    fn flush_pending<V: BoardView>(&mut self, view: &mut V) {
        for edit in std::mem::take(&mut self.pending) {
            if let Err(e) = self.apply(edit, view) {
                log::warn!("Dropping deferred edit: {}", e);
            }
        }
    }
}
