//! Kanban Core Library
//!
//! Platform-agnostic board model, drag-reorder controller and persistence
//! for the kanban board.

pub mod board;
pub mod drag;
pub mod input;
pub mod session;
pub mod storage;
pub mod surface;

#[cfg(test)]
mod testing;

pub use board::{Board, BoardError, BoardResult, Card, CardId, CardMove, Column, ColumnId};
pub use drag::{
    CancelReason, DragConfig, DragController, DragError, DragPayload, DragSession, DragState,
    DropEvent, DropOutcome, TrackOutcome, DEFAULT_DRAG_THRESHOLD,
};
pub use input::{InputState, MouseButton, PointerEvent};
pub use session::{BoardEdit, BoardSession, EditOutcome};
pub use storage::{BoardStore, MemoryStorage, Storage, StorageError};
pub use surface::{
    BoardView, CardSlot, DragOverlay, DragSurface, ListEntry, PlaceholderSlot, SurfaceHit,
    SurfaceQuery,
};
