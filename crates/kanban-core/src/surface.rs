//! Surface query capability.
//!
//! The drag controller never talks to a concrete rendering target. It asks a
//! surface what lies under a point, how the entries of a card list are laid
//! out, and tells it where the transient drag visuals go. The render crate
//! provides the real implementation; tests use a fake.

use crate::board::{Board, CardId, ColumnId};
use kurbo::{Point, Rect};

/// What a point on the surface resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceHit {
    /// Column whose card list owns the point.
    pub column_id: ColumnId,
    /// Card directly under the point, if any.
    pub card_id: Option<CardId>,
}

/// A rendered card inside a card list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSlot {
    pub card_id: CardId,
    pub bounds: Rect,
}

impl CardSlot {
    /// Vertical center of the rendered card.
    pub fn center_y(&self) -> f64 {
        self.bounds.y0 + self.bounds.height() / 2.0
    }
}

/// One child of a rendered card list, in display order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListEntry {
    Card(CardSlot),
    Placeholder { bounds: Rect },
}

/// Where the placeholder currently sits: the list it is attached to and the
/// card it precedes (`None` = end of list).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSlot {
    pub column_id: ColumnId,
    pub before: Option<CardId>,
}

/// Read-only geometry and identity queries.
pub trait SurfaceQuery {
    /// Resolve a screen point to a card list (via a card, the list itself,
    /// or the owning column's body).
    fn hit_test(&self, point: Point) -> Option<SurfaceHit>;

    /// Entries of a column's card list in display order.
    fn list_entries(&self, column_id: &str) -> Vec<ListEntry>;

    /// Rendered bounds of a card.
    fn card_bounds(&self, card_id: CardId) -> Option<Rect>;
}

/// Transient drag visuals, layered on top of the rendered board.
pub trait DragOverlay {
    /// Toggle the board-wide "grabbing" cursor state.
    fn set_grabbing(&mut self, grabbing: bool);

    /// Toggle the "lifted" marker on a card.
    fn set_lifted(&mut self, card_id: CardId, lifted: bool);

    /// Attach (or move) the placeholder into a list before the given card.
    fn place_placeholder(&mut self, slot: PlaceholderSlot, height: f64);

    /// Detach the placeholder, if attached.
    fn remove_placeholder(&mut self);

    /// Current placeholder attachment.
    fn placeholder(&self) -> Option<PlaceholderSlot>;
}

/// Everything the drag controller needs from a surface.
pub trait DragSurface: SurfaceQuery + DragOverlay {}

impl<T: SurfaceQuery + DragOverlay> DragSurface for T {}

/// A drag surface that can be rebuilt from the board model.
pub trait BoardView: DragSurface {
    /// Discard all rendered elements and transient visuals and project the
    /// board again.
    fn rebuild(&mut self, board: &Board);
}
