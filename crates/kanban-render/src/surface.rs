//! The drag surface over a board layout.

use crate::layout::{BoardLayout, EntryLayout, LayoutMetrics};
use kanban_core::{
    Board, BoardView, CardId, CardSlot, ColumnId, DragOverlay, ListEntry, PlaceholderSlot,
    SurfaceHit, SurfaceQuery,
};
use kurbo::{Point, Rect};

/// What a click landed on, for non-drag interactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiTarget {
    DeleteButton { column_id: ColumnId, card_id: CardId },
    Card { column_id: ColumnId, card_id: CardId },
    AddButton { column_id: ColumnId },
    List { column_id: ColumnId },
}

/// A rendered board with live drag visuals.
///
/// Rebuilt from the board model after every mutation; the placeholder and
/// the lifted/grabbing markers are layered on top and dropped by a rebuild.
#[derive(Debug, Clone)]
pub struct LayoutSurface {
    layout: BoardLayout,
    grabbing: bool,
}

impl LayoutSurface {
    /// Create an empty surface. Call `rebuild` to project a board.
    pub fn new(metrics: LayoutMetrics) -> Self {
        Self {
            layout: BoardLayout::build(&Board { columns: Vec::new() }, metrics),
            grabbing: false,
        }
    }

    /// Create a surface showing a board.
    pub fn from_board(board: &Board, metrics: LayoutMetrics) -> Self {
        Self {
            layout: BoardLayout::build(board, metrics),
            grabbing: false,
        }
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        &self.layout.metrics
    }

    pub fn is_grabbing(&self) -> bool {
        self.grabbing
    }

    /// Resolve a point to the interactive element under it.
    ///
    /// Delete buttons sit on top of their card and win over it.
    pub fn ui_target(&self, point: Point) -> Option<UiTarget> {
        let column = self.layout.columns.iter().find(|c| c.bounds.contains(point))?;
        let column_id = column.column_id.clone();

        for card in column.cards() {
            if card.delete_button.contains(point) {
                return Some(UiTarget::DeleteButton {
                    column_id,
                    card_id: card.card_id,
                });
            }
            if card.bounds.contains(point) {
                return Some(UiTarget::Card {
                    column_id,
                    card_id: card.card_id,
                });
            }
        }

        if column.add_button.contains(point) {
            return Some(UiTarget::AddButton { column_id });
        }
        Some(UiTarget::List { column_id })
    }

    /// Screen center of a rendered card.
    pub fn card_center(&self, card_id: CardId) -> Option<Point> {
        self.card_bounds(card_id).map(|r| r.center())
    }
}

impl SurfaceQuery for LayoutSurface {
    fn hit_test(&self, point: Point) -> Option<SurfaceHit> {
        let column = self.layout.columns.iter().find(|c| c.bounds.contains(point))?;
        let card_id = column
            .cards()
            .find(|card| card.bounds.contains(point))
            .map(|card| card.card_id);
        Some(SurfaceHit {
            column_id: column.column_id.clone(),
            card_id,
        })
    }

    fn list_entries(&self, column_id: &str) -> Vec<ListEntry> {
        let Some(column) = self.layout.column(column_id) else {
            return Vec::new();
        };
        column
            .entries
            .iter()
            .map(|entry| match entry {
                EntryLayout::Card(card) => ListEntry::Card(CardSlot {
                    card_id: card.card_id,
                    bounds: card.bounds,
                }),
                EntryLayout::Placeholder { bounds } => ListEntry::Placeholder { bounds: *bounds },
            })
            .collect()
    }

    fn card_bounds(&self, card_id: CardId) -> Option<Rect> {
        self.layout.card(card_id).map(|card| card.bounds)
    }
}

impl DragOverlay for LayoutSurface {
    fn set_grabbing(&mut self, grabbing: bool) {
        self.grabbing = grabbing;
    }

    fn set_lifted(&mut self, card_id: CardId, lifted: bool) {
        if let Some(card) = self.layout.card_mut(card_id) {
            card.lifted = lifted;
        }
    }

    fn place_placeholder(&mut self, slot: PlaceholderSlot, height: f64) {
        self.remove_placeholder();
        let Some(column) = self.layout.column_mut(&slot.column_id) else {
            log::warn!("Cannot place placeholder in unknown column {}", slot.column_id);
            return;
        };

        let at = slot
            .before
            .and_then(|before| {
                column.entries.iter().position(
                    |entry| matches!(entry, EntryLayout::Card(card) if card.card_id == before),
                )
            })
            .unwrap_or(column.entries.len());
        column.entries.insert(
            at,
            EntryLayout::Placeholder {
                bounds: Rect::new(0.0, 0.0, 0.0, height),
            },
        );
        self.layout.arrange();
    }

    fn remove_placeholder(&mut self) {
        let mut removed = false;
        for column in &mut self.layout.columns {
            let before = column.entries.len();
            column
                .entries
                .retain(|entry| !matches!(entry, EntryLayout::Placeholder { .. }));
            removed |= column.entries.len() != before;
        }
        if removed {
            self.layout.arrange();
        }
    }

    fn placeholder(&self) -> Option<PlaceholderSlot> {
        self.layout.columns.iter().find_map(|column| {
            let at = column
                .entries
                .iter()
                .position(|entry| matches!(entry, EntryLayout::Placeholder { .. }))?;
            let before = column.entries[at + 1..].iter().find_map(|entry| match entry {
                EntryLayout::Card(card) => Some(card.card_id),
                EntryLayout::Placeholder { .. } => None,
            });
            Some(PlaceholderSlot {
                column_id: column.column_id.clone(),
                before,
            })
        })
    }
}

impl BoardView for LayoutSurface {
    fn rebuild(&mut self, board: &Board) {
        self.layout = BoardLayout::build(board, self.layout.metrics);
        self.grabbing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_core::{DragController, DropEvent, TrackOutcome};
    use kurbo::Vec2;

    fn board_with(todo: &[&str], done: &[&str]) -> Board {
        let mut board = Board::new();
        for content in todo {
            board.add_card("column-1", content).unwrap();
        }
        for content in done {
            board.add_card("column-3", content).unwrap();
        }
        board
    }

    fn card_at(board: &Board, column: &str, index: usize) -> CardId {
        board.column(column).unwrap().cards[index].id
    }

    #[test]
    fn test_hit_test_resolves_card_and_column() {
        let board = board_with(&["A"], &[]);
        let surface = LayoutSurface::from_board(&board, LayoutMetrics::default());
        let a = card_at(&board, "column-1", 0);

        let hit = surface.hit_test(surface.card_center(a).unwrap()).unwrap();
        assert_eq!(hit.column_id, "column-1");
        assert_eq!(hit.card_id, Some(a));

        let done = surface.layout().column("column-3").unwrap();
        let hit = surface.hit_test(done.list.center()).unwrap();
        assert_eq!(hit.column_id, "column-3");
        assert_eq!(hit.card_id, None);

        assert!(surface.hit_test(Point::new(-10.0, -10.0)).is_none());
    }

    #[test]
    fn test_placeholder_reflows_list() {
        let board = board_with(&["A", "B"], &[]);
        let mut surface = LayoutSurface::from_board(&board, LayoutMetrics::default());
        let b = card_at(&board, "column-1", 1);
        let b_top = surface.card_bounds(b).unwrap().y0;
        let list_bottom = surface.layout().column("column-1").unwrap().list.y1;

        surface.place_placeholder(
            PlaceholderSlot {
                column_id: "column-1".into(),
                before: Some(b),
            },
            40.0,
        );

        let gap = surface.metrics().card_gap;
        assert!((surface.card_bounds(b).unwrap().y0 - (b_top + 40.0 + gap)).abs() < 1e-9);
        assert!(surface.layout().column("column-1").unwrap().list.y1 > list_bottom);
        assert_eq!(
            surface.placeholder(),
            Some(PlaceholderSlot {
                column_id: "column-1".into(),
                before: Some(b),
            })
        );

        surface.remove_placeholder();
        assert!(surface.placeholder().is_none());
        assert!((surface.card_bounds(b).unwrap().y0 - b_top).abs() < 1e-9);
    }

    #[test]
    fn test_only_one_placeholder() {
        let board = board_with(&["A"], &[]);
        let mut surface = LayoutSurface::from_board(&board, LayoutMetrics::default());

        for column in ["column-1", "column-2", "column-3"] {
            surface.place_placeholder(
                PlaceholderSlot {
                    column_id: column.into(),
                    before: None,
                },
                30.0,
            );
        }
        let count = surface
            .layout()
            .columns
            .iter()
            .filter(|c| c.has_placeholder())
            .count();
        assert_eq!(count, 1);
        assert_eq!(surface.placeholder().unwrap().column_id, "column-3");
    }

    #[test]
    fn test_rebuild_clears_transient_visuals() {
        let board = board_with(&["A"], &[]);
        let mut surface = LayoutSurface::from_board(&board, LayoutMetrics::default());
        let a = card_at(&board, "column-1", 0);

        surface.set_grabbing(true);
        surface.set_lifted(a, true);
        surface.place_placeholder(
            PlaceholderSlot {
                column_id: "column-2".into(),
                before: None,
            },
            30.0,
        );
        surface.rebuild(&board);

        assert!(!surface.is_grabbing());
        assert!(surface.placeholder().is_none());
        assert!(!surface.layout().card(a).unwrap().lifted);
    }

    #[test]
    fn test_ui_target() {
        let board = board_with(&["A"], &[]);
        let surface = LayoutSurface::from_board(&board, LayoutMetrics::default());
        let a = card_at(&board, "column-1", 0);
        let card = surface.layout().card(a).unwrap();
        let todo = surface.layout().column("column-1").unwrap();

        assert_eq!(
            surface.ui_target(card.delete_button.center()),
            Some(UiTarget::DeleteButton {
                column_id: "column-1".into(),
                card_id: a,
            })
        );
        assert_eq!(
            surface.ui_target(card.bounds.origin() + Vec2::new(2.0, 2.0)),
            Some(UiTarget::Card {
                column_id: "column-1".into(),
                card_id: a,
            })
        );
        assert_eq!(
            surface.ui_target(todo.add_button.center()),
            Some(UiTarget::AddButton {
                column_id: "column-1".into(),
            })
        );
        assert_eq!(
            surface.ui_target(todo.header.center()),
            Some(UiTarget::List {
                column_id: "column-1".into(),
            })
        );
        assert_eq!(surface.ui_target(Point::new(-5.0, -5.0)), None);
    }

    #[test]
    fn test_drag_over_real_layout() {
        let mut board = board_with(&["A"], &["C1", "C2", "C3"]);
        let mut surface = LayoutSurface::from_board(&board, LayoutMetrics::default());
        let mut drag = DragController::new();
        let a = card_at(&board, "column-1", 0);
        let c1 = card_at(&board, "column-3", 0);
        let c2 = card_at(&board, "column-3", 1);

        drag.begin(&board, surface.card_center(a).unwrap(), &mut surface)
            .unwrap();
        let y = (surface.card_center(c1).unwrap().y + surface.card_center(c2).unwrap().y) / 2.0;
        let x = surface.layout().column("column-3").unwrap().list.center().x;
        let target = Point::new(x, y);

        assert_eq!(drag.track(target, &mut surface), TrackOutcome::Activated);
        assert_eq!(surface.placeholder().unwrap().before, Some(c2));
        // The reflow moved C2 down; the same pointer must not move it again.
        assert_eq!(drag.track(target, &mut surface), TrackOutcome::Unchanged);

        let outcome = drag.commit(&DropEvent::at(target), &mut board, &mut surface);
        assert!(outcome.is_committed());
        let done: Vec<&str> = board
            .column("column-3")
            .unwrap()
            .cards
            .iter()
            .map(|c| c.content.as_str())
            .collect();
        assert_eq!(done, vec!["C1", "A", "C2", "C3"]);
        assert!(surface.placeholder().is_none());
        assert!(!surface.is_grabbing());
    }
}
