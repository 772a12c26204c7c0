//! In-memory surface used by unit tests.

use crate::board::{Board, CardId, ColumnId};
use crate::surface::{
    BoardView, CardSlot, DragOverlay, ListEntry, PlaceholderSlot, SurfaceHit, SurfaceQuery,
};
use kurbo::{Point, Rect};
use std::collections::HashSet;

pub const COLUMN_WIDTH: f64 = 200.0;
pub const COLUMN_GAP: f64 = 20.0;
pub const LIST_TOP: f64 = 40.0;
pub const CARD_HEIGHT: f64 = 40.0;
pub const CARD_GAP: f64 = 10.0;
pub const COLUMN_HEIGHT: f64 = 1000.0;

#[derive(Debug, Clone, Copy)]
enum Item {
    Card(CardId),
    Placeholder(f64),
}

#[derive(Debug, Clone)]
struct FakeColumn {
    id: ColumnId,
    items: Vec<Item>,
}

/// A column-per-strip surface with fixed-height cards that reflows like a
/// vertical flow layout.
#[derive(Debug, Default)]
pub struct FakeSurface {
    columns: Vec<FakeColumn>,
    pub grabbing: bool,
    pub lifted: HashSet<CardId>,
    pub placements: usize,
    pub rebuilds: usize,
}

impl FakeSurface {
    pub fn from_board(board: &Board) -> Self {
        let mut surface = Self::default();
        surface.project(board);
        surface
    }

    fn project(&mut self, board: &Board) {
        self.columns = board
            .columns
            .iter()
            .map(|col| FakeColumn {
                id: col.id.clone(),
                items: col.cards.iter().map(|c| Item::Card(c.id)).collect(),
            })
            .collect();
        self.grabbing = false;
        self.lifted.clear();
    }

    fn column_x(index: usize) -> f64 {
        index as f64 * (COLUMN_WIDTH + COLUMN_GAP)
    }

    fn layout(&self, index: usize) -> Vec<ListEntry> {
        let x0 = Self::column_x(index);
        let mut y = LIST_TOP;
        let mut entries = Vec::new();
        for item in &self.columns[index].items {
            let height = match item {
                Item::Card(_) => CARD_HEIGHT,
                Item::Placeholder(h) => *h,
            };
            let bounds = Rect::new(x0, y, x0 + COLUMN_WIDTH, y + height);
            entries.push(match item {
                Item::Card(id) => ListEntry::Card(CardSlot { card_id: *id, bounds }),
                Item::Placeholder(_) => ListEntry::Placeholder { bounds },
            });
            y += height + CARD_GAP;
        }
        entries
    }

    /// Center point of a rendered card.
    pub fn card_center(&self, card_id: CardId) -> Point {
        self.card_bounds(card_id)
            .map(|r| r.center())
            .expect("card is rendered")
    }

    /// A point inside a column's list, at the given y.
    pub fn column_point(&self, column_id: &str, y: f64) -> Point {
        let index = self
            .columns
            .iter()
            .position(|c| c.id == column_id)
            .expect("column is rendered");
        Point::new(Self::column_x(index) + COLUMN_WIDTH / 2.0, y)
    }

    pub fn has_placeholder(&self) -> bool {
        self.placeholder().is_some()
    }
}

impl SurfaceQuery for FakeSurface {
    fn hit_test(&self, point: Point) -> Option<SurfaceHit> {
        let index = (0..self.columns.len()).find(|&i| {
            let x0 = Self::column_x(i);
            Rect::new(x0, 0.0, x0 + COLUMN_WIDTH, COLUMN_HEIGHT).contains(point)
        })?;
        let card_id = self.layout(index).into_iter().find_map(|entry| match entry {
            ListEntry::Card(slot) if slot.bounds.contains(point) => Some(slot.card_id),
            _ => None,
        });
        Some(SurfaceHit {
            column_id: self.columns[index].id.clone(),
            card_id,
        })
    }

    fn list_entries(&self, column_id: &str) -> Vec<ListEntry> {
        self.columns
            .iter()
            .position(|c| c.id == column_id)
            .map(|i| self.layout(i))
            .unwrap_or_default()
    }

    fn card_bounds(&self, card_id: CardId) -> Option<Rect> {
        (0..self.columns.len())
            .flat_map(|i| self.layout(i))
            .find_map(|entry| match entry {
                ListEntry::Card(slot) if slot.card_id == card_id => Some(slot.bounds),
                _ => None,
            })
    }
}

impl DragOverlay for FakeSurface {
    fn set_grabbing(&mut self, grabbing: bool) {
        self.grabbing = grabbing;
    }

    fn set_lifted(&mut self, card_id: CardId, lifted: bool) {
        if lifted {
            self.lifted.insert(card_id);
        } else {
            self.lifted.remove(&card_id);
        }
    }

    fn place_placeholder(&mut self, slot: PlaceholderSlot, height: f64) {
        self.remove_placeholder();
        let Some(column) = self.columns.iter_mut().find(|c| c.id == slot.column_id) else {
            return;
        };
        let at = slot
            .before
            .and_then(|before| {
                column
                    .items
                    .iter()
                    .position(|item| matches!(item, Item::Card(id) if *id == before))
            })
            .unwrap_or(column.items.len());
        column.items.insert(at, Item::Placeholder(height));
        self.placements += 1;
    }

    fn remove_placeholder(&mut self) {
        for column in &mut self.columns {
            column.items.retain(|item| !matches!(item, Item::Placeholder(_)));
        }
    }

    fn placeholder(&self) -> Option<PlaceholderSlot> {
        self.columns.iter().find_map(|column| {
            let at = column
                .items
                .iter()
                .position(|item| matches!(item, Item::Placeholder(_)))?;
            let before = column.items[at + 1..].iter().find_map(|item| match item {
                Item::Card(id) => Some(*id),
                Item::Placeholder(_) => None,
            });
            Some(PlaceholderSlot {
                column_id: column.id.clone(),
                before,
            })
        })
    }
}

impl BoardView for FakeSurface {
    fn rebuild(&mut self, board: &Board) {
        self.project(board);
        self.rebuilds += 1;
    }
}
