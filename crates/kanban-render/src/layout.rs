//! Board layout: projects the board model to positioned rectangles.
//!
//! Columns sit side by side. Each column has a header, a card list and an
//! "add card" button below the list. Cards are stacked top to bottom in
//! stored order; their height follows the wrapped line count of their
//! content. All columns are stretched to the height of the tallest one so
//! that the whole column body is a drop target.

use kanban_core::{Board, CardId, ColumnId};
use kurbo::{Point, Rect};

/// Layout tuning, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Top-left corner of the first column.
    pub origin: Point,
    pub column_width: f64,
    pub column_gap: f64,
    /// Inner padding of a column around its header, list and button.
    pub column_padding: f64,
    pub header_height: f64,
    /// Inner padding of a card around its text.
    pub card_padding: f64,
    /// Vertical gap between list entries.
    pub card_gap: f64,
    pub line_height: f64,
    /// Characters that fit on one line of card text.
    pub chars_per_line: usize,
    /// Minimum height of an empty card list.
    pub min_list_height: f64,
    pub add_button_height: f64,
    /// Side of the square delete button in a card's top-right corner.
    pub delete_button_size: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            origin: Point::new(20.0, 20.0),
            column_width: 280.0,
            column_gap: 20.0,
            column_padding: 12.0,
            header_height: 32.0,
            card_padding: 10.0,
            card_gap: 8.0,
            line_height: 20.0,
            chars_per_line: 28,
            min_list_height: 60.0,
            add_button_height: 32.0,
            delete_button_size: 18.0,
        }
    }
}

impl LayoutMetrics {
    /// Rendered height of a card with the given content.
    pub fn card_height(&self, content: &str) -> f64 {
        let lines = wrap_lines(content, self.chars_per_line).len().max(1);
        lines as f64 * self.line_height + 2.0 * self.card_padding
    }

    fn column_x(&self, index: usize) -> f64 {
        self.origin.x + index as f64 * (self.column_width + self.column_gap)
    }
}

/// Greedy word wrap. Words longer than a line are split.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let needed = if line.is_empty() { word.len() } else { line.chars().count() + 1 + word.len() };
            if needed > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.extend(word);
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}

/// A positioned card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub card_id: CardId,
    pub column_id: ColumnId,
    pub content: String,
    pub bounds: Rect,
    pub delete_button: Rect,
    /// Drawn as "lifted" while being dragged.
    pub lifted: bool,
}

/// One child of a card list.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryLayout {
    Card(CardLayout),
    Placeholder { bounds: Rect },
}

impl EntryLayout {
    pub fn bounds(&self) -> Rect {
        match self {
            EntryLayout::Card(card) => card.bounds,
            EntryLayout::Placeholder { bounds } => *bounds,
        }
    }

    fn height(&self) -> f64 {
        self.bounds().height()
    }

    fn set_top(&mut self, x0: f64, y0: f64, width: f64, delete_size: f64) {
        let height = self.height();
        let bounds = Rect::new(x0, y0, x0 + width, y0 + height);
        match self {
            EntryLayout::Card(card) => {
                card.bounds = bounds;
                card.delete_button = Rect::new(
                    bounds.x1 - delete_size - 4.0,
                    bounds.y0 + 4.0,
                    bounds.x1 - 4.0,
                    bounds.y0 + 4.0 + delete_size,
                );
            }
            EntryLayout::Placeholder { bounds: b } => *b = bounds,
        }
    }
}

/// A positioned column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    pub column_id: ColumnId,
    pub title: String,
    pub bounds: Rect,
    pub header: Rect,
    pub list: Rect,
    pub add_button: Rect,
    pub entries: Vec<EntryLayout>,
}

impl ColumnLayout {
    /// Cards of this column in display order.
    pub fn cards(&self) -> impl Iterator<Item = &CardLayout> {
        self.entries.iter().filter_map(|entry| match entry {
            EntryLayout::Card(card) => Some(card),
            EntryLayout::Placeholder { .. } => None,
        })
    }

    pub fn has_placeholder(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| matches!(entry, EntryLayout::Placeholder { .. }))
    }
}

/// The full positioned board.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardLayout {
    pub metrics: LayoutMetrics,
    pub columns: Vec<ColumnLayout>,
}

impl BoardLayout {
    /// Lay out a board from scratch.
    pub fn build(board: &Board, metrics: LayoutMetrics) -> Self {
        let columns = board
            .columns
            .iter()
            .map(|column| ColumnLayout {
                column_id: column.id.clone(),
                title: column.title.clone(),
                bounds: Rect::ZERO,
                header: Rect::ZERO,
                list: Rect::ZERO,
                add_button: Rect::ZERO,
                entries: column
                    .cards
                    .iter()
                    .map(|card| {
                        let height = metrics.card_height(&card.content);
                        EntryLayout::Card(CardLayout {
                            card_id: card.id,
                            column_id: column.id.clone(),
                            content: card.content.clone(),
                            bounds: Rect::new(0.0, 0.0, 0.0, height),
                            delete_button: Rect::ZERO,
                            lifted: false,
                        })
                    })
                    .collect(),
            })
            .collect();

        let mut layout = Self { metrics, columns };
        layout.arrange();
        layout
    }

    pub fn column(&self, column_id: &str) -> Option<&ColumnLayout> {
        self.columns.iter().find(|c| c.column_id == column_id)
    }

    pub fn column_mut(&mut self, column_id: &str) -> Option<&mut ColumnLayout> {
        self.columns.iter_mut().find(|c| c.column_id == column_id)
    }

    /// Iterate every card across all columns.
    pub fn cards(&self) -> impl Iterator<Item = &CardLayout> {
        self.columns.iter().flat_map(|c| c.cards())
    }

    pub fn card(&self, card_id: CardId) -> Option<&CardLayout> {
        self.cards().find(|c| c.card_id == card_id)
    }

    pub fn card_mut(&mut self, card_id: CardId) -> Option<&mut CardLayout> {
        self.columns
            .iter_mut()
            .flat_map(|c| c.entries.iter_mut())
            .find_map(|entry| match entry {
                EntryLayout::Card(card) if card.card_id == card_id => Some(card),
                _ => None,
            })
    }

    /// Bounding box of the whole board.
    pub fn bounds(&self) -> Rect {
        self.columns
            .iter()
            .map(|c| c.bounds)
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::ZERO)
    }

    /// Recompute every position from entry heights and order.
    ///
    /// Called after any change to a list (placeholder in or out).
    pub fn arrange(&mut self) {
        let m = self.metrics;
        let inner_width = m.column_width - 2.0 * m.column_padding;

        for (index, column) in self.columns.iter_mut().enumerate() {
            let x0 = m.column_x(index);
            let y0 = m.origin.y;
            let inner_x = x0 + m.column_padding;

            column.header = Rect::new(
                inner_x,
                y0 + m.column_padding,
                inner_x + inner_width,
                y0 + m.column_padding + m.header_height,
            );

            let list_top = column.header.y1 + m.column_padding;
            let mut y = list_top;
            for entry in &mut column.entries {
                entry.set_top(inner_x, y, inner_width, m.delete_button_size);
                y += entry.height() + m.card_gap;
            }
            let content_bottom = if column.entries.is_empty() { list_top } else { y - m.card_gap };
            let list_bottom = content_bottom.max(list_top + m.min_list_height);
            column.list = Rect::new(inner_x, list_top, inner_x + inner_width, list_bottom);

            column.add_button = Rect::new(
                inner_x,
                list_bottom + m.column_padding,
                inner_x + inner_width,
                list_bottom + m.column_padding + m.add_button_height,
            );
            column.bounds = Rect::new(
                x0,
                y0,
                x0 + m.column_width,
                column.add_button.y1 + m.column_padding,
            );
        }

        let bottom = self
            .columns
            .iter()
            .map(|c| c.bounds.y1)
            .fold(m.origin.y, f64::max);
        for column in &mut self.columns {
            column.bounds.y1 = bottom;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(todo: &[&str]) -> Board {
        let mut board = Board::new();
        for content in todo {
            board.add_card("column-1", content).unwrap();
        }
        board
    }

    #[test]
    fn test_wrap_lines() {
        assert_eq!(wrap_lines("hello world", 5), vec!["hello", "world"]);
        assert_eq!(wrap_lines("a b c", 5), vec!["a b c"]);
        assert_eq!(wrap_lines("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap_lines("one\ntwo", 20), vec!["one", "two"]);
        assert!(wrap_lines("", 10).is_empty());
    }

    #[test]
    fn test_card_height_grows_with_content() {
        let m = LayoutMetrics::default();
        let short = m.card_height("short");
        let long = m.card_height(&"word ".repeat(40));

        assert!((short - (m.line_height + 2.0 * m.card_padding)).abs() < f64::EPSILON);
        assert!(long > short);
    }

    #[test]
    fn test_cards_stack_in_order() {
        let board = board_with(&["A", "B", "C"]);
        let layout = BoardLayout::build(&board, LayoutMetrics::default());
        let todo = layout.column("column-1").unwrap();
        let bounds: Vec<Rect> = todo.cards().map(|c| c.bounds).collect();

        assert_eq!(bounds.len(), 3);
        for pair in bounds.windows(2) {
            assert!(pair[0].y1 < pair[1].y0);
        }
        assert!(todo.list.contains(bounds[0].center()));
        assert!(todo.add_button.y0 > todo.list.y1);
    }

    #[test]
    fn test_columns_side_by_side_with_equal_height() {
        let board = board_with(&["A", "B", "C", "D"]);
        let layout = BoardLayout::build(&board, LayoutMetrics::default());

        assert_eq!(layout.columns.len(), 3);
        for pair in layout.columns.windows(2) {
            assert!(pair[0].bounds.x1 < pair[1].bounds.x0);
            assert!((pair[0].bounds.y1 - pair[1].bounds.y1).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_arrange_reflows_after_insert() {
        let board = board_with(&["A", "B"]);
        let mut layout = BoardLayout::build(&board, LayoutMetrics::default());
        let b_before = layout.column("column-1").unwrap().entries[1].bounds();

        let column = layout.column_mut("column-1").unwrap();
        column.entries.insert(
            1,
            EntryLayout::Placeholder {
                bounds: Rect::new(0.0, 0.0, 0.0, 50.0),
            },
        );
        layout.arrange();

        let column = layout.column("column-1").unwrap();
        let b_after = column.entries[2].bounds();
        let gap = layout.metrics.card_gap;
        assert!((b_after.y0 - (b_before.y0 + 50.0 + gap)).abs() < 1e-9);
        assert!(column.has_placeholder());
    }
}
