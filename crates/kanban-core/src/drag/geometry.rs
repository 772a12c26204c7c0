//! Insertion-point geometry over a rendered card list.

use crate::board::CardId;
use crate::surface::{CardSlot, ListEntry};

/// Real cards of a list in display order, skipping the dragged card and
/// the placeholder.
fn sibling_cards(entries: &[ListEntry], dragged: CardId) -> impl Iterator<Item = &CardSlot> {
    entries.iter().filter_map(move |entry| match entry {
        ListEntry::Card(slot) if slot.card_id != dragged => Some(slot),
        _ => None,
    })
}

/// Find the card the placeholder should be inserted before.
///
/// Returns the first sibling whose vertical center is at or below the
/// pointer. A pointer exactly on a center goes above that card. `None`
/// means the end of the list.
pub fn insertion_anchor(entries: &[ListEntry], dragged: CardId, pointer_y: f64) -> Option<CardId> {
    sibling_cards(entries, dragged)
        .find(|slot| pointer_y <= slot.center_y())
        .map(|slot| slot.card_id)
}

/// Count the real cards that precede the placeholder.
///
/// Returns `None` when the list has no placeholder.
pub fn placeholder_index(entries: &[ListEntry], dragged: CardId) -> Option<usize> {
    let mut index = 0;
    for entry in entries {
        match entry {
            ListEntry::Placeholder { .. } => return Some(index),
            ListEntry::Card(slot) if slot.card_id != dragged => index += 1,
            ListEntry::Card(_) => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;
    use uuid::Uuid;

    fn card(id: CardId, y0: f64) -> ListEntry {
        ListEntry::Card(CardSlot {
            card_id: id,
            bounds: Rect::new(0.0, y0, 100.0, y0 + 40.0),
        })
    }

    #[test]
    fn test_pointer_between_centers() {
        let ids: Vec<_> = (0..3).map(|_| Uuid::new_v4()).collect();
        // centers at 20, 70, 120
        let entries = vec![card(ids[0], 0.0), card(ids[1], 50.0), card(ids[2], 100.0)];

        let anchor = insertion_anchor(&entries, Uuid::new_v4(), 45.0);
        assert_eq!(anchor, Some(ids[1]));
    }

    #[test]
    fn test_pointer_on_center_inserts_before() {
        let ids: Vec<_> = (0..2).map(|_| Uuid::new_v4()).collect();
        let entries = vec![card(ids[0], 0.0), card(ids[1], 50.0)];

        assert_eq!(insertion_anchor(&entries, Uuid::new_v4(), 20.0), Some(ids[0]));
        assert_eq!(insertion_anchor(&entries, Uuid::new_v4(), 20.5), Some(ids[1]));
    }

    #[test]
    fn test_pointer_below_all_cards_goes_to_end() {
        let ids: Vec<_> = (0..2).map(|_| Uuid::new_v4()).collect();
        let entries = vec![card(ids[0], 0.0), card(ids[1], 50.0)];

        assert_eq!(insertion_anchor(&entries, Uuid::new_v4(), 500.0), None);
        assert_eq!(insertion_anchor(&[], Uuid::new_v4(), 0.0), None);
    }

    #[test]
    fn test_dragged_card_and_placeholder_are_skipped() {
        let ids: Vec<_> = (0..2).map(|_| Uuid::new_v4()).collect();
        let entries = vec![
            card(ids[0], 0.0),
            ListEntry::Placeholder {
                bounds: Rect::new(0.0, 50.0, 100.0, 90.0),
            },
            card(ids[1], 100.0),
        ];

        // Pointer above the dragged card's own center still skips it.
        assert_eq!(insertion_anchor(&entries, ids[0], 5.0), Some(ids[1]));
    }

    #[test]
    fn test_placeholder_index_counts_real_cards() {
        let ids: Vec<_> = (0..3).map(|_| Uuid::new_v4()).collect();
        let placeholder = ListEntry::Placeholder {
            bounds: Rect::new(0.0, 0.0, 100.0, 40.0),
        };
        let entries = vec![card(ids[0], 0.0), card(ids[1], 50.0), placeholder, card(ids[2], 150.0)];

        assert_eq!(placeholder_index(&entries, Uuid::new_v4()), Some(2));
        // The dragged card does not count toward the target index.
        assert_eq!(placeholder_index(&entries, ids[0]), Some(1));
        assert_eq!(placeholder_index(&entries[..2], ids[0]), None);
    }
}
