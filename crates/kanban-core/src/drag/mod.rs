//! Drag gesture controller.
//!
//! Owns the lifecycle of one drag: a press on a card arms a session, moving
//! past the threshold activates it and attaches a placeholder, and release
//! either commits the move into the board or cancels.
//!
//! ```text
//! Idle -> Armed -> Active -> (Committed | Cancelled) -> Idle
//! ```

mod geometry;
mod session;

pub use geometry::{insertion_anchor, placeholder_index};
pub use session::{DragPayload, DragSession};

use crate::board::{Board, BoardError, CardId, CardMove, ColumnId};
use crate::surface::{DragSurface, PlaceholderSlot};
use kurbo::Point;
use thiserror::Error;

/// Default movement threshold in screen pixels before a press becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 5.0;

/// Drag tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragConfig {
    /// Minimum pointer travel from the press point to start a drag.
    pub threshold: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_DRAG_THRESHOLD,
        }
    }
}

/// Reasons a gesture cannot begin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DragError {
    #[error("Gesture did not start on a card")]
    NotACard,
    #[error("A drag gesture is already in progress")]
    AlreadyDragging,
    #[error("Column not found: {0}")]
    UnknownColumn(ColumnId),
    #[error("Card {0} is not in its rendered column")]
    UnknownCard(CardId),
}

/// Controller state.
#[derive(Debug, Clone, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pressed on a card, threshold not yet crossed.
    Armed(DragSession),
    /// Dragging with a live placeholder.
    Active(DragSession),
}

/// Result of a track step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    /// No gesture in progress.
    Ignored,
    /// Still armed; the pointer has not moved far enough.
    BelowThreshold,
    /// The gesture just became a drag.
    Activated,
    /// The placeholder was attached or relocated.
    PlaceholderMoved,
    /// Nothing to do: same position, or the pointer is off every list.
    Unchanged,
}

/// Release event for a gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DropEvent {
    /// Pointer position at release.
    pub position: Point,
    /// Transfer payload, when the platform delivers one.
    pub payload: Option<String>,
}

impl DropEvent {
    pub fn at(position: Point) -> Self {
        Self {
            position,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }
}

/// Why a release did not move anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelReason {
    /// There was no gesture.
    NoGesture,
    /// Released before crossing the threshold (a click).
    NotDragging,
    /// Dragging, but the placeholder never attached to a list.
    NoPlaceholder,
    /// Released outside every column.
    OutsideSurface,
    /// The rendered placeholder no longer matches the session.
    StalePlaceholder,
    /// The transfer payload could not be parsed.
    MalformedPayload,
    /// The transfer payload names a different session.
    PayloadMismatch,
    /// Explicit abort.
    Aborted,
    /// The board refused the move.
    Rejected(BoardError),
}

/// Result of a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Committed(CardMove),
    Cancelled(CancelReason),
}

impl DropOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, DropOutcome::Committed(_))
    }
}

/// Drives one drag gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    config: DragConfig,
    state: DragState,
}

impl DragController {
    /// Create a controller with the default threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller with custom tuning.
    pub fn with_config(config: DragConfig) -> Self {
        Self {
            config,
            state: DragState::Idle,
        }
    }

    pub fn config(&self) -> DragConfig {
        self.config
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// The live session, armed or active.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Idle => None,
            DragState::Armed(session) | DragState::Active(session) => Some(session),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, DragState::Armed(_))
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Active(_))
    }

    /// Start a gesture at `position`.
    ///
    /// Only a press on a rendered card is accepted. The card's column and
    /// index are captured from the board as they are now.
    pub fn begin<S: DragSurface>(
        &mut self,
        board: &Board,
        position: Point,
        surface: &mut S,
    ) -> Result<(), DragError> {
        if !self.is_idle() {
            return Err(DragError::AlreadyDragging);
        }

        let hit = surface.hit_test(position).ok_or(DragError::NotACard)?;
        let card_id = hit.card_id.ok_or(DragError::NotACard)?;
        let column = board
            .column(&hit.column_id)
            .ok_or_else(|| DragError::UnknownColumn(hit.column_id.clone()))?;
        let source_index = column
            .position(card_id)
            .ok_or(DragError::UnknownCard(card_id))?;

        log::debug!(
            "Drag armed: card {} at {}[{}]",
            card_id,
            hit.column_id,
            source_index
        );
        surface.set_grabbing(true);
        self.state = DragState::Armed(DragSession::new(
            card_id,
            hit.column_id,
            source_index,
            position,
        ));
        Ok(())
    }

    /// Process a pointer move.
    pub fn track<S: DragSurface>(&mut self, position: Point, surface: &mut S) -> TrackOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Idle => TrackOutcome::Ignored,
            DragState::Armed(mut session) => {
                if session.start.distance(position) < self.config.threshold {
                    self.state = DragState::Armed(session);
                    return TrackOutcome::BelowThreshold;
                }

                session.placeholder_height = surface
                    .card_bounds(session.card_id)
                    .map(|bounds| bounds.height())
                    .unwrap_or_default();
                surface.set_lifted(session.card_id, true);
                log::debug!("Drag activated: card {}", session.card_id);

                self.position_placeholder(&mut session, position, surface);
                self.state = DragState::Active(session);
                TrackOutcome::Activated
            }
            DragState::Active(mut session) => {
                let outcome = self.position_placeholder(&mut session, position, surface);
                self.state = DragState::Active(session);
                outcome
            }
        }
    }

    /// Move the placeholder to the insertion point under `position`, only
    /// touching the surface when the computed slot differs from the current
    /// one.
    fn position_placeholder<S: DragSurface>(
        &self,
        session: &mut DragSession,
        position: Point,
        surface: &mut S,
    ) -> TrackOutcome {
        let Some(hit) = surface.hit_test(position) else {
            return TrackOutcome::Unchanged;
        };

        let entries = surface.list_entries(&hit.column_id);
        let slot = PlaceholderSlot {
            before: insertion_anchor(&entries, session.card_id, position.y),
            column_id: hit.column_id,
        };

        if surface.placeholder().as_ref() == Some(&slot) {
            return TrackOutcome::Unchanged;
        }

        surface.place_placeholder(slot.clone(), session.placeholder_height);
        session.placeholder = Some(slot);
        TrackOutcome::PlaceholderMoved
    }

    /// Finish the gesture at release.
    ///
    /// On success the card has been moved in `board` and all drag visuals
    /// are gone. Any failure leaves `board` untouched and is reported as a
    /// cancellation.
    pub fn commit<S: DragSurface>(
        &mut self,
        drop: &DropEvent,
        board: &mut Board,
        surface: &mut S,
    ) -> DropOutcome {
        let session = match std::mem::take(&mut self.state) {
            DragState::Idle => return DropOutcome::Cancelled(CancelReason::NoGesture),
            DragState::Armed(session) => {
                clear_visuals(&session, surface);
                return DropOutcome::Cancelled(CancelReason::NotDragging);
            }
            DragState::Active(session) => session,
        };

        let outcome = match resolve_move(&session, drop, surface) {
            Ok(mv) => match board.move_card(&mv) {
                Ok(()) => {
                    log::info!(
                        "Moved card {} from {}[{}] to {}[{}]",
                        mv.card_id,
                        mv.from_column,
                        mv.from_index,
                        mv.to_column,
                        mv.to_index
                    );
                    DropOutcome::Committed(mv)
                }
                Err(e) => DropOutcome::Cancelled(CancelReason::Rejected(e)),
            },
            Err(reason) => DropOutcome::Cancelled(reason),
        };

        if let DropOutcome::Cancelled(reason) = &outcome {
            log::warn!("Drop of card {} cancelled: {:?}", session.card_id, reason);
        }
        clear_visuals(&session, surface);
        outcome
    }

    /// Abandon the gesture without touching the board.
    ///
    /// Returns false if there was nothing to cancel.
    pub fn cancel<S: DragSurface>(&mut self, surface: &mut S) -> bool {
        match std::mem::take(&mut self.state) {
            DragState::Idle => false,
            DragState::Armed(session) | DragState::Active(session) => {
                log::debug!("Drag cancelled: card {}", session.card_id);
                clear_visuals(&session, surface);
                true
            }
        }
    }
}

/// Work out the final move from the placeholder's position in its list.
fn resolve_move<S: DragSurface>(
    session: &DragSession,
    drop: &DropEvent,
    surface: &S,
) -> Result<CardMove, CancelReason> {
    if let Some(json) = &drop.payload {
        let payload = DragPayload::from_json(json).map_err(|e| {
            log::error!("Error parsing drag payload: {}", e);
            CancelReason::MalformedPayload
        })?;
        if !payload.matches(session) {
            return Err(CancelReason::PayloadMismatch);
        }
    }

    let slot = session
        .placeholder
        .as_ref()
        .ok_or(CancelReason::NoPlaceholder)?;
    surface
        .hit_test(drop.position)
        .ok_or(CancelReason::OutsideSurface)?;

    // The surface must still show the placeholder we last placed; a rebuild
    // in between would have dropped it.
    if surface.placeholder().as_ref() != Some(slot) {
        return Err(CancelReason::StalePlaceholder);
    }

    let entries = surface.list_entries(&slot.column_id);
    let to_index =
        placeholder_index(&entries, session.card_id).ok_or(CancelReason::StalePlaceholder)?;

    Ok(CardMove {
        card_id: session.card_id,
        from_column: session.source_column.clone(),
        from_index: session.source_index,
        to_column: slot.column_id.clone(),
        to_index,
    })
}

fn clear_visuals<S: DragSurface>(session: &DragSession, surface: &mut S) {
    surface.remove_placeholder();
    surface.set_lifted(session.card_id, false);
    surface.set_grabbing(false);
}
