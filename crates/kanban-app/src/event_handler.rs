//! Pointer event dispatch.
//!
//! Press on a card arms a drag, moves track it, release drops it. A press
//! and release on the same button is a click and raises a [`UiAction`].
//! A press that arrives while a gesture is still live means its release
//! was lost; that gesture is cancelled before the press is handled.

use crate::app::App;
use crate::ui::UiAction;
use kanban_core::{DropEvent, MouseButton, PointerEvent, Storage, TrackOutcome};
use kanban_render::UiTarget;

impl<S: Storage> App<S> {
    /// Feed one pointer event through the app.
    ///
    /// Returns the action a completed click asks for; the caller decides
    /// when to [`App::apply`] it.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Option<UiAction> {
        self.input.handle_pointer_event(event);

        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => {
                self.pressed = None;
                self.redraw = true;
                if !self.session.drag().is_idle() {
                    log::warn!("Press during a live gesture; cancelling it");
                    self.session.cancel_drag(&mut self.surface);
                }
                match self.surface.ui_target(position) {
                    Some(target @ (UiTarget::DeleteButton { .. } | UiTarget::AddButton { .. })) => {
                        self.pressed = Some(target);
                    }
                    Some(UiTarget::Card { .. }) => {
                        if let Err(e) = self.session.begin_drag(position, &mut self.surface) {
                            log::debug!("Press did not start a drag: {}", e);
                        }
                    }
                    _ => {}
                }
                None
            }
            PointerEvent::Move { position } => {
                if matches!(
                    self.session.track_drag(position, &mut self.surface),
                    TrackOutcome::Activated | TrackOutcome::PlaceholderMoved
                ) {
                    self.redraw = true;
                }
                None
            }
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
            } => {
                self.redraw = true;
                if !self.session.drag().is_idle() {
                    self.session
                        .drop_drag(&DropEvent::at(position), &mut self.surface);
                    return None;
                }

                let pressed = self.pressed.take()?;
                if self.surface.ui_target(position).as_ref() != Some(&pressed) {
                    return None;
                }
                match pressed {
                    UiTarget::DeleteButton { column_id, card_id } => {
                        Some(UiAction::DeleteCard { column_id, card_id })
                    }
                    UiTarget::AddButton { column_id } => {
                        Some(UiAction::ShowAddCardForm { column_id })
                    }
                    UiTarget::Card { .. } | UiTarget::List { .. } => None,
                }
            }
            _ => None,
        }
    }
}
