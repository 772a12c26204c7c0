//! Application state and configuration.

use crate::ui::UiAction;
use kanban_core::storage::BOARD_STATE_KEY;
use kanban_core::{
    Board, BoardResult, BoardSession, BoardStore, ColumnId, DEFAULT_DRAG_THRESHOLD, DragConfig,
    EditOutcome, InputState, Storage,
};
use kanban_render::{
    LayoutMetrics, LayoutSurface, RenderContext, RenderResult, Renderer, SceneRenderer,
    TextRenderer, Theme, UiTarget,
};

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    /// Key the board is persisted under.
    pub storage_key: String,
    /// Pointer travel before a press on a card becomes a drag.
    pub drag_threshold: f64,
    pub metrics: LayoutMetrics,
    pub theme: Theme,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Kanban".to_string(),
            storage_key: BOARD_STATE_KEY.to_string(),
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            metrics: LayoutMetrics::default(),
            theme: Theme::default(),
        }
    }
}

impl AppConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_drag_threshold(mut self, threshold: f64) -> Self {
        self.drag_threshold = threshold;
        self
    }

    pub fn with_metrics(mut self, metrics: LayoutMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

/// The kanban application: a board session plus its rendered surface.
pub struct App<S: Storage> {
    pub(crate) config: AppConfig,
    pub(crate) session: BoardSession<S>,
    pub(crate) surface: LayoutSurface,
    pub(crate) input: InputState,
    /// Button under the last primary press, if the press landed on one.
    pub(crate) pressed: Option<UiTarget>,
    /// Column whose add-card form is open.
    add_form: Option<ColumnId>,
    /// Whether anything visible changed since the last `take_redraw`.
    pub(crate) redraw: bool,
}

impl<S: Storage> App<S> {
    /// Open the app over a storage backend.
    ///
    /// Loads the stored board (or the default board) and lays it out.
    pub fn new(config: AppConfig, storage: std::sync::Arc<S>) -> Self {
        let store = BoardStore::with_key(storage, config.storage_key.clone());
        let session = BoardSession::open(
            store,
            DragConfig {
                threshold: config.drag_threshold,
            },
        );
        let surface = LayoutSurface::from_board(session.board(), config.metrics);
        log::info!(
            "Opened '{}' with {} cards",
            config.title,
            session.board().card_count()
        );

        Self {
            config,
            session,
            surface,
            input: InputState::new(),
            pressed: None,
            add_form: None,
            redraw: true,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        self.session.board()
    }

    pub fn session(&self) -> &BoardSession<S> {
        &self.session
    }

    pub fn surface(&self) -> &LayoutSurface {
        &self.surface
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Column whose add-card form is open.
    pub fn add_form(&self) -> Option<&str> {
        self.add_form.as_deref()
    }

    /// Apply a user-interface action.
    ///
    /// Returns the model change, if one happened now.
    pub fn apply(&mut self, action: UiAction) -> BoardResult<Option<EditOutcome>> {
        self.redraw = true;
        match action {
            UiAction::ShowAddCardForm { column_id } => {
                self.add_form = Some(column_id);
                Ok(None)
            }
            UiAction::HideAddCardForm => {
                self.add_form = None;
                Ok(None)
            }
            UiAction::AddCard { column_id, content } => {
                self.add_form = None;
                self.session
                    .add_card(&column_id, &content, &mut self.surface)
                    .map(Some)
            }
            UiAction::DeleteCard { column_id, card_id } => self
                .session
                .delete_card(&column_id, card_id, &mut self.surface)
                .map(Some),
        }
    }

    /// Abandon any gesture in progress (pointer capture lost, escape).
    pub fn cancel_gesture(&mut self) -> bool {
        self.pressed = None;
        self.redraw = true;
        self.session.cancel_drag(&mut self.surface)
    }

    /// Re-read the board from storage.
    pub fn reload(&mut self) -> bool {
        self.redraw = true;
        self.session.reload(&mut self.surface)
    }

    /// Whether the frame needs drawing again; clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    fn context(&self) -> RenderContext<'_> {
        RenderContext::new(&self.surface)
            .with_title(&self.config.title)
            .with_theme(self.config.theme)
    }

    /// Render the current frame as text.
    pub fn render_text(&self) -> RenderResult<String> {
        let mut renderer = TextRenderer::new();
        renderer.render(&self.context())?;
        Ok(renderer.into_output())
    }

    /// Render the current frame into a scene renderer.
    pub fn render_scene(&self, renderer: &mut SceneRenderer) -> RenderResult<()> {
        renderer.render(&self.context())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_core::{BoardError, MemoryStorage};
    use std::sync::Arc;

    fn app() -> App<MemoryStorage> {
        App::new(AppConfig::default(), Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_config_builders() {
        let config = AppConfig::default()
            .with_title("Sprint")
            .with_storage_key("sprint-board")
            .with_drag_threshold(8.0);

        assert_eq!(config.title, "Sprint");
        assert_eq!(config.storage_key, "sprint-board");
        assert!((config.drag_threshold - 8.0).abs() < f64::EPSILON);
        assert_eq!(AppConfig::default().storage_key, "kanban-board-state");
    }

    #[test]
    fn test_new_app_shows_default_board() {
        let app = app();

        assert_eq!(app.board(), &Board::default());
        let text = app.render_text().unwrap();
        assert!(text.starts_with("# Kanban\n## TODO (0)\n"));
        assert!(text.contains("## Done (0)"));
    }

    #[test]
    fn test_add_card_form() {
        let mut app = app();

        app.apply(UiAction::ShowAddCardForm {
            column_id: "column-2".into(),
        })
        .unwrap();
        assert_eq!(app.add_form(), Some("column-2"));

        let outcome = app
            .apply(UiAction::AddCard {
                column_id: "column-2".into(),
                content: "  Ship it  ".into(),
            })
            .unwrap();
        assert!(matches!(outcome, Some(EditOutcome::Added(_))));
        assert_eq!(app.add_form(), None);
        assert_eq!(app.board().columns[1].cards[0].content, "Ship it");
        assert!(app.render_text().unwrap().contains("- Ship it\n"));
    }

    #[test]
    fn test_empty_card_is_rejected_and_form_closes() {
        let mut app = app();
        app.apply(UiAction::ShowAddCardForm {
            column_id: "column-1".into(),
        })
        .unwrap();

        let result = app.apply(UiAction::AddCard {
            column_id: "column-1".into(),
            content: "   ".into(),
        });
        assert_eq!(result, Err(BoardError::EmptyContent));
        assert_eq!(app.add_form(), None);
        assert_eq!(app.board().card_count(), 0);
    }

    #[test]
    fn test_state_is_stored_under_configured_key() {
        let storage = Arc::new(MemoryStorage::new());
        let mut app = App::new(
            AppConfig::default().with_storage_key("mine"),
            storage.clone(),
        );
        app.apply(UiAction::AddCard {
            column_id: "column-1".into(),
            content: "X".into(),
        })
        .unwrap();

        assert!(storage.exists("mine").unwrap());
        assert!(!storage.exists(BOARD_STATE_KEY).unwrap());
    }

    #[test]
    fn test_scene_render() {
        let mut app = app();
        app.apply(UiAction::AddCard {
            column_id: "column-1".into(),
            content: "X".into(),
        })
        .unwrap();

        let mut renderer = SceneRenderer::new();
        app.render_scene(&mut renderer).unwrap();
        assert_eq!(
            renderer
                .scene()
                .items_of(kanban_render::ItemKind::Card)
                .count(),
            1
        );
    }
}
