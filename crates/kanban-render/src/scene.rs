//! Display list built from a laid-out board.

use crate::layout::{EntryLayout, wrap_lines};
use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use kurbo::Rect;
use peniko::Color;

/// Board colours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub column: Color,
    pub header_text: Color,
    pub card: Color,
    pub card_lifted: Color,
    pub card_text: Color,
    pub placeholder: Color,
    pub delete_button: Color,
    pub add_button: Color,
    pub button_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::from_rgba8(250, 250, 250, 255),
            column: Color::from_rgba8(235, 236, 240, 255),
            header_text: Color::from_rgba8(23, 43, 77, 255),
            card: Color::from_rgba8(255, 255, 255, 255),
            card_lifted: Color::from_rgba8(255, 255, 255, 128),
            card_text: Color::from_rgba8(23, 43, 77, 255),
            placeholder: Color::from_rgba8(59, 130, 246, 60), // Blue
            delete_button: Color::from_rgba8(235, 90, 70, 255),
            add_button: Color::from_rgba8(220, 223, 228, 255),
            button_text: Color::from_rgba8(68, 84, 111, 255),
        }
    }
}

/// What a scene item depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Column,
    Header,
    Card,
    LiftedCard,
    DeleteButton,
    AddButton,
    Placeholder,
}

impl ItemKind {
    /// Stable class name, used for DOM elements.
    pub fn class_name(self) -> &'static str {
        match self {
            ItemKind::Column => "column",
            ItemKind::Header => "column-header",
            ItemKind::Card => "card",
            ItemKind::LiftedCard => "card dragging",
            ItemKind::DeleteButton => "delete-card",
            ItemKind::AddButton => "add-card",
            ItemKind::Placeholder => "card-placeholder",
        }
    }
}

/// A filled rectangle with optional text lines, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    pub kind: ItemKind,
    pub rect: Rect,
    pub fill: Color,
    pub text: Vec<String>,
    pub text_color: Color,
}

/// An ordered display list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub background: Option<Color>,
    pub items: Vec<SceneItem>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.background = None;
        self.items.clear();
    }

    fn push(&mut self, kind: ItemKind, rect: Rect, fill: Color, text: Vec<String>, text_color: Color) {
        self.items.push(SceneItem {
            kind,
            rect,
            fill,
            text,
            text_color,
        });
    }

    /// Items of a given kind.
    pub fn items_of(&self, kind: ItemKind) -> impl Iterator<Item = &SceneItem> {
        self.items.iter().filter(move |item| item.kind == kind)
    }
}

/// Renderer that builds a [`Scene`].
#[derive(Debug, Default)]
pub struct SceneRenderer {
    scene: Scene,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The scene from the last frame.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

impl Renderer for SceneRenderer {
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        if ctx.viewport_size.is_zero_area() {
            return Err(RendererError::Surface("viewport has zero area".to_string()));
        }

        let theme = &ctx.theme;
        let layout = ctx.surface.layout();
        let chars = layout.metrics.chars_per_line;
        self.scene.clear();
        self.scene.background = Some(self.background_color(ctx));

        for column in &layout.columns {
            self.scene
                .push(ItemKind::Column, column.bounds, theme.column, Vec::new(), theme.header_text);
            self.scene.push(
                ItemKind::Header,
                column.header,
                theme.column,
                vec![format!("{} ({})", column.title, column.cards().count())],
                theme.header_text,
            );

            for entry in &column.entries {
                match entry {
                    EntryLayout::Card(card) => {
                        let (kind, fill) = if card.lifted {
                            (ItemKind::LiftedCard, theme.card_lifted)
                        } else {
                            (ItemKind::Card, theme.card)
                        };
                        self.scene.push(
                            kind,
                            card.bounds,
                            fill,
                            wrap_lines(&card.content, chars),
                            theme.card_text,
                        );
                        self.scene.push(
                            ItemKind::DeleteButton,
                            card.delete_button,
                            theme.delete_button,
                            vec!["×".to_string()],
                            theme.button_text,
                        );
                    }
                    EntryLayout::Placeholder { bounds } => {
                        self.scene.push(
                            ItemKind::Placeholder,
                            *bounds,
                            theme.placeholder,
                            Vec::new(),
                            theme.card_text,
                        );
                    }
                }
            }

            self.scene.push(
                ItemKind::AddButton,
                column.add_button,
                theme.add_button,
                vec!["+ Add card".to_string()],
                theme.button_text,
            );
        }
        Ok(())
    }
}
