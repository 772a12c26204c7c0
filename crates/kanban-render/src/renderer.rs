//! Renderer trait abstraction.

use crate::scene::Theme;
use crate::surface::LayoutSurface;
use kurbo::Size;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The laid-out board, including any live drag visuals.
    pub surface: &'a LayoutSurface,
    /// Board title shown above the columns.
    pub title: &'a str,
    /// Colours.
    pub theme: Theme,
    /// Viewport size in logical pixels.
    pub viewport_size: Size,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context sized to fit the board.
    pub fn new(surface: &'a LayoutSurface) -> Self {
        let bounds = surface.layout().bounds();
        let origin = surface.metrics().origin;
        Self {
            surface,
            title: "Kanban",
            theme: Theme::default(),
            viewport_size: Size::new(bounds.x1 + origin.x, bounds.y1 + origin.y),
        }
    }

    /// Set the board title.
    pub fn with_title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the viewport size.
    pub fn with_viewport(mut self, size: Size) -> Self {
        self.viewport_size = size;
        self
    }
}

/// Trait for rendering backends.
///
/// Implementations turn one frame's context into their own output: a
/// display list, a text dump, DOM nodes.
pub trait Renderer {
    /// Render a frame.
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.theme.background
    }
}
