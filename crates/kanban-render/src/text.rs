//! Plain-text renderer.

use crate::layout::{EntryLayout, wrap_lines};
use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use std::fmt::Write;

/// Marker line for the drop placeholder.
pub const PLACEHOLDER_MARKER: &str = "[ drop here ]";

/// Renders the board as an indented outline.
///
/// ```text
/// # Kanban
/// ## TODO (2)
/// - X
/// - Y
/// ## Done (0)
/// ```
#[derive(Debug, Default)]
pub struct TextRenderer {
    output: String,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The text from the last frame.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }

    fn write_frame(&mut self, ctx: &RenderContext) -> std::fmt::Result {
        let layout = ctx.surface.layout();
        let chars = layout.metrics.chars_per_line;
        let out = &mut self.output;

        writeln!(out, "# {}", ctx.title)?;
        for column in &layout.columns {
            writeln!(out, "## {} ({})", column.title, column.cards().count())?;
            for entry in &column.entries {
                match entry {
                    EntryLayout::Card(card) => {
                        let bullet = if card.lifted { "~" } else { "-" };
                        let mut lines = wrap_lines(&card.content, chars).into_iter();
                        writeln!(out, "{} {}", bullet, lines.next().unwrap_or_default())?;
                        for line in lines {
                            writeln!(out, "  {}", line)?;
                        }
                    }
                    EntryLayout::Placeholder { .. } => writeln!(out, "  {}", PLACEHOLDER_MARKER)?,
                }
            }
        }
        Ok(())
    }
}

impl Renderer for TextRenderer {
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        self.output.clear();
        self.write_frame(ctx)
            .map_err(|e| RendererError::RenderFailed(e.to_string()))
    }
}
