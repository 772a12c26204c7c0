//! Kanban Render Library
//!
//! Lays out the board, provides the drag surface the core controller works
//! against, and renders frames to a display list or plain text.

pub mod layout;
mod renderer;
pub mod scene;
mod surface;
mod text;

pub use layout::{BoardLayout, CardLayout, ColumnLayout, EntryLayout, LayoutMetrics};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use scene::{ItemKind, Scene, SceneItem, SceneRenderer, Theme};
pub use surface::{LayoutSurface, UiTarget};
pub use text::{PLACEHOLDER_MARKER, TextRenderer};
