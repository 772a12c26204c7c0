//! Kanban Application
//!
//! The application shell: board session, rendered surface, pointer
//! dispatch and the native and WASM entry points.

mod app;
mod event_handler;
mod ui;

pub use app::{App, AppConfig};
pub use ui::UiAction;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
