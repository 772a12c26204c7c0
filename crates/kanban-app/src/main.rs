//! Main application entry point (native).

#[cfg(feature = "native")]
fn print_board<S: kanban_core::Storage>(app: &kanban_app::App<S>) {
    match app.render_text() {
        Ok(text) => print!("{}", text),
        Err(e) => log::error!("Failed to render board: {}", e),
    }
}

#[cfg(feature = "native")]
fn main() {
    use kanban_app::{App, AppConfig};
    use kanban_core::storage::create_default_storage;
    use std::sync::Arc;

    env_logger::init();
    log::info!("Starting Kanban");

    let config = AppConfig::default();
    match create_default_storage() {
        Ok(storage) => print_board(&App::new(config, storage)),
        Err(e) => {
            log::error!("Falling back to in-memory board: {}", e);
            let storage = Arc::new(kanban_core::MemoryStorage::new());
            print_board(&App::new(config, storage));
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
