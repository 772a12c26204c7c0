//! WebAssembly entry point and DOM mount.
//!
//! The board is drawn as absolutely positioned `div`s, one per scene item,
//! inside a mount element. Items ignore pointer events; the mount element
//! receives them all and the app resolves targets from its own layout.

use crate::{App, AppConfig, UiAction};
use kanban_core::storage::LocalStorage;
use kanban_core::{MouseButton, PointerEvent};
use kanban_render::{SceneItem, SceneRenderer};
use kurbo::Point;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

/// Id of the element the board mounts into. Created under `<body>` when
/// the page has none.
const MOUNT_ID: &str = "kanban-board";

type WebApp = App<LocalStorage>;

fn css_color(color: peniko::Color) -> String {
    let c = color.to_rgba8();
    format!("rgba({}, {}, {}, {:.3})", c.r, c.g, c.b, f64::from(c.a) / 255.0)
}

fn mouse_button(button: i16) -> Option<MouseButton> {
    match button {
        0 => Some(MouseButton::Left),
        1 => Some(MouseButton::Middle),
        2 => Some(MouseButton::Right),
        _ => None,
    }
}

struct Mount {
    document: Document,
    root: HtmlElement,
    renderer: SceneRenderer,
}

impl Mount {
    fn draw(&mut self, app: &WebApp) -> Result<(), JsValue> {
        app.render_scene(&mut self.renderer)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        self.root.set_inner_html("");
        let style = self.root.style();
        let bounds = app.surface().layout().bounds();
        style.set_property("min-height", &format!("{}px", bounds.y1 + bounds.y0))?;
        style.set_property(
            "cursor",
            if app.surface().is_grabbing() { "grabbing" } else { "default" },
        )?;
        if let Some(background) = self.renderer.scene().background {
            style.set_property("background-color", &css_color(background))?;
        }

        for item in &self.renderer.scene().items {
            let element = self.item_element(item)?;
            self.root.append_child(&element)?;
        }
        Ok(())
    }

    fn item_element(&self, item: &SceneItem) -> Result<HtmlElement, JsValue> {
        let element: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        element.set_class_name(item.kind.class_name());

        let style = element.style();
        style.set_property("position", "absolute")?;
        style.set_property("box-sizing", "border-box")?;
        style.set_property("pointer-events", "none")?;
        style.set_property("white-space", "pre-wrap")?;
        style.set_property("left", &format!("{}px", item.rect.x0))?;
        style.set_property("top", &format!("{}px", item.rect.y0))?;
        style.set_property("width", &format!("{}px", item.rect.width()))?;
        style.set_property("height", &format!("{}px", item.rect.height()))?;
        style.set_property("background-color", &css_color(item.fill))?;
        style.set_property("color", &css_color(item.text_color))?;

        if !item.text.is_empty() {
            element.set_text_content(Some(&item.text.join("\n")));
        }
        Ok(element)
    }

    fn pointer_position(&self, event: &web_sys::MouseEvent) -> Point {
        let rect = self.root.get_bounding_client_rect();
        Point::new(
            f64::from(event.client_x()) - rect.left(),
            f64::from(event.client_y()) - rect.top(),
        )
    }
}

struct State {
    app: WebApp,
    mount: Mount,
}

impl State {
    fn on_pointer(&mut self, kind: &str, event: &web_sys::PointerEvent) -> Result<(), JsValue> {
        let position = self.mount.pointer_position(event);
        let pointer = match kind {
            "pointerdown" | "pointerup" => {
                let Some(button) = mouse_button(event.button()) else {
                    return Ok(());
                };
                if kind == "pointerdown" {
                    // Keep receiving the release even if it lands outside the mount.
                    if let Err(e) = self.mount.root.set_pointer_capture(event.pointer_id()) {
                        log::debug!("Pointer capture refused: {:?}", e);
                    }
                    PointerEvent::Down { position, button }
                } else {
                    PointerEvent::Up { position, button }
                }
            }
            "pointermove" => PointerEvent::Move { position },
            _ => {
                self.app.cancel_gesture();
                return self.redraw();
            }
        };

        if let Some(action) = self.app.handle_pointer_event(pointer) {
            self.apply(action)?;
        }
        self.redraw()
    }

    fn redraw(&mut self) -> Result<(), JsValue> {
        if self.app.take_redraw() {
            self.mount.draw(&self.app)?;
        }
        Ok(())
    }

    fn apply(&mut self, action: UiAction) -> Result<(), JsValue> {
        let form_column = match &action {
            UiAction::ShowAddCardForm { column_id } => Some(column_id.clone()),
            _ => None,
        };
        if let Err(e) = self.app.apply(action) {
            log::warn!("Action rejected: {}", e);
        }

        if let Some(column_id) = form_column {
            let window = web_sys::window().ok_or("no window")?;
            let next = match window.prompt_with_message("Enter a title for this card")? {
                Some(content) => UiAction::AddCard { column_id, content },
                None => UiAction::HideAddCardForm,
            };
            if let Err(e) = self.app.apply(next) {
                log::warn!("Card not added: {}", e);
            }
        }
        Ok(())
    }
}

fn listen(state: &Rc<RefCell<State>>, root: &HtmlElement, kind: &'static str) -> Result<(), JsValue> {
    let state = state.clone();
    let closure = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(
        move |event: web_sys::PointerEvent| {
            if let Err(e) = state.borrow_mut().on_pointer(kind, &event) {
                log::error!("Pointer handler failed: {:?}", e);
            }
        },
    );
    root.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Initialize and run the WASM application.
#[wasm_bindgen(start)]
pub fn run_wasm() -> Result<(), JsValue> {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Failed to initialize logger: {}", e).into());
    }
    log::info!("Starting Kanban (WASM)");

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let root: HtmlElement = match document.get_element_by_id(MOUNT_ID) {
        Some(element) => element.dyn_into()?,
        None => {
            let element: HtmlElement = document.create_element("div")?.dyn_into()?;
            element.set_id(MOUNT_ID);
            document.body().ok_or("no body")?.append_child(&element)?;
            element
        }
    };
    root.style().set_property("position", "relative")?;
    root.style().set_property("touch-action", "none")?;

    let mut app = App::new(AppConfig::default(), Arc::new(LocalStorage::new()));
    document.set_title(&app.config().title);

    let mut mount = Mount {
        document,
        root: root.clone(),
        renderer: SceneRenderer::new(),
    };
    mount.draw(&app)?;
    app.take_redraw();

    let state = Rc::new(RefCell::new(State { app, mount }));
    for kind in ["pointerdown", "pointermove", "pointerup", "pointercancel"] {
        listen(&state, &root, kind)?;
    }
    Ok(())
}
