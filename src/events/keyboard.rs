use super::shortcuts::{shortcut_for_key, Shortcut};
use crate::constants::DEBUG_TOGGLE_ID;
use crate::{dom, overlay, panel};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn is_editing(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .is_some_and(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, document: &web::Document) {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() || is_editing(ev) {
        return;
    }
    match shortcut_for_key(&ev.key()) {
        Some(Shortcut::ToggleDebug) => overlay::toggle(document),
        Some(Shortcut::TogglePanel) => {
            let visible = panel::toggle(document);
            log::info!("[panel] visible={visible}");
        }
        None => {}
    }
}

pub fn wire_global_keydown(document: web::Document) {
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &doc);
    }) as Box<dyn FnMut(_)>);
    if let Some(w) = web::window() {
        _ = w.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();

    let doc = document.clone();
    dom::add_click_listener(&document, DEBUG_TOGGLE_ID, move || overlay::toggle(&doc));
}
