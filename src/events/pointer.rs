use crate::tiles::TileView;
use crate::SharedEngine;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Hover enter/leave on each tile root drives the engine's hover controller.
pub fn wire_tile_hover(engine: &SharedEngine, tiles: &[TileView]) {
    for view in tiles {
        let id = view.id;
        let root = &view.els.root;

        let engine_enter = engine.clone();
        let enter = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
            engine_enter.borrow_mut().pointer_enter(id);
        }) as Box<dyn FnMut(_)>);
        _ = root.add_event_listener_with_callback("mouseenter", enter.as_ref().unchecked_ref());
        enter.forget();

        let engine_leave = engine.clone();
        let leave = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
            engine_leave.borrow_mut().pointer_leave(id);
        }) as Box<dyn FnMut(_)>);
        _ = root.add_event_listener_with_callback("mouseleave", leave.as_ref().unchecked_ref());
        leave.forget();
    }
}
