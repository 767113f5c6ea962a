use crate::SharedEngine;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Window resize schedules a debounced size sync; page unload disposes every
/// effect.
pub fn wire_window(engine: &SharedEngine) {
    let Some(w) = web::window() else {
        return;
    };

    let engine_resize = engine.clone();
    let on_resize = Closure::wrap(Box::new(move || {
        engine_resize.borrow_mut().request_resize();
    }) as Box<dyn FnMut()>);
    _ = w.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
    on_resize.forget();

    let engine_unload = engine.clone();
    let on_unload = Closure::wrap(Box::new(move || {
        engine_unload.borrow_mut().unload();
    }) as Box<dyn FnMut()>);
    _ = w.add_event_listener_with_callback("beforeunload", on_unload.as_ref().unchecked_ref());
    on_unload.forget();
}
