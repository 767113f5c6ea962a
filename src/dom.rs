use crate::constants::timeout_ms;
use fisheye_core::LayoutBox;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Resolve after `delay` via `setTimeout`.
pub async fn sleep(delay: Duration) {
    let ms = timeout_ms(delay);
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web::window().is_some_and(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                .is_ok()
        });
        if !scheduled {
            _ = resolve.call0(&JsValue::NULL);
        }
    });
    _ = JsFuture::from(promise).await;
}

/// Run `f` once after `delay`.
pub fn after(delay: Duration, f: impl FnOnce() + 'static) {
    if let Some(w) = web::window() {
        let cb = Closure::once_into_js(f);
        _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.unchecked_ref(),
            timeout_ms(delay),
        );
    }
}

/// Cast an element to `HtmlElement` to reach its inline style.
#[inline]
pub fn as_html(el: &web::Element) -> Option<web::HtmlElement> {
    el.dyn_ref::<web::HtmlElement>().cloned()
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}

pub fn apply_styles(el: &web::HtmlElement, styles: &[(&str, &str)]) {
    let style = el.style();
    for (property, value) in styles {
        _ = style.set_property(property, value);
    }
}

pub fn query_all(root: &web::Element, selector: &str) -> Vec<web::Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web::Element>().ok())
        .collect()
}

pub fn document_query_all(document: &web::Document, selector: &str) -> Vec<web::Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web::Element>().ok())
        .collect()
}

/// CSS-pixel box of `el` plus the current device pixel ratio.
pub fn layout_box(el: &web::Element) -> LayoutBox {
    let rect = el.get_bounding_client_rect();
    let device_pixel_ratio = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    LayoutBox {
        width: rect.width(),
        height: rect.height(),
        device_pixel_ratio,
    }
}
