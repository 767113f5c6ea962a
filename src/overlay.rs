use crate::constants::{
    ACTIVE_CLASS, DEBUG_COLUMN_SELECTOR, DEBUG_HIDE_STAGGER_MS, DEBUG_OVERLAY_ID,
    DEBUG_SHOW_EXTRA_MS, DEBUG_SHOW_STAGGER_MS, DEBUG_TOGGLE_ID,
};
use crate::dom;
use fisheye_core::constants::DEBUG_FADE_DURATION;
use std::cell::Cell;
use std::time::Duration;
use web_sys as web;

thread_local! {
    // Bumped on every toggle so a pending hide can tell it was superseded.
    static GENERATION: Cell<u32> = const { Cell::new(0) };
}

fn next_generation() -> u32 {
    GENERATION.with(|g| {
        let n = g.get().wrapping_add(1);
        g.set(n);
        n
    })
}

fn columns(overlay: &web::Element) -> Vec<web::HtmlElement> {
    dom::query_all(overlay, DEBUG_COLUMN_SELECTOR)
        .iter()
        .filter_map(dom::as_html)
        .collect()
}

fn set_active(document: &web::Document, active: bool) {
    for id in [DEBUG_OVERLAY_ID, DEBUG_TOGGLE_ID] {
        if let Some(el) = document.get_element_by_id(id) {
            let cl = el.class_list();
            _ = if active {
                cl.add_1(ACTIVE_CLASS)
            } else {
                cl.remove_1(ACTIVE_CLASS)
            };
        }
    }
}

#[inline]
pub fn is_active(document: &web::Document) -> bool {
    document
        .get_element_by_id(DEBUG_OVERLAY_ID)
        .is_some_and(|el| el.class_list().contains(ACTIVE_CLASS))
}

pub fn show(document: &web::Document) {
    let Some(overlay) = document.get_element_by_id(DEBUG_OVERLAY_ID) else {
        return;
    };
    next_generation();
    set_active(document, true);
    let duration = DEBUG_FADE_DURATION.as_millis() as i32 + DEBUG_SHOW_EXTRA_MS;
    for (i, col) in columns(&overlay).iter().enumerate() {
        dom::apply_styles(
            col,
            &[
                ("transition", "none"),
                ("transform-origin", "top"),
                ("opacity", "0"),
                ("transform", "scaleY(0)"),
            ],
        );
        // flush so the transition starts from the collapsed pose
        _ = col.offset_height();
        let delay = i as i32 * DEBUG_SHOW_STAGGER_MS;
        let transition = format!(
            "opacity {duration}ms ease-out {delay}ms, transform {duration}ms ease-out {delay}ms"
        );
        dom::apply_styles(
            col,
            &[
                ("transition", transition.as_str()),
                ("opacity", "1"),
                ("transform", "scaleY(1)"),
            ],
        );
    }
    log::info!("[debug] overlay shown");
}

pub fn hide(document: &web::Document) {
    let Some(overlay) = document.get_element_by_id(DEBUG_OVERLAY_ID) else {
        return;
    };
    let generation = next_generation();
    let duration = DEBUG_FADE_DURATION.as_millis() as i32;
    let cols = columns(&overlay);
    for (i, col) in cols.iter().enumerate() {
        let delay = i as i32 * DEBUG_HIDE_STAGGER_MS;
        let transition = format!(
            "opacity {duration}ms ease-in-out {delay}ms, transform {duration}ms ease-in-out {delay}ms"
        );
        dom::apply_styles(
            col,
            &[
                ("transition", transition.as_str()),
                ("opacity", "0"),
                ("transform", "scaleY(0)"),
            ],
        );
    }
    let total = duration + cols.len().saturating_sub(1) as i32 * DEBUG_HIDE_STAGGER_MS;
    let doc = document.clone();
    dom::after(Duration::from_millis(total.max(0) as u64), move || {
        if GENERATION.with(Cell::get) == generation {
            set_active(&doc, false);
        }
    });
    log::info!("[debug] overlay hidden");
}

#[inline]
pub fn toggle(document: &web::Document) {
    if is_active(document) {
        hide(document);
    } else {
        show(document);
    }
}
