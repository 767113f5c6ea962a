//! Live settings panel, generated from the parameter table.

use crate::constants::{panel_input_id, PANEL_ID, PANEL_TITLE, PANEL_VISIBLE_CLASS};
use crate::SharedEngine;
use fisheye_core::settings::{ParamSpec, Range, PARAM_SPECS};
use fisheye_core::{SettingKey, SettingValue};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

fn value_label_id(key: SettingKey) -> String {
    format!("{}-value", panel_input_id(key.as_str()))
}

fn decimals(step: f32) -> usize {
    let mut places = 0;
    let mut s = step;
    while places < 4 && (s - s.round()).abs() > 1e-4 {
        s *= 10.0;
        places += 1;
    }
    places
}

fn format_value(key: SettingKey, value: SettingValue) -> String {
    match (value, key.spec().range) {
        (SettingValue::Number(v), Some(Range { step, .. })) => {
            format!("{:.*}", decimals(step), v)
        }
        (SettingValue::Number(v), None) => v.to_string(),
        (SettingValue::Flag(b), _) => (if b { "on" } else { "off" }).to_string(),
    }
}

fn create(document: &web::Document, tag: &str) -> anyhow::Result<web::Element> {
    document.create_element(tag).map_err(js_err)
}

/// Build the panel (reusing `#settings-panel` when the page provides one)
/// and bind every input to the engine.
pub fn build(document: &web::Document, engine: &SharedEngine) -> anyhow::Result<()> {
    let panel = match document.get_element_by_id(PANEL_ID) {
        Some(el) => el,
        None => {
            let el = create(document, "div")?;
            el.set_id(PANEL_ID);
            let body = document
                .body()
                .ok_or_else(|| anyhow::anyhow!("document has no body"))?;
            body.append_child(&el).map_err(js_err)?;
            el
        }
    };
    panel.set_inner_html("");
    _ = panel.class_list().add_1(PANEL_VISIBLE_CLASS);

    let heading = create(document, "h3")?;
    heading.set_text_content(Some(PANEL_TITLE));
    panel.append_child(&heading).map_err(js_err)?;

    let mut folder: Option<(&str, web::Element)> = None;
    for spec in PARAM_SPECS.iter() {
        let needs_new = folder.as_ref().map(|(name, _)| *name) != Some(spec.folder);
        if needs_new {
            let fieldset = create(document, "fieldset")?;
            let legend = create(document, "legend")?;
            legend.set_text_content(Some(spec.folder));
            fieldset.append_child(&legend).map_err(js_err)?;
            panel.append_child(&fieldset).map_err(js_err)?;
            folder = Some((spec.folder, fieldset));
        }
        if let Some((_, fieldset)) = &folder {
            let row = build_row(document, engine, spec)?;
            fieldset.append_child(&row).map_err(js_err)?;
        }
    }
    log::info!("[panel] built {} controls", PARAM_SPECS.len());
    Ok(())
}

fn build_row(
    document: &web::Document,
    engine: &SharedEngine,
    spec: &'static ParamSpec,
) -> anyhow::Result<web::Element> {
    let key = spec.key;
    let current = engine.borrow().settings().get(key);

    let row = create(document, "label")?;
    row.set_class_name("setting-row");
    let name = create(document, "span")?;
    name.set_text_content(Some(spec.label));
    row.append_child(&name).map_err(js_err)?;

    let input: web::HtmlInputElement = create(document, "input")?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("input element cast failed"))?;
    input.set_id(&panel_input_id(key.as_str()));
    match (spec.range, current) {
        (Some(r), SettingValue::Number(v)) => {
            input.set_type("range");
            input.set_min(&r.min.to_string());
            input.set_max(&r.max.to_string());
            input.set_step(&r.step.to_string());
            input.set_value(&v.to_string());
        }
        (_, SettingValue::Flag(b)) => {
            input.set_type("checkbox");
            input.set_checked(b);
        }
        (None, SettingValue::Number(_)) => {
            anyhow::bail!("setting {} has no slider range", key.as_str())
        }
    }
    row.append_child(&input).map_err(js_err)?;

    let value_label = create(document, "span")?;
    value_label.set_id(&value_label_id(key));
    value_label.set_class_name("setting-value");
    value_label.set_text_content(Some(&format_value(key, current)));
    row.append_child(&value_label).map_err(js_err)?;

    let engine = engine.clone();
    let input_cb = input.clone();
    let event = if key.is_flag() { "change" } else { "input" };
    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        let value = if key.is_flag() {
            SettingValue::Flag(input_cb.checked())
        } else {
            SettingValue::Number(input_cb.value_as_number() as f32)
        };
        let applied = {
            let mut eng = engine.borrow_mut();
            match eng.set_setting(key, value) {
                Ok(()) => Some(eng.settings().get(key)),
                Err(e) => {
                    log::warn!("[panel] {e}");
                    None
                }
            }
        };
        if let Some(applied) = applied {
            value_label.set_text_content(Some(&format_value(key, applied)));
        }
    }) as Box<dyn FnMut(_)>);
    _ = input.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();

    Ok(row)
}

/// Reflect a value set from outside the panel in its input and label.
pub fn sync_input(document: &web::Document, key: SettingKey, value: SettingValue) {
    if let Some(input) = document
        .get_element_by_id(&panel_input_id(key.as_str()))
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    {
        match value {
            SettingValue::Number(v) => input.set_value(&v.to_string()),
            SettingValue::Flag(b) => input.set_checked(b),
        }
    }
    if let Some(label) = document.get_element_by_id(&value_label_id(key)) {
        label.set_text_content(Some(&format_value(key, value)));
    }
}

/// Flip panel visibility. Returns whether it is now visible.
pub fn toggle(document: &web::Document) -> bool {
    document
        .get_element_by_id(PANEL_ID)
        .and_then(|el| el.class_list().toggle(PANEL_VISIBLE_CLASS).ok())
        .unwrap_or(false)
}
