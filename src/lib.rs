#![cfg(target_arch = "wasm32")]
use fisheye_core::{GridEngine, SettingKey, SettingValue, Settings};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod panel;
mod render;
mod tiles;

use render::{GpuContext, GpuEffectSurface};

pub(crate) type SharedEngine = Rc<RefCell<GridEngine<GpuEffectSurface>>>;

thread_local! {
    static ENGINE: RefCell<Option<SharedEngine>> = const { RefCell::new(None) };
}

fn shared_engine() -> Option<SharedEngine> {
    ENGINE.with(|e| e.borrow().clone())
}

/// Settings from the page's query string; bad pairs are logged and skipped.
fn settings_from_location() -> Settings {
    let mut settings = Settings::default();
    let search = web::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    for err in settings.apply_query(&search) {
        log::warn!("[panel] query: {err}");
    }
    settings
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Info);

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let engine: SharedEngine = Rc::new(RefCell::new(GridEngine::new(settings_from_location())));
    ENGINE.with(|e| *e.borrow_mut() = Some(engine.clone()));

    if let Err(e) = panel::build(&document, &engine) {
        log::warn!("[panel] disabled: {e:?}");
    }
    events::keyboard::wire_global_keydown(document.clone());
    events::window::wire_window(&engine);

    let tiles = tiles::bind_tiles(&document, &engine);
    events::pointer::wire_tile_hover(&engine, &tiles);

    // Without WebGPU every tile stays a static image
    let gpu = match GpuContext::new().await {
        Ok(gpu) => Some(Rc::new(gpu)),
        Err(e) => {
            log::warn!("[gpu] effects disabled: {e:?}");
            None
        }
    };
    for view in &tiles {
        tiles::spawn_effect_creation(engine.clone(), gpu.clone(), view);
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(engine, tiles)));
    frame::start_loop(frame_ctx);
    Ok(())
}

/// Toggle the debug grid overlay.
#[wasm_bindgen]
pub fn toggle_debug() {
    if let Some(document) = dom::window_document() {
        overlay::toggle(&document);
    }
}

/// Set one effect setting by name. Accepts booleans, numbers and numeric
/// strings.
#[wasm_bindgen]
pub fn set_setting(key: &str, value: JsValue) -> Result<(), JsValue> {
    let engine = shared_engine().ok_or_else(|| JsValue::from_str("engine not started"))?;
    let to_js = |e: fisheye_core::SettingsError| JsValue::from_str(&e.to_string());
    let setting = SettingKey::parse(key).map_err(to_js)?;
    let applied = {
        let mut eng = engine.borrow_mut();
        let result = if let Some(b) = value.as_bool() {
            eng.set_setting(setting, SettingValue::Flag(b))
        } else if let Some(n) = value.as_f64() {
            eng.set_setting(setting, SettingValue::Number(n as f32))
        } else if let Some(s) = value.as_string() {
            eng.set_setting_str(key, &s)
        } else {
            return Err(JsValue::from_str("expected a boolean, number or string"));
        };
        result.map_err(to_js)?;
        eng.settings().get(setting)
    };
    if let Some(document) = dom::window_document() {
        panel::sync_input(&document, setting, applied);
    }
    Ok(())
}
