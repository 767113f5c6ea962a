//! Tile discovery, effect creation tasks and per-frame styling.

use crate::constants::{
    GRID_ITEM_SELECTOR, LARGE_GRID_ITEM_SELECTOR, TILE_CANVAS_SELECTOR, TILE_IMAGE_SELECTOR,
    TILE_SELECTOR, TILE_TITLE_SELECTOR, TITLE_BEFORE_OPACITY_VAR, TITLE_BEFORE_X_VAR,
};
use crate::dom;
use crate::render::{GpuContext, GpuEffectSurface};
use crate::SharedEngine;
use fisheye_core::style::TitleStyle;
use fisheye_core::{EffectError, TileId, TileMarkup, TileVisual};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Elements of one registered tile.
#[derive(Clone)]
pub struct TileElements {
    pub root: web::HtmlElement,
    pub image: web::HtmlImageElement,
    pub canvas: web::HtmlCanvasElement,
    pub title: Option<web::HtmlElement>,
}

/// A registered tile plus the style values last written to it.
pub struct TileView {
    pub id: TileId,
    pub els: TileElements,
    last_visual: Option<TileVisual>,
    last_filter: Option<String>,
}

fn select<T: JsCast>(root: &web::Element, selector: &str) -> Option<T> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// Find every `.image-box`, register the usable ones with the engine and
/// return their views. Boxes missing an image, canvas or grid cell are
/// skipped.
pub fn bind_tiles(document: &web::Document, engine: &SharedEngine) -> Vec<TileView> {
    let mut views = Vec::new();
    for el in dom::document_query_all(document, TILE_SELECTOR) {
        let Some(root) = dom::as_html(&el) else {
            continue;
        };
        let image = select::<web::HtmlImageElement>(&el, TILE_IMAGE_SELECTOR);
        let canvas = select::<web::HtmlCanvasElement>(&el, TILE_CANVAS_SELECTOR);
        let title = select::<web::HtmlElement>(&el, TILE_TITLE_SELECTOR);
        let in_grid_item = el.closest(GRID_ITEM_SELECTOR).ok().flatten().is_some();
        let large = el.closest(LARGE_GRID_ITEM_SELECTOR).ok().flatten().is_some();
        let markup = TileMarkup {
            has_image: image.is_some(),
            has_surface: canvas.is_some(),
            in_grid_item,
            large,
        };
        let Some(id) = engine.borrow_mut().setup_tile(&markup) else {
            continue;
        };
        let (Some(image), Some(canvas)) = (image, canvas) else {
            continue;
        };
        views.push(TileView {
            id,
            els: TileElements {
                root,
                image,
                canvas,
                title,
            },
            last_visual: None,
            last_filter: None,
        });
    }
    log::info!("[engine] {} tiles registered", views.len());
    views
}

/// Create the tile's effect once its image has loaded and its stagger delay
/// has passed. Failures leave the tile as a static image.
pub fn spawn_effect_creation(engine: SharedEngine, gpu: Option<Rc<GpuContext>>, view: &TileView) {
    let tile = view.id;
    let els = view.els.clone();
    spawn_local(async move {
        let Some(gpu) = gpu else {
            let err = EffectError::SurfaceUnavailable("WebGPU unavailable".into());
            engine.borrow_mut().creation_failed(tile, &err);
            return;
        };
        // The page image decodes (or fails) before the effect loads it again.
        if let Err(e) = JsFuture::from(els.image.decode()).await {
            let err = EffectError::AssetLoad {
                url: els.image.current_src(),
                reason: format!("{:?}", e),
            };
            engine.borrow_mut().creation_failed(tile, &err);
            return;
        }
        let delay = engine.borrow().creation_delay(tile);
        if let Some(delay) = delay {
            dom::sleep(delay).await;
        }
        if !engine.borrow().is_wanted(tile) {
            return;
        }
        let url = els.image.current_src();
        match GpuEffectSurface::create(gpu, els.canvas.clone(), &url).await {
            Ok(surface) => {
                if let Err(e) = engine.borrow_mut().attach_effect(tile, surface) {
                    log::warn!("[engine] {e}");
                }
            }
            Err(e) => engine.borrow_mut().creation_failed(tile, &e),
        }
    });
}

impl TileView {
    /// Write changed style values to the DOM.
    pub fn apply(&mut self, visual: TileVisual, filter: Option<String>) {
        if self.last_visual != Some(visual) {
            let prev = self.last_visual;
            if prev.map(|p| p.image_opacity) != Some(visual.image_opacity) {
                dom::set_style(&self.els.image, "opacity", &visual.image_opacity.to_string());
            }
            if prev.map(|p| p.canvas_opacity) != Some(visual.canvas_opacity) {
                dom::set_style(&self.els.canvas, "opacity", &visual.canvas_opacity.to_string());
            }
            if prev.map(|p| p.title_mix) != Some(visual.title_mix) {
                if let Some(title) = &self.els.title {
                    apply_title(title, TitleStyle::at(visual.title_mix));
                }
            }
            if prev.map(|p| p.z_index) != Some(visual.z_index) {
                dom::set_style(&self.els.root, "z-index", &visual.z_index.to_string());
            }
            self.last_visual = Some(visual);
        }
        if let Some(filter) = filter {
            if self.last_filter.as_deref() != Some(filter.as_str()) {
                dom::set_style(&self.els.image, "filter", &filter);
                self.last_filter = Some(filter);
            }
        }
    }
}

fn apply_title(title: &web::HtmlElement, style: TitleStyle) {
    dom::set_style(title, "color", &style.color_css());
    dom::set_style(title, "transform", &style.transform_css());
    dom::set_style(
        title,
        TITLE_BEFORE_OPACITY_VAR,
        &style.before_opacity.to_string(),
    );
    dom::set_style(title, TITLE_BEFORE_X_VAR, &format!("{}px", style.before_x_px));
}
