use crate::tiles::TileView;
use crate::SharedEngine;
use fisheye_core::scroll::ScrollSampler;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub engine: SharedEngine,
    pub tiles: Vec<TileView>,
    pub scroll: ScrollSampler,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn new(engine: SharedEngine, tiles: Vec<TileView>) -> Self {
        Self {
            engine,
            tiles,
            scroll: ScrollSampler::new(),
            last_instant: Instant::now(),
        }
    }

    /// One animation frame. Returns `false` once the engine has unloaded.
    pub fn frame(&mut self) -> bool {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        let mut engine = self.engine.borrow_mut();
        if engine.is_unloaded() {
            return false;
        }

        // Step the smooth-scroll source first so this frame sees its velocity
        if let Some(w) = web::window() {
            if let Some(velocity) = w.scroll_y().ok().and_then(|y| self.scroll.step(y)) {
                engine.on_scroll(velocity);
            }
        }

        engine.tick(dt);

        for tile in self.tiles.iter_mut() {
            if let Some(visual) = engine.tile_visual(tile.id) {
                tile.apply(visual, engine.image_filter(tile.id));
            }
        }
        true
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !frame_ctx_tick.borrow_mut().frame() {
            // Drop the closure so the loop ends with the page
            tick_clone.borrow_mut().take();
            log::info!("[engine] frame loop stopped");
            return;
        }
        if let Some(w) = web::window() {
            if let Some(cb) = tick_clone.borrow().as_ref() {
                _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Some(cb) = tick.borrow().as_ref() {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}
