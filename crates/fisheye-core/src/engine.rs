//! Coordinator owning settings, the registry and the scroll tracker.
//!
//! Every DOM callback and the frame loop go through one `GridEngine`, so the
//! hover, scroll, settings and resize paths all see the same registry state.
//! The engine never touches the DOM itself: the web layer reads tile visuals
//! and image filters back after each tick.

use crate::constants::{SCROLL_FADE_IN, SCROLL_FADE_OUT};
use crate::easing::Ease;
use crate::effect::{EffectSurface, ShaderEffect};
use crate::error::{EffectError, RegistryError, SettingsError};
use crate::registry::{EffectRegistry, EffectSlot, RegistryEntry, TileId};
use crate::resize::ResizeCoordinator;
use crate::scroll::{ScrollTransition, ScrollVelocityTracker};
use crate::settings::{SettingKey, SettingValue, Settings};
use crate::style::image_filter_css;
use crate::tile::{TileEvent, TileMarkup, TileMode, TileVisual};
use std::time::Duration;

pub struct GridEngine<S: EffectSurface> {
    settings: Settings,
    registry: EffectRegistry<S>,
    tracker: ScrollVelocityTracker,
    resize: ResizeCoordinator,
    next_tile: u32,
    unloaded: bool,
}

impl<S: EffectSurface> GridEngine<S> {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            registry: EffectRegistry::new(),
            tracker: ScrollVelocityTracker::new(),
            resize: ResizeCoordinator::new(),
            next_tile: 0,
            unloaded: false,
        }
    }

    // ---- tile lifecycle ----

    /// Register a discovered tile in the pending state.
    ///
    /// Returns `None` (and registers nothing) when the markup lacks an image
    /// or a surface, or after unload.
    pub fn setup_tile(&mut self, markup: &TileMarkup) -> Option<TileId> {
        if self.unloaded {
            return None;
        }
        let Some(size) = markup.size_class() else {
            log::debug!("[engine] skipping tile without image or canvas: {markup:?}");
            return None;
        };
        let tile = TileId(self.next_tile);
        self.next_tile += 1;
        if let Err(e) = self.registry.register(RegistryEntry::new(tile, size)) {
            log::warn!("[engine] {e}");
            return None;
        }
        Some(tile)
    }

    /// Stagger delay before this tile's effect is created.
    pub fn creation_delay(&self, tile: TileId) -> Option<Duration> {
        self.registry
            .find_by_tile(tile)
            .map(|e| e.size.creation_delay())
    }

    /// Whether an effect still in creation for `tile` should be attached.
    pub fn is_wanted(&self, tile: TileId) -> bool {
        !self.unloaded
            && self
                .registry
                .find_by_tile(tile)
                .is_some_and(|e| e.slot.is_pending())
    }

    /// Attach a freshly created surface to its pending tile.
    ///
    /// Returns `Ok(false)` when the tile was retired meanwhile; the surface
    /// is released instead of registered. A tile already hovered starts its
    /// effect immediately.
    pub fn attach_effect(&mut self, tile: TileId, surface: S) -> Result<bool, RegistryError> {
        let mut effect = ShaderEffect::new(surface, &self.settings);
        let unloaded = self.unloaded;
        let Some(entry) = self.registry.find_by_tile_mut(tile) else {
            effect.dispose();
            return Err(RegistryError::UnknownTile(tile));
        };
        match entry.slot {
            EffectSlot::Pending if !unloaded => {}
            EffectSlot::Ready(_) => {
                effect.dispose();
                return Err(RegistryError::DuplicateTile(tile));
            }
            _ => {
                log::debug!("[engine] tile {} no longer wanted, disposing effect", tile.0);
                effect.dispose();
                return Ok(false);
            }
        }
        if entry.mode.is_hovered() {
            effect.start();
        }
        entry.slot = EffectSlot::Ready(effect);
        self.resize.subscribe(tile);
        log::debug!("[engine] effect ready for tile {}", tile.0);
        Ok(true)
    }

    /// Record a failed creation; the tile stays a static image.
    ///
    /// A tile hovered while pending fades back to its image.
    pub fn creation_failed(&mut self, tile: TileId, err: &EffectError) {
        log::warn!("[effect] tile {}: {err}", tile.0);
        if let Some(entry) = self.registry.find_by_tile_mut(tile) {
            if entry.slot.is_pending() {
                entry.slot = EffectSlot::Unavailable;
                if entry.mode != TileMode::Idle {
                    entry.mode = TileMode::Idle;
                    entry.animator.hover_leave();
                }
            }
        }
    }

    /// Dispose the tile's effect (if any) and mark it no longer wanted.
    ///
    /// Removes it from resize fan-out and frame iteration before returning.
    pub fn retire_tile(&mut self, tile: TileId) -> bool {
        self.resize.unsubscribe(tile);
        let Some(entry) = self.registry.find_by_tile_mut(tile) else {
            return false;
        };
        let released = match entry.slot.effect_mut() {
            Some(effect) => effect.dispose(),
            None => false,
        };
        entry.slot = EffectSlot::Retired;
        released
    }

    // ---- hover ----

    pub fn pointer_enter(&mut self, tile: TileId) {
        let canvas_target = self.settings.canvas_opacity;
        self.apply_hover(tile, TileEvent::PointerEnter, |entry| {
            entry.animator.hover_enter(canvas_target);
            if let Some(effect) = entry.slot.effect_mut() {
                effect.start();
            }
        });
    }

    pub fn pointer_leave(&mut self, tile: TileId) {
        self.apply_hover(tile, TileEvent::PointerLeave, |entry| {
            entry.animator.hover_leave();
            if let Some(effect) = entry.slot.effect_mut() {
                effect.stop();
            }
        });
    }

    fn apply_hover<F>(&mut self, tile: TileId, event: TileEvent, f: F)
    where
        F: FnOnce(&mut RegistryEntry<S>),
    {
        if self.unloaded {
            return;
        }
        let Some(entry) = self.registry.find_by_tile_mut(tile) else {
            return;
        };
        entry.pointer_inside = event == TileEvent::PointerEnter;
        // Tiles without an effect keep showing their image
        if matches!(entry.slot, EffectSlot::Retired | EffectSlot::Unavailable) {
            return;
        }
        if let Some(next) = entry.mode.next(event) {
            entry.mode = next;
            f(entry);
        }
    }

    // ---- scroll ----

    /// Feed one velocity sample from the smooth-scroll controller.
    pub fn on_scroll(&mut self, velocity: f32) {
        if self.unloaded {
            return;
        }
        let threshold = self.settings.scroll_trigger_threshold;
        if let Some(ScrollTransition::Activated) = self.tracker.on_scroll(velocity, threshold) {
            self.activate_scroll();
        }
    }

    fn activate_scroll(&mut self) {
        let strength = self.settings.scroll_effect_strength;
        let opacity = self.settings.scroll_effect_opacity;
        let mut started = 0usize;
        self.registry.for_each_live(|entry| {
            let Some(next) = entry.mode.next(TileEvent::ScrollActivate) else {
                return;
            };
            entry.mode = next;
            if let Some(effect) = entry.slot.effect_mut() {
                effect.start_with_intensity(strength);
            }
            entry.animator.fade_canvas(opacity, SCROLL_FADE_IN, Ease::Power2Out);
            started += 1;
        });
        log::info!("[scroll] effect activated on {started} tiles");
    }

    fn deactivate_scroll(&mut self) {
        let mut stopped = 0usize;
        self.registry.for_each_live(|entry| {
            let Some(next) = entry.mode.next(TileEvent::ScrollDeactivate) else {
                return;
            };
            entry.mode = next;
            if let Some(effect) = entry.slot.effect_mut() {
                effect.stop();
            }
            entry.animator.fade_canvas(0.0, SCROLL_FADE_OUT, Ease::Power2Out);
            stopped += 1;
        });
        log::info!("[scroll] effect deactivated on {stopped} tiles");
    }

    // ---- settings ----

    pub fn set_setting(&mut self, key: SettingKey, value: SettingValue) -> Result<(), SettingsError> {
        self.settings.set(key, value)?;
        self.broadcast_settings();
        Ok(())
    }

    /// Set a setting from its name and textual value (panel input, JS export).
    pub fn set_setting_str(&mut self, name: &str, raw: &str) -> Result<(), SettingsError> {
        let key = SettingKey::parse(name)?;
        self.settings.set_str(key, raw)?;
        self.broadcast_settings();
        Ok(())
    }

    fn broadcast_settings(&mut self) {
        let settings = &self.settings;
        self.registry.for_each_live(|entry| {
            if let Some(effect) = entry.slot.effect_mut() {
                effect.update_settings(settings);
            }
        });
        let canvas = settings.canvas_opacity;
        for entry in self.registry.iter_mut() {
            if entry.mode.is_hovered() {
                entry.animator.set_canvas_now(canvas);
            }
        }
    }

    // ---- frame / resize ----

    /// Re-arm the window resize debounce.
    pub fn request_resize(&mut self) {
        if !self.unloaded {
            self.resize.request();
        }
    }

    /// Advance one frame: scroll tracker, resize fan-out, crossfades, then
    /// every live effect in registration order.
    pub fn tick(&mut self, dt: Duration) {
        if self.unloaded {
            return;
        }
        if let Some(ScrollTransition::Deactivated) = self.tracker.tick(dt) {
            self.deactivate_scroll();
        }
        if let Some(tiles) = self.resize.tick(dt) {
            for tile in tiles {
                if let Some(effect) = self
                    .registry
                    .find_by_tile_mut(tile)
                    .and_then(|e| e.slot.effect_mut())
                {
                    effect.sync_size();
                }
            }
        }
        for entry in self.registry.iter_mut() {
            entry.animator.tick(dt);
        }
        self.registry.for_each_live(|entry| {
            let tile = entry.tile;
            if let Some(effect) = entry.slot.effect_mut() {
                if let Err(e) = effect.frame(dt) {
                    log::warn!("[effect] tile {}: {e}", tile.0);
                }
            }
        });
    }

    /// Dispose every effect. Runs once; later calls return 0.
    pub fn unload(&mut self) -> usize {
        if self.unloaded {
            return 0;
        }
        self.unloaded = true;
        self.resize.clear();
        let mut released = 0;
        for entry in self.registry.iter_mut() {
            if let Some(effect) = entry.slot.effect_mut() {
                if effect.dispose() {
                    released += 1;
                }
            }
            entry.slot = EffectSlot::Retired;
        }
        log::info!("[engine] unloaded, released {released} effects");
        released
    }

    // ---- views ----

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &EffectRegistry<S> {
        &self.registry
    }

    pub fn tracker(&self) -> &ScrollVelocityTracker {
        &self.tracker
    }

    pub fn is_unloaded(&self) -> bool {
        self.unloaded
    }

    pub fn tile_mode(&self, tile: TileId) -> Option<TileMode> {
        self.registry.find_by_tile(tile).map(|e| e.mode)
    }

    pub fn tile_visual(&self, tile: TileId) -> Option<TileVisual> {
        self.registry.find_by_tile(tile).map(|e| e.animator.visual())
    }

    pub fn effect(&self, tile: TileId) -> Option<&ShaderEffect<S>> {
        self.registry.find_by_tile(tile).and_then(|e| e.slot.effect())
    }

    pub fn is_subscribed_to_resize(&self, tile: TileId) -> bool {
        self.resize.is_subscribed(tile)
    }

    /// CSS filter for the tile's image, or `None` while the pointer is over
    /// it (with or without an effect).
    pub fn image_filter(&self, tile: TileId) -> Option<String> {
        let entry = self.registry.find_by_tile(tile)?;
        if entry.pointer_inside || entry.mode.is_hovered() {
            return None;
        }
        Some(image_filter_css(self.tracker.filter_strength()))
    }
}
