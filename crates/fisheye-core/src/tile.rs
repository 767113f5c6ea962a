//! Per-tile hover state machine and crossfade timeline.

use crate::constants::{
    HOVER_FADE_DURATION, STAGGER_LARGE, STAGGER_STANDARD, TITLE_DURATION, Z_INDEX_HOVER,
    Z_INDEX_REST,
};
use crate::easing::{Ease, EASE_OUT_QUINT_LIKE};
use crate::tween::{step_slot, Tween};
use std::time::Duration;

/// Who currently drives a tile's effect. Hover always wins over scroll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TileMode {
    #[default]
    Idle,
    HoverActive,
    ScrollActive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileEvent {
    PointerEnter,
    PointerLeave,
    ScrollActivate,
    ScrollDeactivate,
}

impl TileMode {
    /// Transition table. `None` means the event does not apply to this mode
    /// and the tile must be left untouched.
    pub fn next(self, event: TileEvent) -> Option<TileMode> {
        use TileEvent::*;
        use TileMode::*;
        match (self, event) {
            (_, PointerEnter) => Some(HoverActive),
            (_, PointerLeave) => Some(Idle),
            (Idle, ScrollActivate) => Some(ScrollActive),
            (ScrollActive, ScrollDeactivate) => Some(Idle),
            (HoverActive, ScrollActivate | ScrollDeactivate)
            | (ScrollActive, ScrollActivate)
            | (Idle, ScrollDeactivate) => None,
        }
    }

    #[inline]
    pub fn is_hovered(self) -> bool {
        self == TileMode::HoverActive
    }
}

/// Size class of a grid tile; large tiles create their effect later.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TileSize {
    #[default]
    Standard,
    Large,
}

impl TileSize {
    pub fn creation_delay(self) -> Duration {
        match self {
            TileSize::Standard => STAGGER_STANDARD,
            TileSize::Large => STAGGER_LARGE,
        }
    }
}

/// What tile discovery found inside one `.image-box`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileMarkup {
    pub has_image: bool,
    pub has_surface: bool,
    pub in_grid_item: bool,
    /// Inside a large grid cell.
    pub large: bool,
}

impl TileMarkup {
    /// Size class of a usable tile; `None` when the image, the surface or the
    /// grid cell is missing.
    pub fn size_class(&self) -> Option<TileSize> {
        if !(self.has_image && self.has_surface && self.in_grid_item) {
            return None;
        }
        Some(if self.large {
            TileSize::Large
        } else {
            TileSize::Standard
        })
    }
}

/// Styled state of a tile at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileVisual {
    pub image_opacity: f32,
    pub canvas_opacity: f32,
    /// 0 = title at rest, 1 = title fully in its hover pose.
    pub title_mix: f32,
    pub z_index: i32,
}

impl Default for TileVisual {
    fn default() -> Self {
        Self {
            image_opacity: 1.0,
            canvas_opacity: 0.0,
            title_mix: 0.0,
            z_index: Z_INDEX_REST,
        }
    }
}

/// One tile's crossfade timeline: image, canvas and title tracks.
///
/// Starting a hover transition replaces all three tracks; a scroll fade
/// replaces only the canvas track.
#[derive(Clone, Debug, Default)]
pub struct TileAnimator {
    visual: TileVisual,
    image: Option<Tween>,
    canvas: Option<Tween>,
    title: Option<Tween>,
}

impl TileAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hover_enter(&mut self, canvas_target: f32) {
        self.crossfade(0.0, canvas_target, 1.0);
        self.visual.z_index = Z_INDEX_HOVER;
    }

    pub fn hover_leave(&mut self) {
        self.crossfade(1.0, 0.0, 0.0);
        self.visual.z_index = Z_INDEX_REST;
    }

    fn crossfade(&mut self, image: f32, canvas: f32, title: f32) {
        let v = self.visual;
        self.image = Some(Tween::new(v.image_opacity, image, HOVER_FADE_DURATION, EASE_OUT_QUINT_LIKE));
        self.canvas = Some(Tween::new(v.canvas_opacity, canvas, HOVER_FADE_DURATION, EASE_OUT_QUINT_LIKE));
        self.title = Some(Tween::new(v.title_mix, title, TITLE_DURATION, EASE_OUT_QUINT_LIKE));
    }

    /// Tween only the canvas opacity, leaving image and title tracks running.
    pub fn fade_canvas(&mut self, target: f32, duration: Duration, ease: Ease) {
        self.canvas = Some(Tween::new(self.visual.canvas_opacity, target, duration, ease));
    }

    /// Set canvas opacity immediately, cancelling its track.
    pub fn set_canvas_now(&mut self, value: f32) {
        self.canvas = None;
        self.visual.canvas_opacity = value;
    }

    /// Advance every running track. Returns `true` if anything moved.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let mut moved = false;
        if let Some(v) = step_slot(&mut self.image, dt) {
            self.visual.image_opacity = v;
            moved = true;
        }
        if let Some(v) = step_slot(&mut self.canvas, dt) {
            self.visual.canvas_opacity = v;
            moved = true;
        }
        if let Some(v) = step_slot(&mut self.title, dt) {
            self.visual.title_mix = v;
            moved = true;
        }
        moved
    }

    #[inline]
    pub fn visual(&self) -> TileVisual {
        self.visual
    }

    pub fn canvas_target(&self) -> Option<f32> {
        self.canvas.as_ref().map(Tween::target)
    }

    pub fn is_animating(&self) -> bool {
        self.image.is_some() || self.canvas.is_some() || self.title.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_overrides_scroll_but_scroll_never_touches_hover() {
        assert_eq!(
            TileMode::ScrollActive.next(TileEvent::PointerEnter),
            Some(TileMode::HoverActive)
        );
        assert_eq!(TileMode::HoverActive.next(TileEvent::ScrollActivate), None);
        assert_eq!(TileMode::HoverActive.next(TileEvent::ScrollDeactivate), None);
        assert_eq!(
            TileMode::Idle.next(TileEvent::ScrollActivate),
            Some(TileMode::ScrollActive)
        );
        assert_eq!(TileMode::Idle.next(TileEvent::ScrollDeactivate), None);
    }

    #[test]
    fn large_tiles_wait_longer() {
        assert!(TileSize::Large.creation_delay() > TileSize::Standard.creation_delay());
    }

    #[test]
    fn hover_enter_then_leave_returns_to_rest() {
        let mut a = TileAnimator::new();
        a.hover_enter(0.8);
        assert_eq!(a.visual().z_index, Z_INDEX_HOVER);
        a.tick(HOVER_FADE_DURATION);
        let v = a.visual();
        assert_eq!(v.image_opacity, 0.0);
        assert_eq!(v.canvas_opacity, 0.8);
        assert_eq!(v.title_mix, 1.0);
        assert!(!a.is_animating());

        a.hover_leave();
        a.tick(HOVER_FADE_DURATION);
        assert_eq!(a.visual(), TileVisual::default());
    }

    #[test]
    fn canvas_fade_keeps_other_tracks() {
        let mut a = TileAnimator::new();
        a.hover_enter(1.0);
        a.tick(Duration::from_millis(100));
        a.fade_canvas(0.6, Duration::from_millis(300), Ease::Power2Out);
        assert_eq!(a.canvas_target(), Some(0.6));
        a.tick(Duration::from_secs(1));
        let v = a.visual();
        assert_eq!(v.canvas_opacity, 0.6);
        assert_eq!(v.image_opacity, 0.0);
    }

    #[test]
    fn set_canvas_now_cancels_track() {
        let mut a = TileAnimator::new();
        a.hover_enter(1.0);
        a.set_canvas_now(0.3);
        assert_eq!(a.canvas_target(), None);
        a.tick(Duration::from_secs(1));
        assert_eq!(a.visual().canvas_opacity, 0.3);
    }
}
