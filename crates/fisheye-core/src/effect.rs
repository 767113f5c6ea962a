use crate::constants::{FRAME_TIME_STEP, MAX_PIXEL_RATIO};
use crate::easing::{Ease, EASE_OUT_QUINT_LIKE};
use crate::error::EffectError;
use crate::settings::Settings;
use crate::tween::{step_slot, Tween};
use glam::Vec2;
use std::time::Duration;

/// Uniform block consumed by `shaders/fisheye.wgsl`.
///
/// Field order and padding match the WGSL struct (64 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct EffectUniforms {
    pub time: f32,
    pub intensity: f32,
    pub fisheye_strength: f32,
    pub vignette_start: f32,
    pub vignette_end: f32,
    pub fisheye_radius: f32,
    pub chromatic_aberration: f32,
    pub noise_intensity: f32,
    pub vignette_intensity: f32,
    pub mouse_effect: f32,
    pub mouse_radius: f32,
    pub show_vignette_mask: f32,
    pub mouse: [f32; 2],
    pub aspect_ratio: f32,
    pub _pad: f32,
}

impl EffectUniforms {
    pub fn from_settings(settings: &Settings) -> Self {
        let mut u = Self {
            time: 0.0,
            intensity: 0.0,
            fisheye_strength: 0.0,
            vignette_start: 0.0,
            vignette_end: 0.0,
            fisheye_radius: 0.0,
            chromatic_aberration: 0.0,
            noise_intensity: 0.0,
            vignette_intensity: 0.0,
            mouse_effect: 0.0,
            mouse_radius: 0.0,
            show_vignette_mask: 0.0,
            mouse: [0.0, 0.0],
            aspect_ratio: 1.0,
            _pad: 0.0,
        };
        u.apply_settings(settings);
        u
    }

    /// Copy every effect parameter from `settings`. Frame-driven fields
    /// (time, intensity, mouse, aspect) are left alone.
    pub fn apply_settings(&mut self, s: &Settings) {
        self.fisheye_strength = s.fisheye_strength;
        self.vignette_start = s.vignette_start;
        self.vignette_end = s.vignette_end;
        self.fisheye_radius = s.fisheye_radius;
        self.chromatic_aberration = s.chromatic_aberration;
        self.noise_intensity = s.noise_intensity;
        self.vignette_intensity = s.vignette_intensity;
        self.mouse_effect = s.mouse_effect;
        self.mouse_radius = s.mouse_radius;
        self.show_vignette_mask = if s.show_vignette_mask { 1.0 } else { 0.0 };
    }
}

/// Layout box of the element hosting a surface, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutBox {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

/// Backing-store request for a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
}

impl SurfaceSize {
    pub fn from_layout(layout: LayoutBox) -> Self {
        let ratio = if layout.device_pixel_ratio.is_finite() && layout.device_pixel_ratio > 0.0 {
            layout.device_pixel_ratio
        } else {
            1.0
        };
        Self {
            width: (layout.width.max(0.0).floor() as u32).max(1),
            height: (layout.height.max(0.0).floor() as u32).max(1),
            pixel_ratio: ratio.min(MAX_PIXEL_RATIO),
        }
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Physical pixel dimensions of the backing store.
    pub fn physical(&self) -> (u32, u32) {
        (
            ((self.width as f64 * self.pixel_ratio) as u32).max(1),
            ((self.height as f64 * self.pixel_ratio) as u32).max(1),
        )
    }
}

/// Input gathered by a surface's own listeners since the last frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceInput {
    /// Latest pointer position in -1..1 (y up).
    pub pointer: Option<Vec2>,
    /// The container's content box changed to a non-empty size.
    pub container_resized: bool,
}

/// Rendering backend bound to one tile: a surface, its texture and the
/// per-instance listeners.
pub trait EffectSurface {
    fn write_uniforms(&mut self, uniforms: &EffectUniforms);
    fn render(&mut self) -> Result<(), EffectError>;
    /// Current layout box of the container, if it is attached.
    fn layout(&self) -> Option<LayoutBox>;
    fn resize(&mut self, size: SurfaceSize);
    fn poll_input(&mut self) -> SurfaceInput;
    /// Detach listeners and free GPU resources. Called at most once.
    fn release(&mut self);
}

/// Map a client-space pointer position onto -1..1 over `rect` (y up).
pub fn pointer_ndc(client: Vec2, left: f32, top: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        ((client.x - left) / width) * 2.0 - 1.0,
        -((client.y - top) / height) * 2.0 + 1.0,
    )
}

/// One tile's fisheye effect: intensity ramp, uniforms and owned surface.
pub struct ShaderEffect<S: EffectSurface> {
    surface: Option<S>,
    uniforms: EffectUniforms,
    intensity: f32,
    ramp: Option<Tween>,
    ramp_duration: Duration,
    ramp_ease: Ease,
    pointer: Vec2,
    time: f32,
    frames_rendered: u64,
    ramps_started: u32,
}

impl<S: EffectSurface> ShaderEffect<S> {
    pub fn new(surface: S, settings: &Settings) -> Self {
        let mut effect = Self {
            surface: Some(surface),
            uniforms: EffectUniforms::from_settings(settings),
            intensity: 0.0,
            ramp: None,
            ramp_duration: settings.ramp_duration(),
            ramp_ease: EASE_OUT_QUINT_LIKE,
            pointer: Vec2::ZERO,
            time: 0.0,
            frames_rendered: 0,
            ramps_started: 0,
        };
        effect.sync_size();
        effect
    }

    /// Ramp intensity to 1.
    pub fn start(&mut self) {
        self.ramp_to(1.0);
    }

    /// Ramp intensity to `target` (clamped to 0..1).
    pub fn start_with_intensity(&mut self, target: f32) {
        self.ramp_to(target);
    }

    /// Ramp intensity to 0.
    pub fn stop(&mut self) {
        self.ramp_to(0.0);
    }

    fn ramp_to(&mut self, target: f32) {
        if self.is_disposed() {
            return;
        }
        let target = if target.is_finite() {
            target.clamp(0.0, 1.0)
        } else {
            0.0
        };
        // Replacing the slot drops any in-flight ramp.
        self.ramp = Some(Tween::new(
            self.intensity,
            target,
            self.ramp_duration,
            self.ramp_ease,
        ));
        self.ramps_started += 1;
    }

    /// Write every effect parameter into the uniform set at once.
    pub fn update_settings(&mut self, settings: &Settings) {
        self.uniforms.apply_settings(settings);
        self.ramp_duration = settings.ramp_duration();
    }

    /// Recompute the surface size from its container's layout box.
    pub fn sync_size(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let Some(layout) = surface.layout() else {
            return;
        };
        let size = SurfaceSize::from_layout(layout);
        surface.resize(size);
        self.uniforms.aspect_ratio = size.aspect_ratio();
    }

    pub fn set_pointer(&mut self, ndc: Vec2) {
        self.pointer = ndc.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    }

    /// Advance the ramp by `dt` and render one frame.
    ///
    /// Renders at every intensity, including 0. A disposed effect does nothing.
    pub fn frame(&mut self, dt: Duration) -> Result<(), EffectError> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        let input = surface.poll_input();
        if let Some(p) = input.pointer {
            self.pointer = p.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
        }
        if input.container_resized {
            self.sync_size();
        }
        if let Some(v) = step_slot(&mut self.ramp, dt) {
            self.intensity = v.clamp(0.0, 1.0);
        }
        self.time += FRAME_TIME_STEP;
        self.uniforms.time = self.time;
        self.uniforms.intensity = self.intensity;
        self.uniforms.mouse = self.pointer.to_array();

        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        surface.write_uniforms(&self.uniforms);
        self.frames_rendered += 1;
        surface.render()
    }

    /// Cancel the ramp and release the surface. Returns `true` only for the
    /// call that actually released it.
    pub fn dispose(&mut self) -> bool {
        self.ramp = None;
        match self.surface.take() {
            Some(mut surface) => {
                surface.release();
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.surface.is_none()
    }

    #[inline]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Target of the in-flight ramp, if any.
    pub fn ramp_target(&self) -> Option<f32> {
        self.ramp.as_ref().map(Tween::target)
    }

    #[inline]
    pub fn is_ramping(&self) -> bool {
        self.ramp.is_some()
    }

    pub fn uniforms(&self) -> &EffectUniforms {
        &self.uniforms
    }

    pub fn ramp_duration(&self) -> Duration {
        self.ramp_duration
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Ramps begun by `start`, `start_with_intensity` or `stop` over the
    /// effect's lifetime.
    pub fn ramps_started(&self) -> u32 {
        self.ramps_started
    }
}

impl<S: EffectSurface> Drop for ShaderEffect<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_is_64_bytes() {
        assert_eq!(std::mem::size_of::<EffectUniforms>(), 64);
    }

    #[test]
    fn surface_size_floors_and_caps_pixel_ratio() {
        let size = SurfaceSize::from_layout(LayoutBox {
            width: 320.7,
            height: 0.4,
            device_pixel_ratio: 3.0,
        });
        assert_eq!(size.width, 320);
        assert_eq!(size.height, 1);
        assert_eq!(size.pixel_ratio, 2.0);
        assert_eq!(size.physical(), (640, 2));
    }

    #[test]
    fn pointer_ndc_maps_corners() {
        let tl = pointer_ndc(Vec2::new(10.0, 20.0), 10.0, 20.0, 100.0, 50.0);
        assert_eq!(tl, Vec2::new(-1.0, 1.0));
        let br = pointer_ndc(Vec2::new(110.0, 70.0), 10.0, 20.0, 100.0, 50.0);
        assert_eq!(br, Vec2::new(1.0, -1.0));
        assert_eq!(pointer_ndc(Vec2::ONE, 0.0, 0.0, 0.0, 10.0), Vec2::ZERO);
    }

    #[test]
    fn mask_flag_maps_to_float() {
        let mut s = Settings::default();
        s.show_vignette_mask = true;
        assert_eq!(EffectUniforms::from_settings(&s).show_vignette_mask, 1.0);
    }
}
