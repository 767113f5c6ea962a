//! Live-editable effect parameters.
//!
//! One `Settings` value is owned by the engine. The panel edits it through
//! [`Settings::set`], which validates and clamps the value, and the engine then
//! broadcasts the whole struct to every live effect.

use crate::error::SettingsError;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub fisheye_strength: f32,
    pub vignette_start: f32,
    pub vignette_end: f32,
    pub fisheye_radius: f32,
    pub chromatic_aberration: f32,
    pub noise_intensity: f32,
    pub vignette_intensity: f32,
    pub mouse_effect: f32,
    pub mouse_radius: f32,
    /// Fisheye ramp duration in seconds.
    pub animation_duration: f32,
    pub canvas_opacity: f32,
    pub show_vignette_mask: bool,
    pub scroll_effect_strength: f32,
    pub scroll_effect_opacity: f32,
    pub scroll_trigger_threshold: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fisheye_strength: 1.0,
            vignette_start: 0.3,
            vignette_end: 0.8,
            fisheye_radius: 0.8,
            chromatic_aberration: 0.015,
            noise_intensity: 0.08,
            vignette_intensity: 0.32,
            mouse_effect: 0.02,
            mouse_radius: 0.3,
            animation_duration: 0.64,
            canvas_opacity: 1.0,
            show_vignette_mask: false,
            scroll_effect_strength: 0.7,
            scroll_effect_opacity: 0.6,
            scroll_trigger_threshold: 0.08,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SettingKey {
    FisheyeStrength,
    VignetteStart,
    VignetteEnd,
    FisheyeRadius,
    ChromaticAberration,
    NoiseIntensity,
    VignetteIntensity,
    MouseEffect,
    MouseRadius,
    AnimationDuration,
    CanvasOpacity,
    ShowVignetteMask,
    ScrollEffectStrength,
    ScrollEffectOpacity,
    ScrollTriggerThreshold,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SettingValue {
    Number(f32),
    Flag(bool),
}

/// Slider bounds for a numeric setting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

/// How a setting is presented in the control panel.
#[derive(Clone, Copy, Debug)]
pub struct ParamSpec {
    pub key: SettingKey,
    pub label: &'static str,
    pub folder: &'static str,
    /// `None` for boolean toggles.
    pub range: Option<Range>,
}

const fn slider(
    key: SettingKey,
    label: &'static str,
    folder: &'static str,
    min: f32,
    max: f32,
    step: f32,
) -> ParamSpec {
    ParamSpec {
        key,
        label,
        folder,
        range: Some(Range { min, max, step }),
    }
}

/// Panel layout, in display order.
pub const PARAM_SPECS: [ParamSpec; 15] = [
    slider(SettingKey::FisheyeStrength, "Fisheye Strength", "Fisheye Distortion", 0.0, 1.2, 0.1),
    slider(SettingKey::VignetteStart, "Vignette Start", "Fisheye Distortion", 0.0, 1.0, 0.05),
    slider(SettingKey::VignetteEnd, "Vignette End", "Fisheye Distortion", 0.0, 1.0, 0.05),
    slider(SettingKey::FisheyeRadius, "Fisheye Radius", "Fisheye Distortion", 0.1, 1.5, 0.05),
    slider(SettingKey::ChromaticAberration, "Chromatic Aberration", "Visual Effects", 0.0, 0.1, 0.001),
    slider(SettingKey::NoiseIntensity, "Noise Intensity", "Visual Effects", 0.0, 0.15, 0.005),
    slider(SettingKey::VignetteIntensity, "Vignette Intensity", "Visual Effects", 0.0, 0.5, 0.01),
    slider(SettingKey::MouseEffect, "Mouse Effect", "Mouse Interaction", 0.0, 0.1, 0.005),
    slider(SettingKey::MouseRadius, "Mouse Radius", "Mouse Interaction", 0.1, 1.0, 0.05),
    slider(SettingKey::AnimationDuration, "Animation Duration", "Animation", 0.1, 2.0, 0.05),
    slider(SettingKey::CanvasOpacity, "Canvas Opacity", "Animation", 0.0, 1.0, 0.05),
    ParamSpec {
        key: SettingKey::ShowVignetteMask,
        label: "Show Vignette Mask",
        folder: "Debug",
        range: None,
    },
    slider(SettingKey::ScrollEffectStrength, "Scroll Effect Strength", "Scroll Effects", 0.0, 1.0, 0.05),
    slider(SettingKey::ScrollEffectOpacity, "Scroll Opacity", "Scroll Effects", 0.0, 1.0, 0.05),
    slider(SettingKey::ScrollTriggerThreshold, "Scroll Trigger Threshold", "Scroll Effects", 0.01, 0.2, 0.01),
];

impl SettingKey {
    pub const ALL: [SettingKey; 15] = [
        SettingKey::FisheyeStrength,
        SettingKey::VignetteStart,
        SettingKey::VignetteEnd,
        SettingKey::FisheyeRadius,
        SettingKey::ChromaticAberration,
        SettingKey::NoiseIntensity,
        SettingKey::VignetteIntensity,
        SettingKey::MouseEffect,
        SettingKey::MouseRadius,
        SettingKey::AnimationDuration,
        SettingKey::CanvasOpacity,
        SettingKey::ShowVignetteMask,
        SettingKey::ScrollEffectStrength,
        SettingKey::ScrollEffectOpacity,
        SettingKey::ScrollTriggerThreshold,
    ];

    /// Name used by the panel, the URL query string and the JS export.
    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::FisheyeStrength => "fisheyeStrength",
            SettingKey::VignetteStart => "vignetteStart",
            SettingKey::VignetteEnd => "vignetteEnd",
            SettingKey::FisheyeRadius => "fisheyeRadius",
            SettingKey::ChromaticAberration => "chromaticAberration",
            SettingKey::NoiseIntensity => "noiseIntensity",
            SettingKey::VignetteIntensity => "vignetteIntensity",
            SettingKey::MouseEffect => "mouseEffect",
            SettingKey::MouseRadius => "mouseRadius",
            SettingKey::AnimationDuration => "animationDuration",
            SettingKey::CanvasOpacity => "canvasOpacity",
            SettingKey::ShowVignetteMask => "showVignetteMask",
            SettingKey::ScrollEffectStrength => "scrollEffectStrength",
            SettingKey::ScrollEffectOpacity => "scrollEffectOpacity",
            SettingKey::ScrollTriggerThreshold => "scrollTriggerThreshold",
        }
    }

    pub fn parse(name: &str) -> Result<Self, SettingsError> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == name)
            .ok_or_else(|| SettingsError::UnknownKey(name.to_string()))
    }

    pub fn spec(self) -> &'static ParamSpec {
        // PARAM_SPECS and ALL list every key in the same order
        &PARAM_SPECS[self as usize]
    }

    #[inline]
    pub fn is_flag(self) -> bool {
        matches!(self, SettingKey::ShowVignetteMask)
    }
}

impl Settings {
    pub fn get(&self, key: SettingKey) -> SettingValue {
        use SettingValue::Number;
        match key {
            SettingKey::FisheyeStrength => Number(self.fisheye_strength),
            SettingKey::VignetteStart => Number(self.vignette_start),
            SettingKey::VignetteEnd => Number(self.vignette_end),
            SettingKey::FisheyeRadius => Number(self.fisheye_radius),
            SettingKey::ChromaticAberration => Number(self.chromatic_aberration),
            SettingKey::NoiseIntensity => Number(self.noise_intensity),
            SettingKey::VignetteIntensity => Number(self.vignette_intensity),
            SettingKey::MouseEffect => Number(self.mouse_effect),
            SettingKey::MouseRadius => Number(self.mouse_radius),
            SettingKey::AnimationDuration => Number(self.animation_duration),
            SettingKey::CanvasOpacity => Number(self.canvas_opacity),
            SettingKey::ShowVignetteMask => SettingValue::Flag(self.show_vignette_mask),
            SettingKey::ScrollEffectStrength => Number(self.scroll_effect_strength),
            SettingKey::ScrollEffectOpacity => Number(self.scroll_effect_opacity),
            SettingKey::ScrollTriggerThreshold => Number(self.scroll_trigger_threshold),
        }
    }

    /// Write one setting. Numbers are clamped into the panel range.
    pub fn set(&mut self, key: SettingKey, value: SettingValue) -> Result<(), SettingsError> {
        let v = match (key, value) {
            (SettingKey::ShowVignetteMask, SettingValue::Flag(b)) => {
                self.show_vignette_mask = b;
                return Ok(());
            }
            (SettingKey::ShowVignetteMask, SettingValue::Number(_)) => {
                return Err(SettingsError::WrongKind {
                    key: key.as_str(),
                    expected: "boolean",
                })
            }
            (_, SettingValue::Flag(_)) => {
                return Err(SettingsError::WrongKind {
                    key: key.as_str(),
                    expected: "numeric",
                })
            }
            (_, SettingValue::Number(v)) => v,
        };
        if !v.is_finite() {
            return Err(SettingsError::NotFinite { key: key.as_str() });
        }
        let v = match key.spec().range {
            Some(r) => v.clamp(r.min, r.max),
            None => v,
        };
        match self.number_mut(key) {
            Some(field) => {
                *field = v;
                Ok(())
            }
            None => Err(SettingsError::WrongKind {
                key: key.as_str(),
                expected: "boolean",
            }),
        }
    }

    fn number_mut(&mut self, key: SettingKey) -> Option<&mut f32> {
        let field = match key {
            SettingKey::FisheyeStrength => &mut self.fisheye_strength,
            SettingKey::VignetteStart => &mut self.vignette_start,
            SettingKey::VignetteEnd => &mut self.vignette_end,
            SettingKey::FisheyeRadius => &mut self.fisheye_radius,
            SettingKey::ChromaticAberration => &mut self.chromatic_aberration,
            SettingKey::NoiseIntensity => &mut self.noise_intensity,
            SettingKey::VignetteIntensity => &mut self.vignette_intensity,
            SettingKey::MouseEffect => &mut self.mouse_effect,
            SettingKey::MouseRadius => &mut self.mouse_radius,
            SettingKey::AnimationDuration => &mut self.animation_duration,
            SettingKey::CanvasOpacity => &mut self.canvas_opacity,
            SettingKey::ShowVignetteMask => return None,
            SettingKey::ScrollEffectStrength => &mut self.scroll_effect_strength,
            SettingKey::ScrollEffectOpacity => &mut self.scroll_effect_opacity,
            SettingKey::ScrollTriggerThreshold => &mut self.scroll_trigger_threshold,
        };
        Some(field)
    }

    /// Parse a textual value (query string, input element) for `key` and set it.
    pub fn set_str(&mut self, key: SettingKey, raw: &str) -> Result<(), SettingsError> {
        let raw = raw.trim();
        let value = if key.is_flag() {
            match raw {
                "1" | "true" | "on" | "yes" => SettingValue::Flag(true),
                "0" | "false" | "off" | "no" => SettingValue::Flag(false),
                _ => {
                    return Err(SettingsError::Unparsable {
                        key: key.as_str(),
                        value: raw.to_string(),
                    })
                }
            }
        } else {
            let v = raw.parse::<f32>().map_err(|_| SettingsError::Unparsable {
                key: key.as_str(),
                value: raw.to_string(),
            })?;
            SettingValue::Number(v)
        };
        self.set(key, value)
    }

    /// Apply `key=value` pairs from a URL query string (leading `?` optional).
    ///
    /// Valid pairs are applied even when others fail; the failures are
    /// returned so the caller can report them.
    pub fn apply_query(&mut self, query: &str) -> Vec<SettingsError> {
        let mut errors = Vec::new();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (name, raw) = pair.split_once('=').unwrap_or((pair, "true"));
            let result = SettingKey::parse(name).and_then(|key| self.set_str(key, raw));
            if let Err(e) = result {
                errors.push(e);
            }
        }
        errors
    }

    /// Intensity ramp duration derived from `animation_duration`.
    /// Clamped into the panel range; a non-finite duration falls back to the
    /// default.
    pub fn ramp_duration(&self) -> Duration {
        let secs = if self.animation_duration.is_finite() {
            self.animation_duration
        } else {
            Settings::default().animation_duration
        };
        let secs = match SettingKey::AnimationDuration.spec().range {
            Some(r) => secs.clamp(r.min, r.max),
            None => secs.max(0.0),
        };
        Duration::try_from_secs_f32(secs).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specs_line_up_with_keys() {
        for (i, key) in SettingKey::ALL.iter().enumerate() {
            assert_eq!(PARAM_SPECS[i].key, *key);
            assert_eq!(key.spec().key, *key);
            assert_eq!(key.spec().range.is_none(), key.is_flag());
        }
    }

    #[test]
    fn defaults_sit_inside_panel_ranges() {
        let s = Settings::default();
        for key in SettingKey::ALL {
            if let (SettingValue::Number(v), Some(r)) = (s.get(key), key.spec().range) {
                assert!(v >= r.min && v <= r.max, "{} = {v}", key.as_str());
            }
        }
    }

    #[test]
    fn key_names_round_trip() {
        for key in SettingKey::ALL {
            assert_eq!(SettingKey::parse(key.as_str()), Ok(key));
        }
        assert!(matches!(
            SettingKey::parse("bogus"),
            Err(SettingsError::UnknownKey(_))
        ));
    }
}
