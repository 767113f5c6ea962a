// Host-side tests for settings parsing, clamping and query-string overrides.

use fisheye_core::settings::PARAM_SPECS;
use fisheye_core::{SettingKey, SettingValue, Settings, SettingsError};
use std::time::Duration;

#[test]
fn query_string_overrides_defaults() {
    let mut s = Settings::default();
    let errors = s.apply_query("?fisheyeStrength=0.5&showVignetteMask&scrollTriggerThreshold=0.15");
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(s.fisheye_strength, 0.5);
    assert!(s.show_vignette_mask);
    assert_eq!(s.scroll_trigger_threshold, 0.15);
    assert_eq!(s.vignette_end, Settings::default().vignette_end);
}

#[test]
fn bad_query_pairs_are_reported_and_skipped() {
    let mut s = Settings::default();
    let errors = s.apply_query("bogus=1&noiseIntensity=lots&mouseRadius=0.5&&showVignetteMask=maybe");
    assert_eq!(
        errors,
        vec![
            SettingsError::UnknownKey("bogus".into()),
            SettingsError::Unparsable {
                key: "noiseIntensity",
                value: "lots".into()
            },
            SettingsError::Unparsable {
                key: "showVignetteMask",
                value: "maybe".into()
            },
        ]
    );
    assert_eq!(s.mouse_radius, 0.5);
    assert_eq!(s.noise_intensity, 0.08);
    assert!(!s.show_vignette_mask);
}

#[test]
fn numbers_clamp_into_panel_range() {
    let mut s = Settings::default();
    s.set(SettingKey::ChromaticAberration, SettingValue::Number(1.0))
        .unwrap();
    assert_eq!(s.chromatic_aberration, 0.1);
    s.set(SettingKey::FisheyeRadius, SettingValue::Number(-3.0))
        .unwrap();
    assert_eq!(s.fisheye_radius, 0.1);
    s.set_str(SettingKey::ScrollEffectOpacity, " 2 ").unwrap();
    assert_eq!(s.scroll_effect_opacity, 1.0);
}

#[test]
fn wrong_kinds_and_non_finite_values_are_rejected() {
    let mut s = Settings::default();
    assert_eq!(
        s.set(SettingKey::ShowVignetteMask, SettingValue::Number(1.0)),
        Err(SettingsError::WrongKind {
            key: "showVignetteMask",
            expected: "boolean"
        })
    );
    assert_eq!(
        s.set(SettingKey::MouseEffect, SettingValue::Flag(true)),
        Err(SettingsError::WrongKind {
            key: "mouseEffect",
            expected: "numeric"
        })
    );
    assert_eq!(
        s.set(SettingKey::MouseEffect, SettingValue::Number(f32::INFINITY)),
        Err(SettingsError::NotFinite { key: "mouseEffect" })
    );
    assert_eq!(s, Settings::default());
}

#[test]
fn every_setting_reads_back_what_was_set() {
    let mut s = Settings::default();
    for spec in PARAM_SPECS.iter() {
        let value = match spec.range {
            Some(r) => SettingValue::Number(r.max),
            None => SettingValue::Flag(true),
        };
        s.set(spec.key, value).unwrap();
        assert_eq!(s.get(spec.key), value, "{}", spec.key.as_str());
    }
}

#[test]
fn ramp_duration_tracks_animation_duration() {
    let mut s = Settings::default();
    assert_eq!(s.ramp_duration(), Duration::from_secs_f32(0.64));
    s.set_str(SettingKey::AnimationDuration, "2").unwrap();
    assert_eq!(s.ramp_duration(), Duration::from_secs(2));
}

#[test]
fn ramp_duration_survives_out_of_range_fields() {
    let mut s = Settings::default();
    s.animation_duration = 1e30;
    assert_eq!(s.ramp_duration(), Duration::from_secs(2));
    s.animation_duration = -5.0;
    assert_eq!(s.ramp_duration(), Duration::from_secs_f32(0.1));
    s.animation_duration = f32::NAN;
    assert_eq!(s.ramp_duration(), Duration::from_secs_f32(0.64));
    s.animation_duration = f32::INFINITY;
    assert_eq!(s.ramp_duration(), Duration::from_secs_f32(0.64));
}

#[test]
fn vignette_mask_flag_round_trips() {
    let mut s = Settings::default();
    s.set(SettingKey::ShowVignetteMask, SettingValue::Flag(true))
        .unwrap();
    assert_eq!(s.get(SettingKey::ShowVignetteMask), SettingValue::Flag(true));
    s.set_str(SettingKey::ShowVignetteMask, "off").unwrap();
    assert!(!s.show_vignette_mask);
    assert_eq!(s, Settings::default());
}

#[test]
fn panel_folders_are_contiguous() {
    let mut seen: Vec<&str> = Vec::new();
    for spec in PARAM_SPECS.iter() {
        if seen.last() != Some(&spec.folder) {
            assert!(!seen.contains(&spec.folder), "folder {} split", spec.folder);
            seen.push(spec.folder);
        }
    }
    assert_eq!(
        seen,
        vec![
            "Fisheye Distortion",
            "Visual Effects",
            "Mouse Interaction",
            "Animation",
            "Debug",
            "Scroll Effects"
        ]
    );
}
