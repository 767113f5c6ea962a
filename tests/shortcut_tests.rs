// Host-side tests for the global keyboard shortcuts.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod shortcuts {
    include!("../src/events/shortcuts.rs");
}

use shortcuts::*;

#[test]
fn d_toggles_debug_overlay() {
    assert_eq!(shortcut_for_key("d"), Some(Shortcut::ToggleDebug));
    assert_eq!(shortcut_for_key("D"), Some(Shortcut::ToggleDebug));
}

#[test]
fn h_toggles_settings_panel() {
    assert_eq!(shortcut_for_key("h"), Some(Shortcut::TogglePanel));
    assert_eq!(shortcut_for_key("H"), Some(Shortcut::TogglePanel));
}

#[test]
fn other_keys_are_ignored() {
    for key in ["a", "dd", "", " ", "Escape", "ArrowDown", "1"] {
        assert_eq!(shortcut_for_key(key), None, "{key:?}");
    }
}
