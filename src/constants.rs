/// DOM contract and styling constants for the web front-end.
///
/// Kept free of web-sys types so host tests can `include!` this file.
// Tile discovery
pub const TILE_SELECTOR: &str = ".image-box";
pub const TILE_IMAGE_SELECTOR: &str = "img";
pub const TILE_CANVAS_SELECTOR: &str = "canvas.effect-canvas";
pub const TILE_TITLE_SELECTOR: &str = ".image-title";
pub const GRID_ITEM_SELECTOR: &str = ".grid-item";
pub const LARGE_GRID_ITEM_SELECTOR: &str = ".grid-item-20";

// Debug overlay
pub const DEBUG_OVERLAY_ID: &str = "debugOverlay";
pub const DEBUG_TOGGLE_ID: &str = "debugToggle";
pub const DEBUG_COLUMN_SELECTOR: &str = ".debug-column";
pub const ACTIVE_CLASS: &str = "active";
pub const DEBUG_SHOW_STAGGER_MS: i32 = 80;
pub const DEBUG_HIDE_STAGGER_MS: i32 = 50;
pub const DEBUG_SHOW_EXTRA_MS: i32 = 100; // show runs slightly longer than hide

// Settings panel
pub const PANEL_ID: &str = "settings-panel";
pub const PANEL_TITLE: &str = "Fisheye Controls";
pub const PANEL_VISIBLE_CLASS: &str = "visible";
pub const PANEL_INPUT_PREFIX: &str = "setting-";

// CSS custom properties animated on tile titles
pub const TITLE_BEFORE_OPACITY_VAR: &str = "--before-opacity";
pub const TITLE_BEFORE_X_VAR: &str = "--before-x";

// Canvas placement inside its container
pub const CANVAS_BASE_STYLE: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
];

/// Milliseconds as the `i32` that `setTimeout` takes, saturating.
#[inline]
pub fn timeout_ms(d: std::time::Duration) -> i32 {
    d.as_millis().min(i32::MAX as u128) as i32
}

/// Element id of the panel input bound to a setting name.
#[inline]
pub fn panel_input_id(setting: &str) -> String {
    format!("{PANEL_INPUT_PREFIX}{setting}")
}
