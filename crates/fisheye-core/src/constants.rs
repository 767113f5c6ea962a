use std::time::Duration;

// Shared timing and tuning constants for the effect engine.

// Scroll velocity tracking
pub const SCROLL_VELOCITY_SCALE: f32 = 0.02; // event velocity -> target velocity
pub const VELOCITY_SMOOTHING: f32 = 0.15; // per-frame approach factor
pub const SCROLL_IDLE_DELAY: Duration = Duration::from_millis(50);
pub const VELOCITY_DECAY_DURATION: Duration = Duration::from_millis(500);
pub const DEACTIVATE_BELOW_VELOCITY: f32 = 0.02;

// Grayscale filter driven by velocity
pub const FILTER_ACTIVE_ABOVE: f32 = 0.001;
pub const FILTER_SHADOW_GAIN: f32 = 10.0;
pub const FILTER_SHADOW_MAX_PX: f32 = 0.1;

// Surface opacity fades triggered by scroll activation
pub const SCROLL_FADE_IN: Duration = Duration::from_millis(300);
pub const SCROLL_FADE_OUT: Duration = Duration::from_millis(500);

// Hover crossfade timeline
pub const HOVER_FADE_DURATION: Duration = Duration::from_millis(640);
pub const TITLE_DURATION: Duration = Duration::from_millis(200);

// Debug overlay column animation
pub const DEBUG_FADE_DURATION: Duration = Duration::from_millis(300);

// Resize fan-out debounce
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(16);

// Effect creation stagger by tile size class
pub const STAGGER_STANDARD: Duration = Duration::from_millis(50);
pub const STAGGER_LARGE: Duration = Duration::from_millis(150);

// Per-frame shader clock step (seconds), independent of wall time
pub const FRAME_TIME_STEP: f32 = 0.016;

// Surface backing store
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Stacking order
pub const Z_INDEX_HOVER: i32 = 20;
pub const Z_INDEX_REST: i32 = 1;

// Title label styling (sRGB 0..255)
pub const TITLE_COLOR_REST: [u8; 3] = [0x1a, 0x1a, 0x1a];
pub const TITLE_COLOR_HOVER: [u8; 3] = [0x66, 0x66, 0x66];
pub const TITLE_HOVER_OFFSET_PX: f32 = 12.0;
pub const TITLE_BEFORE_REST_OFFSET_PX: f32 = -8.0;
