pub mod constants;
pub mod easing;
pub mod effect;
pub mod engine;
pub mod error;
pub mod registry;
pub mod resize;
pub mod scroll;
pub mod settings;
pub mod style;
pub mod tile;
pub mod tween;
pub static FISHEYE_WGSL: &str = include_str!("../shaders/fisheye.wgsl");

pub use effect::{EffectSurface, EffectUniforms, LayoutBox, ShaderEffect, SurfaceInput, SurfaceSize};
pub use engine::GridEngine;
pub use error::{EffectError, RegistryError, SettingsError};
pub use registry::{EffectRegistry, EffectSlot, RegistryEntry, TileId};
pub use settings::{SettingKey, SettingValue, Settings};
pub use tile::{TileMarkup, TileMode, TileSize, TileVisual};
