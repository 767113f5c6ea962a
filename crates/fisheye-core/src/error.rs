use crate::registry::TileId;
use thiserror::Error;

/// Reasons an effect instance could not be created or rendered.
///
/// Creation failures never escape the creation path: the tile keeps showing
/// its static image.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EffectError {
    #[error("render surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("failed to load image {url}: {reason}")]
    AssetLoad { url: String, reason: String },
    #[error("render failed: {0}")]
    Render(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SettingsError {
    #[error("unknown setting `{0}`")]
    UnknownKey(String),
    #[error("setting `{key}` expects a {expected} value")]
    WrongKind { key: &'static str, expected: &'static str },
    #[error("setting `{key}` must be finite")]
    NotFinite { key: &'static str },
    #[error("cannot parse `{value}` for setting `{key}`")]
    Unparsable { key: &'static str, value: String },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tile {0:?} is already registered")]
    DuplicateTile(TileId),
    #[error("tile {0:?} is not registered")]
    UnknownTile(TileId),
}
