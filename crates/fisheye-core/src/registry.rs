use crate::effect::{EffectSurface, ShaderEffect};
use crate::error::RegistryError;
use crate::tile::{TileAnimator, TileMode, TileSize};
use fnv::FnvHashMap;

/// Stable handle for one grid tile, assigned at discovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

/// Lifecycle of a tile's effect instance.
pub enum EffectSlot<S: EffectSurface> {
    /// Creation is still in flight (image decode, stagger delay).
    Pending,
    Ready(ShaderEffect<S>),
    /// Creation failed; the tile stays a static image.
    Unavailable,
    /// The tile is no longer wanted. A late effect is disposed on arrival.
    Retired,
}

impl<S: EffectSurface> EffectSlot<S> {
    pub fn effect(&self) -> Option<&ShaderEffect<S>> {
        match self {
            EffectSlot::Ready(e) => Some(e),
            _ => None,
        }
    }

    pub fn effect_mut(&mut self) -> Option<&mut ShaderEffect<S>> {
        match self {
            EffectSlot::Ready(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, EffectSlot::Pending)
    }
}

pub struct RegistryEntry<S: EffectSurface> {
    pub tile: TileId,
    pub size: TileSize,
    pub mode: TileMode,
    pub slot: EffectSlot<S>,
    pub animator: TileAnimator,
    /// Pointer is over the tile, whether or not it has an effect.
    pub pointer_inside: bool,
}

impl<S: EffectSurface> RegistryEntry<S> {
    pub fn new(tile: TileId, size: TileSize) -> Self {
        Self {
            tile,
            size,
            mode: TileMode::Idle,
            slot: EffectSlot::Pending,
            animator: TileAnimator::new(),
            pointer_inside: false,
        }
    }
}

/// All tiles in registration order, with a tile-id index.
pub struct EffectRegistry<S: EffectSurface> {
    entries: Vec<RegistryEntry<S>>,
    index: FnvHashMap<TileId, usize>,
}

impl<S: EffectSurface> Default for EffectRegistry<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: FnvHashMap::default(),
        }
    }
}

impl<S: EffectSurface> EffectRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: RegistryEntry<S>) -> Result<(), RegistryError> {
        if self.index.contains_key(&entry.tile) {
            return Err(RegistryError::DuplicateTile(entry.tile));
        }
        self.index.insert(entry.tile, self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    pub fn find_by_tile(&self, tile: TileId) -> Option<&RegistryEntry<S>> {
        self.index.get(&tile).map(|&i| &self.entries[i])
    }

    pub fn find_by_tile_mut(&mut self, tile: TileId) -> Option<&mut RegistryEntry<S>> {
        match self.index.get(&tile) {
            Some(&i) => self.entries.get_mut(i),
            None => None,
        }
    }

    /// Visit every entry holding a live effect, in registration order.
    /// Pending, unavailable and retired entries are skipped.
    pub fn for_each_live<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut RegistryEntry<S>),
    {
        for entry in self.entries.iter_mut() {
            if entry.slot.effect().is_some_and(|e| !e.is_disposed()) {
                f(entry);
            }
        }
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RegistryEntry<S>> {
        self.entries.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.slot.effect().is_some_and(|e| !e.is_disposed()))
            .count()
    }
}
