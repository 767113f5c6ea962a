use crate::constants::RESIZE_DEBOUNCE;
use crate::registry::TileId;
use smallvec::SmallVec;
use std::time::Duration;

/// Frame-driven one-shot timer; re-triggering restarts it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debounce {
    delay: Duration,
    remaining: Option<Duration>,
}

impl Debounce {
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            remaining: None,
        }
    }

    pub fn trigger(&mut self) {
        self.remaining = Some(self.delay);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    /// Advance by `dt`. Returns `true` on the tick the timer fires.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(left) = self.remaining else {
            return false;
        };
        if dt >= left {
            self.remaining = None;
            true
        } else {
            self.remaining = Some(left - dt);
            false
        }
    }
}

/// Window-resize fan-out: each resize re-arms a short debounce, and when it
/// fires every subscribed tile recomputes its surface size.
#[derive(Debug)]
pub struct ResizeCoordinator {
    debounce: Debounce,
    subscribers: SmallVec<[TileId; 16]>,
}

impl Default for ResizeCoordinator {
    fn default() -> Self {
        Self {
            debounce: Debounce::new(RESIZE_DEBOUNCE),
            subscribers: SmallVec::new(),
        }
    }
}

impl ResizeCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, tile: TileId) {
        if !self.subscribers.contains(&tile) {
            self.subscribers.push(tile);
        }
    }

    pub fn unsubscribe(&mut self, tile: TileId) {
        self.subscribers.retain(|t| *t != tile);
    }

    pub fn request(&mut self) {
        self.debounce.trigger();
    }

    /// Subscribers to resize on this tick, or `None` if the debounce has not
    /// fired.
    pub fn tick(&mut self, dt: Duration) -> Option<SmallVec<[TileId; 16]>> {
        if self.debounce.tick(dt) {
            Some(self.subscribers.clone())
        } else {
            None
        }
    }

    pub fn is_subscribed(&self, tile: TileId) -> bool {
        self.subscribers.contains(&tile)
    }

    pub fn clear(&mut self) {
        self.subscribers.clear();
        self.debounce.cancel();
    }
}
