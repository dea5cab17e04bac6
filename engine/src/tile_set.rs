use derive_more::Deref;
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// What to do when a bounded tile collection is full.
#[derive(
    Copy, Clone, Default, Eq, PartialEq, Hash, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Overflow {
    /// Drop new entries past capacity and log a warning.
    #[default]
    Truncate,
    /// Treat capacity as a size hint and keep growing.
    Grow,
}

/// Tiles holding one of the tracked flags, in discovery order.
///
/// A tile's flag must only be set after a successful [`push`] of that
/// tile, so the flags and the list always agree even when entries get
/// dropped.
///
/// [`push`]: ActiveTileSet::push
#[derive(Clone, Debug, Deref)]
pub struct ActiveTileSet {
    #[deref]
    tiles: Vec<IVec2>,
    name: &'static str,
    capacity: usize,
    overflow: Overflow,
    dropped: usize,
}

impl ActiveTileSet {
    pub fn new(name: &'static str, capacity: usize, overflow: Overflow) -> Self {
        ActiveTileSet {
            tiles: Vec::with_capacity(capacity),
            name,
            capacity,
            overflow,
            dropped: 0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries dropped for lack of space since the set was last
    /// started over.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Append a tile, return false if it was dropped.
    pub fn push(&mut self, p: IVec2) -> bool {
        if self.tiles.len() >= self.capacity
            && self.overflow == Overflow::Truncate
        {
            if self.dropped == 0 {
                log::warn!(
                    "{} set is full at {} tiles, dropping the rest",
                    self.name,
                    self.capacity
                );
            }
            self.dropped += 1;
            return false;
        }
        self.tiles.push(p);
        true
    }

    /// Empty the set and start a new pass.
    pub(crate) fn reset(&mut self) {
        self.tiles.clear();
        self.dropped = 0;
    }

    /// Move the current contents out and start a new pass.
    pub(crate) fn take(&mut self) -> Vec<IVec2> {
        self.dropped = 0;
        std::mem::replace(&mut self.tiles, Vec::with_capacity(self.capacity))
    }

    pub(crate) fn retain(&mut self, f: impl FnMut(&IVec2) -> bool) {
        self.tiles.retain(f);
    }
}
