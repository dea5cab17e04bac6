use crate::{memory, prelude::*, Config, Floor, Player, TerrainQuery, TileFlags};

/// Receiver for tiles whose displayed appearance may have changed.
pub trait Redraw {
    fn redraw(&mut self, p: IVec2);
}

impl<F: FnMut(IVec2)> Redraw for F {
    fn redraw(&mut self, p: IVec2) {
        self(p)
    }
}

impl Redraw for Vec<IVec2> {
    fn redraw(&mut self, p: IVec2) {
        self.push(p);
    }
}

/// Delayed redraw queue.
///
/// Tiles are queued at most once between flushes, a tile that was turned
/// on and off again during a turn is still only drawn once.
#[derive(Clone, Default, Debug)]
pub(crate) struct Bookkeeper {
    pending: Vec<IVec2>,
}

impl Bookkeeper {
    pub fn redraw_later(&mut self, floor: &mut Floor, p: IVec2) {
        let tile = &mut floor[p];
        if !tile.has(TileFlags::REDRAW) {
            tile.insert(TileFlags::REDRAW);
            self.pending.push(p);
        }
    }

    /// Redraw later and let the player notice the tile before that.
    pub fn note_and_redraw_later(&mut self, floor: &mut Floor, p: IVec2) {
        floor[p].insert(TileFlags::NOTICE);
        self.redraw_later(floor, p);
    }

    /// Process the queue, return the number of redrawn tiles.
    pub fn flush(
        &mut self,
        floor: &mut Floor,
        terrain: &impl TerrainQuery,
        player: &Player,
        config: &Config,
        out: &mut impl Redraw,
    ) -> usize {
        let n = self.pending.len();
        for p in self.pending.drain(..) {
            let notice = floor[p].has(TileFlags::NOTICE);
            floor[p].remove(TileFlags::REDRAW | TileFlags::NOTICE);
            if notice {
                memory::note_spot(floor, terrain, player, config, p);
            }
            out.redraw(p);
        }
        n
    }
}
