use fov::{Field, Reach, ViewField};

use crate::{
    diff::{self, Diff},
    prelude::*,
    ActiveTileSet, Floor, TerrainQuery, TileFlags,
};

/// Recompute the set of tiles in view from `origin`.
///
/// Torch light is left alone, the caller must put it out on tiles that are
/// no longer in view.
pub(crate) fn recompute(
    floor: &mut Floor,
    terrain: &impl TerrainQuery,
    origin: IVec2,
    reach: Reach,
    view: &mut ActiveTileSet,
    temp: &mut ActiveTileSet,
) -> Diff {
    diff::stage(floor, view.take(), temp, TileFlags::VIEW);

    fov::sweep(
        &mut ViewPass {
            floor: &mut *floor,
            terrain,
            view: &mut *view,
        },
        origin.into(),
        reach,
    );

    let ret = diff::settle(floor, view, temp, TileFlags::VIEW);
    if view.dropped() > 0 {
        log::debug!("view pass dropped {} tiles", view.dropped());
    }
    ret
}

/// Adapter that lets the generic sweep write into the floor.
struct ViewPass<'a, T> {
    floor: &'a mut Floor,
    terrain: &'a T,
    view: &'a mut ActiveTileSet,
}

impl<T: TerrainQuery> Field for ViewPass<'_, T> {
    fn contains(&self, p: [i32; 2]) -> bool {
        self.floor.contains(p.into())
    }

    fn blocks_sight(&self, p: [i32; 2]) -> bool {
        let p = IVec2::from(p);
        !self.floor.contains(p) || self.terrain.blocks_sight(p)
    }
}

impl<T: TerrainQuery> ViewField for ViewPass<'_, T> {
    fn is_seen(&self, p: [i32; 2]) -> bool {
        self.floor.is_in_view(p.into())
    }

    fn is_easy(&self, p: [i32; 2]) -> bool {
        self.floor
            .get(p.into())
            .is_some_and(|t| t.has(TileFlags::EASY))
    }

    fn mark(&mut self, p: [i32; 2], easy: bool) {
        let p = IVec2::from(p);
        let tile = &mut self.floor[p];
        if !tile.is_in_view() {
            if !self.view.push(p) {
                return;
            }
            tile.insert(TileFlags::VIEW);
        }
        if easy {
            tile.insert(TileFlags::EASY);
        }
    }
}
