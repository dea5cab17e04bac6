use util::{VecExt, DIR_4, DIR_8, DIR_DIAGONAL};

use crate::{
    diff::{self, Diff},
    prelude::*,
    ActiveTileSet, Floor, TerrainQuery, TileFlags,
};

/// Recompute the tiles lit by a light source of `radius` at `origin`.
///
/// Only tiles in view are lit, so this must run after the view pass.
pub(crate) fn recompute(
    floor: &mut Floor,
    terrain: &impl TerrainQuery,
    origin: IVec2,
    radius: i32,
    lite: &mut ActiveTileSet,
    temp: &mut ActiveTileSet,
) -> Diff {
    diff::stage(floor, lite.take(), temp, TileFlags::LITE);
    let dim = floor.dim();

    let mut light = |p: IVec2| {
        let Some(tile) = floor.get(p) else { return };
        if !tile.is_in_view() || tile.is_torch_lit() {
            return;
        }
        if lite.push(p) {
            floor[p].insert(TileFlags::LITE);
        }
    };
    let open = |p: IVec2| !terrain.blocks_sight(p);

    if radius >= 1 {
        light(origin);
        for d in DIR_8 {
            light(origin + d);
        }
    }

    if radius >= 2 {
        for d in DIR_4 {
            if open(origin + d) {
                let p = origin + d * 2;
                light(p);
                light(p + d.perp());
                light(p - d.perp());
            }
        }
    }

    if radius >= 3 {
        for d in DIR_DIAGONAL {
            if open(origin + d) {
                light(origin + d * 2);
            }
        }

        let min = (origin - radius).max(IVec2::ZERO);
        let max = (origin + radius).min(dim - 1);
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                let v = ivec2(x, y) - origin;
                if v.chess_len() <= 2 || v.approx_len() > radius {
                    continue;
                }
                light(origin + v);
            }
        }
    }

    diff::settle(floor, lite, temp, TileFlags::LITE)
}
