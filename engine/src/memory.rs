use crate::{prelude::*, Config, Floor, Player, TerrainQuery, TileFlags};

/// Let the player take note of a tile if they can currently see it.
pub(crate) fn note_spot(
    floor: &mut Floor,
    terrain: &impl TerrainQuery,
    player: &Player,
    config: &Config,
    p: IVec2,
) {
    if player.blind {
        return;
    }

    let tile = &mut floor[p];
    let lit = tile.has(TileFlags::LITE) || tile.has(TileFlags::MONSTER_LIT);

    if !lit
        && !(tile.is_in_view() && (tile.is_glowing() || player.see_in_dark))
    {
        return;
    }

    if !tile.is_memorized()
        && (terrain.is_remembered(p)
            || (config.memorize_torch_lit && (lit || player.see_in_dark))
            || (config.memorize_perma_lit && tile.is_glowing()))
    {
        tile.insert(TileFlags::MEMORIZED);
    }

    tile.insert(TileFlags::KNOWN);
}
