//! Creature light and darkness auras.

use util::{VecExt, DIR_4, DIR_8, DIR_DIAGONAL};

use crate::{
    prelude::*, ActiveTileSet, Creature, Floor, Player, TerrainQuery,
    TileFlags,
};

/// Recompute the tiles lit and darkened by creature auras.
///
/// Returns the tiles whose appearance changed. Previously lit tiles are
/// marked `TEMP` and previously darkened ones `EASY` while the pass runs.
pub(crate) fn recompute(
    floor: &mut Floor,
    terrain: &impl TerrainQuery,
    player: &Player,
    creatures: &[Creature],
    max_sight: i32,
    set: &mut ActiveTileSet,
) -> Vec<IVec2> {
    let old = set.take();
    for &p in &old {
        let tile = &mut floor[p];
        if tile.is_monster_lit() {
            tile.insert(TileFlags::TEMP);
        } else {
            tile.insert(TileFlags::EASY);
        }
        tile.remove(TileFlags::MONSTER_LIT | TileFlags::MONSTER_DARK);
    }

    let env = floor.env;
    let dark_zone = env.perpetual_dark && !player.see_in_dark;
    let max_dist = if dark_zone {
        max_sight / 2 + 1
    } else {
        max_sight + 3
    };

    for c in creatures {
        if !floor.contains(c.pos) {
            continue;
        }

        let mut rad = c.aura.radius();
        let kind = if rad > 0 {
            if !((c.awake || c.aura.is_self_light()) && env.is_dim()) {
                continue;
            }
            if env.perpetual_dark {
                rad = 1;
            }
            Kind::Light
        } else if rad < 0 {
            if !((c.awake || c.aura.is_self_dark()) && env.is_dim()) {
                continue;
            }
            rad = -rad;
            Kind::Dark
        } else {
            continue;
        };

        if (c.pos - player.pos).approx_len() > max_dist {
            continue;
        }

        let source_hidden = !floor.is_in_view(c.pos);
        Aura {
            floor: &mut *floor,
            terrain,
            set: &mut *set,
            kind,
            source: c.pos,
            source_hidden,
            viewer: player.pos,
        }
        .spread(rad);
    }

    let mut changed = Vec::new();

    for &p in &old {
        let tile = &floor[p];
        let was_lit = tile.has(TileFlags::TEMP);
        if tile.is_in_view()
            && ((was_lit && !tile.is_monster_lit())
                || (!was_lit && !tile.is_monster_dark()))
        {
            changed.push(p);
        }
    }

    for &p in set.iter() {
        let tile = &floor[p];
        if !tile.is_in_view() {
            continue;
        }
        if (tile.is_monster_lit() && !tile.has(TileFlags::TEMP))
            || (tile.is_monster_dark() && !tile.has(TileFlags::EASY))
        {
            changed.push(p);
        }
    }

    for &p in &old {
        floor[p].remove(TileFlags::SCRATCH);
    }

    changed
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Kind {
    Light,
    Dark,
}

/// Aura spreading from one creature.
struct Aura<'a, T> {
    floor: &'a mut Floor,
    terrain: &'a T,
    set: &'a mut ActiveTileSet,
    kind: Kind,
    source: IVec2,
    /// Creature itself is out of the player's view.
    source_hidden: bool,
    viewer: IVec2,
}

impl<T: TerrainQuery> Aura<'_, T> {
    /// Aura passes through the tile.
    fn passes(&self, p: IVec2) -> bool {
        match self.kind {
            Kind::Light => !self.terrain.blocks_sight(p),
            Kind::Dark => !self.terrain.blocks_projection(p),
        }
    }

    /// Tile doesn't stop the aura for the purpose of the wall leak test.
    fn is_open(&self, p: IVec2) -> bool {
        match self.kind {
            Kind::Light => !self.terrain.blocks_sight(p),
            Kind::Dark => {
                !self.terrain.blocks_sight(p)
                    || !self.terrain.blocks_projection(p)
            }
        }
    }

    fn spread(&mut self, rad: i32) {
        let c = self.source;

        self.apply(c);
        for d in DIR_8 {
            self.apply(c + d);
        }

        if rad >= 2 {
            for d in DIR_4 {
                if !self.passes(c + d) {
                    continue;
                }
                let p = c + d * 2;
                self.apply(p + d.perp());
                self.apply(p);
                self.apply(p - d.perp());

                if rad == 3 && self.passes(p) {
                    let p = p + d;
                    self.apply(p + d.perp());
                    self.apply(p);
                    self.apply(p - d.perp());
                }
            }
        }

        if rad == 3 {
            for d in DIR_DIAGONAL {
                if self.passes(c + d) {
                    self.apply(c + d * 2);
                }
            }
        }
    }

    fn apply(&mut self, p: IVec2) {
        let Some(tile) = self.floor.get(p) else {
            return;
        };

        if !tile.is_in_view() {
            return;
        }

        match self.kind {
            Kind::Light => {
                if tile.is_monster_lit() {
                    return;
                }
                if !self.is_open(p) && self.leaks(p) {
                    return;
                }

                if tile.is_monster_dark() {
                    // Already in the set.
                    let tile = &mut self.floor[p];
                    tile.remove(TileFlags::MONSTER_DARK);
                    tile.insert(TileFlags::MONSTER_LIT);
                } else if self.set.push(p) {
                    self.floor[p].insert(TileFlags::MONSTER_LIT);
                }
            }
            Kind::Dark => {
                if tile.is_torch_lit()
                    || tile.is_monster_lit()
                    || tile.is_monster_dark()
                {
                    return;
                }
                if !self.is_open(p) && self.leaks(p) {
                    return;
                }

                if self.set.push(p) {
                    self.floor[p].insert(TileFlags::MONSTER_DARK);
                }
            }
        }
    }

    /// A wall tile between the viewer and the source would show the aura
    /// on its far side.
    ///
    /// Interpolate where the line from the source to the viewer crosses the
    /// wall's row (and column) and require the wall's neighbor toward that
    /// crossing point to be open.
    fn leaks(&self, p: IVec2) -> bool {
        let (s, v) = (self.source, self.viewer);

        if (p.y < v.y && p.y > s.y) || (p.y > v.y && p.y < s.y) {
            let mid =
                s.x + (v.x - s.x) * (p.y - s.y).abs() / (v.y - s.y).abs();
            if p.x < mid {
                if !self.is_open(p + ivec2(1, 0)) {
                    return true;
                }
            } else if p.x > mid {
                if !self.is_open(p - ivec2(1, 0)) {
                    return true;
                }
            } else if self.source_hidden {
                return true;
            }
        }

        if (p.x < v.x && p.x > s.x) || (p.x > v.x && p.x < s.x) {
            let mid =
                s.y + (v.y - s.y) * (p.x - s.x).abs() / (v.x - s.x).abs();
            if p.y < mid {
                if !self.is_open(p + ivec2(0, 1)) {
                    return true;
                }
            } else if p.y > mid {
                if !self.is_open(p - ivec2(0, 1)) {
                    return true;
                }
            } else if self.source_hidden {
                return true;
            }
        }

        false
    }
}
