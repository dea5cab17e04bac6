use std::str::FromStr;

use anyhow::bail;

use crate::{
    prelude::*, Aura, Creature, Environment, Floor, MapTile, Player, Terrain,
    TerrainQuery,
};

/// Terrain, floor state and actors read from an ASCII drawing.
///
/// `@` is the player, `l` and `L` are creatures with radius 1 and 3 light
/// auras, `d` and `D` the same for darkness. Actors stand on floor tiles.
#[derive(Clone, Debug)]
pub struct Scene {
    pub terrain: Terrain,
    pub floor: Floor,
    pub player: Player,
    pub creatures: Vec<Creature>,
}

impl Scene {
    pub fn parse(s: &str, env: Environment) -> anyhow::Result<Self> {
        let mut player = None;
        let mut creatures = Vec::new();

        let terrain = Terrain::parse(s, |p, c| {
            let aura = match c {
                '@' => {
                    player.get_or_insert(Vec::new()).push(p);
                    return Some(MapTile::Floor);
                }
                'l' => Aura::LIGHT_1,
                'L' => Aura::LIGHT_1 | Aura::LIGHT_2,
                'd' => Aura::DARK_1,
                'D' => Aura::DARK_1 | Aura::DARK_2,
                _ => return None,
            };
            creatures.push(Creature::new(p, aura));
            Some(MapTile::Floor)
        })?;

        let player = match player.as_deref() {
            Some(&[p]) => Player::new(p),
            None => bail!("no player in scene"),
            Some(ps) => bail!("{} players in scene", ps.len()),
        };

        Ok(Scene {
            floor: Floor::new(terrain.dim(), env),
            terrain,
            player,
            creatures,
        })
    }

    /// Set permanent light on every open tile and its neighbors, as if the
    /// whole map was made of lit rooms.
    pub fn light_up(&mut self) {
        for p in self.floor.points().collect::<Vec<_>>() {
            let lit = std::iter::once(p)
                .chain(DIR_8.iter().map(|&d| p + d))
                .any(|q| self.terrain.is_walkable(q));
            self.floor[p].set_glow(lit);
        }
    }
}

impl FromStr for Scene {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scene::parse(s, Default::default())
    }
}
