use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use util::StrExt;

use crate::prelude::*;

/// Terrain predicates the sight and flow computations read.
///
/// Points outside the map must block sight and projection and must not be
/// walkable.
pub trait TerrainQuery {
    fn blocks_sight(&self, p: IVec2) -> bool;

    fn blocks_projection(&self, p: IVec2) -> bool;

    /// A door that can be opened, creatures path through these at extra
    /// cost. Secret doors don't count.
    fn is_closed_door(&self, p: IVec2) -> bool;

    fn is_walkable(&self, p: IVec2) -> bool;

    /// Terrain that is memorized whenever the player sees it.
    fn is_remembered(&self, _p: IVec2) -> bool {
        false
    }
}

/// Specific terrain in a single map cell.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    EnumIter,
)]
#[serde(try_from = "char", into = "char")]
pub enum MapTile {
    #[default]
    Wall,
    Floor,
    Door,
    OpenDoor,
    SecretDoor,
    Rubble,
    /// Transparent but solid.
    Glass,
    Stairs,
}

use MapTile::*;

impl MapTile {
    pub fn blocks_sight(self) -> bool {
        matches!(self, Wall | Door | SecretDoor | Rubble)
    }

    pub fn blocks_projection(self) -> bool {
        self.blocks_sight() || self == Glass
    }

    pub fn is_walkable(self) -> bool {
        matches!(self, Floor | OpenDoor | Stairs)
    }

    pub fn is_closed_door(self) -> bool {
        self == Door
    }

    pub fn is_remembered(self) -> bool {
        self != Floor
    }
}

impl TryFrom<char> for MapTile {
    type Error = &'static str;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '#' => Ok(Wall),
            '.' => Ok(Floor),
            '+' => Ok(Door),
            '\'' => Ok(OpenDoor),
            's' => Ok(SecretDoor),
            ':' => Ok(Rubble),
            '"' => Ok(Glass),
            '>' => Ok(Stairs),
            _ => Err("invalid terrain char"),
        }
    }
}

impl From<MapTile> for char {
    fn from(val: MapTile) -> Self {
        // NB. This must match TryFrom inputs above.
        match val {
            Wall => '#',
            Floor => '.',
            Door => '+',
            OpenDoor => '\'',
            SecretDoor => 's',
            Rubble => ':',
            Glass => '"',
            Stairs => '>',
        }
    }
}

/// Rectangular terrain map.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct Terrain {
    dim: IVec2,
    tiles: Vec<MapTile>,
}

impl Terrain {
    /// Build a map from an ASCII drawing.
    ///
    /// Characters that aren't terrain are passed to `extra`, which can
    /// record them and name the terrain underneath. Blank cells are walls.
    pub fn parse(
        s: &str,
        mut extra: impl FnMut(IVec2, char) -> Option<MapTile>,
    ) -> anyhow::Result<Self> {
        let dim = s.char_grid_dim();
        let mut ret = Terrain {
            dim,
            tiles: vec![Default::default(); (dim.x * dim.y) as usize],
        };

        for (p, c) in s.char_grid() {
            let t = match MapTile::try_from(c) {
                Ok(t) => t,
                Err(e) => match extra(p, c) {
                    Some(t) => t,
                    None => bail!("{e} {c:?} at {p}"),
                },
            };
            ret.set(p, t);
        }

        Ok(ret)
    }

    pub fn dim(&self) -> IVec2 {
        self.dim
    }

    pub fn contains(&self, p: IVec2) -> bool {
        p.cmpge(IVec2::ZERO).all() && p.cmplt(self.dim).all()
    }

    pub fn get(&self, p: IVec2) -> Option<MapTile> {
        self.contains(p).then(|| self.tiles[self.idx(p)])
    }

    pub fn set(&mut self, p: IVec2, t: MapTile) {
        if self.contains(p) {
            let i = self.idx(p);
            self.tiles[i] = t;
        }
    }

    fn idx(&self, p: IVec2) -> usize {
        (p.y * self.dim.x + p.x) as usize
    }
}

impl FromStr for Terrain {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Terrain::parse(s, |_, _| None)
    }
}

impl TerrainQuery for Terrain {
    fn blocks_sight(&self, p: IVec2) -> bool {
        self.get(p).is_none_or(MapTile::blocks_sight)
    }

    fn blocks_projection(&self, p: IVec2) -> bool {
        self.get(p).is_none_or(MapTile::blocks_projection)
    }

    fn is_closed_door(&self, p: IVec2) -> bool {
        self.get(p).is_some_and(MapTile::is_closed_door)
    }

    fn is_walkable(&self, p: IVec2) -> bool {
        self.get(p).is_some_and(MapTile::is_walkable)
    }

    fn is_remembered(&self, p: IVec2) -> bool {
        self.get(p).is_some_and(MapTile::is_remembered)
    }
}
