use std::ops::{Index, IndexMut};

use crate::{prelude::*, Environment, Tile};

/// Per-tile sight, light, memory and flow state of one dungeon floor.
#[derive(Clone, Debug)]
pub struct Floor {
    dim: IVec2,
    tiles: Vec<Tile>,
    pub env: Environment,
}

impl Floor {
    pub fn new(dim: IVec2, env: Environment) -> Self {
        let dim = dim.max(IVec2::ZERO);
        Floor {
            dim,
            tiles: vec![Default::default(); (dim.x * dim.y) as usize],
            env,
        }
    }

    pub fn dim(&self) -> IVec2 {
        self.dim
    }

    pub fn contains(&self, p: IVec2) -> bool {
        p.cmpge(IVec2::ZERO).all() && p.cmplt(self.dim).all()
    }

    pub fn get(&self, p: IVec2) -> Option<&Tile> {
        self.contains(p).then(|| &self.tiles[self.idx(p)])
    }

    /// All points of the floor in row order.
    pub fn points(&self) -> impl Iterator<Item = IVec2> {
        let dim = self.dim;
        (0..dim.y).flat_map(move |y| (0..dim.x).map(move |x| ivec2(x, y)))
    }

    pub fn tiles(&self) -> impl Iterator<Item = (IVec2, &Tile)> + '_ {
        self.points().zip(self.tiles.iter())
    }

    pub fn is_in_view(&self, p: IVec2) -> bool {
        self.get(p).is_some_and(Tile::is_in_view)
    }

    pub fn is_lit(&self, p: IVec2) -> bool {
        self.get(p).is_some_and(Tile::is_lit)
    }

    pub fn is_monster_lit(&self, p: IVec2) -> bool {
        self.get(p).is_some_and(Tile::is_monster_lit)
    }

    pub fn flow_cost(&self, p: IVec2) -> u16 {
        self.get(p).map_or(0, Tile::cost)
    }

    pub fn flow_distance(&self, p: IVec2) -> u16 {
        self.get(p).map_or(0, Tile::distance)
    }

    pub(crate) fn clear_flow(&mut self) {
        for t in &mut self.tiles {
            t.cost = 0;
            t.distance = 0;
        }
    }

    fn idx(&self, p: IVec2) -> usize {
        (p.y * self.dim.x + p.x) as usize
    }
}

impl Index<IVec2> for Floor {
    type Output = Tile;

    fn index(&self, p: IVec2) -> &Self::Output {
        assert!(self.contains(p), "floor index {p} out of bounds");
        &self.tiles[self.idx(p)]
    }
}

impl IndexMut<IVec2> for Floor {
    fn index_mut(&mut self, p: IVec2) -> &mut Self::Output {
        assert!(self.contains(p), "floor index {p} out of bounds");
        let i = self.idx(p);
        &mut self.tiles[i]
    }
}
