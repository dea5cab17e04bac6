use clap::ValueEnum;
use engine::{prelude::*, Scene, Tile};

/// Map layers that can be printed.
#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
pub enum Layer {
    /// Terrain in view.
    View,
    /// Terrain lit by the player's light.
    Lite,
    /// Creature light as `*` and creature darkness as `%` over the view.
    Monster,
    /// Flow field distances in base 36.
    Flow,
    /// Remembered terrain.
    Memory,
}

impl Layer {
    fn cell(self, scene: &Scene, p: IVec2) -> char {
        let tile = &scene.floor[p];
        let terrain = scene.terrain.get(p).map_or(' ', char::from);
        let when = |pred: fn(&Tile) -> bool| {
            if pred(tile) { terrain } else { ' ' }
        };

        match self {
            Layer::View => when(Tile::is_in_view),
            Layer::Lite => when(Tile::is_torch_lit),
            Layer::Memory => when(Tile::is_memorized),
            Layer::Monster if tile.is_monster_lit() => '*',
            Layer::Monster if tile.is_monster_dark() => '%',
            Layer::Monster => when(Tile::is_in_view),
            Layer::Flow => match tile.distance() {
                0 => ' ',
                n => char::from_digit(n as u32, 36).unwrap_or('+'),
            },
        }
    }
}

/// Draw one layer of the scene with the player on top.
pub fn render(scene: &Scene, layer: Layer) -> String {
    let dim = scene.floor.dim();
    let mut lines = Vec::new();
    for y in 0..dim.y {
        let line: String = (0..dim.x)
            .map(|x| {
                let p = ivec2(x, y);
                if p == scene.player.pos {
                    '@'
                } else {
                    layer.cell(scene, p)
                }
            })
            .collect();
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}
