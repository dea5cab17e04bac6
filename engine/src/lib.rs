//! Incremental sight, lighting and creature tracking state for a tile
//! grid dungeon floor.

/// Default sight radius.
pub const MAX_SIGHT: i32 = 20;

/// Default upper bound for the player's light radius.
pub const MAX_LIGHT_RADIUS: i32 = 14;

/// Default number of steps the flow field propagates from the player.
pub const FLOW_DEPTH: u16 = 32;

pub const VIEW_CAPACITY: usize = 1536;
pub const LITE_CAPACITY: usize = 600;
pub const MONSTER_LITE_CAPACITY: usize = 1536;
pub const TEMP_CAPACITY: usize = 2298;

mod config;
pub use config::Config;

mod creature;
pub use creature::{Aura, Creature, Environment, Player};

mod diff;
pub use diff::Diff;

mod flow;

mod floor;
pub use floor::Floor;

mod lite;

mod memory;

mod mon_lite;

pub mod prelude;

mod redraw;
pub use redraw::Redraw;

mod scene;
pub use scene::Scene;

mod scratch;
use scratch::Scratch;

mod sight;
pub use sight::Sight;

mod terrain;
pub use terrain::{MapTile, Terrain, TerrainQuery};

mod tile;
pub use tile::{Tile, TileFlags};

mod tile_set;
pub use tile_set::{ActiveTileSet, Overflow};

mod view;

#[cfg(test)]
mod test;
