use fov::Reach;

use crate::{
    flow, lite, memory, mon_lite, prelude::*, redraw::Bookkeeper, view,
    ActiveTileSet, Config, Creature, Floor, Player, Redraw, Scratch,
    TerrainQuery, TileFlags,
};

/// Incrementally maintained sight, light and flow state for the player on
/// one floor.
///
/// The floor and terrain are passed in to every call, a `Sight` value
/// belongs to one floor for as long as that floor is loaded. Every public
/// recompute call ends by flushing the redraw queue into `out`.
#[derive(Clone, Debug)]
pub struct Sight {
    config: Config,
    view: ActiveTileSet,
    lite: ActiveTileSet,
    monster_lite: ActiveTileSet,
    scratch: Scratch,
    book: Bookkeeper,
    flow_origin: Option<IVec2>,
    player_monster_lit: bool,
}

impl Default for Sight {
    fn default() -> Self {
        Sight::new(Default::default())
    }
}

impl Sight {
    pub fn new(config: Config) -> Self {
        Sight {
            view: ActiveTileSet::new(
                "view",
                config.view_capacity,
                config.overflow,
            ),
            lite: ActiveTileSet::new(
                "lite",
                config.lite_capacity,
                config.overflow,
            ),
            monster_lite: ActiveTileSet::new(
                "monster lite",
                config.monster_lite_capacity,
                config.overflow,
            ),
            scratch: Scratch::new(&config),
            book: Default::default(),
            flow_origin: None,
            player_monster_lit: false,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Tiles currently in view.
    pub fn view(&self) -> &ActiveTileSet {
        &self.view
    }

    /// Tiles currently lit by the player's light.
    pub fn lite(&self) -> &ActiveTileSet {
        &self.lite
    }

    /// Tiles currently lit or darkened by creatures.
    pub fn monster_lite(&self) -> &ActiveTileSet {
        &self.monster_lite
    }

    /// Whether the player was standing in creature light after the last
    /// monster lite pass.
    pub fn player_monster_lit(&self) -> bool {
        self.player_monster_lit
    }

    pub fn recompute_view(
        &mut self,
        floor: &mut Floor,
        terrain: &impl TerrainQuery,
        player: &Player,
        out: &mut impl Redraw,
    ) {
        if self.view_pass(floor, terrain, player) {
            self.flush(floor, terrain, player, out);
        }
    }

    pub fn recompute_lite(
        &mut self,
        floor: &mut Floor,
        terrain: &impl TerrainQuery,
        player: &Player,
        out: &mut impl Redraw,
    ) {
        if self.lite_pass(floor, terrain, player) {
            self.flush(floor, terrain, player, out);
        }
    }

    /// Recompute creature light, return the new state of the player's tile
    /// if it went from lit to unlit or back.
    pub fn recompute_monster_lite(
        &mut self,
        floor: &mut Floor,
        terrain: &impl TerrainQuery,
        player: &Player,
        creatures: &[Creature],
        out: &mut impl Redraw,
    ) -> Option<bool> {
        let ret = self.monster_lite_pass(floor, terrain, player, creatures);
        self.flush(floor, terrain, player, out);
        ret
    }

    /// Rebuild the flow field, return false if it was left as is.
    pub fn recompute_flow(
        &mut self,
        floor: &mut Floor,
        terrain: &impl TerrainQuery,
        player: &Player,
    ) -> bool {
        if !self.check_player(floor, player) {
            return false;
        }
        flow::recompute(
            floor,
            terrain,
            player,
            self.config.flow_depth,
            &mut self.flow_origin,
            &mut self.scratch.queue,
        )
    }

    /// Run every pass for a new turn in dependency order, flushing the
    /// redraws once at the end.
    ///
    /// Returns the player's monster light change like
    /// [`recompute_monster_lite`](Sight::recompute_monster_lite).
    pub fn update(
        &mut self,
        floor: &mut Floor,
        terrain: &impl TerrainQuery,
        player: &Player,
        creatures: &[Creature],
        out: &mut impl Redraw,
    ) -> Option<bool> {
        self.view_pass(floor, terrain, player);
        self.lite_pass(floor, terrain, player);
        let ret = self.monster_lite_pass(floor, terrain, player, creatures);
        self.recompute_flow(floor, terrain, player);
        self.flush(floor, terrain, player, out);
        ret
    }

    fn check_player(&self, floor: &Floor, player: &Player) -> bool {
        if floor.contains(player.pos) {
            true
        } else {
            log::warn!("player at {} is outside the floor", player.pos);
            false
        }
    }

    fn view_pass(
        &mut self,
        floor: &mut Floor,
        terrain: &impl TerrainQuery,
        player: &Player,
    ) -> bool {
        if !self.check_player(floor, player) {
            return false;
        }

        let reach =
            if self.config.reduce_view_in_town && !floor.env.underground {
                Reach::reduced(self.config.max_sight)
            } else {
                Reach::new(self.config.max_sight)
            };

        let diff = view::recompute(
            floor,
            terrain,
            player.pos,
            reach,
            &mut self.view,
            &mut self.scratch.temp,
        );

        // Torch light goes out on tiles that left view.
        self.lite.retain(|&p| {
            let tile = &mut floor[p];
            if !tile.is_in_view() {
                tile.leave_view();
            }
            tile.is_torch_lit()
        });

        for &p in &diff.entered {
            memory::note_spot(floor, terrain, player, &self.config, p);
            self.book.redraw_later(floor, p);
        }
        for &p in &diff.left {
            self.book.redraw_later(floor, p);
        }

        log::debug!(
            "view: {} tiles, {} entered, {} left",
            self.view.len(),
            diff.entered.len(),
            diff.left.len()
        );
        true
    }

    fn lite_pass(
        &mut self,
        floor: &mut Floor,
        terrain: &impl TerrainQuery,
        player: &Player,
    ) -> bool {
        if !self.check_player(floor, player) {
            return false;
        }

        let radius =
            player.light_radius.min(self.config.max_light_radius).max(0);
        let diff = lite::recompute(
            floor,
            terrain,
            player.pos,
            radius,
            &mut self.lite,
            &mut self.scratch.temp,
        );

        for &p in &diff.entered {
            self.book.note_and_redraw_later(floor, p);
        }
        for &p in &diff.left {
            self.book.redraw_later(floor, p);
        }
        true
    }

    fn monster_lite_pass(
        &mut self,
        floor: &mut Floor,
        terrain: &impl TerrainQuery,
        player: &Player,
        creatures: &[Creature],
    ) -> Option<bool> {
        if !self.check_player(floor, player) {
            return None;
        }

        let changed = mon_lite::recompute(
            floor,
            terrain,
            player,
            creatures,
            self.config.max_sight,
            &mut self.monster_lite,
        );
        for p in changed {
            self.book.note_and_redraw_later(floor, p);
        }

        let lit = floor[player.pos].has(TileFlags::MONSTER_LIT);
        if lit == self.player_monster_lit {
            return None;
        }
        self.player_monster_lit = lit;
        log::debug!(
            "player is {} creature light",
            if lit { "in" } else { "out of" }
        );
        Some(lit)
    }

    fn flush(
        &mut self,
        floor: &mut Floor,
        terrain: &impl TerrainQuery,
        player: &Player,
        out: &mut impl Redraw,
    ) {
        self.book.flush(floor, terrain, player, &self.config, out);
    }
}
