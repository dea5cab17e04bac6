use bitflags::bitflags;

bitflags! {
    /// Per-tile visibility, lighting and memory state.
    #[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug)]
    pub struct TileFlags: u16 {
        /// In the player's line of sight.
        const VIEW = 1 << 0;
        /// Lit by the player's own light source.
        const LITE = 1 << 1;
        /// Lit by a creature's light aura.
        const MONSTER_LIT = 1 << 2;
        /// Darkened by a creature's darkness aura.
        const MONSTER_DARK = 1 << 3;
        /// Permanently lit, set by level generation.
        const GLOW = 1 << 4;
        /// Player has seen the terrain here.
        const KNOWN = 1 << 5;
        /// Terrain is remembered while out of sight.
        const MEMORIZED = 1 << 6;

        /// Scratch bit for staging the previous set during a pass.
        const TEMP = 1 << 8;
        /// Scratch bit for tiles reached with an unobstructed walk.
        const EASY = 1 << 9;
        /// Tile is queued for a delayed redraw.
        const REDRAW = 1 << 10;
        /// Tile is queued for memorization at redraw time.
        const NOTICE = 1 << 11;

        /// Bits that must not survive a recomputation pass.
        const SCRATCH = Self::TEMP.bits() | Self::EASY.bits();
    }
}

/// One grid cell.
///
/// Torch light can only be set on tiles in view and goes out when the tile
/// leaves view.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct Tile {
    flags: TileFlags,
    pub(crate) cost: u16,
    pub(crate) distance: u16,
}

impl Tile {
    pub fn flags(&self) -> TileFlags {
        self.flags
    }

    pub fn is_in_view(&self) -> bool {
        self.flags.contains(TileFlags::VIEW)
    }

    pub fn is_torch_lit(&self) -> bool {
        self.flags.contains(TileFlags::LITE)
    }

    pub fn is_monster_lit(&self) -> bool {
        self.flags.contains(TileFlags::MONSTER_LIT)
    }

    pub fn is_monster_dark(&self) -> bool {
        self.flags.contains(TileFlags::MONSTER_DARK)
    }

    /// Lit by torch or creature light and not darkened by a creature.
    pub fn is_lit(&self) -> bool {
        self.flags
            .intersects(TileFlags::LITE | TileFlags::MONSTER_LIT)
            && !self.is_monster_dark()
    }

    /// Permanent light that isn't being suppressed by a darkness aura.
    pub fn is_glowing(&self) -> bool {
        self.flags.contains(TileFlags::GLOW) && !self.is_monster_dark()
    }

    pub fn is_known(&self) -> bool {
        self.flags.contains(TileFlags::KNOWN)
    }

    pub fn is_memorized(&self) -> bool {
        self.flags.contains(TileFlags::MEMORIZED)
    }

    /// Flow field cost from the player, zero if unreached.
    pub fn cost(&self) -> u16 {
        self.cost
    }

    /// Flow field step count from the player, zero if unreached.
    pub fn distance(&self) -> u16 {
        self.distance
    }

    pub fn set_glow(&mut self, glow: bool) {
        self.flags.set(TileFlags::GLOW, glow);
    }

    /// Make the player forget the tile.
    pub fn forget(&mut self) {
        self.flags.remove(TileFlags::KNOWN | TileFlags::MEMORIZED);
    }

    pub(crate) fn has(&self, flags: TileFlags) -> bool {
        self.flags.contains(flags)
    }

    /// Set flags on the tile.
    ///
    /// Torch light is refused unless the tile is, or is becoming, in view.
    /// Returns whether all the flags are now set.
    pub(crate) fn insert(&mut self, flags: TileFlags) -> bool {
        if flags.contains(TileFlags::LITE)
            && !(self.is_in_view() || flags.contains(TileFlags::VIEW))
        {
            self.flags.insert(flags - TileFlags::LITE);
            return false;
        }
        self.flags.insert(flags);
        true
    }

    pub(crate) fn remove(&mut self, flags: TileFlags) {
        self.flags.remove(flags);
    }

    /// Drop out of view, which also puts out torch light.
    pub(crate) fn leave_view(&mut self) {
        self.flags.remove(TileFlags::VIEW | TileFlags::LITE);
    }
}
