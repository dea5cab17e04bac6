use bitflags::bitflags;

use crate::prelude::*;

/// Player state that sight and flow computations depend on.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct Player {
    pub pos: IVec2,
    /// Radius of the carried light source, zero for none.
    pub light_radius: i32,
    /// Player can see unlit tiles in view.
    pub see_in_dark: bool,
    pub blind: bool,
    /// Player is running, the flow field is allowed to go stale while the
    /// run continues in sight of its starting point.
    pub running: bool,
}

impl Player {
    pub fn new(pos: IVec2) -> Self {
        Player {
            pos,
            ..Default::default()
        }
    }
}

bitflags! {
    /// Light and darkness auras a creature emits.
    ///
    /// Auras only show when there's no daylight. Plain auras are also only
    /// active while the creature is awake, the `SELF_` variants shine when
    /// it sleeps too. Tiers add up.
    #[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug)]
    pub struct Aura: u8 {
        const LIGHT_1 = 1 << 0;
        const LIGHT_2 = 1 << 1;
        const DARK_1 = 1 << 2;
        const DARK_2 = 1 << 3;
        const SELF_LIGHT_1 = 1 << 4;
        const SELF_LIGHT_2 = 1 << 5;
        const SELF_DARK_1 = 1 << 6;
        const SELF_DARK_2 = 1 << 7;
    }
}

impl Aura {
    /// Net aura radius, positive for light and negative for darkness.
    pub fn radius(self) -> i32 {
        let mut ret = 0;
        if self.intersects(Aura::LIGHT_1 | Aura::SELF_LIGHT_1) {
            ret += 1;
        }
        if self.intersects(Aura::LIGHT_2 | Aura::SELF_LIGHT_2) {
            ret += 2;
        }
        if self.intersects(Aura::DARK_1 | Aura::SELF_DARK_1) {
            ret -= 1;
        }
        if self.intersects(Aura::DARK_2 | Aura::SELF_DARK_2) {
            ret -= 2;
        }
        ret
    }

    pub fn is_self_light(self) -> bool {
        self.intersects(Aura::SELF_LIGHT_1 | Aura::SELF_LIGHT_2)
    }

    pub fn is_self_dark(self) -> bool {
        self.intersects(Aura::SELF_DARK_1 | Aura::SELF_DARK_2)
    }
}

#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct Creature {
    pub pos: IVec2,
    pub aura: Aura,
    pub awake: bool,
}

impl Creature {
    pub fn new(pos: IVec2, aura: Aura) -> Self {
        Creature {
            pos,
            aura,
            awake: true,
        }
    }
}

/// Floor-wide conditions that affect lighting.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Environment {
    /// Floor is a dungeon level instead of the surface.
    pub underground: bool,
    /// Sun is up, only matters on the surface.
    pub daytime: bool,
    /// Floor is magically dark, sight and auras are curtailed.
    pub perpetual_dark: bool,
}

impl Default for Environment {
    fn default() -> Self {
        Environment {
            underground: true,
            daytime: false,
            perpetual_dark: false,
        }
    }
}

impl Environment {
    pub fn surface(daytime: bool) -> Self {
        Environment {
            underground: false,
            daytime,
            perpetual_dark: false,
        }
    }

    /// Creature auras only show up when there's no daylight.
    pub fn is_dim(&self) -> bool {
        self.underground || !self.daytime
    }
}
