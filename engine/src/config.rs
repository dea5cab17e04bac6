use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Overflow, FLOW_DEPTH, LITE_CAPACITY, MAX_LIGHT_RADIUS, MAX_SIGHT,
    MONSTER_LITE_CAPACITY, TEMP_CAPACITY, VIEW_CAPACITY,
};

/// Tunable parameters for sight, light and flow computation.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Sight radius along the axes.
    pub max_sight: i32,
    /// Halve the sight radius on the surface.
    pub reduce_view_in_town: bool,
    /// Upper bound for the player's light radius.
    pub max_light_radius: i32,
    /// Flow field propagation stops at this many steps.
    pub flow_depth: u16,
    /// Remember floors that have been seen lit by torch or creature light.
    pub memorize_torch_lit: bool,
    /// Remember permanently lit floors that have been seen.
    pub memorize_perma_lit: bool,
    pub overflow: Overflow,
    pub view_capacity: usize,
    pub lite_capacity: usize,
    pub monster_lite_capacity: usize,
    /// Size of the flow queue and the scratch set. The scratch set is never
    /// made smaller than the largest of the other set capacities.
    pub temp_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_sight: MAX_SIGHT,
            reduce_view_in_town: false,
            max_light_radius: MAX_LIGHT_RADIUS,
            flow_depth: FLOW_DEPTH,
            memorize_torch_lit: true,
            memorize_perma_lit: true,
            overflow: Default::default(),
            view_capacity: VIEW_CAPACITY,
            lite_capacity: LITE_CAPACITY,
            monster_lite_capacity: MONSTER_LITE_CAPACITY,
            temp_capacity: TEMP_CAPACITY,
        }
    }
}

impl Config {
    /// Load configuration from an IDM file, missing fields get default
    /// values.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ret: Config = idm::from_str(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(ret)
    }
}
