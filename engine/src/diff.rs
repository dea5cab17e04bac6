//! Incremental membership changes of flag-tracked tile sets.
//!
//! A recomputation pass first [stages](stage) the previous members, marking
//! them `TEMP` in the scratch set and clearing their flag, then marks the new
//! members, then [settles](settle) the two into a [`Diff`].

use crate::{prelude::*, ActiveTileSet, Floor, TileFlags};

/// Tiles that joined and left a set during one pass.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct Diff {
    pub entered: Vec<IVec2>,
    pub left: Vec<IVec2>,
}

impl Diff {
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.left.is_empty()
    }
}

/// Clear `flag` from the previous members and remember them in `temp`.
pub(crate) fn stage(
    floor: &mut Floor,
    old: Vec<IVec2>,
    temp: &mut ActiveTileSet,
    flag: TileFlags,
) {
    temp.reset();
    for p in old {
        let tile = &mut floor[p];
        tile.remove(flag);
        if temp.push(p) {
            tile.insert(TileFlags::TEMP);
        }
    }
}

/// Compare the new members flagged with `flag` against the staged ones and
/// clear the scratch bits.
pub(crate) fn settle(
    floor: &mut Floor,
    new: &[IVec2],
    temp: &mut ActiveTileSet,
    flag: TileFlags,
) -> Diff {
    let mut ret = Diff::default();

    for &p in new {
        let tile = &mut floor[p];
        tile.remove(TileFlags::EASY);
        if !tile.has(TileFlags::TEMP) {
            ret.entered.push(p);
        }
    }

    for &p in temp.iter() {
        let tile = &mut floor[p];
        tile.remove(TileFlags::TEMP);
        if !tile.has(flag) {
            ret.left.push(p);
        }
    }
    temp.reset();

    ret
}
