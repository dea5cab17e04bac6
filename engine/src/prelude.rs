pub use glam::{ivec2, IVec2};
pub use util::{HashSet, VecExt, DIR_4, DIR_8};
