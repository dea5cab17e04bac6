//! Unopinionated standalone utilities.

mod geom;
pub use geom::{VecExt, DIR_4, DIR_8, DIR_DIAGONAL};

mod text;
pub use text::StrExt;

/// Set with an efficient hash function.
pub use rustc_hash::FxHashSet as HashSet;
