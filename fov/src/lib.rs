//! Generic field-of-view computation.
//!
//! Points are `[x, y]` arrays with y growing downwards. The algorithms only
//! see the map through the [`Field`] and [`ViewField`] traits, the caller
//! decides where the results are stored.

mod los;
pub use los::los;

mod sweep;
pub use sweep::{sweep, Reach};

/// Map that sight is computed over.
pub trait Field {
    /// Point is inside the map.
    fn contains(&self, p: [i32; 2]) -> bool;

    /// Light does not pass through the cell.
    ///
    /// Cells outside the map must be reported as blocking.
    fn blocks_sight(&self, p: [i32; 2]) -> bool;
}

/// Map that can record the cells reached by a [`sweep`].
pub trait ViewField: Field {
    /// Cell has been marked as seen during the current sweep.
    fn is_seen(&self, p: [i32; 2]) -> bool;

    /// Cell was reached along an unobstructed axis or diagonal walk.
    fn is_easy(&self, p: [i32; 2]) -> bool;

    /// Mark a cell as seen, optionally also as easy.
    ///
    /// Marking an already seen cell must be a no-op apart from adding the
    /// easy mark.
    fn mark(&mut self, p: [i32; 2], easy: bool);
}
