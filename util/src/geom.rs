use glam::IVec2;

/// 8 directions, clock face order.
pub const DIR_8: [IVec2; 8] = [
    IVec2::from_array([0, -1]),
    IVec2::from_array([1, -1]),
    IVec2::from_array([1, 0]),
    IVec2::from_array([1, 1]),
    IVec2::from_array([0, 1]),
    IVec2::from_array([-1, 1]),
    IVec2::from_array([-1, 0]),
    IVec2::from_array([-1, -1]),
];

/// 4 directions, clock face order.
pub const DIR_4: [IVec2; 4] = [
    IVec2::from_array([0, -1]),
    IVec2::from_array([1, 0]),
    IVec2::from_array([0, 1]),
    IVec2::from_array([-1, 0]),
];

/// The 4 diagonal directions, clock face order.
pub const DIR_DIAGONAL: [IVec2; 4] = [
    IVec2::from_array([1, -1]),
    IVec2::from_array([1, 1]),
    IVec2::from_array([-1, 1]),
    IVec2::from_array([-1, -1]),
];

pub trait VecExt: Sized + Default {
    /// Absolute size of vector in taxicab metric.
    fn taxi_len(&self) -> i32;

    /// Absolute size of vector in chessboard metric, the number of 8-way
    /// steps needed to cross it.
    fn chess_len(&self) -> i32;

    /// Cheap octagonal approximation of the euclidean length.
    ///
    /// Longer axis plus half of the shorter one, rounded down.
    ///
    /// ```
    /// # use glam::ivec2;
    /// # use util::VecExt;
    /// assert_eq!(ivec2(3, 0).approx_len(), 3);
    /// assert_eq!(ivec2(-3, 3).approx_len(), 4);
    /// assert_eq!(ivec2(1, -10).approx_len(), 10);
    /// ```
    fn approx_len(&self) -> i32;
}

impl VecExt for IVec2 {
    fn taxi_len(&self) -> i32 {
        self[0].abs() + self[1].abs()
    }

    fn chess_len(&self) -> i32 {
        self[0].abs().max(self[1].abs())
    }

    fn approx_len(&self) -> i32 {
        let (x, y) = (self[0].abs(), self[1].abs());
        x.max(y) + x.min(y) / 2
    }
}
