//! Integer grid coordinates.
//!
//! The warehouse floor is a bounded rectangle (not a torus).  Coordinates are
//! signed so that neighbour arithmetic at the edges produces out-of-bounds
//! positions the grid can reject, rather than wrapping.

use std::fmt;

/// A cell on the warehouse floor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `|Δx| + |Δy|`.
    #[inline]
    pub fn manhattan(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The four cardinal neighbours in fixed order: +x, −x, +y, −y.
    ///
    /// No bounds filtering happens here; that is the grid's job.
    #[inline]
    pub fn neighbors(self) -> [GridPos; 4] {
        [
            GridPos::new(self.x + 1, self.y),
            GridPos::new(self.x - 1, self.y),
            GridPos::new(self.x, self.y + 1),
            GridPos::new(self.x, self.y - 1),
        ]
    }

    /// `true` if `self` lies in the square box of half-width `radius`
    /// centred on `center` (`|dx| ≤ radius && |dy| ≤ radius`).
    #[inline]
    pub fn within_box(self, center: GridPos, radius: u32) -> bool {
        self.x.abs_diff(center.x) <= radius && self.y.abs_diff(center.y) <= radius
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        GridPos::new(x, y)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
