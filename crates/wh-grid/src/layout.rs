//! Shelf and packing-station placement.
//!
//! Shelves are laid out in pairs on a 3-cell lattice starting at (2, 2) and
//! kept two cells clear of every edge:
//!
//! ```text
//! for x in 2, 5, 8, … < width-2:
//!   for y in 2, 5, 8, … < height-2:
//!     shelf (x, y); shelf (x+1, y) if x+1 < width-2
//! ```
//!
//! The four packing stations sit one cell in from each corner.

use wh_core::GridPos;

use crate::{GridError, GridResult};

/// Fixed fixture positions for one floor.  Computed once, never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WarehouseLayout {
    pub width:    u32,
    pub height:   u32,
    pub shelves:  Vec<GridPos>,
    pub stations: Vec<GridPos>,
}

impl WarehouseLayout {
    /// Smallest side length that still yields a shelf and four distinct
    /// stations.
    pub const MIN_DIM: u32 = 5;

    /// Compute the standard layout for a `width` × `height` floor.
    pub fn generate(width: u32, height: u32) -> GridResult<Self> {
        if width < Self::MIN_DIM || height < Self::MIN_DIM {
            return Err(GridError::TooSmall { width, height, min: Self::MIN_DIM });
        }
        let (w, h) = (width as i32, height as i32);

        let mut shelves = Vec::new();
        for x in (2..w - 2).step_by(3) {
            for y in (2..h - 2).step_by(3) {
                shelves.push(GridPos::new(x, y));
                if x + 1 < w - 2 {
                    shelves.push(GridPos::new(x + 1, y));
                }
            }
        }

        let stations = vec![
            GridPos::new(1, 1),
            GridPos::new(w - 2, 1),
            GridPos::new(1, h - 2),
            GridPos::new(w - 2, h - 2),
        ];

        Ok(Self { width, height, shelves, stations })
    }

    pub fn is_shelf(&self, pos: GridPos) -> bool {
        self.shelves.contains(&pos)
    }

    pub fn is_station(&self, pos: GridPos) -> bool {
        self.stations.contains(&pos)
    }

    /// Cells a robot may start on: everything that is neither shelf nor
    /// station.
    pub fn free_cell_count(&self) -> usize {
        self.width as usize * self.height as usize - self.shelves.len() - self.stations.len()
    }
}
