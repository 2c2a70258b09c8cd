//! Spatial grid: bounds checks, fixture map, and robot occupancy.
//!
//! # Data layout
//!
//! Two dense row-major arrays of `width * height` cells, indexed by
//! `y * width + x`:
//!
//! ```text
//! fixtures[i] : Option<Fixture>   — immutable after layout placement
//! robots[i]   : Option<RobotId>   — the single robot on the cell, if any
//! ```
//!
//! Occupancy queries are O(1).  The robot array is the only thing that
//! changes during a run.

use wh_core::{GridPos, RobotId};

use crate::{Fixture, GridError, GridResult, Occupant, WarehouseLayout};

/// Bounded 2-D warehouse floor.  Not a torus.
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    width:       u32,
    height:      u32,
    fixtures:    Vec<Option<Fixture>>,
    robots:      Vec<Option<RobotId>>,
    robot_count: usize,
}

impl SpatialGrid {
    /// An empty floor with no fixtures and no robots.
    pub fn new(width: u32, height: u32) -> GridResult<Self> {
        if width == 0 || height == 0 {
            return Err(GridError::TooSmall { width, height, min: 1 });
        }
        let cells = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            fixtures:    vec![None; cells],
            robots:      vec![None; cells],
            robot_count: 0,
        })
    }

    /// A floor with every shelf and station of `layout` placed.
    pub fn from_layout(layout: &WarehouseLayout) -> GridResult<Self> {
        let mut grid = Self::new(layout.width, layout.height)?;
        for &pos in &layout.shelves {
            grid.place_fixture(pos, Fixture::Shelf)?;
        }
        for &pos in &layout.stations {
            grid.place_fixture(pos, Fixture::Station)?;
        }
        Ok(grid)
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    #[inline]
    fn index(&self, pos: GridPos) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Number of robots currently on the floor.
    #[inline]
    pub fn robot_count(&self) -> usize {
        self.robot_count
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn fixture_at(&self, pos: GridPos) -> Option<Fixture> {
        self.index(pos).and_then(|i| self.fixtures[i])
    }

    pub fn robot_at(&self, pos: GridPos) -> Option<RobotId> {
        self.index(pos).and_then(|i| self.robots[i])
    }

    /// Everything standing on `pos`: the fixture first, then the robot.
    /// Empty for out-of-bounds positions.
    pub fn occupants_at(&self, pos: GridPos) -> Vec<Occupant> {
        let Some(i) = self.index(pos) else {
            return vec![];
        };
        self.fixtures[i]
            .map(Occupant::Fixture)
            .into_iter()
            .chain(self.robots[i].map(Occupant::Robot))
            .collect()
    }

    /// `true` if `pos` is in bounds and holds no robot other than `robot`.
    /// Fixtures never block.
    #[inline]
    pub fn is_free_for(&self, pos: GridPos, robot: RobotId) -> bool {
        match self.index(pos) {
            None    => false,
            Some(i) => self.robots[i].is_none_or(|other| other == robot),
        }
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Place a static fixture.  Only used while building the floor.
    pub fn place_fixture(&mut self, pos: GridPos, fixture: Fixture) -> GridResult<()> {
        let i = self.index(pos).ok_or(GridError::OutOfBounds(pos))?;
        if self.fixtures[i].is_some() {
            return Err(GridError::FixtureConflict(pos));
        }
        self.fixtures[i] = Some(fixture);
        Ok(())
    }

    /// Put `robot` on `pos` for the first time.
    pub fn place_robot(&mut self, robot: RobotId, pos: GridPos) -> GridResult<()> {
        let i = self.index(pos).ok_or(GridError::OutOfBounds(pos))?;
        if self.robots[i].is_some() {
            return Err(GridError::Occupied(pos));
        }
        self.robots[i] = Some(robot);
        self.robot_count += 1;
        Ok(())
    }

    /// Move `robot` from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Callers check [`is_free_for`](Self::is_free_for) before moving, so a
    /// failure here means the step loop's bookkeeping is broken: `robot` is
    /// not recorded at `from`, `to` is out of bounds, or `to` holds another
    /// robot.
    pub fn move_robot(&mut self, robot: RobotId, from: GridPos, to: GridPos) {
        let src = self.index(from).unwrap_or_else(|| panic!("{robot} moved from off-grid {from}"));
        let dst = self.index(to).unwrap_or_else(|| panic!("{robot} moved to off-grid {to}"));
        assert_eq!(self.robots[src], Some(robot), "{robot} is not recorded at {from}");
        assert!(
            self.robots[dst].is_none(),
            "{robot} moved onto {to}, already held by {:?}",
            self.robots[dst]
        );
        self.robots[src] = None;
        self.robots[dst] = Some(robot);
    }
}
