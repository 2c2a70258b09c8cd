//! Fleet storage: robots and their RNGs side by side.
//!
//! # Why two structs?
//!
//! A robot's turn needs `&mut Robot` and `&mut RobotRng` at once, and the
//! allocation mechanisms need `&mut [Robot]` without any RNG.  Keeping the
//! RNGs in their own `RobotRngs` lets both borrows coexist as disjoint
//! fields of [`Fleet`].

use wh_core::{GridPos, RobotId, RobotRng};
use wh_grid::SpatialGrid;

use crate::{Robot, TickOutcome};

// ── RobotRngs ─────────────────────────────────────────────────────────────────

/// Per-robot deterministic RNG state, indexed by `RobotId`.
pub struct RobotRngs {
    pub inner: Vec<RobotRng>,
}

impl RobotRngs {
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| RobotRng::new(global_seed, RobotId(i)))
            .collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, robot: RobotId) -> &mut RobotRng {
        &mut self.inner[robot.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── Fleet ─────────────────────────────────────────────────────────────────────

/// Every robot in the simulation.  `robots[i].id == RobotId(i)`.
pub struct Fleet {
    pub robots: Vec<Robot>,
    pub rngs:   RobotRngs,
}

impl Fleet {
    /// One fully charged idle robot per entry of `positions`.
    ///
    /// Placing them on the grid is the caller's job.
    pub fn new(positions: &[GridPos], capacity: f64, seed: u64) -> Self {
        let robots = positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| Robot::new(RobotId(i as u32), pos, capacity))
            .collect();
        Self {
            robots,
            rngs: RobotRngs::new(positions.len(), seed),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.robots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.robots.is_empty()
    }

    pub fn get(&self, id: RobotId) -> Option<&Robot> {
        self.robots.get(id.index())
    }

    pub fn get_mut(&mut self, id: RobotId) -> Option<&mut Robot> {
        self.robots.get_mut(id.index())
    }

    /// Run one robot's turn.
    pub fn advance(&mut self, id: RobotId, grid: &mut SpatialGrid) -> TickOutcome {
        let robot = &mut self.robots[id.index()];
        let rng = self.rngs.get_mut(id);
        robot.advance(grid, rng)
    }
}
