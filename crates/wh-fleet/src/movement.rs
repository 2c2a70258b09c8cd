//! One-cell greedy movement.
//!
//! Each tick a moving robot tries, in order:
//!
//! 1. The in-bounds cardinal neighbours sorted by Manhattan distance to the
//!    target (stable: +x, −x, +y, −y on ties).  First one without another
//!    robot wins.
//! 2. Nothing free: count a soft conflict.  After three consecutive blocked
//!    ticks, shuffle the four neighbours and take the first free one.
//! 3. Still nothing: count a hard block and wait.
//!
//! There is no lookahead.  A robot may step away from its target when the
//! better cells are taken, and congested robots can circle indefinitely.

use tracing::trace;

use wh_core::{GridPos, RobotRng};
use wh_grid::SpatialGrid;

use crate::robot::{MOVE_COST, Robot};

/// Consecutive blocked ticks before a random sidestep is tried.
pub const SIDESTEP_AFTER: u32 = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// Already on the target; nothing happened.
    AtTarget,
    Moved(GridPos),
    Sidestepped(GridPos),
    /// Blocked, streak still below the sidestep threshold.
    Blocked,
    /// Blocked and the sidestep failed too.
    HardBlocked,
}

impl Robot {
    /// Attempt one cell of progress toward `target`.
    pub fn step_towards(
        &mut self,
        target: GridPos,
        grid:   &mut SpatialGrid,
        rng:    &mut RobotRng,
    ) -> StepResult {
        if self.pos == target {
            return StepResult::AtTarget;
        }

        let mut candidates: Vec<GridPos> = self
            .pos
            .neighbors()
            .into_iter()
            .filter(|&n| grid.in_bounds(n))
            .collect();
        candidates.sort_by_key(|n| n.manhattan(target));

        if let Some(next) = candidates.into_iter().find(|&n| grid.is_free_for(n, self.id)) {
            self.blocked_streak = 0;
            self.commit_move(next, grid);
            return StepResult::Moved(next);
        }

        self.counters.soft_conflicts += 1;
        self.blocked_streak += 1;
        if self.blocked_streak < SIDESTEP_AFTER {
            trace!(robot = %self.id, pos = %self.pos, streak = self.blocked_streak, "blocked");
            return StepResult::Blocked;
        }

        let mut sidesteps = self.pos.neighbors();
        rng.shuffle(&mut sidesteps);
        match sidesteps.into_iter().find(|&n| grid.is_free_for(n, self.id)) {
            Some(next) => {
                self.blocked_streak = 0;
                self.commit_move(next, grid);
                StepResult::Sidestepped(next)
            }
            None => {
                self.counters.hard_blocks += 1;
                trace!(robot = %self.id, pos = %self.pos, "hard block");
                StepResult::HardBlocked
            }
        }
    }

    fn commit_move(&mut self, next: GridPos, grid: &mut SpatialGrid) {
        grid.move_robot(self.id, self.pos, next);
        self.pos = next;
        self.counters.distance += 1;
        self.battery = (self.battery - MOVE_COST).max(0.0);
    }
}
