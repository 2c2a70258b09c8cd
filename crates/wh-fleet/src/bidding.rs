//! Scores robots use to compete for orders.  Lower is better in both.

use crate::{Robot, Task};

/// Robots at or below this charge sit out auctions.
pub const AUCTION_MIN_BATTERY: f64 = 30.0;
/// Robots at or below this charge are skipped by the central planner.
pub const CENTRALIZED_MIN_BATTERY: f64 = 20.0;

/// Penalty added to an auction bid by a robot that is not idle.
const BUSY_BID_PENALTY: f64 = 5.0;

/// Weights of the centralized cost function.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostWeights {
    /// Weight of the battery-depletion term `1 − battery / capacity`.
    pub alpha: f64,
    /// Weight of the busy term (1 when not idle).
    pub beta:  f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self { alpha: 0.1, beta: 1.0 }
    }
}

impl Robot {
    /// Cells to the pickup plus cells from pickup to delivery.
    pub fn trip_length(&self, task: &Task) -> u32 {
        self.pos.manhattan(task.pickup) + task.pickup.manhattan(task.delivery)
    }

    /// Contract-net bid: `trip × batteryFactor + statePenalty`.
    pub fn auction_bid(&self, task: &Task) -> f64 {
        let battery_factor = if self.battery > AUCTION_MIN_BATTERY { 1.0 } else { 2.0 };
        let state_penalty = if self.is_idle() { 0.0 } else { BUSY_BID_PENALTY };
        self.trip_length(task) as f64 * battery_factor + state_penalty
    }

    /// Central planner cost:
    /// `trip + α·(1 − battery/capacity) + β·busy`.
    pub fn centralized_cost(&self, task: &Task, weights: CostWeights) -> f64 {
        let busy = if self.is_idle() { 0.0 } else { 1.0 };
        self.trip_length(task) as f64
            + weights.alpha * (1.0 - self.battery / self.capacity)
            + weights.beta * busy
    }
}
