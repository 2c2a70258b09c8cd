//! Centralized planner.

use tracing::debug;

use wh_core::Tick;
use wh_fleet::bidding::CENTRALIZED_MIN_BATTERY;
use wh_fleet::{CostWeights, Robot};

use crate::dispatcher::lowest;
use crate::{Dispatcher, Mechanism, OrderBook};

/// Ticks between planning rounds.
const PLAN_INTERVAL: u64 = 2;

/// Every second tick the planner walks the pending orders oldest first and
/// gives each to the idle robot (battery above 20) with the lowest
/// [`centralized_cost`](Robot::centralized_cost).
///
/// This is one greedy pass, not an optimal matching: an early order can take
/// the robot a later order needed more.  Only idle robots are scored, so the
/// `beta` busy term of the cost is always zero here.
#[derive(Copy, Clone, Debug, Default)]
pub struct CentralizedDispatcher {
    pub weights: CostWeights,
}

impl Dispatcher for CentralizedDispatcher {
    fn mechanism(&self) -> Mechanism {
        Mechanism::Centralized
    }

    fn allocate(&self, tick: Tick, robots: &mut [Robot], orders: &mut OrderBook) -> usize {
        if !tick.is_multiple_of(PLAN_INTERVAL) {
            return 0;
        }

        let mut assigned = 0;
        for id in orders.pending_ids() {
            let Some(task) = orders.get(id).map(|o| o.task()) else {
                continue;
            };
            let costs = robots
                .iter()
                .enumerate()
                .filter(|(_, r)| r.is_idle() && r.battery > CENTRALIZED_MIN_BATTERY)
                .map(|(i, r)| (i, r.centralized_cost(&task, self.weights)));
            let Some((best, cost)) = lowest(costs) else {
                continue;
            };

            let robot = &mut robots[best];
            robot.assign(orders.assign(id, robot.id));
            debug!(order = %id, robot = %robot.id, cost, %tick, "planner assignment");
            assigned += 1;
        }
        assigned
    }
}
