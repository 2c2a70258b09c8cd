//! Greedy self-selection.

use tracing::debug;

use wh_core::OrderId;
use wh_fleet::Robot;

use crate::{Dispatcher, Mechanism, OrderBook};

/// No coordinator: each robot that ends its turn idle claims the pending
/// order whose pickup is nearest to it (Manhattan; ties to the oldest order).
#[derive(Copy, Clone, Debug, Default)]
pub struct GreedyDispatcher;

impl Dispatcher for GreedyDispatcher {
    fn mechanism(&self) -> Mechanism {
        Mechanism::Greedy
    }

    fn on_idle(&self, robot: &mut Robot, orders: &mut OrderBook) -> Option<OrderId> {
        let nearest = orders
            .pending()
            .min_by_key(|o| robot.pos.manhattan(o.pickup))?
            .id;
        let task = orders.assign(nearest, robot.id);
        robot.assign(task);
        debug!(robot = %robot.id, order = %nearest, "greedy self-assignment");
        Some(nearest)
    }
}
