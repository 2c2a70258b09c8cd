//! The `Dispatcher` trait: the allocation extension point.

use wh_core::{OrderId, Tick};
use wh_fleet::Robot;

use crate::{Mechanism, OrderBook};

/// A task-allocation mechanism.
///
/// Both hooks have no-op defaults; a mechanism implements whichever one it
/// runs on.  Implementations hold configuration only, never per-run state,
/// so one dispatcher value may be shared by simulations on other threads.
pub trait Dispatcher: Send + Sync + 'static {
    /// Which mechanism this is (reported in metrics).
    fn mechanism(&self) -> Mechanism;

    /// Coordinator round, called once per tick before robots act.
    ///
    /// `robots[i].id == RobotId(i)`.  Returns the number of orders assigned.
    fn allocate(&self, _tick: Tick, _robots: &mut [Robot], _orders: &mut OrderBook) -> usize {
        0
    }

    /// Called when `robot` ends its turn idle.  Returns the order it took,
    /// if any.
    fn on_idle(&self, _robot: &mut Robot, _orders: &mut OrderBook) -> Option<OrderId> {
        None
    }
}

/// Index and score of the lowest score; ties go to the earliest entry.
pub(crate) fn lowest(scores: impl Iterator<Item = (usize, f64)>) -> Option<(usize, f64)> {
    scores.fold(None, |best, (i, score)| match best {
        Some((_, b)) if b <= score => best,
        _ => Some((i, score)),
    })
}
