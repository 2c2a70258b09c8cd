//! The order entity.

use wh_core::{GridPos, OrderId, RobotId, Tick};
use wh_fleet::Task;

/// Where an order is in its lifecycle.  Only ever moves forward:
/// `Pending → Assigned → Completed`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderStatus {
    Pending,
    Assigned,
    Completed,
}

/// A pickup-and-deliver job.  Never removed once created.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    pub id:           OrderId,
    /// Always a shelf cell.
    pub pickup:       GridPos,
    /// Always a packing-station cell.
    pub delivery:     GridPos,
    pub assigned:     bool,
    pub completed:    bool,
    pub assigned_to:  Option<RobotId>,
    pub announced_at: Tick,
    /// Set once, when the order is delivered.
    pub completed_at: Option<Tick>,
}

impl Order {
    pub fn status(&self) -> OrderStatus {
        match (self.assigned, self.completed) {
            (_, true)      => OrderStatus::Completed,
            (true, false)  => OrderStatus::Assigned,
            (false, false) => OrderStatus::Pending,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        !self.assigned && !self.completed
    }

    /// The robot-side view of this order.
    pub fn task(&self) -> Task {
        Task {
            order:    self.id,
            pickup:   self.pickup,
            delivery: self.delivery,
        }
    }

    /// Ticks from announcement to delivery; `None` until completed.
    pub fn completion_delay(&self) -> Option<u64> {
        self.completed_at.map(|done| done.since(self.announced_at))
    }
}
