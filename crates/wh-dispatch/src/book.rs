//! `OrderBook` — the canonical list of every order ever generated.
//!
//! IDs are issued densely from 1, so `OrderId(n)` lives at index `n - 1`.
//! Status transitions go through [`assign`](OrderBook::assign) and
//! [`complete`](OrderBook::complete), which panic on any attempt to move an
//! order backwards or skip a state.

use wh_core::{GridPos, OrderId, RobotId, Tick};
use wh_fleet::Task;

use crate::{Order, OrderStatus};

#[derive(Clone, Debug, Default)]
pub struct OrderBook {
    orders:    Vec<Order>,
    completed: usize,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new pending order announced at `tick`.
    pub fn push(&mut self, pickup: GridPos, delivery: GridPos, tick: Tick) -> OrderId {
        let id = OrderId(self.orders.len() as u32 + 1);
        self.orders.push(Order {
            id,
            pickup,
            delivery,
            assigned:     false,
            completed:    false,
            assigned_to:  None,
            announced_at: tick,
            completed_at: None,
        });
        id
    }

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        id.index().checked_sub(1).and_then(|i| self.orders.get(i))
    }

    fn get_mut(&mut self, id: OrderId) -> &mut Order {
        match id.index().checked_sub(1).and_then(|i| self.orders.get_mut(i)) {
            Some(order) => order,
            None => panic!("{id} is not in the order book"),
        }
    }

    // ── Views ─────────────────────────────────────────────────────────────

    pub fn iter(&self) -> impl Iterator<Item = &Order> + '_ {
        self.orders.iter()
    }

    /// Orders neither assigned nor completed, in creation order.
    pub fn pending(&self) -> impl Iterator<Item = &Order> + '_ {
        self.orders.iter().filter(|o| o.is_pending())
    }

    pub fn pending_ids(&self) -> Vec<OrderId> {
        self.pending().map(|o| o.id).collect()
    }

    /// Total orders ever generated.
    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    #[inline]
    pub fn completed_count(&self) -> usize {
        self.completed
    }

    /// Orders not yet delivered (pending or assigned).
    #[inline]
    pub fn active_count(&self) -> usize {
        self.orders.len() - self.completed
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// `Pending → Assigned`.  Returns the task to hand to `robot`.
    ///
    /// # Panics
    /// Panics if the order is unknown or not pending.
    pub fn assign(&mut self, id: OrderId, robot: RobotId) -> Task {
        let order = self.get_mut(id);
        assert!(order.is_pending(), "{id} assigned to {robot} while {:?}", order.status());
        order.assigned = true;
        order.assigned_to = Some(robot);
        order.task()
    }

    /// `Assigned → Completed` at `tick`.
    ///
    /// # Panics
    /// Panics if the order is unknown, unassigned, or already completed.
    pub fn complete(&mut self, id: OrderId, tick: Tick) {
        let order = self.get_mut(id);
        assert!(
            order.status() == OrderStatus::Assigned,
            "{id} completed while {:?}",
            order.status()
        );
        order.completed = true;
        order.completed_at = Some(tick);
        self.completed += 1;
    }
}
