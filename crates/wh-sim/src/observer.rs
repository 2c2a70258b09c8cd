//! Simulation observer trait for progress reporting and data collection.

use wh_core::{OrderId, RobotId, Tick};
use wh_dispatch::Order;

use crate::{Metrics, RunSummary};

/// Callbacks invoked by the step loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — completion logger
///
/// ```rust,ignore
/// struct Deliveries(Vec<(Tick, OrderId)>);
///
/// impl SimObserver for Deliveries {
///     fn on_order_completed(&mut self, tick: Tick, order: &Order) {
///         self.0.push((tick, order.id));
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called when a robot drops an order at its station.
    fn on_order_completed(&mut self, _tick: Tick, _order: &Order) {}

    /// Called when a robot breaks, either at the scheduled failure tick or
    /// through [`Sim::fail_robot_with`](crate::Sim::fail_robot_with).  `lost`
    /// is the order it was carrying, which nobody will deliver.
    fn on_robot_failed(&mut self, _tick: Tick, _robot: RobotId, _lost: Option<OrderId>) {}

    /// Called at the end of each tick with the freshly computed metrics.
    fn on_tick_end(&mut self, _tick: Tick, _metrics: &Metrics) {}

    /// Called once by [`Sim::run`](crate::Sim::run) after the final tick.
    fn on_sim_end(&mut self, _final_tick: Tick, _summary: &RunSummary) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
