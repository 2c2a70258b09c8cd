//! The `Sim` struct and its step loop.

use tracing::{debug, info, warn};

use wh_core::{OrderId, RobotId, SimClock, SimRng, Tick};
use wh_dispatch::{Dispatcher, MechanismDispatcher, OrderBook, OrderGenerator};
use wh_fleet::Fleet;
use wh_grid::{SpatialGrid, WarehouseLayout};

use crate::{
    Metrics, MetricsHistory, NoopObserver, RunSummary, SimError, SimObserver, SimResult,
    WarehouseConfig, WorldSnapshot,
};

/// One warehouse simulation.
///
/// `Sim<D>` owns the robots, the order book, and the floor.  Dispatchers and
/// robots only ever see borrowed handles for the duration of a call.
///
/// Create via [`SimBuilder`](crate::SimBuilder).
pub struct Sim<D: Dispatcher = MechanismDispatcher> {
    /// Run configuration.
    pub config: WarehouseConfig,

    /// `current_tick` is the next tick to process.
    pub clock: SimClock,

    /// Shelf and station positions.
    pub layout: WarehouseLayout,

    /// Cell occupancy.
    pub grid: SpatialGrid,

    /// Robots and their RNGs.  `fleet.robots[i].id == RobotId(i)`.
    pub fleet: Fleet,

    /// Every order ever generated.
    pub orders: OrderBook,

    pub generator: OrderGenerator,

    pub dispatcher: D,

    pub(crate) rng:        SimRng,
    pub(crate) running:    bool,
    pub(crate) metrics:    Metrics,
    pub(crate) history:    MetricsHistory,
    /// Reused per-tick activation order.
    pub(crate) activation: Vec<RobotId>,
}

impl<D: Dispatcher> Sim<D> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Step until `max_steps` ticks are done or [`stop`](Self::stop) is
    /// called, then report the final metrics.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> RunSummary {
        while self.running {
            self.step_with(observer);
        }
        let summary = self.summary();
        info!(
            mechanism = summary.mechanism.description(),
            ticks = summary.metrics.step,
            completed = summary.metrics.orders_completed,
            generated = summary.metrics.orders_generated,
            throughput = summary.metrics.throughput,
            "simulation finished"
        );
        observer.on_sim_end(self.clock.current_tick, &summary);
        summary
    }

    /// Process exactly `n` ticks from the current position, ignoring both
    /// `max_steps` and the running flag.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step_with(observer);
        }
    }

    /// Advance exactly one tick.
    pub fn step(&mut self) {
        self.step_with(&mut NoopObserver);
    }

    /// Advance exactly one tick, reporting to `observer`.
    pub fn step_with<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        self.process_tick(now, observer);

        self.clock.advance();
        self.metrics = Metrics::compute(self.clock.elapsed(), &self.fleet.robots, &self.orders);
        self.history.push(self.metrics.clone());
        if self.clock.is_finished() {
            self.running = false;
        }
        observer.on_tick_end(now, &self.metrics);
    }

    /// `true` until `max_steps` ticks are done or [`stop`](Self::stop) is
    /// called.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Clear the running flag; [`run`](Self::run) returns after the current
    /// tick.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Break `robot` now.  Returns the order it was carrying, which stays
    /// assigned and is never delivered.  Failing a broken robot is a no-op.
    pub fn fail_robot(&mut self, robot: RobotId) -> SimResult<Option<OrderId>> {
        self.fail_robot_with(robot, &mut NoopObserver)
    }

    /// [`fail_robot`](Self::fail_robot), reporting the failure to `observer`.
    pub fn fail_robot_with<O: SimObserver>(
        &mut self,
        robot:    RobotId,
        observer: &mut O,
    ) -> SimResult<Option<OrderId>> {
        let now = self.clock.current_tick;
        let r = self.fleet.get_mut(robot).ok_or(SimError::UnknownRobot(robot))?;
        if r.is_broken() {
            return Ok(None);
        }
        let lost = r.break_down();
        warn!(%robot, lost = ?lost, %now, "robot failed");
        observer.on_robot_failed(now, robot, lost);
        Ok(lost)
    }

    /// Metrics as of the last completed tick.
    #[inline]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The most recent per-tick metrics.
    #[inline]
    pub fn history(&self) -> &MetricsHistory {
        &self.history
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            mechanism: self.dispatcher.mechanism(),
            metrics:   self.metrics.clone(),
        }
    }

    /// Copy of every robot, fixture, and order.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick:     self.clock.current_tick,
            width:    self.grid.width(),
            height:   self.grid.height(),
            robots:   self.fleet.robots.iter().map(Into::into).collect(),
            shelves:  self.layout.shelves.clone(),
            stations: self.layout.stations.clone(),
            orders:   self.orders.iter().map(Into::into).collect(),
        }
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        // ── ① Order generation ────────────────────────────────────────────
        self.generator.generate(now, &mut self.rng, &mut self.orders);

        // ── ② Scheduled failure ───────────────────────────────────────────
        if self.config.robot_failure_step == Some(now.0) {
            self.break_random_robot(now, observer);
        }

        // ── ③ Coordinator round ───────────────────────────────────────────
        let assigned = self.dispatcher.allocate(now, &mut self.fleet.robots, &mut self.orders);
        if assigned > 0 {
            debug!(%now, assigned, "allocation round");
        }

        // ── ④ Robot turns ─────────────────────────────────────────────────
        //
        // A fresh permutation each tick.  Moves commit immediately, so a
        // robot activated later sees the cells vacated and taken by earlier
        // ones; the permutation doubles as the conflict-resolution order.
        let mut order = std::mem::take(&mut self.activation);
        order.clear();
        order.extend((0..self.fleet.len()).map(|i| RobotId(i as u32)));
        self.rng.shuffle(&mut order);

        for &id in &order {
            let outcome = self.fleet.advance(id, &mut self.grid);

            if let Some(done) = outcome.delivered {
                self.orders.complete(done, now);
                debug!(robot = %id, order = %done, %now, "order delivered");
                if let Some(o) = self.orders.get(done) {
                    observer.on_order_completed(now, o);
                }
            }
            if let Some(dropped) = outcome.abandoned {
                warn!(robot = %id, order = %dropped, %now, "low battery, order abandoned");
            }
            if outcome.ready_for_task {
                let robot = &mut self.fleet.robots[id.index()];
                self.dispatcher.on_idle(robot, &mut self.orders);
            }
        }
        self.activation = order;
    }

    fn break_random_robot<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        let working: Vec<RobotId> = self
            .fleet
            .robots
            .iter()
            .filter(|r| !r.is_broken())
            .map(|r| r.id)
            .collect();
        let Some(&victim) = self.rng.choose(&working) else {
            return;
        };
        let robot = &mut self.fleet.robots[victim.index()];
        let lost = robot.break_down();
        warn!(robot = %victim, lost = ?lost, %now, "scheduled robot failure");
        observer.on_robot_failed(now, victim, lost);
    }
}
