//! `wh-sim` — the warehouse step loop.
//!
//! # One tick
//!
//! ```text
//! for tick in 0..config.max_steps (or until stop()):
//!   ① Generate  — at most one new order (fixed count or probabilistic).
//!   ② Failure   — at tick == robot_failure_step, one random working robot
//!                 breaks for good.
//!   ③ Allocate  — Dispatcher::allocate (auction / centralized rounds).
//!   ④ Robots    — every robot advances once, in a fresh random permutation:
//!                   delivered  → order completed at this tick
//!                   abandoned  → order stays assigned forever (logged)
//!                   idle       → Dispatcher::on_idle (greedy self-selection)
//!   ⑤ Clock     — advance; recompute metrics; append to the history window.
//! ```
//!
//! Every random draw comes from the simulation's `SimRng` or the robots' own
//! `RobotRng`s, all seeded from `config.seed`.  Same config, same run.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                        |
//! |------------|---------------------------------------------------------------|
//! | `parallel` | [`compare_mechanisms`] runs its simulations on Rayon's pool.  |
//! | `serde`    | Serialize/deserialize config, snapshots, and metrics.         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wh_sim::{NoopObserver, ScenarioPreset, SimBuilder};
//!
//! let config = ScenarioPreset::HeavyLoad.config();
//! let mut sim = SimBuilder::new(config).build()?;
//! let summary = sim.run(&mut NoopObserver);
//! println!("{} orders in {} ticks", summary.metrics.orders_completed, summary.metrics.step);
//! ```

pub mod batch;
pub mod builder;
pub mod config;
pub mod error;
pub mod history;
pub mod metrics;
pub mod observer;
pub mod sim;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use batch::{RunReport, compare_mechanisms, run_to_end};
pub use builder::SimBuilder;
pub use config::{ScenarioPreset, WarehouseConfig};
pub use error::{SimError, SimResult};
pub use history::MetricsHistory;
pub use metrics::{Metrics, RunSummary};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use snapshot::{OrderView, RobotView, WorldSnapshot};
