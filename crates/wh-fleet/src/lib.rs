//! `wh-fleet` — the robots.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`robot`]    | `Robot`, `RobotState`, `Task`, `RobotCounters`, `TickOutcome` |
//! | [`movement`] | One-cell greedy step with blocking and sidestep               |
//! | [`bidding`]  | Auction bid and centralized cost functions, `CostWeights`     |
//! | [`fleet`]    | `Fleet` (robots) and `RobotRngs` (per-robot RNG)              |
//!
//! # State machine (one call to [`Robot::advance`] per tick)
//!
//! ```text
//!            battery < 20 (any non-Broken state)
//!   ┌──────────────────────────────────────────────┐
//!   ▼                                              │
//! Recharging ──battery ≥ 80──▶ Idle ──assign──▶ MovingToPickup
//!                               ▲                     │ at pickup
//!                               │                     ▼
//!                               └──at delivery── MovingToDelivery
//!
//! Broken: entered only through Robot::break_down, never left.
//! ```
//!
//! Robots never touch the order book.  `advance` reports what happened in a
//! [`TickOutcome`] and the step loop applies it.

pub mod bidding;
pub mod fleet;
pub mod movement;
pub mod robot;


pub use bidding::CostWeights;
pub use fleet::{Fleet, RobotRngs};
pub use movement::StepResult;
pub use robot::{Robot, RobotCounters, RobotState, Task, TickOutcome};
