//! `wh-core` — foundational types for the warehouse fleet simulator.
//!
//! This crate is a dependency of every other `wh-*` crate.  It has no `wh-*`
//! dependencies and a single required external one (`rand`), plus optional
//! `serde`.
//!
//! # What lives here
//!
//! | Module   | Contents                                                   |
//! |----------|------------------------------------------------------------|
//! | [`ids`]  | `RobotId`, `OrderId`                                       |
//! | [`pos`]  | `GridPos`, Manhattan distance, cardinal neighbours         |
//! | [`time`] | `Tick`, `SimClock`                                         |
//! | [`rng`]  | `RobotRng` (per-robot), `SimRng` (per-simulation)          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod ids;
pub mod pos;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::{OrderId, RobotId};
pub use pos::GridPos;
pub use rng::{RobotRng, SimRng};
pub use time::{SimClock, Tick};
