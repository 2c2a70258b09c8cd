//! `wh-grid` — the warehouse floor.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`grid`]     | `SpatialGrid` — bounds, fixture map, robot occupancy      |
//! | [`occupant`] | `Occupant`, `Fixture`, `Capabilities`                     |
//! | [`layout`]   | `WarehouseLayout` — shelf and packing-station placement   |
//! | [`error`]    | `GridError`, `GridResult<T>`                              |
//!
//! # Occupancy rule
//!
//! Shelves and stations are placed once and never move.  They share their cell
//! with at most one robot.  Robots are exclusive: after a tick settles no two
//! robots hold the same cell.  The grid is only ever mutated from the single
//! threaded step loop, so there is no locking.

pub mod error;
pub mod grid;
pub mod layout;
pub mod occupant;


pub use error::{GridError, GridResult};
pub use grid::SpatialGrid;
pub use layout::WarehouseLayout;
pub use occupant::{Capabilities, Fixture, Occupant};
