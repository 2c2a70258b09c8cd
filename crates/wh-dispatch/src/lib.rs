//! `wh-dispatch` — orders and who gets them.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`order`]       | `Order`, `OrderStatus`                                      |
//! | [`book`]        | `OrderBook` — the canonical order list                      |
//! | [`generator`]   | `OrderGenerator`, `OrderMode`, `Clustering`                 |
//! | [`dispatcher`]  | `Dispatcher` trait                                          |
//! | [`greedy`]      | `GreedyDispatcher` — idle robots grab the nearest order     |
//! | [`auction`]     | `AuctionDispatcher` — contract-net lowest bid wins          |
//! | [`centralized`] | `CentralizedDispatcher` — per-order minimum-cost assignment |
//! | [`mechanism`]   | `Mechanism` selector, `MechanismDispatcher`                 |
//! | [`error`]       | `DispatchError`, `DispatchResult<T>`                        |
//!
//! # Seams
//!
//! A [`Dispatcher`] gets two hooks from the step loop:
//!
//! 1. `allocate`: once per tick, before any robot moves, with mutable access
//!    to every robot and the order book (auction and centralized rounds).
//! 2. `on_idle`: after a robot's turn ends idle, with that robot only
//!    (greedy self-selection).  Robots are visited in the tick's activation
//!    order, so the first idle robot to look wins.
//!
//! Every mechanism only ever considers orders that are neither assigned nor
//! completed.  Finding no eligible robot is not an error; the order simply
//! waits for a later round.

pub mod auction;
pub mod book;
pub mod centralized;
pub mod dispatcher;
pub mod error;
pub mod generator;
pub mod greedy;
pub mod mechanism;
pub mod order;


pub use auction::AuctionDispatcher;
pub use book::OrderBook;
pub use centralized::CentralizedDispatcher;
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, DispatchResult};
pub use generator::{Clustering, OrderGenerator, OrderMode};
pub use greedy::GreedyDispatcher;
pub use mechanism::{Mechanism, MechanismDispatcher};
pub use order::{Order, OrderStatus};
