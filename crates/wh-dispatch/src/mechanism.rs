//! Mechanism selection.

use std::fmt;
use std::str::FromStr;

use wh_core::{OrderId, Tick};
use wh_fleet::Robot;

use crate::{
    AuctionDispatcher, CentralizedDispatcher, DispatchError, Dispatcher, GreedyDispatcher,
    OrderBook,
};

/// The three built-in allocation mechanisms.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mechanism {
    /// Contract-net auction.
    Cnp,
    Greedy,
    Centralized,
}

impl Mechanism {
    pub const ALL: [Mechanism; 3] = [Mechanism::Cnp, Mechanism::Greedy, Mechanism::Centralized];

    pub fn as_str(self) -> &'static str {
        match self {
            Mechanism::Cnp         => "cnp",
            Mechanism::Greedy      => "greedy",
            Mechanism::Centralized => "centralized",
        }
    }

    /// Human-readable name for reports.
    pub fn description(self) -> &'static str {
        match self {
            Mechanism::Cnp         => "Contract Negotiation Protocol",
            Mechanism::Greedy      => "Greedy Assignment",
            Mechanism::Centralized => "Centralized Planner",
        }
    }

    /// The stock dispatcher for this mechanism.
    pub fn dispatcher(self) -> MechanismDispatcher {
        match self {
            Mechanism::Cnp         => MechanismDispatcher::Auction(AuctionDispatcher),
            Mechanism::Greedy      => MechanismDispatcher::Greedy(GreedyDispatcher),
            Mechanism::Centralized => {
                MechanismDispatcher::Centralized(CentralizedDispatcher::default())
            }
        }
    }
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mechanism {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cnp" | "auction"  => Ok(Mechanism::Cnp),
            "greedy"           => Ok(Mechanism::Greedy),
            "centralized"      => Ok(Mechanism::Centralized),
            _ => Err(DispatchError::UnknownMechanism(s.to_string())),
        }
    }
}

// ── MechanismDispatcher ───────────────────────────────────────────────────────

/// Closed set of the built-in dispatchers, so a simulation can pick one at
/// runtime without boxing.
#[derive(Copy, Clone, Debug)]
pub enum MechanismDispatcher {
    Auction(AuctionDispatcher),
    Greedy(GreedyDispatcher),
    Centralized(CentralizedDispatcher),
}

impl Dispatcher for MechanismDispatcher {
    fn mechanism(&self) -> Mechanism {
        match self {
            MechanismDispatcher::Auction(d)     => d.mechanism(),
            MechanismDispatcher::Greedy(d)      => d.mechanism(),
            MechanismDispatcher::Centralized(d) => d.mechanism(),
        }
    }

    fn allocate(&self, tick: Tick, robots: &mut [Robot], orders: &mut OrderBook) -> usize {
        match self {
            MechanismDispatcher::Auction(d)     => d.allocate(tick, robots, orders),
            MechanismDispatcher::Greedy(d)      => d.allocate(tick, robots, orders),
            MechanismDispatcher::Centralized(d) => d.allocate(tick, robots, orders),
        }
    }

    fn on_idle(&self, robot: &mut Robot, orders: &mut OrderBook) -> Option<OrderId> {
        match self {
            MechanismDispatcher::Auction(d)     => d.on_idle(robot, orders),
            MechanismDispatcher::Greedy(d)      => d.on_idle(robot, orders),
            MechanismDispatcher::Centralized(d) => d.on_idle(robot, orders),
        }
    }
}
