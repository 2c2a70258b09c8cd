//! Read-only copies of the world for renderers and inspectors.

use wh_core::{GridPos, OrderId, RobotId, Tick};
use wh_dispatch::Order;
use wh_fleet::{Robot, RobotState};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobotView {
    pub id:      RobotId,
    pub pos:     GridPos,
    pub state:   RobotState,
    pub battery: f64,
    pub target:  Option<GridPos>,
    pub order:   Option<OrderId>,
}

impl From<&Robot> for RobotView {
    fn from(r: &Robot) -> Self {
        Self {
            id:      r.id,
            pos:     r.pos,
            state:   r.state,
            battery: r.battery,
            target:  r.target,
            order:   r.task.map(|t| t.order),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderView {
    pub id:        OrderId,
    pub pickup:    GridPos,
    pub delivery:  GridPos,
    pub assigned:  bool,
    pub completed: bool,
}

impl From<&Order> for OrderView {
    fn from(o: &Order) -> Self {
        Self {
            id:        o.id,
            pickup:    o.pickup,
            delivery:  o.delivery,
            assigned:  o.assigned,
            completed: o.completed,
        }
    }
}

/// The whole floor at one tick boundary.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldSnapshot {
    /// The next tick to be processed.
    pub tick:     Tick,
    pub width:    u32,
    pub height:   u32,
    pub robots:   Vec<RobotView>,
    pub shelves:  Vec<GridPos>,
    pub stations: Vec<GridPos>,
    pub orders:   Vec<OrderView>,
}
