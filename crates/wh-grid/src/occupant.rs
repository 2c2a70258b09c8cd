//! What can stand on a cell.

use wh_core::RobotId;

/// A static fixture.  Placed at construction, never moved.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fixture {
    /// Storage shelf: every order's pickup is a shelf cell.
    Shelf,
    /// Packing station: every order's delivery is a station cell.
    Station,
}

/// Behavioural capabilities of an occupant kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Capabilities {
    /// Advanced by the step loop once per tick.
    pub moves_each_tick: bool,
    /// At most one occupant with this flag may hold a cell.
    pub occupies_exclusively: bool,
}

/// Anything found at a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Occupant {
    Robot(RobotId),
    Fixture(Fixture),
}

impl Occupant {
    pub fn capabilities(self) -> Capabilities {
        match self {
            Occupant::Robot(_) => Capabilities {
                moves_each_tick:      true,
                occupies_exclusively: true,
            },
            Occupant::Fixture(_) => Capabilities {
                moves_each_tick:      false,
                occupies_exclusively: false,
            },
        }
    }
}
