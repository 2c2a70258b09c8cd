//! Order generation.
//!
//! Two modes:
//!
//! - **Fixed**: one order per tick until `count` orders exist.
//! - **Probabilistic**: each tick, one order with probability `rate`.
//!
//! Pickups are drawn uniformly from the shelves, or from the shelves inside
//! the clustering box when clustering is on.  An empty box falls back to all
//! shelves.  Deliveries are drawn uniformly from the packing stations.

use tracing::debug;

use wh_core::{GridPos, OrderId, SimRng, Tick};
use wh_grid::WarehouseLayout;

use crate::{DispatchError, DispatchResult, OrderBook};

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderMode {
    Fixed { count: u32 },
    Probabilistic { rate: f64 },
}

/// Restrict pickups to shelves with `|dx| ≤ radius && |dy| ≤ radius` from
/// `center`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clustering {
    pub center: GridPos,
    pub radius: u32,
}

impl Clustering {
    /// Cluster around the middle of a `width` × `height` floor.
    pub fn centered(width: u32, height: u32, radius: u32) -> Self {
        Self {
            center: GridPos::new((width / 2) as i32, (height / 2) as i32),
            radius,
        }
    }
}

pub struct OrderGenerator {
    mode:      OrderMode,
    /// Shelves pickups are drawn from (the cluster subset, or all shelves).
    pickups:   Vec<GridPos>,
    stations:  Vec<GridPos>,
    generated: u32,
}

impl OrderGenerator {
    pub fn new(
        mode:       OrderMode,
        layout:     &WarehouseLayout,
        clustering: Option<Clustering>,
    ) -> DispatchResult<Self> {
        if let OrderMode::Probabilistic { rate } = mode {
            if !(0.0..=1.0).contains(&rate) {
                return Err(DispatchError::InvalidRate(rate));
            }
        }
        if layout.shelves.is_empty() {
            return Err(DispatchError::MissingFixtures("shelves"));
        }
        if layout.stations.is_empty() {
            return Err(DispatchError::MissingFixtures("stations"));
        }

        let clustered: Vec<GridPos> = match clustering {
            Some(c) => layout
                .shelves
                .iter()
                .copied()
                .filter(|s| s.within_box(c.center, c.radius))
                .collect(),
            None => Vec::new(),
        };
        let pickups = if clustered.is_empty() { layout.shelves.clone() } else { clustered };

        Ok(Self {
            mode,
            pickups,
            stations: layout.stations.clone(),
            generated: 0,
        })
    }

    /// Shelves a pickup can be drawn from.
    pub fn pickup_candidates(&self) -> &[GridPos] {
        &self.pickups
    }

    /// Orders generated so far.
    pub fn generated(&self) -> u32 {
        self.generated
    }

    /// Maybe create this tick's order.
    pub fn generate(
        &mut self,
        tick:  Tick,
        rng:   &mut SimRng,
        book:  &mut OrderBook,
    ) -> Option<OrderId> {
        let due = match self.mode {
            OrderMode::Fixed { count }        => self.generated < count,
            OrderMode::Probabilistic { rate } => rng.gen_bool(rate),
        };
        if !due {
            return None;
        }

        let pickup = *rng.choose(&self.pickups)?;
        let delivery = *rng.choose(&self.stations)?;
        self.generated += 1;
        let id = book.push(pickup, delivery, tick);
        debug!(order = %id, %pickup, %delivery, %tick, "order generated");
        Some(id)
    }
}
