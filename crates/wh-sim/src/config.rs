//! Run configuration and the stock experiment presets.

use wh_core::GridPos;
use wh_dispatch::{Clustering, DispatchError, Mechanism, OrderMode};
use wh_fleet::robot::{DEFAULT_CAPACITY, RECHARGED};
use wh_grid::WarehouseLayout;

use crate::{SimError, SimResult};

/// Everything needed to build one simulation.  Read-only once the simulation
/// exists.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WarehouseConfig {
    pub num_robots: u32,

    pub grid_width: u32,

    pub grid_height: u32,

    pub mechanism: Mechanism,

    pub order_mode: OrderMode,

    /// Ticks to simulate.  The run stops once `max_steps` ticks are done.
    pub max_steps: u64,

    /// Tick at which one random working robot breaks down.
    pub robot_failure_step: Option<u64>,

    /// Restrict order pickups to a box of shelves.  The centre may lie off
    /// the floor; a box holding no shelf falls back to all shelves.
    pub clustering: Option<Clustering>,

    /// Per-robot battery capacity.  Must be at least the recharge target
    /// (80), or a recharging robot would never return to work.
    pub battery_capacity: f64,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Number of per-tick metrics entries kept in memory.
    pub history_window: usize,
}

impl Default for WarehouseConfig {
    /// The "Custom" preset: 5 robots, 20 × 20, 200 ticks, 20 fixed orders,
    /// contract-net allocation.
    fn default() -> Self {
        Self {
            num_robots:         5,
            grid_width:         20,
            grid_height:        20,
            mechanism:          Mechanism::Cnp,
            order_mode:         OrderMode::Fixed { count: 20 },
            max_steps:          200,
            robot_failure_step: None,
            clustering:         None,
            battery_capacity:   DEFAULT_CAPACITY,
            seed:               42,
            history_window:     100,
        }
    }
}

impl WarehouseConfig {
    /// Same config under another mechanism.
    pub fn with_mechanism(&self, mechanism: Mechanism) -> Self {
        Self { mechanism, ..self.clone() }
    }

    /// Check every field and compute the layout the run will use.
    pub fn validate(&self) -> SimResult<WarehouseLayout> {
        let layout = WarehouseLayout::generate(self.grid_width, self.grid_height)?;
        if layout.shelves.is_empty() {
            return Err(SimError::Config(format!(
                "a {}x{} floor has no shelves",
                self.grid_width, self.grid_height
            )));
        }

        if self.num_robots == 0 {
            return Err(SimError::Config("num_robots must be at least 1".into()));
        }
        let free = layout.free_cell_count();
        if self.num_robots as usize > free {
            return Err(SimError::Config(format!(
                "{} robots do not fit on {} free cells",
                self.num_robots, free
            )));
        }

        if let OrderMode::Probabilistic { rate } = self.order_mode {
            if !(0.0..=1.0).contains(&rate) {
                return Err(DispatchError::InvalidRate(rate).into());
            }
        }

        if self.max_steps == 0 {
            return Err(SimError::Config("max_steps must be at least 1".into()));
        }

        if !self.battery_capacity.is_finite() || self.battery_capacity < RECHARGED {
            return Err(SimError::Config(format!(
                "battery_capacity {} is below the recharge target {RECHARGED}",
                self.battery_capacity
            )));
        }

        if self.history_window == 0 {
            return Err(SimError::Config("history_window must be at least 1".into()));
        }

        Ok(layout)
    }
}

// ── Presets ───────────────────────────────────────────────────────────────────

/// The experiment scenarios.  Each maps to a [`WarehouseConfig`] that differs
/// from the default only where named.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScenarioPreset {
    LightLoad,
    MediumLoad,
    HeavyLoad,
    RobotFailure,
    ClusteredOrders,
    DynamicOrders,
    CongestionTest,
    Custom,
}

impl ScenarioPreset {
    pub const ALL: [ScenarioPreset; 8] = [
        ScenarioPreset::LightLoad,
        ScenarioPreset::MediumLoad,
        ScenarioPreset::HeavyLoad,
        ScenarioPreset::RobotFailure,
        ScenarioPreset::ClusteredOrders,
        ScenarioPreset::DynamicOrders,
        ScenarioPreset::CongestionTest,
        ScenarioPreset::Custom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScenarioPreset::LightLoad       => "Light Load",
            ScenarioPreset::MediumLoad      => "Medium Load",
            ScenarioPreset::HeavyLoad       => "Heavy Load",
            ScenarioPreset::RobotFailure    => "Robot Failure",
            ScenarioPreset::ClusteredOrders => "Clustered Orders",
            ScenarioPreset::DynamicOrders   => "Dynamic Orders",
            ScenarioPreset::CongestionTest  => "Congestion Test",
            ScenarioPreset::Custom          => "Custom",
        }
    }

    pub fn config(self) -> WarehouseConfig {
        let base = WarehouseConfig::default();
        let fixed = |count| OrderMode::Fixed { count };
        match self {
            ScenarioPreset::LightLoad  => WarehouseConfig { order_mode: fixed(10), ..base },
            ScenarioPreset::MediumLoad => WarehouseConfig { order_mode: fixed(30), ..base },
            ScenarioPreset::HeavyLoad  => WarehouseConfig { order_mode: fixed(50), ..base },
            ScenarioPreset::RobotFailure => WarehouseConfig {
                order_mode:         fixed(30),
                robot_failure_step: Some(80),
                ..base
            },
            ScenarioPreset::ClusteredOrders => WarehouseConfig {
                order_mode: fixed(30),
                clustering: Some(Clustering { center: GridPos::new(10, 10), radius: 5 }),
                ..base
            },
            ScenarioPreset::DynamicOrders => WarehouseConfig {
                order_mode: OrderMode::Probabilistic { rate: 0.4 },
                ..base
            },
            ScenarioPreset::CongestionTest => WarehouseConfig {
                num_robots:  12,
                grid_width:  12,
                grid_height: 12,
                order_mode:  fixed(40),
                ..base
            },
            ScenarioPreset::Custom => base,
        }
    }
}

impl std::fmt::Display for ScenarioPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
