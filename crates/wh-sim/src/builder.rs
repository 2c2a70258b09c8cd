//! Fluent builder for constructing a [`Sim`].

use tracing::info;

use wh_core::{GridPos, RobotId, SimClock, SimRng};
use wh_dispatch::{Dispatcher, MechanismDispatcher, OrderBook, OrderGenerator};
use wh_fleet::Fleet;
use wh_grid::{SpatialGrid, WarehouseLayout};

use crate::{Metrics, MetricsHistory, Sim, SimError, SimResult, WarehouseConfig};

/// Random draws per robot before placement gives up.
const PLACEMENT_ATTEMPTS: u32 = 100;

/// Fluent builder for [`Sim<D>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                      |
/// |------------------------|----------------------------------------------|
/// | `.dispatcher(d)`       | `config.mechanism.dispatcher()`              |
/// | `.robot_positions(v)`  | Random free, non-fixture cells               |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(WarehouseConfig::default())
///     .robot_positions(vec![GridPos::new(0, 0), GridPos::new(19, 19)])
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<D: Dispatcher = MechanismDispatcher> {
    config:     WarehouseConfig,
    dispatcher: D,
    positions:  Option<Vec<GridPos>>,
}

impl SimBuilder {
    /// A builder using the stock dispatcher for `config.mechanism`.
    pub fn new(config: WarehouseConfig) -> Self {
        let dispatcher = config.mechanism.dispatcher();
        Self { config, dispatcher, positions: None }
    }
}

impl<D: Dispatcher> SimBuilder<D> {
    /// Replace the dispatcher, e.g. with a custom [`Dispatcher`]
    /// implementation.  `config.mechanism` is then ignored.
    pub fn dispatcher<E: Dispatcher>(self, dispatcher: E) -> SimBuilder<E> {
        SimBuilder {
            config: self.config,
            dispatcher,
            positions: self.positions,
        }
    }

    /// Start robot `i` on `positions[i]` instead of a random cell.
    ///
    /// Must be length `num_robots`; every cell must be in bounds, free of
    /// fixtures, and distinct.
    pub fn robot_positions(mut self, positions: Vec<GridPos>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Validate the config, lay out the floor, place the fleet, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<D>> {
        let config = self.config;
        let layout = config.validate()?;
        let mut grid = SpatialGrid::from_layout(&layout)?;
        let generator = OrderGenerator::new(config.order_mode, &layout, config.clustering)?;
        let mut rng = SimRng::new(config.seed);

        let requested = config.num_robots as usize;
        let positions = match self.positions {
            Some(p) => {
                if p.len() != requested {
                    return Err(SimError::RobotCountMismatch { expected: requested, got: p.len() });
                }
                place_given(&p, &layout, &mut grid)?;
                p
            }
            None => place_random(requested, &layout, &mut grid, &mut rng)?,
        };

        let fleet = Fleet::new(&positions, config.battery_capacity, config.seed);
        let orders = OrderBook::new();
        let metrics = Metrics::compute(0, &fleet.robots, &orders);

        info!(
            robots = fleet.len(),
            width = config.grid_width,
            height = config.grid_height,
            shelves = layout.shelves.len(),
            mechanism = %self.dispatcher.mechanism(),
            seed = config.seed,
            "warehouse simulation built"
        );

        Ok(Sim {
            clock: SimClock::new(config.max_steps),
            history: MetricsHistory::new(config.history_window),
            config,
            layout,
            grid,
            fleet,
            orders,
            generator,
            dispatcher: self.dispatcher,
            rng,
            running: true,
            metrics,
            activation: Vec::with_capacity(requested),
        })
    }
}

fn place_given(positions: &[GridPos], layout: &WarehouseLayout, grid: &mut SpatialGrid) -> SimResult<()> {
    for (i, &pos) in positions.iter().enumerate() {
        if layout.is_shelf(pos) || layout.is_station(pos) {
            return Err(SimError::Config(format!("robot start {pos} is on a shelf or station")));
        }
        grid.place_robot(RobotId(i as u32), pos)?;
    }
    Ok(())
}

/// Draw up to [`PLACEMENT_ATTEMPTS`] random cells per robot; the first one
/// that is neither a fixture nor taken wins.
fn place_random(
    count:  usize,
    layout: &WarehouseLayout,
    grid:   &mut SpatialGrid,
    rng:    &mut SimRng,
) -> SimResult<Vec<GridPos>> {
    let (w, h) = (layout.width as i32, layout.height as i32);
    let mut positions = Vec::with_capacity(count);

    for i in 0..count {
        let found = (0..PLACEMENT_ATTEMPTS).find_map(|_| {
            let pos = GridPos::new(rng.gen_range(0..w), rng.gen_range(0..h));
            let free = !layout.is_shelf(pos) && !layout.is_station(pos) && grid.robot_at(pos).is_none();
            free.then_some(pos)
        });
        let Some(pos) = found else {
            return Err(SimError::PlacementExhausted {
                placed:    i,
                requested: count,
                attempts:  PLACEMENT_ATTEMPTS,
            });
        };
        grid.place_robot(RobotId(i as u32), pos)?;
        positions.push(pos);
    }
    Ok(positions)
}
