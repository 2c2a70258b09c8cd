//! Robot state, counters, and the per-tick state machine.

use wh_core::{GridPos, OrderId, RobotId, RobotRng};
use wh_grid::SpatialGrid;

// ── Battery thresholds ────────────────────────────────────────────────────────

/// Default battery capacity.
pub const DEFAULT_CAPACITY: f64 = 100.0;
/// Below this level any non-broken robot drops its work and recharges.
pub const LOW_BATTERY: f64 = 20.0;
/// A recharging robot returns to `Idle` once it reaches this level.
pub const RECHARGED: f64 = 80.0;
/// Charge gained per tick while recharging.
pub const RECHARGE_RATE: f64 = 5.0;
/// Charge spent per cell moved.
pub const MOVE_COST: f64 = 0.5;

// ── RobotState ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RobotState {
    Idle,
    MovingToPickup,
    MovingToDelivery,
    Recharging,
    /// Terminal.
    Broken,
}

impl RobotState {
    pub fn as_str(self) -> &'static str {
        match self {
            RobotState::Idle             => "idle",
            RobotState::MovingToPickup   => "moving_to_pickup",
            RobotState::MovingToDelivery => "moving_to_delivery",
            RobotState::Recharging       => "recharging",
            RobotState::Broken           => "broken",
        }
    }
}

impl std::fmt::Display for RobotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Task ──────────────────────────────────────────────────────────────────────

/// The robot's copy of the order it is working on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    pub order:    OrderId,
    pub pickup:   GridPos,
    pub delivery: GridPos,
}

// ── Counters ──────────────────────────────────────────────────────────────────

/// Cumulative per-robot statistics.  Only ever increase.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobotCounters {
    /// Cells moved.
    pub distance:        u64,
    pub tasks_completed: u64,
    pub idle_ticks:      u64,
    /// Ticks on which every in-bounds neighbour held another robot.
    pub soft_conflicts:  u64,
    /// Blocked ticks on which the sidestep also found nothing free.
    pub hard_blocks:     u64,
}

// ── TickOutcome ───────────────────────────────────────────────────────────────

/// What one call to [`Robot::advance`] means for the rest of the world.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The order was dropped at its delivery station this tick.
    pub delivered:      Option<OrderId>,
    /// The order was dropped because the battery ran low.  It stays
    /// assigned and is never handed to another robot.
    pub abandoned:      Option<OrderId>,
    /// The robot ended its turn idle and may take work (greedy self-selection).
    pub ready_for_task: bool,
}

// ── Robot ─────────────────────────────────────────────────────────────────────

/// One fleet member.
///
/// Created once at simulation start; only [`advance`](Self::advance) moves it.
#[derive(Clone, Debug)]
pub struct Robot {
    pub id:                RobotId,
    pub pos:               GridPos,
    /// Always within `[0, capacity]`.
    pub battery:           f64,
    pub capacity:          f64,
    /// Orders carried at once.  Always 1.
    pub carrying_capacity: u32,
    pub task:              Option<Task>,
    pub target:            Option<GridPos>,
    pub state:             RobotState,
    pub counters:          RobotCounters,
    /// Consecutive fully blocked move attempts.
    pub(crate) blocked_streak: u32,
}

impl Robot {
    /// A fully charged, idle robot at `pos`.
    pub fn new(id: RobotId, pos: GridPos, capacity: f64) -> Self {
        Self {
            id,
            pos,
            battery: capacity,
            capacity,
            carrying_capacity: 1,
            task: None,
            target: None,
            state: RobotState::Idle,
            counters: RobotCounters::default(),
            blocked_streak: 0,
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.state == RobotState::Idle
    }

    #[inline]
    pub fn is_broken(&self) -> bool {
        self.state == RobotState::Broken
    }

    /// Take on `task` and head for its pickup.
    ///
    /// # Panics
    /// Panics if the robot is not idle; allocation only ever offers work to
    /// idle robots.
    pub fn assign(&mut self, task: Task) {
        assert!(self.is_idle(), "{} assigned {} while {}", self.id, task.order, self.state);
        self.task = Some(task);
        self.target = Some(task.pickup);
        self.state = RobotState::MovingToPickup;
    }

    /// Fail permanently.  Returns the order that was being carried, which is
    /// lost: it stays assigned and nobody picks it up again.
    pub fn break_down(&mut self) -> Option<OrderId> {
        self.state = RobotState::Broken;
        self.target = None;
        self.task.take().map(|t| t.order)
    }

    /// Advance the state machine by one tick.
    pub fn advance(&mut self, grid: &mut SpatialGrid, rng: &mut RobotRng) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.is_broken() {
            return outcome;
        }

        if self.battery < LOW_BATTERY && self.state != RobotState::Recharging {
            outcome.abandoned = self.task.take().map(|t| t.order);
            self.target = None;
            self.state = RobotState::Recharging;
        }

        match self.state {
            RobotState::Recharging => {
                self.battery = (self.battery + RECHARGE_RATE).min(self.capacity);
                if self.battery >= RECHARGED {
                    self.state = RobotState::Idle;
                    outcome.ready_for_task = true;
                }
            }
            RobotState::Idle => {
                self.counters.idle_ticks += 1;
                outcome.ready_for_task = true;
            }
            RobotState::MovingToPickup => {
                let task = self.active_task();
                self.step_towards(task.pickup, grid, rng);
                if self.pos == task.pickup {
                    self.state = RobotState::MovingToDelivery;
                    self.target = Some(task.delivery);
                }
            }
            RobotState::MovingToDelivery => {
                let task = self.active_task();
                self.step_towards(task.delivery, grid, rng);
                if self.pos == task.delivery {
                    self.counters.tasks_completed += 1;
                    outcome.delivered = Some(task.order);
                    self.task = None;
                    self.target = None;
                    self.state = RobotState::Idle;
                }
            }
            RobotState::Broken => unreachable!("broken robots return early"),
        }

        assert!(
            (0.0..=self.capacity).contains(&self.battery),
            "{} battery {} outside [0, {}]",
            self.id,
            self.battery,
            self.capacity
        );
        outcome
    }

    fn active_task(&self) -> Task {
        match self.task {
            Some(task) => task,
            None => panic!("{} is {} without a task", self.id, self.state),
        }
    }
}
