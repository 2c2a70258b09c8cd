//! Aggregate statistics.  A pure function of the robots and the order book.

use wh_dispatch::{Mechanism, OrderBook};
use wh_fleet::{Robot, RobotState};

/// Fleet-wide statistics after `step` ticks.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    /// Ticks processed.
    pub step:                   u64,
    pub orders_generated:       usize,
    pub orders_completed:       usize,
    /// Generated but not yet delivered.
    pub active_orders:          usize,
    /// Completed orders per tick.
    pub throughput:             f64,
    /// Completed orders per cell travelled; 0 before anyone has moved.
    pub efficiency:             f64,
    pub total_distance:         u64,
    pub avg_distance_per_robot: f64,
    pub avg_battery:            f64,
    pub idle_robots:            usize,
    pub broken_robots:          usize,
    pub soft_conflicts:         u64,
    pub hard_blocks:            u64,
    /// `soft_conflicts + hard_blocks`.
    pub total_conflicts:        u64,
    pub total_idle_ticks:       u64,
    pub avg_idle_ticks:         f64,
    /// Population variance of per-robot completed-task counts.
    pub fairness_variance:      f64,
    pub avg_tasks_per_robot:    f64,
    /// Mean ticks from announcement to delivery over completed orders.
    pub avg_completion_delay:   f64,
}

impl Metrics {
    pub fn compute(step: u64, robots: &[Robot], orders: &OrderBook) -> Self {
        let n = robots.len() as f64;
        let mean = |total: f64| if robots.is_empty() { 0.0 } else { total / n };

        let mut m = Metrics {
            step,
            orders_generated: orders.len(),
            orders_completed: orders.completed_count(),
            active_orders:    orders.active_count(),
            ..Metrics::default()
        };

        let mut battery = 0.0;
        let mut tasks = 0u64;
        for robot in robots {
            let c = &robot.counters;
            m.total_distance += c.distance;
            m.soft_conflicts += c.soft_conflicts;
            m.hard_blocks += c.hard_blocks;
            m.total_idle_ticks += c.idle_ticks;
            tasks += c.tasks_completed;
            battery += robot.battery;
            match robot.state {
                RobotState::Idle   => m.idle_robots += 1,
                RobotState::Broken => m.broken_robots += 1,
                _ => {}
            }
        }
        m.total_conflicts = m.soft_conflicts + m.hard_blocks;

        m.avg_battery = mean(battery);
        m.avg_distance_per_robot = mean(m.total_distance as f64);
        m.avg_idle_ticks = mean(m.total_idle_ticks as f64);
        m.avg_tasks_per_robot = mean(tasks as f64);
        m.fairness_variance = mean(
            robots
                .iter()
                .map(|r| (r.counters.tasks_completed as f64 - m.avg_tasks_per_robot).powi(2))
                .sum(),
        );

        if step > 0 {
            m.throughput = m.orders_completed as f64 / step as f64;
        }
        if m.total_distance > 0 {
            m.efficiency = m.orders_completed as f64 / m.total_distance as f64;
        }

        let delays: Vec<u64> = orders.iter().filter_map(|o| o.completion_delay()).collect();
        if !delays.is_empty() {
            m.avg_completion_delay = delays.iter().sum::<u64>() as f64 / delays.len() as f64;
        }

        m
    }
}

/// End-of-run statistics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    pub mechanism: Mechanism,
    pub metrics:   Metrics,
}
