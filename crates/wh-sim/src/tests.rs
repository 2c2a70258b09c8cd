//! Integration tests for wh-sim.

use std::collections::HashSet;

use wh_core::{GridPos, OrderId, RobotId, Tick};
use wh_dispatch::{
    Clustering, DispatchError, Dispatcher, Mechanism, Order, OrderBook, OrderMode, OrderStatus,
};
use wh_fleet::{Robot, RobotState};
use wh_grid::GridError;

use crate::{
    Metrics, MetricsHistory, NoopObserver, RunSummary, ScenarioPreset, Sim, SimBuilder, SimError,
    SimObserver, WarehouseConfig, compare_mechanisms, run_to_end,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn p(x: i32, y: i32) -> GridPos {
    GridPos::new(x, y)
}

fn build(config: WarehouseConfig) -> Sim {
    SimBuilder::new(config).build().unwrap()
}

/// One robot at the origin, one fixed order.
fn single_delivery(mechanism: Mechanism) -> Sim {
    let config = WarehouseConfig {
        num_robots: 1,
        mechanism,
        order_mode: OrderMode::Fixed { count: 1 },
        ..WarehouseConfig::default()
    };
    SimBuilder::new(config)
        .robot_positions(vec![p(0, 0)])
        .build()
        .unwrap()
}

/// Every robot sits on the grid cell it believes it holds, and no cell holds
/// two robots.
fn assert_world_consistent(sim: &Sim) {
    let mut seen = HashSet::new();
    for r in &sim.fleet.robots {
        assert!(
            (0.0..=r.capacity).contains(&r.battery),
            "{} battery {} at {}",
            r.id,
            r.battery,
            sim.clock.current_tick
        );
        assert!(seen.insert(r.pos), "two robots on {}", r.pos);
        assert_eq!(sim.grid.robot_at(r.pos), Some(r.id), "grid disagrees about {}", r.pos);
    }
    assert_eq!(sim.grid.robot_count(), sim.fleet.len());
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn default_config_builds() {
        let sim = build(WarehouseConfig::default());
        assert_eq!(sim.fleet.len(), 5);
        assert!(sim.is_running());
        assert_eq!(sim.clock.current_tick, Tick(0));
        assert_eq!(sim.dispatcher.mechanism(), Mechanism::Cnp);
        for r in &sim.fleet.robots {
            assert!(!sim.layout.is_shelf(r.pos) && !sim.layout.is_station(r.pos));
            assert_eq!(r.state, RobotState::Idle);
            assert_eq!(r.battery, 100.0);
        }
        assert_world_consistent(&sim);
    }

    #[test]
    fn grid_too_small() {
        let config = WarehouseConfig { grid_width: 4, ..WarehouseConfig::default() };
        assert!(matches!(
            SimBuilder::new(config).build(),
            Err(SimError::Grid(GridError::TooSmall { width: 4, .. }))
        ));
    }

    #[test]
    fn zero_robots() {
        let config = WarehouseConfig { num_robots: 0, ..WarehouseConfig::default() };
        assert!(matches!(SimBuilder::new(config).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn more_robots_than_free_cells() {
        // 5 × 5: 25 cells − 1 shelf − 4 stations.
        let config = WarehouseConfig {
            num_robots: 21,
            grid_width: 5,
            grid_height: 5,
            ..WarehouseConfig::default()
        };
        assert!(matches!(SimBuilder::new(config).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn rate_outside_unit_interval() {
        let config = WarehouseConfig {
            order_mode: OrderMode::Probabilistic { rate: -0.1 },
            ..WarehouseConfig::default()
        };
        assert!(matches!(
            SimBuilder::new(config).build(),
            Err(SimError::Dispatch(DispatchError::InvalidRate(_)))
        ));
    }

    #[test]
    fn remaining_field_checks() {
        let bad = [
            WarehouseConfig { max_steps: 0, ..WarehouseConfig::default() },
            WarehouseConfig { battery_capacity: 50.0, ..WarehouseConfig::default() },
            WarehouseConfig { battery_capacity: f64::NAN, ..WarehouseConfig::default() },
            WarehouseConfig { history_window: 0, ..WarehouseConfig::default() },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(SimError::Config(_))), "{config:?}");
        }
    }

    #[test]
    fn cluster_center_off_the_floor() {
        // The box around (-1, -1) still reaches the shelves at (2, 2), (3, 2).
        let center = p(-1, -1);
        let config = WarehouseConfig {
            clustering: Some(Clustering { center, radius: 5 }),
            ..WarehouseConfig::default()
        };
        let mut sim = build(config);
        assert_eq!(sim.generator.pickup_candidates(), &[p(2, 2), p(3, 2)]);
        sim.run_ticks(10, &mut NoopObserver);
        assert!(sim.orders.iter().all(|o| o.pickup.within_box(center, 5)));

        // Nothing in range: every shelf is a candidate.
        let config = WarehouseConfig {
            clustering: Some(Clustering { center: p(40, 40), radius: 2 }),
            ..WarehouseConfig::default()
        };
        let sim = build(config);
        assert_eq!(sim.generator.pickup_candidates(), sim.layout.shelves.as_slice());
    }

    #[test]
    fn huge_history_window_is_not_preallocated() {
        let config = WarehouseConfig { history_window: usize::MAX, ..WarehouseConfig::default() };
        let mut sim = build(config);
        sim.run_ticks(5, &mut NoopObserver);
        assert_eq!(sim.history().len(), 5);
        assert_eq!(sim.history().window(), usize::MAX);
    }

    #[test]
    fn unknown_mechanism_name() {
        let err = "market".parse::<Mechanism>().map_err(SimError::from);
        assert!(matches!(err, Err(SimError::Dispatch(DispatchError::UnknownMechanism(_)))));
    }

    #[test]
    fn explicit_positions() {
        let config = WarehouseConfig { num_robots: 2, ..WarehouseConfig::default() };
        let sim = SimBuilder::new(config)
            .robot_positions(vec![p(0, 0), p(19, 19)])
            .build()
            .unwrap();
        assert_eq!(sim.fleet.robots[0].pos, p(0, 0));
        assert_eq!(sim.fleet.robots[1].pos, p(19, 19));
        assert_eq!(sim.grid.robot_at(p(19, 19)), Some(RobotId(1)));
    }

    #[test]
    fn position_count_mismatch() {
        let config = WarehouseConfig { num_robots: 2, ..WarehouseConfig::default() };
        let result = SimBuilder::new(config).robot_positions(vec![p(0, 0)]).build();
        assert!(matches!(result, Err(SimError::RobotCountMismatch { expected: 2, got: 1 })));
    }

    #[test]
    fn position_on_a_fixture_or_taken() {
        let config = WarehouseConfig { num_robots: 2, ..WarehouseConfig::default() };
        let on_shelf = SimBuilder::new(config.clone())
            .robot_positions(vec![p(0, 0), p(2, 2)])
            .build();
        assert!(matches!(on_shelf, Err(SimError::Config(_))));

        let doubled = SimBuilder::new(config)
            .robot_positions(vec![p(0, 0), p(0, 0)])
            .build();
        assert!(matches!(doubled, Err(SimError::Grid(GridError::Occupied(_)))));
    }

    #[test]
    fn placement_exhaustion_is_an_error() {
        // Every free cell requested: the last robots cannot be found by
        // 100 random draws each.
        let config = WarehouseConfig { num_robots: 330, ..WarehouseConfig::default() };
        match SimBuilder::new(config).build() {
            Err(SimError::PlacementExhausted { placed, requested, attempts }) => {
                assert!(placed < requested);
                assert_eq!(requested, 330);
                assert_eq!(attempts, 100);
            }
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("330 robots placed by random draws"),
        }
    }

    #[test]
    fn presets_are_valid() {
        for preset in ScenarioPreset::ALL {
            let config = preset.config();
            assert!(config.validate().is_ok(), "{preset}");
            assert_eq!(config.max_steps, 200, "{preset}");
        }
        let congestion = ScenarioPreset::CongestionTest.config();
        assert_eq!((congestion.num_robots, congestion.grid_width), (12, 12));
        assert_eq!(ScenarioPreset::RobotFailure.config().robot_failure_step, Some(80));
        assert_eq!(ScenarioPreset::Custom.config(), WarehouseConfig::default());
        assert_eq!(
            ScenarioPreset::DynamicOrders.config().order_mode,
            OrderMode::Probabilistic { rate: 0.4 }
        );
    }
}

// ── Step loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn runs_to_max_steps() {
        let config = WarehouseConfig { max_steps: 30, ..WarehouseConfig::default() };
        let mut sim = build(config);
        let summary = sim.run(&mut NoopObserver);
        assert_eq!(sim.clock.current_tick, Tick(30));
        assert!(!sim.is_running());
        assert_eq!(summary.metrics.step, 30);
        assert_eq!(summary.mechanism, Mechanism::Cnp);
        assert_eq!(sim.history().len(), 30);
        assert_eq!(sim.metrics().orders_generated, 20);
    }

    #[test]
    fn history_is_bounded() {
        let config = WarehouseConfig { max_steps: 50, history_window: 8, ..WarehouseConfig::default() };
        let mut sim = build(config);
        sim.run(&mut NoopObserver);
        let steps = sim.history().series(|m| m.step);
        assert_eq!(steps, (43..=50).collect::<Vec<u64>>());
    }

    #[test]
    fn stop_ends_run_early() {
        let mut sim = build(WarehouseConfig::default());
        sim.run_ticks(3, &mut NoopObserver);
        sim.stop();
        assert!(!sim.is_running());
        sim.run(&mut NoopObserver);
        assert_eq!(sim.clock.current_tick, Tick(3));
    }

    #[test]
    fn step_advances_one_tick() {
        let mut sim = build(WarehouseConfig::default());
        sim.step();
        sim.step();
        assert_eq!(sim.clock.current_tick, Tick(2));
        assert_eq!(sim.metrics().step, 2);
        assert_eq!(sim.orders.len(), 2);
    }

    #[test]
    fn invariants_hold_under_load() {
        for mechanism in Mechanism::ALL {
            for preset in [ScenarioPreset::HeavyLoad, ScenarioPreset::CongestionTest] {
                let config = WarehouseConfig { mechanism, seed: 7, ..preset.config() };
                let mut sim = build(config);
                let mut statuses: Vec<OrderStatus> = Vec::new();
                let mut completed = 0;

                while sim.is_running() {
                    sim.step();
                    assert_world_consistent(&sim);

                    let now: Vec<OrderStatus> = sim.orders.iter().map(Order::status).collect();
                    for (before, after) in statuses.iter().zip(&now) {
                        assert!(before <= after, "{mechanism}/{preset}: {before:?} -> {after:?}");
                    }
                    statuses = now;

                    let done = sim.metrics().orders_completed;
                    assert!(done >= completed, "{mechanism}/{preset}: completed went backwards");
                    completed = done;
                }
                assert_eq!(
                    completed as u64,
                    sim.fleet.robots.iter().map(|r| r.counters.tasks_completed).sum::<u64>()
                );
            }
        }
    }

    #[test]
    fn same_seed_same_run() {
        for mechanism in Mechanism::ALL {
            let config = WarehouseConfig {
                mechanism,
                order_mode: OrderMode::Probabilistic { rate: 0.5 },
                seed: 1234,
                ..WarehouseConfig::default()
            };
            let mut a = build(config.clone());
            let mut b = build(config);
            a.run_ticks(150, &mut NoopObserver);
            b.run_ticks(150, &mut NoopObserver);
            assert_eq!(a.snapshot(), b.snapshot(), "{mechanism}");
            assert_eq!(a.metrics(), b.metrics(), "{mechanism}");
        }
    }

    #[test]
    fn lone_robot_delivers_the_only_order() {
        for mechanism in Mechanism::ALL {
            let mut sim = single_delivery(mechanism);
            sim.run(&mut NoopObserver);
            let order = sim.orders.get(OrderId(1)).unwrap();
            assert_eq!(order.status(), OrderStatus::Completed, "{mechanism}");
            assert_eq!(order.assigned_to, Some(RobotId(0)));
            assert_eq!(sim.fleet.robots[0].counters.tasks_completed, 1);
            assert!(sim.fleet.robots[0].is_idle());
            assert!(order.completion_delay().is_some_and(|d| d > 0));
        }
    }

    #[test]
    fn greedy_assigns_on_the_first_idle_turn() {
        let mut sim = single_delivery(Mechanism::Greedy);
        sim.step();
        let order = sim.orders.get(OrderId(1)).unwrap();
        assert_eq!(order.status(), OrderStatus::Assigned);
        assert_eq!(sim.fleet.robots[0].state, RobotState::MovingToPickup);
        assert_eq!(sim.fleet.robots[0].target, Some(order.pickup));
    }

    #[test]
    fn rounds_run_on_even_ticks_only() {
        for mechanism in [Mechanism::Cnp, Mechanism::Centralized] {
            let config = WarehouseConfig {
                num_robots: 2,
                mechanism,
                order_mode: OrderMode::Probabilistic { rate: 1.0 },
                ..WarehouseConfig::default()
            };
            let mut sim = SimBuilder::new(config)
                .robot_positions(vec![p(0, 0), p(19, 0)])
                .build()
                .unwrap();
            let status = |sim: &Sim, id| sim.orders.get(OrderId(id)).map(Order::status);

            sim.step(); // T0: order 1 generated and assigned
            assert_eq!(status(&sim, 1), Some(OrderStatus::Assigned), "{mechanism}");
            sim.step(); // T1: order 2 waits although a robot is idle
            assert_eq!(status(&sim, 2), Some(OrderStatus::Pending), "{mechanism}");
            assert_eq!(sim.metrics().idle_robots, 1);
            sim.step(); // T2
            assert_eq!(status(&sim, 2), Some(OrderStatus::Assigned), "{mechanism}");
        }
    }
}

// ── Failures ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod failure_tests {
    use super::*;

    #[derive(Default)]
    struct FailureLog(Vec<(Tick, RobotId)>);

    impl SimObserver for FailureLog {
        fn on_robot_failed(&mut self, tick: Tick, robot: RobotId, _lost: Option<OrderId>) {
            self.0.push((tick, robot));
        }
    }

    #[test]
    fn broken_robot_never_changes() {
        // Robot 0 takes the only order on its first turn.
        let config = WarehouseConfig {
            num_robots: 2,
            mechanism:  Mechanism::Greedy,
            order_mode: OrderMode::Fixed { count: 1 },
            ..WarehouseConfig::default()
        };
        let mut sim = SimBuilder::new(config)
            .robot_positions(vec![p(0, 0), p(19, 19)])
            .build()
            .unwrap();
        // Out of the running until well after the order is taken.
        sim.fleet.robots[1].state = RobotState::Recharging;
        sim.fleet.robots[1].battery = 0.0;
        sim.run_ticks(2, &mut NoopObserver);
        assert_eq!(sim.fleet.robots[0].state, RobotState::MovingToPickup);

        // The nearest shelf is 4 cells away, so the order is still in flight.
        let lost = sim.fail_robot(RobotId(0)).unwrap();
        assert_eq!(lost, Some(OrderId(1)));
        let frozen = sim.fleet.robots[0].clone();
        assert_eq!(frozen.state, RobotState::Broken);
        assert!(frozen.task.is_none() && frozen.target.is_none());

        sim.run_ticks(100, &mut NoopObserver);
        let r = &sim.fleet.robots[0];
        assert_eq!(r.state, RobotState::Broken);
        assert_eq!(r.pos, frozen.pos);
        assert_eq!(r.battery, frozen.battery);
        assert_eq!(r.counters, frozen.counters);

        let order = sim.orders.get(OrderId(1)).unwrap();
        assert_eq!(order.status(), OrderStatus::Assigned, "lost orders are never reassigned");
        assert_eq!(order.assigned_to, Some(RobotId(0)));
        assert!(sim.fleet.robots[1].is_idle());
        assert_eq!(sim.fleet.robots[1].counters.tasks_completed, 0);
        assert_eq!(sim.metrics().broken_robots, 1);
    }

    #[test]
    fn external_failure_reaches_the_observer() {
        let mut sim = single_delivery(Mechanism::Greedy);
        sim.run_ticks(3, &mut NoopObserver);
        let mut log = FailureLog::default();
        sim.fail_robot_with(RobotId(0), &mut log).unwrap();
        assert_eq!(log.0, vec![(Tick(3), RobotId(0))]);

        sim.fail_robot_with(RobotId(0), &mut log).unwrap();
        assert_eq!(log.0.len(), 1, "already broken");
    }

    #[test]
    fn failing_twice_is_a_no_op() {
        let mut sim = build(WarehouseConfig::default());
        sim.fail_robot(RobotId(0)).unwrap();
        assert_eq!(sim.fail_robot(RobotId(0)).unwrap(), None);
        assert!(matches!(sim.fail_robot(RobotId(9)), Err(SimError::UnknownRobot(RobotId(9)))));
    }

    #[test]
    fn scheduled_failure_breaks_exactly_one_robot() {
        let config = WarehouseConfig { max_steps: 100, ..ScenarioPreset::RobotFailure.config() };
        let mut sim = build(config);
        let mut log = FailureLog::default();

        sim.run_ticks(80, &mut log);
        assert!(log.0.is_empty());
        assert_eq!(sim.metrics().broken_robots, 0);

        sim.run(&mut log);
        assert_eq!(log.0.len(), 1);
        assert_eq!(log.0[0].0, Tick(80));
        assert_eq!(sim.fleet.robots[log.0[0].1.index()].state, RobotState::Broken);
        assert_eq!(sim.metrics().broken_robots, 1);
    }
}

// ── Observer, snapshot, batch ─────────────────────────────────────────────────

#[cfg(test)]
mod reporting_tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        starts:    usize,
        ends:      usize,
        delivered: usize,
        finished:  Option<RunSummary>,
    }

    impl SimObserver for Counter {
        fn on_tick_start(&mut self, _t: Tick) {
            self.starts += 1;
        }
        fn on_tick_end(&mut self, _t: Tick, _m: &Metrics) {
            self.ends += 1;
        }
        fn on_order_completed(&mut self, tick: Tick, order: &Order) {
            assert_eq!(order.completed_at, Some(tick));
            self.delivered += 1;
        }
        fn on_sim_end(&mut self, _t: Tick, summary: &RunSummary) {
            self.finished = Some(summary.clone());
        }
    }

    #[test]
    fn observer_sees_every_tick_and_delivery() {
        let config = WarehouseConfig { max_steps: 120, ..ScenarioPreset::MediumLoad.config() };
        let mut sim = build(config);
        let mut obs = Counter::default();
        let summary = sim.run(&mut obs);
        assert_eq!((obs.starts, obs.ends), (120, 120));
        assert_eq!(obs.delivered, summary.metrics.orders_completed);
        assert_eq!(obs.finished, Some(summary));
    }

    #[test]
    fn snapshot_reflects_world() {
        let mut sim = build(WarehouseConfig::default());
        sim.run_ticks(10, &mut NoopObserver);
        let snap = sim.snapshot();
        assert_eq!(snap.tick, Tick(10));
        assert_eq!((snap.width, snap.height), (20, 20));
        assert_eq!(snap.robots.len(), 5);
        assert_eq!(snap.shelves.len(), 66);
        assert_eq!(snap.stations.len(), 4);
        assert_eq!(snap.orders.len(), 10);
        for (view, robot) in snap.robots.iter().zip(&sim.fleet.robots) {
            assert_eq!(view.pos, robot.pos);
            assert_eq!(view.order, robot.task.map(|t| t.order));
        }
    }

    #[test]
    fn run_to_end_records_every_tick() {
        let config = WarehouseConfig { max_steps: 60, history_window: 10, ..WarehouseConfig::default() };
        let report = run_to_end(&config).unwrap();
        assert_eq!(report.series.len(), 60);
        assert_eq!(report.series.last(), Some(&report.summary.metrics));
        assert_eq!(report.mechanism, Mechanism::Cnp);
    }

    #[test]
    fn compare_covers_every_mechanism() {
        let config = WarehouseConfig { max_steps: 80, ..ScenarioPreset::LightLoad.config() };
        let reports = compare_mechanisms(&config).unwrap();
        let order: Vec<Mechanism> = reports.iter().map(|r| r.mechanism).collect();
        assert_eq!(order, Mechanism::ALL.to_vec());
        for report in &reports {
            assert_eq!(report.summary.mechanism, report.mechanism);
            assert_eq!(report.series.len(), 80);
        }
        // Same config, same seed, same answer.
        assert_eq!(reports[1].summary, run_to_end(&config.with_mechanism(Mechanism::Greedy)).unwrap().summary);
    }

    #[test]
    fn compare_propagates_config_errors() {
        let config = WarehouseConfig { num_robots: 0, ..WarehouseConfig::default() };
        assert!(compare_mechanisms(&config).is_err());
    }
}

// ── Metrics ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod metrics_tests {
    use super::*;

    #[test]
    fn empty_world_is_all_zero() {
        let m = Metrics::compute(0, &[], &OrderBook::new());
        assert_eq!(m, Metrics::default());
    }

    #[test]
    fn derived_values() {
        let mut a = Robot::new(RobotId(0), p(0, 0), 100.0);
        a.counters.tasks_completed = 2;
        a.counters.distance = 30;
        a.counters.soft_conflicts = 3;
        a.counters.idle_ticks = 4;
        a.battery = 60.0;
        let mut b = Robot::new(RobotId(1), p(1, 0), 100.0);
        b.counters.distance = 10;
        b.counters.hard_blocks = 1;
        b.state = RobotState::Broken;

        let mut book = OrderBook::new();
        let first = book.push(p(2, 2), p(1, 1), Tick(0));
        let second = book.push(p(3, 2), p(1, 1), Tick(4));
        book.push(p(5, 2), p(1, 1), Tick(6));
        book.assign(first, RobotId(0));
        book.assign(second, RobotId(0));
        book.complete(first, Tick(10));
        book.complete(second, Tick(10));

        let m = Metrics::compute(20, &[a, b], &book);
        assert_eq!(m.orders_generated, 3);
        assert_eq!(m.orders_completed, 2);
        assert_eq!(m.active_orders, 1);
        assert_eq!(m.throughput, 0.1);
        assert_eq!(m.total_distance, 40);
        assert_eq!(m.efficiency, 0.05);
        assert_eq!(m.avg_distance_per_robot, 20.0);
        assert_eq!(m.avg_battery, 80.0);
        assert_eq!((m.idle_robots, m.broken_robots), (1, 1));
        assert_eq!((m.soft_conflicts, m.hard_blocks, m.total_conflicts), (3, 1, 4));
        assert_eq!(m.total_idle_ticks, 4);
        assert_eq!(m.avg_tasks_per_robot, 1.0);
        assert_eq!(m.fairness_variance, 1.0);
        assert_eq!(m.avg_completion_delay, 8.0);
    }

    #[test]
    fn history_drops_oldest() {
        let mut history = MetricsHistory::new(3);
        for step in 1..=5 {
            history.push(Metrics { step, ..Metrics::default() });
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.window(), 3);
        assert_eq!(history.latest().map(|m| m.step), Some(5));
        assert_eq!(history.series(|m| m.step), vec![3, 4, 5]);
    }
}
