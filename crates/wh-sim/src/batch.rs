//! Whole-run helpers for offline experiments.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use wh_core::Tick;
use wh_dispatch::Mechanism;

use crate::{Metrics, RunSummary, SimBuilder, SimObserver, SimResult, WarehouseConfig};

/// Outcome of one complete run.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    pub mechanism: Mechanism,
    pub summary:   RunSummary,
    /// Metrics after every tick, in order.  Not bounded by `history_window`.
    pub series:    Vec<Metrics>,
}

/// Records every tick's metrics.
struct SeriesRecorder(Vec<Metrics>);

impl SimObserver for SeriesRecorder {
    fn on_tick_end(&mut self, _tick: Tick, metrics: &Metrics) {
        self.0.push(metrics.clone());
    }
}

/// Build a simulation from `config` and run it to `max_steps`.
pub fn run_to_end(config: &WarehouseConfig) -> SimResult<RunReport> {
    let mut sim = SimBuilder::new(config.clone()).build()?;
    let mut recorder = SeriesRecorder(Vec::new());
    let summary = sim.run(&mut recorder);
    Ok(RunReport {
        mechanism: summary.mechanism,
        summary,
        series: recorder.0,
    })
}

/// Run `config` once per mechanism, in [`Mechanism::ALL`] order.
///
/// The runs share nothing, so with the `parallel` feature they execute on
/// Rayon's thread pool.  Results are identical either way.
pub fn compare_mechanisms(config: &WarehouseConfig) -> SimResult<Vec<RunReport>> {
    let mechanisms: &[Mechanism] = &Mechanism::ALL;

    #[cfg(feature = "parallel")]
    let runs = mechanisms.par_iter();

    #[cfg(not(feature = "parallel"))]
    let runs = mechanisms.iter();

    runs.map(|&m| run_to_end(&config.with_mechanism(m))).collect()
}
