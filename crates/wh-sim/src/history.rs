//! Bounded per-tick metrics history.

use std::collections::VecDeque;

use crate::Metrics;

/// The most recent `window` per-tick [`Metrics`], oldest first.
#[derive(Clone, Debug)]
pub struct MetricsHistory {
    window:  usize,
    entries: VecDeque<Metrics>,
}

impl MetricsHistory {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            entries: VecDeque::new(),
        }
    }

    /// Append `metrics`, dropping the oldest entry once the window is full.
    pub fn push(&mut self, metrics: Metrics) {
        if self.window == 0 {
            return;
        }
        if self.entries.len() == self.window {
            self.entries.pop_front();
        }
        self.entries.push_back(metrics);
    }

    #[inline]
    pub fn window(&self) -> usize {
        self.window
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&Metrics> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Metrics> + '_ {
        self.entries.iter()
    }

    /// One field across the window, e.g. `history.series(|m| m.avg_battery)`.
    pub fn series<T>(&self, field: impl Fn(&Metrics) -> T) -> Vec<T> {
        self.entries.iter().map(field).collect()
    }
}
