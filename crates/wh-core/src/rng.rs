//! Deterministic per-robot and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Every robot gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR ((robot_id + 1) * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive robot IDs uniformly across the seed space.  The
//! `+ 1` keeps robot 0 off the simulation RNG's own seed.
//! Sidestep shuffles therefore do not depend on which robots happened to
//! sidestep earlier in the run, while everything global (order generation,
//! failure selection, the per-tick activation order) draws from one
//! [`SimRng`].  Same config and seed, same run.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::RobotId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── RobotRng ──────────────────────────────────────────────────────────────────

/// Per-robot deterministic RNG.
///
/// Stored in a parallel `Vec` alongside the robots (see `wh_fleet::RobotRngs`)
/// so a robot and its RNG can be borrowed mutably at the same time.
pub struct RobotRng(SmallRng);

impl RobotRng {
    /// Seed deterministically from the run's global seed and a robot ID.
    pub fn new(global_seed: u64, robot: RobotId) -> Self {
        let seed = global_seed ^ (robot.0 as u64 + 1).wrapping_mul(MIXING_CONSTANT);
        RobotRng(SmallRng::seed_from_u64(seed))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.0);
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations: order generation, robot
/// placement, failure injection, and the per-tick activation permutation.
///
/// Owned by exactly one simulation instance and used only from its step loop.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.0);
    }

    /// Choose a random element; `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.0)
    }
}
