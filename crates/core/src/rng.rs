//! RNG module - seedable random source for shape and bonus selection
//!
//! A single `GameRng` is injected into the board. Every random decision (shape
//! kind, bonus roll, bonus kind, bonus row/column) draws from it, so a fixed seed
//! plus a fixed timestep replays the same game.

use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{BonusKind, ShapeKind};

#[derive(Debug, Clone)]
pub struct GameRng {
    rng: StdRng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from OS entropy, remembering the seed for logging.
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform value in `range`. Panics on an empty range.
    pub fn next_range(&mut self, range: Range<i32>) -> i32 {
        self.rng.gen_range(range)
    }

    /// True with probability `p`.
    pub fn roll(&mut self, p: f32) -> bool {
        self.rng.gen::<f32>() < p
    }

    /// Uniformly chosen shape kind
    pub fn shape_kind(&mut self) -> ShapeKind {
        ShapeKind::ALL[self.rng.gen_range(0..ShapeKind::ALL.len())]
    }

    /// Uniformly chosen non-none bonus kind
    pub fn bonus_kind(&mut self) -> BonusKind {
        BonusKind::ACTIVE[self.rng.gen_range(0..BonusKind::ACTIVE.len())]
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(1)
    }
}
