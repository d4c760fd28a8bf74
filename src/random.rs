//! Randomness seam for the show.
//!
//! Everything random in the simulation (launch targets, fragment spread, the
//! autonomous launch coin) goes through [`RandomSource`].  The production source
//! is a seeded [`StdRng`]; tests substitute their own implementation to load the
//! coin or pin values.

use crate::constants::AUTO_LAUNCH_COIN_THRESHOLD;
use crate::geometry::random_in_range;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Source of uniform random values.
pub trait RandomSource {
    /// Uniform float in `[min, max)`; `min` for an empty range.
    fn uniform(&mut self, min: f32, max: f32) -> f32;

    /// Coin flip gating autonomous launches.
    fn coin(&mut self) -> bool {
        self.uniform(0.0, 1.0) > AUTO_LAUNCH_COIN_THRESHOLD
    }
}

/// [`RandomSource`] backed by a seedable `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Deterministic source for a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, entropy-seeded otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        random_in_range(&mut self.rng, min, max)
    }
}

/// Bevy resource holding the show's random source.
#[derive(Resource)]
pub struct ShowRng(pub Box<dyn RandomSource + Send + Sync>);

impl ShowRng {
    pub fn new(source: impl RandomSource + Send + Sync + 'static) -> Self {
        Self(Box::new(source))
    }
}
