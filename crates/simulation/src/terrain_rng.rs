//! Seedable RNG for the per-session terrain `z` slice.
//!
//! Wraps `ChaCha8Rng` so a configured seed reproduces the same terrain on
//! every platform. Without a seed the generator is seeded from OS entropy and
//! every session gets a fresh landscape.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::heightmap::draw_z;

#[derive(Resource)]
pub struct TerrainRng(pub ChaCha8Rng);

impl Default for TerrainRng {
    fn default() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }
}

impl TerrainRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Seeded when `seed` is given, entropy-seeded otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map(Self::from_seed_u64).unwrap_or_default()
    }

    /// Draw a noise `z` slice uniformly from `[0, SEED_Z_RANGE)`.
    pub fn draw_z(&mut self) -> f64 {
        draw_z(&mut self.0)
    }
}
