use rand::Rng;

use crate::config::{SEED_Z_RANGE, TERRAIN_AMPLITUDE, TERRAIN_LACUNARITY, TERRAIN_OCTAVES};
use crate::improved_noise::ImprovedNoise;

use super::types::{Heightmap, HeightmapError};

// =============================================================================
// Fractal heightmap builder
// =============================================================================

/// Octave parameters for the fractal summation.
///
/// Each octave adds `|noise(x / q, y / q, z)| * q * amplitude` to every cell,
/// where `q` ("quality") starts at 1 and is multiplied by `lacunarity` after
/// each pass. Large `q` means low frequency and tall features.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightmapBuilder {
    pub octaves: u32,
    pub lacunarity: f64,
    pub amplitude: f64,
}

impl Default for HeightmapBuilder {
    fn default() -> Self {
        Self {
            octaves: TERRAIN_OCTAVES,
            lacunarity: TERRAIN_LACUNARITY,
            amplitude: TERRAIN_AMPLITUDE,
        }
    }
}

impl HeightmapBuilder {
    /// The `quality` value of each octave, in the order the build applies them.
    pub fn octave_qualities(&self) -> impl Iterator<Item = f64> {
        let lacunarity = self.lacunarity;
        std::iter::successors(Some(1.0_f64), move |q| Some(q * lacunarity))
            .take(self.octaves as usize)
    }

    /// Build a `width x height` map from a `z` slice drawn from `rng`.
    ///
    /// Dimensions are validated before the draw, so a rejected build consumes
    /// no randomness.
    pub fn build<R: Rng + ?Sized>(
        &self,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Result<Heightmap, HeightmapError> {
        let z = self.draw_slice(width, height, rng)?;
        self.build_with_z(width, height, z)
    }

    /// Validate the size, then draw the `z` slice [`build`](Self::build) would
    /// use. Lets the caller run the noise pass elsewhere.
    pub fn draw_slice<R: Rng + ?Sized>(
        &self,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Result<f64, HeightmapError> {
        validate_dimensions(width, height)?;
        Ok(draw_z(rng))
    }

    /// Deterministic build for a known `z` slice.
    pub fn build_with_z(
        &self,
        width: usize,
        height: usize,
        z: f64,
    ) -> Result<Heightmap, HeightmapError> {
        let size = validate_dimensions(width, height)?;

        let noise = ImprovedNoise::new();
        let mut values = vec![0u8; size];

        for quality in self.octave_qualities() {
            for (i, cell) in values.iter_mut().enumerate() {
                let x = (i % width) as f64;
                let y = (i / width) as f64;
                let contribution =
                    (noise.sample(x / quality, y / quality, z) * quality * self.amplitude).abs();
                *cell = accumulate_clamped(*cell, contribution);
            }
        }

        Ok(Heightmap {
            width,
            height,
            values,
            seed_z: z,
        })
    }
}

/// Uniform `z` slice in `[0, SEED_Z_RANGE)`.
pub fn draw_z<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>() * SEED_Z_RANGE
}

/// Add one octave's contribution to a stored cell.
///
/// Saturates at the `u8` range instead of wrapping, so a tall peak can never
/// fold over into a pit. The fractional part is truncated, matching integer
/// storage of every intermediate octave sum.
#[inline]
pub fn accumulate_clamped(current: u8, contribution: f64) -> u8 {
    (current as f64 + contribution).clamp(0.0, u8::MAX as f64) as u8
}

/// Reject empty or unaddressable grids. Returns the cell count.
pub fn validate_dimensions(width: usize, height: usize) -> Result<usize, HeightmapError> {
    if width == 0 || height == 0 {
        return Err(HeightmapError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(HeightmapError::InvalidDimensions { width, height })
}
