use std::fmt;

use bevy::prelude::*;

/// Terrain elevation field, row-major, one `u8` per grid vertex.
///
/// Index `i` maps to grid coordinate `(i % width, i / width)`. Built once per
/// session and never mutated afterwards.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Heightmap {
    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) values: Vec<u8>,
    /// The noise `z` slice this map was sampled from.
    pub(super) seed_z: f64,
}

impl Heightmap {
    /// Wrap precomputed row-major elevations.
    pub fn from_values(width: usize, height: usize, values: Vec<u8>) -> Result<Self, HeightmapError> {
        let expected = super::builder::validate_dimensions(width, height)?;
        if values.len() != expected {
            return Err(HeightmapError::ValueCountMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            width,
            height,
            values,
            seed_z: 0.0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn seed_z(&self) -> f64 {
        self.seed_z
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Elevation at grid `(x, y)`, or `None` outside the map.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.values.get(y * self.width + x).copied()
    }

    /// Highest elevation in the map (0 for a flat map).
    pub fn max_height(&self) -> u8 {
        self.values.iter().copied().max().unwrap_or(0)
    }
}

/// Rejections raised before any terrain is generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeightmapError {
    /// Width or height is zero, or `width * height` does not fit in memory
    /// addressing.
    InvalidDimensions { width: usize, height: usize },
    /// Precomputed elevations do not cover the grid exactly.
    ValueCountMismatch { expected: usize, actual: usize },
}

impl fmt::Display for HeightmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeightmapError::InvalidDimensions { width, height } => write!(
                f,
                "invalid heightmap dimensions {width}x{height}: sides must be non-zero and their product addressable"
            ),
            HeightmapError::ValueCountMismatch { expected, actual } => {
                write!(f, "heightmap needs {expected} elevations, got {actual}")
            }
        }
    }
}

impl std::error::Error for HeightmapError {}
