/// Default heightmap resolution (vertices along X).
pub const WORLD_WIDTH: usize = 1024;
/// Default heightmap resolution (vertices along Z).
pub const WORLD_DEPTH: usize = 1024;

/// Side length of the terrain plane in world units.
pub const TERRAIN_EXTENT: f32 = 7500.0;
/// World units of elevation per heightmap unit (0..=255).
pub const HEIGHT_SCALE: f32 = 5.0;

pub const TERRAIN_OCTAVES: u32 = 4;
pub const TERRAIN_LACUNARITY: f64 = 5.0;
pub const TERRAIN_AMPLITUDE: f64 = 1.75;
/// The per-build `z` slice is drawn uniformly from `[0, SEED_Z_RANGE)`.
pub const SEED_Z_RANGE: f64 = 100.0;

/// Number of click-triggered camera advances before the reveal.
pub const ADVANCE_COUNT: u32 = 5;
/// Duration of one advance in seconds.
pub const ADVANCE_DURATION: f32 = 1.0;
/// Camera travel speed along -Z in world units per second.
pub const CAMERA_SPEED: f32 = 1000.0;

/// Text glide speed along -Z in world units per second.
pub const TEXT_SPEED: f32 = 2000.0;
/// Depth at which the revealed text comes to rest.
pub const TEXT_TARGET_DEPTH: f32 = -5500.0;
/// Depth the text starts gliding from.
pub const TEXT_START_DEPTH: f32 = 0.0;
/// Horizontal offset of the text while gliding.
pub const TEXT_OFFSET_X: f32 = -1000.0;
pub const TEXT_SIZE: f32 = 200.0;
pub const TEXT_SCALE: f32 = 2.0;
pub const REVEAL_LABEL: &str = "The End";

/// Advance requests buffered between two ticks beyond this are dropped.
pub const INPUT_QUEUE_CAPACITY: usize = 16;
