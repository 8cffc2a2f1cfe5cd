mod builder;
mod systems;
mod tests;
mod types;

pub use builder::{accumulate_clamped, draw_z, validate_dimensions, HeightmapBuilder};
pub use systems::{collect_heightmap, spawn_heightmap_task, HeightmapPlugin, HeightmapTask};
pub use types::{Heightmap, HeightmapError};
