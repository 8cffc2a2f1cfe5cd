mod mesh;
mod systems;

pub use mesh::{
    axis_coord, build_terrain_mesh, elevation_color, vertex_height, TEXTURE_REPEAT,
};
pub use systems::{spawn_terrain, Terrain};
