use bevy::prelude::*;

use simulation::heightmap::Heightmap;

use crate::loading::PresentationAssets;

use super::mesh::build_terrain_mesh;

/// Marker for the single terrain entity.
#[derive(Component)]
pub struct Terrain;

/// Spawn the terrain once the heightmap resource appears.
pub fn spawn_terrain(
    mut commands: Commands,
    heightmap: Res<Heightmap>,
    assets: Res<PresentationAssets>,
    existing: Query<(), With<Terrain>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !existing.is_empty() {
        return;
    }

    let textured = assets.terrain_texture.is_some();
    let mesh = build_terrain_mesh(&heightmap, textured);
    info!(
        "Spawning {}x{} terrain ({})",
        heightmap.width(),
        heightmap.height(),
        if textured { "textured" } else { "vertex coloured" }
    );

    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            base_color_texture: assets.terrain_texture.clone(),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::IDENTITY,
        Terrain,
    ));
}
