use std::f32::consts::PI;

use bevy::prelude::*;

use simulation::config::HEIGHT_SCALE;
use simulation::heightmap::Heightmap;
use simulation::motion::CameraAdvanced;

const FOV_DEGREES: f32 = 60.0;
const NEAR: f32 = 1.0;
const FAR: f32 = 20_000.0;
/// Camera starts this many world units back per heightmap row, before the
/// 0.8 pull-in.
const DEPTH_UNITS_PER_ROW: f32 = 10.0;
const DEPTH_PULL_IN: f32 = 0.8;
/// Camera height as a multiple of the highest terrain point.
const HEIGHT_OVER_PEAK: f32 = 1.5;
const PITCH: f32 = -PI / 8.0;

#[derive(Component)]
pub struct VignetteCamera;

/// Where the camera sits before the first advance.
pub fn camera_start_transform(max_height: u8, world_depth: usize) -> Transform {
    let z = world_depth as f32 / 2.0 * DEPTH_UNITS_PER_ROW * DEPTH_PULL_IN;
    let y = max_height as f32 * HEIGHT_SCALE * HEIGHT_OVER_PEAK;
    Transform::from_xyz(0.0, y, z).with_rotation(Quat::from_rotation_x(PITCH))
}

pub fn vignette_projection() -> Projection {
    Projection::Perspective(PerspectiveProjection {
        fov: FOV_DEGREES.to_radians(),
        near: NEAR,
        far: FAR,
        ..default()
    })
}

pub fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        vignette_projection(),
        Transform::from_xyz(0.0, 0.0, 0.0).with_rotation(Quat::from_rotation_x(PITCH)),
        VignetteCamera,
    ));
}

/// Lift the camera over the terrain once the heightmap is known.
pub fn place_camera_over_terrain(
    heightmap: Res<Heightmap>,
    mut query: Query<&mut Transform, With<VignetteCamera>>,
    mut exit: EventWriter<AppExit>,
) {
    let Ok(mut transform) = query.get_single_mut() else {
        error!("Heightmap ready but no single vignette camera to place");
        exit.send(AppExit::error());
        return;
    };
    *transform = camera_start_transform(heightmap.max_height(), heightmap.height());
    debug!("Camera placed at {:?}", transform.translation);
}

/// Move the camera along Z by each `CameraAdvanced` delta.
pub fn apply_camera_advance(
    mut advances: EventReader<CameraAdvanced>,
    mut query: Query<&mut Transform, With<VignetteCamera>>,
) {
    let dz: f32 = advances.read().map(|e| e.dz).sum();
    if dz == 0.0 {
        return;
    }
    for mut transform in &mut query {
        transform.translation.z += dz;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_matches_default_world() {
        let t = camera_start_transform(100, 1024);
        assert_eq!(t.translation, Vec3::new(0.0, 750.0, 4096.0));
    }

    #[test]
    fn test_camera_pitches_down() {
        let t = camera_start_transform(100, 1024);
        let forward = t.forward();
        assert!(forward.y < 0.0);
        assert!(forward.z < 0.0);
        assert!((forward.y.atan2(-forward.z) + PI / 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_projection_parameters() {
        let Projection::Perspective(p) = vignette_projection() else {
            panic!("expected perspective projection");
        };
        assert!((p.fov - PI / 3.0).abs() < 1e-6);
        assert_eq!(p.near, 1.0);
        assert_eq!(p.far, 20_000.0);
    }

    #[test]
    fn test_camera_placed_when_heightmap_arrives() {
        let mut app = App::new();
        app.insert_resource(Heightmap::from_values(1, 4, vec![0, 100, 40, 7]).unwrap())
            .add_systems(Update, place_camera_over_terrain);
        let camera = app
            .world_mut()
            .spawn((Transform::default(), VignetteCamera))
            .id();
        app.update();

        let t = app.world().get::<Transform>(camera).unwrap();
        assert_eq!(*t, camera_start_transform(100, 4));
        assert_eq!(app.should_exit(), None);
    }

    #[test]
    fn test_missing_camera_exits_with_error() {
        let mut app = App::new();
        app.insert_resource(Heightmap::from_values(1, 1, vec![3]).unwrap())
            .add_systems(Update, place_camera_over_terrain);
        app.update();
        assert_eq!(app.should_exit(), Some(AppExit::error()));
    }

    #[test]
    fn test_advances_move_camera_along_z() {
        let mut app = App::new();
        app.add_event::<CameraAdvanced>()
            .add_systems(Update, apply_camera_advance);
        let camera = app
            .world_mut()
            .spawn((camera_start_transform(100, 1024), VignetteCamera))
            .id();

        app.world_mut().send_event(CameraAdvanced { dz: -250.0 });
        app.world_mut().send_event(CameraAdvanced { dz: -750.0 });
        app.update();

        let t = app.world().get::<Transform>(camera).unwrap();
        assert_eq!(t.translation.z, 3096.0);
        assert_eq!(t.translation.y, 750.0);
    }
}
