use bevy::ecs::schedule::SystemConfigs;
use bevy::prelude::*;

pub mod camera;
pub mod input;
pub mod loading;
pub mod terrain_mesh;
pub mod text_presenter;

use simulation::app_state::VignetteState;
use simulation::heightmap::Heightmap;
use simulation::motion::MotionSet;

/// Scene background behind the terrain.
pub const BACKGROUND: Color = Color::srgb(0x40 as f32 / 255.0, 0x40 as f32 / 255.0, 0x40 as f32 / 255.0);

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(BACKGROUND))
            .init_resource::<loading::PresentationAssets>()
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    setup_lighting,
                    loading::load_presentation_assets,
                ),
            )
            .add_systems(
                Update,
                (
                    terrain_mesh::spawn_terrain,
                    camera::place_camera_over_terrain,
                )
                    .run_if(resource_added::<Heightmap>),
            )
            .add_systems(
                Update,
                loading::track_presentation_assets.run_if(in_state(VignetteState::Loading)),
            )
            .add_systems(
                Update,
                input::request_advance_on_click.in_set(MotionSet::Input),
            )
            .add_systems(Update, present_systems().in_set(MotionSet::Present));
    }
}

/// Presentation systems in frame order. The label is built from the camera
/// pose after this frame's advance has been applied.
pub fn present_systems() -> SystemConfigs {
    (
        camera::apply_camera_advance,
        text_presenter::spawn_reveal_text,
        text_presenter::apply_text_glide,
    )
        .chain()
}

fn setup_lighting(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.9, 1.0),
        brightness: 400.0,
    });

    // Low sun from behind the camera.
    commands.spawn((
        DirectionalLight {
            illuminance: 9000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_4,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
    ));
}

#[cfg(test)]
mod tests {
    use bevy::ecs::schedule::{LogLevel, ScheduleBuildSettings};

    use simulation::heightmap::Heightmap;
    use simulation::motion::{CameraAdvanced, RevealStarted, TextGlided};

    use super::*;
    use crate::camera::VignetteCamera;
    use crate::loading::PresentationAssets;
    use crate::text_presenter::{text_height, text_start_transform, RevealText};

    fn present_app() -> App {
        let mut app = App::new();
        app.add_event::<CameraAdvanced>()
            .add_event::<RevealStarted>()
            .add_event::<TextGlided>()
            .init_resource::<Assets<Image>>()
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<PresentationAssets>()
            .insert_resource(Heightmap::from_values(2, 2, vec![0, 50, 100, 25]).unwrap())
            .add_systems(Update, present_systems());
        app.edit_schedule(Update, |schedule| {
            schedule.set_build_settings(ScheduleBuildSettings {
                ambiguity_detection: LogLevel::Error,
                ..default()
            });
        });
        app
    }

    #[test]
    fn test_present_systems_have_no_ambiguous_order() {
        let mut app = present_app();
        app.update();
    }

    #[test]
    fn test_label_faces_camera_after_final_advance() {
        let mut app = present_app();
        let start = Vec3::new(0.0, 750.0, -5000.0);
        app.world_mut()
            .spawn((Transform::from_translation(start), VignetteCamera));

        app.world_mut().send_event(CameraAdvanced { dz: -250.0 });
        app.world_mut().send_event(RevealStarted {
            label: "The End".to_string(),
            size: 200.0,
            depth: 0.0,
            target_depth: -5500.0,
        });
        app.update();

        let text = app
            .world_mut()
            .query_filtered::<&Transform, With<RevealText>>()
            .single(app.world())
            .rotation;
        let height = text_height(100);
        let after = text_start_transform(Vec3::new(0.0, 750.0, -5250.0), height, 0.0, -5500.0);
        let before = text_start_transform(start, height, 0.0, -5500.0);
        assert!(text.angle_between(after.rotation) < 1e-5);
        assert!(text.angle_between(before.rotation) > 0.1);
    }
}
