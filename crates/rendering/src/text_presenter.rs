//! World-space label revealed at the end of the sequence.
//!
//! Bevy has no extruded 3D text, so the label is laid out by the regular text
//! pipeline on a private render layer, rendered by an offscreen `Camera2d`
//! into an image, and that image is shown on a quad in the 3D scene.

use bevy::prelude::*;
use bevy::render::camera::RenderTarget;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat, TextureUsages};
use bevy::render::view::RenderLayers;

use simulation::config::{HEIGHT_SCALE, TEXT_OFFSET_X, TEXT_SCALE};
use simulation::heightmap::Heightmap;
use simulation::motion::{RevealStarted, TextGlided};

use crate::camera::VignetteCamera;
use crate::loading::PresentationAssets;

/// Offscreen label image, in pixels.
pub const TEXT_IMAGE_SIZE: UVec2 = UVec2::new(2048, 512);
/// Unscaled quad size in world units; same aspect as the image.
pub const TEXT_QUAD_SIZE: Vec2 = Vec2::new(1000.0, 250.0);
/// Render layer reserved for the offscreen label.
pub const TEXT_LAYER: usize = 1;
/// Label height as a multiple of the highest terrain point.
const HEIGHT_OVER_PEAK: f32 = 1.2;

/// The quad carrying the revealed label.
#[derive(Component)]
pub struct RevealText;

/// World Y of the label for a map whose highest point is `max_height`.
pub fn text_height(max_height: u8) -> f32 {
    max_height as f32 * HEIGHT_SCALE * HEIGHT_OVER_PEAK
}

/// Pixel font size that makes glyphs `size` world units tall on the quad.
pub fn font_pixels(size: f32) -> f32 {
    size * TEXT_IMAGE_SIZE.y as f32 / TEXT_QUAD_SIZE.y
}

/// Initial label transform.
///
/// The orientation is taken as if the label stood at `target_depth` facing
/// the camera; the label then starts at `start_depth`, offset along X, and
/// keeps that orientation while it glides.
pub fn text_start_transform(
    camera: Vec3,
    height: f32,
    start_depth: f32,
    target_depth: f32,
) -> Transform {
    let anchor = Vec3::new(0.0, height, target_depth);
    // The quad's visible face is its local +Z, so -Z points away from the camera.
    let rotation = Transform::from_translation(anchor)
        .looking_to(anchor - camera, Vec3::Y)
        .rotation;
    Transform {
        translation: Vec3::new(TEXT_OFFSET_X, height, start_depth),
        rotation,
        scale: Vec3::splat(TEXT_SCALE),
    }
}

fn label_image() -> Image {
    let size = Extent3d {
        width: TEXT_IMAGE_SIZE.x,
        height: TEXT_IMAGE_SIZE.y,
        depth_or_array_layers: 1,
    };
    let mut image = Image::new_fill(
        size,
        TextureDimension::D2,
        &[0, 0, 0, 0],
        TextureFormat::Bgra8UnormSrgb,
        RenderAssetUsages::default(),
    );
    image.texture_descriptor.usage =
        TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST | TextureUsages::RENDER_ATTACHMENT;
    image
}

/// Construct the label when the reveal starts. Runs its body at most once per
/// session.
#[allow(clippy::too_many_arguments)]
pub fn spawn_reveal_text(
    mut commands: Commands,
    mut reveals: EventReader<RevealStarted>,
    existing: Query<(), With<RevealText>>,
    camera: Query<&Transform, With<VignetteCamera>>,
    heightmap: Option<Res<Heightmap>>,
    assets: Res<PresentationAssets>,
    mut images: ResMut<Assets<Image>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(reveal) = reveals.read().last() else {
        return;
    };
    if !existing.is_empty() {
        warn!("Reveal requested twice, keeping the existing label");
        return;
    }

    let Ok(camera) = camera.get_single() else {
        error!("Reveal started without a single vignette camera");
        exit.send(AppExit::error());
        return;
    };
    let Some(heightmap) = heightmap else {
        error!("Reveal started before the heightmap was ready");
        exit.send(AppExit::error());
        return;
    };
    let camera_pos = camera.translation;
    let height = text_height(heightmap.max_height());
    let image = images.add(label_image());

    commands.spawn((
        Camera2d,
        Camera {
            target: RenderTarget::Image(image.clone()),
            clear_color: ClearColorConfig::Custom(Color::NONE),
            order: -1,
            ..default()
        },
        RenderLayers::layer(TEXT_LAYER),
    ));

    commands.spawn((
        Text2d::new(reveal.label.clone()),
        TextFont {
            font: assets.font.clone().unwrap_or_default(),
            font_size: font_pixels(reveal.size),
            ..default()
        },
        TextColor(Color::WHITE),
        RenderLayers::layer(TEXT_LAYER),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Rectangle::from_size(TEXT_QUAD_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(image),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })),
        text_start_transform(camera_pos, height, reveal.depth, reveal.target_depth),
        RevealText,
    ));

    info!("Revealing {:?} at height {height}", reveal.label);
}

/// Follow the sequencer's text depth.
pub fn apply_text_glide(
    mut glides: EventReader<TextGlided>,
    mut query: Query<&mut Transform, With<RevealText>>,
) {
    let Some(glide) = glides.read().last() else {
        return;
    };
    for mut transform in &mut query {
        transform.translation.z = glide.depth;
    }
}
