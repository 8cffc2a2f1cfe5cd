//! Optional presentation assets: the label font and the ground texture.
//!
//! Each configured asset holds a [`LoadingBlockers`] entry until it is
//! resident, so the session cannot start (and the reveal cannot fire) before
//! the text can be drawn. A configured asset that fails to load ends the app.

use bevy::asset::LoadState;
use bevy::image::{ImageAddressMode, ImageLoaderSettings, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;

use simulation::app_state::LoadingBlockers;
use simulation::vignette_config::VignetteConfig;

pub const FONT_BLOCKER: &str = "font";
pub const TEXTURE_BLOCKER: &str = "terrain_texture";

/// Handles for assets named in [`VignetteConfig`]. `None` means the built-in
/// fallback is used.
#[derive(Resource, Debug, Default, Clone)]
pub struct PresentationAssets {
    pub font: Option<Handle<Font>>,
    pub terrain_texture: Option<Handle<Image>>,
}

/// Sampler that tiles the ground texture instead of stretching it.
pub fn repeating_sampler() -> ImageSampler {
    ImageSampler::Descriptor(ImageSamplerDescriptor {
        address_mode_u: ImageAddressMode::Repeat,
        address_mode_v: ImageAddressMode::Repeat,
        ..ImageSamplerDescriptor::linear()
    })
}

/// Startup: request the configured assets and block the session on them.
pub fn load_presentation_assets(
    mut commands: Commands,
    config: Res<VignetteConfig>,
    asset_server: Res<AssetServer>,
    mut blockers: ResMut<LoadingBlockers>,
) {
    let font: Option<Handle<Font>> = config.font_path.as_ref().map(|path| {
        info!("Loading label font {path}");
        blockers.block(FONT_BLOCKER);
        asset_server.load(path.clone())
    });

    let terrain_texture: Option<Handle<Image>> = config.terrain_texture.as_ref().map(|path| {
        info!("Loading terrain texture {path}");
        blockers.block(TEXTURE_BLOCKER);
        asset_server.load_with_settings(path.clone(), |settings: &mut ImageLoaderSettings| {
            settings.sampler = repeating_sampler();
        })
    });

    commands.insert_resource(PresentationAssets {
        font,
        terrain_texture,
    });
}

/// Release blockers as assets arrive; exit on a failed load.
pub fn track_presentation_assets(
    assets: Res<PresentationAssets>,
    asset_server: Res<AssetServer>,
    mut blockers: ResMut<LoadingBlockers>,
    mut exit: EventWriter<AppExit>,
) {
    let tracked = [
        (FONT_BLOCKER, assets.font.as_ref().map(|h| h.id().untyped())),
        (
            TEXTURE_BLOCKER,
            assets.terrain_texture.as_ref().map(|h| h.id().untyped()),
        ),
    ];

    for (name, id) in tracked {
        let Some(id) = id else {
            continue;
        };
        match asset_server.get_load_state(id) {
            Some(LoadState::Loaded) => {
                if blockers.pending().any(|b| *b == name) {
                    info!("Asset ready: {name}");
                    blockers.release(name);
                }
            }
            Some(LoadState::Failed(err)) => {
                error!("Failed to load {name}: {err}");
                exit.send(AppExit::error());
            }
            _ => {}
        }
    }
}
