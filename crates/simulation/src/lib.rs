use bevy::prelude::*;

pub mod app_state;
pub mod ascii_preview;
pub mod config;
pub mod heightmap;
pub mod improved_noise;
pub mod motion;
pub mod terrain_rng;
pub mod vignette_config;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

use app_state::{enter_running_when_ready, LoadingBlockers, VignetteState};
use heightmap::{collect_heightmap, HeightmapPlugin};
use motion::MotionPlugin;
use terrain_rng::TerrainRng;
use vignette_config::VignetteConfig;

/// Terrain generation, the loading gate and the motion sequence.
///
/// Insert a [`VignetteConfig`] before adding this plugin to override the
/// defaults; its seed (if any) fixes the generated terrain.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<VignetteConfig>() {
            app.init_resource::<VignetteConfig>();
        }
        let seed = app.world().resource::<VignetteConfig>().seed;
        match seed {
            Some(seed) => info!("Terrain seed fixed at {seed}"),
            None => info!("Terrain seed drawn from entropy"),
        }

        app.insert_resource(TerrainRng::from_optional_seed(seed))
            .init_state::<VignetteState>()
            .init_resource::<LoadingBlockers>();

        app.add_plugins((HeightmapPlugin, MotionPlugin));

        app.add_systems(
            Update,
            enter_running_when_ready
                .after(collect_heightmap)
                .run_if(in_state(VignetteState::Loading)),
        );
    }
}
