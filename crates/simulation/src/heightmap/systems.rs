use bevy::prelude::*;
use bevy::tasks::{block_on, AsyncComputeTaskPool, Task};
use bevy::utils::Instant;

use crate::app_state::VignetteState;
use crate::terrain_rng::TerrainRng;
use crate::vignette_config::VignetteConfig;

use super::builder::HeightmapBuilder;
use super::types::{Heightmap, HeightmapError};

/// In-flight heightmap generation. Removed once the result is collected.
#[derive(Resource)]
pub struct HeightmapTask(Task<Result<Heightmap, HeightmapError>>);

/// Startup: validate the configured size, draw the `z` slice and generate the
/// heightmap off the main thread.
pub fn spawn_heightmap_task(
    mut commands: Commands,
    config: Res<VignetteConfig>,
    mut rng: ResMut<TerrainRng>,
    mut exit: EventWriter<AppExit>,
) {
    let (width, height) = (config.world_width, config.world_depth);
    let builder = HeightmapBuilder::default();
    let z = match builder.draw_slice(width, height, &mut rng.0) {
        Ok(z) => z,
        Err(e) => {
            error!("Terrain generation rejected: {e}");
            exit.send(AppExit::error());
            return;
        }
    };
    info!("Generating {width}x{height} heightmap (z = {z:.4})");

    let task = AsyncComputeTaskPool::get().spawn(async move {
        #[cfg(feature = "trace")]
        let _span = bevy::log::info_span!("build_heightmap").entered();
        let start = Instant::now();
        let result = builder.build_with_z(width, height, z);
        debug!("Heightmap built in {:?}", start.elapsed());
        result
    });
    commands.insert_resource(HeightmapTask(task));
}

/// Poll the generation task; publish the finished map as a resource.
pub fn collect_heightmap(
    mut commands: Commands,
    task: Option<ResMut<HeightmapTask>>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(mut task) = task else {
        return;
    };
    let Some(result) = block_on(futures_lite::future::poll_once(&mut task.0)) else {
        return;
    };
    commands.remove_resource::<HeightmapTask>();

    match result {
        Ok(heightmap) => {
            info!(
                "Heightmap ready: {} cells, max elevation {}",
                heightmap.len(),
                heightmap.max_height()
            );
            commands.insert_resource(heightmap);
        }
        Err(e) => {
            error!("Terrain generation failed: {e}");
            exit.send(AppExit::error());
        }
    }
}

pub struct HeightmapPlugin;

impl Plugin for HeightmapPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_heightmap_task).add_systems(
            Update,
            collect_heightmap.run_if(in_state(VignetteState::Loading)),
        );
    }
}
