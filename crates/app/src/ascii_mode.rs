//! Headless `--ascii` mode: generate the session's heightmap without opening a
//! window, print it as shaded ASCII and exit.
//!
//! Uses the same `SimulationPlugin` path as the windowed app, so the config
//! file, seed override and dimension checks behave identically.

use std::time::Duration;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use simulation::ascii_preview::build_preview;
use simulation::heightmap::Heightmap;
use simulation::vignette_config::VignetteConfig;

/// Characters per preview row.
const PREVIEW_COLUMNS: usize = 128;
/// Give up if generation has not finished after this long.
const GENERATION_TIMEOUT: Duration = Duration::from_secs(120);

pub fn run_ascii_mode(config: VignetteConfig) -> AppExit {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default(), StatesPlugin));
    app.insert_resource(config);
    app.add_plugins(simulation::SimulationPlugin);

    let start = std::time::Instant::now();
    loop {
        app.update();

        if let Some(exit) = app.should_exit() {
            return exit;
        }
        if let Some(heightmap) = app.world().get_resource::<Heightmap>() {
            println!("{}", build_preview(heightmap, PREVIEW_COLUMNS));
            return AppExit::Success;
        }
        if start.elapsed() > GENERATION_TIMEOUT {
            error!("Heightmap generation timed out after {GENERATION_TIMEOUT:?}");
            return AppExit::error();
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}
