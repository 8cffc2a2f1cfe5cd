use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use simulation::vignette_config::VignetteConfig;

#[cfg(not(target_arch = "wasm32"))]
mod ascii_mode;

fn main() -> AppExit {
    #[cfg(not(target_arch = "wasm32"))]
    if std::env::args().any(|arg| arg == "--ascii") {
        return match VignetteConfig::from_env() {
            Ok(config) => ascii_mode::run_ascii_mode(config),
            Err(e) => {
                eprintln!("vignette: {e}");
                AppExit::error()
            }
        };
    }

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "The End".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    });

    // LogPlugin is live from here on, so configuration errors go through `error!`.
    let config = match VignetteConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {e}");
            return AppExit::error();
        }
    };
    app.insert_resource(config);

    app.add_plugins((simulation::SimulationPlugin, rendering::RenderingPlugin));

    // Frame statistics: periodic frame-time lines in the log.
    if std::env::var("VIGNETTE_FRAME_STATS").is_ok_and(|v| v == "1") {
        app.add_plugins((
            FrameTimeDiagnosticsPlugin,
            LogDiagnosticsPlugin::default(),
        ));
    }

    app.run()
}
