//! # TestVignette, a headless harness for the vignette session
//!
//! Wraps `bevy::app::App` + `SimulationPlugin` with a fixed frame delta so
//! integration tests and benches can drive the whole click → advance → reveal
//! flow without a window or renderer.

use std::time::Duration;

use bevy::app::App;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use crate::app_state::VignetteState;
use crate::heightmap::Heightmap;
use crate::motion::{
    AdvanceRequested, CameraAdvanced, MotionSequencer, MotionSet, RevealStarted,
    SequenceFinished, TextGlided,
};
use crate::vignette_config::VignetteConfig;
use crate::SimulationPlugin;

/// Fixed frame delta. Stays at Bevy's default virtual-time clamp so no frame
/// is shortened.
pub const FRAME: Duration = Duration::from_millis(250);

/// Frames to wait for the background heightmap build before giving up.
const MAX_LOADING_FRAMES: usize = 2_000;

/// Everything the sequence emitted, in order.
#[derive(Resource, Debug, Default)]
pub struct EventLog {
    pub camera_dz: Vec<f32>,
    pub reveals: Vec<RevealStarted>,
    pub glides: Vec<f32>,
    pub finished: u32,
}

impl EventLog {
    pub fn camera_travel(&self) -> f32 {
        self.camera_dz.iter().sum()
    }
}

fn record_events(
    mut log: ResMut<EventLog>,
    mut camera: EventReader<CameraAdvanced>,
    mut reveal: EventReader<RevealStarted>,
    mut glide: EventReader<TextGlided>,
    mut finished: EventReader<SequenceFinished>,
) {
    log.camera_dz.extend(camera.read().map(|e| e.dz));
    log.reveals.extend(reveal.read().cloned());
    log.glides.extend(glide.read().map(|e| e.depth));
    log.finished += finished.read().count() as u32;
}

pub struct TestVignette {
    app: App,
}

impl TestVignette {
    /// Build a session with `config` and run the startup frame.
    pub fn new(config: VignetteConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(StatesPlugin);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));

        // Insert the config BEFORE SimulationPlugin so it seeds the terrain RNG.
        app.insert_resource(config);
        app.add_plugins(SimulationPlugin);

        app.init_resource::<EventLog>().add_systems(
            Update,
            record_events.after(MotionSet::Present),
        );

        app.update();
        Self { app }
    }

    /// A seeded 16x16 session, fast enough for unit-speed tests.
    pub fn small(seed: u64) -> Self {
        Self::new(VignetteConfig {
            world_width: 16,
            world_depth: 16,
            seed: Some(seed),
            ..VignetteConfig::default()
        })
    }

    pub fn frame_secs() -> f32 {
        FRAME.as_secs_f32()
    }

    pub fn update(&mut self) -> &mut Self {
        self.app.update();
        self
    }

    pub fn tick(&mut self, frames: usize) -> &mut Self {
        for _ in 0..frames {
            self.app.update();
        }
        self
    }

    /// Update until the heightmap is collected and the state machine has
    /// entered `Running`.
    ///
    /// # Panics
    /// If loading does not finish within a generous frame budget.
    pub fn run_until_running(&mut self) -> &mut Self {
        for _ in 0..MAX_LOADING_FRAMES {
            if self.state() == VignetteState::Running {
                return self;
            }
            self.app.update();
            std::thread::sleep(Duration::from_millis(1));
        }
        panic!("vignette never left Loading");
    }

    /// Simulate one viewer click.
    pub fn click(&mut self) -> &mut Self {
        self.app.world_mut().send_event(AdvanceRequested);
        self
    }

    /// Click and run frames until the advance it started has finished.
    pub fn click_and_settle(&mut self) -> &mut Self {
        self.click().update();
        while self.sequencer().advance_remaining() > 0.0 {
            self.app.update();
        }
        self
    }

    pub fn state(&self) -> VignetteState {
        *self.app.world().resource::<State<VignetteState>>().get()
    }

    pub fn heightmap(&self) -> Option<&Heightmap> {
        self.app.world().get_resource::<Heightmap>()
    }

    pub fn sequencer(&self) -> &MotionSequencer {
        self.app.world().resource::<MotionSequencer>()
    }

    pub fn log(&self) -> &EventLog {
        self.app.world().resource::<EventLog>()
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}
