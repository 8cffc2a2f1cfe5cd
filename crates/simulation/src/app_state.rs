//! Top-level session state.
//!
//! The session starts in [`VignetteState::Loading`] while the heightmap task
//! and any presentation assets are in flight, then moves to
//! [`VignetteState::Running`] once nothing blocks it. Input and the motion
//! sequence only run in `Running`, so every asset the reveal needs is resident
//! before the first advance can be requested.

use std::collections::BTreeSet;

use bevy::prelude::*;

use crate::heightmap::Heightmap;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VignetteState {
    /// Terrain generating and/or assets loading. Nothing moves.
    #[default]
    Loading,
    /// Terrain presented; clicks advance the camera.
    Running,
}

/// Named reasons the session cannot leave `Loading` yet.
///
/// Crates that need something resident before the sequence may start (fonts,
/// textures) add a blocker at startup and release it once ready.
#[derive(Resource, Debug, Default)]
pub struct LoadingBlockers {
    blockers: BTreeSet<&'static str>,
}

impl LoadingBlockers {
    pub fn block(&mut self, name: &'static str) {
        self.blockers.insert(name);
    }

    pub fn release(&mut self, name: &'static str) {
        self.blockers.remove(name);
    }

    pub fn is_clear(&self) -> bool {
        self.blockers.is_empty()
    }

    pub fn pending(&self) -> impl Iterator<Item = &&'static str> {
        self.blockers.iter()
    }
}

/// System: enter `Running` once the heightmap exists and no blockers remain.
pub fn enter_running_when_ready(
    heightmap: Option<Res<Heightmap>>,
    blockers: Res<LoadingBlockers>,
    mut next_state: ResMut<NextState<VignetteState>>,
) {
    if heightmap.is_none() || !blockers.is_clear() {
        return;
    }
    info!("Loading complete, vignette running");
    next_state.set(VignetteState::Running);
}
