use bevy::prelude::*;

use crate::app_state::VignetteState;
use crate::config::{TEXT_SIZE, TEXT_TARGET_DEPTH};
use crate::vignette_config::VignetteConfig;

use super::sequencer::MotionSequencer;
use super::types::{
    AdvanceRequested, CameraAdvanced, MotionSet, RevealStarted, SequenceFinished, TextGlided,
};

// =============================================================================
// Systems
// =============================================================================

/// Move this frame's `AdvanceRequested` events into the sequencer queue.
pub fn queue_advance_requests(
    mut requests: EventReader<AdvanceRequested>,
    mut sequencer: ResMut<MotionSequencer>,
) {
    for _ in requests.read() {
        sequencer.request_advance();
    }
}

/// Frame driver: tick the sequencer once with this frame's delta and forward
/// what changed as events.
pub fn drive_motion_sequence(
    time: Res<Time>,
    config: Res<VignetteConfig>,
    mut sequencer: ResMut<MotionSequencer>,
    mut camera: EventWriter<CameraAdvanced>,
    mut reveal: EventWriter<RevealStarted>,
    mut glide: EventWriter<TextGlided>,
    mut finished: EventWriter<SequenceFinished>,
) {
    if sequencer.is_finished() {
        return;
    }

    let step = sequencer.tick(time.delta_secs());
    if step.is_idle() {
        return;
    }

    if step.camera_dz != 0.0 {
        camera.send(CameraAdvanced { dz: step.camera_dz });
    }
    if step.reveal_started {
        reveal.send(RevealStarted {
            label: config.label.clone(),
            size: TEXT_SIZE,
            depth: sequencer.text_depth().unwrap_or_default(),
            target_depth: TEXT_TARGET_DEPTH,
        });
    }
    if let Some(depth) = step.text_depth {
        glide.send(TextGlided { depth });
    }
    if step.finished {
        finished.send(SequenceFinished);
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct MotionPlugin;

impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MotionSequencer>()
            .add_event::<AdvanceRequested>()
            .add_event::<CameraAdvanced>()
            .add_event::<RevealStarted>()
            .add_event::<TextGlided>()
            .add_event::<SequenceFinished>()
            .configure_sets(
                Update,
                (MotionSet::Input, MotionSet::Sequence, MotionSet::Present)
                    .chain()
                    .run_if(in_state(VignetteState::Running)),
            )
            .add_systems(
                Update,
                (queue_advance_requests, drive_motion_sequence)
                    .chain()
                    .in_set(MotionSet::Sequence),
            );
    }
}
