use bevy::prelude::*;

// =============================================================================
// Events
// =============================================================================

/// A viewer asked the camera to move forward. Produced by the input layer.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdvanceRequested;

/// The camera moved along Z by `dz` world units this frame (negative = forward).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CameraAdvanced {
    pub dz: f32,
}

/// The final advance finished; the label should be constructed now.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct RevealStarted {
    pub label: String,
    pub size: f32,
    /// Depth the text starts at.
    pub depth: f32,
    /// Depth the text glides toward.
    pub target_depth: f32,
}

/// The revealed text moved to a new depth.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TextGlided {
    pub depth: f32,
}

/// The text reached its resting depth. Nothing moves after this.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SequenceFinished;

// =============================================================================
// Phases and step output
// =============================================================================

/// Derived position of the sequencer in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequencePhase {
    /// Waiting for a request; advances may remain.
    Idle,
    /// Camera moving forward.
    Advancing,
    /// Every advance is spent and the reveal has not begun. Only observable
    /// inside a tick unless the sequencer was built with zero advances.
    ReadyForReveal,
    /// Text gliding toward its target depth.
    Revealing,
    /// Terminal.
    Done,
}

/// What one call to [`MotionSequencer::tick`](super::MotionSequencer::tick)
/// changed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SequenceStep {
    /// Camera Z delta for this tick (0 when the camera is still).
    pub camera_dz: f32,
    /// A queued request started a new advance this tick.
    pub advance_started: bool,
    /// The text entity must be constructed this tick.
    pub reveal_started: bool,
    /// New text depth when the text moved this tick.
    pub text_depth: Option<f32>,
    /// The text reached its target this tick.
    pub finished: bool,
    /// Queued requests discarded because they arrived while advancing or
    /// after the advances ran out.
    pub dropped_requests: u32,
}

impl SequenceStep {
    pub fn is_idle(&self) -> bool {
        *self == SequenceStep::default()
    }
}

// =============================================================================
// Schedule sets
// =============================================================================

/// Ordered phases of the per-frame vignette loop in `Update`.
///
/// Configured as a chain: `Input` → `Sequence` → `Present`, and only runs while
/// the session is in `VignetteState::Running`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MotionSet {
    /// Device input turned into `AdvanceRequested`.
    Input,
    /// Requests queued and the sequencer ticked.
    Sequence,
    /// Camera and text follow the emitted events.
    Present,
}
