//! Click-driven camera advances followed by the text reveal.
//!
//! [`MotionSequencer`] holds all timing state and is advanced once per frame by
//! [`drive_motion_sequence`]. Rendering never reads the sequencer directly; it
//! reacts to the events emitted here.

mod sequencer;
mod systems;
mod types;

pub use sequencer::MotionSequencer;
pub use systems::{drive_motion_sequence, queue_advance_requests, MotionPlugin};
pub use types::{
    AdvanceRequested, CameraAdvanced, MotionSet, RevealStarted, SequenceFinished, SequencePhase,
    SequenceStep, TextGlided,
};
