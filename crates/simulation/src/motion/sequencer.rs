use std::collections::VecDeque;

use bevy::prelude::*;

use crate::config::{
    ADVANCE_COUNT, ADVANCE_DURATION, CAMERA_SPEED, INPUT_QUEUE_CAPACITY, TEXT_SPEED,
    TEXT_START_DEPTH, TEXT_TARGET_DEPTH,
};

use super::types::{AdvanceRequested, SequencePhase, SequenceStep};

/// Camera-advance and text-reveal state for one session.
///
/// Requests are queued with [`request_advance`](Self::request_advance) and
/// applied at the start of the next [`tick`](Self::tick), before the elapsed
/// time is. A tick then moves the camera, hands off to the reveal when the last
/// advance completes, and glides the text toward its target.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MotionSequencer {
    remaining_advances: u32,
    advance_remaining: f32,
    reveal_target: Option<f32>,
    text_depth: Option<f32>,
    finished: bool,
    pending: VecDeque<AdvanceRequested>,
    total_dropped: u32,
}

impl Default for MotionSequencer {
    fn default() -> Self {
        Self::new(ADVANCE_COUNT)
    }
}

impl MotionSequencer {
    pub fn new(advances: u32) -> Self {
        Self {
            remaining_advances: advances,
            advance_remaining: 0.0,
            reveal_target: None,
            text_depth: None,
            finished: false,
            pending: VecDeque::with_capacity(INPUT_QUEUE_CAPACITY),
            total_dropped: 0,
        }
    }

    pub fn remaining_advances(&self) -> u32 {
        self.remaining_advances
    }

    /// Seconds left in the current advance (0 when the camera is still).
    pub fn advance_remaining(&self) -> f32 {
        self.advance_remaining
    }

    pub fn reveal_target(&self) -> Option<f32> {
        self.reveal_target
    }

    /// Current text depth, `None` until the reveal starts.
    pub fn text_depth(&self) -> Option<f32> {
        self.text_depth
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    /// Requests discarded over the session, including queue overflow.
    pub fn total_dropped(&self) -> u32 {
        self.total_dropped
    }

    pub fn phase(&self) -> SequencePhase {
        if self.finished {
            SequencePhase::Done
        } else if self.reveal_target.is_some() {
            SequencePhase::Revealing
        } else if self.advance_remaining > 0.0 {
            SequencePhase::Advancing
        } else if self.remaining_advances == 0 && self.text_depth.is_none() {
            SequencePhase::ReadyForReveal
        } else {
            SequencePhase::Idle
        }
    }

    /// Queue a request for the next tick. Returns `false` when the queue is
    /// full and the request was discarded.
    pub fn request_advance(&mut self) -> bool {
        if self.pending.len() >= INPUT_QUEUE_CAPACITY {
            self.total_dropped += 1;
            debug!("Advance request dropped: input queue full");
            return false;
        }
        self.pending.push_back(AdvanceRequested);
        true
    }

    /// Advance the sequence by `dt` seconds.
    ///
    /// Negative or NaN `dt` is treated as zero.
    pub fn tick(&mut self, dt: f32) -> SequenceStep {
        let dt = dt.max(0.0);
        let mut step = SequenceStep::default();
        let was_revealing = self.phase() == SequencePhase::Revealing;

        self.apply_pending(&mut step);

        if self.advance_remaining > 0.0 {
            let moved = dt.min(self.advance_remaining);
            self.advance_remaining -= moved;
            step.camera_dz = -moved * CAMERA_SPEED;
        }

        if self.phase() == SequencePhase::ReadyForReveal {
            self.reveal_target = Some(TEXT_TARGET_DEPTH);
            self.text_depth = Some(TEXT_START_DEPTH);
            step.reveal_started = true;
            info!("Final advance complete, revealing text");
        }

        // Text only moves on ticks after the reveal started.
        if was_revealing {
            if let (Some(target), Some(depth)) = (self.reveal_target, self.text_depth) {
                let next = (depth - dt * TEXT_SPEED).max(target);
                self.text_depth = Some(next);
                step.text_depth = Some(next);
                if next <= target {
                    self.reveal_target = None;
                    self.finished = true;
                    step.finished = true;
                    info!("Text reached depth {next}, sequence finished");
                }
            }
        }

        step
    }

    fn apply_pending(&mut self, step: &mut SequenceStep) {
        while let Some(AdvanceRequested) = self.pending.pop_front() {
            if self.phase() == SequencePhase::Idle && self.remaining_advances > 0 {
                self.remaining_advances -= 1;
                self.advance_remaining = ADVANCE_DURATION;
                step.advance_started = true;
                info!(
                    "Camera advance started, {} remaining",
                    self.remaining_advances
                );
            } else {
                step.dropped_requests += 1;
                self.total_dropped += 1;
                debug!("Advance request ignored in phase {:?}", self.phase());
            }
        }
    }
}
