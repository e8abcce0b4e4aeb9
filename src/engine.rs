//! Audio engine boundary
//!
//! The sequencer drives sound through the [`AudioEngine`] trait and nothing
//! else; synthesis itself is an external concern. The crate ships a
//! [`CapturingEngine`] that records every instruction, used by the CLI to
//! print trigger timelines and by tests to assert on them.

use log::debug;

use crate::playback::TriggerEvent;

/// The surface the sequencer needs from an audio backend.
///
/// Implementations receive fully-formed trigger instructions; readiness
/// gating, jitter, and timing all happen upstream in the sequencer. Engine
/// teardown is `Drop`.
pub trait AudioEngine {
    /// Sound the pitches of one trigger instruction.
    fn trigger(&mut self, event: &TriggerEvent);

    /// Set the master output volume in decibels.
    fn set_volume(&mut self, db: f32);
}

/// An engine that records every instruction instead of making sound.
#[derive(Debug, Default)]
pub struct CapturingEngine {
    events: Vec<TriggerEvent>,
    volume_db: Option<f32>,
}

impl CapturingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// All instructions received so far, in dispatch order.
    pub fn events(&self) -> &[TriggerEvent] {
        &self.events
    }

    /// Take the instructions received since the last drain.
    pub fn drain(&mut self) -> Vec<TriggerEvent> {
        std::mem::take(&mut self.events)
    }

    /// The most recent volume setting, if any.
    pub fn volume_db(&self) -> Option<f32> {
        self.volume_db
    }
}

impl AudioEngine for CapturingEngine {
    fn trigger(&mut self, event: &TriggerEvent) {
        debug!(
            "trigger {} pitch(es), {} at {:+.1}dB",
            event.pitches.len(),
            event.length.token(),
            event.velocity_db
        );
        self.events.push(event.clone());
    }

    fn set_volume(&mut self, db: f32) {
        self.volume_db = Some(db);
    }
}
