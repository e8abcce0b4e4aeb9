//! # Playback Module
//!
//! Turn the current selection into sound: derive the pitch list, then issue
//! timed trigger instructions to the audio engine.
//!
//! ## Sub-modules
//! - `types` - TriggerEvent, PlaybackStyle, NoteLength, VelocityLevel
//! - `derive` - Playback-set derivation (bass + chord + melody, harmonics spread)
//! - `sequencer` - Logical-clock event queue, progression walk, chord loop
//!
//! ## Key Types
//! - [`TriggerEvent`] - One instruction for the audio engine
//! - [`Sequencer`] - The timer queue and trigger dispatcher
//!
//! ## Entry Points
//! - [`derive_playback_set()`] - Selection state to ordered pitch list
//! - [`Sequencer::play_chord()`] / [`Sequencer::play_progression()`]
//!
//! ## Timing
//!
//! The sequencer runs on a logical millisecond clock. Nothing here sleeps;
//! a driver advances the clock to each deadline (the CLI does this, tests
//! advance it directly). Scheduled work is never revoked early: a fired
//! entry re-checks the flags it depends on and quietly does nothing when
//! they no longer hold.

mod derive;
mod sequencer;
mod types;

#[cfg(test)]
mod tests;

pub use derive::{derive_playback_set, BASS_OCTAVE, CHORD_OCTAVE, MELODY_OCTAVE};
pub use sequencer::Sequencer;
pub use types::{NoteLength, PlaybackStyle, TriggerEvent, VelocityLevel};
