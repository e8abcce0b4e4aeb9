pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod playback;
pub mod progression;
pub mod session;
pub mod theory;

pub use app::ChordLab;
pub use config::PlaybackConfig;
pub use engine::{AudioEngine, CapturingEngine};
pub use error::LabError;
pub use playback::{
    derive_playback_set, NoteLength, PlaybackStyle, Sequencer, TriggerEvent, VelocityLevel,
    BASS_OCTAVE, CHORD_OCTAVE, MELODY_OCTAVE,
};
pub use progression::{
    diatonic_progression, template, ProgressionStore, ProgressionTemplate, TEMPLATES,
};
pub use session::{SelectedChord, SessionState};
pub use theory::{resolve_chord, resolve_scale, Pitch, PitchClass, ResolvedChord, ScaleKind};

/// Resolve a chord symbol and place its pitches at the base octave.
/// Convenience for callers that only need the keyboard highlight set.
pub fn chord_pitches(symbol: &str) -> Vec<Pitch> {
    match resolve_chord(symbol) {
        Some(chord) => chord
            .pitch_classes
            .iter()
            .map(|pc| pc.at_octave(CHORD_OCTAVE))
            .collect(),
        None => Vec::new(),
    }
}
