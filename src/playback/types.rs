//! Playback instruction type definitions
//!
//! These are the values handed to the audio engine: which pitches to sound,
//! for how long, how loud, and with what onset offset.

use serde::Serialize;

use crate::theory::Pitch;

/// How a playback set is sounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStyle {
    /// All pitches in one instruction, sounding together.
    Simultaneous,
    /// One instruction per pitch, onsets spaced by a fraction of a beat.
    Arpeggiated,
}

/// Duration class for a trigger, mapped to the note-length token the audio
/// engine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteLength {
    Short,
    Medium,
    Long,
}

impl NoteLength {
    /// Note-length token: eighth, half, or whole note.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Short => "8n",
            Self::Medium => "2n",
            Self::Long => "1n",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            _ => None,
        }
    }
}

/// Loudness class for a trigger.
///
/// Each level maps to a base loudness in decibels (see
/// [`PlaybackConfig`](crate::config::PlaybackConfig)); every play call adds a
/// small random jitter so repeats don't sound mechanical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VelocityLevel {
    Low,
    Medium,
    High,
}

impl VelocityLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// A single trigger instruction for the audio engine.
///
/// # Fields
/// - `pitches`: pitches to sound together in this instruction
/// - `length`: duration class (the engine consumes its token)
/// - `velocity_db`: jittered loudness in decibels
/// - `onset_beats`: onset offset from "now" in beats; 0 except for the
///   second and later steps of an arpeggio
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerEvent {
    pub pitches: Vec<Pitch>,
    pub length: NoteLength,
    pub velocity_db: f32,
    pub onset_beats: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_length_tokens() {
        assert_eq!(NoteLength::Short.token(), "8n");
        assert_eq!(NoteLength::Medium.token(), "2n");
        assert_eq!(NoteLength::Long.token(), "1n");
    }

    #[test]
    fn test_parsing() {
        assert_eq!(NoteLength::parse("Medium"), Some(NoteLength::Medium));
        assert_eq!(NoteLength::parse("whole"), None);
        assert_eq!(VelocityLevel::parse("high"), Some(VelocityLevel::High));
        assert_eq!(VelocityLevel::parse("loud"), None);
    }
}
