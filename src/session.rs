//! Session state
//!
//! One explicit state object holds everything the user has selected or
//! toggled: the current chord, melody overlay, playback flags, and loudness
//! settings. The coordinator owns it and passes it by reference into
//! derivation and sequencing; there are no ambient globals.

use log::debug;
use serde::Serialize;

use crate::playback::{NoteLength, PlaybackStyle, VelocityLevel};
use crate::theory::{resolve_chord, Pitch, PitchClass};

/// The currently selected chord, kept with its resolved pitch material so
/// playback never re-parses the symbol.
#[derive(Debug, Clone, Serialize)]
pub struct SelectedChord {
    pub symbol: String,
    pub root: PitchClass,
    pub pitch_classes: Vec<PitchClass>,
}

/// All user-facing selection and toggle state for one session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub selected_chord: Option<SelectedChord>,
    /// Melody overlay pitches, pre-formed with their octave.
    pub melody: Vec<Pitch>,
    /// Include a bass pitch derived from the chord root.
    pub bass_enabled: bool,
    /// Spread chord pitches across ascending octaves.
    pub harmonics: bool,
    /// Suppress all trigger instructions.
    pub muted: bool,
    /// Re-trigger the selected chord on a fixed interval.
    pub loop_enabled: bool,
    /// Restart progression playback after a closing pause.
    pub eight_bar_loop: bool,
    pub style: PlaybackStyle,
    pub note_length: NoteLength,
    pub velocity: VelocityLevel,
    pub volume_db: f32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            selected_chord: None,
            melody: Vec::new(),
            bass_enabled: true,
            harmonics: false,
            muted: false,
            loop_enabled: false,
            eight_bar_loop: false,
            style: PlaybackStyle::Simultaneous,
            note_length: NoteLength::Medium,
            velocity: VelocityLevel::Medium,
            volume_db: -6.0,
        }
    }
}

impl SessionState {
    /// Resolve and select a chord symbol.
    ///
    /// An unrecognized symbol clears the selection and returns `false`;
    /// nothing will highlight or sound until a valid symbol is entered.
    pub fn select_chord(&mut self, symbol: &str) -> bool {
        match resolve_chord(symbol) {
            Some(chord) => {
                debug!("selected {} ({} pitches)", symbol, chord.pitch_classes.len());
                self.selected_chord = Some(SelectedChord {
                    symbol: symbol.to_string(),
                    root: chord.root,
                    pitch_classes: chord.pitch_classes,
                });
                true
            }
            None => {
                debug!("unresolvable chord symbol {:?}", symbol);
                self.selected_chord = None;
                false
            }
        }
    }

    /// Drop the chord selection and the melody overlay built on top of it.
    pub fn clear_selection(&mut self) {
        self.selected_chord = None;
        self.melody.clear();
    }

    /// Add a melody pitch, or remove it if it is already present.
    pub fn toggle_melody_note(&mut self, pitch: Pitch) {
        if let Some(pos) = self.melody.iter().position(|p| *p == pitch) {
            self.melody.remove(pos);
        } else {
            self.melody.push(pitch);
        }
    }

    /// The bass pitch class to derive from, honoring the bass toggle.
    pub fn bass_root(&self) -> Option<PitchClass> {
        if !self.bass_enabled {
            return None;
        }
        self.selected_chord.as_ref().map(|c| c.root)
    }
}
