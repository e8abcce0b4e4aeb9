//! # Coordinator
//!
//! [`ChordLab`] wires the three state holders together: the session state,
//! the progression store, and the playback sequencer. It is the only owner
//! of mutable state; every operation below is a thin, synchronous entry
//! point over the core, in charge of the couplings the individual parts
//! stay agnostic about:
//!
//! - appending to the progression requires a selected chord;
//! - loading a progression (template, generated, or explicit) atomically
//!   clears the single-chord selection and its melody overlay;
//! - volume changes reach both the session state and the engine.
//!
//! ## Example
//! ```rust
//! use chordlab::{CapturingEngine, ChordLab, PlaybackConfig};
//!
//! let mut lab = ChordLab::new(CapturingEngine::new(), PlaybackConfig::default());
//! lab.engine_ready();
//! lab.select_chord("Am7");
//! lab.play();
//! assert_eq!(lab.engine().events().len(), 1);
//! ```

use log::debug;

use crate::config::PlaybackConfig;
use crate::engine::AudioEngine;
use crate::playback::{NoteLength, PlaybackStyle, Sequencer, VelocityLevel};
use crate::progression::ProgressionStore;
use crate::session::SessionState;
use crate::theory::Pitch;

/// The chord-exploration coordinator: one session, one progression, one
/// sequencer, no ambient globals.
pub struct ChordLab<E: AudioEngine> {
    session: SessionState,
    progression: ProgressionStore,
    sequencer: Sequencer<E>,
}

impl<E: AudioEngine> ChordLab<E> {
    pub fn new(engine: E, config: PlaybackConfig) -> Self {
        let volume_db = config.master_volume_db;
        let mut sequencer = Sequencer::new(engine, config);
        sequencer.set_volume(volume_db);

        let session = SessionState {
            volume_db,
            ..SessionState::default()
        };

        Self {
            session,
            progression: ProgressionStore::new(),
            sequencer,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn progression(&self) -> &ProgressionStore {
        &self.progression
    }

    pub fn engine(&self) -> &E {
        self.sequencer.engine()
    }

    pub fn engine_mut(&mut self) -> &mut E {
        self.sequencer.engine_mut()
    }

    pub fn config(&self) -> &PlaybackConfig {
        self.sequencer.config()
    }

    // ---- selection ----

    /// Select a chord by symbol. Returns `false` (and clears the selection)
    /// when the symbol does not resolve.
    pub fn select_chord(&mut self, symbol: &str) -> bool {
        self.session.select_chord(symbol)
    }

    pub fn clear_selection(&mut self) {
        self.session.clear_selection();
    }

    pub fn toggle_melody_note(&mut self, pitch: Pitch) {
        self.session.toggle_melody_note(pitch);
    }

    pub fn set_bass(&mut self, enabled: bool) {
        self.session.bass_enabled = enabled;
    }

    pub fn set_harmonics(&mut self, enabled: bool) {
        self.session.harmonics = enabled;
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.session.muted = muted;
    }

    pub fn set_style(&mut self, style: PlaybackStyle) {
        self.session.style = style;
    }

    pub fn set_note_length(&mut self, length: NoteLength) {
        self.session.note_length = length;
    }

    pub fn set_velocity(&mut self, level: VelocityLevel) {
        self.session.velocity = level;
    }

    /// Set the master volume, on the session and the engine both.
    pub fn set_volume_db(&mut self, db: f32) {
        self.session.volume_db = db;
        self.sequencer.set_volume(db);
    }

    // ---- playback ----

    /// Play the current selection (chord + bass + melody overlays).
    pub fn play(&mut self) {
        self.sequencer.play_chord(&self.session);
    }

    /// Play one ad-hoc key press.
    pub fn play_key(&mut self, pitch: Pitch) {
        self.sequencer.play_key(pitch, &self.session);
    }

    /// Toggle the single-chord loop. Turning it on arms the re-trigger
    /// interval; turning it off lets the pending tick lapse.
    pub fn set_looping(&mut self, enabled: bool) {
        self.session.loop_enabled = enabled;
        if enabled {
            self.sequencer.start_loop(&self.session);
        }
    }

    pub fn set_eight_bar_loop(&mut self, enabled: bool) {
        self.session.eight_bar_loop = enabled;
    }

    /// Walk the stored progression from the top.
    pub fn play_progression(&mut self) {
        self.sequencer.play_progression(&self.progression);
    }

    // ---- progression ----

    /// Append the selected chord to the progression. Without a selection
    /// this is a no-op.
    pub fn add_to_progression(&mut self) {
        let Some(selected) = &self.session.selected_chord else {
            debug!("no chord selected, nothing appended");
            return;
        };
        self.progression.append(selected.symbol.clone());
    }

    /// Replace the progression wholesale and reset the single-chord
    /// selection, melody included.
    pub fn load_progression(&mut self, symbols: impl IntoIterator<Item = String>) {
        self.progression.replace_all(symbols);
        self.session.clear_selection();
    }

    /// Load a built-in template by name.
    pub fn load_template(&mut self, name: &str) -> bool {
        match crate::progression::template(name) {
            Some(t) => {
                self.load_progression(t.chords.iter().map(|s| s.to_string()));
                true
            }
            None => false,
        }
    }

    pub fn clear_progression(&mut self) {
        self.progression.clear();
    }

    // ---- clock & engine lifecycle ----

    /// Signal that the audio backend finished its asynchronous startup.
    pub fn engine_ready(&mut self) {
        self.sequencer.mark_ready();
    }

    /// Advance the logical clock, firing due scheduled work.
    pub fn advance_to(&mut self, t_ms: u64) {
        self.sequencer.advance_to(t_ms, &self.session, &self.progression);
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.sequencer.next_deadline()
    }

    pub fn is_idle(&self) -> bool {
        self.sequencer.is_idle()
    }

    /// Pitches currently published for keyboard highlighting.
    pub fn active_pitches(&self) -> Vec<Pitch> {
        self.sequencer.active_pitches()
    }
}
