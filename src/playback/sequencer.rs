//! Playback sequencing engine
//!
//! Issues timed trigger instructions to the audio engine from a
//! single-threaded, logical-clock event queue.
//!
//! ## Timing model
//!
//! All timing is cooperative: work is scheduled as `(fire_at_ms, action)`
//! entries on one ordered queue, and [`Sequencer::advance_to`] fires every
//! entry due at or before the given time, in `(time, insertion)` order. A
//! wall-clock driver sleeps until [`Sequencer::next_deadline`] and advances;
//! tests advance the logical clock directly and get deterministic runs.
//!
//! ## Cancellation
//!
//! Scheduled entries are never revoked. Toggling a flag off means the next
//! fired entry for it notices, does nothing, and does not re-arm. A
//! progression pass snapshots its chord list when scheduled, so clearing the
//! store mid-pass does not halt steps already on the queue; the eight-bar
//! restart re-reads the store at the pass boundary.
//!
//! ## Readiness
//!
//! Audio backends start asynchronously. Until [`Sequencer::mark_ready`] is
//! called, trigger instructions queue up FIFO instead of being dropped, and
//! flush in order on readiness.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use log::debug;

use crate::config::PlaybackConfig;
use crate::engine::AudioEngine;
use crate::progression::ProgressionStore;
use crate::session::SessionState;
use crate::theory::{resolve_chord, Pitch};

use super::derive::{derive_playback_set, CHORD_OCTAVE};
use super::types::{NoteLength, PlaybackStyle, TriggerEvent, VelocityLevel};

/// A unit of deferred work on the timer queue.
#[derive(Debug, Clone)]
enum Action {
    /// One progression step: resolve the symbol fresh and trigger it
    /// simultaneous-style at the base octave, without bass or melody.
    ProgressionChord { symbol: String },
    /// End of a progression pass; restarts from the store while the
    /// eight-bar flag holds.
    ProgressionEnd,
    /// Chord-loop tick: re-derive from the session and re-arm while the
    /// loop flag and selection hold.
    LoopTick,
    /// Expire one highlight window.
    ClearHighlight { id: u64 },
}

#[derive(Debug)]
struct Scheduled {
    at_ms: u64,
    seq: u64,
    action: Action,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.at_ms == other.at_ms && self.seq == other.seq
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.at_ms, self.seq).cmp(&(other.at_ms, other.seq))
    }
}

/// One published window of currently-sounding pitches.
#[derive(Debug)]
struct Highlight {
    id: u64,
    pitches: Vec<Pitch>,
}

/// The playback sequencer: owns the audio engine, the timer queue, the
/// readiness gate, and the highlight windows.
///
/// Trigger preconditions (a muted session, an empty playback set) are
/// silent no-ops, never errors.
pub struct Sequencer<E: AudioEngine> {
    engine: E,
    config: PlaybackConfig,
    rng: fastrand::Rng,
    now_ms: u64,
    queue: BinaryHeap<Reverse<Scheduled>>,
    next_seq: u64,
    ready: bool,
    pending: VecDeque<TriggerEvent>,
    sounding: Vec<Highlight>,
    next_highlight: u64,
    loop_armed: bool,
}

impl<E: AudioEngine> Sequencer<E> {
    pub fn new(engine: E, config: PlaybackConfig) -> Self {
        Self {
            engine,
            config,
            rng: fastrand::Rng::new(),
            now_ms: 0,
            queue: BinaryHeap::new(),
            next_seq: 0,
            ready: false,
            pending: VecDeque::new(),
            sounding: Vec::new(),
            next_highlight: 0,
            loop_armed: false,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Current logical time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Signal that the audio backend finished starting up. Instructions
    /// queued while it was pending flush to it now, in order.
    pub fn mark_ready(&mut self) {
        if self.ready {
            return;
        }
        self.ready = true;
        debug!("engine ready, flushing {} queued trigger(s)", self.pending.len());
        while let Some(event) = self.pending.pop_front() {
            self.engine.trigger(&event);
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Forward a master volume change to the engine.
    pub fn set_volume(&mut self, db: f32) {
        self.engine.set_volume(db);
    }

    /// Play the currently selected chord with bass and melody overlays,
    /// deriving the playback set fresh from the session state.
    pub fn play_chord(&mut self, state: &SessionState) {
        if state.muted {
            debug!("muted, skipping chord trigger");
            return;
        }
        let Some(selected) = &state.selected_chord else {
            return;
        };
        let set = derive_playback_set(
            &selected.pitch_classes,
            state.bass_root(),
            &state.melody,
            state.harmonics,
        );
        if set.is_empty() {
            return;
        }
        let velocity_db = self.jittered_db(state.velocity);
        self.dispatch_set(&set, state.style, state.note_length, velocity_db);
        self.publish(set, self.config.chord_highlight_ms);
    }

    /// Play one ad-hoc key press.
    pub fn play_key(&mut self, pitch: Pitch, state: &SessionState) {
        if state.muted {
            debug!("muted, skipping key trigger");
            return;
        }
        let velocity_db = self.jittered_db(state.velocity);
        self.dispatch(TriggerEvent {
            pitches: vec![pitch],
            length: state.note_length,
            velocity_db,
            onset_beats: 0.0,
        });
        self.publish(vec![pitch], self.config.key_highlight_ms);
    }

    /// Arm the single-chord loop. The first re-trigger fires one interval
    /// from now; the caller plays the chord immediately if it wants an
    /// up-front sounding.
    pub fn start_loop(&mut self, state: &SessionState) {
        if self.loop_armed || !state.loop_enabled {
            return;
        }
        self.loop_armed = true;
        self.schedule(self.config.loop_interval_ms, Action::LoopTick);
    }

    /// Schedule a full walk of the progression, one chord every
    /// `chord_gap_ms`, followed by the pass-end checkpoint. An empty
    /// progression is a no-op.
    pub fn play_progression(&mut self, store: &ProgressionStore) {
        if store.is_empty() {
            debug!("empty progression, nothing to play");
            return;
        }
        self.schedule_pass(store.chords().to_vec());
    }

    /// Pitches currently published for visual feedback.
    pub fn active_pitches(&self) -> Vec<Pitch> {
        let mut pitches = Vec::new();
        for window in &self.sounding {
            for p in &window.pitches {
                if !pitches.contains(p) {
                    pitches.push(*p);
                }
            }
        }
        pitches
    }

    /// When the next queue entry is due, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(s)| s.at_ms)
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Advance the logical clock, firing every due entry in order. The
    /// session and store are read fresh at each firing.
    pub fn advance_to(&mut self, t_ms: u64, state: &SessionState, store: &ProgressionStore) {
        while let Some(Reverse(next)) = self.queue.peek() {
            if next.at_ms > t_ms {
                break;
            }
            if let Some(Reverse(entry)) = self.queue.pop() {
                self.now_ms = entry.at_ms;
                self.handle(entry.action, state, store);
            }
        }
        if t_ms > self.now_ms {
            self.now_ms = t_ms;
        }
    }

    fn handle(&mut self, action: Action, state: &SessionState, store: &ProgressionStore) {
        match action {
            Action::ProgressionChord { symbol } => {
                if state.muted {
                    debug!("muted, skipping progression chord {}", symbol);
                    return;
                }
                let Some(chord) = resolve_chord(&symbol) else {
                    debug!("unresolvable progression chord {:?}", symbol);
                    return;
                };
                let set: Vec<Pitch> = chord
                    .pitch_classes
                    .iter()
                    .map(|pc| pc.at_octave(CHORD_OCTAVE))
                    .collect();
                let velocity_db = self.jittered_db(state.velocity);
                self.dispatch_set(&set, PlaybackStyle::Simultaneous, state.note_length, velocity_db);
                self.publish(set, self.config.chord_highlight_ms);
            }
            Action::ProgressionEnd => {
                if !state.eight_bar_loop {
                    return;
                }
                if store.is_empty() {
                    debug!("progression cleared, eight-bar loop ends");
                    return;
                }
                self.schedule_pass(store.chords().to_vec());
            }
            Action::LoopTick => {
                if state.loop_enabled && state.selected_chord.is_some() {
                    self.play_chord(state);
                    self.schedule(self.config.loop_interval_ms, Action::LoopTick);
                } else {
                    debug!("chord loop disarmed");
                    self.loop_armed = false;
                }
            }
            Action::ClearHighlight { id } => {
                self.sounding.retain(|w| w.id != id);
            }
        }
    }

    fn schedule_pass(&mut self, symbols: Vec<String>) {
        let count = symbols.len() as u64;
        for (i, symbol) in symbols.into_iter().enumerate() {
            self.schedule(
                i as u64 * self.config.chord_gap_ms,
                Action::ProgressionChord { symbol },
            );
        }
        // The pass-end checkpoint sits one closing pause after the last chord
        self.schedule(
            (count - 1) * self.config.chord_gap_ms + self.config.closing_pause_ms,
            Action::ProgressionEnd,
        );
    }

    fn schedule(&mut self, delay_ms: u64, action: Action) {
        let entry = Scheduled {
            at_ms: self.now_ms + delay_ms,
            seq: self.next_seq,
            action,
        };
        self.next_seq += 1;
        self.queue.push(Reverse(entry));
    }

    /// One simultaneous instruction, or one instruction per pitch with
    /// stepped onsets for an arpeggio. All instructions of a call share the
    /// call's jittered velocity.
    fn dispatch_set(
        &mut self,
        set: &[Pitch],
        style: PlaybackStyle,
        length: NoteLength,
        velocity_db: f32,
    ) {
        match style {
            PlaybackStyle::Simultaneous => self.dispatch(TriggerEvent {
                pitches: set.to_vec(),
                length,
                velocity_db,
                onset_beats: 0.0,
            }),
            PlaybackStyle::Arpeggiated => {
                for (i, pitch) in set.iter().enumerate() {
                    self.dispatch(TriggerEvent {
                        pitches: vec![*pitch],
                        length,
                        velocity_db,
                        onset_beats: i as f64 * self.config.arpeggio_spacing_beats,
                    });
                }
            }
        }
    }

    fn dispatch(&mut self, event: TriggerEvent) {
        if self.ready {
            self.engine.trigger(&event);
        } else {
            debug!("engine not ready, queueing trigger");
            self.pending.push_back(event);
        }
    }

    /// Jittered loudness for one play call: the level's base plus a uniform
    /// offset in ±`jitter_db`, drawn fresh every call.
    pub(crate) fn jittered_db(&mut self, level: VelocityLevel) -> f32 {
        let jitter = (self.rng.f32() * 2.0 - 1.0) * self.config.jitter_db;
        self.config.base_db(level) + jitter
    }

    fn publish(&mut self, pitches: Vec<Pitch>, window_ms: u64) {
        let id = self.next_highlight;
        self.next_highlight += 1;
        self.sounding.push(Highlight { id, pitches });
        self.schedule(window_ms, Action::ClearHighlight { id });
    }
}
