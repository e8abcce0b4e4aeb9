use super::*;
use crate::config::PlaybackConfig;
use crate::engine::CapturingEngine;
use crate::progression::ProgressionStore;
use crate::session::SessionState;
use crate::theory::Pitch;

fn sequencer() -> Sequencer<CapturingEngine> {
    let mut seq = Sequencer::new(CapturingEngine::new(), PlaybackConfig::default());
    seq.mark_ready();
    seq
}

fn chord_state(symbol: &str) -> SessionState {
    let mut state = SessionState::default();
    state.select_chord(symbol);
    state
}

fn pitch_names(event: &TriggerEvent) -> Vec<String> {
    event.pitches.iter().map(|p| p.to_string()).collect()
}

#[test]
fn test_simultaneous_chord_is_one_instruction() {
    let mut seq = sequencer();
    let state = chord_state("Cmaj7");

    seq.play_chord(&state);

    let events = seq.engine().events();
    assert_eq!(events.len(), 1);
    assert_eq!(pitch_names(&events[0]), ["C2", "C4", "E4", "G4", "B4"]);
    assert_eq!(events[0].length.token(), "2n");
    assert_eq!(events[0].onset_beats, 0.0);
}

#[test]
fn test_chord_pitches_in_resolver_order() {
    let mut seq = sequencer();
    let mut state = chord_state("G7");
    state.bass_enabled = false;

    seq.play_chord(&state);

    // Root-first stacking at the base octave, exactly as resolved
    let events = seq.engine().events();
    assert_eq!(pitch_names(&events[0]), ["G4", "B4", "D4", "F4"]);
}

#[test]
fn test_arpeggio_offsets_and_token() {
    let mut seq = sequencer();
    let mut state = chord_state("C");
    state.bass_enabled = false;
    state.style = PlaybackStyle::Arpeggiated;

    seq.play_chord(&state);

    let events = seq.engine().events();
    assert_eq!(events.len(), 3);

    // Onsets step by the configured spacing: 0, k, 2k
    assert_eq!(events[0].onset_beats, 0.0);
    assert_eq!(events[1].onset_beats, 0.25);
    assert_eq!(events[2].onset_beats, 0.5);

    for (event, name) in events.iter().zip(["C4", "E4", "G4"]) {
        assert_eq!(pitch_names(event), [name]);
        assert_eq!(event.length.token(), "2n");
    }
}

#[test]
fn test_arpeggio_instructions_share_one_velocity() {
    let mut seq = sequencer();
    let mut state = chord_state("Cmaj7");
    state.style = PlaybackStyle::Arpeggiated;

    seq.play_chord(&state);

    let events = seq.engine().events();
    assert!(events.len() > 1);
    assert!(events.iter().all(|e| e.velocity_db == events[0].velocity_db));
}

#[test]
fn test_muted_issues_no_instructions() {
    let mut seq = sequencer();
    let mut state = chord_state("Cmaj7");
    state.muted = true;

    let mut store = ProgressionStore::new();
    store.append("G7");

    seq.play_chord(&state);
    seq.play_key(Pitch::parse("C4").unwrap(), &state);
    seq.play_progression(&store);
    seq.advance_to(10_000, &state, &store);

    assert!(seq.engine().events().is_empty());
}

#[test]
fn test_unresolvable_selection_is_silent() {
    let mut seq = sequencer();
    let mut state = SessionState::default();
    state.select_chord("Znope");

    seq.play_chord(&state);

    assert!(seq.engine().events().is_empty());
}

#[test]
fn test_velocity_jitter_bounds_and_mean() {
    let mut seq = sequencer();
    let base = -10.0f32;

    let mut sum = 0.0f64;
    for _ in 0..1000 {
        let db = seq.jittered_db(VelocityLevel::Medium);
        assert!(db >= base - 2.0 && db <= base + 2.0, "out of range: {}", db);
        sum += db as f64;
    }

    // Uniform jitter: the sample mean converges toward the base
    let mean = sum / 1000.0;
    assert!((mean - base as f64).abs() < 0.3, "mean drifted: {}", mean);
}

#[test]
fn test_velocity_recomputed_every_call() {
    let mut seq = sequencer();
    let first = seq.jittered_db(VelocityLevel::Low);
    let varied = (0..50).any(|_| seq.jittered_db(VelocityLevel::Low) != first);
    assert!(varied);
}

#[test]
fn test_progression_spacing_and_stop() {
    let mut seq = sequencer();
    let state = SessionState::default();
    let mut store = ProgressionStore::new();
    store.replace_all(["Cmaj7".to_string(), "G7".to_string(), "Fmaj7".to_string()]);

    seq.play_progression(&store);

    seq.advance_to(0, &state, &store);
    assert_eq!(seq.engine().events().len(), 1);

    seq.advance_to(1499, &state, &store);
    assert_eq!(seq.engine().events().len(), 1);

    seq.advance_to(1500, &state, &store);
    assert_eq!(seq.engine().events().len(), 2);

    seq.advance_to(3000, &state, &store);
    assert_eq!(seq.engine().events().len(), 3);
    assert_eq!(seq.now_ms(), 3000);

    // Eight-bar loop off: no fourth trigger, ever
    seq.advance_to(60_000, &state, &store);
    assert_eq!(seq.engine().events().len(), 3);
    assert!(seq.is_idle());
}

#[test]
fn test_progression_eight_bar_restart() {
    let mut seq = sequencer();
    let mut state = SessionState::default();
    state.eight_bar_loop = true;
    let mut store = ProgressionStore::new();
    store.replace_all(["Cmaj7".to_string(), "G7".to_string(), "Fmaj7".to_string()]);

    seq.play_progression(&store);

    seq.advance_to(4499, &state, &store);
    assert_eq!(seq.engine().events().len(), 3);

    // Closing pause elapses, the walk restarts from the top
    seq.advance_to(4500, &state, &store);
    let events = seq.engine().events();
    assert_eq!(events.len(), 4);
    assert_eq!(events[3].pitches, events[0].pitches);

    seq.advance_to(6000, &state, &store);
    assert_eq!(seq.engine().events().len(), 5);
}

#[test]
fn test_progression_restart_stops_once_flag_cleared() {
    let mut seq = sequencer();
    let mut state = SessionState::default();
    state.eight_bar_loop = true;
    let mut store = ProgressionStore::new();
    store.replace_all(["C".to_string(), "F".to_string()]);

    seq.play_progression(&store);
    seq.advance_to(1500, &state, &store);
    assert_eq!(seq.engine().events().len(), 2);

    // Flag off before the pass-end checkpoint fires: no new pass
    state.eight_bar_loop = false;
    seq.advance_to(30_000, &state, &store);
    assert_eq!(seq.engine().events().len(), 2);
    assert!(seq.is_idle());
}

#[test]
fn test_empty_progression_is_a_noop() {
    let mut seq = sequencer();
    let state = SessionState::default();
    let store = ProgressionStore::new();

    seq.play_progression(&store);

    assert!(seq.is_idle());
    assert!(seq.engine().events().is_empty());
}

#[test]
fn test_progression_excludes_bass_and_melody() {
    let mut seq = sequencer();
    let mut state = chord_state("Am");
    state.melody.push(Pitch::parse("E5").unwrap());
    let mut store = ProgressionStore::new();
    store.append("Cmaj7");

    seq.play_progression(&store);
    seq.advance_to(0, &state, &store);

    // Chord pitches only, at the base octave
    let events = seq.engine().events();
    assert_eq!(pitch_names(&events[0]), ["C4", "E4", "G4", "B4"]);
}

#[test]
fn test_clearing_store_mid_pass_does_not_halt_steps() {
    let mut seq = sequencer();
    let state = SessionState::default();
    let mut store = ProgressionStore::new();
    store.replace_all(["C".to_string(), "F".to_string(), "G".to_string()]);

    seq.play_progression(&store);
    seq.advance_to(0, &state, &store);
    assert_eq!(seq.engine().events().len(), 1);

    // The pass was snapshotted; clearing now revokes nothing
    store.clear();
    seq.advance_to(3000, &state, &store);
    assert_eq!(seq.engine().events().len(), 3);
}

#[test]
fn test_eight_bar_loop_ends_when_store_cleared() {
    let mut seq = sequencer();
    let mut state = SessionState::default();
    state.eight_bar_loop = true;
    let mut store = ProgressionStore::new();
    store.replace_all(["C".to_string(), "F".to_string()]);

    seq.play_progression(&store);
    seq.advance_to(1500, &state, &store);
    store.clear();

    // The restart checkpoint re-reads the store and finds nothing
    seq.advance_to(30_000, &state, &store);
    assert_eq!(seq.engine().events().len(), 2);
    assert!(seq.is_idle());
}

#[test]
fn test_chord_loop_reissues_then_disarms() {
    let mut seq = sequencer();
    let mut state = chord_state("C");
    state.loop_enabled = true;
    let store = ProgressionStore::new();

    seq.start_loop(&state);
    seq.advance_to(2000, &state, &store);
    assert_eq!(seq.engine().events().len(), 1);
    seq.advance_to(4000, &state, &store);
    assert_eq!(seq.engine().events().len(), 2);

    // Flag off: the pending tick fires, does nothing, and does not re-arm
    state.loop_enabled = false;
    seq.advance_to(60_000, &state, &store);
    assert_eq!(seq.engine().events().len(), 2);
    assert!(seq.is_idle());
}

#[test]
fn test_chord_loop_derives_fresh_each_tick() {
    let mut seq = sequencer();
    let mut state = chord_state("C");
    state.loop_enabled = true;
    state.bass_enabled = false;
    let store = ProgressionStore::new();

    seq.start_loop(&state);
    seq.advance_to(2000, &state, &store);

    // Selection changes mid-loop; the next tick must pick it up
    state.select_chord("Dm");
    seq.advance_to(4000, &state, &store);

    let events = seq.engine().events();
    assert_eq!(pitch_names(&events[0]), ["C4", "E4", "G4"]);
    assert_eq!(pitch_names(&events[1]), ["D4", "F4", "A4"]);
}

#[test]
fn test_chord_loop_stops_on_deselect() {
    let mut seq = sequencer();
    let mut state = chord_state("C");
    state.loop_enabled = true;
    let store = ProgressionStore::new();

    seq.start_loop(&state);
    state.clear_selection();
    seq.advance_to(60_000, &state, &store);

    assert!(seq.engine().events().is_empty());
    assert!(seq.is_idle());
}

#[test]
fn test_triggers_queue_until_engine_ready() {
    let mut seq = Sequencer::new(CapturingEngine::new(), PlaybackConfig::default());
    let state = chord_state("Cmaj7");
    assert!(!seq.is_ready());

    seq.play_chord(&state);
    seq.play_key(Pitch::parse("A4").unwrap(), &state);
    assert!(seq.engine().events().is_empty());

    // Startup completes: everything flushes, in order, nothing dropped
    seq.mark_ready();
    let events = seq.engine().events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].pitches.len(), 5);
    assert_eq!(pitch_names(&events[1]), ["A4"]);
}

#[test]
fn test_chord_highlight_window() {
    let mut seq = sequencer();
    let state = chord_state("C");
    let store = ProgressionStore::new();

    seq.play_chord(&state);
    assert!(!seq.active_pitches().is_empty());

    seq.advance_to(399, &state, &store);
    assert!(!seq.active_pitches().is_empty());

    seq.advance_to(400, &state, &store);
    assert!(seq.active_pitches().is_empty());
}

#[test]
fn test_key_highlight_window_is_shorter() {
    let mut seq = sequencer();
    let state = SessionState::default();
    let store = ProgressionStore::new();
    let g4 = Pitch::parse("G4").unwrap();

    seq.play_key(g4, &state);
    assert_eq!(seq.active_pitches(), vec![g4]);

    seq.advance_to(299, &state, &store);
    assert_eq!(seq.active_pitches(), vec![g4]);

    seq.advance_to(300, &state, &store);
    assert!(seq.active_pitches().is_empty());
}
