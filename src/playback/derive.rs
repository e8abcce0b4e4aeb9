//! Playback-set derivation
//!
//! Combines the selected chord's pitch classes, an optional bass root, and
//! melody pitches into the ordered list of pitches a trigger will sound.
//! The list is rebuilt from current state on every trigger, never cached.

use crate::theory::{Pitch, PitchClass};

/// Octave chord pitches are placed at.
pub const CHORD_OCTAVE: i8 = 4;
/// Octave the bass pitch is placed at.
pub const BASS_OCTAVE: i8 = 2;
/// Conventional octave for melody pitches.
pub const MELODY_OCTAVE: i8 = 5;

/// Build the ordered playback set: bass, then chord, then melody.
///
/// - Chord pitches sit at octave 4. With `harmonics` enabled they are
///   re-spread upward instead, two per octave: pitch `i` lands at octave
///   `4 + i/2`.
/// - A present `root` contributes a bass pitch at octave 2, prepended.
/// - Melody pitches arrive pre-formed (octave and all) and are appended
///   unchanged.
/// - Nothing is deduplicated; a pitch repeated across bass, chord and
///   melody sounds as many times as it appears.
/// - An empty chord yields an empty set regardless of the other inputs,
///   and an empty set is never triggered.
///
/// # Examples
/// ```
/// use chordlab::{derive_playback_set, resolve_chord};
///
/// let chord = resolve_chord("Cmaj7").unwrap();
/// let set = derive_playback_set(&chord.pitch_classes, Some(chord.root), &[], false);
/// let names: Vec<String> = set.iter().map(|p| p.to_string()).collect();
/// assert_eq!(names, ["C2", "C4", "E4", "G4", "B4"]);
/// ```
pub fn derive_playback_set(
    chord_pitch_classes: &[PitchClass],
    root: Option<PitchClass>,
    melody: &[Pitch],
    harmonics: bool,
) -> Vec<Pitch> {
    if chord_pitch_classes.is_empty() {
        return Vec::new();
    }

    let mut set = Vec::with_capacity(chord_pitch_classes.len() + melody.len() + 1);

    if let Some(root) = root {
        set.push(root.at_octave(BASS_OCTAVE));
    }

    for (i, pc) in chord_pitch_classes.iter().enumerate() {
        let octave = if harmonics {
            CHORD_OCTAVE + (i / 2) as i8
        } else {
            CHORD_OCTAVE
        };
        set.push(pc.at_octave(octave));
    }

    set.extend_from_slice(melody);
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::resolve_chord;

    fn names(set: &[Pitch]) -> Vec<String> {
        set.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_chord_at_base_octave() {
        let chord = resolve_chord("Dm7").unwrap();
        let set = derive_playback_set(&chord.pitch_classes, None, &[], false);
        assert_eq!(names(&set), ["D4", "F4", "A4", "C4"]);
    }

    #[test]
    fn test_bass_prepended() {
        let chord = resolve_chord("G7").unwrap();
        let set = derive_playback_set(&chord.pitch_classes, Some(chord.root), &[], false);
        assert_eq!(names(&set), ["G2", "G4", "B4", "D4", "F4"]);
    }

    #[test]
    fn test_harmonics_spread() {
        let chord = resolve_chord("Cmaj7").unwrap();
        let set = derive_playback_set(&chord.pitch_classes, None, &[], true);
        // Two pitches per octave, ascending from 4
        assert_eq!(names(&set), ["C4", "E4", "G5", "B5"]);
    }

    #[test]
    fn test_harmonics_spread_five_pitches() {
        let chord = resolve_chord("C9").unwrap();
        let set = derive_playback_set(&chord.pitch_classes, None, &[], true);
        assert_eq!(set[4].octave, 6);
    }

    #[test]
    fn test_melody_appended_unchanged() {
        let chord = resolve_chord("C").unwrap();
        let melody = [Pitch::parse("E5").unwrap(), Pitch::parse("G5").unwrap()];
        let set = derive_playback_set(&chord.pitch_classes, None, &melody, false);
        assert_eq!(names(&set), ["C4", "E4", "G4", "E5", "G5"]);
    }

    #[test]
    fn test_no_deduplication() {
        let chord = resolve_chord("C").unwrap();
        let melody = [Pitch::parse("C4").unwrap()];
        let set = derive_playback_set(&chord.pitch_classes, Some(chord.root), &melody, false);
        // C2 from bass, C4 from the chord, C4 again from melody
        assert_eq!(names(&set), ["C2", "C4", "E4", "G4", "C4"]);
    }

    #[test]
    fn test_empty_chord_yields_empty_set() {
        let melody = [Pitch::parse("E5").unwrap()];
        let root = resolve_chord("C").unwrap().root;
        let set = derive_playback_set(&[], Some(root), &melody, false);
        assert!(set.is_empty());
    }
}
