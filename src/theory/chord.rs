//! Chord symbol resolution
//!
//! Resolves chord symbols (C, Am, G7, Dm7, etc.) into a root pitch class and
//! the chord's constituent pitch classes. Octave placement is not decided
//! here; that happens during playback-set derivation.

use serde::Serialize;

use super::pitch::PitchClass;

/// A chord symbol resolved into pitch classes.
///
/// `pitch_classes` is ordered root-first, stacked upward by interval; the
/// order is preserved all the way into arpeggiated playback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedChord {
    pub root: PitchClass,
    pub pitch_classes: Vec<PitchClass>,
}

/// Resolve a chord symbol into its root and pitch classes.
///
/// Returns `None` when either the root or the quality is unrecognized; an
/// unknown symbol yields no pitches rather than an error.
///
/// # Supported Chord Types
/// - **Major**: `C`, `maj`, `M` → root, major 3rd, perfect 5th
/// - **Minor**: `m`, `min`, `-` → root, minor 3rd, perfect 5th
/// - **Dominant 7th**: `7` → root, major 3rd, perfect 5th, minor 7th
/// - **Major 7th**: `maj7`, `M7` → root, major 3rd, perfect 5th, major 7th
/// - **Minor 7th**: `m7`, `min7`, `-7` → root, minor 3rd, perfect 5th, minor 7th
/// - **Diminished**: `dim`, `°` → root, minor 3rd, diminished 5th
/// - **Diminished 7th**: `dim7`, `°7` → dim + diminished 7th
/// - **Half-diminished**: `m7b5`, `ø`, `ø7` → dim + minor 7th
/// - **Augmented**: `aug`, `+` → root, major 3rd, augmented 5th
/// - **Sus4 / Sus2**: `sus4` (or `sus`), `sus2`
/// - **6th chords**: `6`, `m6`
/// - **9th chords**: `9`, `maj9`, `m9` → 7th chord + major 9th
/// - **Add9**: `add9` → major triad + major 9th
///
/// # Examples
/// ```
/// use chordlab::resolve_chord;
///
/// let c = resolve_chord("Cmaj7").unwrap();
/// assert_eq!(c.root.name(), "C");
/// let names: Vec<&str> = c.pitch_classes.iter().map(|pc| pc.name()).collect();
/// assert_eq!(names, ["C", "E", "G", "B"]);
///
/// assert!(resolve_chord("Xmaj7").is_none());
/// assert!(resolve_chord("Cwat").is_none());
/// ```
pub fn resolve_chord(symbol: &str) -> Option<ResolvedChord> {
    let chars: Vec<char> = symbol.chars().collect();
    match chars.first() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => return None,
    }

    // Root note letter, then an optional accidental
    let mut idx = 1;
    if idx < chars.len() && (chars[idx] == '#' || chars[idx] == 'b') {
        idx += 1;
    }
    let root = PitchClass::parse(&symbol[..idx])?;

    // Chord quality is whatever remains
    let quality = &symbol[idx..];

    // Intervals in semitones above the root. Ninths wrap back into the
    // octave as pitch classes; voicing spreads them out later if asked.
    let intervals: &[i8] = match quality {
        // Major triads
        "" | "maj" | "M" => &[0, 4, 7],

        // Minor triads
        "m" | "min" | "-" => &[0, 3, 7],

        // Dominant 7th
        "7" => &[0, 4, 7, 10],

        // Major 7th
        "maj7" | "M7" => &[0, 4, 7, 11],

        // Minor 7th
        "m7" | "min7" | "-7" => &[0, 3, 7, 10],

        // Diminished family
        "dim" | "°" => &[0, 3, 6],
        "dim7" | "°7" => &[0, 3, 6, 9],
        "m7b5" | "ø" | "ø7" => &[0, 3, 6, 10],

        // Augmented
        "aug" | "+" => &[0, 4, 8],

        // Sus chords
        "sus4" | "sus" => &[0, 5, 7],
        "sus2" => &[0, 2, 7],

        // Sixths
        "6" => &[0, 4, 7, 9],
        "m6" | "min6" => &[0, 3, 7, 9],

        // Extended chords
        "9" => &[0, 4, 7, 10, 14],
        "maj9" | "M9" => &[0, 4, 7, 11, 14],
        "m9" | "min9" => &[0, 3, 7, 10, 14],
        "add9" => &[0, 4, 7, 14],

        _ => return None,
    };

    Some(ResolvedChord {
        root,
        pitch_classes: intervals.iter().map(|i| root.transpose(*i)).collect(),
    })
}
