//! Progression store, templates, and the diatonic generator
//!
//! A progression is an ordered list of chord symbols the user has
//! accumulated. The store only ever grows at the end, is replaced wholesale,
//! or is cleared; there is no in-place editing. Whether an append is allowed
//! (a chord must be selected) is the coordinator's call, not the store's.

use serde::Serialize;

use crate::theory::{resolve_scale, PitchClass, ScaleKind};

/// Ordered list of chord symbols for walk-through playback.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProgressionStore {
    chords: Vec<String>,
}

impl ProgressionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chord symbol at the end.
    pub fn append(&mut self, symbol: impl Into<String>) {
        self.chords.push(symbol.into());
    }

    /// Replace the whole progression.
    pub fn replace_all(&mut self, symbols: impl IntoIterator<Item = String>) {
        self.chords = symbols.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.chords.clear();
    }

    pub fn chords(&self) -> &[String] {
        &self.chords
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }
}

/// A named built-in progression.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProgressionTemplate {
    pub name: &'static str,
    pub chords: &'static [&'static str],
}

/// Built-in progressions a user can load in one pick.
pub const TEMPLATES: &[ProgressionTemplate] = &[
    ProgressionTemplate {
        name: "ii-V-I",
        chords: &["Dm7", "G7", "Cmaj7"],
    },
    ProgressionTemplate {
        name: "axis",
        chords: &["C", "G", "Am", "F"],
    },
    ProgressionTemplate {
        name: "blues",
        chords: &[
            "C7", "F7", "C7", "C7", "F7", "F7", "C7", "C7", "G7", "F7", "C7", "G7",
        ],
    },
    ProgressionTemplate {
        name: "pachelbel",
        chords: &["D", "A", "Bm", "F#m", "G", "D", "G", "A"],
    },
];

/// Look up a built-in template by name (case-insensitive).
pub fn template(name: &str) -> Option<&'static ProgressionTemplate> {
    TEMPLATES.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

/// Generate a progression from scale degrees of a key.
///
/// Triad qualities fall out of the scale's own intervals: a major third gets
/// a plain symbol, a minor third an `m` suffix, and a diminished or
/// augmented fifth the matching suffix. Degrees are 1-based and wrap around
/// the scale.
///
/// # Examples
/// ```
/// use chordlab::{diatonic_progression, PitchClass, ScaleKind};
///
/// let c = PitchClass::parse("C").unwrap();
/// let chords = diatonic_progression(c, ScaleKind::Major, &[2, 5, 1]);
/// assert_eq!(chords, ["Dm", "G", "C"]);
/// ```
pub fn diatonic_progression(key: PitchClass, kind: ScaleKind, degrees: &[usize]) -> Vec<String> {
    let scale = resolve_scale(key, kind);
    let n = scale.len();

    degrees
        .iter()
        .filter(|d| **d >= 1)
        .map(|degree| {
            let i = (degree - 1) % n;
            let root = scale[i];
            let third = scale[(i + 2) % n];
            let fifth = scale[(i + 4) % n];

            let third_interval = (third.semitone() + 12 - root.semitone()) % 12;
            let fifth_interval = (fifth.semitone() + 12 - root.semitone()) % 12;

            let suffix = match (third_interval, fifth_interval) {
                (3, 6) => "dim",
                (4, 8) => "aug",
                (3, _) => "m",
                _ => "",
            };
            format!("{}{}", root.name(), suffix)
        })
        .collect()
}
