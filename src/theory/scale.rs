//! Scale lookup
//!
//! Interval tables for the common scales, used for melody suggestions and
//! for building diatonic progressions.

use serde::Serialize;

use super::pitch::PitchClass;

/// Scale family, parsed from the names a user would type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    Major,
    NaturalMinor,
    HarmonicMinor,
    Dorian,
    Mixolydian,
    Lydian,
    MajorPentatonic,
    MinorPentatonic,
    Blues,
}

impl ScaleKind {
    /// Parse a scale name like "major", "minor", "dorian", "blues".
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" | "ionian" => Some(Self::Major),
            "minor" | "natural minor" | "aeolian" => Some(Self::NaturalMinor),
            "harmonic minor" => Some(Self::HarmonicMinor),
            "dorian" => Some(Self::Dorian),
            "mixolydian" => Some(Self::Mixolydian),
            "lydian" => Some(Self::Lydian),
            "major pentatonic" => Some(Self::MajorPentatonic),
            "minor pentatonic" => Some(Self::MinorPentatonic),
            "blues" => Some(Self::Blues),
            _ => None,
        }
    }

    /// Semitone intervals above the tonic.
    pub fn intervals(&self) -> &'static [i8] {
        match self {
            Self::Major => &[0, 2, 4, 5, 7, 9, 11],
            Self::NaturalMinor => &[0, 2, 3, 5, 7, 8, 10],
            Self::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            Self::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Self::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            Self::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            Self::MajorPentatonic => &[0, 2, 4, 7, 9],
            Self::MinorPentatonic => &[0, 3, 5, 7, 10],
            Self::Blues => &[0, 3, 5, 6, 7, 10],
        }
    }
}

/// Resolve a scale into its pitch classes, tonic first.
///
/// # Examples
/// ```
/// use chordlab::{resolve_scale, PitchClass, ScaleKind};
///
/// let g = PitchClass::parse("G").unwrap();
/// let names: Vec<&str> = resolve_scale(g, ScaleKind::Major)
///     .iter()
///     .map(|pc| pc.name())
///     .collect();
/// assert_eq!(names, ["G", "A", "B", "C", "D", "E", "F#"]);
/// ```
pub fn resolve_scale(root: PitchClass, kind: ScaleKind) -> Vec<PitchClass> {
    kind.intervals().iter().map(|i| root.transpose(*i)).collect()
}
