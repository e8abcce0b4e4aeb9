//! Pitch and pitch-class value types
//!
//! A pitch class is a note name without an octave ("C", "F#"); a pitch is a
//! pitch class plus an octave number ("C4"). Both are small immutable values
//! that convert to and from strings and MIDI note numbers.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::LabError;

/// Note name without octave, one of the 12 semitones.
///
/// Spelling prefers sharps ("C#" rather than "Db") when converting back to
/// text, but both spellings parse.
///
/// # Examples
/// ```
/// use chordlab::PitchClass;
///
/// let fs = PitchClass::parse("F#").unwrap();
/// assert_eq!(fs.name(), "F#");
/// assert_eq!(PitchClass::parse("Gb").unwrap(), fs);
/// assert_eq!(fs.transpose(2).name(), "G#");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PitchClass {
    semitone: u8, // 0 = C .. 11 = B
}

impl PitchClass {
    /// Construct from a semitone offset from C. Values wrap modulo 12.
    pub const fn from_semitone(semitone: u8) -> Self {
        Self {
            semitone: semitone % 12,
        }
    }

    /// Semitone offset from C, 0..=11.
    pub const fn semitone(&self) -> u8 {
        self.semitone
    }

    /// Parse a pitch-class string: a note letter A-G plus an optional `#` or `b`.
    ///
    /// Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let base: i8 = match chars.next()? {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };
        let accidental: i8 = match chars.next() {
            None => 0,
            Some('#') => 1,
            Some('b') => -1,
            Some(_) => return None,
        };
        if chars.next().is_some() {
            return None;
        }
        Some(Self {
            semitone: (base + accidental).rem_euclid(12) as u8,
        })
    }

    /// Sharp-preferring name: "C", "C#", "D", ...
    pub fn name(&self) -> &'static str {
        // 0=C, 1=C#, 2=D, 3=D#, 4=E, 5=F, 6=F#, 7=G, 8=G#, 9=A, 10=A#, 11=B
        match self.semitone {
            0 => "C",
            1 => "C#",
            2 => "D",
            3 => "D#",
            4 => "E",
            5 => "F",
            6 => "F#",
            7 => "G",
            8 => "G#",
            9 => "A",
            10 => "A#",
            _ => "B",
        }
    }

    /// Move by the given number of semitones, wrapping within the octave.
    pub fn transpose(&self, semitones: i8) -> Self {
        Self {
            semitone: (self.semitone as i8 + semitones).rem_euclid(12) as u8,
        }
    }

    /// Place this pitch class at an octave.
    pub fn at_octave(&self, octave: i8) -> Pitch {
        Pitch::new(*self, octave)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for PitchClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Pitch class plus octave number, e.g. "C4".
///
/// Ordered by MIDI note number, so sorting a list of pitches sorts it from
/// low to high.
///
/// # Examples
/// ```
/// use chordlab::Pitch;
///
/// let c4 = Pitch::parse("C4").unwrap();
/// assert_eq!(c4.midi(), 60);
/// assert_eq!(c4.to_string(), "C4");
/// assert!(c4 < Pitch::parse("A4").unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub class: PitchClass,
    pub octave: i8,
}

impl Pitch {
    pub const fn new(class: PitchClass, octave: i8) -> Self {
        Self { class, octave }
    }

    /// MIDI note number, clamped to 0..=127. C4 = 60.
    pub fn midi(&self) -> u8 {
        let value = (self.octave as i16 + 1) * 12 + self.class.semitone() as i16;
        value.clamp(0, 127) as u8
    }

    /// Parse a pitch string: pitch class followed by an octave number,
    /// e.g. "C4", "Bb2", "F#5".
    pub fn parse(s: &str) -> Result<Self, LabError> {
        let split = s
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() || *c == '-')
            .map(|(i, _)| i)
            .ok_or_else(|| LabError::PitchError {
                input: s.to_string(),
                message: "missing octave number".to_string(),
            })?;
        let class = PitchClass::parse(&s[..split]).ok_or_else(|| LabError::PitchError {
            input: s.to_string(),
            message: "unknown note letter".to_string(),
        })?;
        let octave: i8 = s[split..].parse().map_err(|_| LabError::PitchError {
            input: s.to_string(),
            message: "invalid octave number".to_string(),
        })?;
        Ok(Self { class, octave })
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class.name(), self.octave)
    }
}

impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pitch {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.octave, self.class.semitone()).cmp(&(other.octave, other.class.semitone()))
    }
}

impl Serialize for Pitch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
