//! Playback configuration
//!
//! Every timing and loudness constant the sequencer uses lives here, with
//! defaults matching the interactive tool's behavior. A YAML document can
//! override any subset of fields:
//!
//! ```yaml
//! loop-interval-ms: 1000
//! arpeggio-spacing-beats: 0.3
//! velocity-high-db: -2.0
//! ```

use serde::{Deserialize, Serialize};

use crate::error::LabError;
use crate::playback::VelocityLevel;

/// Timing and loudness constants for the playback sequencer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Onset spacing between arpeggiated pitches, in beats.
    pub arpeggio_spacing_beats: f64,
    /// Delay between chords of a progression walk.
    pub chord_gap_ms: u64,
    /// Closing pause after the last chord before an eight-bar-loop restart.
    pub closing_pause_ms: u64,
    /// Re-trigger interval for the single-chord loop.
    pub loop_interval_ms: u64,
    /// How long a chord trigger's pitches stay published for highlighting.
    pub chord_highlight_ms: u64,
    /// How long a single ad-hoc key press stays published.
    pub key_highlight_ms: u64,
    /// Base loudness per velocity level, in decibels.
    pub velocity_low_db: f32,
    pub velocity_medium_db: f32,
    pub velocity_high_db: f32,
    /// Half-width of the uniform loudness jitter, in decibels.
    pub jitter_db: f32,
    /// Initial master volume, in decibels.
    pub master_volume_db: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            arpeggio_spacing_beats: 0.25,
            chord_gap_ms: 1500,
            closing_pause_ms: 1500,
            loop_interval_ms: 2000,
            chord_highlight_ms: 400,
            key_highlight_ms: 300,
            velocity_low_db: -16.0,
            velocity_medium_db: -10.0,
            velocity_high_db: -4.0,
            jitter_db: 2.0,
            master_volume_db: -6.0,
        }
    }
}

impl PlaybackConfig {
    /// Parse a YAML configuration document. Missing fields keep their
    /// defaults; unknown fields are rejected.
    pub fn from_yaml(content: &str) -> Result<Self, LabError> {
        serde_yaml::from_str(content).map_err(|e| LabError::ConfigError(e.to_string()))
    }

    /// Base loudness for a velocity level, before jitter.
    pub fn base_db(&self, level: VelocityLevel) -> f32 {
        match level {
            VelocityLevel::Low => self.velocity_low_db,
            VelocityLevel::Medium => self.velocity_medium_db,
            VelocityLevel::High => self.velocity_high_db,
        }
    }
}
