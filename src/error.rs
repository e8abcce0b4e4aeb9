//! # Error Types
//!
//! This module defines all error types for the chordlab library.
//!
//! Playback itself never errors: an unknown chord symbol, a muted session or
//! an empty progression is a silent no-op, not a fault. Errors exist only at the
//! input surfaces where a caller hands us text to interpret: configuration
//! files and CLI arguments.
//!
//! ## Error Types
//! - `ConfigError` - Invalid YAML configuration
//! - `PitchError` - Unparseable pitch or pitch-class string
//! - `UnknownTemplate` - Progression template name lookup failure
//!
//! ## Usage
//! ```rust
//! use chordlab::{LabError, PlaybackConfig};
//!
//! match PlaybackConfig::from_yaml("loop-interval-ms: fast") {
//!     Ok(_) => println!("loaded"),
//!     Err(LabError::ConfigError(message)) => eprintln!("bad config: {}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabError {
    /// Invalid configuration.
    ///
    /// Occurs when a YAML configuration document cannot be deserialized.
    ///
    /// # Example
    /// ```
    /// # use chordlab::LabError;
    /// let err = LabError::ConfigError("unknown field `tempo`".to_string());
    /// assert_eq!(err.to_string(), "Invalid config: unknown field `tempo`");
    /// ```
    #[error("Invalid config: {0}")]
    ConfigError(String),

    /// Unparseable pitch or pitch-class string.
    ///
    /// # Example
    /// ```
    /// # use chordlab::LabError;
    /// let err = LabError::PitchError {
    ///     input: "H4".to_string(),
    ///     message: "unknown note letter".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid pitch 'H4': unknown note letter");
    /// ```
    #[error("Invalid pitch '{input}': {message}")]
    PitchError { input: String, message: String },

    /// Progression template name that matches no built-in template.
    #[error("Unknown progression template: {0}")]
    UnknownTemplate(String),
}
