//! # Error Types
//!
//! This module defines all error types for the chord voicing pipeline.
//!
//! Errors fall into two groups:
//! - **Per-chord skips** - `UnrecognizedChord` and `PitchOutOfRange`. The voice
//!   leading engine recovers from these (drops or clamps the chord) and keeps going.
//! - **Contract violations** - `InvalidInterval`, `TimelineError`, `ConfigError`
//!   and `ExportError`. These abort the run and are returned to the caller.
//!
//! Silence (`N` or an empty label) is not an error; see [`crate::ParsedLabel`].
//!
//! ## Usage
//! ```rust
//! use chordia::{parse_chord_label, ChordiaError};
//!
//! match parse_chord_label("H7") {
//!     Err(ChordiaError::UnrecognizedChord { label }) => assert_eq!(label, "H7"),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChordiaError {
    /// No recognized root spelling starts the label.
    ///
    /// # Example
    /// ```
    /// # use chordia::ChordiaError;
    /// let err = ChordiaError::UnrecognizedChord { label: "X".to_string() };
    /// assert_eq!(err.to_string(), "Unrecognized chord label 'X'");
    /// ```
    #[error("Unrecognized chord label '{label}'")]
    UnrecognizedChord { label: String },

    /// A voicing would place a note outside the MIDI range 0..=127.
    ///
    /// `lowest` and `highest` are the unclamped extremes of the voicing,
    /// saturated at the `i16` bounds.
    #[error("Voicing for '{label}' spans {lowest}..={highest}, outside MIDI range 0..=127")]
    PitchOutOfRange {
        label: String,
        lowest: i16,
        highest: i16,
    },

    /// An interval that breaks the input contract (non-finite or negative time).
    ///
    /// `index` is the zero-based position in the input timeline.
    #[error("Invalid interval at index {index}: {message}")]
    InvalidInterval { index: usize, message: String },

    /// Malformed timeline text, with the 1-based source line.
    ///
    /// # Example
    /// ```
    /// # use chordia::ChordiaError;
    /// let err = ChordiaError::TimelineError {
    ///     line: 3,
    ///     message: "expected a number, found 'abc'".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Timeline error at line 3: expected a number, found 'abc'");
    /// ```
    #[error("Timeline error at line {line}: {message}")]
    TimelineError { line: usize, message: String },

    /// Invalid or unreadable voicing configuration.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Rendering the voiced timeline failed.
    #[error("Export error: {0}")]
    ExportError(String),
}
