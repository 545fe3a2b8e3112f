//! # Voicing Module
//!
//! Turn a chord-label timeline into concrete MIDI pitch sets with smooth voice leading.
//!
//! ## Purpose
//! Chord recognizers report *which* chord sounds when (`0.0 1.0 C`, `1.0 2.0 Am`).
//! To play or export those chords we need actual notes. This module:
//! 1. **Parses** each label into a root and quality flags
//! 2. **Voices** the chord as root, third, fifth and optional seventh in a mid register
//! 3. **Leads** each chord by moving it up or down an octave so its average pitch
//!    stays near the previous chord's
//!
//! ## Sub-modules
//! - `types` - StructuredChord, Voicing, ChordInterval, VoicedInterval, NoteEvent
//! - `chord_parser` - Chord label parsing (C, Am, G:maj, Bbmaj7, etc.)
//! - `voicer` - Chord to MIDI note expansion
//! - `engine` - Greedy nearest-average voice leading
//!
//! ## Key Types
//! - [`StructuredChord`] - Root pitch class plus minor / seventh / major-seventh flags
//! - [`Voicing`] - Ascending, in-range MIDI note numbers for one chord
//! - [`VoicedInterval`] - A voicing placed on the timeline
//!
//! ## Entry Point
//! [`VoiceLeadingEngine::process()`] - Voice a whole timeline
//!
//! ## Example
//! ```rust
//! use chordia::{ChordInterval, VoiceLeadingEngine};
//!
//! let timeline = vec![
//!     ChordInterval::new(0.0, 1.0, "C"),
//!     ChordInterval::new(1.0, 2.0, "Am"),
//!     ChordInterval::new(2.0, 3.0, "F"),
//! ];
//!
//! let voiced = VoiceLeadingEngine::default().process(&timeline).unwrap();
//!
//! assert_eq!(voiced[0].pitches.pitches(), &[60, 64, 67]); // C4 E4 G4
//! assert_eq!(voiced[1].pitches.pitches(), &[57, 60, 64]); // A3 C4 E4
//! assert_eq!(voiced[2].pitches.pitches(), &[53, 57, 60]); // F3 A3 C4
//! ```
//!
//! ## Octave Selection
//!
//! Every chord is first voiced with its root one octave below the middle
//! register (C3 = 48). Three candidates are then compared: that voicing, one
//! octave down, and one octave up. The candidate whose mean pitch is closest to
//! the previous chord's mean wins; the first chord is compared against the
//! anchor (middle C, 60). Exact ties go to the unshifted voicing, then to the
//! octave below.
//!
//! ## Skipped Intervals
//! - `N` / empty labels are silence
//! - Labels without a recognizable root are logged and dropped
//!
//! Neither changes the running average.

mod types;
mod chord_parser;
mod voicer;
mod engine;

#[cfg(test)]
mod tests;

pub use types::{
    ChordChange, ChordInterval, NoteEvent, ParsedLabel, PitchClass, StructuredChord,
    VoicedInterval, Voicing, MIDI_MAX, MIDI_MIN, SHARP_NAMES,
};
pub use chord_parser::{parse_chord_label, root_spellings, SILENCE_LABEL};
pub use voicer::{voice, voice_clamped, DEFAULT_BASE_OCTAVE_OFFSET};
pub use engine::{select_candidate, LeadingState, VoiceLeadingEngine, CANDIDATE_SHIFTS};
