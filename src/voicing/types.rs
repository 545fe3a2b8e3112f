//! Voicing type definitions
//!
//! This module defines the chord, voicing, and timeline types shared by the
//! parser, the voicer, and the voice leading engine.

use serde::Serialize;

/// Lowest valid MIDI note number
pub const MIDI_MIN: i16 = 0;
/// Highest valid MIDI note number
pub const MIDI_MAX: i16 = 127;

/// Sharp spellings indexed by pitch class
pub const SHARP_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// A pitch class, 0 (C) through 11 (B)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Build a pitch class, wrapping any semitone count into 0..12
    pub fn new(semitones: i16) -> Self {
        PitchClass(semitones.rem_euclid(12) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Sharp spelling, e.g. `F#`
    pub fn name(self) -> &'static str {
        SHARP_NAMES[self.0 as usize]
    }

    /// MIDI note number of this pitch class in the middle register (C = 60, B = 71)
    pub fn middle_midi(self) -> i16 {
        60 + self.0 as i16
    }
}

/// A parsed chord: root plus the quality flags the voicer understands
///
/// `is_major_seventh` implies `has_seventh`; the parser never produces a
/// major seventh without the seventh flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredChord {
    pub root: PitchClass,
    pub is_minor: bool,
    pub has_seventh: bool,
    pub is_major_seventh: bool,
}

impl StructuredChord {
    /// Plain major triad on `root`
    pub fn major(root: PitchClass) -> Self {
        Self {
            root,
            is_minor: false,
            has_seventh: false,
            is_major_seventh: false,
        }
    }

    /// Plain minor triad on `root`
    pub fn minor(root: PitchClass) -> Self {
        Self {
            is_minor: true,
            ..Self::major(root)
        }
    }

    /// Semitone offsets from the root, in stacking order: root, fifth, third, seventh
    pub fn intervals(&self) -> Vec<i16> {
        let third = if self.is_minor { 3 } else { 4 };
        let mut intervals = vec![0, 7, third];
        if self.is_major_seventh {
            intervals.push(11);
        } else if self.has_seventh {
            intervals.push(10);
        }
        intervals
    }
}

/// Result of parsing a chord label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedLabel {
    /// A voiceable chord
    Chord(StructuredChord),
    /// No chord (`N` or empty); the caller skips the interval
    Silence,
}

/// One chord label spanning `start..end` seconds
///
/// Produced by a chord recognizer; the engine expects ascending `start` order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordInterval {
    pub start: f64,
    pub end: f64,
    pub label: String,
}

impl ChordInterval {
    pub fn new(start: f64, end: f64, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }
}

/// A chord change event: `label` starts sounding at `timestamp`
///
/// Recognizers such as Chordino report changes rather than intervals; see
/// [`crate::intervals_from_changes`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChordChange {
    pub timestamp: f64,
    pub label: String,
}

impl ChordChange {
    pub fn new(timestamp: f64, label: impl Into<String>) -> Self {
        Self {
            timestamp,
            label: label.into(),
        }
    }
}

/// A concrete chord: distinct MIDI note numbers, ascending
///
/// Every pitch lies in 0..=127. Construct through [`Voicing::from_pitches`]
/// (validating) or [`Voicing::clamped`] (clipping).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Voicing(Vec<u8>);

impl Voicing {
    /// Build a voicing from raw pitches, or `None` if any pitch is out of range
    pub fn from_pitches(pitches: &[i16]) -> Option<Self> {
        if pitches.iter().any(|p| !(MIDI_MIN..=MIDI_MAX).contains(p)) {
            return None;
        }
        let mut notes: Vec<u8> = pitches.iter().map(|&p| p as u8).collect();
        notes.sort_unstable();
        notes.dedup();
        Some(Voicing(notes))
    }

    /// Build a voicing by clipping every pitch into 0..=127
    ///
    /// Pitches that collapse onto the same boundary are merged.
    pub fn clamped(pitches: &[i16]) -> Self {
        let mut notes: Vec<u8> = pitches
            .iter()
            .map(|p| (*p).clamp(MIDI_MIN, MIDI_MAX) as u8)
            .collect();
        notes.sort_unstable();
        notes.dedup();
        Voicing(notes)
    }

    pub fn pitches(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Arithmetic mean pitch, or `None` for an empty voicing
    pub fn mean(&self) -> Option<f64> {
        if self.0.is_empty() {
            return None;
        }
        let sum: u32 = self.0.iter().map(|&p| p as u32).sum();
        Some(sum as f64 / self.0.len() as f64)
    }

    /// This voicing moved by `semitones`, or `None` if any note would leave 0..=127
    pub fn shifted(&self, semitones: i16) -> Option<Self> {
        let raw: Vec<i16> = self
            .0
            .iter()
            .map(|&p| (p as i16).saturating_add(semitones))
            .collect();
        Self::from_pitches(&raw)
    }
}

/// A voiced chord on the output timeline
///
/// # Fields
/// - `start` / `end`: the source interval, unchanged
/// - `duration`: `end - start`, floored at the configured minimum duration
/// - `label`: the chord label the pitches were built from
/// - `octave_shift`: semitones applied to the base voicing (-12, 0, or 12)
/// - `pitches`: the selected voicing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicedInterval {
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    pub label: String,
    pub octave_shift: i16,
    pub pitches: Voicing,
}

/// A single note handed to a MIDI writer: one note-on/note-off pair
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteEvent {
    pub pitch: u8,
    pub start: f64,
    pub duration: f64,
    pub velocity: u8,
}
