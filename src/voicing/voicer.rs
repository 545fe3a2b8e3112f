//! Chord voicing
//!
//! Expands a [`StructuredChord`] into concrete MIDI note numbers.

use crate::error::ChordiaError;
use super::types::{StructuredChord, Voicing};

/// Default offset from the middle-register root: one octave down (C3 = 48)
pub const DEFAULT_BASE_OCTAVE_OFFSET: i16 = -12;

/// Raw (unvalidated) pitches for `chord`, in stacking order
///
/// Saturates at the `i16` bounds, which are far outside the MIDI range.
fn raw_pitches(chord: &StructuredChord, base_octave_offset: i16) -> Vec<i16> {
    let root = chord.root.middle_midi().saturating_add(base_octave_offset);
    chord
        .intervals()
        .into_iter()
        .map(|i| root.saturating_add(i))
        .collect()
}

/// Voice a chord with its root at the middle-register value plus `base_octave_offset`
///
/// Builds root, fifth, third (+3 minor / +4 major) and at most one seventh
/// (+10 dominant / +11 major).
///
/// # Errors
/// `ChordiaError::PitchOutOfRange` if any note falls outside 0..=127. Callers
/// that must emit something use [`voice_clamped`] instead.
///
/// # Examples
/// ```
/// use chordia::{parse_chord_label, voice, ParsedLabel};
///
/// let ParsedLabel::Chord(c) = parse_chord_label("C").unwrap() else { unreachable!() };
/// // C3, E3, G3
/// assert_eq!(voice(&c, -12).unwrap().pitches(), &[48, 52, 55]);
///
/// let ParsedLabel::Chord(g7) = parse_chord_label("G7").unwrap() else { unreachable!() };
/// // G3, B3, D4, F4
/// assert_eq!(voice(&g7, -12).unwrap().pitches(), &[55, 59, 62, 65]);
/// ```
///
/// # MIDI Note Reference
/// - C3 = 48, D3 = 50, E3 = 52, F3 = 53, G3 = 55, A3 = 57, B3 = 59
pub fn voice(chord: &StructuredChord, base_octave_offset: i16) -> Result<Voicing, ChordiaError> {
    let raw = raw_pitches(chord, base_octave_offset);
    Voicing::from_pitches(&raw).ok_or_else(|| ChordiaError::PitchOutOfRange {
        label: describe(chord),
        lowest: raw.iter().copied().min().unwrap_or_default(),
        highest: raw.iter().copied().max().unwrap_or_default(),
    })
}

/// Voice a chord, clipping notes into 0..=127 instead of failing
///
/// Notes clipped onto the same boundary merge, so the result may hold fewer
/// notes than the chord has intervals.
pub fn voice_clamped(chord: &StructuredChord, base_octave_offset: i16) -> Voicing {
    Voicing::clamped(&raw_pitches(chord, base_octave_offset))
}

/// Short chord name for error messages, e.g. `Am7`
fn describe(chord: &StructuredChord) -> String {
    let quality = if chord.is_minor { "m" } else { "" };
    let seventh = if chord.is_major_seventh {
        "maj7"
    } else if chord.has_seventh {
        "7"
    } else {
        ""
    };
    format!("{}{}{}", chord.root.name(), quality, seventh)
}
