//! # Export
//!
//! Renders a voiced timeline for hand-off to other tools.
//!
//! ## Output Forms
//! - [`to_note_events()`] - one note-on/note-off pair per pitch, for a MIDI writer
//! - [`note_sheet()`] - `1.50s: C4` lines for reading along on an instrument
//! - [`tab_sheet()`] - note sheet with a guitar string and fret per note
//! - [`chord_table()`] - one row per chord: start, end, label, note names
//! - [`to_json()`] - the voiced intervals and note events as JSON
//!
//! Binary MIDI encoding is left to the MIDI writer that consumes the note events.

use std::fmt::Write;

use serde::Serialize;

use crate::error::ChordiaError;
use crate::notes::{guitar_position, note_name};
use crate::voicing::{NoteEvent, VoicedInterval};

/// Expand voiced intervals into individual notes
///
/// Every pitch of every interval becomes one event lasting the interval's
/// (floored) duration. Events are ordered by start time, then pitch.
///
/// # Example
/// ```
/// use chordia::{to_note_events, ChordInterval, VoiceLeadingEngine};
///
/// let voiced = VoiceLeadingEngine::default()
///     .process(&[ChordInterval::new(0.0, 2.0, "C")])
///     .unwrap();
/// let events = to_note_events(&voiced, 75);
///
/// assert_eq!(events.len(), 3);
/// assert_eq!(events[0].pitch, 60);
/// assert_eq!(events[0].duration, 2.0);
/// assert_eq!(events[0].velocity, 75);
/// ```
pub fn to_note_events(voiced: &[VoicedInterval], velocity: u8) -> Vec<NoteEvent> {
    let mut events: Vec<NoteEvent> = voiced
        .iter()
        .flat_map(|v| {
            v.pitches.pitches().iter().map(move |&pitch| NoteEvent {
                pitch,
                start: v.start,
                duration: v.duration,
                velocity,
            })
        })
        .collect();
    events.sort_by(|a, b| a.start.total_cmp(&b.start).then(a.pitch.cmp(&b.pitch)));
    events
}

/// One `{start}s: {note}` line per event, times rounded to hundredths
pub fn note_sheet(events: &[NoteEvent]) -> String {
    let mut out = String::new();
    for event in events {
        let _ = writeln!(out, "{:.2}s: {}", event.start, note_name(event.pitch));
    }
    out
}

/// Note sheet with a guitar position per note, or `Out of Range`
pub fn tab_sheet(events: &[NoteEvent]) -> String {
    let mut out = String::new();
    for event in events {
        let position = match guitar_position(event.pitch) {
            Some(p) => p.to_string(),
            None => "Out of Range".to_string(),
        };
        let _ = writeln!(
            out,
            "{:.2}s: {} - {}",
            event.start,
            note_name(event.pitch),
            position
        );
    }
    out
}

/// Tab-separated chord table with a header row
///
/// # Example
/// ```
/// use chordia::{chord_table, ChordInterval, VoiceLeadingEngine};
///
/// let voiced = VoiceLeadingEngine::default()
///     .process(&[ChordInterval::new(0.0, 1.0, "C")])
///     .unwrap();
/// assert_eq!(chord_table(&voiced), "Start\tEnd\tChord\tNotes\n0.00\t1.00\tC\tC4 E4 G4\n");
/// ```
pub fn chord_table(voiced: &[VoicedInterval]) -> String {
    let mut out = String::from("Start\tEnd\tChord\tNotes\n");
    for v in voiced {
        let notes: Vec<String> = v.pitches.pitches().iter().map(|&p| note_name(p)).collect();
        let _ = writeln!(
            out,
            "{:.2}\t{:.2}\t{}\t{}",
            v.start,
            v.end,
            v.label,
            notes.join(" ")
        );
    }
    out
}

/// JSON document holding both views of the result
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    chords: &'a [VoicedInterval],
    notes: Vec<NoteEvent>,
}

/// Pretty-printed JSON with `chords` (voiced intervals) and `notes` (note events)
pub fn to_json(voiced: &[VoicedInterval], velocity: u8) -> Result<String, ChordiaError> {
    let document = ExportDocument {
        chords: voiced,
        notes: to_note_events(voiced, velocity),
    };
    serde_json::to_string_pretty(&document)
        .map_err(|e| ChordiaError::ExportError(format!("JSON serialization failed: {}", e)))
}
