//! Note names and guitar fingering for MIDI note numbers

use crate::voicing::SHARP_NAMES;

/// Highest fret considered playable
pub const MAX_FRET: u8 = 22;

/// A guitar string in standard tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuitarString {
    pub name: &'static str,
    /// MIDI note of the open string
    pub open: u8,
}

/// Standard tuning, highest string first: E4 B3 G3 D3 A2 E2
pub const STANDARD_TUNING: [GuitarString; 6] = [
    GuitarString { name: "e (High)", open: 64 },
    GuitarString { name: "B", open: 59 },
    GuitarString { name: "G", open: 55 },
    GuitarString { name: "D", open: 50 },
    GuitarString { name: "A", open: 45 },
    GuitarString { name: "E (Low)", open: 40 },
];

/// Where to play a note on the fretboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuitarPosition {
    pub string: GuitarString,
    pub fret: u8,
}

impl std::fmt::Display for GuitarPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | Fret: {}", self.string.name, self.fret)
    }
}

/// Scientific pitch name for a MIDI note number, using sharps
///
/// # Examples
/// ```
/// use chordia::note_name;
///
/// assert_eq!(note_name(60), "C4");
/// assert_eq!(note_name(70), "A#4");
/// assert_eq!(note_name(0), "C-1");
/// ```
pub fn note_name(pitch: u8) -> String {
    let octave = (pitch / 12) as i16 - 1;
    format!("{}{}", SHARP_NAMES[(pitch % 12) as usize], octave)
}

/// Pick a string and fret for `pitch` in standard tuning
///
/// Strings are scanned from high e to low E; the first string whose open note
/// is at or below `pitch` with a fret no higher than [`MAX_FRET`] wins. This
/// favours the lowest fret position. Notes below the low E or above the 22nd
/// fret of the high e return `None`.
pub fn guitar_position(pitch: u8) -> Option<GuitarPosition> {
    STANDARD_TUNING
        .iter()
        .filter(|s| pitch >= s.open)
        .map(|s| GuitarPosition {
            string: *s,
            fret: pitch - s.open,
        })
        .find(|p| p.fret <= MAX_FRET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_names() {
        assert_eq!(note_name(21), "A0");
        assert_eq!(note_name(48), "C3");
        assert_eq!(note_name(61), "C#4");
        assert_eq!(note_name(71), "B4");
        assert_eq!(note_name(127), "G9");
    }

    #[test]
    fn test_open_strings() {
        for s in STANDARD_TUNING {
            let pos = guitar_position(s.open).unwrap();
            assert_eq!(pos.string, s);
            assert_eq!(pos.fret, 0);
        }
    }

    #[test]
    fn test_prefers_highest_string() {
        // C4 is fret 1 on B, not fret 5 on G
        let pos = guitar_position(60).unwrap();
        assert_eq!(pos.string.name, "B");
        assert_eq!(pos.fret, 1);
        assert_eq!(pos.to_string(), "B | Fret: 1");

        // A2 is the open A string
        assert_eq!(guitar_position(45).unwrap().string.name, "A");
        // F2 is fret 1 on low E
        assert_eq!(guitar_position(41).unwrap().string.name, "E (Low)");
    }

    #[test]
    fn test_out_of_range() {
        assert!(guitar_position(39).is_none());
        assert_eq!(guitar_position(86).unwrap().fret, 22);
        assert!(guitar_position(87).is_none());
    }
}
