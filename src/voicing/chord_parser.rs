//! Chord label parsing
//!
//! Parses recognizer chord labels (C, Am, G:maj, Bbmaj7, A:min7, etc.) into
//! [`StructuredChord`] values for the voicer.

use crate::error::ChordiaError;
use super::types::{ParsedLabel, PitchClass, StructuredChord};

/// Label the recognizers use for "no chord"
pub const SILENCE_LABEL: &str = "N";

/// Recognized root spellings and their pitch classes, longest spellings first
///
/// Two-character spellings must precede their one-character prefixes so that
/// `C#` is never read as `C` followed by a stray `#`.
static ROOT_SPELLINGS: [(&str, i16); 17] = [
    ("C#", 1),
    ("Db", 1),
    ("D#", 3),
    ("Eb", 3),
    ("F#", 6),
    ("Gb", 6),
    ("G#", 8),
    ("Ab", 8),
    ("A#", 10),
    ("Bb", 10),
    ("C", 0),
    ("D", 2),
    ("E", 4),
    ("F", 5),
    ("G", 7),
    ("A", 9),
    ("B", 11),
];

/// How a quality token is compared against the label
#[derive(Debug, Clone, Copy)]
enum Match {
    Exact,
    IgnoreCase,
}

/// One row of the quality rule table
struct QualityRule {
    token: &'static str,
    matching: Match,
    minor: bool,
    /// A `7` right after this token makes a major seventh (`maj7`, `M7`)
    major_seventh_on_7: bool,
}

/// Quality rules in precedence order; the first rule whose token starts the
/// remainder wins
///
/// `maj` sits above the bare `m` so `Cmaj7` is major, and `min` sits above it
/// so `Cmin` does not stop at `m`.
static QUALITY_RULES: [QualityRule; 5] = [
    QualityRule { token: "maj", matching: Match::IgnoreCase, minor: false, major_seventh_on_7: true },
    QualityRule { token: "min", matching: Match::IgnoreCase, minor: true, major_seventh_on_7: false },
    QualityRule { token: "M", matching: Match::Exact, minor: false, major_seventh_on_7: true },
    QualityRule { token: "m", matching: Match::Exact, minor: true, major_seventh_on_7: false },
    QualityRule { token: "-", matching: Match::Exact, minor: true, major_seventh_on_7: false },
];

impl QualityRule {
    fn matches(&self, text: &str) -> bool {
        match self.matching {
            Match::Exact => text.starts_with(self.token),
            Match::IgnoreCase => text
                .get(..self.token.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(self.token)),
        }
    }
}

/// Parse a chord label into a structured chord
///
/// # Grammar
/// `root [':'] [quality] [extension] ['/' bass]`
///
/// - **root**: one of the 17 spellings in `ROOT_SPELLINGS`, longest match first
/// - **quality**: `maj` / `min` (any case), `M`, `m`, `-`, checked in that order;
///   no token means major
/// - **extension**: any `7` adds a seventh; `maj7` (any case), `M7`, or a `maj`/`M`
///   quality directly followed by `7` makes it a major seventh
/// - **bass**: ignored
///
/// Anything else in the label (`sus4`, `dim`, `add9`, ...) is ignored, so an
/// unknown suffix voices as the plain major triad.
///
/// # Returns
/// - `Ok(ParsedLabel::Silence)` for `N` or a blank label
/// - `Ok(ParsedLabel::Chord(..))` for a recognized root
/// - `Err(ChordiaError::UnrecognizedChord)` when no root spelling matches
///
/// # Examples
/// ```
/// use chordia::{parse_chord_label, ParsedLabel};
///
/// let ParsedLabel::Chord(chord) = parse_chord_label("Bbmaj7").unwrap() else {
///     panic!("expected a chord");
/// };
/// assert_eq!(chord.root.value(), 10);
/// assert!(!chord.is_minor);
/// assert!(chord.is_major_seventh);
///
/// assert_eq!(parse_chord_label("N").unwrap(), ParsedLabel::Silence);
/// ```
pub fn parse_chord_label(label: &str) -> Result<ParsedLabel, ChordiaError> {
    let label = label.trim();
    if label.is_empty() || label == SILENCE_LABEL {
        return Ok(ParsedLabel::Silence);
    }

    let (spelling, pitch_class) = ROOT_SPELLINGS
        .iter()
        .find(|(spelling, _)| label.starts_with(spelling))
        .ok_or_else(|| ChordiaError::UnrecognizedChord {
            label: label.to_string(),
        })?;

    // Harte labels separate root and quality with ':'
    let rest = &label[spelling.len()..];
    let rest = rest.strip_prefix(':').unwrap_or(rest);
    // Slash bass notes do not change the voicing
    let rest = rest.split('/').next().unwrap_or_default();

    let rule = QUALITY_RULES.iter().find(|rule| rule.matches(rest));
    let is_minor = rule.is_some_and(|r| r.minor);

    let after_quality = rule.map_or(rest, |r| &rest[r.token.len()..]);
    let is_major_seventh = rule.is_some_and(|r| r.major_seventh_on_7 && after_quality.starts_with('7'))
        || rest.to_ascii_lowercase().contains("maj7")
        || rest.contains("M7");
    let has_seventh = is_major_seventh || rest.contains('7');

    Ok(ParsedLabel::Chord(StructuredChord {
        root: PitchClass::new(*pitch_class),
        is_minor,
        has_seventh,
        is_major_seventh,
    }))
}

/// All root spellings the parser recognizes, longest first
pub fn root_spellings() -> impl Iterator<Item = (&'static str, PitchClass)> {
    ROOT_SPELLINGS
        .iter()
        .map(|(spelling, pc)| (*spelling, PitchClass::new(*pc)))
}
