//! # Timeline Input
//!
//! Reads chord timelines as written by chord recognizers.
//!
//! ## Format
//! An optional YAML frontmatter block (see [`crate::config`]) followed by one
//! event per line. Blank lines and lines starting with `#` are ignored.
//!
//! Two line shapes are accepted, but not mixed within one file:
//!
//! ```text
//! # interval form: start end label (.lab files)
//! 0.000   1.950   C:maj
//! 1.950   3.900   A:min
//!
//! # change form: timestamp label (one line per chord change)
//! 0.000   C
//! 1.950   Am
//! 3.900   N
//! ```
//!
//! Change lists are converted to intervals with [`intervals_from_changes`].
//! Fields are separated by tabs or runs of spaces; the label is the remainder
//! of the line, so it may itself contain spaces.

use crate::config::RawVoicingConfig;
use crate::error::ChordiaError;
use crate::voicing::{ChordChange, ChordInterval};

/// A parsed timeline file
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    /// Settings from the frontmatter block (all `None` when there is none)
    pub config: RawVoicingConfig,
    pub intervals: Vec<ChordInterval>,
}

/// Which line shape a file uses
#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    Intervals,
    Changes,
}

/// Turn chord change events into intervals
///
/// Each change lasts until the next change's timestamp. The final change has
/// no end and is dropped, as are changes that are not followed by a later one.
///
/// # Example
/// ```
/// use chordia::{intervals_from_changes, ChordChange, ChordInterval};
///
/// let intervals = intervals_from_changes(&[
///     ChordChange::new(0.0, "C"),
///     ChordChange::new(2.0, "G"),
///     ChordChange::new(4.0, "N"),
/// ]);
/// assert_eq!(
///     intervals,
///     vec![ChordInterval::new(0.0, 2.0, "C"), ChordInterval::new(2.0, 4.0, "G")]
/// );
/// ```
pub fn intervals_from_changes(changes: &[ChordChange]) -> Vec<ChordInterval> {
    changes
        .windows(2)
        .map(|pair| ChordInterval::new(pair[0].timestamp, pair[1].timestamp, pair[0].label.clone()))
        .collect()
}

/// Split a timeline source into (frontmatter, body, body's first line number)
fn split_frontmatter(source: &str) -> Result<(Option<&str>, &str, usize), ChordiaError> {
    let trimmed = source.trim_start_matches('\u{feff}');
    let Some(after_open) = trimmed
        .strip_prefix("---\n")
        .or_else(|| trimmed.strip_prefix("---\r\n"))
    else {
        return Ok((None, trimmed, 1));
    };

    let mut offset = 0;
    for (i, line) in after_open.split_inclusive('\n').enumerate() {
        if line.trim_end() == "---" {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            // opening delimiter + yaml lines + closing delimiter
            return Ok((Some(yaml), body, i + 3));
        }
        offset += line.len();
    }

    Err(ChordiaError::TimelineError {
        line: 1,
        message: "frontmatter opened with '---' is never closed".to_string(),
    })
}

fn parse_time(field: &str, line: usize) -> Result<f64, ChordiaError> {
    let value: f64 = field.parse().map_err(|_| ChordiaError::TimelineError {
        line,
        message: format!("expected a time in seconds, found '{}'", field),
    })?;
    if !value.is_finite() {
        return Err(ChordiaError::TimelineError {
            line,
            message: format!("time must be finite, found '{}'", field),
        });
    }
    Ok(value)
}

/// Split off the first whitespace-delimited field
fn next_field(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    match text.find(char::is_whitespace) {
        Some(i) => Some((&text[..i], text[i..].trim_start())),
        None => Some((text, "")),
    }
}

/// Parse a timeline file
///
/// # Errors
/// `ChordiaError::TimelineError` (with the 1-based line) for a missing label,
/// a non-numeric or non-finite time, an unclosed frontmatter block, or a file
/// that mixes the interval and change forms. Invalid frontmatter YAML gives
/// `ChordiaError::ConfigError`.
///
/// # Example
/// ```
/// use chordia::parse_timeline;
///
/// let timeline = parse_timeline("---\nvelocity: 90\n---\n0.0 1.0 C\n1.0 2.0 G7\n").unwrap();
/// assert_eq!(timeline.config.velocity, Some(90));
/// assert_eq!(timeline.intervals.len(), 2);
/// assert_eq!(timeline.intervals[1].label, "G7");
/// ```
pub fn parse_timeline(source: &str) -> Result<Timeline, ChordiaError> {
    let (frontmatter, body, first_line) = split_frontmatter(source)?;
    let config = match frontmatter {
        Some(yaml) => RawVoicingConfig::from_yaml(yaml)?,
        None => RawVoicingConfig::default(),
    };

    let mut shape: Option<Shape> = None;
    let mut intervals = Vec::new();
    let mut changes = Vec::new();

    for (i, raw_line) in body.lines().enumerate() {
        let line_number = first_line + i;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (first, rest) = next_field(line).ok_or_else(|| ChordiaError::TimelineError {
            line: line_number,
            message: "empty event".to_string(),
        })?;
        let start = parse_time(first, line_number)?;

        // A second numeric field makes this an interval line
        let (line_shape, end, label) = match next_field(rest) {
            Some((second, label)) if second.parse::<f64>().is_ok() => {
                (Shape::Intervals, Some(parse_time(second, line_number)?), label)
            }
            Some(_) => (Shape::Changes, None, rest),
            None => (Shape::Changes, None, ""),
        };
        if label.is_empty() {
            return Err(ChordiaError::TimelineError {
                line: line_number,
                message: "missing chord label".to_string(),
            });
        }

        match shape {
            None => shape = Some(line_shape),
            Some(s) if s != line_shape => {
                return Err(ChordiaError::TimelineError {
                    line: line_number,
                    message: "cannot mix 'start end label' and 'timestamp label' lines".to_string(),
                })
            }
            Some(_) => {}
        }

        match end {
            Some(end) => intervals.push(ChordInterval::new(start, end, label)),
            None => changes.push(ChordChange::new(start, label)),
        }
    }

    if shape == Some(Shape::Changes) {
        intervals = intervals_from_changes(&changes);
    }

    Ok(Timeline { config, intervals })
}
