pub mod config;
pub mod error;
pub mod export;
pub mod notes;
pub mod timeline;
pub mod voicing;

pub use config::{RawVoicingConfig, VoicingConfig};
pub use error::*;
pub use export::{chord_table, note_sheet, tab_sheet, to_json, to_note_events};
pub use notes::{guitar_position, note_name, GuitarPosition, GuitarString, STANDARD_TUNING};
pub use timeline::{intervals_from_changes, parse_timeline, Timeline};
pub use voicing::*;

/// Voice a timeline file with the settings from its own frontmatter.
/// This is the main entry point for the library.
///
/// ```
/// let voiced = chordia::voice_timeline("0 1 C\n1 2 Am\n2 3 N\n").unwrap();
/// assert_eq!(voiced.len(), 2);
/// ```
pub fn voice_timeline(source: &str) -> Result<Vec<VoicedInterval>, ChordiaError> {
    voice_timeline_with(source, RawVoicingConfig::default()).map(|(voiced, _)| voiced)
}

/// Voice a timeline file, letting `overrides` win over its frontmatter.
///
/// Returns the voiced intervals and the resolved configuration (for the
/// export velocity).
pub fn voice_timeline_with(
    source: &str,
    overrides: RawVoicingConfig,
) -> Result<(Vec<VoicedInterval>, VoicingConfig), ChordiaError> {
    let timeline = parse_timeline(source)?;
    let config = timeline.config.merged_with(overrides).resolve()?;
    let engine = VoiceLeadingEngine::new(config);
    let voiced = engine.process(&timeline.intervals)?;
    Ok((voiced, engine.config().clone()))
}
