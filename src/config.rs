//! # Voicing Configuration
//!
//! Settings for the voice leading engine, loaded from YAML.
//!
//! Configuration can come from a standalone YAML file or from the `---`
//! frontmatter block at the top of a timeline file:
//!
//! ```text
//! ---
//! anchor: 60
//! base-octave-offset: -12
//! min-duration: 0.1
//! velocity: 75
//! ---
//! 0.0 1.0 C
//! 1.0 2.0 Am
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChordiaError;
use crate::voicing::DEFAULT_BASE_OCTAVE_OFFSET;

/// Pitch the first chord of a timeline is led toward (middle C)
pub const DEFAULT_ANCHOR: f64 = 60.0;
/// Shortest duration an emitted chord may have, in seconds
pub const DEFAULT_MIN_DURATION: f64 = 0.1;
/// Note-on velocity for exported notes
pub const DEFAULT_VELOCITY: u8 = 75;

/// Voice leading settings
///
/// # Fields
/// - `anchor`: starting value of the running average pitch
/// - `base_octave_offset`: semitones added to the middle-register root before voicing
/// - `min_duration`: floor applied to every emitted interval's duration
/// - `velocity`: velocity of the note events handed to a MIDI writer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct VoicingConfig {
    pub anchor: f64,
    pub base_octave_offset: i16,
    pub min_duration: f64,
    pub velocity: u8,
}

impl Default for VoicingConfig {
    fn default() -> Self {
        Self {
            anchor: DEFAULT_ANCHOR,
            base_octave_offset: DEFAULT_BASE_OCTAVE_OFFSET,
            min_duration: DEFAULT_MIN_DURATION,
            velocity: DEFAULT_VELOCITY,
        }
    }
}

/// Raw config for YAML deserialization
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawVoicingConfig {
    pub anchor: Option<f64>,
    pub base_octave_offset: Option<i16>,
    pub min_duration: Option<f64>,
    pub velocity: Option<u8>,
}

impl RawVoicingConfig {
    /// Parse a YAML mapping; an empty document yields all-`None`
    pub fn from_yaml(content: &str) -> Result<Self, ChordiaError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ChordiaError::ConfigError(e.to_string()))
    }

    /// Read a YAML config file without filling in defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChordiaError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ChordiaError::ConfigError(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    /// Overlay `other` on top of `self`; keys set in `other` win
    pub fn merged_with(self, other: RawVoicingConfig) -> RawVoicingConfig {
        RawVoicingConfig {
            anchor: other.anchor.or(self.anchor),
            base_octave_offset: other.base_octave_offset.or(self.base_octave_offset),
            min_duration: other.min_duration.or(self.min_duration),
            velocity: other.velocity.or(self.velocity),
        }
    }

    /// Fill in defaults and validate
    pub fn resolve(&self) -> Result<VoicingConfig, ChordiaError> {
        let defaults = VoicingConfig::default();
        let config = VoicingConfig {
            anchor: self.anchor.unwrap_or(defaults.anchor),
            base_octave_offset: self.base_octave_offset.unwrap_or(defaults.base_octave_offset),
            min_duration: self.min_duration.unwrap_or(defaults.min_duration),
            velocity: self.velocity.unwrap_or(defaults.velocity),
        };
        config.validate()?;
        Ok(config)
    }
}

impl VoicingConfig {
    /// Parse and validate a YAML config document
    ///
    /// # Example
    /// ```
    /// use chordia::VoicingConfig;
    ///
    /// let config = VoicingConfig::from_yaml("anchor: 55\nvelocity: 90").unwrap();
    /// assert_eq!(config.anchor, 55.0);
    /// assert_eq!(config.velocity, 90);
    /// assert_eq!(config.min_duration, 0.1);
    /// ```
    pub fn from_yaml(content: &str) -> Result<Self, ChordiaError> {
        RawVoicingConfig::from_yaml(content)?.resolve()
    }

    /// Read and validate a YAML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChordiaError> {
        RawVoicingConfig::load(path)?.resolve()
    }

    /// Check every field is in its legal range
    pub fn validate(&self) -> Result<(), ChordiaError> {
        if !self.anchor.is_finite() || !(0.0..=127.0).contains(&self.anchor) {
            return Err(ChordiaError::ConfigError(format!(
                "anchor must be a pitch between 0 and 127, got {}",
                self.anchor
            )));
        }
        if !(-60..=60).contains(&self.base_octave_offset) {
            return Err(ChordiaError::ConfigError(format!(
                "base-octave-offset must be between -60 and 60, got {}",
                self.base_octave_offset
            )));
        }
        if !self.min_duration.is_finite() || self.min_duration <= 0.0 {
            return Err(ChordiaError::ConfigError(format!(
                "min-duration must be a positive number of seconds, got {}",
                self.min_duration
            )));
        }
        if !(1..=127).contains(&self.velocity) {
            return Err(ChordiaError::ConfigError(format!(
                "velocity must be between 1 and 127, got {}",
                self.velocity
            )));
        }
        Ok(())
    }
}
