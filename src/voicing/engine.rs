//! Voice leading engine
//!
//! Turns a chord-label timeline into a timeline of voiced chords, moving each
//! chord by whole octaves so it stays close to the one before it.

use crate::config::VoicingConfig;
use crate::error::ChordiaError;
use super::chord_parser::parse_chord_label;
use super::types::{ChordInterval, ParsedLabel, VoicedInterval, Voicing};
use super::voicer::{voice, voice_clamped};

/// Octave shifts tried for every chord, in tie-break order
///
/// The unshifted voicing is tried first, so it wins any exact tie.
pub const CANDIDATE_SHIFTS: [i16; 3] = [0, -12, 12];

/// Pick the octave shift of `base` whose mean pitch is closest to `previous_average`
///
/// Candidates are evaluated in [`CANDIDATE_SHIFTS`] order and a later
/// candidate only replaces the current best when it is strictly closer.
/// Shifts that would push a note outside 0..=127 are not considered; the
/// unshifted voicing is always a candidate.
///
/// Returns the chosen shift and the shifted voicing.
///
/// # Example
/// ```
/// use chordia::{select_candidate, Voicing};
///
/// // C3 major triad led from middle C moves up an octave
/// let base = Voicing::from_pitches(&[48, 52, 55]).unwrap();
/// let (shift, chosen) = select_candidate(&base, 60.0);
/// assert_eq!(shift, 12);
/// assert_eq!(chosen.pitches(), &[60, 64, 67]);
/// ```
pub fn select_candidate(base: &Voicing, previous_average: f64) -> (i16, Voicing) {
    let mut best = (0, base.clone());
    let mut best_distance = match base.mean() {
        Some(mean) => (mean - previous_average).abs(),
        None => return best,
    };

    for &shift in CANDIDATE_SHIFTS.iter().filter(|&&s| s != 0) {
        let Some(candidate) = base.shifted(shift) else {
            continue;
        };
        let Some(mean) = candidate.mean() else {
            continue;
        };
        let distance = (mean - previous_average).abs();
        if distance < best_distance {
            best_distance = distance;
            best = (shift, candidate);
        }
    }

    best
}

/// State carried from one chord to the next during a single timeline pass
#[derive(Debug, Clone, PartialEq)]
pub struct LeadingState {
    /// Mean pitch of the last emitted voicing (the anchor before any chord)
    pub previous_average: f64,
    /// Start time of the last interval seen, for order checks
    last_start: Option<f64>,
}

impl LeadingState {
    /// Fresh state for a new timeline
    pub fn new(anchor: f64) -> Self {
        Self {
            previous_average: anchor,
            last_start: None,
        }
    }

    /// Voice one interval and advance the state
    ///
    /// Returns `Ok(None)` when the interval is skipped (silence or an
    /// unrecognized label); the state is left unchanged in that case.
    ///
    /// # Errors
    /// - `ChordiaError::ConfigError` when `config` fails [`VoicingConfig::validate`]
    /// - `ChordiaError::InvalidInterval` when `start` is negative or not finite,
    ///   or `end` is not finite. `index` is only used for the error message.
    pub fn step(
        &mut self,
        index: usize,
        interval: &ChordInterval,
        config: &VoicingConfig,
    ) -> Result<Option<VoicedInterval>, ChordiaError> {
        config.validate()?;
        check_interval(index, interval)?;

        if let Some(last) = self.last_start {
            if interval.start < last {
                log::warn!(
                    "interval {} starts at {:.3}s, before the previous start {:.3}s",
                    index,
                    interval.start,
                    last
                );
            }
        }
        self.last_start = Some(interval.start);

        let chord = match parse_chord_label(&interval.label) {
            Ok(ParsedLabel::Chord(chord)) => chord,
            Ok(ParsedLabel::Silence) => {
                log::debug!("interval {} is silence, skipping", index);
                return Ok(None);
            }
            Err(e) => {
                log::warn!("skipping interval {}: {}", index, e);
                return Ok(None);
            }
        };

        let base = match voice(&chord, config.base_octave_offset) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("interval {} ('{}'): {}; clamping", index, interval.label, e);
                voice_clamped(&chord, config.base_octave_offset)
            }
        };

        let (octave_shift, pitches) = select_candidate(&base, self.previous_average);
        if let Some(mean) = pitches.mean() {
            self.previous_average = mean;
        }

        Ok(Some(VoicedInterval {
            start: interval.start,
            end: interval.end,
            duration: (interval.end - interval.start).max(config.min_duration),
            label: interval.label.clone(),
            octave_shift,
            pitches,
        }))
    }
}

fn check_interval(index: usize, interval: &ChordInterval) -> Result<(), ChordiaError> {
    if !interval.start.is_finite() || interval.start < 0.0 {
        return Err(ChordiaError::InvalidInterval {
            index,
            message: format!("start must be a finite time >= 0, got {}", interval.start),
        });
    }
    if !interval.end.is_finite() {
        return Err(ChordiaError::InvalidInterval {
            index,
            message: format!("end must be a finite time, got {}", interval.end),
        });
    }
    Ok(())
}

/// Greedy nearest-average voice leading over a chord timeline
///
/// The engine holds only its configuration; each call to
/// [`process`](VoiceLeadingEngine::process) starts from a fresh
/// [`LeadingState`], so one engine can serve any number of timelines from any
/// number of threads.
#[derive(Debug, Clone, Default)]
pub struct VoiceLeadingEngine {
    config: VoicingConfig,
}

impl VoiceLeadingEngine {
    pub fn new(config: VoicingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VoicingConfig {
        &self.config
    }

    /// Voice a whole timeline in one forward pass
    ///
    /// For every interval, in order:
    /// 1. Parse the label; skip silence and unrecognized labels
    /// 2. Voice the chord at the configured base octave (clamping if it leaves the MIDI range)
    /// 3. Pick the octave shift (0, -12, +12) whose mean is nearest the previous chord's mean
    /// 4. Emit the chord with its duration floored at `min_duration`
    ///
    /// This is a greedy heuristic with no lookahead.
    ///
    /// # Errors
    /// - `ChordiaError::ConfigError` when the engine's config fails
    ///   [`VoicingConfig::validate`], even for an empty timeline
    /// - `ChordiaError::InvalidInterval` on the first interval with a negative
    ///   or non-finite start, or a non-finite end
    ///
    /// No partial output is returned.
    ///
    /// # Example
    /// ```
    /// use chordia::{ChordInterval, VoiceLeadingEngine};
    ///
    /// let engine = VoiceLeadingEngine::default();
    /// let voiced = engine
    ///     .process(&[
    ///         ChordInterval::new(0.0, 1.0, "C"),
    ///         ChordInterval::new(1.0, 2.0, "N"),
    ///         ChordInterval::new(2.0, 3.0, "G"),
    ///     ])
    ///     .unwrap();
    ///
    /// assert_eq!(voiced.len(), 2);
    /// assert_eq!(voiced[0].pitches.pitches(), &[60, 64, 67]);
    /// ```
    pub fn process(&self, intervals: &[ChordInterval]) -> Result<Vec<VoicedInterval>, ChordiaError> {
        self.config.validate()?;
        let mut state = LeadingState::new(self.config.anchor);
        let mut voiced = Vec::with_capacity(intervals.len());

        for (index, interval) in intervals.iter().enumerate() {
            if let Some(v) = state.step(index, interval, &self.config)? {
                voiced.push(v);
            }
        }

        log::debug!(
            "voiced {} of {} intervals",
            voiced.len(),
            intervals.len()
        );
        Ok(voiced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voicing(pitches: &[i16]) -> Voicing {
        Voicing::from_pitches(pitches).unwrap()
    }

    #[test]
    fn test_select_prefers_nearest() {
        let c3 = voicing(&[48, 52, 55]);
        let (shift, chosen) = select_candidate(&c3, 40.0);
        assert_eq!(shift, -12);
        assert_eq!(chosen.pitches(), &[36, 40, 43]);

        let (shift, _) = select_candidate(&c3, 52.0);
        assert_eq!(shift, 0);
    }

    #[test]
    fn test_select_tie_prefers_unshifted() {
        // Cmaj7 mean 53.5; +12 mean 65.5; midpoint 59.5
        let cmaj7 = voicing(&[48, 52, 55, 59]);
        for _ in 0..3 {
            let (shift, chosen) = select_candidate(&cmaj7, 59.5);
            assert_eq!(shift, 0);
            assert_eq!(chosen, cmaj7);
        }
        // Midpoint with the -12 candidate (mean 41.5)
        let (shift, _) = select_candidate(&cmaj7, 47.5);
        assert_eq!(shift, 0);
    }

    #[test]
    fn test_select_skips_out_of_range_candidates() {
        let high = voicing(&[118, 122, 125]);
        let (shift, chosen) = select_candidate(&high, 127.0);
        assert_eq!(shift, 0);
        assert_eq!(chosen, high);

        let low = voicing(&[2, 5, 9]);
        let (shift, _) = select_candidate(&low, 0.0);
        assert_eq!(shift, 0);
    }

    #[test]
    fn test_step_skips_leave_state_untouched() {
        let config = VoicingConfig::default();
        let mut state = LeadingState::new(60.0);

        let silent = state.step(0, &ChordInterval::new(0.0, 1.0, "N"), &config).unwrap();
        assert!(silent.is_none());
        let unknown = state.step(1, &ChordInterval::new(1.0, 2.0, "Q"), &config).unwrap();
        assert!(unknown.is_none());
        assert_eq!(state.previous_average, 60.0);
    }

    #[test]
    fn test_step_updates_average() {
        let config = VoicingConfig::default();
        let mut state = LeadingState::new(60.0);
        let v = state
            .step(0, &ChordInterval::new(0.0, 1.0, "Cmaj7"), &config)
            .unwrap()
            .unwrap();
        // 53.5 is 6.5 away, 65.5 is 5.5 away
        assert_eq!(v.octave_shift, 12);
        assert_eq!(state.previous_average, 65.5);
    }

    #[test]
    fn test_invalid_interval_is_fatal() {
        let engine = VoiceLeadingEngine::default();
        let err = engine
            .process(&[
                ChordInterval::new(0.0, 1.0, "C"),
                ChordInterval::new(f64::NAN, 2.0, "G"),
            ])
            .unwrap_err();
        assert!(matches!(err, ChordiaError::InvalidInterval { index: 1, .. }));

        let err = engine
            .process(&[ChordInterval::new(-1.0, 0.5, "C")])
            .unwrap_err();
        assert!(matches!(err, ChordiaError::InvalidInterval { index: 0, .. }));

        let err = engine
            .process(&[ChordInterval::new(0.0, f64::INFINITY, "C")])
            .unwrap_err();
        assert!(matches!(err, ChordiaError::InvalidInterval { index: 0, .. }));
    }

    #[test]
    fn test_unvalidated_config_rejected() {
        let nan_floor = VoiceLeadingEngine::new(VoicingConfig {
            min_duration: f64::NAN,
            ..VoicingConfig::default()
        });
        let err = nan_floor
            .process(&[ChordInterval::new(1.0, 0.5, "C")])
            .unwrap_err();
        assert!(matches!(err, ChordiaError::ConfigError(_)));
        assert!(nan_floor.process(&[]).is_err());

        let huge_offset = VoiceLeadingEngine::new(VoicingConfig {
            base_octave_offset: i16::MAX - 50,
            ..VoicingConfig::default()
        });
        let err = huge_offset
            .process(&[ChordInterval::new(0.0, 1.0, "B7")])
            .unwrap_err();
        assert!(err.to_string().contains("base-octave-offset"));

        let mut state = LeadingState::new(60.0);
        let bad = VoicingConfig {
            velocity: 0,
            ..VoicingConfig::default()
        };
        assert!(state.step(0, &ChordInterval::new(0.0, 1.0, "C"), &bad).is_err());
        assert_eq!(state.previous_average, 60.0);
    }

    #[test]
    fn test_clamped_voicing_still_emitted() {
        let engine = VoiceLeadingEngine::new(VoicingConfig {
            anchor: 127.0,
            base_octave_offset: 48,
            ..VoicingConfig::default()
        });
        let voiced = engine.process(&[ChordInterval::new(0.0, 1.0, "B7")]).unwrap();
        assert_eq!(voiced.len(), 1);
        assert!(voiced[0].pitches.pitches().iter().all(|&p| p <= 127));
        assert_eq!(voiced[0].pitches.pitches(), &[119, 123, 126, 127]);
    }
}
