use super::*;
use crate::config::VoicingConfig;

fn run(timeline: &[(f64, f64, &str)]) -> Vec<VoicedInterval> {
    run_with(VoicingConfig::default(), timeline)
}

fn run_with(config: VoicingConfig, timeline: &[(f64, f64, &str)]) -> Vec<VoicedInterval> {
    let intervals: Vec<ChordInterval> = timeline
        .iter()
        .map(|(start, end, label)| ChordInterval::new(*start, *end, *label))
        .collect();
    VoiceLeadingEngine::new(config).process(&intervals).unwrap()
}

fn parsed(label: &str) -> StructuredChord {
    match parse_chord_label(label).unwrap() {
        ParsedLabel::Chord(c) => c,
        ParsedLabel::Silence => panic!("'{}' parsed as silence", label),
    }
}

#[test]
fn test_voice_parsed_c_major() {
    let v = voice(&parsed("C"), DEFAULT_BASE_OCTAVE_OFFSET).unwrap();
    assert_eq!(v.pitches(), &[48, 52, 55]); // C3, E3, G3
}

#[test]
fn test_voice_parsed_a_minor_shape() {
    let v = voice(&parsed("Am"), DEFAULT_BASE_OCTAVE_OFFSET).unwrap();
    let root = 57u8; // A3
    let shape: Vec<u8> = v.pitches().iter().map(|p| p - root).collect();
    assert_eq!(shape, vec![0, 3, 7]);
}

#[test]
fn test_voice_parsed_flat_roots() {
    // Bb3, D4, F4
    assert_eq!(voice(&parsed("Bb"), -12).unwrap().pitches(), &[58, 62, 65]);
    // Bb3, Db4, F4
    assert_eq!(voice(&parsed("Bbm"), -12).unwrap().pitches(), &[58, 61, 65]);
    // F#3, A#3, C#4
    assert_eq!(voice(&parsed("F#"), -12).unwrap().pitches(), &[54, 58, 61]);
}

#[test]
fn test_end_to_end_progression() {
    let voiced = run(&[
        (0.0, 1.0, "C"),
        (1.0, 2.0, "Am"),
        (2.0, 3.0, "F"),
        (3.0, 4.0, "N"),
    ]);

    assert_eq!(voiced.len(), 3);
    for v in &voiced {
        assert_eq!(v.duration, 1.0);
    }

    assert_eq!(voiced[0].label, "C");
    assert_eq!(voiced[0].pitches.pitches(), &[60, 64, 67]);
    assert_eq!(voiced[0].octave_shift, 12);

    // Am candidates: mean 60.33 (0), 48.33 (-12), 72.33 (+12); C's mean is 63.67
    let c_mean = voiced[0].pitches.mean().unwrap();
    let am_base = voice(&parsed("Am"), -12).unwrap();
    let closest = [0i16, -12, 12]
        .iter()
        .filter_map(|&s| am_base.shifted(s))
        .min_by(|a, b| {
            let da = (a.mean().unwrap() - c_mean).abs();
            let db = (b.mean().unwrap() - c_mean).abs();
            da.partial_cmp(&db).unwrap()
        })
        .unwrap();
    assert_eq!(voiced[1].pitches, closest);
    assert_eq!(voiced[1].pitches.pitches(), &[57, 60, 64]);
    assert_eq!(voiced[1].octave_shift, 0);

    assert_eq!(voiced[2].pitches.pitches(), &[53, 57, 60]);
    assert_eq!(voiced[2].start, 2.0);
    assert_eq!(voiced[2].end, 3.0);
}

#[test]
fn test_repeated_chord_is_stable() {
    let voiced = run(&[(0.0, 1.0, "C"), (1.0, 2.0, "C"), (2.0, 3.0, "C")]);
    assert_eq!(voiced.len(), 3);
    assert_eq!(voiced[0].pitches, voiced[1].pitches);
    assert_eq!(voiced[1].pitches, voiced[2].pitches);
}

#[test]
fn test_repeated_chord_unshifted_from_home_register() {
    // Voiced at C4, C's mean (63.67) is already nearest the anchor
    let config = VoicingConfig {
        base_octave_offset: 0,
        ..VoicingConfig::default()
    };
    let voiced = run_with(config, &[(0.0, 1.0, "C"), (1.0, 2.0, "C"), (2.0, 3.0, "C")]);
    assert!(voiced.iter().all(|v| v.octave_shift == 0));
    assert!(voiced.iter().all(|v| v.pitches.pitches() == [60, 64, 67]));
}

#[test]
fn test_tie_break_is_deterministic() {
    // Anchor exactly halfway between Cmaj7 (53.5) and Cmaj7 up an octave (65.5)
    let config = VoicingConfig {
        anchor: 59.5,
        ..VoicingConfig::default()
    };
    let first = run_with(config.clone(), &[(0.0, 1.0, "Cmaj7")]);
    let second = run_with(config, &[(0.0, 1.0, "Cmaj7")]);
    assert_eq!(first, second);
    assert_eq!(first[0].octave_shift, 0);
    assert_eq!(first[0].pitches.pitches(), &[48, 52, 55, 59]);
}

#[test]
fn test_minimum_duration_floor() {
    let voiced = run(&[
        (0.0, 0.0, "C"),
        (1.0, 0.5, "G"),
        (2.0, 2.05, "F"),
        (3.0, 5.0, "Am"),
    ]);
    assert_eq!(voiced[0].duration, 0.1);
    assert_eq!(voiced[1].duration, 0.1);
    assert_eq!(voiced[2].duration, 0.1);
    assert_eq!(voiced[3].duration, 2.0);
}

#[test]
fn test_unrecognized_and_silence_do_not_move_average() {
    let with_gaps = run(&[
        (0.0, 1.0, "C"),
        (1.0, 2.0, "N"),
        (2.0, 3.0, "???"),
        (3.0, 4.0, ""),
        (4.0, 5.0, "G"),
    ]);
    let without = run(&[(0.0, 1.0, "C"), (4.0, 5.0, "G")]);
    assert_eq!(with_gaps.len(), 2);
    assert_eq!(with_gaps[1].pitches, without[1].pitches);
}

#[test]
fn test_every_timeline_starts_from_anchor() {
    let engine = VoiceLeadingEngine::default();
    let timeline = vec![
        ChordInterval::new(0.0, 1.0, "E"),
        ChordInterval::new(1.0, 2.0, "B7"),
    ];
    let first = engine.process(&timeline).unwrap();
    let second = engine.process(&timeline).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_parallel_timelines() {
    let engine = VoiceLeadingEngine::default();
    let timeline = vec![
        ChordInterval::new(0.0, 1.0, "Dm7"),
        ChordInterval::new(1.0, 2.0, "G7"),
        ChordInterval::new(2.0, 3.0, "Cmaj7"),
    ];
    let expected = engine.process(&timeline).unwrap();

    let (engine, timeline) = (&engine, &timeline);
    let results: Vec<Vec<VoicedInterval>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || engine.process(timeline).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for result in results {
        assert_eq!(result, expected);
    }
}

#[test]
fn test_ii_v_i_stays_close() {
    let voiced = run(&[(0.0, 1.0, "Dm7"), (1.0, 2.0, "G7"), (2.0, 3.0, "Cmaj7")]);
    let means: Vec<f64> = voiced.iter().map(|v| v.pitches.mean().unwrap()).collect();
    for pair in means.windows(2) {
        assert!((pair[1] - pair[0]).abs() <= 6.0, "jumped from {} to {}", pair[0], pair[1]);
    }
}

#[test]
fn test_empty_timeline() {
    assert!(run(&[]).is_empty());
    assert!(run(&[(0.0, 1.0, "N"), (1.0, 2.0, "N")]).is_empty());
}
