use crate::*;
use super::profiles::*;

#[test]
fn reset_restores_fresh_state() {
    let config = DetectorConfig::default();
    let fresh = RepDetector::new(config).unwrap();

    for cut in [3, 17, 40, 111, 250] {
        let mut detector = RepDetector::new(config).unwrap();
        let profile = Profile::new(50.0).rep().rest(1.0).squat().rest(1.0);
        for sample in profile.samples().iter().take(cut) {
            detector.process_sample(sample);
        }
        for sample in noisy_samples(cut, cut as u64) {
            detector.process_sample(&sample);
        }

        detector.reset();
        assert_eq!(detector.state(), fresh.state(), "after {} samples", cut);
        assert_eq!(detector.state_machine(), fresh.state_machine());
        assert_eq!(detector.last_rep_time(), None);
    }
}

#[test]
fn reset_then_replay_matches_fresh_detector() {
    let config = DetectorConfig::default();
    let profile = Profile::new(50.0).rep().rest(1.0).rep().rest(0.5);

    let mut used = RepDetector::new(config).unwrap();
    used.process_batch(&noisy_samples(300, 7));
    used.reset();

    let mut fresh = RepDetector::new(config).unwrap();
    for sample in profile.samples() {
        assert_eq!(used.process_sample(sample), fresh.process_sample(sample));
    }
}

#[test]
fn accepted_reps_respect_refractory_period() {
    let config = DetectorConfig::default();
    let mut profile = Profile::new(50.0);
    for gap in [0.1, 0.3, 0.5, 0.7, 0.9, 1.2, 0.2, 0.4] {
        profile = profile.rep().rest(gap);
    }

    let reps = run(config, &profile.rest(0.5)).reps();
    assert!(reps.len() >= 2);
    for pair in reps.windows(2) {
        assert!(
            pair[1].end_time - pair[0].end_time >= config.min_time_between_reps,
            "reps at {} and {}", pair[0].end_time, pair[1].end_time
        );
    }

    let noisy = RepDetector::new(config).map(|mut detector| {
        let mut ends = Vec::new();
        for sample in noisy_samples(2000, 42) {
            if let Some(rep) = detector.process_sample(&sample).rep {
                ends.push(rep.end_time);
            }
        }
        ends
    }).unwrap();
    for pair in noisy.windows(2) {
        assert!(pair[1] - pair[0] >= config.min_time_between_reps);
    }
}

#[test]
fn idle_always_has_zero_motion() {
    let mut detector = RepDetector::new(DetectorConfig::default()).unwrap();
    let mut samples = noisy_samples(1500, 3);
    samples.extend(
        Profile::new(50.0).rep().rest(1.0).squat().rest(1.0).samples().iter()
            .map(|s| AccelerationSample::new(s.value_g, s.timestamp + 30.0, true))
    );

    let mut idle_ticks = 0;
    for sample in &samples {
        let report = detector.process_sample(sample);
        if report.phase == MotionPhase::Idle {
            idle_ticks += 1;
            assert_eq!(detector.velocity(), 0.0);
            assert_eq!(detector.displacement(), 0.0);
        }
    }
    assert!(idle_ticks > 0);
}

#[test]
fn peak_never_decreases_within_excursion() {
    let profile = Profile::new(50.0)
        .hold(5.0, 3).hold(-2.0, 2).hold(5.0, 3).hold(-5.0, 9).hold(5.0, 4)
        .rest(1.0)
        .squat()
        .rest(1.0);

    let mut detector = RepDetector::new(DetectorConfig::default()).unwrap();
    let mut last_peak = 0.0;
    for sample in profile.samples() {
        let report = detector.process_sample(sample);
        let peak = detector.state().peak_velocity;

        if report.rep.is_some() || !report.phase.is_moving() {
            last_peak = peak;
            continue;
        }
        assert!(peak >= last_peak, "peak dropped from {} to {}", last_peak, peak);
        last_peak = peak;
    }
    assert_eq!(detector.rep_count(), 2);
}

#[test]
fn completed_only_follows_ascending() {
    let mut samples = noisy_samples(3000, 11);
    samples.extend(noisy_samples(3000, 99).into_iter().map(|s| AccelerationSample {
        timestamp: s.timestamp + 60.0,
        ..s
    }));

    let mut detector = RepDetector::with_observer(DetectorConfig::default(), Recorder::default()).unwrap();
    detector.process_batch(&samples);

    let phases = detector.observer().phases();
    let mut previous = MotionPhase::Idle;
    for phase in phases {
        if phase == MotionPhase::Completed {
            assert_eq!(previous, MotionPhase::Ascending);
        }
        previous = phase;
    }
}

#[test]
fn hooks_fire_at_most_once_per_sample() {
    let mut recorder = Recorder::default();
    let mut detector = RepDetector::with_observer(DetectorConfig::default(), &mut recorder).unwrap();

    let mut seen = 0;
    let profile = Profile::new(50.0).rep().rest(1.0).squat().rest(1.0);
    for sample in profile.samples() {
        detector.process_sample(sample);
        let events = &detector.observer().events[seen..];
        assert!(events.len() <= 3);
        assert!(events.iter().filter(|e| matches!(e, Event::Phase(_))).count() <= 1);
        seen = detector.observer().events.len();
    }
    drop(detector);
    assert_eq!(recorder.reps().len(), 2);
}

#[test]
fn non_finite_samples_are_rejected() {
    let mut detector = RepDetector::new(DetectorConfig::default()).unwrap();
    detector.process_batch(Profile::new(50.0).hold(5.0, 3).samples());
    let before = detector.state();

    let report = detector.process(f64::NAN, 0.06, true);
    assert_eq!(report.verdict, SampleVerdict::Rejected);
    assert_eq!(detector.state(), before);

    let report = detector.process(0.2, f64::INFINITY, true);
    assert_eq!(report.verdict, SampleVerdict::Rejected);
    assert_eq!(detector.state(), before);
    assert!(detector.velocity().is_finite());
}

#[test]
fn oversized_samples_are_clamped() {
    let mut detector = RepDetector::new(DetectorConfig::default()).unwrap();
    let report = detector.process_sample(&AccelerationSample::from_ms2(1000.0, 0.0));
    assert_eq!(report.verdict, SampleVerdict::Clamped);
    assert!(approx_eq(detector.velocity(), 160.0 * 0.02, 1e-9));
}

#[test]
fn sample_rate_changes_integration_step() {
    let mut detector = RepDetector::new(DetectorConfig::default()).unwrap();
    assert_eq!(detector.sample_rate_hz(), 50.0);

    assert_eq!(detector.set_sample_rate_hz(0.0), Err(ConfigError::NonPositiveSampleRate(0.0)));
    assert_eq!(detector.sample_rate_hz(), 50.0);

    detector.set_sample_rate_hz(100.0).unwrap();
    detector.process_sample(&AccelerationSample::from_ms2(5.0, 0.0));
    assert!(approx_eq(detector.velocity(), 0.05, 1e-9));
}

#[test]
fn reset_restores_configured_sample_rate() {
    let config = DetectorConfig::default();
    let fresh = RepDetector::new(config).unwrap();

    let mut detector = RepDetector::new(config).unwrap();
    detector.set_sample_rate_hz(100.0).unwrap();
    detector.process_batch(Profile::new(100.0).hold(5.0, 4).samples());
    detector.reset();

    assert_eq!(detector.sample_rate_hz(), 50.0);
    assert_eq!(detector.state_machine(), fresh.state_machine());

    detector.process_sample(&AccelerationSample::from_ms2(5.0, 0.0));
    assert!(approx_eq(detector.velocity(), 0.1, 1e-9));
}

#[test]
fn look_ahead_has_minimum() {
    let config = DetectorConfig { look_ahead_samples: 1, ..Default::default() };
    assert_eq!(RepDetector::new(config).unwrap().look_ahead_samples(), 5);

    let config = DetectorConfig { look_ahead_samples: 9, ..Default::default() };
    assert_eq!(RepDetector::new(config).unwrap().look_ahead_samples(), 9);
}

#[test]
fn invalid_config_fails_construction() {
    let config = DetectorConfig { sample_rate_hz: -1.0, ..Default::default() };
    assert!(RepDetector::new(config).is_err());

    let config = DetectorConfig {
        rom: Some(RomConfig::Target { target: 0.5, tolerance: -0.1, unit: DisplacementUnit::Meters }),
        ..Default::default()
    };
    assert_eq!(RepDetector::new(config).err(), Some(ConfigError::InvalidTolerance(-0.1)));
}

#[test]
fn peak_confirmation_window() {
    // Velocity rises to 0.3 m/s, dips for one tick and keeps rising.
    let profile = Profile::new(50.0).hold(5.0, 3).hold(-5.0, 1).hold(5.0, 2);

    let mut single = RepDetector::new(DetectorConfig::default()).unwrap();
    single.process_batch(profile.samples());
    assert!(single.state().peak_reached);

    let config = DetectorConfig { peak_confirmation_ticks: 3, ..Default::default() };
    let mut confirmed = RepDetector::new(config).unwrap();
    confirmed.process_batch(profile.samples());
    assert!(!confirmed.state().peak_reached);

    let reps = run(config, &Profile::new(50.0).rep().rest(0.5)).reps();
    assert_eq!(reps.len(), 1);
}

#[test]
fn peak_restarts_with_each_ascent() {
    // First ascent stays below the minimum peak, drops past the eccentric threshold and rises
    // again.
    let profile = Profile::new(50.0).hold(4.5, 2).hold(-4.5, 8).hold(4.5, 8);
    let mut detector = RepDetector::with_observer(DetectorConfig::default(), Recorder::default()).unwrap();

    let mut first_peak = None;
    let mut reentry = None;
    for sample in profile.samples() {
        let before = detector.phase();
        let report = detector.process_sample(sample);
        let state = detector.state();

        match (before, report.phase) {
            (_, MotionPhase::Descending) => {
                assert_eq!(state.peak_velocity, 0.0, "stale peak at {}", sample.timestamp);
                assert!(!state.peak_reached);
            }
            (MotionPhase::Descending, MotionPhase::Ascending) => {
                reentry = Some(sample.timestamp);
                assert_eq!(state.peak_velocity, state.velocity);
                assert_eq!(detector.state_machine().integrator().peak_time(), Some(sample.timestamp));
            }
            (_, MotionPhase::Ascending) if reentry.is_none() => {
                first_peak = Some(state.peak_velocity);
            }
            _ => {}
        }
    }

    assert!(approx_eq(first_peak.unwrap(), 0.18, 1e-9));
    assert!(reentry.is_some());
    assert!(detector.observer().reps().is_empty());
    assert_eq!(
        detector.observer().phases(),
        vec![MotionPhase::Ascending, MotionPhase::Descending, MotionPhase::Ascending]
    );
}
