//! Edge case tests for classifiers, cooldowns and configuration scaling


use movement_classifier::{
    app::{ReplayApp, ReplayMode},
    calibration::CalibrationOutcome,
    classifiers::{
        directional::DirectionalClassifier, movement::MovementClassifier, nose_jump::NoseJumpClassifier,
        PoseClassifier,
    },
    config::{AppPreset, Config, DisplacementConfig, MovementConfig},
    constants::MAX_WINDOW_FRAMES,
    events::{Direction, Movement},
    landmarks::{Landmark, LandmarkSnapshot, Pose, PoseLandmark},
};
use std::time::Duration;
use test_helpers::*;

fn at_ms(ms: u64, pose: Pose) -> LandmarkSnapshot {
    LandmarkSnapshot::detected(Duration::from_millis(ms), pose)
}

fn nose(x: f64, y: f64) -> Pose {
    Pose::default().with(PoseLandmark::Nose, Landmark::new(x, y, 1.0))
}

#[test]
fn test_cooldown_boundary_is_inclusive() {
    let mut classifier = MovementClassifier::new(MovementConfig::default()).unwrap();
    calibrate(&mut classifier);

    assert!(classifier.consume(at_ms(1000, jumping_pose())).is_none());
    assert!(classifier.consume(at_ms(1033, jumping_pose())).is_none());
    let first = classifier.consume(at_ms(1066, jumping_pose())).unwrap();
    assert_eq!(first.timestamp, Duration::from_millis(1066));

    for ms in (1100..2066).step_by(100) {
        assert!(classifier.consume(at_ms(ms, jumping_pose())).is_none());
    }
    assert!(classifier.consume(at_ms(2065, jumping_pose())).is_none());

    // Exactly one cooldown period later
    let second = classifier.consume(at_ms(2066, jumping_pose())).unwrap();
    assert_eq!(second.movement, Movement::Jump);
}

#[test]
fn test_timestamp_going_backwards_stays_suppressed() {
    let mut classifier = MovementClassifier::new(MovementConfig::default()).unwrap();
    calibrate(&mut classifier);

    let events: Vec<_> = (0..3)
        .filter_map(|i| classifier.consume(at_ms(5000 + i * 33, jumping_pose())))
        .collect();
    assert_eq!(events.len(), 1);

    assert!(classifier.consume(at_ms(100, jumping_pose())).is_none());
    assert_eq!(classifier.last_event_timestamp(), Some(Duration::from_millis(5066)));
}

#[test]
fn test_zero_cooldown_fires_every_frame() {
    let config = MovementConfig {
        cooldown_period: 0.0,
        ..MovementConfig::default()
    };
    let mut classifier = MovementClassifier::new(config).unwrap();
    let start = calibrate(&mut classifier);

    let events: Vec<_> = (start..start + 6)
        .filter_map(|f| classifier.consume(snapshot(f, jumping_pose())))
        .collect();
    // First two frames lack a supermajority
    assert_eq!(events.len(), 4);
    assert!(events.iter().all(|e| e.movement == Movement::Jump));
}

#[test]
fn test_single_frame_window() {
    let config = MovementConfig {
        required_stable_frames_per_fps: 1,
        num_frames_to_check_per_fps: 1,
        ..MovementConfig::default()
    };
    let mut classifier = MovementClassifier::new(config).unwrap();
    let start = calibrate(&mut classifier);
    assert_eq!(classifier.history_len(), 1);

    let event = classifier.consume(snapshot(start, jumping_pose())).unwrap();
    assert_eq!(event.movement, Movement::Jump);
}

#[test]
fn test_nan_landmarks_degrade_calibration() {
    let broken = standing_pose().with(PoseLandmark::Nose, Landmark::new(f64::NAN, f64::NAN, 0.9));
    let mut classifier = MovementClassifier::new(MovementConfig::default()).unwrap();

    for frame in 0..30 {
        assert!(classifier.consume(snapshot(frame, broken.clone())).is_none());
    }
    assert_eq!(classifier.calibration_outcome(), Some(CalibrationOutcome::Degraded));

    for frame in 30..40 {
        assert!(classifier.consume(snapshot(frame, broken.clone())).is_none());
    }
}

#[test]
fn test_wrong_landmark_count() {
    assert!(Pose::from_landmarks(vec![Landmark::default(); 32]).is_err());
    assert!(Pose::from_landmarks(vec![Landmark::default(); 34]).is_err());
    assert!(Pose::from_landmarks(Vec::new()).is_err());
    assert!(Pose::from_landmarks(vec![Landmark::default(); 33]).is_ok());
}

#[test]
fn test_fps_scaling_bounds() {
    let config = MovementConfig::default();

    let half = config.scaled_for_fps(15.0);
    assert_eq!(half.required_stable_frames_per_fps, 2);
    assert_eq!(half.num_frames_to_check_per_fps, 3);

    let double = config.scaled_for_fps(60.0);
    assert_eq!(double.required_stable_frames_per_fps, 8);
    assert_eq!(double.num_frames_to_check_per_fps, 10);

    let slow = config.scaled_for_fps(1.0);
    assert_eq!(slow.required_stable_frames_per_fps, 2);
    assert_eq!(slow.num_frames_to_check_per_fps, 2);

    for bogus in [0.0, -30.0, f64::NAN, f64::INFINITY] {
        assert!(config.scaled_for_fps(bogus).validate().is_ok());
    }
    assert_eq!(config.scaled_for_fps(f64::NAN), config);
}

#[test]
fn test_extreme_frame_rate_builds_a_classifier() {
    let scaled = MovementConfig::default().scaled_for_fps(1e30);
    assert!(scaled.num_frames_to_check_per_fps <= MAX_WINDOW_FRAMES);

    let mut classifier = MovementClassifier::new(scaled).unwrap();
    calibrate(&mut classifier);
    assert!(classifier.is_calibrated());

    let app = ReplayApp::new(Config::default(), ReplayMode::Movement(AppPreset::Wheel), Some(1e30)).unwrap();
    assert!(app.run(Vec::new()).unwrap().events.is_empty());
}

#[test]
fn test_nose_jump_first_frame_and_gaps() {
    let mut classifier = NoseJumpClassifier::new(&DisplacementConfig::nose_jump()).unwrap();

    // Nothing to compare against on the first frame, however high the nose is
    assert!(classifier.consume(at_ms(0, nose(0.5, 0.1))).is_none());
    assert!(classifier.consume(LandmarkSnapshot::empty(Duration::from_millis(33))).is_none());

    // Empty frames keep the last seen nose position
    let event = classifier.consume(at_ms(66, nose(0.5, 0.02))).unwrap();
    assert_eq!(event.movement, Movement::Jump);

    classifier.reset();
    assert!(classifier.consume(at_ms(100, nose(0.5, 0.0))).is_none());
}

#[test]
fn test_directional_cooldown_tracks_position() {
    let mut classifier = DirectionalClassifier::new(&DisplacementConfig::directional()).unwrap();

    assert!(classifier.consume(at_ms(0, nose(0.5, 0.5))).is_none());
    let event = classifier.consume(at_ms(33, nose(0.6, 0.5))).unwrap();
    assert_eq!(event.direction, Direction::Right);

    // Movement during the cooldown is absorbed rather than deferred
    assert!(classifier.consume(at_ms(100, nose(0.6, 0.3))).is_none());
    assert!(classifier.consume(at_ms(600, nose(0.6, 0.3))).is_none());

    let event = classifier.consume(at_ms(633, nose(0.6, 0.4))).unwrap();
    assert_eq!(event.direction, Direction::Down);
}

#[test]
fn test_directional_tie_resolves_horizontally() {
    assert_eq!(DirectionalClassifier::sector(-0.5, 0.5, 0.03), Some(Direction::Left));
    assert_eq!(DirectionalClassifier::sector(0.5, -0.5, 0.03), Some(Direction::Right));
    assert_eq!(DirectionalClassifier::sector(0.0, 0.0, 0.0), None);
}
