//! Integration tests for motion
//!
//! Tests the path: acceleration/orientation sample → classifier → face

use gomoji::config::FaceConfig;
use gomoji::core::{FaceEngine, Permission, RecordingPlayer, ScriptedRandom};
use gomoji::types::{Acceleration, Expression, IdleMode, PupilPosition, ReasonCode, Rotation};
use pretty_assertions::assert_eq;

fn engine_with(draws: &[f64], permission: Permission) -> FaceEngine {
    let rng = ScriptedRandom::new(draws.to_vec()).with_fallback(0.999_999);
    let mut engine = FaceEngine::new(FaceConfig::default(), Box::new(rng), Box::new(RecordingPlayer::new()));
    engine.start(permission);
    engine.drain_frames();
    engine
}

fn granted() -> FaceEngine {
    engine_with(&[], Permission::Granted)
}

/// Shake: dizzy 1.5s, angry 2s, neutral; polled every 100ms
#[test]
fn test_shake_chain() {
    let mut engine = granted();

    let reading = engine.push_acceleration(Acceleration::new(30.0, 0.0, 0.0));
    assert!(reading.is_shaking);
    assert!(!reading.is_moving);

    for t in (0..=3600).step_by(100) {
        engine.advance_to(t);
        let expected = if t < 1500 {
            Expression::Dizzy
        } else if t < 3500 {
            Expression::Angry
        } else {
            Expression::Neutral
        };
        assert_eq!(engine.expression(), expected, "at {}ms", t);
        assert!(engine.pending_reversions() <= 1);
    }

    let reasons: Vec<ReasonCode> = engine.drain_frames().iter().map(|f| f.reason).collect();
    assert_eq!(
        reasons,
        vec![
            ReasonCode::E401_SHAKE_DIZZY,
            ReasonCode::E402_DIZZY_TO_ANGRY,
            ReasonCode::E103_EXPRESSION_REVERTED,
        ]
    );
}

/// Shaking again while dizzy restarts the dizzy period
#[test]
fn test_repeated_shake_restarts_dizzy() {
    let mut engine = granted();
    engine.push_acceleration(Acceleration::new(30.0, 0.0, 0.0));
    engine.advance_to(1000);
    engine.push_acceleration(Acceleration::new(0.0, 0.0, 0.0));
    assert_eq!(engine.pending_reversions(), 1);

    engine.advance_to(2499);
    assert_eq!(engine.expression(), Expression::Dizzy);
    engine.advance_to(2500);
    assert_eq!(engine.expression(), Expression::Angry);
}

/// Moderate change squints for 300ms
#[test]
fn test_move_squints() {
    let mut engine = granted();

    let reading = engine.push_acceleration(Acceleration::new(6.0, 0.0, 0.0));
    assert!(reading.is_moving);
    assert_eq!(engine.expression(), Expression::Squint);

    engine.advance_to(299);
    assert_eq!(engine.expression(), Expression::Squint);
    engine.advance_to(300);
    assert_eq!(engine.expression(), Expression::Neutral);

    let frames = engine.drain_frames();
    assert_eq!(frames[0].reason, ReasonCode::E403_MOVE_SQUINT);
}

/// Small jitter does nothing
#[test]
fn test_small_change_ignored() {
    let mut engine = granted();
    let reading = engine.push_acceleration(Acceleration::new(3.0, -2.0, 4.0));
    assert!(!reading.is_shaking && !reading.is_moving);
    assert_eq!(engine.expression(), Expression::Neutral);
    assert!(engine.drain_frames().is_empty());
}

/// Deltas are taken against the previous sample, not the first one
#[test]
fn test_gradual_drift_never_moves() {
    let mut engine = granted();
    for step in 1..=10 {
        let reading = engine.push_acceleration(Acceleration::new(step as f64 * 4.0, 0.0, 0.0));
        assert!(!reading.is_moving);
    }
    assert_eq!(engine.expression(), Expression::Neutral);
}

/// Missing axes count as zero
#[test]
fn test_missing_axes_read_as_zero() {
    let mut engine = granted();
    engine.push_acceleration(Acceleration::new(30.0, 0.0, 0.0));
    engine.advance(5000);
    let reading = engine.push_acceleration(Acceleration { x: None, y: None, z: None });
    assert!(reading.is_shaking);
}

/// Movement only squints a neutral face
#[test]
fn test_move_keeps_other_expression() {
    let mut engine = granted();
    engine.set_temporary(Expression::LookLeft, 1000);

    engine.push_acceleration(Acceleration::new(6.0, 0.0, 0.0));
    assert_eq!(engine.expression(), Expression::LookLeft);

    engine.advance_to(1000);
    assert_eq!(engine.expression(), Expression::Neutral);
}

/// Pupils follow the tilt, clamped to the travel box
#[test]
fn test_tilt_moves_pupils() {
    let mut engine = granted();

    engine.push_rotation(Rotation::tilt(10.0, 20.0));
    assert_eq!(engine.pupil(), PupilPosition::new(10.0, -15.0));

    engine.push_rotation(Rotation::tilt(-60.0, 100.0));
    assert_eq!(engine.pupil(), PupilPosition::new(30.0, -25.0));

    engine.push_rotation(Rotation::new(None, None, None));
    assert_eq!(engine.pupil(), PupilPosition::new(0.0, -20.0));
}

/// NaN readings count as zero, like missing ones
#[test]
fn test_nan_samples_read_as_zero() {
    let mut engine = granted();

    engine.push_rotation(Rotation::tilt(f64::NAN, f64::NAN));
    engine.push_rotation(Rotation::tilt(f64::NAN, f64::NAN));
    assert_eq!(engine.pupil(), PupilPosition::new(0.0, -20.0));
    assert_eq!(engine.drain_frames().len(), 1);

    engine.push_acceleration(Acceleration { x: Some(f64::NAN), y: Some(0.0), z: Some(0.0) });
    assert_eq!(engine.last_acceleration(), [0.0, 0.0, 0.0]);
    let reading = engine.push_acceleration(Acceleration::new(30.0, 0.0, 0.0));
    assert!(reading.is_shaking);
    assert_eq!(engine.expression(), Expression::Dizzy);
}

/// LOOK_* offsets win over tilt while they show
#[test]
fn test_look_overrides_tilt() {
    let mut engine = granted();
    engine.push_rotation(Rotation::tilt(10.0, 20.0));

    engine.set_temporary(Expression::LookLeft, 1000);
    assert_eq!(engine.pupil(), PupilPosition::new(-25.0, 0.0));
    assert_eq!(engine.tilt_pupil(), PupilPosition::new(10.0, -15.0));

    engine.advance(1000);
    assert_eq!(engine.pupil(), PupilPosition::new(10.0, -15.0));
}

/// Gestures are classified but not applied during tap playback
#[test]
fn test_motion_suppressed_during_interaction() {
    let mut engine = granted();
    engine.tap();
    engine.advance(400);
    assert_eq!(engine.expression(), Expression::Squint);

    let reading = engine.push_acceleration(Acceleration::new(40.0, 0.0, 0.0));
    assert!(reading.is_shaking);
    assert!(engine.sensor_sample().is_shaking);
    assert_eq!(engine.expression(), Expression::Squint);

    engine.push_rotation(Rotation::tilt(10.0, 20.0));
    assert_eq!(engine.pupil(), PupilPosition::origin());
}

/// A shake while taps are still being counted never turns angry mid-sequence
#[test]
fn test_shake_during_counting_yields_to_sequence() {
    let mut engine = granted();
    engine.tap();
    engine.advance(100);
    engine.push_acceleration(Acceleration::new(30.0, 0.0, 0.0));
    assert_eq!(engine.expression(), Expression::Dizzy);

    engine.advance_to(400);
    assert_eq!(engine.expression(), Expression::Squint);
    assert_eq!(engine.pending_reversions(), 0);

    engine.advance_to(1600);
    assert_eq!(engine.expression(), Expression::Happy);
    engine.advance_to(3500);
    assert_eq!(engine.expression(), Expression::Neutral);
}

/// Shaking pulls the face out of an idle mode
#[test]
fn test_shake_interrupts_idle() {
    // Blink at +4999, autonomous tick at 4000 picks THINKING
    let mut engine = engine_with(&[0.999_999, 0.65], Permission::Granted);
    engine.advance_to(4000);
    assert_eq!(engine.idle_mode(), IdleMode::Thinking);

    engine.advance_to(4100);
    engine.push_acceleration(Acceleration::new(30.0, 0.0, 0.0));
    assert_eq!(engine.idle_mode(), IdleMode::None);
    assert_eq!(engine.expression(), Expression::Dizzy);
}

/// Refused permission: samples change nothing, pupils stay centred
#[test]
fn test_denied_permission() {
    // Blink at +3500
    let mut engine = engine_with(&[0.5], Permission::Denied);
    assert!(!engine.is_sensing());
    assert!(!engine.enable_sensing());

    engine.push_acceleration(Acceleration::new(30.0, 0.0, 0.0));
    engine.push_rotation(Rotation::tilt(10.0, 20.0));
    assert_eq!(engine.expression(), Expression::Neutral);
    assert_eq!(engine.pupil(), PupilPosition::origin());
    assert!(!engine.sensor_sample().is_shaking);

    // Blinking still works without sensors
    engine.advance_to(3500);
    assert_eq!(engine.expression(), Expression::Blink);
}

/// Sensing can be switched off and back on
#[test]
fn test_toggle_sensing() {
    let mut engine = granted();
    engine.push_acceleration(Acceleration::new(6.0, 0.0, 0.0));
    assert!(engine.sensor_sample().is_moving);

    engine.disable_sensing();
    assert!(!engine.sensor_sample().is_moving);
    engine.advance(300);
    engine.push_acceleration(Acceleration::new(40.0, 0.0, 0.0));
    assert_eq!(engine.expression(), Expression::Neutral);

    // Baseline is still the last sample seen while sensing
    assert!(engine.enable_sensing());
    engine.push_acceleration(Acceleration::new(8.0, 0.0, 0.0));
    assert_eq!(engine.expression(), Expression::Neutral);
    engine.push_acceleration(Acceleration::new(40.0, 0.0, 0.0));
    assert_eq!(engine.expression(), Expression::Dizzy);
}
