//! Integration tests for the idle loops
//!
//! Tests the path: blink loop / autonomous loop → expression or idle mode

use gomoji::config::FaceConfig;
use gomoji::core::{FaceEngine, Permission, RecordingPlayer, ScriptedRandom};
use gomoji::types::{Expression, IdleMode, PupilPosition, ReasonCode, SoundKey};
use pretty_assertions::assert_eq;

/// First draw is the blink delay; 0.999999 keeps it at +4999, after the 4000ms tick
fn engine_with(draws: &[f64]) -> (FaceEngine, RecordingPlayer) {
    let recorder = RecordingPlayer::new();
    let rng = ScriptedRandom::new(draws.to_vec()).with_fallback(0.999_999);
    let mut engine = FaceEngine::new(FaceConfig::default(), Box::new(rng), Box::new(recorder.clone()));
    engine.start(Permission::Granted);
    engine.drain_frames();
    (engine, recorder)
}

#[test]
fn test_blink_cycle() {
    let (mut engine, recorder) = engine_with(&[0.5]);

    engine.advance_to(3499);
    assert_eq!(engine.expression(), Expression::Neutral);

    engine.advance_to(3500);
    assert_eq!(engine.expression(), Expression::Blink);
    assert_eq!(recorder.played(), vec![SoundKey::Blink]);
    assert!(!engine.autonomous_running());

    engine.advance_to(3650);
    assert_eq!(engine.expression(), Expression::Neutral);
    assert!(engine.blink_running());
    assert!(engine.autonomous_running());

    let reasons: Vec<ReasonCode> = engine.drain_frames().iter().map(|f| f.reason).collect();
    assert_eq!(reasons, vec![ReasonCode::E101_BLINK, ReasonCode::E103_EXPRESSION_REVERTED]);
}

/// Blink delays stay inside [2000, 5000)
#[test]
fn test_blink_delay_bounds() {
    let (mut engine, _) = engine_with(&[0.0]);
    engine.advance_to(1999);
    assert_eq!(engine.expression(), Expression::Neutral);
    engine.advance_to(2000);
    assert_eq!(engine.expression(), Expression::Blink);
}

/// No blink ever shows over another expression
#[test]
fn test_no_blink_while_not_neutral() {
    let (mut engine, recorder) = engine_with(&[0.0]);
    engine.set_temporary(Expression::Happy, 10_000);
    assert!(!engine.blink_running());

    for t in (0..10_000).step_by(50) {
        engine.advance_to(t);
        assert_eq!(engine.expression(), Expression::Happy);
    }
    assert_eq!(recorder.count(SoundKey::Blink), 0);

    engine.advance_to(10_000);
    assert_eq!(engine.expression(), Expression::Neutral);
    assert!(engine.blink_running());
}

/// Autonomous glance: LOOK_LEFT for one second, pupils pushed left
#[test]
fn test_autonomous_look() {
    let (mut engine, _) = engine_with(&[0.999_999, 0.0, 0.0]);

    engine.advance_to(4000);
    assert_eq!(engine.expression(), Expression::LookLeft);
    assert_eq!(engine.pupil(), PupilPosition::new(-25.0, 0.0));
    assert_eq!(engine.idle_mode(), IdleMode::None);

    engine.advance_to(4999);
    assert_eq!(engine.expression(), Expression::LookLeft);
    engine.advance_to(5000);
    assert_eq!(engine.expression(), Expression::Neutral);
    assert_eq!(engine.pupil(), PupilPosition::origin());

    let frames = engine.drain_frames();
    assert_eq!(frames[0].reason, ReasonCode::E102_LOOK_AROUND);
}

#[test]
fn test_autonomous_look_direction() {
    // LOOK, then index 1 of [L, R, U, D]
    let (mut engine, _) = engine_with(&[0.999_999, 0.1, 0.3]);
    engine.advance_to(4000);
    assert_eq!(engine.expression(), Expression::LookRight);
    assert_eq!(engine.pupil(), PupilPosition::new(25.0, 0.0));
}

/// Thinking for 4s, no variant, loops paused
#[test]
fn test_thinking_mode() {
    let (mut engine, recorder) = engine_with(&[0.999_999, 0.65]);

    engine.advance_to(4000);
    assert_eq!(engine.idle_mode(), IdleMode::Thinking);
    assert_eq!(engine.idle_variant(), None);
    assert!(!engine.blink_running());
    assert!(!engine.autonomous_running());

    engine.advance_to(7999);
    assert_eq!(engine.idle_mode(), IdleMode::Thinking);
    assert_eq!(recorder.count(SoundKey::Blink), 0);

    engine.advance_to(8000);
    assert_eq!(engine.idle_mode(), IdleMode::None);
    assert!(engine.blink_running());
    assert!(engine.autonomous_running());

    let reasons: Vec<ReasonCode> = engine.drain_frames().iter().map(|f| f.reason).collect();
    assert_eq!(reasons, vec![ReasonCode::E201_IDLE_ENTERED, ReasonCode::E202_IDLE_EXPIRED]);
}

/// Coding for 12s on snippet 0, elapsed time reported in frames
#[test]
fn test_coding_mode() {
    let (mut engine, _) = engine_with(&[0.999_999, 0.8, 0.0]);

    engine.advance_to(4000);
    assert_eq!(engine.idle_mode(), IdleMode::Coding);
    assert_eq!(engine.idle_variant(), Some(0));

    engine.advance_to(6000);
    assert_eq!(engine.frame().idle_elapsed_ms, Some(2000));

    engine.advance_to(15_999);
    assert_eq!(engine.idle_mode(), IdleMode::Coding);
    engine.advance_to(16_000);
    assert_eq!(engine.idle_mode(), IdleMode::None);
    assert_eq!(engine.frame().idle_elapsed_ms, None);
}

/// Bored for 6s on picture 2
#[test]
fn test_bored_mode() {
    let (mut engine, _) = engine_with(&[0.999_999, 0.93, 0.9]);

    engine.advance_to(4000);
    assert_eq!(engine.idle_mode(), IdleMode::Bored);
    assert_eq!(engine.idle_variant(), Some(2));

    engine.advance_to(9999);
    assert_eq!(engine.idle_mode(), IdleMode::Bored);
    engine.advance_to(10_000);
    assert_eq!(engine.idle_mode(), IdleMode::None);
}

/// The autonomous period starts over when the loops come back
#[test]
fn test_autonomous_restarts_after_idle() {
    // Thinking at 4000; everything after falls back to BORED
    let (mut engine, _) = engine_with(&[0.999_999, 0.65]);

    engine.advance_to(8000);
    assert_eq!(engine.idle_mode(), IdleMode::None);

    engine.advance_to(11_999);
    assert_eq!(engine.idle_mode(), IdleMode::None);
    engine.advance_to(12_000);
    assert_eq!(engine.idle_mode(), IdleMode::Bored);
}

/// Running loops hold exactly one timer each
#[test]
fn test_single_timer_per_loop() {
    let (mut engine, _) = engine_with(&[0.5]);
    assert_eq!(engine.pending_timers(), 2);

    engine.advance_to(3650);
    assert_eq!(engine.pending_timers(), 2);

    engine.set_temporary(Expression::Neutral, 0);
    engine.set_temporary(Expression::Neutral, 0);
    assert!(engine.pending_reversions() <= 1);
}
