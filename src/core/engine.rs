//! Face engine: the coordinator over expression, loops, taps and motion
//!
//! Priority, highest first:
//! - scripted interaction (taps)
//! - motion override (shake → dizzy → angry, move → squint)
//! - idle mode / autonomous action
//! - blink
//!
//! Every event and every timer firing runs to completion, then the engine
//! reconciles which loops should be running and emits a frame if the
//! picture changed. Blink and autonomous loops run only while the face is
//! started, no taps are being counted or played, no idle mode is active
//! and the expression is NEUTRAL.

use log::{debug, info, warn};
use crate::config::FaceConfig;
use crate::core::audio::{SilentPlayer, SoundPlayer};
use crate::core::expression::ExpressionState;
use crate::core::interaction::{InteractionSequencer, Resolution, TapOutcome};
use crate::core::loops::{AutonomousAction, AutonomousLoop, BlinkLoop, IdleState};
use crate::core::motion::{pupil_from_rotation, MotionClassifier};
use crate::core::random::{RandomSource, StdRandom};
use crate::core::scheduler::{Scheduler, TimerEvent, TimerHandle};
use crate::core::sensors::Permission;
use crate::types::{
    Acceleration, Expression, FaceFrame, IdleMode, MotionReading, PupilPosition, ReasonCode,
    Rotation, SensorSample, SoundKey,
};

pub struct FaceEngine {
    config: FaceConfig,
    scheduler: Scheduler,
    started: bool,
    expression: ExpressionState,
    idle: IdleState,
    /// Tilt-derived pupil, before LOOK_* overrides
    tilt: PupilPosition,
    interaction: InteractionSequencer,
    blink: BlinkLoop,
    autonomous: AutonomousLoop,
    motion: MotionClassifier,
    permission: Permission,
    sensing: bool,
    /// An orientation sample arrived while a tap sequence played
    tilt_deferred: bool,
    rng: Box<dyn RandomSource>,
    audio: Box<dyn SoundPlayer>,
    frames: Vec<FaceFrame>,
    last_frame: Option<FaceFrame>,
}

impl FaceEngine {
    pub fn new(config: FaceConfig, rng: Box<dyn RandomSource>, audio: Box<dyn SoundPlayer>) -> Self {
        let motion = MotionClassifier::new(&config.motion);
        Self {
            config,
            scheduler: Scheduler::new(),
            started: false,
            expression: ExpressionState::new(),
            idle: IdleState::default(),
            tilt: PupilPosition::origin(),
            interaction: InteractionSequencer::default(),
            blink: BlinkLoop::default(),
            autonomous: AutonomousLoop::default(),
            motion,
            permission: Permission::Unrequested,
            sensing: false,
            tilt_deferred: false,
            rng,
            audio,
            frames: Vec::new(),
            last_frame: None,
        }
    }

    /// Default config, entropy-seeded randomness, no sound
    pub fn with_defaults() -> Self {
        Self::new(
            FaceConfig::default(),
            Box::new(StdRandom::from_entropy()),
            Box::new(SilentPlayer),
        )
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Flip from "not started" to "started". Loops begin; sensing follows the permission.
    pub fn start(&mut self, permission: Permission) {
        if self.started {
            debug!("start ignored, already started");
            return;
        }
        self.started = true;
        self.permission = permission;
        self.sensing = permission.is_granted();
        info!("face started (motion {:?})", permission);
        self.settle(ReasonCode::E501_STARTED);
    }

    /// Tear everything down: every timer cleared, flags reset, back to "not started"
    pub fn stop(&mut self) {
        if !self.started {
            return;
        }
        self.scheduler.clear();
        self.expression.reset(&mut self.scheduler);
        self.idle.interrupt(&mut self.scheduler);
        self.interaction.cancel_all(&mut self.scheduler);
        self.blink.stop(&mut self.scheduler);
        self.autonomous.stop(&mut self.scheduler);
        self.motion.reset_flags();
        self.sensing = false;
        self.tilt_deferred = false;
        self.started = false;
        info!("face stopped");
        self.emit(ReasonCode::E502_STOPPED);
    }

    /// Resume motion sensing. Only possible once permission was granted.
    pub fn enable_sensing(&mut self) -> bool {
        if !self.started || !self.permission.is_granted() {
            warn!("motion sensing unavailable ({:?})", self.permission);
            return false;
        }
        self.sensing = true;
        self.settle(ReasonCode::E504_SENSING_ENABLED);
        true
    }

    /// Stop listening to samples, clear the derived flags and drop a
    /// pending DIZZY → ANGRY follow-up
    pub fn disable_sensing(&mut self) {
        self.sensing = false;
        self.motion.reset_flags();
        if self.expression.pending_event(&self.scheduler) == Some(TimerEvent::DizzyElapsed) {
            debug!("dizzy follow-up dropped with sensing");
            self.expression.reset(&mut self.scheduler);
        }
        self.settle(ReasonCode::E503_SENSING_DISABLED);
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    /// Pointer down anywhere on the face
    pub fn tap(&mut self) -> TapOutcome {
        if !self.started {
            return TapOutcome::Ignored;
        }
        let outcome = self.interaction.register_tap(&mut self.scheduler, &self.config);
        if outcome == TapOutcome::Ignored {
            return outcome;
        }

        // Hard interrupt: nothing else may fire into the tap run
        self.blink.stop(&mut self.scheduler);
        self.autonomous.stop(&mut self.scheduler);
        self.expression.cancel_pending(&mut self.scheduler);
        let left_idle = self.idle.interrupt(&mut self.scheduler);

        let reason = match outcome {
            TapOutcome::AngryBurst => {
                info!("angry burst");
                self.expression.set(Expression::Angry);
                ReasonCode::E302_ANGRY_BURST
            }
            _ if left_idle => ReasonCode::E203_IDLE_INTERRUPTED,
            _ => ReasonCode::E301_TAP_COUNTED,
        };
        self.settle(reason);
        outcome
    }

    /// One acceleration sample from the motion sensor
    pub fn push_acceleration(&mut self, accel: Acceleration) -> MotionReading {
        if !self.started || !self.sensing {
            return MotionReading::default();
        }
        let reading = self.motion.observe_acceleration(accel);
        if self.interaction.is_interacting() {
            return reading;
        }

        if reading.is_shaking {
            self.idle.interrupt(&mut self.scheduler);
            self.expression.hold(
                &mut self.scheduler,
                Expression::Dizzy,
                self.config.timings.dizzy_ms,
                TimerEvent::DizzyElapsed,
            );
            self.settle(ReasonCode::E401_SHAKE_DIZZY);
        } else if reading.is_moving && self.expression.current().is_neutral() {
            self.idle.interrupt(&mut self.scheduler);
            self.apply_temporary(Expression::Squint, self.config.timings.squint_ms);
            self.settle(ReasonCode::E403_MOVE_SQUINT);
        }
        reading
    }

    /// One orientation sample from the motion sensor
    pub fn push_rotation(&mut self, rotation: Rotation) {
        if !self.started || !self.sensing {
            return;
        }
        let pupil = self.motion.observe_rotation(rotation);
        if self.interaction.is_interacting() {
            self.tilt_deferred = true;
            return;
        }
        self.tilt = pupil;
        self.settle(ReasonCode::E404_TILT);
    }

    /// Show `expr` for `duration_ms`, then NEUTRAL. Refused while a tap
    /// sequence plays; returns whether it was applied.
    pub fn set_temporary(&mut self, expr: Expression, duration_ms: u64) -> bool {
        if !self.started || self.interaction.is_interacting() {
            debug!("set_temporary({}) refused", expr);
            return false;
        }
        self.apply_temporary(expr, duration_ms);
        let reason = if expr == Expression::Blink {
            ReasonCode::E101_BLINK
        } else {
            ReasonCode::E104_TEMPORARY_EXPRESSION
        };
        self.settle(reason);
        true
    }

    // =========================================================================
    // TIME
    // =========================================================================

    /// Run every timer due in the next `ms` milliseconds
    pub fn advance(&mut self, ms: u64) {
        let target = self.scheduler.now_ms().saturating_add(ms);
        self.advance_to(target);
    }

    /// Run every timer due up to `target_ms`
    pub fn advance_to(&mut self, target_ms: u64) {
        while let Some((handle, event)) = self.scheduler.pop_due(target_ms) {
            self.dispatch(handle, event);
        }
        self.scheduler.park(target_ms);
    }

    fn dispatch(&mut self, handle: TimerHandle, event: TimerEvent) {
        match event {
            TimerEvent::RevertExpression => {
                if self.expression.timer_fired(handle) {
                    self.expression.revert();
                    self.settle(ReasonCode::E103_EXPRESSION_REVERTED);
                }
            }
            TimerEvent::DizzyElapsed => {
                if self.expression.timer_fired(handle) {
                    self.apply_temporary(Expression::Angry, self.config.timings.angry_ms);
                    self.settle(ReasonCode::E402_DIZZY_TO_ANGRY);
                }
            }
            TimerEvent::Blink => {
                self.blink.fired(handle);
                if self.expression.current().is_neutral() {
                    self.apply_temporary(Expression::Blink, self.config.timings.blink_ms);
                }
                self.blink.start(&mut self.scheduler, self.rng.as_mut(), &self.config.blink);
                self.settle(ReasonCode::E101_BLINK);
            }
            TimerEvent::AutonomousTick => {
                self.autonomous.tick(handle, &mut self.scheduler, &self.config.autonomous);
                let reason = self.run_autonomous_action();
                self.settle(reason);
            }
            TimerEvent::IdleModeElapsed => {
                if self.idle.expire(handle) {
                    self.settle(ReasonCode::E202_IDLE_EXPIRED);
                }
            }
            TimerEvent::TapDebounce => {
                if let Some(resolution) = self.interaction.resolve(handle, &mut self.scheduler, &self.config) {
                    // A gesture during counting may have armed the reversion slot
                    self.expression.cancel_pending(&mut self.scheduler);
                    self.expression.set(resolution.opening());
                    let reason = match resolution {
                        Resolution::GrowingSmile => ReasonCode::E303_GROWING_SMILE,
                        Resolution::HappySequence => ReasonCode::E304_HAPPY_SEQUENCE,
                    };
                    self.settle(reason);
                }
            }
            TimerEvent::SequenceStep(expr) => {
                self.interaction.timer_fired(handle);
                self.expression.set(expr);
                self.settle(ReasonCode::E304_HAPPY_SEQUENCE);
            }
            TimerEvent::AngryPulse => {
                self.interaction.timer_fired(handle);
                self.audio.play(SoundKey::Angry);
            }
            TimerEvent::InteractionFinished => {
                self.interaction.timer_fired(handle);
                self.interaction.finish();
                self.expression.set(Expression::Neutral);
                self.apply_deferred_tilt();
                self.settle(ReasonCode::E305_INTERACTION_FINISHED);
            }
        }
    }

    fn run_autonomous_action(&mut self) -> ReasonCode {
        let action = AutonomousLoop::pick(self.rng.as_mut());
        debug!("autonomous action {:?}", action);
        let (mode, duration) = match action {
            AutonomousAction::Look(direction) => {
                self.apply_temporary(direction, self.config.timings.look_ms);
                return ReasonCode::E102_LOOK_AROUND;
            }
            AutonomousAction::Think => (IdleMode::Thinking, self.config.autonomous.thinking_ms),
            AutonomousAction::Code => (IdleMode::Coding, self.config.autonomous.coding_ms),
            AutonomousAction::Bored => (IdleMode::Bored, self.config.autonomous.bored_ms),
        };
        self.idle.enter(&mut self.scheduler, self.rng.as_mut(), mode, duration);
        ReasonCode::E201_IDLE_ENTERED
    }

    /// Catch the pupils up with the newest orientation seen during playback
    fn apply_deferred_tilt(&mut self) {
        if std::mem::take(&mut self.tilt_deferred) && self.sensing {
            self.tilt = pupil_from_rotation(&self.motion.sample().rotation);
        }
    }

    /// set_temporary without the frame; plays the blink cue
    fn apply_temporary(&mut self, expr: Expression, duration_ms: u64) {
        if expr == Expression::Blink {
            self.audio.play(SoundKey::Blink);
        }
        self.expression.set_temporary(&mut self.scheduler, expr, duration_ms);
    }

    // =========================================================================
    // COORDINATION
    // =========================================================================

    /// Nothing outranks the idle loops right now
    fn loops_allowed(&self) -> bool {
        self.started
            && !self.interaction.is_interacting()
            && !self.interaction.is_counting()
            && !self.idle.mode().is_active()
            && self.expression.current().is_neutral()
    }

    fn reconcile(&mut self) {
        if self.loops_allowed() {
            self.blink.start(&mut self.scheduler, self.rng.as_mut(), &self.config.blink);
            self.autonomous.start(&mut self.scheduler, &self.config.autonomous);
        } else {
            self.blink.stop(&mut self.scheduler);
            self.autonomous.stop(&mut self.scheduler);
        }
    }

    fn settle(&mut self, reason: ReasonCode) {
        self.reconcile();
        self.emit(reason);
    }

    /// Queue a frame if the picture changed since the last one
    fn emit(&mut self, reason: ReasonCode) {
        let frame = self.snapshot(reason);
        let changed = self
            .last_frame
            .as_ref()
            .map_or(true, |last| !last.same_view(&frame));
        if changed {
            debug!("{}", frame.to_parseable_string());
            self.last_frame = Some(frame.clone());
            self.frames.push(frame);
        }
    }

    fn snapshot(&self, reason: ReasonCode) -> FaceFrame {
        let now = self.scheduler.now_ms();
        FaceFrame::new(
            now,
            self.expression.current(),
            self.pupil(),
            self.idle.mode(),
            self.idle.variant(),
            self.idle.elapsed_ms(now),
            reason,
        )
    }

    // =========================================================================
    // OBSERVATION
    // =========================================================================

    /// Frames emitted since the last drain, oldest first
    pub fn drain_frames(&mut self) -> Vec<FaceFrame> {
        std::mem::take(&mut self.frames)
    }

    /// Current picture, whether or not it changed
    pub fn frame(&self) -> FaceFrame {
        let reason = self
            .last_frame
            .as_ref()
            .map(|f| f.reason)
            .unwrap_or(ReasonCode::E501_STARTED);
        self.snapshot(reason)
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn expression(&self) -> Expression {
        self.expression.current()
    }

    pub fn idle_mode(&self) -> IdleMode {
        self.idle.mode()
    }

    pub fn idle_variant(&self) -> Option<usize> {
        self.idle.variant()
    }

    /// Pupil as drawn: LOOK_* offsets win over tilt
    pub fn pupil(&self) -> PupilPosition {
        self.expression.current().pupil_override().unwrap_or(self.tilt)
    }

    pub fn tilt_pupil(&self) -> PupilPosition {
        self.tilt
    }

    pub fn is_interacting(&self) -> bool {
        self.interaction.is_interacting()
    }

    pub fn tap_count(&self) -> u32 {
        self.interaction.tap_count()
    }

    pub fn blink_running(&self) -> bool {
        self.blink.is_running()
    }

    pub fn autonomous_running(&self) -> bool {
        self.autonomous.is_running()
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    pub fn is_sensing(&self) -> bool {
        self.sensing
    }

    pub fn sensor_sample(&self) -> &SensorSample {
        self.motion.sample()
    }

    /// Acceleration the next sample is compared against
    pub fn last_acceleration(&self) -> [f64; 3] {
        self.motion.last_acceleration()
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    /// Timers of any kind still pending
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Reversion timers pending; never more than one
    pub fn pending_reversions(&self) -> usize {
        self.scheduler
            .count_pending(|e| matches!(e, TimerEvent::RevertExpression | TimerEvent::DizzyElapsed))
    }
}

// =============================================================================
// TESTS
// =============================================================================
