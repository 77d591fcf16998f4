//! Motion classifier: raw acceleration and orientation → gestures
//!
//! - shaking: some axis changed by more than the shake threshold since the
//!   previous sample
//! - moving: not shaking, and some axis changed by more than the move
//!   threshold
//! - pupil: x = gamma/2, y = beta/2 − 20, clamped to the travel box
//!
//! Deltas are always taken against the immediately preceding sample.

use crate::PUPIL_Y_BIAS;
use crate::config::MotionConfig;
use crate::types::{Acceleration, MotionReading, PupilPosition, Rotation, SensorSample};

#[derive(Debug, Clone)]
pub struct MotionClassifier {
    shake_threshold: f64,
    move_threshold: f64,
    /// Previous acceleration, missing axes stored as zero
    last: [f64; 3],
    sample: SensorSample,
}

impl Default for MotionClassifier {
    fn default() -> Self {
        Self::new(&MotionConfig::default())
    }
}

impl MotionClassifier {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            shake_threshold: config.shake_threshold,
            move_threshold: config.move_threshold,
            last: [0.0; 3],
            sample: SensorSample::default(),
        }
    }

    /// Classify one acceleration sample and remember it as the new baseline
    pub fn observe_acceleration(&mut self, accel: Acceleration) -> MotionReading {
        let current = accel.or_zero();
        let mut max_delta: f64 = 0.0;
        for (now, before) in current.iter().zip(self.last.iter()) {
            max_delta = max_delta.max((now - before).abs());
        }

        let is_shaking = max_delta > self.shake_threshold;
        let is_moving = !is_shaking && max_delta > self.move_threshold;

        self.last = current;
        self.sample.acceleration = accel;
        self.sample.is_shaking = is_shaking;
        self.sample.is_moving = is_moving;

        MotionReading { is_shaking, is_moving }
    }

    /// Record an orientation sample and return the tilt-derived pupil offset
    pub fn observe_rotation(&mut self, rotation: Rotation) -> PupilPosition {
        self.sample.rotation = rotation;
        pupil_from_rotation(&rotation)
    }

    /// Latest raw values and flags
    pub fn sample(&self) -> &SensorSample {
        &self.sample
    }

    /// Baseline the next acceleration sample is compared against
    pub fn last_acceleration(&self) -> [f64; 3] {
        self.last
    }

    pub fn shake_threshold(&self) -> f64 {
        self.shake_threshold
    }

    /// Sensing torn down: flags go false, baseline stays
    pub fn reset_flags(&mut self) {
        self.sample.reset_flags();
    }
}

/// Tilt → pupil offset, missing or NaN angles read as zero
pub fn pupil_from_rotation(rotation: &Rotation) -> PupilPosition {
    let (beta, gamma) = rotation.tilt_or_zero();
    PupilPosition::clamped(gamma / 2.0, beta / 2.0 - PUPIL_Y_BIAS)
}

// =============================================================================
// TESTS
// =============================================================================
