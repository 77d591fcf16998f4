//! Raw device samples and the signal derived from them
//!
//! Every field is optional: browsers and phones routinely report null
//! axes. Missing values are read as zero, never as an error.

use serde::{Deserialize, Serialize};

/// Device orientation in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub alpha: Option<f64>,
    /// Front-back tilt
    pub beta: Option<f64>,
    /// Left-right tilt
    pub gamma: Option<f64>,
}

impl Rotation {
    pub fn new(alpha: Option<f64>, beta: Option<f64>, gamma: Option<f64>) -> Self {
        Self { alpha, beta, gamma }
    }

    /// Tilt-only constructor, alpha is never used for the pupil
    pub fn tilt(beta: f64, gamma: f64) -> Self {
        Self { alpha: None, beta: Some(beta), gamma: Some(gamma) }
    }

    /// (beta, gamma) with missing or non-finite angles read as zero
    pub fn tilt_or_zero(&self) -> (f64, f64) {
        (reading_or_zero(self.beta), reading_or_zero(self.gamma))
    }
}

/// Missing or non-finite readings count as zero
fn reading_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Acceleration including gravity, m/s²
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Acceleration {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl Acceleration {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x: Some(x), y: Some(y), z: Some(z) }
    }

    /// Axes with missing or non-finite values read as zero
    pub fn or_zero(&self) -> [f64; 3] {
        [
            reading_or_zero(self.x),
            reading_or_zero(self.y),
            reading_or_zero(self.z),
        ]
    }
}

/// Latest sensor state as seen by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorSample {
    pub rotation: Rotation,
    pub acceleration: Acceleration,
    pub is_shaking: bool,
    pub is_moving: bool,
}

impl SensorSample {
    /// Clear derived flags, keep the raw values
    pub fn reset_flags(&mut self) {
        self.is_shaking = false;
        self.is_moving = false;
    }
}

/// Gesture produced by one acceleration sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MotionReading {
    pub is_shaking: bool,
    pub is_moving: bool,
}
