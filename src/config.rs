//! Engine configuration
//!
//! Defaults mirror the constants in the crate root. A TOML file may
//! override any subset:
//!
//! ```toml
//! [blink]
//! min_delay_ms = 1000
//!
//! [taps]
//! debounce_ms = 300
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::types::ConfigError;
use crate::{
    SHAKE_THRESHOLD, MOVE_THRESHOLD,
    SQUINT_MS, SHAKE_MS, BLINK_MS, LOOK_MS, DIZZY_MS, ANGRY_MS, HAPPY_MS, GROWING_SMILE_MS,
    BLINK_MIN_DELAY_MS, BLINK_MAX_DELAY_MS,
    AUTONOMOUS_INTERVAL_MS, THINKING_MS, CODING_MS, BORED_MS,
    TAP_DEBOUNCE_MS, ANGRY_TAP_COUNT, ANGRY_PULSE_COUNT, ANGRY_PULSE_INTERVAL_MS,
    MAX_CONFIG_MS, MAX_ANGRY_PULSES,
};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceConfig {
    pub motion: MotionConfig,
    pub timings: TimingConfig,
    pub blink: BlinkConfig,
    pub autonomous: AutonomousConfig,
    pub taps: TapConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub shake_threshold: f64,
    pub move_threshold: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            shake_threshold: SHAKE_THRESHOLD,
            move_threshold: MOVE_THRESHOLD,
        }
    }
}

/// How long each temporary expression stays up (milliseconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub squint_ms: u64,
    pub shake_ms: u64,
    pub blink_ms: u64,
    pub look_ms: u64,
    pub dizzy_ms: u64,
    pub angry_ms: u64,
    pub happy_ms: u64,
    pub growing_smile_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            squint_ms: SQUINT_MS,
            shake_ms: SHAKE_MS,
            blink_ms: BLINK_MS,
            look_ms: LOOK_MS,
            dizzy_ms: DIZZY_MS,
            angry_ms: ANGRY_MS,
            happy_ms: HAPPY_MS,
            growing_smile_ms: GROWING_SMILE_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkConfig {
    pub min_delay_ms: u64,
    /// Exclusive upper bound
    pub max_delay_ms: u64,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: BLINK_MIN_DELAY_MS,
            max_delay_ms: BLINK_MAX_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutonomousConfig {
    pub interval_ms: u64,
    pub thinking_ms: u64,
    pub coding_ms: u64,
    pub bored_ms: u64,
}

impl Default for AutonomousConfig {
    fn default() -> Self {
        Self {
            interval_ms: AUTONOMOUS_INTERVAL_MS,
            thinking_ms: THINKING_MS,
            coding_ms: CODING_MS,
            bored_ms: BORED_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TapConfig {
    pub debounce_ms: u64,
    pub angry_tap_count: u32,
    pub angry_pulse_count: u32,
    pub angry_pulse_interval_ms: u64,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            debounce_ms: TAP_DEBOUNCE_MS,
            angry_tap_count: ANGRY_TAP_COUNT,
            angry_pulse_count: ANGRY_PULSE_COUNT,
            angry_pulse_interval_ms: ANGRY_PULSE_INTERVAL_MS,
        }
    }
}

impl FaceConfig {
    /// Load from a TOML file and validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parse TOML text and validate
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: FaceConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.blink.min_delay_ms >= self.blink.max_delay_ms {
            return Err(ConfigError::Invalid(format!(
                "blink.min_delay_ms ({}) must be below blink.max_delay_ms ({})",
                self.blink.min_delay_ms, self.blink.max_delay_ms
            )));
        }
        if self.autonomous.interval_ms == 0 {
            return Err(ConfigError::Invalid("autonomous.interval_ms must be positive".into()));
        }
        if self.taps.angry_tap_count < 2 {
            return Err(ConfigError::Invalid("taps.angry_tap_count must be at least 2".into()));
        }
        if let Some((name, value)) = self.durations().into_iter().find(|(_, v)| *v > MAX_CONFIG_MS) {
            return Err(ConfigError::Invalid(format!(
                "{} ({}) exceeds {}ms",
                name, value, MAX_CONFIG_MS
            )));
        }
        if self.taps.angry_pulse_count > MAX_ANGRY_PULSES {
            return Err(ConfigError::Invalid(format!(
                "taps.angry_pulse_count must be at most {}",
                MAX_ANGRY_PULSES
            )));
        }
        if !(self.motion.move_threshold.is_finite() && self.motion.shake_threshold.is_finite()) {
            return Err(ConfigError::Invalid("motion thresholds must be finite".into()));
        }
        if self.motion.move_threshold > self.motion.shake_threshold {
            return Err(ConfigError::Invalid(
                "motion.move_threshold must not exceed motion.shake_threshold".into(),
            ));
        }
        Ok(())
    }

    /// Offset from sequence start at which the happy sequence ends
    pub fn happy_sequence_ms(&self) -> u64 {
        self.timings
            .squint_ms
            .saturating_add(self.timings.shake_ms)
            .saturating_add(self.timings.happy_ms)
    }

    fn durations(&self) -> [(&'static str, u64); 16] {
        [
            ("timings.squint_ms", self.timings.squint_ms),
            ("timings.shake_ms", self.timings.shake_ms),
            ("timings.blink_ms", self.timings.blink_ms),
            ("timings.look_ms", self.timings.look_ms),
            ("timings.dizzy_ms", self.timings.dizzy_ms),
            ("timings.angry_ms", self.timings.angry_ms),
            ("timings.happy_ms", self.timings.happy_ms),
            ("timings.growing_smile_ms", self.timings.growing_smile_ms),
            ("blink.min_delay_ms", self.blink.min_delay_ms),
            ("blink.max_delay_ms", self.blink.max_delay_ms),
            ("autonomous.interval_ms", self.autonomous.interval_ms),
            ("autonomous.thinking_ms", self.autonomous.thinking_ms),
            ("autonomous.coding_ms", self.autonomous.coding_ms),
            ("autonomous.bored_ms", self.autonomous.bored_ms),
            ("taps.debounce_ms", self.taps.debounce_ms),
            ("taps.angry_pulse_interval_ms", self.taps.angry_pulse_interval_ms),
        ]
    }
}

// =============================================================================
// TESTS
// =============================================================================
