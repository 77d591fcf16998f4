//! Gomoji: expression and idle state engine for a virtual pet face
//!
//! Taps, phone motion and idle timers go in; one `FaceFrame` per visible
//! change comes out. Rendering, audio and sensors are collaborators.

pub mod config;
pub mod core;
pub mod types;

// =============================================================================
// MOTION THRESHOLDS
// =============================================================================

/// Per-axis acceleration delta above which a sample counts as a shake
pub const SHAKE_THRESHOLD: f64 = 25.0;

/// Per-axis acceleration delta above which a sample counts as a move
pub const MOVE_THRESHOLD: f64 = 5.0;

// =============================================================================
// PUPIL BOUNDS
// =============================================================================

/// Horizontal pupil travel (±)
pub const PUPIL_X_LIMIT: f64 = 30.0;

/// Vertical pupil travel (±)
pub const PUPIL_Y_LIMIT: f64 = 25.0;

/// Resting tilt of a hand-held phone, subtracted from beta/2
pub const PUPIL_Y_BIAS: f64 = 20.0;

/// Fixed offsets used by the LOOK_* expressions
pub const LOOK_OFFSET_X: f64 = 25.0;
pub const LOOK_OFFSET_Y: f64 = 20.0;

// =============================================================================
// EXPRESSION TIMINGS (milliseconds)
// =============================================================================

pub const SQUINT_MS: u64 = 300;
pub const SHAKE_MS: u64 = 300;
pub const BLINK_MS: u64 = 150;
pub const LOOK_MS: u64 = 1000;
pub const DIZZY_MS: u64 = 1500;
pub const ANGRY_MS: u64 = 2000;
pub const HAPPY_MS: u64 = 2500;
pub const GROWING_SMILE_MS: u64 = 2500;

// =============================================================================
// LOOPS (milliseconds)
// =============================================================================

/// Blink delay is drawn uniformly from [BLINK_MIN_DELAY_MS, BLINK_MAX_DELAY_MS)
pub const BLINK_MIN_DELAY_MS: u64 = 2000;
pub const BLINK_MAX_DELAY_MS: u64 = 5000;

/// Autonomous action period
pub const AUTONOMOUS_INTERVAL_MS: u64 = 4000;

pub const THINKING_MS: u64 = 4000;
pub const CODING_MS: u64 = 12000;
pub const BORED_MS: u64 = 6000;

// =============================================================================
// TAPS
// =============================================================================

/// Window after the latest tap in which further taps are still counted
pub const TAP_DEBOUNCE_MS: u64 = 400;

/// Tap count that short-circuits into the angry burst
pub const ANGRY_TAP_COUNT: u32 = 4;

/// Angry burst sound pulses
pub const ANGRY_PULSE_COUNT: u32 = 4;
pub const ANGRY_PULSE_INTERVAL_MS: u64 = 150;

// =============================================================================
// CONFIG LIMITS
// =============================================================================

/// Longest duration or delay a config may ask for (one day)
pub const MAX_CONFIG_MS: u64 = 86_400_000;

/// Most angry pulses a config may ask for
pub const MAX_ANGRY_PULSES: u32 = 64;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
