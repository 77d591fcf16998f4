//! Reason codes attached to every emitted frame
//!
//! E1xx expression, E2xx idle mode, E3xx interaction, E4xx motion,
//! E5xx lifecycle.

use serde::{Deserialize, Serialize};

/// Why the visible state last changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // E1xx: Expression
    // =========================================================================
    /// Autonomous blink
    E101_BLINK,
    /// Autonomous glance in one of four directions
    E102_LOOK_AROUND,
    /// Temporary expression reached its deadline
    E103_EXPRESSION_REVERTED,
    /// Temporary expression requested directly
    E104_TEMPORARY_EXPRESSION,

    // =========================================================================
    // E2xx: Idle mode
    // =========================================================================
    /// Autonomous loop entered an idle mode
    E201_IDLE_ENTERED,
    /// Idle mode ran its course
    E202_IDLE_EXPIRED,
    /// Idle mode cut short by a tap or gesture
    E203_IDLE_INTERRUPTED,

    // =========================================================================
    // E3xx: Interaction
    // =========================================================================
    /// Tap counted, waiting for the debounce window
    E301_TAP_COUNTED,
    /// Four rapid taps
    E302_ANGRY_BURST,
    /// Three taps
    E303_GROWING_SMILE,
    /// One or two taps, squint → shake → happy
    E304_HAPPY_SEQUENCE,
    /// Scripted sequence finished
    E305_INTERACTION_FINISHED,

    // =========================================================================
    // E4xx: Motion
    // =========================================================================
    /// Shake detected
    E401_SHAKE_DIZZY,
    /// Dizziness turned into anger
    E402_DIZZY_TO_ANGRY,
    /// Ordinary movement while neutral
    E403_MOVE_SQUINT,
    /// Tilt moved the pupils
    E404_TILT,

    // =========================================================================
    // E5xx: Lifecycle
    // =========================================================================
    E501_STARTED,
    E502_STOPPED,
    E503_SENSING_DISABLED,
    E504_SENSING_ENABLED,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::E101_BLINK => "E101_BLINK",
            Self::E102_LOOK_AROUND => "E102_LOOK_AROUND",
            Self::E103_EXPRESSION_REVERTED => "E103_EXPRESSION_REVERTED",
            Self::E104_TEMPORARY_EXPRESSION => "E104_TEMPORARY_EXPRESSION",
            Self::E201_IDLE_ENTERED => "E201_IDLE_ENTERED",
            Self::E202_IDLE_EXPIRED => "E202_IDLE_EXPIRED",
            Self::E203_IDLE_INTERRUPTED => "E203_IDLE_INTERRUPTED",
            Self::E301_TAP_COUNTED => "E301_TAP_COUNTED",
            Self::E302_ANGRY_BURST => "E302_ANGRY_BURST",
            Self::E303_GROWING_SMILE => "E303_GROWING_SMILE",
            Self::E304_HAPPY_SEQUENCE => "E304_HAPPY_SEQUENCE",
            Self::E305_INTERACTION_FINISHED => "E305_INTERACTION_FINISHED",
            Self::E401_SHAKE_DIZZY => "E401_SHAKE_DIZZY",
            Self::E402_DIZZY_TO_ANGRY => "E402_DIZZY_TO_ANGRY",
            Self::E403_MOVE_SQUINT => "E403_MOVE_SQUINT",
            Self::E404_TILT => "E404_TILT",
            Self::E501_STARTED => "E501_STARTED",
            Self::E502_STOPPED => "E502_STOPPED",
            Self::E503_SENSING_DISABLED => "E503_SENSING_DISABLED",
            Self::E504_SENSING_ENABLED => "E504_SENSING_ENABLED",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::E101_BLINK => "Blinking",
            Self::E102_LOOK_AROUND => "Looking around",
            Self::E103_EXPRESSION_REVERTED => "Back to neutral",
            Self::E104_TEMPORARY_EXPRESSION => "Temporary expression",
            Self::E201_IDLE_ENTERED => "Drifting into an idle mode",
            Self::E202_IDLE_EXPIRED => "Idle mode over",
            Self::E203_IDLE_INTERRUPTED => "Idle mode interrupted",
            Self::E301_TAP_COUNTED => "Counting taps",
            Self::E302_ANGRY_BURST => "Too many taps - angry",
            Self::E303_GROWING_SMILE => "Three taps - growing smile",
            Self::E304_HAPPY_SEQUENCE => "Tapped - happy",
            Self::E305_INTERACTION_FINISHED => "Interaction finished",
            Self::E401_SHAKE_DIZZY => "Shaken - dizzy",
            Self::E402_DIZZY_TO_ANGRY => "Dizzy turned angry",
            Self::E403_MOVE_SQUINT => "Moved - squinting",
            Self::E404_TILT => "Tilted",
            Self::E501_STARTED => "Face started",
            Self::E502_STOPPED => "Face stopped",
            Self::E503_SENSING_DISABLED => "Motion sensing off",
            Self::E504_SENSING_ENABLED => "Motion sensing on",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
