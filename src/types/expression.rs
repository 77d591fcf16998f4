//! Expression catalog

use serde::{Deserialize, Serialize};
use crate::{LOOK_OFFSET_X, LOOK_OFFSET_Y};
use crate::types::PupilPosition;

/// The facial pose currently displayed. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Expression {
    /// Rest state, the only non-transient expression
    Neutral,
    Blink,
    Squint,
    LookLeft,
    LookRight,
    LookUp,
    LookDown,
    Dizzy,
    Angry,
    Happy,
    Scared,
    Nodding,
    Shake,
    GrowingSmile,
}

impl Expression {
    /// Directions the autonomous loop picks from, in draw order
    pub const LOOKS: [Expression; 4] = [
        Expression::LookLeft,
        Expression::LookRight,
        Expression::LookUp,
        Expression::LookDown,
    ];

    pub fn is_neutral(&self) -> bool {
        *self == Expression::Neutral
    }

    pub fn is_look(&self) -> bool {
        Self::LOOKS.contains(self)
    }

    /// Fixed pupil offset for LOOK_* expressions; tilt is ignored while one is active
    pub fn pupil_override(&self) -> Option<PupilPosition> {
        match self {
            Expression::LookLeft => Some(PupilPosition::new(-LOOK_OFFSET_X, 0.0)),
            Expression::LookRight => Some(PupilPosition::new(LOOK_OFFSET_X, 0.0)),
            Expression::LookUp => Some(PupilPosition::new(0.0, -LOOK_OFFSET_Y)),
            Expression::LookDown => Some(PupilPosition::new(0.0, LOOK_OFFSET_Y)),
            _ => None,
        }
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            Expression::Angry => "\x1b[31m",                               // Red
            Expression::Dizzy | Expression::Scared => "\x1b[35m",          // Magenta
            Expression::Happy | Expression::GrowingSmile => "\x1b[32m",    // Green
            _ => "\x1b[36m",                                               // Cyan
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for expression
    pub fn emoji(&self) -> &'static str {
        match self {
            Expression::Neutral => "🙂",
            Expression::Blink => "😑",
            Expression::Squint | Expression::Shake => "😆",
            Expression::LookLeft | Expression::LookRight
            | Expression::LookUp | Expression::LookDown => "👀",
            Expression::Dizzy => "😵",
            Expression::Angry => "😠",
            Expression::Happy => "😊",
            Expression::Scared => "😨",
            Expression::Nodding => "🙂",
            Expression::GrowingSmile => "😁",
        }
    }
}

impl Default for Expression {
    fn default() -> Self {
        Expression::Neutral
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Expression::Neutral => "NEUTRAL",
            Expression::Blink => "BLINK",
            Expression::Squint => "SQUINT",
            Expression::LookLeft => "LOOK_LEFT",
            Expression::LookRight => "LOOK_RIGHT",
            Expression::LookUp => "LOOK_UP",
            Expression::LookDown => "LOOK_DOWN",
            Expression::Dizzy => "DIZZY",
            Expression::Angry => "ANGRY",
            Expression::Happy => "HAPPY",
            Expression::Scared => "SCARED",
            Expression::Nodding => "NODDING",
            Expression::Shake => "SHAKE",
            Expression::GrowingSmile => "GROWING_SMILE",
        };
        write!(f, "{}", name)
    }
}
