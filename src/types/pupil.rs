//! Pupil offset in screen pixels

use serde::{Deserialize, Serialize};
use crate::{PUPIL_X_LIMIT, PUPIL_Y_LIMIT};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PupilPosition {
    /// Horizontal offset, [-30, 30]
    pub x: f64,
    /// Vertical offset, [-25, 25]
    pub y: f64,
}

impl PupilPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self::default()
    }

    /// Clamp both axes into the travel box
    pub fn clamped(x: f64, y: f64) -> Self {
        Self {
            x: x.clamp(-PUPIL_X_LIMIT, PUPIL_X_LIMIT),
            y: y.clamp(-PUPIL_Y_LIMIT, PUPIL_Y_LIMIT),
        }
    }
}
