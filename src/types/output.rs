//! Frames handed to the rendering collaborator

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{Expression, IdleMode, PupilPosition, ReasonCode};

/// Everything a renderer needs to draw the current state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceFrame {
    /// Wall-clock time the frame was produced
    pub timestamp: DateTime<Utc>,
    /// Engine clock in milliseconds
    pub at_ms: u64,
    pub expression: Expression,
    /// Effective pupil offset, LOOK_* overrides already applied
    pub pupil: PupilPosition,
    pub is_angry: bool,
    pub idle_mode: IdleMode,
    /// Which picture or snippet the idle screen shows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_variant: Option<usize>,
    /// Milliseconds since the idle mode began
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_elapsed_ms: Option<u64>,
    pub reason: ReasonCode,
}

impl FaceFrame {
    /// Create new frame
    pub fn new(
        at_ms: u64,
        expression: Expression,
        pupil: PupilPosition,
        idle_mode: IdleMode,
        idle_variant: Option<usize>,
        idle_elapsed_ms: Option<u64>,
        reason: ReasonCode,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            at_ms,
            expression,
            pupil,
            is_angry: expression == Expression::Angry,
            idle_mode,
            idle_variant,
            idle_elapsed_ms,
            reason,
        }
    }

    /// Would a renderer draw the same picture for both frames?
    pub fn same_view(&self, other: &FaceFrame) -> bool {
        self.expression == other.expression
            && self.pupil == other.pupil
            && self.idle_mode == other.idle_mode
            && self.idle_variant == other.idle_variant
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.expression.color_code();
        let reset = Expression::color_reset();

        format!(
            "{}{} t={:.1}s | expr={} | idle={} | pupil=({:.0},{:.0}) | {}{}",
            color,
            self.expression.emoji(),
            self.at_ms as f64 / 1000.0,
            self.expression,
            self.idle_mode,
            self.pupil.x,
            self.pupil.y,
            self.reason.code(),
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "t={} | expr={} | idle={} | pupil=({:.1},{:.1}) | reason={}",
            self.at_ms,
            self.expression,
            self.idle_mode,
            self.pupil.x,
            self.pupil.y,
            self.reason.code()
        )
    }
}
