//! Expression state: the single displayed expression and its reversion timer

use log::debug;
use crate::core::scheduler::{Scheduler, TimerEvent, TimerHandle};
use crate::types::Expression;

/// Holds the current expression. At most one reversion timer is pending.
#[derive(Debug, Default)]
pub struct ExpressionState {
    current: Expression,
    /// Reversion to NEUTRAL, or the DIZZY follow-up which occupies the same slot
    pending: Option<TimerHandle>,
}

impl ExpressionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Expression {
        self.current
    }

    /// Show `expr` now and revert to NEUTRAL after `duration_ms`.
    /// Any earlier reversion is cancelled first.
    pub fn set_temporary(&mut self, sched: &mut Scheduler, expr: Expression, duration_ms: u64) {
        sched.cancel_slot(&mut self.pending);
        self.current = expr;
        self.pending = Some(sched.schedule(duration_ms, TimerEvent::RevertExpression));
        debug!("expression {} for {}ms", expr, duration_ms);
    }

    /// Show `expr` and arm `event` in the reversion slot instead of a plain revert
    pub fn hold(&mut self, sched: &mut Scheduler, expr: Expression, delay_ms: u64, event: TimerEvent) {
        sched.cancel_slot(&mut self.pending);
        self.current = expr;
        self.pending = Some(sched.schedule(delay_ms, event));
    }

    /// Scripted step: set without touching the reversion slot
    pub fn set(&mut self, expr: Expression) {
        self.current = expr;
    }

    /// Drop the pending reversion, leave the expression as it is
    pub fn cancel_pending(&mut self, sched: &mut Scheduler) -> bool {
        sched.cancel_slot(&mut self.pending)
    }

    /// Our timer fired; forget its handle. Returns false for a foreign handle.
    pub fn timer_fired(&mut self, handle: TimerHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Reversion deadline reached
    pub fn revert(&mut self) {
        self.current = Expression::Neutral;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// What the pending slot will do when it fires
    pub fn pending_event(&self, sched: &Scheduler) -> Option<TimerEvent> {
        self.pending.and_then(|handle| sched.event(handle))
    }

    /// Back to NEUTRAL with nothing pending
    pub fn reset(&mut self, sched: &mut Scheduler) {
        sched.cancel_slot(&mut self.pending);
        self.current = Expression::Neutral;
    }
}

// =============================================================================
// TESTS
// =============================================================================
