//! Idle behaviour: blink loop, autonomous action loop, idle-mode state
//!
//! The loops only own their timer handles and the random draws. Whether a
//! loop may run at all is decided by the coordinator.

use log::debug;
use crate::config::{AutonomousConfig, BlinkConfig};
use crate::core::random::RandomSource;
use crate::core::scheduler::{Scheduler, TimerEvent, TimerHandle};
use crate::types::{Expression, IdleMode};

// =============================================================================
// BLINK LOOP
// =============================================================================

/// Self-rescheduling blink timer with a fresh random delay every cycle
#[derive(Debug, Default)]
pub struct BlinkLoop {
    timer: Option<TimerHandle>,
}

impl BlinkLoop {
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Arm the next cycle. No-op while a cycle is already pending.
    pub fn start(&mut self, sched: &mut Scheduler, rng: &mut dyn RandomSource, config: &BlinkConfig) {
        if self.timer.is_some() {
            return;
        }
        let delay = rng.range_ms(config.min_delay_ms, config.max_delay_ms);
        debug!("next blink in {}ms", delay);
        self.timer = Some(sched.schedule(delay, TimerEvent::Blink));
    }

    pub fn stop(&mut self, sched: &mut Scheduler) {
        if sched.cancel_slot(&mut self.timer) {
            debug!("blink loop paused");
        }
    }

    /// The pending cycle fired
    pub fn fired(&mut self, handle: TimerHandle) {
        if self.timer == Some(handle) {
            self.timer = None;
        }
    }
}

// =============================================================================
// AUTONOMOUS ACTION LOOP
// =============================================================================

/// What the face does on its own when left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutonomousAction {
    Look(Expression),
    Think,
    Code,
    Bored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActionKind {
    Look,
    Think,
    Code,
    Bored,
}

/// Weighted by repetition: LOOK 4/7, the rest 1/7 each
const ACTION_TABLE: [ActionKind; 7] = [
    ActionKind::Look,
    ActionKind::Look,
    ActionKind::Look,
    ActionKind::Look,
    ActionKind::Think,
    ActionKind::Code,
    ActionKind::Bored,
];

/// Fixed-period timer while enabled
#[derive(Debug, Default)]
pub struct AutonomousLoop {
    timer: Option<TimerHandle>,
}

impl AutonomousLoop {
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn start(&mut self, sched: &mut Scheduler, config: &AutonomousConfig) {
        if self.timer.is_none() {
            self.timer = Some(sched.schedule(config.interval_ms, TimerEvent::AutonomousTick));
        }
    }

    pub fn stop(&mut self, sched: &mut Scheduler) {
        sched.cancel_slot(&mut self.timer);
    }

    /// Tick fired: arm the next period
    pub fn tick(&mut self, handle: TimerHandle, sched: &mut Scheduler, config: &AutonomousConfig) {
        if self.timer == Some(handle) {
            self.timer = Some(sched.schedule(config.interval_ms, TimerEvent::AutonomousTick));
        }
    }

    /// Draw one action; LOOK draws a second time for the direction
    pub fn pick(rng: &mut dyn RandomSource) -> AutonomousAction {
        match ACTION_TABLE[rng.pick_index(ACTION_TABLE.len())] {
            ActionKind::Look => {
                let look = Expression::LOOKS[rng.pick_index(Expression::LOOKS.len())];
                AutonomousAction::Look(look)
            }
            ActionKind::Think => AutonomousAction::Think,
            ActionKind::Code => AutonomousAction::Code,
            ActionKind::Bored => AutonomousAction::Bored,
        }
    }
}

// =============================================================================
// IDLE MODE
// =============================================================================

/// Current idle mode with its fire-once expiry
#[derive(Debug, Default)]
pub struct IdleState {
    mode: IdleMode,
    variant: Option<usize>,
    since_ms: u64,
    expiry: Option<TimerHandle>,
}

impl IdleState {
    pub fn mode(&self) -> IdleMode {
        self.mode
    }

    pub fn variant(&self) -> Option<usize> {
        self.variant
    }

    /// Milliseconds the current mode has been showing
    pub fn elapsed_ms(&self, now_ms: u64) -> Option<u64> {
        self.mode.is_active().then(|| now_ms.saturating_sub(self.since_ms))
    }

    /// Enter `mode` for `duration_ms`, picking a visual variant when the mode has some
    pub fn enter(
        &mut self,
        sched: &mut Scheduler,
        rng: &mut dyn RandomSource,
        mode: IdleMode,
        duration_ms: u64,
    ) {
        let variants = mode.variant_count();
        self.mode = mode;
        self.variant = (variants > 0).then(|| rng.pick_index(variants));
        self.since_ms = sched.now_ms();
        self.expiry = Some(sched.schedule(duration_ms, TimerEvent::IdleModeElapsed));
        debug!("idle {} for {}ms", mode, duration_ms);
    }

    /// Expiry fired. Returns true if it belonged to the current mode.
    pub fn expire(&mut self, handle: TimerHandle) -> bool {
        if self.expiry != Some(handle) {
            return false;
        }
        self.expiry = None;
        self.mode = IdleMode::None;
        self.variant = None;
        true
    }

    /// Leave early. Returns true if a mode was active.
    pub fn interrupt(&mut self, sched: &mut Scheduler) -> bool {
        sched.cancel_slot(&mut self.expiry);
        let was_active = self.mode.is_active();
        self.mode = IdleMode::None;
        self.variant = None;
        was_active
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::ScriptedRandom;

    #[test]
    fn test_blink_delay_range() {
        let mut sched = Scheduler::new();
        let mut rng = ScriptedRandom::new([0.5]);
        let mut blink = BlinkLoop::default();
        blink.start(&mut sched, &mut rng, &BlinkConfig::default());
        assert_eq!(sched.next_deadline(), Some(3500));
    }

    #[test]
    fn test_blink_start_is_idempotent() {
        let mut sched = Scheduler::new();
        let mut rng = ScriptedRandom::new([0.0, 0.9]);
        let mut blink = BlinkLoop::default();
        blink.start(&mut sched, &mut rng, &BlinkConfig::default());
        blink.start(&mut sched, &mut rng, &BlinkConfig::default());
        assert_eq!(sched.pending_count(), 1);
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn test_action_weights() {
        let mut looks = 0;
        for i in 0..7 {
            // Centre of each seventh, then a direction draw of 0
            let mut rng = ScriptedRandom::new([(i as f64 + 0.5) / 7.0, 0.0]);
            if let AutonomousAction::Look(_) = AutonomousLoop::pick(&mut rng) {
                looks += 1;
            }
        }
        assert_eq!(looks, 4);
    }

    #[test]
    fn test_pick_specific_actions() {
        let mut rng = ScriptedRandom::new([0.0, 0.8]);
        assert_eq!(AutonomousLoop::pick(&mut rng), AutonomousAction::Look(Expression::LookDown));
        let mut rng = ScriptedRandom::new([4.5 / 7.0]);
        assert_eq!(AutonomousLoop::pick(&mut rng), AutonomousAction::Think);
        let mut rng = ScriptedRandom::new([5.5 / 7.0]);
        assert_eq!(AutonomousLoop::pick(&mut rng), AutonomousAction::Code);
        let mut rng = ScriptedRandom::new([6.5 / 7.0]);
        assert_eq!(AutonomousLoop::pick(&mut rng), AutonomousAction::Bored);
    }

    #[test]
    fn test_idle_variant_only_for_pictured_modes() {
        let mut sched = Scheduler::new();
        let mut rng = ScriptedRandom::new([0.7]);
        let mut idle = IdleState::default();
        idle.enter(&mut sched, &mut rng, IdleMode::Thinking, 4000);
        assert_eq!(idle.variant(), None);
        idle.interrupt(&mut sched);
        idle.enter(&mut sched, &mut rng, IdleMode::Bored, 6000);
        assert_eq!(idle.variant(), Some(2));
    }

    #[test]
    fn test_interrupt_cancels_expiry() {
        let mut sched = Scheduler::new();
        let mut rng = ScriptedRandom::default();
        let mut idle = IdleState::default();
        idle.enter(&mut sched, &mut rng, IdleMode::Coding, 12000);
        assert!(idle.interrupt(&mut sched));
        assert_eq!(sched.pending_count(), 0);
        assert!(!idle.interrupt(&mut sched));
    }
}
