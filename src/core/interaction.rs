//! Interaction sequencer: taps → scripted sequences
//!
//! State transitions:
//! - IDLE → COUNTING: first tap
//! - COUNTING → ANGRY_BURST: tap count reaches 4 (no debounce)
//! - COUNTING → RESOLVED: 400ms without a further tap
//!   - 3 taps: growing smile
//!   - 1 or 2 taps: squint → shake → happy
//!
//! While a sequence plays, taps are dropped.

use log::debug;
use crate::config::FaceConfig;
use crate::core::scheduler::{Scheduler, TimerEvent, TimerHandle};
use crate::types::Expression;

/// What a single tap did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// A sequence is playing; the tap was dropped
    Ignored,
    /// Counted, debounce window (re)started
    Counting(u32),
    /// Count reached the burst threshold
    AngryBurst,
}

/// How a debounced tap run resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    GrowingSmile,
    HappySequence,
}

impl Resolution {
    /// First expression of the sequence
    pub fn opening(&self) -> Expression {
        match self {
            Resolution::GrowingSmile => Expression::GrowingSmile,
            Resolution::HappySequence => Expression::Squint,
        }
    }
}

#[derive(Debug, Default)]
pub struct InteractionSequencer {
    tap_count: u32,
    debounce: Option<TimerHandle>,
    interacting: bool,
    /// Step, pulse and finish timers of the playing sequence
    playback: Vec<TimerHandle>,
}

impl InteractionSequencer {
    /// A scripted sequence is playing
    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    /// Taps counted but not yet resolved
    pub fn is_counting(&self) -> bool {
        self.tap_count > 0
    }

    pub fn tap_count(&self) -> u32 {
        self.tap_count
    }

    /// Count a tap. The caller clears the other loops on anything but `Ignored`.
    pub fn register_tap(&mut self, sched: &mut Scheduler, config: &FaceConfig) -> TapOutcome {
        if self.interacting {
            debug!("tap dropped, sequence playing");
            return TapOutcome::Ignored;
        }

        self.tap_count += 1;
        sched.cancel_slot(&mut self.debounce);

        if self.tap_count >= config.taps.angry_tap_count {
            self.tap_count = 0;
            self.interacting = true;
            self.schedule_burst(sched, config);
            return TapOutcome::AngryBurst;
        }

        self.debounce = Some(sched.schedule(config.taps.debounce_ms, TimerEvent::TapDebounce));
        TapOutcome::Counting(self.tap_count)
    }

    /// Debounce window closed: start the sequence for the final count
    pub fn resolve(&mut self, handle: TimerHandle, sched: &mut Scheduler, config: &FaceConfig) -> Option<Resolution> {
        if self.debounce != Some(handle) {
            return None;
        }
        self.debounce = None;

        let taps = std::mem::take(&mut self.tap_count);
        self.interacting = true;

        let resolution = if taps == 3 {
            Resolution::GrowingSmile
        } else {
            Resolution::HappySequence
        };
        debug!("{} taps resolved as {:?}", taps, resolution);

        match resolution {
            Resolution::GrowingSmile => {
                self.push(sched, config.timings.growing_smile_ms, TimerEvent::InteractionFinished);
            }
            Resolution::HappySequence => {
                // Cumulative offsets from sequence start, each step scheduled once
                let squint = config.timings.squint_ms;
                let shake = squint.saturating_add(config.timings.shake_ms);
                self.push(sched, squint, TimerEvent::SequenceStep(Expression::Shake));
                self.push(sched, shake, TimerEvent::SequenceStep(Expression::Happy));
                self.push(sched, config.happy_sequence_ms(), TimerEvent::InteractionFinished);
            }
        }
        Some(resolution)
    }

    /// A playback timer fired
    pub fn timer_fired(&mut self, handle: TimerHandle) {
        self.playback.retain(|h| *h != handle);
    }

    /// Sequence over
    pub fn finish(&mut self) {
        self.interacting = false;
    }

    /// Drop the tap count, the debounce and any playing sequence
    pub fn cancel_all(&mut self, sched: &mut Scheduler) {
        sched.cancel_slot(&mut self.debounce);
        for handle in self.playback.drain(..) {
            sched.cancel(handle);
        }
        self.tap_count = 0;
        self.interacting = false;
    }

    fn schedule_burst(&mut self, sched: &mut Scheduler, config: &FaceConfig) {
        let interval = config.taps.angry_pulse_interval_ms;
        for n in 1..=config.taps.angry_pulse_count as u64 {
            self.push(sched, interval.saturating_mul(n), TimerEvent::AngryPulse);
        }
        self.push(sched, config.timings.angry_ms, TimerEvent::InteractionFinished);
    }

    fn push(&mut self, sched: &mut Scheduler, delay_ms: u64, event: TimerEvent) {
        self.playback.push(sched.schedule(delay_ms, event));
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn debounce_handle(sched: &mut Scheduler, until: u64) -> TimerHandle {
        let (handle, event) = sched.pop_due(until).expect("debounce due");
        assert_eq!(event, TimerEvent::TapDebounce);
        handle
    }

    #[test]
    fn test_taps_restart_debounce() {
        let config = FaceConfig::default();
        let mut sched = Scheduler::new();
        let mut seq = InteractionSequencer::default();

        assert_eq!(seq.register_tap(&mut sched, &config), TapOutcome::Counting(1));
        sched.park(300);
        assert_eq!(seq.register_tap(&mut sched, &config), TapOutcome::Counting(2));
        assert_eq!(sched.pending_count(), 1);
        assert_eq!(sched.next_deadline(), Some(700));
    }

    #[test]
    fn test_fourth_tap_bursts() {
        let config = FaceConfig::default();
        let mut sched = Scheduler::new();
        let mut seq = InteractionSequencer::default();

        for _ in 0..3 {
            seq.register_tap(&mut sched, &config);
        }
        assert_eq!(seq.register_tap(&mut sched, &config), TapOutcome::AngryBurst);
        assert!(seq.is_interacting());
        assert_eq!(seq.tap_count(), 0);
        assert_eq!(sched.count_pending(|e| *e == TimerEvent::TapDebounce), 0);
        assert_eq!(sched.count_pending(|e| *e == TimerEvent::AngryPulse), 4);
    }

    #[test]
    fn test_huge_timings_do_not_overflow() {
        let mut config = FaceConfig::default();
        config.taps.angry_pulse_interval_ms = u64::MAX / 2;
        config.timings.squint_ms = u64::MAX;
        config.timings.shake_ms = u64::MAX;
        let mut sched = Scheduler::new();
        let mut seq = InteractionSequencer::default();

        for _ in 0..4 {
            seq.register_tap(&mut sched, &config);
        }
        assert_eq!(sched.count_pending(|e| *e == TimerEvent::AngryPulse), 4);

        let mut seq = InteractionSequencer::default();
        seq.register_tap(&mut sched, &config);
        sched.park(400);
        let handle = debounce_handle(&mut sched, 400);
        assert_eq!(seq.resolve(handle, &mut sched, &config), Some(Resolution::HappySequence));
    }

    #[test]
    fn test_taps_dropped_while_playing() {
        let config = FaceConfig::default();
        let mut sched = Scheduler::new();
        let mut seq = InteractionSequencer::default();

        seq.register_tap(&mut sched, &config);
        let handle = debounce_handle(&mut sched, 400);
        assert_eq!(seq.resolve(handle, &mut sched, &config), Some(Resolution::HappySequence));
        assert_eq!(seq.register_tap(&mut sched, &config), TapOutcome::Ignored);
        assert_eq!(seq.tap_count(), 0);
    }

    #[test]
    fn test_three_taps_grow_smile() {
        let config = FaceConfig::default();
        let mut sched = Scheduler::new();
        let mut seq = InteractionSequencer::default();

        for _ in 0..3 {
            seq.register_tap(&mut sched, &config);
        }
        let handle = debounce_handle(&mut sched, 400);
        assert_eq!(seq.resolve(handle, &mut sched, &config), Some(Resolution::GrowingSmile));
        assert_eq!(sched.next_deadline(), Some(400 + 2500));
    }

    #[test]
    fn test_happy_steps_are_cumulative() {
        let config = FaceConfig::default();
        let mut sched = Scheduler::new();
        let mut seq = InteractionSequencer::default();

        seq.register_tap(&mut sched, &config);
        let handle = debounce_handle(&mut sched, 400);
        seq.resolve(handle, &mut sched, &config);

        let mut fired = Vec::new();
        while let Some((_, event)) = sched.pop_due(u64::MAX) {
            fired.push((sched.now_ms(), event));
        }
        assert_eq!(
            fired,
            vec![
                (700, TimerEvent::SequenceStep(Expression::Shake)),
                (1000, TimerEvent::SequenceStep(Expression::Happy)),
                (3500, TimerEvent::InteractionFinished),
            ]
        );
    }

    #[test]
    fn test_cancel_all() {
        let config = FaceConfig::default();
        let mut sched = Scheduler::new();
        let mut seq = InteractionSequencer::default();
        for _ in 0..4 {
            seq.register_tap(&mut sched, &config);
        }
        seq.cancel_all(&mut sched);
        assert!(!seq.is_interacting());
        assert_eq!(sched.pending_count(), 0);
    }
}
