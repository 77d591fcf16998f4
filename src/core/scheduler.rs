//! Scheduler: virtual millisecond clock with one-shot timers
//!
//! Timers fire in (deadline, creation order), the same order `setTimeout`
//! gives. Periodic behaviour is built by rescheduling from the handler.

use std::collections::{BTreeMap, HashMap};
use crate::types::Expression;

/// Handle to a pending timer, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// What happens when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Temporary expression deadline
    RevertExpression,
    /// DIZZY runs out and turns into ANGRY
    DizzyElapsed,
    Blink,
    AutonomousTick,
    IdleModeElapsed,
    TapDebounce,
    /// One step of a scripted tap sequence
    SequenceStep(Expression),
    AngryPulse,
    InteractionFinished,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    queue: BTreeMap<(u64, u64), TimerEvent>,
    deadlines: HashMap<u64, u64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current engine time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `event` to fire `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: u64, event: TimerEvent) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        let due = self.now_ms.saturating_add(delay_ms);
        self.queue.insert((due, id), event);
        self.deadlines.insert(id, due);
        TimerHandle(id)
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.deadlines.remove(&handle.0) {
            Some(due) => self.queue.remove(&(due, handle.0)).is_some(),
            None => false,
        }
    }

    /// Take the handle out of `slot` and cancel it
    pub fn cancel_slot(&mut self, slot: &mut Option<TimerHandle>) -> bool {
        match slot.take() {
            Some(handle) => self.cancel(handle),
            None => false,
        }
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.deadlines.contains_key(&handle.0)
    }

    /// Deadline of a pending timer
    pub fn deadline(&self, handle: TimerHandle) -> Option<u64> {
        self.deadlines.get(&handle.0).copied()
    }

    /// Event a pending timer will fire
    pub fn event(&self, handle: TimerHandle) -> Option<TimerEvent> {
        let due = self.deadlines.get(&handle.0)?;
        self.queue.get(&(*due, handle.0)).copied()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Count pending timers matching a predicate
    pub fn count_pending(&self, mut pred: impl FnMut(&TimerEvent) -> bool) -> usize {
        self.queue.values().filter(|e| pred(e)).count()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to its deadline
    pub fn pop_due(&mut self, until: u64) -> Option<(TimerHandle, TimerEvent)> {
        let (&(due, id), _) = self.queue.iter().next()?;
        if due > until {
            return None;
        }
        let event = self.queue.remove(&(due, id))?;
        self.deadlines.remove(&id);
        self.now_ms = self.now_ms.max(due);
        Some((TimerHandle(id), event))
    }

    /// Move the clock forward without firing anything
    pub fn park(&mut self, to_ms: u64) {
        self.now_ms = self.now_ms.max(to_ms);
    }

    /// Drop every pending timer
    pub fn clear(&mut self) {
        self.queue.clear();
        self.deadlines.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================
