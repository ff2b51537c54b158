//! Debounced dirty notification.
//!
//! One deadline per rule, cancel-and-rescheduled on every mutation. The
//! model is single-threaded and cooperative, so there is no timer thread:
//! the host pumps `BrainDef::flush_events(now)` and due notifications are
//! delivered there. Cancellation is hard: a removed deadline can never
//! fire late on a detached rule.

use std::time::{Duration, Instant};

use indexmap::IndexMap;

use crate::ids::RuleId;

/// Debounce window for rule dirty notifications.
pub const DIRTY_DEBOUNCE: Duration = Duration::from_millis(50);

#[derive(Clone, Copy, Debug)]
struct Pending {
    due: Instant,
    is_dirty: bool,
}

#[derive(Default, Debug)]
pub(crate) struct Debouncer {
    pending: IndexMap<RuleId, Pending>,
}

impl Debouncer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Cancel-and-reschedule the rule's deadline.
    pub(crate) fn schedule(&mut self, rule: RuleId, is_dirty: bool, now: Instant) {
        self.pending.insert(
            rule,
            Pending {
                due: now + DIRTY_DEBOUNCE,
                is_dirty,
            },
        );
    }

    pub(crate) fn cancel(&mut self, rule: RuleId) {
        self.pending.shift_remove(&rule);
    }

    /// Remove and return entries whose deadline has passed.
    pub(crate) fn take_due(&mut self, now: Instant) -> Vec<(RuleId, bool)> {
        let due: Vec<RuleId> = self
            .pending
            .iter()
            .filter(|(_, p)| p.due <= now)
            .map(|(&rule, _)| rule)
            .collect();
        due.iter()
            .filter_map(|rule| {
                self.pending
                    .shift_remove(rule)
                    .map(|p| (*rule, p.is_dirty))
            })
            .collect()
    }

    /// Remove and return every pending entry regardless of deadline.
    pub(crate) fn take_all(&mut self) -> Vec<(RuleId, bool)> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .map(|(rule, p)| (rule, p.is_dirty))
            .collect()
    }

    pub(crate) fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
