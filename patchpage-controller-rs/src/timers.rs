//! Named, cancellable one-shot timers.
//!
//! Every timer is identified by its purpose. Arming a [`TimerId`] that is
//! already pending replaces the old deadline, so there is never more than
//! one outstanding timer per purpose and a superseded timer can never
//! fire.
//!
//! Time is a plain millisecond counter supplied by the caller, which keeps
//! the queue independent of any executor and lets tests drive it with a
//! simulated clock.

use heapless::Vec;

use crate::input::{Button, BUTTON_COUNT};

/// Purpose of a one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerId {
    /// Settle window for a button's debounce gate.
    Debounce(Button),
    /// Delay between the last page press and the program change send.
    Holdoff,
    /// Status LED pulse after a send.
    Blink,
    /// How long the `P<program>` readout stays up after a send.
    Readout,
}

/// Debounce timers for every button plus the three controller timers.
pub const TIMER_CAPACITY: usize = BUTTON_COUNT + 3;

/// Fixed-capacity set of pending deadlines.
#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<(TimerId, u64), TIMER_CAPACITY>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `id` to expire at `deadline_ms`, cancelling any previous
    /// deadline for the same id.
    pub fn arm(&mut self, id: TimerId, deadline_ms: u64) {
        self.cancel(id);
        // Capacity covers one entry per TimerId, and the cancel above
        // guarantees `id` is not present.
        let _ = self.pending.push((id, deadline_ms));
    }

    /// Cancel `id`. Returns `true` if it was pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.pending.iter().position(|(t, _)| *t == id) {
            Some(pos) => {
                self.pending.swap_remove(pos);
                true
            }
            None => false,
        }
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.iter().map(|&(_, deadline)| deadline).min()
    }

    /// Remove and return the earliest timer whose deadline is `<= now_ms`.
    ///
    /// Call repeatedly until `None` to drain everything that has expired,
    /// in deadline order.
    pub fn pop_expired(&mut self, now_ms: u64) -> Option<TimerId> {
        let pos = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.1 <= now_ms)
            .min_by_key(|(_, entry)| entry.1)
            .map(|(pos, _)| pos)?;
        Some(self.pending.swap_remove(pos).0)
    }
}

#[cfg(test)]
impl TimerQueue {
    fn is_armed(&self, id: TimerId) -> bool {
        self.pending.iter().any(|(t, _)| *t == id)
    }

    fn deadline(&self, id: TimerId) -> Option<u64> {
        self.pending
            .iter()
            .find(|(t, _)| *t == id)
            .map(|&(_, deadline)| deadline)
    }

    fn len(&self) -> usize {
        self.pending.len()
    }

    fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rearm_replaces_deadline() {
        let mut q = TimerQueue::new();
        q.arm(TimerId::Holdoff, 500);
        q.arm(TimerId::Holdoff, 900);
        assert_eq!(q.len(), 1);
        assert_eq!(q.deadline(TimerId::Holdoff), Some(900));
        assert_eq!(q.pop_expired(600), None);
        assert_eq!(q.pop_expired(900), Some(TimerId::Holdoff));
        assert!(q.is_empty());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut q = TimerQueue::new();
        q.arm(TimerId::Blink, 100);
        assert!(q.cancel(TimerId::Blink));
        assert!(!q.cancel(TimerId::Blink));
        assert_eq!(q.pop_expired(1_000), None);
    }

    #[test]
    fn expired_timers_drain_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.arm(TimerId::Readout, 300);
        q.arm(TimerId::Debounce(Button::PageUp), 120);
        q.arm(TimerId::Blink, 200);
        q.arm(TimerId::Holdoff, 1_000);

        assert_eq!(q.next_deadline(), Some(120));
        assert_eq!(q.pop_expired(500), Some(TimerId::Debounce(Button::PageUp)));
        assert_eq!(q.pop_expired(500), Some(TimerId::Blink));
        assert_eq!(q.pop_expired(500), Some(TimerId::Readout));
        assert_eq!(q.pop_expired(500), None);
        assert!(q.is_armed(TimerId::Holdoff));
    }

    #[test]
    fn every_purpose_fits() {
        let mut q = TimerQueue::new();
        for i in 0..BUTTON_COUNT {
            q.arm(TimerId::Debounce(Button::from_index(i).unwrap()), i as u64);
        }
        q.arm(TimerId::Holdoff, 1);
        q.arm(TimerId::Blink, 1);
        q.arm(TimerId::Readout, 1);
        assert_eq!(q.len(), TIMER_CAPACITY);
    }
}
