//! Delayed timers
//!
//! A timer carries a typed payload that becomes due once its deadline has
//! passed. The owner polls the queue with the current instant and dispatches
//! the due payloads itself, which keeps timer handling free of shared
//! callbacks and makes time fully controllable in tests.

use std::time::{Duration, Instant};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a scheduled timer
    pub struct TimerId;
}

#[derive(Debug)]
struct Timer<T> {
    deadline: Instant,
    /// Tie-breaker for timers sharing a deadline
    sequence: u64,
    payload: T,
}

/// Set of pending timers
#[derive(Debug)]
pub struct TimerQueue<T> {
    timers: SlotMap<TimerId, Timer<T>>,
    next_sequence: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            next_sequence: 0,
        }
    }

    /// Schedule `payload` to become due `delay` after `now`
    pub fn schedule(&mut self, now: Instant, delay: Duration, payload: T) -> TimerId {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.timers.insert(Timer {
            deadline: now + delay,
            sequence,
            payload,
        })
    }

    /// Cancel a timer, returning its payload if it had not fired yet
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        self.timers.remove(id).map(|timer| timer.payload)
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|timer| timer.deadline).min()
    }

    /// Remove and return every payload whose deadline is at or before `now`
    ///
    /// Payloads are returned in deadline order, ties in scheduling order.
    pub fn poll(&mut self, now: Instant) -> Vec<T> {
        let mut due: Vec<(Instant, u64, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.deadline <= now)
            .map(|(id, timer)| (timer.deadline, timer.sequence, id))
            .collect();
        due.sort_by_key(|(deadline, sequence, _)| (*deadline, *sequence));

        due.into_iter()
            .filter_map(|(_, _, id)| self.timers.remove(id))
            .map(|timer| timer.payload)
            .collect()
    }
}
