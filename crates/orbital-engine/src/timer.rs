//! Owned one-shot timers on a logical clock.
//!
//! Nothing here reads the wall clock. The owner moves time forward with
//! [`Timers::advance`] and receives the payloads of every timer that came due.
//! Dropping a `Timers` drops every pending timer with it.

use std::time::Duration;

/// Handle for cancelling a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Scheduled<T> {
    id: TimerId,
    due: Duration,
    payload: T,
}

/// A queue of one-shot timers.
#[derive(Debug)]
pub struct Timers<T> {
    now: Duration,
    next_id: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timers<T> {
    /// Create an empty queue at logical time zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Current logical time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers that have not fired or been cancelled.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if no timers are pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Check if a timer is still pending.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|s| s.id == id)
    }

    /// Due time of the earliest pending timer.
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|s| s.due).min()
    }

    /// Schedule `payload` to fire `delay` from now.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            id,
            due: self.now + delay,
            payload,
        });
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.id != id);
        self.pending.len() != before
    }

    /// Cancel every pending timer, returning how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    /// Move the clock forward and collect the payloads that came due.
    ///
    /// Payloads are returned in due order; timers due at the same instant
    /// fire in the order they were scheduled.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<T> {
        self.now += elapsed;
        let now = self.now;

        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due <= now {
                due.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }

        due.sort_by_key(|s| (s.due, s.id));
        due.into_iter().map(|s| s.payload).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_when_due() {
        let mut timers = Timers::new();
        timers.schedule(ms(600), "rearrange");

        assert!(timers.advance(ms(599)).is_empty());
        assert_eq!(timers.advance(ms(1)), vec!["rearrange"]);
        assert!(timers.is_empty());
        assert_eq!(timers.now(), ms(600));
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut timers = Timers::new();
        timers.schedule(ms(1200), "card");
        timers.schedule(ms(600), "rearrange");
        timers.schedule(ms(600), "second");

        assert_eq!(timers.next_due(), Some(ms(600)));
        assert_eq!(timers.advance(ms(2000)), vec!["rearrange", "second", "card"]);
    }

    #[test]
    fn test_cancel() {
        let mut timers = Timers::new();
        let a = timers.schedule(ms(10), 1);
        let b = timers.schedule(ms(20), 2);

        assert!(timers.cancel(a));
        assert!(!timers.cancel(a));
        assert!(!timers.is_pending(a));
        assert!(timers.is_pending(b));
        assert_eq!(timers.advance(ms(50)), vec![2]);
        assert!(!timers.cancel(b));
    }

    #[test]
    fn test_cancel_all() {
        let mut timers = Timers::new();
        timers.schedule(ms(10), ());
        timers.schedule(ms(20), ());
        assert_eq!(timers.len(), 2);
        assert_eq!(timers.cancel_all(), 2);
        assert!(timers.advance(ms(100)).is_empty());
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut timers = Timers::new();
        timers.advance(ms(1000));
        timers.schedule(ms(100), 'x');
        assert_eq!(timers.next_due(), Some(ms(1100)));
        assert!(timers.advance(ms(99)).is_empty());
        assert_eq!(timers.advance(ms(1)), vec!['x']);
    }
}
