//! Cancellable timers driven by host frame time.
//!
//! The timeline never reads a clock; the host advances it with the elapsed
//! frame delta, so the same sequence of `advance` calls always fires the same
//! tasks in the same order.

use std::time::Duration;

use tracing::debug;

/// Handle returned by [`Timeline::schedule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Timer<T> {
    id: TimerId,
    due: Duration,
    task: T,
}

/// Pending tasks keyed by deadline.
#[derive(Debug)]
pub struct Timeline<T> {
    now: Duration,
    next_id: u64,
    timers: Vec<Timer<T>>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            timers: Vec::new(),
        }
    }

    /// Time elapsed since the timeline was created
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` once `delay` has elapsed.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now.saturating_add(delay);
        debug!(timer = id.0, due_ms = due.as_millis() as u64, "Timer scheduled");
        self.timers.push(Timer { id, due, task });
        id
    }

    /// Drop a pending timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        let removed = self.timers.len() != before;
        if removed {
            debug!(timer = id.0, "Timer cancelled");
        }
        removed
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Time left before `id` fires
    pub fn remaining(&self, id: TimerId) -> Option<Duration> {
        self.timers
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.due.saturating_sub(self.now))
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Move time forward by `dt` and take every task that is now due.
    ///
    /// Tasks come back ordered by deadline; timers sharing a deadline keep
    /// the order they were scheduled in.
    pub fn advance(&mut self, dt: Duration) -> Vec<T> {
        self.now = self.now.saturating_add(dt);
        let now = self.now;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|t| t.due <= now);
        self.timers = pending;

        due.sort_by_key(|t| (t.due, t.id));
        due.into_iter().map(|t| t.task).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(ms(300), "late");
        timeline.schedule(ms(100), "early");
        timeline.schedule(ms(200), "middle");

        assert!(timeline.advance(ms(50)).is_empty());
        assert_eq!(timeline.advance(ms(500)), vec!["early", "middle", "late"]);
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_ties_keep_schedule_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(ms(100), 1);
        timeline.schedule(ms(100), 2);
        timeline.schedule(ms(100), 3);
        assert_eq!(timeline.advance(ms(100)), vec![1, 2, 3]);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timeline = Timeline::new();
        let keep = timeline.schedule(ms(100), "keep");
        let drop = timeline.schedule(ms(100), "drop");

        assert!(timeline.cancel(drop));
        assert!(!timeline.cancel(drop));
        assert!(timeline.is_pending(keep));
        assert_eq!(timeline.advance(ms(200)), vec!["keep"]);
        assert!(!timeline.cancel(keep));
    }

    #[test]
    fn test_delay_is_relative_to_current_time() {
        let mut timeline = Timeline::new();
        timeline.advance(ms(1_000));
        let id = timeline.schedule(ms(500), ());
        assert_eq!(timeline.remaining(id), Some(ms(500)));

        assert!(timeline.advance(ms(499)).is_empty());
        assert_eq!(timeline.remaining(id), Some(ms(1)));
        assert_eq!(timeline.advance(ms(1)).len(), 1);
        assert_eq!(timeline.now(), ms(1_500));
    }

    #[test]
    fn test_huge_delay_stays_pending() {
        let mut timeline = Timeline::new();
        timeline.advance(ms(10));
        let id = timeline.schedule(Duration::MAX, "far");
        assert!(timeline.advance(ms(1_000)).is_empty());
        assert!(timeline.is_pending(id));

        assert_eq!(timeline.advance(Duration::MAX), vec!["far"]);
        assert_eq!(timeline.now(), Duration::MAX);
    }

    #[test]
    fn test_zero_delay_fires_on_next_advance() {
        let mut timeline = Timeline::new();
        timeline.schedule(Duration::ZERO, "now");
        assert_eq!(timeline.advance(Duration::ZERO), vec!["now"]);
    }
}
