//! Deferred transitions.
//!
//! A few phase changes happen after a pause rather than on a command:
//! a stuck player turn ends itself, and a won fight opens the reward
//! screen. They wait here on a logical clock that only moves when the
//! host calls `advance`.
//!
//! ```
//! use deck_descent::rules::{Scheduler, Transition};
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.schedule(Transition::EnterReward, 800);
//!
//! assert!(scheduler.advance(500).is_empty());
//! assert_eq!(scheduler.advance(300), vec![(Transition::EnterReward, 800)]);
//! assert!(!scheduler.is_pending());
//! ```

use serde::{Deserialize, Serialize};

/// A phase change waiting for its time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    /// End the player turn if there is still nothing to do.
    AutoEndTurn,
    /// Leave the won fight for the reward screen.
    EnterReward,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Scheduled {
    due_ms: u64,
    transition: Transition,
}

/// Logical clock plus the transitions waiting on it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Scheduler {
    now_ms: u64,
    queue: Vec<Scheduled>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Queue `transition` to fire at `due_ms`. A transition of the same
    /// kind already waiting is replaced.
    pub fn schedule(&mut self, transition: Transition, due_ms: u64) {
        self.queue.retain(|s| s.transition != transition);
        self.queue.push(Scheduled { due_ms, transition });
    }

    /// Move the clock forward and return what became due, earliest first,
    /// with each one's due time.
    pub fn advance(&mut self, ms: u64) -> Vec<(Transition, u64)> {
        self.now_ms += ms;
        let now = self.now_ms;

        let mut due: Vec<Scheduled> = Vec::new();
        self.queue.retain(|s| {
            if s.due_ms <= now {
                due.push(s.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|s| s.due_ms);
        due.into_iter().map(|s| (s.transition, s.due_ms)).collect()
    }

    /// Drop a waiting transition.
    pub fn cancel(&mut self, transition: Transition) {
        self.queue.retain(|s| s.transition != transition);
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    #[must_use]
    pub fn is_scheduled(&self, transition: Transition) -> bool {
        self.queue.iter().any(|s| s.transition == transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Transition::EnterReward, 900);
        scheduler.schedule(Transition::AutoEndTurn, 400);

        let fired = scheduler.advance(1000);

        assert_eq!(fired, vec![(Transition::AutoEndTurn, 400), (Transition::EnterReward, 900)]);
        assert_eq!(scheduler.now_ms(), 1000);
    }

    #[test]
    fn test_reschedule_replaces() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Transition::AutoEndTurn, 100);
        scheduler.schedule(Transition::AutoEndTurn, 300);

        assert!(scheduler.advance(200).is_empty());
        assert_eq!(scheduler.advance(100).len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Transition::EnterReward, 10);
        scheduler.clear();

        assert!(scheduler.advance(100).is_empty());
    }
}
