//! Ordered, timestamped event buffer.
//!
//! The `Timeline` stamps each event with a sequence number and a
//! presentation offset (`at_ms`). The offset only moves forward: pacing
//! delays (projectile travel, enemy pauses) push the cursor, and events
//! emitted afterwards land later. State never waits on the cursor.
//!
//! ```
//! use deck_descent::events::{GameEvent, Timeline};
//!
//! let mut timeline = Timeline::new();
//! timeline.emit(GameEvent::DeckReshuffled);
//! timeline.wait(300);
//! timeline.emit(GameEvent::TurnStarted { turn: 1 });
//!
//! let events = timeline.drain();
//! assert_eq!(events[0].at_ms, 0);
//! assert_eq!(events[1].at_ms, 300);
//! assert!(events[0].seq < events[1].seq);
//! assert!(timeline.is_empty());
//! ```

use serde::{Deserialize, Serialize};

use super::event::GameEvent;

/// An event with its ordering and pacing stamps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEvent {
    /// Strictly increasing across the session.
    pub seq: u64,
    /// When the presentation layer should show it.
    pub at_ms: u64,
    pub event: GameEvent,
}

/// Pending events plus the presentation cursor.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Timeline {
    next_seq: u64,
    cursor_ms: u64,
    pending: Vec<TimedEvent>,
}

impl Timeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event at the current cursor.
    pub fn emit(&mut self, event: GameEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(TimedEvent {
            seq,
            at_ms: self.cursor_ms,
            event,
        });
    }

    /// Push the cursor forward by a pacing delay.
    pub fn wait(&mut self, ms: u64) {
        self.cursor_ms += ms;
    }

    /// Bring the cursor up to `now_ms` if it is behind.
    pub fn catch_up(&mut self, now_ms: u64) {
        self.cursor_ms = self.cursor_ms.max(now_ms);
    }

    #[must_use]
    pub fn cursor_ms(&self) -> u64 {
        self.cursor_ms
    }

    /// Hand over every pending event, in order.
    pub fn drain(&mut self) -> Vec<TimedEvent> {
        std::mem::take(&mut self.pending)
    }

    #[must_use]
    pub fn pending(&self) -> &[TimedEvent] {
        &self.pending
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
