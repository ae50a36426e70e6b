//! Result events for the presentation layer.
//!
//! ## Key Types
//!
//! - `GameEvent`: one state change (damage dealt, status applied, phase change...)
//! - `TimedEvent`: an event stamped with sequence number and presentation offset
//! - `Timeline`: the buffer the session emits into and the UI drains

mod event;
mod timeline;

pub use event::GameEvent;
pub use timeline::{TimedEvent, Timeline};
