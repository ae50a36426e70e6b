//! Meta-progression: the highest level the player has reached.
//!
//! The session reports every level increment through `ProgressStore` and
//! reads it back to decide which characters are unlocked. Where the
//! number is kept (a file, local storage, a server) is up to the
//! implementation.

use serde::{Deserialize, Serialize};

/// Where the session reports level progress.
pub trait ProgressStore {
    /// Called every time the player reaches `level`.
    fn record_level(&mut self, level: u32);

    /// Highest level ever recorded.
    fn max_level_reached(&self) -> u32;
}

/// Keeps progress in memory for the lifetime of the value.
///
/// ```
/// use deck_descent::progress::{MemoryProgress, ProgressStore};
///
/// let mut progress = MemoryProgress::new();
/// progress.record_level(4);
/// progress.record_level(2);
/// assert_eq!(progress.max_level_reached(), 4);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryProgress {
    max_level: u32,
}

impl MemoryProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `level` already reached.
    #[must_use]
    pub fn starting_at(level: u32) -> Self {
        Self { max_level: level }
    }
}

impl ProgressStore for MemoryProgress {
    fn record_level(&mut self, level: u32) {
        if level > self.max_level {
            tracing::info!(level, "new best level");
            self.max_level = level;
        }
    }

    fn max_level_reached(&self) -> u32 {
        self.max_level
    }
}
