//! Status ledger: stacking combat modifiers on a combatant.
//!
//! Each holder (the player or an enemy) carries one `StatusLedger`. The
//! ledger keeps at most one entry per `StatusKind`; applying a kind that
//! is already present adds to its value.
//!
//! ## Decay
//!
//! `decay()` runs at the start of the holder's own turn. Every entry loses
//! one stack and entries that reach zero are removed, except:
//! - `Strength` never decays.
//! - `DoubleNextAttack` is consumed by an Attack card, not by time.
//!
//! ```
//! use deck_descent::status::{StatusKind, StatusLedger};
//!
//! let mut ledger = StatusLedger::new();
//! ledger.apply(StatusKind::Weak, 1);
//! ledger.apply(StatusKind::Weak, 2);
//! assert_eq!(ledger.get(StatusKind::Weak), 3);
//! assert_eq!(ledger.len(), 1);
//!
//! ledger.decay();
//! assert_eq!(ledger.get(StatusKind::Weak), 2);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Kinds of status a combatant can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// Takes 50% more damage.
    Vulnerable,
    /// Deals 25% less damage.
    Weak,
    /// Flat bonus to damage dealt. Permanent.
    Strength,
    /// Doubles damage until an Attack card is played.
    DoubleNextAttack,
    /// Loses HP equal to the stack at the start of its turn, ignoring block.
    Burn,
    /// Skips its next action.
    Freeze,
}

impl StatusKind {
    /// All kinds, in display order.
    pub const ALL: [StatusKind; 6] = [
        StatusKind::Vulnerable,
        StatusKind::Weak,
        StatusKind::Strength,
        StatusKind::DoubleNextAttack,
        StatusKind::Burn,
        StatusKind::Freeze,
    ];

    /// Whether this kind loses a stack on turn start.
    #[must_use]
    pub const fn decays(self) -> bool {
        !matches!(self, StatusKind::Strength | StatusKind::DoubleNextAttack)
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StatusKind::Vulnerable => "Vulnerable",
            StatusKind::Weak => "Weak",
            StatusKind::Strength => "Strength",
            StatusKind::DoubleNextAttack => "Double Next Attack",
            StatusKind::Burn => "Burn",
            StatusKind::Freeze => "Freeze",
        };
        f.write_str(name)
    }
}

/// One ledger entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub kind: StatusKind,
    pub value: i32,
}

/// Status entries held by one combatant, in first-applied order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLedger {
    entries: SmallVec<[Status; 4]>,
}

impl StatusLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `value` into the entry for `kind`, creating it if absent.
    ///
    /// Returns the resulting stack value.
    pub fn apply(&mut self, kind: StatusKind, value: i32) -> i32 {
        if let Some(entry) = self.entries.iter_mut().find(|s| s.kind == kind) {
            entry.value += value;
            entry.value
        } else {
            self.entries.push(Status { kind, value });
            value
        }
    }

    /// Stack value for `kind`, or 0 if absent.
    #[must_use]
    pub fn get(&self, kind: StatusKind) -> i32 {
        self.entries
            .iter()
            .find(|s| s.kind == kind)
            .map_or(0, |s| s.value)
    }

    /// Whether an entry for `kind` is present with a positive value.
    #[must_use]
    pub fn has(&self, kind: StatusKind) -> bool {
        self.get(kind) > 0
    }

    /// Remove the entry for `kind`, returning its value if it existed.
    pub fn remove(&mut self, kind: StatusKind) -> Option<i32> {
        let idx = self.entries.iter().position(|s| s.kind == kind)?;
        Some(self.entries.remove(idx).value)
    }

    /// Turn-start decay. See the module docs for which kinds are exempt.
    pub fn decay(&mut self) {
        for entry in self.entries.iter_mut().filter(|s| s.kind.decays()) {
            entry.value -= 1;
        }
        self.entries
            .retain(|s| !s.kind.decays() || s.value > 0);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Status> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_merges() {
        let mut ledger = StatusLedger::new();

        assert_eq!(ledger.apply(StatusKind::Strength, 2), 2);
        assert_eq!(ledger.apply(StatusKind::Strength, 3), 5);
        assert_eq!(ledger.apply(StatusKind::Vulnerable, 1), 1);

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(StatusKind::Strength), 5);
        assert_eq!(ledger.get(StatusKind::Weak), 0);
    }

    #[test]
    fn test_decay_rules() {
        let mut ledger = StatusLedger::new();
        ledger.apply(StatusKind::Strength, 1);
        ledger.apply(StatusKind::DoubleNextAttack, 1);
        ledger.apply(StatusKind::Weak, 1);
        ledger.apply(StatusKind::Burn, 3);

        ledger.decay();

        assert_eq!(ledger.get(StatusKind::Strength), 1);
        assert_eq!(ledger.get(StatusKind::DoubleNextAttack), 1);
        assert!(!ledger.has(StatusKind::Weak));
        assert_eq!(ledger.get(StatusKind::Burn), 2);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_negative_strength_survives_decay() {
        let mut ledger = StatusLedger::new();
        ledger.apply(StatusKind::Strength, -2);

        ledger.decay();

        assert_eq!(ledger.get(StatusKind::Strength), -2);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut ledger = StatusLedger::new();
        ledger.apply(StatusKind::DoubleNextAttack, 1);

        assert_eq!(ledger.remove(StatusKind::DoubleNextAttack), Some(1));
        assert_eq!(ledger.remove(StatusKind::DoubleNextAttack), None);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_order_is_first_applied() {
        let mut ledger = StatusLedger::new();
        ledger.apply(StatusKind::Burn, 1);
        ledger.apply(StatusKind::Weak, 1);
        ledger.apply(StatusKind::Burn, 1);

        let kinds: Vec<_> = ledger.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![StatusKind::Burn, StatusKind::Weak]);
    }
}
