//! Damage calculator.
//!
//! `compute_damage` is a pure function of a base value and snapshots of
//! the source's and target's modifiers. Order of application:
//!
//! 1. `base + strength + flat_bonus` (flat bonus = hand passives and
//!    passive skills, player-sourced only)
//! 2. Weak: `× 0.75`, floored
//! 3. DoubleNextAttack: `× 2`
//! 4. Vulnerable on the target: `× 1.5`, floored
//! 5. Clamp at 0
//!
//! Block absorption is a separate step (`absorb`), applied by the caller.
//!
//! ```
//! use deck_descent::effects::{compute_damage, SourceModifiers, TargetModifiers};
//!
//! let source = SourceModifiers { strength: 2, weak: true, ..Default::default() };
//! assert_eq!(compute_damage(10, &source, &TargetModifiers::default()), 9);
//!
//! let target = TargetModifiers { vulnerable: true };
//! assert_eq!(compute_damage(10, &SourceModifiers::default(), &target), 15);
//! ```

use serde::{Deserialize, Serialize};

use crate::status::{StatusKind, StatusLedger};

/// Offensive modifiers of whoever deals the damage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceModifiers {
    pub strength: i32,
    pub flat_bonus: i32,
    pub weak: bool,
    pub doubled: bool,
}

impl SourceModifiers {
    /// Read strength, weak and double-attack off a ledger.
    #[must_use]
    pub fn from_ledger(statuses: &StatusLedger) -> Self {
        Self {
            strength: statuses.get(StatusKind::Strength),
            flat_bonus: 0,
            weak: statuses.has(StatusKind::Weak),
            doubled: statuses.has(StatusKind::DoubleNextAttack),
        }
    }

    #[must_use]
    pub fn with_flat_bonus(mut self, bonus: i32) -> Self {
        self.flat_bonus = bonus;
        self
    }
}

/// Defensive modifiers of whoever takes the damage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetModifiers {
    pub vulnerable: bool,
}

impl TargetModifiers {
    #[must_use]
    pub fn from_ledger(statuses: &StatusLedger) -> Self {
        Self {
            vulnerable: statuses.has(StatusKind::Vulnerable),
        }
    }
}

/// Final damage before block. Never negative.
#[must_use]
pub fn compute_damage(base: i32, source: &SourceModifiers, target: &TargetModifiers) -> i32 {
    let mut total = base + source.strength + source.flat_bonus;

    if source.weak {
        total = (f64::from(total) * 0.75).floor() as i32;
    }
    if source.doubled {
        total *= 2;
    }
    if target.vulnerable {
        total = (f64::from(total) * 1.5).floor() as i32;
    }

    total.max(0)
}

/// How a hit split between block and HP.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    pub blocked: i32,
    pub hp_lost: i32,
}

/// Absorb `damage` with `block` first, then subtract the rest from `hp`.
///
/// HP floors at 0; block is consumed 1:1 down to 0.
pub fn absorb(block: &mut i32, hp: &mut i32, damage: i32) -> Hit {
    let damage = damage.max(0);
    let blocked = damage.min(*block);
    *block -= blocked;

    let remainder = damage - blocked;
    let hp_lost = remainder.min(*hp);
    *hp -= hp_lost;

    Hit { blocked, hp_lost }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_damage() {
        let dmg = compute_damage(6, &SourceModifiers::default(), &TargetModifiers::default());
        assert_eq!(dmg, 6);
    }

    #[test]
    fn test_strength_then_weak() {
        let source = SourceModifiers {
            strength: 2,
            weak: true,
            ..Default::default()
        };
        assert_eq!(compute_damage(10, &source, &TargetModifiers::default()), 9);
    }

    #[test]
    fn test_flat_bonus_before_weak() {
        let source = SourceModifiers {
            flat_bonus: 2,
            weak: true,
            ..Default::default()
        };
        // (6 + 2) * 0.75 = 6
        assert_eq!(compute_damage(6, &source, &TargetModifiers::default()), 6);
    }

    #[test]
    fn test_double_then_vulnerable() {
        let source = SourceModifiers {
            doubled: true,
            ..Default::default()
        };
        let target = TargetModifiers { vulnerable: true };
        // 5 * 2 = 10, * 1.5 = 15
        assert_eq!(compute_damage(5, &source, &target), 15);
    }

    #[test]
    fn test_vulnerable_floors() {
        let target = TargetModifiers { vulnerable: true };
        assert_eq!(compute_damage(7, &SourceModifiers::default(), &target), 10);
    }

    #[test]
    fn test_never_negative() {
        let source = SourceModifiers {
            strength: -10,
            ..Default::default()
        };
        assert_eq!(compute_damage(3, &source, &TargetModifiers::default()), 0);
    }

    #[test]
    fn test_from_ledger() {
        let mut ledger = StatusLedger::new();
        ledger.apply(StatusKind::Strength, 3);
        ledger.apply(StatusKind::Weak, 1);
        ledger.apply(StatusKind::Vulnerable, 2);

        let source = SourceModifiers::from_ledger(&ledger);
        assert_eq!(source.strength, 3);
        assert!(source.weak);
        assert!(!source.doubled);
        assert!(TargetModifiers::from_ledger(&ledger).vulnerable);
    }

    #[test]
    fn test_absorb_partial() {
        let mut block = 5;
        let mut hp = 20;

        let hit = absorb(&mut block, &mut hp, 6);

        assert_eq!(hit, Hit { blocked: 5, hp_lost: 1 });
        assert_eq!(block, 0);
        assert_eq!(hp, 19);
    }

    #[test]
    fn test_absorb_fully_blocked() {
        let mut block = 10;
        let mut hp = 20;

        let hit = absorb(&mut block, &mut hp, 4);

        assert_eq!(hit.hp_lost, 0);
        assert_eq!(block, 6);
        assert_eq!(hp, 20);
    }

    #[test]
    fn test_absorb_floors_hp() {
        let mut block = 0;
        let mut hp = 3;

        let hit = absorb(&mut block, &mut hp, 50);

        assert_eq!(hit.hp_lost, 3);
        assert_eq!(hp, 0);
    }
}
