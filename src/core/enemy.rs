//! Enemy records and intents.
//!
//! An enemy's `intent` is what it will do on the next enemy turn; the UI
//! shows it during the player turn. Dead enemies stay in the roster with
//! 0 HP until the level ends, so ids held by the UI stay valid.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use crate::effects::{absorb, Hit};
use crate::status::StatusLedger;

/// Kind of telegraphed action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentKind {
    Attack,
    Defend,
    Buff,
    Summon,
    Special,
}

/// An enemy's next action and its magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Intent {
    pub kind: IntentKind,
    pub value: i32,
}

impl Intent {
    #[must_use]
    pub const fn new(kind: IntentKind, value: i32) -> Self {
        Self { kind, value }
    }

    #[must_use]
    pub const fn attack(value: i32) -> Self {
        Self::new(IntentKind::Attack, value)
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({})", self.kind, self.value)
    }
}

/// One enemy in the encounter.
///
/// ```
/// use deck_descent::core::{Enemy, EntityId, Intent};
///
/// let mut slime = Enemy::new(EntityId(3), "Grumpy Slime", 30, Intent::attack(3));
/// slime.block = 5;
///
/// let hit = slime.take_hit(6);
/// assert_eq!(hit.blocked, 5);
/// assert_eq!(slime.current_hp, 29);
/// assert!(slime.is_alive());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub emoji: String,
    pub max_hp: i32,
    pub current_hp: i32,
    pub block: i32,
    pub statuses: StatusLedger,
    pub intent: Intent,
    pub is_boss: bool,
}

impl Enemy {
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<String>, max_hp: i32, intent: Intent) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            emoji: String::new(),
            max_hp,
            current_hp: max_hp,
            block: 0,
            statuses: StatusLedger::new(),
            intent,
            is_boss: false,
        }
    }

    #[must_use]
    pub fn with_profile(mut self, description: impl Into<String>, emoji: impl Into<String>) -> Self {
        self.description = description.into();
        self.emoji = emoji.into();
        self
    }

    #[must_use]
    pub fn as_boss(mut self) -> Self {
        self.is_boss = true;
        self
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Apply already-computed damage through block.
    pub fn take_hit(&mut self, damage: i32) -> Hit {
        absorb(&mut self.block, &mut self.current_hp, damage)
    }

    /// HP loss that ignores block (Burn).
    pub fn lose_hp(&mut self, amount: i32) -> i32 {
        let lost = amount.max(0).min(self.current_hp);
        self.current_hp -= lost;
        lost
    }

    pub fn gain_block(&mut self, amount: i32) {
        self.block += amount.max(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_hit_without_block() {
        let mut enemy = Enemy::new(EntityId(1), "Target", 20, Intent::attack(5));

        let hit = enemy.take_hit(6);

        assert_eq!(hit, Hit { blocked: 0, hp_lost: 6 });
        assert_eq!(enemy.current_hp, 14);
    }

    #[test]
    fn test_death_floors_hp() {
        let mut enemy = Enemy::new(EntityId(1), "Target", 5, Intent::attack(5));

        enemy.take_hit(50);

        assert_eq!(enemy.current_hp, 0);
        assert!(!enemy.is_alive());
    }

    #[test]
    fn test_lose_hp_ignores_block() {
        let mut enemy = Enemy::new(EntityId(1), "Target", 20, Intent::attack(5));
        enemy.gain_block(10);

        assert_eq!(enemy.lose_hp(3), 3);
        assert_eq!(enemy.block, 10);
        assert_eq!(enemy.current_hp, 17);
    }

    #[test]
    fn test_builders() {
        let boss = Enemy::new(EntityId(2), "996 Overlord", 100, Intent::attack(7))
            .with_profile("Endless projects.", "😈")
            .as_boss();

        assert!(boss.is_boss);
        assert_eq!(boss.emoji, "😈");
        assert_eq!(format!("{}", boss.intent), "Attack(7)");
    }
}
