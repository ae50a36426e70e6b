//! The player record.
//!
//! Exactly one `Player` exists per session. It owns HP, energy, block,
//! statuses and skills; the deck lives in the session's piles, not here.
//!
//! ## Invariants
//!
//! - `0 <= current_hp <= max_hp` after every mutation (heal caps, damage floors).
//! - `current_energy` can exceed `max_energy` (AddEnergy overflow) but is
//!   never driven negative: costs are validated before they are spent.

use serde::{Deserialize, Serialize};

use crate::cards::CardTemplateId;
use crate::effects::{absorb, Hit};
use crate::skills::{PassiveEffect, Skill};
use crate::status::StatusLedger;

/// The player's combat record.
///
/// ## Example
///
/// ```
/// use deck_descent::core::Player;
///
/// let mut player = Player::new("Warrior", "⚔️", 80, 3);
/// player.gain_block(5);
///
/// let hit = player.take_hit(8);
/// assert_eq!(hit.blocked, 5);
/// assert_eq!(player.current_hp, 77);
///
/// assert_eq!(player.heal(10), 3);
/// assert_eq!(player.current_hp, 80);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub emoji: String,
    pub max_hp: i32,
    pub current_hp: i32,
    pub max_energy: i32,
    pub current_energy: i32,
    pub block: i32,
    pub statuses: StatusLedger,
    pub skills: Vec<Skill>,
    /// Hand size topped up to at every player turn start.
    pub base_draw_count: usize,
    /// Templates pulled into the opening hand before the random deal.
    pub fixed_starting_hand: Vec<CardTemplateId>,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>, emoji: impl Into<String>, max_hp: i32, max_energy: i32) -> Self {
        assert!(max_hp > 0, "player max HP must be positive");
        Self {
            name: name.into(),
            emoji: emoji.into(),
            max_hp,
            current_hp: max_hp,
            max_energy,
            current_energy: max_energy,
            block: 0,
            statuses: StatusLedger::new(),
            skills: Vec::new(),
            base_draw_count: 5,
            fixed_starting_hand: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_draw_count(mut self, count: usize) -> Self {
        self.base_draw_count = count;
        self
    }

    #[must_use]
    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }

    #[must_use]
    pub fn with_fixed_hand(mut self, templates: impl IntoIterator<Item = CardTemplateId>) -> Self {
        self.fixed_starting_hand = templates.into_iter().collect();
        self
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.current_hp <= 0
    }

    /// Restore HP up to max. Returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current_hp;
        self.current_hp = (self.current_hp + amount.max(0)).min(self.max_hp);
        self.current_hp - before
    }

    pub fn gain_block(&mut self, amount: i32) {
        self.block += amount.max(0);
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

    /// Whether `cost` can be paid from current energy.
    #[must_use]
    pub fn can_afford(&self, cost: i32) -> bool {
        cost <= self.current_energy
    }

    /// Spend energy. Callers validate with `can_afford` first.
    pub fn spend_energy(&mut self, cost: i32) {
        debug_assert!(self.can_afford(cost), "spending more energy than available");
        self.current_energy -= cost;
    }

    /// Sum of passive-skill damage boosts.
    #[must_use]
    pub fn passive_damage_bonus(&self) -> i32 {
        self.skills
            .iter()
            .filter_map(Skill::passive)
            .map(|p| match p {
                PassiveEffect::DamageBoost(n) => n,
                PassiveEffect::HealOnTurnEnd(_) => 0,
            })
            .sum()
    }

    /// Sum of passive-skill end-of-turn heals.
    #[must_use]
    pub fn passive_turn_end_heal(&self) -> i32 {
        self.skills
            .iter()
            .filter_map(Skill::passive)
            .map(|p| match p {
                PassiveEffect::HealOnTurnEnd(n) => n,
                PassiveEffect::DamageBoost(_) => 0,
            })
            .sum()
    }

    /// Whether any active skill is off cooldown and affordable.
    #[must_use]
    pub fn has_usable_skill(&self) -> bool {
        self.skills.iter().any(|s| s.is_usable(self.current_energy))
    }
}
