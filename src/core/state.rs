//! Combat state: the player, the permanent deck, the current encounter.
//!
//! `CombatState` is the single authoritative record the rules mutate. It
//! exists from character selection until the run ends.
//!
//! - `deck`: the permanent deck; grows only between levels (rewards)
//! - `piles`: the deck split into draw / hand / discard for this level
//! - `enemies`: the encounter roster in spawn order; corpses stay until
//!   the next level so ids held by the UI remain valid
//!
//! Uses `im` vectors so snapshots clone in O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::entity::EntityId;
use super::player::Player;
use crate::cards::CardInstance;
use crate::zones::Piles;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CombatState {
    pub player: Player,
    pub deck: Vector<CardInstance>,
    pub piles: Piles,
    pub enemies: Vector<Enemy>,
}

impl CombatState {
    #[must_use]
    pub fn new(player: Player, deck: Vector<CardInstance>) -> Self {
        Self {
            player,
            deck,
            piles: Piles::new(),
            enemies: Vector::new(),
        }
    }

    #[must_use]
    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    /// Living enemy ids, in spawn order.
    #[must_use]
    pub fn living_enemy_ids(&self) -> Vec<EntityId> {
        self.enemies.iter().filter(|e| e.is_alive()).map(|e| e.id).collect()
    }

    #[must_use]
    pub fn living_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }

    /// Whether `id` names an enemy with HP left.
    #[must_use]
    pub fn is_living_enemy(&self, id: EntityId) -> bool {
        self.enemy(id).is_some_and(Enemy::is_alive)
    }

    /// Whether the encounter is won. False for an empty roster.
    #[must_use]
    pub fn all_enemies_dead(&self) -> bool {
        !self.enemies.is_empty() && self.enemies.iter().all(|e| !e.is_alive())
    }

    #[must_use]
    pub fn has_boss(&self) -> bool {
        self.enemies.iter().any(|e| e.is_boss)
    }

    /// Max HP of the first boss in the roster.
    #[must_use]
    pub fn boss_max_hp(&self) -> Option<i32> {
        self.enemies.iter().find(|e| e.is_boss).map(|e| e.max_hp)
    }

    /// Flat bonus to player-sourced damage: held cards plus passive skills.
    #[must_use]
    pub fn player_damage_bonus(&self) -> i32 {
        self.piles.hand_damage_boost() + self.player.passive_damage_bonus()
    }

    /// Whether any card in hand is affordable or any active skill usable.
    #[must_use]
    pub fn has_legal_action(&self) -> bool {
        let energy = self.player.current_energy;
        self.piles.hand().iter().any(|c| c.cost <= energy) || self.player.has_usable_skill()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::enemy::Intent;

    fn state_with_enemies(hps: &[i32]) -> CombatState {
        let mut state = CombatState::new(Player::new("Test", "🙂", 50, 3), Vector::new());
        for (i, hp) in hps.iter().enumerate() {
            let mut enemy = Enemy::new(EntityId(100 + i as u32), "E", 10, Intent::attack(1));
            enemy.current_hp = *hp;
            state.enemies.push_back(enemy);
        }
        state
    }

    #[test]
    fn test_living_enemies() {
        let state = state_with_enemies(&[10, 0, 4]);

        assert_eq!(state.living_enemy_ids(), vec![EntityId(100), EntityId(102)]);
        assert_eq!(state.living_enemy_count(), 2);
        assert!(state.is_living_enemy(EntityId(102)));
        assert!(!state.is_living_enemy(EntityId(101)));
        assert!(!state.is_living_enemy(EntityId(999)));
    }

    #[test]
    fn test_all_dead() {
        assert!(state_with_enemies(&[0, 0]).all_enemies_dead());
        assert!(!state_with_enemies(&[0, 1]).all_enemies_dead());
        assert!(!state_with_enemies(&[]).all_enemies_dead());
    }

    #[test]
    fn test_no_legal_action_with_empty_hand() {
        let state = state_with_enemies(&[10]);
        assert!(!state.has_legal_action());
    }
}
