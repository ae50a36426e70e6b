//! Encounters and rewards.
//!
//! A level's encounter is one leader built from the generated profile
//! plus a handful of minions. Everything scales off the level number
//! through `RulesConfig`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::enemy_ai::spawn_minion;
use crate::cards::CardTemplateId;
use crate::content::{EnemyProfile, EnemyTemplate, RewardPools};
use crate::core::{Enemy, EntityAllocator, GameRng, Intent, RulesConfig};
use crate::skills::SkillTemplateId;

/// Build the encounter for `level`.
///
/// The leader takes the profile's identity with the level's boss HP and
/// opening attack. Minions get a fraction of that HP.
pub fn spawn_encounter(
    profile: &EnemyProfile,
    level: u32,
    config: &RulesConfig,
    minions: &[&EnemyTemplate],
    ids: &mut EntityAllocator,
    rng: &mut GameRng,
) -> Vector<Enemy> {
    let boss_hp = config.boss_hp(level).max(1);
    let mut leader = Enemy::new(ids.alloc(), profile.name.clone(), boss_hp, Intent::attack(config.boss_attack(level)))
        .with_profile(profile.description.clone(), profile.emoji.clone());
    leader.is_boss = profile.is_boss;

    let mut roster = Vector::new();
    roster.push_back(leader);

    let (min, max) = config.initial_minions;
    let count = rng.gen_range_inclusive(min..=max);
    for _ in 0..count {
        if let Some(template) = rng.choose(minions) {
            roster.push_back(spawn_minion(ids.alloc(), template, config.minion_hp(boss_hp), level, config));
        }
    }

    tracing::debug!(level, boss_hp, minions = roster.len() - 1, "encounter spawned");
    roster
}

/// Choices offered after a won fight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardOffer {
    pub cards: Vec<CardTemplateId>,
    /// Present only after a boss fight.
    pub skill: Option<SkillTemplateId>,
}

/// What the player picked from a `RewardOffer`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardChoice {
    /// Index into `RewardOffer::cards`.
    Card(usize),
    Skill,
}

/// Roll `count` card choices with replacement, plus a skill if a boss fell.
pub fn roll_rewards(pools: &RewardPools, count: usize, boss_defeated: bool, rng: &mut GameRng) -> RewardOffer {
    let cards = (0..count).filter_map(|_| rng.choose(&pools.cards).copied()).collect();
    let skill = if boss_defeated {
        rng.choose(&pools.skills).copied()
    } else {
        None
    };
    RewardOffer { cards, skill }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::enemy_templates;
    use crate::core::EntityId;
    use rustc_hash::FxHashSet;

    fn profile() -> EnemyProfile {
        EnemyProfile {
            name: "Ancient Dragon".into(),
            description: "Guards its snacks.".into(),
            emoji: "🐉".into(),
            is_boss: true,
        }
    }

    #[test]
    fn test_encounter_scaling() {
        let templates = enemy_templates();
        let minions: Vec<&EnemyTemplate> = templates.iter().filter(|t| !t.is_boss).collect();
        let config = RulesConfig::default();
        let mut ids = EntityAllocator::new();
        let mut rng = GameRng::new(1);

        let roster = spawn_encounter(&profile(), 2, &config, &minions, &mut ids, &mut rng);

        let boss = &roster[0];
        assert!(boss.is_boss);
        assert_eq!(boss.max_hp, 114);
        assert_eq!(boss.intent, Intent::attack(9));
        assert!((2..=3).contains(&roster.len()));
        for minion in roster.iter().skip(1) {
            assert!(!minion.is_boss);
            assert_eq!(minion.max_hp, 34);
            assert_eq!(minion.intent, Intent::attack(4));
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let templates = enemy_templates();
        let minions: Vec<&EnemyTemplate> = templates.iter().filter(|t| !t.is_boss).collect();
        let config = RulesConfig::default().with_initial_minions(2, 2);
        let mut ids = EntityAllocator::new();
        let mut rng = GameRng::new(1);

        let roster = spawn_encounter(&profile(), 1, &config, &minions, &mut ids, &mut rng);

        let seen: FxHashSet<EntityId> = roster.iter().map(|e| e.id).collect();
        assert_eq!(roster.len(), 3);
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_rewards() {
        let pools = RewardPools::default();
        let mut rng = GameRng::new(2);

        let plain = roll_rewards(&pools, 3, false, &mut rng);
        assert_eq!(plain.cards.len(), 3);
        assert!(plain.cards.iter().all(|c| pools.cards.contains(c)));
        assert!(plain.skill.is_none());

        let boss = roll_rewards(&pools, 3, true, &mut rng);
        assert!(boss.skill.is_some());
    }
}
