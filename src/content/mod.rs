//! Read-only game content.
//!
//! The session never hard-codes cards, characters or enemies; it asks a
//! `ContentDatabase`. `StaticContent` serves the built-in tables. Every
//! lookup is keyed by an enum, so a missing entry is a compile error in
//! the exhaustive tables rather than a runtime miss.
//!
//! ## Example
//!
//! ```
//! use deck_descent::cards::CardTemplateId;
//! use deck_descent::content::{CharacterId, ContentDatabase, StaticContent};
//!
//! let content = StaticContent::new();
//!
//! assert_eq!(content.card(CardTemplateId::Strike).cost, 1);
//! assert_eq!(content.character(CharacterId::Warrior).max_hp, 80);
//! assert_eq!(content.reward_pools().cards.len(), 5);
//! ```

mod characters;
mod enemies;

pub use characters::{character_definition, CharacterDefinition, CharacterId};
pub use enemies::{enemy_templates, BossPicker, EnemyProfile, EnemyTemplate, ExternalProfiles, ProfileGenerator};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{CardDefinition, CardRegistry, CardTemplateId};
use crate::skills::{skill_definition, SkillDefinition, SkillTemplateId};

/// What a victory can grant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardPools {
    pub cards: Vec<CardTemplateId>,
    /// Offered only after a boss encounter.
    pub skills: Vec<SkillTemplateId>,
}

impl Default for RewardPools {
    fn default() -> Self {
        Self {
            cards: vec![
                CardTemplateId::RoundhouseKick,
                CardTemplateId::BombToss,
                CardTemplateId::Flex,
                CardTemplateId::Blizzard,
                CardTemplateId::HolyHeal,
            ],
            skills: vec![SkillTemplateId::ThunderStrike, SkillTemplateId::VampiricAura],
        }
    }
}

/// Lookup surface the rules read content through.
pub trait ContentDatabase {
    fn card(&self, id: CardTemplateId) -> &CardDefinition;

    fn character(&self, id: CharacterId) -> &CharacterDefinition;

    fn enemy_templates(&self) -> &[EnemyTemplate];

    fn reward_pools(&self) -> &RewardPools;

    fn skill(&self, id: SkillTemplateId) -> SkillDefinition {
        skill_definition(id)
    }

    /// Templates a summon or the opening spawn may draw minions from.
    fn minion_templates(&self) -> Vec<&EnemyTemplate> {
        self.enemy_templates().iter().filter(|t| !t.is_boss).collect()
    }
}

/// The built-in content tables.
#[derive(Clone, Debug)]
pub struct StaticContent {
    cards: CardRegistry,
    characters: FxHashMap<CharacterId, CharacterDefinition>,
    enemies: Vec<EnemyTemplate>,
    rewards: RewardPools,
}

impl Default for StaticContent {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticContent {
    #[must_use]
    pub fn new() -> Self {
        let characters = CharacterId::ALL
            .iter()
            .map(|&id| (id, character_definition(id)))
            .collect();
        Self {
            cards: CardRegistry::new(),
            characters,
            enemies: enemy_templates(),
            rewards: RewardPools::default(),
        }
    }

    /// Replace the reward pools.
    #[must_use]
    pub fn with_reward_pools(mut self, rewards: RewardPools) -> Self {
        self.rewards = rewards;
        self
    }

    /// Replace the enemy roster.
    #[must_use]
    pub fn with_enemy_templates(mut self, enemies: Vec<EnemyTemplate>) -> Self {
        self.enemies = enemies;
        self
    }

    /// Replace one character's definition.
    #[must_use]
    pub fn with_character(mut self, definition: CharacterDefinition) -> Self {
        self.characters.insert(definition.id, definition);
        self
    }
}

impl ContentDatabase for StaticContent {
    fn card(&self, id: CardTemplateId) -> &CardDefinition {
        self.cards.get(id)
    }

    fn character(&self, id: CharacterId) -> &CharacterDefinition {
        &self.characters[&id]
    }

    fn enemy_templates(&self) -> &[EnemyTemplate] {
        &self.enemies
    }

    fn reward_pools(&self) -> &RewardPools {
        &self.rewards
    }
}
