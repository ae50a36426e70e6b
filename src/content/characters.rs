//! Playable characters.
//!
//! A character fixes the player's HP, energy, starting deck and starting
//! skill. Later characters unlock once the player has reached a level.

use serde::{Deserialize, Serialize};

use crate::cards::CardTemplateId;
use crate::core::{EntityAllocator, Player};
use crate::skills::{Skill, SkillTemplateId};

/// Identifies a playable character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CharacterId {
    Warrior,
    Mage,
    Vampire,
}

impl CharacterId {
    pub const ALL: [CharacterId; 3] = [CharacterId::Warrior, CharacterId::Mage, CharacterId::Vampire];
}

/// Static data for one character.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterDefinition {
    pub id: CharacterId,
    pub name: String,
    pub description: String,
    pub emoji: String,
    pub max_hp: i32,
    pub max_energy: i32,
    /// One entry per copy.
    pub starting_deck: Vec<CardTemplateId>,
    pub initial_skill: SkillTemplateId,
    /// Highest level that must have been reached before the character is
    /// selectable. 0 means always available.
    pub unlock_level: u32,
    pub base_draw_count: usize,
    pub fixed_starting_hand: Vec<CardTemplateId>,
}

impl CharacterDefinition {
    #[must_use]
    pub fn is_unlocked(&self, max_level_reached: u32) -> bool {
        max_level_reached >= self.unlock_level
    }

    /// A fresh player for this character, with its starting skill.
    pub fn new_player(&self, ids: &mut EntityAllocator) -> Player {
        Player::new(self.name.clone(), self.emoji.clone(), self.max_hp, self.max_energy)
            .with_draw_count(self.base_draw_count)
            .with_skill(Skill::from_template(ids.alloc(), self.initial_skill))
            .with_fixed_hand(self.fixed_starting_hand.iter().copied())
    }
}

fn deck(entries: &[(CardTemplateId, usize)]) -> Vec<CardTemplateId> {
    entries
        .iter()
        .flat_map(|&(template, copies)| std::iter::repeat(template).take(copies))
        .collect()
}

/// Definition for `id`.
#[must_use]
pub fn character_definition(id: CharacterId) -> CharacterDefinition {
    use CardTemplateId::*;

    match id {
        CharacterId::Warrior => CharacterDefinition {
            id,
            name: "Warrior".into(),
            description: "A balanced fighter who crushes enemies with physical attacks.".into(),
            emoji: "⚔️".into(),
            max_hp: 80,
            max_energy: 3,
            starting_deck: deck(&[
                (Strike, 10),
                (Shuriken, 4),
                (TacticalGrip, 3),
                (SpikedShield, 3),
                (Block, 6),
                (Uppercut, 4),
            ]),
            initial_skill: SkillTemplateId::PowerSlash,
            unlock_level: 0,
            base_draw_count: 8,
            fixed_starting_hand: Vec::new(),
        },
        CharacterId::Mage => CharacterDefinition {
            id,
            name: "Mage".into(),
            description: "Commands fire and frost from behind a magic shield.".into(),
            emoji: "🧙".into(),
            max_hp: 70,
            max_energy: 3,
            starting_deck: deck(&[
                (Fireball, 10),
                (FrostNova, 4),
                (MagicShield, 6),
                (Meditate, 4),
                (MoltenCore, 3),
                (Photosynthesis, 3),
            ]),
            initial_skill: SkillTemplateId::ArcaneFocus,
            unlock_level: 3,
            base_draw_count: 8,
            fixed_starting_hand: Vec::new(),
        },
        CharacterId::Vampire => CharacterDefinition {
            id,
            name: "Vampire".into(),
            description: "Spends life for power and drains it back from enemies.".into(),
            emoji: "🧛".into(),
            max_hp: 60,
            max_energy: 3,
            starting_deck: deck(&[
                (Claw, 10),
                (DrainLife, 6),
                (CursedDoll, 4),
                (DarkPact, 5),
                (MistForm, 5),
            ]),
            initial_skill: SkillTemplateId::BloodFeast,
            unlock_level: 5,
            base_draw_count: 8,
            fixed_starting_hand: vec![DrainLife],
        },
    }
}
