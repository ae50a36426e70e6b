//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card template.
//! "Strike" costs 1 and deals 6 damage; that is part of the definition.
//! A specific copy sitting in a pile is a `CardInstance`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::effects::Effect;

/// Identifier of a card template.
///
/// Every card the game knows is one variant here, so a lookup can never
/// miss: the catalog builds its table with an exhaustive `match`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardTemplateId {
    // Warrior
    Strike,
    Shuriken,
    Block,
    Uppercut,
    TacticalGrip,
    SpikedShield,
    // Mage
    Fireball,
    FrostNova,
    MagicShield,
    Meditate,
    MoltenCore,
    // Vampire
    Claw,
    DrainLife,
    DarkPact,
    MistForm,
    CursedDoll,
    // Neutral
    Photosynthesis,
    // Rewards
    RoundhouseKick,
    BombToss,
    Flex,
    Blizzard,
    HolyHeal,
}

impl CardTemplateId {
    pub const ALL: [CardTemplateId; 22] = [
        CardTemplateId::Strike,
        CardTemplateId::Shuriken,
        CardTemplateId::Block,
        CardTemplateId::Uppercut,
        CardTemplateId::TacticalGrip,
        CardTemplateId::SpikedShield,
        CardTemplateId::Fireball,
        CardTemplateId::FrostNova,
        CardTemplateId::MagicShield,
        CardTemplateId::Meditate,
        CardTemplateId::MoltenCore,
        CardTemplateId::Claw,
        CardTemplateId::DrainLife,
        CardTemplateId::DarkPact,
        CardTemplateId::MistForm,
        CardTemplateId::CursedDoll,
        CardTemplateId::Photosynthesis,
        CardTemplateId::RoundhouseKick,
        CardTemplateId::BombToss,
        CardTemplateId::Flex,
        CardTemplateId::Blizzard,
        CardTemplateId::HolyHeal,
    ];
}

/// Card category. Only `Attack` consumes DoubleNextAttack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    Attack,
    Skill,
    Power,
}

/// Visual theme, passed through for the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardTheme {
    Physical,
    Fire,
    Ice,
    Holy,
    Dark,
}

/// A bonus a card grants merely by sitting in the hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandPassive {
    /// Flat bonus to all player-sourced damage while held.
    DamageBoost(i32),
    /// Heal this much when the player turn ends with the card in hand.
    HealOnTurnEnd(i32),
    /// Gain this much block when the player turn ends with the card in hand.
    BlockOnTurnEnd(i32),
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use deck_descent::cards::{CardCategory, CardDefinition, CardTemplateId, HandPassive};
/// use deck_descent::effects::Effect;
///
/// let grip = CardDefinition::new(CardTemplateId::TacticalGrip, "Tactical Grip", 1, CardCategory::Skill)
///     .with_effect(Effect::damage(3))
///     .with_passive(HandPassive::DamageBoost(1));
///
/// assert!(grip.needs_target());
/// assert_eq!(grip.passive, Some(HandPassive::DamageBoost(1)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub template: CardTemplateId,
    pub name: String,
    pub description: String,
    pub emoji: String,
    pub cost: i32,
    pub category: CardCategory,
    pub theme: CardTheme,
    /// Resolved strictly in order.
    pub effects: SmallVec<[Effect; 3]>,
    /// Cards sharing a tag can be played together as one combo.
    pub group_tag: Option<String>,
    pub passive: Option<HandPassive>,
}

impl CardDefinition {
    #[must_use]
    pub fn new(template: CardTemplateId, name: impl Into<String>, cost: i32, category: CardCategory) -> Self {
        assert!(cost >= 0, "card cost must be non-negative");
        Self {
            template,
            name: name.into(),
            description: String::new(),
            emoji: String::new(),
            cost,
            category,
            theme: CardTheme::Physical,
            effects: SmallVec::new(),
            group_tag: None,
            passive: None,
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into();
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: CardTheme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_group(mut self, tag: impl Into<String>) -> Self {
        self.group_tag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn with_passive(mut self, passive: HandPassive) -> Self {
        self.passive = Some(passive);
        self
    }

    /// Whether any effect needs an explicit enemy target.
    #[must_use]
    pub fn needs_target(&self) -> bool {
        self.effects.iter().any(Effect::needs_target)
    }
}
