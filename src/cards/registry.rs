//! Card registry for definition lookup.
//!
//! `card_definition` is the authoring table: one exhaustive `match` arm per
//! `CardTemplateId`, so adding a template without data fails to compile.
//! `CardRegistry` builds every definition once at startup and serves
//! borrowed lookups from an `FxHashMap`.

use rustc_hash::FxHashMap;

use super::definition::{CardCategory, CardDefinition, CardTemplateId, CardTheme, HandPassive};
use crate::effects::{Effect, TargetSelector};
use crate::status::StatusKind;

/// Build the definition for a template.
#[must_use]
pub fn card_definition(id: CardTemplateId) -> CardDefinition {
    use CardCategory::{Attack, Power, Skill};
    use CardTemplateId as C;

    match id {
        C::Strike => CardDefinition::new(id, "Strike", 1, Attack)
            .with_effect(Effect::damage(6))
            .with_description("Deal 6 damage.")
            .with_emoji("🥊"),
        C::Shuriken => CardDefinition::new(id, "Shuriken", 0, Attack)
            .with_effect(Effect::damage(3))
            .with_group("shuriken")
            .with_description("Deal 3 damage. Combo: plays every Shuriken in hand.")
            .with_emoji("💠"),
        C::Block => CardDefinition::new(id, "Cardboard Shield", 1, Skill)
            .with_effect(Effect::block(5))
            .with_description("Gain 5 block.")
            .with_emoji("📦"),
        C::Uppercut => CardDefinition::new(id, "Uppercut", 2, Attack)
            .with_effect(Effect::damage(12))
            .with_theme(CardTheme::Fire)
            .with_description("Deal 12 damage.")
            .with_emoji("☄️"),
        C::TacticalGrip => CardDefinition::new(id, "Tactical Grip", 1, Skill)
            .with_effect(Effect::damage(3))
            .with_passive(HandPassive::DamageBoost(1))
            .with_description("Deal 3 damage. Held: other attacks deal +1.")
            .with_emoji("✊"),
        C::SpikedShield => CardDefinition::new(id, "Spiked Shield", 2, Attack)
            .with_effect(Effect::damage(5))
            .with_effect(Effect::block(5))
            .with_passive(HandPassive::BlockOnTurnEnd(3))
            .with_description("Deal 5 damage, gain 5 block. Held: +3 block at turn end.")
            .with_emoji("🛡️"),

        C::Fireball => CardDefinition::new(id, "Fireball", 1, Attack)
            .with_effect(Effect::damage(8))
            .with_effect(Effect::status(StatusKind::Burn, 2, TargetSelector::SingleEnemy))
            .with_theme(CardTheme::Fire)
            .with_description("Deal 8 damage and apply 2 Burn.")
            .with_emoji("🔥"),
        C::FrostNova => CardDefinition::new(id, "Frost Nova", 2, Attack)
            .with_effect(Effect::damage_all(4))
            .with_effect(Effect::status(StatusKind::Weak, 1, TargetSelector::AllEnemies))
            .with_theme(CardTheme::Ice)
            .with_description("Deal 4 damage to all enemies and apply 1 Weak.")
            .with_emoji("❄️"),
        C::MagicShield => CardDefinition::new(id, "Magic Shield", 1, Skill)
            .with_effect(Effect::block(8))
            .with_theme(CardTheme::Holy)
            .with_description("Gain 8 block.")
            .with_emoji("🛡️"),
        C::Meditate => CardDefinition::new(id, "Meditate", 0, Skill)
            .with_effect(Effect::energy(1))
            .with_theme(CardTheme::Holy)
            .with_description("Gain 1 energy.")
            .with_emoji("🧘"),
        C::MoltenCore => CardDefinition::new(id, "Molten Core", 3, Power)
            .with_effect(Effect::status(StatusKind::Burn, 3, TargetSelector::AllEnemies))
            .with_passive(HandPassive::DamageBoost(2))
            .with_theme(CardTheme::Fire)
            .with_description("Apply 3 Burn to all enemies. Held: attacks deal +2.")
            .with_emoji("🌋"),

        C::Claw => CardDefinition::new(id, "Claw", 0, Attack)
            .with_effect(Effect::damage(4))
            .with_theme(CardTheme::Dark)
            .with_description("Deal 4 damage.")
            .with_emoji("💅"),
        C::DrainLife => CardDefinition::new(id, "Drain Life", 1, Attack)
            .with_effect(Effect::damage(5))
            .with_effect(Effect::heal(2))
            .with_theme(CardTheme::Dark)
            .with_description("Deal 5 damage, heal 2.")
            .with_emoji("🍷"),
        C::DarkPact => CardDefinition::new(id, "Dark Pact", 0, Skill)
            .with_effect(Effect::self_damage(3))
            .with_effect(Effect::draw(2))
            .with_effect(Effect::energy(1))
            .with_theme(CardTheme::Dark)
            .with_description("Take 3 damage, draw 2 cards, gain 1 energy.")
            .with_emoji("📜"),
        C::MistForm => CardDefinition::new(id, "Mist Form", 1, Skill)
            .with_effect(Effect::block(10))
            .with_theme(CardTheme::Dark)
            .with_description("Gain 10 block.")
            .with_emoji("🌫️"),
        C::CursedDoll => CardDefinition::new(id, "Cursed Doll", 2, Skill)
            .with_effect(Effect::damage(10))
            .with_passive(HandPassive::HealOnTurnEnd(2))
            .with_theme(CardTheme::Dark)
            .with_description("Deal 10 damage. Held: heal 2 at turn end.")
            .with_emoji("🧸"),

        C::Photosynthesis => CardDefinition::new(id, "Photosynthesis", 0, Skill)
            .with_effect(Effect::energy(2))
            .with_passive(HandPassive::HealOnTurnEnd(2))
            .with_theme(CardTheme::Holy)
            .with_description("Gain 2 energy. Held: heal 2 at turn end.")
            .with_emoji("🌱"),

        C::RoundhouseKick => CardDefinition::new(id, "Roundhouse Kick", 1, Attack)
            .with_effect(Effect::damage_all(5))
            .with_description("Deal 5 damage to all enemies.")
            .with_emoji("🦶"),
        C::BombToss => CardDefinition::new(id, "Bomb Toss", 2, Attack)
            .with_effect(Effect::damage_random(18))
            .with_theme(CardTheme::Fire)
            .with_description("Deal 18 damage to a random enemy.")
            .with_emoji("💣"),
        C::Flex => CardDefinition::new(id, "Flex", 1, Skill)
            .with_effect(Effect::status(StatusKind::Strength, 2, TargetSelector::SelfTarget))
            .with_description("Gain 2 Strength.")
            .with_emoji("💪"),
        C::Blizzard => CardDefinition::new(id, "Blizzard", 2, Attack)
            .with_effect(Effect::damage_all(5))
            .with_effect(Effect::status(StatusKind::Weak, 2, TargetSelector::AllEnemies))
            .with_theme(CardTheme::Ice)
            .with_description("Deal 5 damage to all enemies and apply 2 Weak.")
            .with_emoji("🌨️"),
        C::HolyHeal => CardDefinition::new(id, "Holy Heal", 1, Skill)
            .with_effect(Effect::heal(8))
            .with_theme(CardTheme::Holy)
            .with_description("Heal 8.")
            .with_emoji("🩹"),
    }
}

/// Registry of every card definition, built once.
///
/// ## Example
///
/// ```
/// use deck_descent::cards::{CardRegistry, CardTemplateId};
///
/// let registry = CardRegistry::new();
///
/// let strike = registry.get(CardTemplateId::Strike);
/// assert_eq!(strike.name, "Strike");
/// assert_eq!(strike.cost, 1);
/// ```
#[derive(Clone, Debug)]
pub struct CardRegistry {
    cards: FxHashMap<CardTemplateId, CardDefinition>,
}

impl Default for CardRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CardRegistry {
    /// Build every definition.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            cards: FxHashMap::default(),
        };
        for id in CardTemplateId::ALL {
            registry.register(card_definition(id));
        }
        registry
    }

    /// Panics if the template is already registered.
    fn register(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.template) {
            panic!("Card {:?} already registered", card.template);
        }
        self.cards.insert(card.template, card);
    }

    /// Definition for a template.
    #[must_use]
    pub fn get(&self, id: CardTemplateId) -> &CardDefinition {
        &self.cards[&id]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all definitions (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Find definitions matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardDefinition>
    where
        F: Fn(&CardDefinition) -> bool,
    {
        self.cards.values().filter(move |c| predicate(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::EffectKind;

    #[test]
    fn test_every_template_registered() {
        let registry = CardRegistry::new();
        assert_eq!(registry.len(), CardTemplateId::ALL.len());

        for id in CardTemplateId::ALL {
            assert_eq!(registry.get(id).template, id);
            assert!(!registry.get(id).effects.is_empty(), "{:?} has no effects", id);
        }
    }

    #[test]
    fn test_costs_and_categories() {
        let registry = CardRegistry::new();

        assert_eq!(registry.get(CardTemplateId::Strike).cost, 1);
        assert_eq!(registry.get(CardTemplateId::Shuriken).cost, 0);
        assert_eq!(registry.get(CardTemplateId::MoltenCore).cost, 3);
        assert_eq!(registry.get(CardTemplateId::MoltenCore).category, CardCategory::Power);
        assert_eq!(registry.get(CardTemplateId::SpikedShield).category, CardCategory::Attack);
        assert_eq!(registry.get(CardTemplateId::CursedDoll).category, CardCategory::Skill);
    }

    #[test]
    fn test_dark_pact_order() {
        let pact = card_definition(CardTemplateId::DarkPact);
        let kinds: Vec<_> = pact.effects.iter().map(|e| e.kind).collect();

        assert_eq!(kinds, vec![EffectKind::Damage, EffectKind::Draw, EffectKind::AddEnergy]);
        assert_eq!(pact.effects[0].target, TargetSelector::SelfTarget);
    }

    #[test]
    fn test_only_shuriken_is_grouped() {
        let registry = CardRegistry::new();
        let grouped: Vec<_> = registry.find(|c| c.group_tag.is_some()).collect();

        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].template, CardTemplateId::Shuriken);
    }

    #[test]
    fn test_passive_cards() {
        let registry = CardRegistry::new();
        let passives = registry.find(|c| c.passive.is_some()).count();
        assert_eq!(passives, 5);
    }
}
