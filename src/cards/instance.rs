//! Card instances - one specific copy of a card.
//!
//! A `CardInstance` is stamped out of a `CardDefinition` when a card joins
//! the permanent deck (character start or reward pick). It carries its own
//! `EntityId`, distinct from the template id, so two Strikes in hand are
//! told apart by the UI and by the piles.
//!
//! The playable data (cost, category, effects, tag, passive) is copied from
//! the definition at creation time; instances never look back at the catalog.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{CardCategory, CardDefinition, CardTemplateId, HandPassive};
use crate::core::entity::EntityId;
use crate::effects::Effect;

/// A card copy in the deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique per copy.
    pub id: EntityId,
    pub template: CardTemplateId,
    pub name: String,
    pub emoji: String,
    pub cost: i32,
    pub category: CardCategory,
    pub effects: SmallVec<[Effect; 3]>,
    pub group_tag: Option<String>,
    pub passive: Option<HandPassive>,
}

impl CardInstance {
    /// Stamp a new copy of `definition` with the given id.
    #[must_use]
    pub fn from_definition(id: EntityId, definition: &CardDefinition) -> Self {
        Self {
            id,
            template: definition.template,
            name: definition.name.clone(),
            emoji: definition.emoji.clone(),
            cost: definition.cost,
            category: definition.category,
            effects: definition.effects.clone(),
            group_tag: definition.group_tag.clone(),
            passive: definition.passive,
        }
    }

    #[must_use]
    pub fn is_attack(&self) -> bool {
        self.category == CardCategory::Attack
    }

    /// Whether playing this card needs an explicit enemy target.
    #[must_use]
    pub fn needs_target(&self) -> bool {
        self.effects.iter().any(Effect::needs_target)
    }

    /// Whether this card belongs to the given combo group.
    #[must_use]
    pub fn in_group(&self, tag: &str) -> bool {
        self.group_tag.as_deref() == Some(tag)
    }

    /// The flat damage bonus this card grants while held.
    #[must_use]
    pub fn damage_boost(&self) -> i32 {
        match self.passive {
            Some(HandPassive::DamageBoost(n)) => n,
            _ => 0,
        }
    }
}

impl std::fmt::Display for CardInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.name, self.id)
    }
}
