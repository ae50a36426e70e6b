//! Player skills.
//!
//! A skill is either **active** (costs energy, has a cooldown, resolves an
//! effect list like a card) or **passive** (a standing modifier with no
//! activation). Skills are granted at character start or by a boss reward
//! and never removed.
//!
//! Cooldowns tick down by one at the start of every player turn, floored
//! at zero. Using an active skill sets its current cooldown to the full
//! cooldown.
//!
//! ```
//! use deck_descent::core::EntityId;
//! use deck_descent::skills::{Skill, SkillTemplateId};
//!
//! let mut slash = Skill::from_template(EntityId(0), SkillTemplateId::PowerSlash);
//! assert!(slash.is_ready());
//!
//! slash.trigger_cooldown();
//! assert!(!slash.is_ready());
//! slash.tick_cooldown();
//! slash.tick_cooldown();
//! slash.tick_cooldown();
//! assert!(slash.is_ready());
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::entity::EntityId;
use crate::effects::Effect;

/// Identifier of a skill template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillTemplateId {
    PowerSlash,
    ArcaneFocus,
    BloodFeast,
    ThunderStrike,
    VampiricAura,
}

/// Standing modifier of a passive skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassiveEffect {
    /// Flat bonus to every player-sourced damage effect.
    DamageBoost(i32),
    /// Heal this much at the end of every player turn.
    HealOnTurnEnd(i32),
}

/// Active or passive behaviour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillKind {
    Active {
        cost: i32,
        cooldown: u32,
        current_cooldown: u32,
        effects: SmallVec<[Effect; 2]>,
    },
    Passive(PassiveEffect),
}

/// Static data for a skill template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub template: SkillTemplateId,
    pub name: String,
    pub description: String,
    pub emoji: String,
    pub kind: SkillKind,
}

/// Authoring table for skills.
#[must_use]
pub fn skill_definition(id: SkillTemplateId) -> SkillDefinition {
    let (name, description, emoji, kind) = match id {
        SkillTemplateId::PowerSlash => (
            "Power Slash",
            "Deal 12 damage. Cooldown 3.",
            "💥",
            active(2, 3, &[Effect::damage(12)]),
        ),
        SkillTemplateId::ArcaneFocus => (
            "Arcane Focus",
            "Passive: all damage +1.",
            "🔮",
            SkillKind::Passive(PassiveEffect::DamageBoost(1)),
        ),
        SkillTemplateId::BloodFeast => (
            "Blood Feast",
            "Deal 5 damage and heal 5. Cooldown 4.",
            "🩸",
            active(1, 4, &[Effect::damage(5), Effect::heal(5)]),
        ),
        SkillTemplateId::ThunderStrike => (
            "Thunder Strike",
            "Deal 20 damage. Cooldown 2.",
            "⚡",
            active(1, 2, &[Effect::damage(20)]),
        ),
        SkillTemplateId::VampiricAura => (
            "Vampiric Aura",
            "Passive: heal 1 at the end of your turn.",
            "🦇",
            SkillKind::Passive(PassiveEffect::HealOnTurnEnd(1)),
        ),
    };

    SkillDefinition {
        template: id,
        name: name.to_string(),
        description: description.to_string(),
        emoji: emoji.to_string(),
        kind,
    }
}

fn active(cost: i32, cooldown: u32, effects: &[Effect]) -> SkillKind {
    SkillKind::Active {
        cost,
        cooldown,
        current_cooldown: 0,
        effects: effects.iter().copied().collect(),
    }
}

/// A skill the player owns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: EntityId,
    pub template: SkillTemplateId,
    pub name: String,
    pub description: String,
    pub emoji: String,
    pub kind: SkillKind,
}

impl Skill {
    #[must_use]
    pub fn from_definition(id: EntityId, definition: &SkillDefinition) -> Self {
        Self {
            id,
            template: definition.template,
            name: definition.name.clone(),
            description: definition.description.clone(),
            emoji: definition.emoji.clone(),
            kind: definition.kind.clone(),
        }
    }

    #[must_use]
    pub fn from_template(id: EntityId, template: SkillTemplateId) -> Self {
        Self::from_definition(id, &skill_definition(template))
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.kind, SkillKind::Active { .. })
    }

    /// Energy cost, if active.
    #[must_use]
    pub fn cost(&self) -> Option<i32> {
        match self.kind {
            SkillKind::Active { cost, .. } => Some(cost),
            SkillKind::Passive(_) => None,
        }
    }

    /// Active and off cooldown. Passive skills are never "ready".
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.kind, SkillKind::Active { current_cooldown: 0, .. })
    }

    /// Turns left before an active skill is ready again.
    #[must_use]
    pub fn remaining_cooldown(&self) -> u32 {
        match self.kind {
            SkillKind::Active { current_cooldown, .. } => current_cooldown,
            SkillKind::Passive(_) => 0,
        }
    }

    /// Ready and affordable with `energy`.
    #[must_use]
    pub fn is_usable(&self, energy: i32) -> bool {
        self.is_ready() && self.cost().is_some_and(|cost| cost <= energy)
    }

    /// Decrement the current cooldown, floored at zero.
    pub fn tick_cooldown(&mut self) {
        if let SkillKind::Active { current_cooldown, .. } = &mut self.kind {
            *current_cooldown = current_cooldown.saturating_sub(1);
        }
    }

    /// Put the skill on its full cooldown.
    pub fn trigger_cooldown(&mut self) {
        if let SkillKind::Active { cooldown, current_cooldown, .. } = &mut self.kind {
            *current_cooldown = *cooldown;
        }
    }

    #[must_use]
    pub fn passive(&self) -> Option<PassiveEffect> {
        match self.kind {
            SkillKind::Passive(effect) => Some(effect),
            SkillKind::Active { .. } => None,
        }
    }

    /// Effects of an active skill; empty for passives.
    #[must_use]
    pub fn effects(&self) -> &[Effect] {
        match &self.kind {
            SkillKind::Active { effects, .. } => effects,
            SkillKind::Passive(_) => &[],
        }
    }
}
