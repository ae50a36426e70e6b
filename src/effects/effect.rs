//! Effect definitions.
//!
//! Effects are the declarative building blocks of cards and active skills.
//! A card carries an ordered list of them; the resolver applies them in
//! list order against the targets their selector picks.
//!
//! ## Kinds
//!
//! - `Damage`: run through the damage calculator, then block absorption
//! - `Block`: add to the acting side's block
//! - `Heal`: restore HP, capped at max
//! - `Draw`: pull cards from the draw pile
//! - `AddEnergy`: add energy (may exceed max)
//! - `ApplyStatus`: merge a status stack into the target's ledger

use serde::{Deserialize, Serialize};

use crate::status::StatusKind;

/// What an effect does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Damage,
    Block,
    Heal,
    Draw,
    AddEnergy,
    ApplyStatus(StatusKind),
}

/// Who an effect lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetSelector {
    /// The enemy the player aimed at. Requires an explicit target.
    SingleEnemy,
    /// Every living enemy at resolution time.
    AllEnemies,
    /// The acting side.
    SelfTarget,
    /// One living enemy, uniformly at random.
    RandomEnemy,
}

impl TargetSelector {
    /// Whether this selector hits enemies (and so waits on projectile travel).
    #[must_use]
    pub const fn hits_enemies(self) -> bool {
        !matches!(self, TargetSelector::SelfTarget)
    }
}

/// One declarative effect.
///
/// ## Example
///
/// ```
/// use deck_descent::effects::{Effect, EffectKind, TargetSelector};
/// use deck_descent::status::StatusKind;
///
/// let burn = Effect::status(StatusKind::Burn, 2, TargetSelector::SingleEnemy);
/// assert_eq!(burn.kind, EffectKind::ApplyStatus(StatusKind::Burn));
/// assert!(burn.needs_target());
///
/// let shield = Effect::block(5);
/// assert_eq!(shield.target, TargetSelector::SelfTarget);
/// assert!(!shield.needs_target());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub value: i32,
    pub target: TargetSelector,
}

impl Effect {
    #[must_use]
    pub const fn new(kind: EffectKind, value: i32, target: TargetSelector) -> Self {
        Self { kind, value, target }
    }

    /// Damage to the aimed enemy.
    #[must_use]
    pub const fn damage(value: i32) -> Self {
        Self::new(EffectKind::Damage, value, TargetSelector::SingleEnemy)
    }

    /// Damage to every living enemy.
    #[must_use]
    pub const fn damage_all(value: i32) -> Self {
        Self::new(EffectKind::Damage, value, TargetSelector::AllEnemies)
    }

    /// Damage to one random living enemy.
    #[must_use]
    pub const fn damage_random(value: i32) -> Self {
        Self::new(EffectKind::Damage, value, TargetSelector::RandomEnemy)
    }

    /// Damage to the acting side.
    #[must_use]
    pub const fn self_damage(value: i32) -> Self {
        Self::new(EffectKind::Damage, value, TargetSelector::SelfTarget)
    }

    #[must_use]
    pub const fn block(value: i32) -> Self {
        Self::new(EffectKind::Block, value, TargetSelector::SelfTarget)
    }

    #[must_use]
    pub const fn heal(value: i32) -> Self {
        Self::new(EffectKind::Heal, value, TargetSelector::SelfTarget)
    }

    #[must_use]
    pub const fn draw(count: i32) -> Self {
        Self::new(EffectKind::Draw, count, TargetSelector::SelfTarget)
    }

    #[must_use]
    pub const fn energy(value: i32) -> Self {
        Self::new(EffectKind::AddEnergy, value, TargetSelector::SelfTarget)
    }

    #[must_use]
    pub const fn status(kind: StatusKind, value: i32, target: TargetSelector) -> Self {
        Self::new(EffectKind::ApplyStatus(kind), value, target)
    }

    /// Whether resolving this effect needs an explicit enemy target.
    #[must_use]
    pub const fn needs_target(&self) -> bool {
        matches!(self.target, TargetSelector::SingleEnemy)
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let who = match self.target {
            TargetSelector::SingleEnemy => "target",
            TargetSelector::AllEnemies => "all enemies",
            TargetSelector::SelfTarget => "self",
            TargetSelector::RandomEnemy => "a random enemy",
        };
        match self.kind {
            EffectKind::Damage => write!(f, "Deal {} damage to {}", self.value, who),
            EffectKind::Block => write!(f, "Gain {} block", self.value),
            EffectKind::Heal => write!(f, "Heal {}", self.value),
            EffectKind::Draw => write!(f, "Draw {}", self.value),
            EffectKind::AddEnergy => write!(f, "Gain {} energy", self.value),
            EffectKind::ApplyStatus(kind) => write!(f, "Apply {} {} to {}", self.value, kind, who),
        }
    }
}
