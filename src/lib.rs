//! # deck-descent
//!
//! Combat engine for a turn-based deck-building roguelike: a player fights
//! escalating enemy groups with a hand of cards and a few skills,
//! descending level by level until death.
//!
//! ## Design Principles
//!
//! 1. **One authoritative state**: every rule mutates `CombatState`
//!    through `GameSession` commands. Nothing else writes to it.
//!
//! 2. **State first, presentation later**: a command finishes all its
//!    state changes before it returns. The timestamped event stream tells a
//!    UI what happened and when to show it.
//!
//! 3. **Deterministic by seed**: every random point goes through one
//!    `GameRng`.
//!
//! ## Modules
//!
//! - `core`: ids, RNG, configuration, player and enemy records, phases
//! - `status`: the status ledger (Vulnerable, Weak, Strength, ...)
//! - `cards`: card templates, instances and the built-in card table
//! - `skills`: active and passive skills
//! - `content`: characters, enemy templates, reward pools, profile seam
//! - `effects`: effect model, targeting, damage calculator, resolver
//! - `zones`: draw pile, hand and discard pile
//! - `events`: result events and the timeline
//! - `rules`: the session state machine, enemy AI, levels and rewards
//! - `progress`: level-reached persistence seam
//! - `error`: command rejections

pub mod cards;
pub mod content;
pub mod core;
pub mod effects;
pub mod error;
pub mod events;
pub mod progress;
pub mod rules;
pub mod skills;
pub mod status;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    CombatState, Combatant, Enemy, EntityId, GameRng, Intent, IntentKind, Phase, Player, RulesConfig, TimingConfig,
};

pub use crate::cards::{CardCategory, CardDefinition, CardInstance, CardRegistry, CardTemplateId, HandPassive};

pub use crate::content::{CharacterId, ContentDatabase, EnemyProfile, ProfileGenerator, StaticContent};

pub use crate::effects::{compute_damage, Effect, EffectKind, EffectResolver, TargetSelector};

pub use crate::error::CommandError;

pub use crate::events::{GameEvent, TimedEvent};

pub use crate::progress::{MemoryProgress, ProgressStore};

pub use crate::rules::{GameSession, GameSessionBuilder, RewardChoice, RewardOffer, SessionSnapshot};

pub use crate::skills::{Skill, SkillTemplateId};

pub use crate::status::{StatusKind, StatusLedger};
