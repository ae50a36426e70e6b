//! Core engine types: entities, RNG, configuration, combatants, phases.
//!
//! These are the building blocks every other module leans on. Nothing
//! here knows about turn order or rules; that lives in `rules`.

pub mod config;
pub mod enemy;
pub mod entity;
pub mod phase;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{IntentWeights, RulesConfig, TimingConfig};
pub use enemy::{Enemy, Intent, IntentKind};
pub use entity::{Combatant, EntityAllocator, EntityId};
pub use phase::Phase;
pub use player::Player;
pub use rng::GameRng;
pub use state::CombatState;
