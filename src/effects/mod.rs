//! Effect system: what cards and skills do.
//!
//! - `Effect`: one declarative step (damage, block, heal, draw, energy, status)
//! - `select_targets`: resolve a `TargetSelector` against living enemies
//! - `compute_damage`: the pure damage calculator
//! - `EffectResolver`: applies effects to `CombatState` and emits events
//!
//! The calculator never mutates; the resolver is the only place combat
//! state changes as a result of an effect.

mod damage;
mod effect;
mod resolver;
mod targeting;

pub use damage::{absorb, compute_damage, Hit, SourceModifiers, TargetModifiers};
pub use effect::{Effect, EffectKind, TargetSelector};
pub use resolver::{emit_draw, report_death, EffectResolver, EffectResult, ResolverContext};
pub use targeting::{select_targets, Targets};
