//! Effect targeting.
//!
//! Turns a `TargetSelector` into concrete combatants at resolution time.
//! Living-ness is read when the effect resolves, not when the card was
//! played, so an AllEnemies effect after a kill skips the corpse.
//!
//! Selectors are relative to the actor: for an enemy actor the hostile
//! selectors resolve to the player.

use smallvec::{smallvec, SmallVec};

use super::effect::TargetSelector;
use crate::core::{CombatState, Combatant, EntityId, GameRng};

/// Resolved targets for one effect.
pub type Targets = SmallVec<[Combatant; 4]>;

/// Resolve `selector` for `actor`.
///
/// `explicit` is the target the player aimed at. A SingleEnemy selector
/// with no explicit target, or one naming a dead or unknown enemy,
/// resolves to nothing; commands validate targets before resolving.
pub fn select_targets(
    selector: TargetSelector,
    actor: Combatant,
    explicit: Option<EntityId>,
    state: &CombatState,
    rng: &mut GameRng,
) -> Targets {
    match selector {
        TargetSelector::SelfTarget => smallvec![actor],
        _ if !actor.is_player() => {
            if state.player.is_dead() {
                SmallVec::new()
            } else {
                smallvec![Combatant::Player]
            }
        }
        TargetSelector::SingleEnemy => explicit
            .filter(|id| state.is_living_enemy(*id))
            .map(Combatant::Enemy)
            .into_iter()
            .collect(),
        TargetSelector::AllEnemies => state
            .living_enemy_ids()
            .into_iter()
            .map(Combatant::Enemy)
            .collect(),
        TargetSelector::RandomEnemy => {
            let living = state.living_enemy_ids();
            rng.choose_index(living.len())
                .map(|i| Combatant::Enemy(living[i]))
                .into_iter()
                .collect()
        }
    }
}
