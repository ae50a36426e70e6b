//! The enemy phase.
//!
//! Enemies act one at a time in spawn order. Each one:
//!
//! 1. waits its action pause on the timeline
//! 2. takes its Burn damage (unblockable); a burned-out enemy stops here
//! 3. performs its intent, unless Frozen
//! 4. rolls the intent it will show during the next player turn
//! 5. decays its statuses
//!
//! Past the enrage threshold every living enemy gains 1 Strength before
//! anyone acts. The phase stops as soon as the player dies.

use crate::content::EnemyTemplate;
use crate::core::{Combatant, Enemy, EntityAllocator, EntityId, GameRng, Intent, IntentKind, RulesConfig};
use crate::effects::{report_death, EffectResolver, ResolverContext};
use crate::events::GameEvent;
use crate::status::StatusKind;

/// Read-only inputs of one enemy phase.
pub struct EnemyTurn<'a> {
    pub config: &'a RulesConfig,
    /// Templates summons draw from.
    pub minions: &'a [&'a EnemyTemplate],
    pub level: u32,
    pub turn: u32,
}

/// Run every enemy's action for this turn.
///
/// Returns `false` if the player died.
pub fn run_enemy_turn(ctx: &mut ResolverContext<'_>, ids: &mut EntityAllocator, turn: &EnemyTurn<'_>) -> bool {
    let span = tracing::info_span!("enemy_turn", level = turn.level, turn = turn.turn);
    let _enter = span.enter();

    if turn.turn > turn.config.enrage_threshold {
        enrage(ctx, turn);
    }

    // Summoned minions join the roster but wait for the next turn to act.
    for id in ctx.state.living_enemy_ids() {
        if !ctx.state.is_living_enemy(id) {
            continue;
        }
        ctx.timeline.wait(ctx.timing.enemy_action_ms);

        if !burn(ctx, id) {
            continue;
        }

        let frozen = ctx.state.enemy(id).is_some_and(|e| e.statuses.has(StatusKind::Freeze));
        if frozen {
            tracing::debug!(%id, "frozen, skipping action");
            ctx.timeline.emit(GameEvent::FrozenSkip { enemy: id });
        } else {
            act(ctx, ids, turn, id);
        }

        if ctx.state.player.is_dead() {
            tracing::debug!(%id, "player killed");
            return false;
        }

        let living = ctx.state.living_enemy_count();
        if let Some(enemy) = ctx.state.enemy_mut(id) {
            enemy.intent = roll_intent(enemy.is_boss, living, turn.level, turn.config, ctx.rng);
            enemy.statuses.decay();
            let intent = enemy.intent;
            tracing::debug!(%id, %intent, "intent chosen");
            ctx.timeline.emit(GameEvent::IntentChosen { enemy: id, intent });
        }
    }

    true
}

fn enrage(ctx: &mut ResolverContext<'_>, turn: &EnemyTurn<'_>) {
    tracing::info!(turn = turn.turn, "enemies enraged");
    ctx.timeline.emit(GameEvent::Enraged { turn: turn.turn });

    for id in ctx.state.living_enemy_ids() {
        if let Some(enemy) = ctx.state.enemy_mut(id) {
            let total = enemy.statuses.apply(StatusKind::Strength, 1);
            ctx.timeline.emit(GameEvent::StatusApplied {
                target: Combatant::Enemy(id),
                status: StatusKind::Strength,
                value: 1,
                total,
            });
        }
    }
    ctx.timeline.wait(ctx.timing.enrage_pause_ms);
}

/// Burn tick. Returns whether the enemy is still alive.
fn burn(ctx: &mut ResolverContext<'_>, id: EntityId) -> bool {
    let Some(enemy) = ctx.state.enemy_mut(id) else {
        return false;
    };
    let stacks = enemy.statuses.get(StatusKind::Burn);
    if stacks > 0 {
        let amount = enemy.lose_hp(stacks);
        ctx.timeline.emit(GameEvent::BurnTick {
            target: Combatant::Enemy(id),
            amount,
        });
        report_death(ctx, Combatant::Enemy(id));
    }
    ctx.state.is_living_enemy(id)
}

fn act(ctx: &mut ResolverContext<'_>, ids: &mut EntityAllocator, turn: &EnemyTurn<'_>, id: EntityId) {
    let Some(intent) = ctx.state.enemy(id).map(|e| e.intent) else {
        return;
    };
    tracing::debug!(%id, %intent, "enemy acts");
    ctx.timeline.emit(GameEvent::EnemyActed { enemy: id, intent });

    let me = Combatant::Enemy(id);
    match intent.kind {
        IntentKind::Attack => {
            EffectResolver::strike(ctx, me, Combatant::Player, intent.value);
        }
        IntentKind::Special => {
            let base = turn.config.special_damage(intent.value);
            EffectResolver::strike(ctx, me, Combatant::Player, base);
        }
        IntentKind::Defend | IntentKind::Buff => {
            if let Some(enemy) = ctx.state.enemy_mut(id) {
                enemy.gain_block(turn.config.enemy_block);
                ctx.timeline.emit(GameEvent::BlockGained {
                    target: me,
                    amount: turn.config.enemy_block,
                });
            }
        }
        IntentKind::Summon => summon(ctx, ids, turn, id),
    }
}

fn summon(ctx: &mut ResolverContext<'_>, ids: &mut EntityAllocator, turn: &EnemyTurn<'_>, summoner: EntityId) {
    let at_cap = ctx.state.living_enemy_count() >= turn.config.population_cap;
    let template = if at_cap { None } else { ctx.rng.choose(turn.minions).copied() };

    let Some(template) = template else {
        tracing::debug!(%summoner, at_cap, "summon failed");
        ctx.timeline.emit(GameEvent::SummonFailed { summoner });
        return;
    };

    let anchor_hp = ctx
        .state
        .boss_max_hp()
        .or_else(|| ctx.state.enemy(summoner).map(|e| e.max_hp))
        .unwrap_or(turn.config.boss_base_hp);
    let minion = spawn_minion(ids.alloc(), template, turn.config.minion_hp(anchor_hp), turn.level, turn.config);
    let enemy = minion.id;

    tracing::debug!(%summoner, %enemy, name = %minion.name, "summoned");
    ctx.state.enemies.push_back(minion);
    ctx.timeline.emit(GameEvent::EnemySummoned { summoner, enemy });
}

/// A fresh minion from `template`, opening with a level-scaled attack.
#[must_use]
pub fn spawn_minion(id: EntityId, template: &EnemyTemplate, hp: i32, level: u32, config: &RulesConfig) -> Enemy {
    Enemy::new(id, template.name.clone(), hp.max(1), Intent::attack(config.minion_attack(level)))
        .with_profile(template.description.clone(), template.emoji.clone())
}

/// Roll the next intent.
///
/// Bosses pick by weight among Summon, Attack, Buff and Special; Summon's
/// weight moves to Attack while the field is at the population cap.
/// Minions either Buff or Attack.
pub fn roll_intent(is_boss: bool, living: usize, level: u32, config: &RulesConfig, rng: &mut GameRng) -> Intent {
    if !is_boss {
        return if rng.gen_bool(config.minion_buff_chance) {
            Intent::new(IntentKind::Buff, config.enemy_block)
        } else {
            Intent::attack(config.minion_attack(level))
        };
    }

    let w = &config.boss_weights;
    let (summon, attack) = if living < config.population_cap {
        (w.summon, w.attack)
    } else {
        (0.0, w.attack + w.summon)
    };

    match rng.choose_weighted(&[summon, attack, w.buff, w.special]) {
        Some(0) => Intent::new(IntentKind::Summon, 0),
        Some(2) => Intent::new(IntentKind::Buff, config.enemy_block),
        Some(3) => Intent::new(IntentKind::Special, config.boss_special(level)),
        _ => Intent::attack(config.boss_attack(level)),
    }
}
