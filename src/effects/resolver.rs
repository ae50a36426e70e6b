//! Effect resolution - applying effects to combat state.
//!
//! The `EffectResolver` interprets one declarative `Effect` at a time:
//! pick targets, mutate the player/enemies/piles, emit result events.
//! Effects of a card resolve strictly in list order; each AllEnemies
//! application is independent of the others.
//!
//! ## Damage
//!
//! Player-sourced damage to an enemy goes through the damage calculator
//! with the player's statuses, held-card boosts and passive skills as
//! source modifiers, and the enemy's Vulnerable as target modifier. Block
//! absorbs first. Self-targeted damage (Dark Pact) is the raw value
//! through block, no modifiers.
//!
//! Hits that land on enemies wait for projectile travel on the timeline
//! before their events are stamped.

use crate::core::{CombatState, Combatant, EntityId, GameRng, TimingConfig};
use crate::events::{GameEvent, Timeline};
use crate::status::StatusLedger;
use crate::zones::DrawReport;

use super::damage::{compute_damage, Hit, SourceModifiers, TargetModifiers};
use super::effect::{Effect, EffectKind};
use super::targeting::select_targets;

/// Everything an effect may touch.
///
/// Borrowed from the session for the duration of one resolution.
pub struct ResolverContext<'a> {
    pub state: &'a mut CombatState,
    pub rng: &'a mut GameRng,
    pub timeline: &'a mut Timeline,
    pub timing: &'a TimingConfig,
}

impl<'a> ResolverContext<'a> {
    pub fn new(
        state: &'a mut CombatState,
        rng: &'a mut GameRng,
        timeline: &'a mut Timeline,
        timing: &'a TimingConfig,
    ) -> Self {
        Self {
            state,
            rng,
            timeline,
            timing,
        }
    }
}

/// Result of resolving one effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectResult {
    /// Applied to this many targets.
    Applied(usize),
    /// Cards were drawn (possibly fewer than asked).
    Drew(DrawReport),
    /// No valid target at resolution time; nothing happened.
    NoTarget,
}

/// Resolves effects against combat state.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve a list of effects in order.
    ///
    /// Stops as soon as the player is dead; nothing after the killing
    /// effect lands.
    pub fn resolve_all(
        ctx: &mut ResolverContext<'_>,
        effects: &[Effect],
        actor: Combatant,
        target: Option<EntityId>,
    ) -> Vec<EffectResult> {
        let mut results = Vec::with_capacity(effects.len());
        for effect in effects {
            if ctx.state.player.is_dead() {
                tracing::debug!(skipped = effects.len() - results.len(), "player dead, resolution stopped");
                break;
            }
            results.push(Self::resolve(ctx, effect, actor, target));
        }
        results
    }

    /// Resolve one effect.
    pub fn resolve(
        ctx: &mut ResolverContext<'_>,
        effect: &Effect,
        actor: Combatant,
        target: Option<EntityId>,
    ) -> EffectResult {
        tracing::debug!(%effect, %actor, ?target, "resolve effect");

        match effect.kind {
            EffectKind::Draw => return Self::draw(ctx, actor, effect.value),
            EffectKind::AddEnergy => return Self::add_energy(ctx, actor, effect.value),
            _ => {}
        }

        let targets = select_targets(effect.target, actor, target, ctx.state, ctx.rng);
        if targets.is_empty() {
            return EffectResult::NoTarget;
        }

        let travels = effect.target.hits_enemies()
            && matches!(effect.kind, EffectKind::Damage | EffectKind::ApplyStatus(_));
        if travels {
            ctx.timeline.wait(ctx.timing.projectile_ms);
        }

        for &victim in &targets {
            match effect.kind {
                EffectKind::Damage => {
                    if victim == actor {
                        Self::raw_hit(ctx, victim, effect.value);
                    } else {
                        Self::strike(ctx, actor, victim, effect.value);
                    }
                }
                EffectKind::Block => Self::gain_block(ctx, victim, effect.value),
                EffectKind::Heal => Self::heal(ctx, victim, effect.value),
                EffectKind::ApplyStatus(kind) => {
                    if let Some(ledger) = statuses_mut(ctx.state, victim) {
                        let total = ledger.apply(kind, effect.value);
                        ctx.timeline.emit(GameEvent::StatusApplied {
                            target: victim,
                            status: kind,
                            value: effect.value,
                            total,
                        });
                    }
                }
                EffectKind::Draw | EffectKind::AddEnergy => {}
            }
        }

        EffectResult::Applied(targets.len())
    }

    /// Damage after modifiers, without touching state.
    ///
    /// Includes the player's held-card and passive bonuses when the
    /// player is the source.
    #[must_use]
    pub fn damage_between(state: &CombatState, source: Combatant, target: Combatant, base: i32) -> i32 {
        let mut source_mods = match source {
            Combatant::Player => SourceModifiers::from_ledger(&state.player.statuses)
                .with_flat_bonus(state.player_damage_bonus()),
            Combatant::Enemy(id) => state
                .enemy(id)
                .map(|e| SourceModifiers::from_ledger(&e.statuses))
                .unwrap_or_default(),
        };
        if !source.is_player() {
            source_mods.doubled = false;
        }
        let target_mods = statuses(state, target)
            .map(TargetModifiers::from_ledger)
            .unwrap_or_default();

        compute_damage(base, &source_mods, &target_mods)
    }

    /// A modified hit from `source` onto `target`, through block.
    ///
    /// Returns `None` if the target is gone.
    pub fn strike(ctx: &mut ResolverContext<'_>, source: Combatant, target: Combatant, base: i32) -> Option<Hit> {
        let damage = Self::damage_between(ctx.state, source, target, base);
        Self::land_hit(ctx, source, target, damage)
    }

    fn raw_hit(ctx: &mut ResolverContext<'_>, target: Combatant, amount: i32) -> Option<Hit> {
        Self::land_hit(ctx, target, target, amount)
    }

    fn land_hit(ctx: &mut ResolverContext<'_>, source: Combatant, target: Combatant, damage: i32) -> Option<Hit> {
        let hit = match target {
            Combatant::Player => ctx.state.player.take_hit(damage),
            Combatant::Enemy(id) => {
                let enemy = ctx.state.enemy_mut(id).filter(|e| e.is_alive())?;
                enemy.take_hit(damage)
            }
        };

        ctx.timeline.emit(GameEvent::DamageDealt {
            source,
            target,
            amount: hit.hp_lost,
            blocked: hit.blocked,
        });
        report_death(ctx, target);

        Some(hit)
    }

    fn gain_block(ctx: &mut ResolverContext<'_>, target: Combatant, amount: i32) {
        match target {
            Combatant::Player => ctx.state.player.gain_block(amount),
            Combatant::Enemy(id) => {
                if let Some(enemy) = ctx.state.enemy_mut(id) {
                    enemy.gain_block(amount);
                }
            }
        }
        ctx.timeline.emit(GameEvent::BlockGained { target, amount });
    }

    fn heal(ctx: &mut ResolverContext<'_>, target: Combatant, amount: i32) {
        let healed = match target {
            Combatant::Player => ctx.state.player.heal(amount),
            Combatant::Enemy(id) => match ctx.state.enemy_mut(id) {
                Some(enemy) => {
                    let before = enemy.current_hp;
                    enemy.current_hp = (enemy.current_hp + amount.max(0)).min(enemy.max_hp);
                    enemy.current_hp - before
                }
                None => 0,
            },
        };
        ctx.timeline.emit(GameEvent::Healed { target, amount: healed });
    }

    fn draw(ctx: &mut ResolverContext<'_>, actor: Combatant, count: i32) -> EffectResult {
        if !actor.is_player() {
            return EffectResult::NoTarget;
        }
        let report = ctx.state.piles.draw(count.max(0) as usize, ctx.rng);
        emit_draw(ctx.timeline, &report);
        EffectResult::Drew(report)
    }

    fn add_energy(ctx: &mut ResolverContext<'_>, actor: Combatant, amount: i32) -> EffectResult {
        if !actor.is_player() {
            return EffectResult::NoTarget;
        }
        ctx.state.player.current_energy += amount;
        ctx.timeline.emit(GameEvent::EnergyGained { amount });
        EffectResult::Applied(1)
    }
}

/// Emit the events describing a draw.
pub fn emit_draw(timeline: &mut Timeline, report: &DrawReport) {
    if report.reshuffled {
        timeline.emit(GameEvent::DeckReshuffled);
    }
    timeline.emit(GameEvent::CardsDrawn {
        requested: report.requested,
        drawn: report.drawn.clone(),
    });
}

/// Emit `EnemyDied` if `target` is an enemy that just hit 0 HP.
pub fn report_death(ctx: &mut ResolverContext<'_>, target: Combatant) {
    if let Combatant::Enemy(id) = target {
        if ctx.state.enemy(id).is_some_and(|e| !e.is_alive()) {
            ctx.timeline.emit(GameEvent::EnemyDied { enemy: id });
        }
    }
}

fn statuses(state: &CombatState, who: Combatant) -> Option<&StatusLedger> {
    match who {
        Combatant::Player => Some(&state.player.statuses),
        Combatant::Enemy(id) => state.enemy(id).map(|e| &e.statuses),
    }
}

fn statuses_mut(state: &mut CombatState, who: Combatant) -> Option<&mut StatusLedger> {
    match who {
        Combatant::Player => Some(&mut state.player.statuses),
        Combatant::Enemy(id) => state.enemy_mut(id).map(|e| &mut e.statuses),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{card_definition, CardInstance, CardTemplateId};
    use crate::core::{Enemy, Intent, Player};
    use crate::effects::TargetSelector;
    use crate::status::StatusKind;

    struct Fixture {
        state: CombatState,
        rng: GameRng,
        timeline: Timeline,
        timing: TimingConfig,
    }

    impl Fixture {
        fn new(enemy_hps: &[i32]) -> Self {
            let mut state = CombatState::new(Player::new("P", "🙂", 50, 3), im::Vector::new());
            for (i, hp) in enemy_hps.iter().enumerate() {
                state
                    .enemies
                    .push_back(Enemy::new(EntityId(100 + i as u32), "E", *hp, Intent::attack(5)));
            }
            Self {
                state,
                rng: GameRng::new(11),
                timeline: Timeline::new(),
                timing: TimingConfig::default(),
            }
        }

        fn resolve(&mut self, effect: Effect, target: Option<EntityId>) -> EffectResult {
            let mut ctx = ResolverContext::new(&mut self.state, &mut self.rng, &mut self.timeline, &self.timing);
            EffectResolver::resolve(&mut ctx, &effect, Combatant::Player, target)
        }

        fn enemy(&self, i: u32) -> &Enemy {
            self.state.enemy(EntityId(100 + i)).unwrap()
        }
    }

    #[test]
    fn test_single_damage() {
        let mut fx = Fixture::new(&[20]);

        let result = fx.resolve(Effect::damage(6), Some(EntityId(100)));

        assert_eq!(result, EffectResult::Applied(1));
        assert_eq!(fx.enemy(0).current_hp, 14);
    }

    #[test]
    fn test_damage_through_block() {
        let mut fx = Fixture::new(&[20]);
        fx.state.enemies[0].block = 5;

        fx.resolve(Effect::damage(6), Some(EntityId(100)));

        assert_eq!(fx.enemy(0).block, 0);
        assert_eq!(fx.enemy(0).current_hp, 19);
    }

    #[test]
    fn test_missing_target_is_noop() {
        let mut fx = Fixture::new(&[20]);

        assert_eq!(fx.resolve(Effect::damage(6), None), EffectResult::NoTarget);
        assert_eq!(fx.enemy(0).current_hp, 20);
    }

    #[test]
    fn test_all_enemies_independent_block() {
        let mut fx = Fixture::new(&[10, 10]);
        fx.state.enemies[0].block = 10;

        let result = fx.resolve(Effect::damage_all(4), None);

        assert_eq!(result, EffectResult::Applied(2));
        assert_eq!(fx.enemy(0).current_hp, 10);
        assert_eq!(fx.enemy(0).block, 6);
        assert_eq!(fx.enemy(1).current_hp, 6);
    }

    #[test]
    fn test_held_boost_and_passive() {
        let mut fx = Fixture::new(&[30]);
        let grip = CardInstance::from_definition(EntityId(1), &card_definition(CardTemplateId::TacticalGrip));
        fx.state.deck.push_back(grip);
        let deck = fx.state.deck.clone();
        fx.state.piles.reset(&deck, &mut fx.rng);
        fx.state.piles.draw(1, &mut fx.rng);
        fx.state.player.statuses.apply(StatusKind::Strength, 2);

        fx.resolve(Effect::damage(6), Some(EntityId(100)));

        // 6 + 2 strength + 1 held boost
        assert_eq!(fx.enemy(0).current_hp, 21);
    }

    #[test]
    fn test_self_damage_ignores_modifiers() {
        let mut fx = Fixture::new(&[30]);
        fx.state.player.statuses.apply(StatusKind::Strength, 5);
        fx.state.player.statuses.apply(StatusKind::Vulnerable, 1);
        fx.state.player.block = 1;

        fx.resolve(Effect::self_damage(3), None);

        assert_eq!(fx.state.player.block, 0);
        assert_eq!(fx.state.player.current_hp, 48);
    }

    #[test]
    fn test_heal_caps() {
        let mut fx = Fixture::new(&[30]);
        fx.state.player.current_hp = 45;

        fx.resolve(Effect::heal(8), None);

        assert_eq!(fx.state.player.current_hp, 50);
        let healed = fx.timeline.drain().into_iter().find_map(|e| match e.event {
            GameEvent::Healed { amount, .. } => Some(amount),
            _ => None,
        });
        assert_eq!(healed, Some(5));
    }

    #[test]
    fn test_energy_overflows_max() {
        let mut fx = Fixture::new(&[30]);

        fx.resolve(Effect::energy(2), None);

        assert_eq!(fx.state.player.current_energy, 5);
    }

    #[test]
    fn test_status_merges_on_each_enemy() {
        let mut fx = Fixture::new(&[30, 30]);
        let weak = Effect::status(StatusKind::Weak, 1, TargetSelector::AllEnemies);

        fx.resolve(weak, None);
        fx.resolve(weak, None);

        assert_eq!(fx.enemy(0).statuses.get(StatusKind::Weak), 2);
        assert_eq!(fx.enemy(1).statuses.len(), 1);
    }

    #[test]
    fn test_vulnerable_target() {
        let mut fx = Fixture::new(&[30]);
        fx.state.enemies[0].statuses.apply(StatusKind::Vulnerable, 1);

        fx.resolve(Effect::damage(10), Some(EntityId(100)));

        assert_eq!(fx.enemy(0).current_hp, 15);
    }

    #[test]
    fn test_kill_emits_death_once() {
        let mut fx = Fixture::new(&[5]);

        fx.resolve(Effect::damage(10), Some(EntityId(100)));
        let after_kill = fx.resolve(Effect::damage_all(10), None);

        assert_eq!(after_kill, EffectResult::NoTarget);
        let deaths = fx
            .timeline
            .drain()
            .into_iter()
            .filter(|e| matches!(e.event, GameEvent::EnemyDied { .. }))
            .count();
        assert_eq!(deaths, 1);
    }

    #[test]
    fn test_projectile_delay_on_enemy_hits() {
        let mut fx = Fixture::new(&[30]);

        fx.resolve(Effect::block(5), None);
        fx.resolve(Effect::damage(1), Some(EntityId(100)));

        let events = fx.timeline.drain();
        assert_eq!(events[0].at_ms, 0);
        assert_eq!(events[1].at_ms, 300);
    }

    #[test]
    fn test_draw_reports_short() {
        let mut fx = Fixture::new(&[30]);

        let result = fx.resolve(Effect::draw(2), None);

        match result {
            EffectResult::Drew(report) => {
                assert_eq!(report.requested, 2);
                assert!(report.drawn.is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_enemy_strike_uses_enemy_modifiers() {
        let mut fx = Fixture::new(&[30]);
        fx.state.enemies[0].statuses.apply(StatusKind::Strength, 2);
        fx.state.enemies[0].statuses.apply(StatusKind::DoubleNextAttack, 1);
        fx.state.player.statuses.apply(StatusKind::Vulnerable, 1);

        let mut ctx = ResolverContext::new(&mut fx.state, &mut fx.rng, &mut fx.timeline, &fx.timing);
        let hit = EffectResolver::strike(&mut ctx, Combatant::Enemy(EntityId(100)), Combatant::Player, 6).unwrap();

        // (6 + 2) * 1.5 = 12, double attack is player-only
        assert_eq!(hit.hp_lost, 12);
        assert_eq!(fx.state.player.current_hp, 38);
    }

    #[test]
    fn test_nothing_lands_after_player_death() {
        let mut fx = Fixture::new(&[20]);
        fx.state.player.current_hp = 3;
        let effects = [Effect::self_damage(3), Effect::heal(2), Effect::energy(1)];

        let mut ctx = ResolverContext::new(&mut fx.state, &mut fx.rng, &mut fx.timeline, &fx.timing);
        let results = EffectResolver::resolve_all(&mut ctx, &effects, Combatant::Player, None);

        assert_eq!(results.len(), 1);
        assert_eq!(fx.state.player.current_hp, 0);
        assert_eq!(fx.state.player.current_energy, 3);
    }
}
