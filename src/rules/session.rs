//! The game session: one run from character select to game over.
//!
//! `GameSession` is the only thing a host talks to. Commands validate
//! fully before touching state, mutate synchronously, and leave a trail of
//! `TimedEvent`s for the presentation layer to pace. Phase changes that
//! happen after a pause (auto-end, reward screen) wait in the scheduler
//! until `advance` moves the clock.
//!
//! ## Phases
//!
//! ```text
//! CharacterSelect -> Loading -> PlayerTurn <-> EnemyTurn -> Reward -> Loading ...
//!                                   \______________\________________-> GameOver
//! ```
//!
//! A player death moves to `GameOver` immediately, from any phase, and
//! cancels whatever was scheduled.
//!
//! ## Example
//!
//! ```
//! use deck_descent::content::CharacterId;
//! use deck_descent::core::Phase;
//! use deck_descent::GameSession;
//!
//! let mut session = GameSession::new(42);
//! session.select_character(CharacterId::Warrior).unwrap();
//! assert_eq!(session.phase(), Phase::PlayerTurn);
//! assert_eq!(session.turn(), 1);
//!
//! session.end_turn().unwrap();
//! assert!(session.phase() == Phase::PlayerTurn || session.phase() == Phase::GameOver);
//!
//! let events = session.drain_events();
//! assert!(!events.is_empty());
//! ```

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::enemy_ai::{run_enemy_turn, EnemyTurn};
use super::level::{roll_rewards, spawn_encounter, RewardChoice, RewardOffer};
use super::schedule::{Scheduler, Transition};
use crate::cards::{CardInstance, HandPassive};
use crate::content::{BossPicker, CharacterId, ContentDatabase, EnemyProfile, ProfileGenerator, StaticContent};
use crate::core::{CombatState, Combatant, Enemy, EntityAllocator, EntityId, GameRng, Phase, Player, RulesConfig};
use crate::effects::{emit_draw, Effect, EffectResolver, ResolverContext};
use crate::error::CommandError;
use crate::events::{GameEvent, TimedEvent, Timeline};
use crate::progress::{MemoryProgress, ProgressStore};
use crate::skills::Skill;
use crate::status::StatusKind;

/// Builder for a `GameSession`.
///
/// Defaults: `RulesConfig::default()`, the built-in content, a random
/// boss picker and in-memory progress.
pub struct GameSessionBuilder {
    seed: u64,
    config: RulesConfig,
    content: Box<dyn ContentDatabase>,
    profiles: Box<dyn ProfileGenerator>,
    progress: Box<dyn ProgressStore>,
}

impl GameSessionBuilder {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            config: RulesConfig::default(),
            content: Box::new(StaticContent::new()),
            profiles: Box::new(BossPicker),
            progress: Box::new(MemoryProgress::new()),
        }
    }

    #[must_use]
    pub fn config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn content(mut self, content: impl ContentDatabase + 'static) -> Self {
        self.content = Box::new(content);
        self
    }

    #[must_use]
    pub fn profiles(mut self, profiles: impl ProfileGenerator + 'static) -> Self {
        self.profiles = Box::new(profiles);
        self
    }

    #[must_use]
    pub fn progress(mut self, progress: impl ProgressStore + 'static) -> Self {
        self.progress = Box::new(progress);
        self
    }

    #[must_use]
    pub fn build(self) -> GameSession {
        GameSession {
            config: self.config,
            content: self.content,
            profiles: self.profiles,
            progress: self.progress,
            rng: GameRng::new(self.seed),
            ids: EntityAllocator::new(),
            timeline: Timeline::new(),
            scheduler: Scheduler::new(),
            phase: Phase::CharacterSelect,
            level: 0,
            turn: 0,
            state: None,
            rewards: None,
            victory_pending: false,
        }
    }
}

/// An owned copy of everything a UI draws.
///
/// Cheap to take every frame: the collections are `im` vectors that share
/// structure with the live state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub level: u32,
    pub turn: u32,
    pub player: Option<Player>,
    pub enemies: Vector<Enemy>,
    pub hand: Vector<CardInstance>,
    pub draw_pile: usize,
    pub discard_pile: usize,
    pub rewards: Option<RewardOffer>,
    pub victory_pending: bool,
}

/// One run of the game.
pub struct GameSession {
    config: RulesConfig,
    content: Box<dyn ContentDatabase>,
    profiles: Box<dyn ProfileGenerator>,
    progress: Box<dyn ProgressStore>,
    rng: GameRng,
    ids: EntityAllocator,
    timeline: Timeline,
    scheduler: Scheduler,
    phase: Phase,
    level: u32,
    turn: u32,
    state: Option<CombatState>,
    rewards: Option<RewardOffer>,
    /// All enemies are dead and the reward screen is scheduled.
    victory_pending: bool,
}

impl GameSession {
    /// A session with every default and the given RNG seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        GameSessionBuilder::new(seed).build()
    }

    #[must_use]
    pub fn builder(seed: u64) -> GameSessionBuilder {
        GameSessionBuilder::new(seed)
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    #[must_use]
    pub fn content(&self) -> &dyn ContentDatabase {
        self.content.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> &dyn ProgressStore {
        self.progress.as_ref()
    }

    /// Logical time in milliseconds, as moved by `advance`.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    #[must_use]
    pub fn combat(&self) -> Option<&CombatState> {
        self.state.as_ref()
    }

    /// Direct access to the combat record, for hosts that script a position.
    ///
    /// Bypasses validation and emits no events.
    pub fn combat_mut(&mut self) -> Option<&mut CombatState> {
        self.state.as_mut()
    }

    #[must_use]
    pub fn player(&self) -> Option<&Player> {
        self.state.as_ref().map(|s| &s.player)
    }

    #[must_use]
    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.state.as_ref().and_then(|s| s.enemy(id))
    }

    /// The whole roster, corpses included, in spawn order.
    #[must_use]
    pub fn enemies(&self) -> Vector<Enemy> {
        self.state.as_ref().map(|s| s.enemies.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn hand(&self) -> Vector<CardInstance> {
        self.state.as_ref().map(|s| s.piles.hand().clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn pending_rewards(&self) -> Option<&RewardOffer> {
        self.rewards.as_ref()
    }

    #[must_use]
    pub fn is_victory_pending(&self) -> bool {
        self.victory_pending
    }

    /// Whether the scheduler will end the current turn on its own.
    #[must_use]
    pub fn is_auto_end_scheduled(&self) -> bool {
        self.scheduler.is_scheduled(Transition::AutoEndTurn)
    }

    #[must_use]
    pub fn is_unlocked(&self, character: CharacterId) -> bool {
        self.content
            .character(character)
            .is_unlocked(self.progress.max_level_reached())
    }

    /// Cards in hand the player can currently pay for.
    #[must_use]
    pub fn playable_cards(&self) -> Vec<EntityId> {
        if !self.accepts_player_actions() {
            return Vec::new();
        }
        self.state
            .as_ref()
            .map(|s| {
                s.piles
                    .hand()
                    .iter()
                    .filter(|c| s.player.can_afford(c.cost))
                    .map(|c| c.id)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Damage a player hit of `base` would deal to `target` right now.
    ///
    /// Includes statuses, held-card boosts and passives, but not block.
    #[must_use]
    pub fn preview_damage(&self, base: i32, target: Combatant) -> Option<i32> {
        let state = self.state.as_ref()?;
        Some(EffectResolver::damage_between(state, Combatant::Player, target, base))
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.as_ref();
        SessionSnapshot {
            phase: self.phase,
            level: self.level,
            turn: self.turn,
            player: state.map(|s| s.player.clone()),
            enemies: self.enemies(),
            hand: self.hand(),
            draw_pile: state.map_or(0, |s| s.piles.draw_pile().len()),
            discard_pile: state.map_or(0, |s| s.piles.discard_pile().len()),
            rewards: self.rewards.clone(),
            victory_pending: self.victory_pending,
        }
    }

    /// Hand over every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<TimedEvent> {
        self.timeline.drain()
    }

    // === Commands ===

    /// Pick a character and start level 1.
    pub fn select_character(&mut self, character: CharacterId) -> Result<(), CommandError> {
        self.command(|s| s.try_select_character(character))
    }

    /// Start (or restart) loading `level`. Only legal while loading.
    pub fn start_level(&mut self, level: u32) -> Result<(), CommandError> {
        self.command(|s| {
            s.require_phase(Phase::Loading)?;
            s.begin_level(level.max(1));
            Ok(())
        })
    }

    /// Supply the boss profile a deferred generator did not return.
    pub fn finish_level(&mut self, profile: EnemyProfile) -> Result<(), CommandError> {
        self.command(|s| {
            s.require_phase(Phase::Loading)?;
            s.spawn_level(&profile);
            Ok(())
        })
    }

    /// Play one card from hand.
    pub fn play_card(&mut self, card: EntityId, target: Option<EntityId>) -> Result<(), CommandError> {
        self.command(|s| s.try_play_group(&[card], target))
    }

    /// Play several cards from hand as one action.
    ///
    /// The total cost is checked and paid up front; if it cannot be paid
    /// nothing happens. Cards then resolve in the given order with a
    /// stagger between them.
    pub fn play_card_group(&mut self, cards: &[EntityId], target: Option<EntityId>) -> Result<(), CommandError> {
        self.command(|s| s.try_play_group(cards, target))
    }

    /// Play `card` together with every other held card of its group.
    ///
    /// A card with no group plays alone.
    pub fn play_combo(&mut self, card: EntityId, target: Option<EntityId>) -> Result<(), CommandError> {
        self.command(|s| {
            let cards = s.combo_for(card)?;
            s.try_play_group(&cards, target)
        })
    }

    /// Activate an active skill.
    pub fn use_skill(&mut self, skill: EntityId, target: Option<EntityId>) -> Result<(), CommandError> {
        self.command(|s| s.try_use_skill(skill, target))
    }

    /// End the player turn; the enemy phase runs before this returns.
    pub fn end_turn(&mut self) -> Result<(), CommandError> {
        self.command(|s| {
            s.require_player_turn()?;
            s.finish_player_turn(false);
            Ok(())
        })
    }

    /// Take a reward and move on to the next level.
    pub fn select_reward(&mut self, choice: RewardChoice) -> Result<(), CommandError> {
        self.command(|s| s.try_select_reward(choice))
    }

    /// Decline the reward and move on to the next level.
    pub fn skip_reward(&mut self) -> Result<(), CommandError> {
        self.command(|s| {
            s.require_phase(Phase::Reward)?;
            s.timeline.emit(GameEvent::RewardSkipped);
            tracing::info!(level = s.level, "reward skipped");
            s.next_level();
            Ok(())
        })
    }

    /// Leave the run.
    pub fn abandon_run(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        tracing::info!(level = self.level, "run abandoned");
        self.scheduler.clear();
        self.victory_pending = false;
        self.set_phase(Phase::GameOver);
    }

    /// Move the logical clock forward, firing any transition that came due.
    pub fn advance(&mut self, ms: u64) {
        let mut step = ms;
        loop {
            let fired = self.scheduler.advance(step);
            step = 0;
            if fired.is_empty() {
                break;
            }
            for (transition, due_ms) in fired {
                self.timeline.catch_up(due_ms);
                self.fire(transition);
            }
        }
        self.timeline.catch_up(self.scheduler.now_ms());
    }

    // === Command plumbing ===

    fn command<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, CommandError>) -> Result<T, CommandError> {
        self.timeline.catch_up(self.scheduler.now_ms());
        f(self).map_err(|err| {
            tracing::warn!(%err, phase = %self.phase, "command rejected");
            self.timeline.emit(GameEvent::Notice(err.clone()));
            err
        })
    }

    fn require_phase(&self, phase: Phase) -> Result<(), CommandError> {
        if self.phase == phase && !self.victory_pending && self.state.is_some() {
            Ok(())
        } else {
            Err(CommandError::WrongPhase { phase: self.phase })
        }
    }

    fn require_player_turn(&self) -> Result<(), CommandError> {
        self.require_phase(Phase::PlayerTurn)
    }

    fn accepts_player_actions(&self) -> bool {
        self.require_player_turn().is_ok()
    }

    fn combat_ref(&self) -> Result<&CombatState, CommandError> {
        self.state.as_ref().ok_or(CommandError::WrongPhase { phase: self.phase })
    }

    fn validate_target(state: &CombatState, needed: bool, target: Option<EntityId>) -> Result<(), CommandError> {
        if !needed {
            return Ok(());
        }
        match target {
            None => Err(CommandError::TargetRequired),
            Some(id) if state.is_living_enemy(id) => Ok(()),
            Some(id) => Err(CommandError::InvalidTarget(id)),
        }
    }

    fn set_phase(&mut self, to: Phase) {
        let from = self.phase;
        if from == to {
            return;
        }
        tracing::info!(%from, %to, "phase change");
        self.phase = to;
        self.timeline.emit(GameEvent::PhaseChanged { from, to });
    }

    // === Character and level ===

    fn try_select_character(&mut self, character: CharacterId) -> Result<(), CommandError> {
        if self.phase != Phase::CharacterSelect {
            return Err(CommandError::WrongPhase { phase: self.phase });
        }
        let definition = self.content.character(character);
        let reached = self.progress.max_level_reached();
        if !definition.is_unlocked(reached) {
            return Err(CommandError::CharacterLocked {
                unlock_level: definition.unlock_level,
                reached,
            });
        }

        let player = definition.new_player(&mut self.ids);
        let mut deck = Vector::new();
        for template in &definition.starting_deck {
            deck.push_back(CardInstance::from_definition(self.ids.alloc(), self.content.card(*template)));
        }
        tracing::info!(?character, deck = deck.len(), "character selected");

        self.state = Some(CombatState::new(player, deck));
        self.set_phase(Phase::Loading);
        self.begin_level(1);
        Ok(())
    }

    fn begin_level(&mut self, level: u32) {
        self.level = level;
        self.rewards = None;
        self.victory_pending = false;
        self.scheduler.clear();

        let profile = self
            .profiles
            .generate_profile(level, self.content.enemy_templates(), &mut self.rng);
        match profile {
            Some(profile) => self.spawn_level(&profile),
            None => tracing::info!(level, "waiting for boss profile"),
        }
    }

    fn spawn_level(&mut self, profile: &EnemyProfile) {
        let level = self.level;
        let span = tracing::info_span!("level_start", level);
        let _enter = span.enter();

        let Some(state) = self.state.as_mut() else {
            return;
        };
        let minions = self.content.minion_templates();
        state.enemies = spawn_encounter(profile, level, &self.config, &minions, &mut self.ids, &mut self.rng);

        state.player.block = 0;
        let deck = state.deck.clone();
        state.piles.reset(&deck, &mut self.rng);
        for template in state.player.fixed_starting_hand.clone() {
            state.piles.pull_to_hand(template);
        }

        let enemies = state.enemies.iter().map(|e| e.id).collect();
        tracing::info!(level, boss = %profile.name, "level started");
        self.timeline.emit(GameEvent::LevelStarted { level, enemies });

        self.turn = 1;
        self.enter_player_turn();
    }

    // === Player turn ===

    fn enter_player_turn(&mut self) {
        self.set_phase(Phase::PlayerTurn);
        let turn = self.turn;
        let Some(state) = self.state.as_mut() else {
            return;
        };

        state.player.block = 0;
        state.player.current_energy = state.player.max_energy;
        self.timeline.emit(GameEvent::TurnStarted { turn });

        let burn = state.player.statuses.get(StatusKind::Burn);
        if burn > 0 {
            let amount = state.player.lose_hp(burn);
            self.timeline.emit(GameEvent::BurnTick {
                target: Combatant::Player,
                amount,
            });
            if state.player.is_dead() {
                self.game_over();
                return;
            }
        }

        state.player.statuses.decay();
        for skill in &mut state.player.skills {
            skill.tick_cooldown();
        }
        let report = state.piles.draw_to(state.player.base_draw_count, &mut self.rng);
        emit_draw(&mut self.timeline, &report);
        tracing::debug!(turn, hand = state.piles.hand().len(), "player turn started");

        self.check_auto_end();
    }

    /// Schedule an auto-end if nothing in hand or among the skills is usable.
    fn check_auto_end(&mut self) {
        if !self.accepts_player_actions() || self.scheduler.is_scheduled(Transition::AutoEndTurn) {
            return;
        }
        let Some(state) = self.state.as_ref() else {
            return;
        };
        if state.living_enemy_count() == 0 || state.has_legal_action() {
            return;
        }

        let delay_ms = self.config.timing.auto_end_delay_ms;
        tracing::debug!(delay_ms, "no legal action, auto-end scheduled");
        self.scheduler
            .schedule(Transition::AutoEndTurn, self.timeline.cursor_ms() + delay_ms);
        self.timeline.emit(GameEvent::AutoEndScheduled { delay_ms });
    }

    fn combo_for(&self, card: EntityId) -> Result<Vec<EntityId>, CommandError> {
        self.require_player_turn()?;
        let state = self.combat_ref()?;
        let lead = state.piles.in_hand(card).ok_or(CommandError::UnknownCard(card))?;

        let mut cards = vec![card];
        if let Some(tag) = &lead.group_tag {
            cards.extend(
                state
                    .piles
                    .hand()
                    .iter()
                    .filter(|c| c.id != card && c.in_group(tag))
                    .map(|c| c.id),
            );
        }
        Ok(cards)
    }

    fn try_play_group(&mut self, cards: &[EntityId], target: Option<EntityId>) -> Result<(), CommandError> {
        self.require_player_turn()?;
        if cards.is_empty() {
            return Err(CommandError::EmptyGroup);
        }
        let state = self.combat_ref()?;

        let mut seen = FxHashSet::default();
        let mut order = Vec::with_capacity(cards.len());
        let mut total_cost = 0;
        let mut needs_target = false;
        for &id in cards {
            if !seen.insert(id) {
                continue;
            }
            let card = state.piles.in_hand(id).ok_or(CommandError::UnknownCard(id))?;
            total_cost += card.cost;
            needs_target |= card.needs_target();
            order.push(id);
        }
        Self::validate_target(state, needs_target, target)?;
        if !state.player.can_afford(total_cost) {
            return Err(CommandError::NotEnoughEnergy {
                needed: total_cost,
                available: state.player.current_energy,
            });
        }

        if let Some(state) = self.state.as_mut() {
            state.player.spend_energy(total_cost);
        }
        for (i, id) in order.into_iter().enumerate() {
            if self.state.as_ref().is_some_and(|s| s.player.is_dead()) {
                break;
            }
            if i > 0 {
                self.timeline.wait(self.config.timing.batch_stagger_ms);
            }
            self.resolve_card(id, target);
        }

        self.after_action();
        Ok(())
    }

    /// Move a paid-for card to discard and resolve its effects.
    fn resolve_card(&mut self, id: EntityId, target: Option<EntityId>) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let Some(card) = state.piles.take_from_hand(id) else {
            return;
        };
        state.piles.discard(card.clone());

        tracing::debug!(%card, ?target, "card played");
        self.timeline.emit(GameEvent::CardPlayed {
            card: id,
            template: card.template,
            target,
        });

        let doubled = state.player.statuses.has(StatusKind::DoubleNextAttack);
        let mut ctx = ResolverContext::new(state, &mut self.rng, &mut self.timeline, &self.config.timing);
        EffectResolver::resolve_all(&mut ctx, &card.effects, Combatant::Player, target);

        if doubled && card.is_attack() {
            state.player.statuses.remove(StatusKind::DoubleNextAttack);
            self.timeline.emit(GameEvent::StatusConsumed {
                target: Combatant::Player,
                status: StatusKind::DoubleNextAttack,
            });
        }
    }

    fn try_use_skill(&mut self, skill_id: EntityId, target: Option<EntityId>) -> Result<(), CommandError> {
        self.require_player_turn()?;
        let state = self.combat_ref()?;
        let skill = state
            .player
            .skills
            .iter()
            .find(|s| s.id == skill_id)
            .ok_or(CommandError::UnknownSkill(skill_id))?;

        let Some(cost) = skill.cost() else {
            return Err(CommandError::PassiveSkill(skill_id));
        };
        if !skill.is_ready() {
            return Err(CommandError::SkillOnCooldown {
                skill: skill_id,
                remaining: skill.remaining_cooldown(),
            });
        }
        let needs_target = skill.effects().iter().any(Effect::needs_target);
        Self::validate_target(state, needs_target, target)?;
        if !state.player.can_afford(cost) {
            return Err(CommandError::NotEnoughEnergy {
                needed: cost,
                available: state.player.current_energy,
            });
        }

        let Some(state) = self.state.as_mut() else {
            return Ok(());
        };
        let Some(skill) = state.player.skills.iter_mut().find(|s| s.id == skill_id) else {
            return Ok(());
        };
        skill.trigger_cooldown();
        let template = skill.template;
        let effects: Vec<Effect> = skill.effects().to_vec();
        state.player.spend_energy(cost);

        tracing::debug!(skill = %skill_id, ?template, ?target, "skill used");
        self.timeline.emit(GameEvent::SkillUsed {
            skill: skill_id,
            template,
            target,
        });
        let mut ctx = ResolverContext::new(state, &mut self.rng, &mut self.timeline, &self.config.timing);
        EffectResolver::resolve_all(&mut ctx, &effects, Combatant::Player, target);

        self.after_action();
        Ok(())
    }

    /// Loss check, then win check, then the auto-end check.
    fn after_action(&mut self) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        if state.player.is_dead() {
            self.game_over();
        } else if state.all_enemies_dead() {
            self.victory();
        } else {
            self.check_auto_end();
        }
    }

    fn finish_player_turn(&mut self, auto: bool) {
        self.scheduler.cancel(Transition::AutoEndTurn);
        let turn = self.turn;
        let Some(state) = self.state.as_mut() else {
            return;
        };

        for (card, passive) in state.piles.hand_turn_end_passives() {
            tracing::debug!(%card, ?passive, "held card passive");
            match passive {
                HandPassive::HealOnTurnEnd(amount) => {
                    let healed = state.player.heal(amount);
                    self.timeline.emit(GameEvent::Healed {
                        target: Combatant::Player,
                        amount: healed,
                    });
                }
                HandPassive::BlockOnTurnEnd(amount) => {
                    state.player.gain_block(amount);
                    self.timeline.emit(GameEvent::BlockGained {
                        target: Combatant::Player,
                        amount,
                    });
                }
                HandPassive::DamageBoost(_) => {}
            }
        }
        let aura = state.player.passive_turn_end_heal();
        if aura > 0 {
            let healed = state.player.heal(aura);
            self.timeline.emit(GameEvent::Healed {
                target: Combatant::Player,
                amount: healed,
            });
        }

        let count = state.piles.discard_hand();
        self.timeline.emit(GameEvent::HandDiscarded { count });
        self.timeline.emit(GameEvent::TurnEnded { turn, auto });
        tracing::debug!(turn, auto, "player turn ended");

        self.run_enemy_phase();
    }

    // === Enemy turn ===

    fn run_enemy_phase(&mut self) {
        self.set_phase(Phase::EnemyTurn);
        let Some(state) = self.state.as_mut() else {
            return;
        };

        let minions = self.content.minion_templates();
        let enemy_turn = EnemyTurn {
            config: &self.config,
            minions: &minions,
            level: self.level,
            turn: self.turn,
        };
        let mut ctx = ResolverContext::new(state, &mut self.rng, &mut self.timeline, &self.config.timing);
        let survived = run_enemy_turn(&mut ctx, &mut self.ids, &enemy_turn);

        if !survived {
            self.game_over();
        } else if state.all_enemies_dead() {
            self.victory();
        } else {
            self.turn += 1;
            self.enter_player_turn();
        }
    }

    // === Outcomes ===

    fn victory(&mut self) {
        if self.victory_pending || self.phase.is_terminal() {
            return;
        }
        tracing::info!(level = self.level, turn = self.turn, "victory");
        self.victory_pending = true;
        self.scheduler.cancel(Transition::AutoEndTurn);
        self.timeline.emit(GameEvent::Victory { level: self.level });
        self.scheduler.schedule(
            Transition::EnterReward,
            self.timeline.cursor_ms() + self.config.timing.reward_delay_ms,
        );
    }

    fn game_over(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        tracing::info!(level = self.level, turn = self.turn, "defeat");
        self.scheduler.clear();
        self.victory_pending = false;
        self.timeline.emit(GameEvent::Defeat { level: self.level });
        self.set_phase(Phase::GameOver);
    }

    fn fire(&mut self, transition: Transition) {
        match transition {
            Transition::AutoEndTurn => {
                let still_stuck = self.accepts_player_actions()
                    && self.state.as_ref().is_some_and(|s| !s.has_legal_action());
                if still_stuck {
                    self.finish_player_turn(true);
                } else {
                    tracing::debug!("auto-end dropped, a legal action appeared");
                }
            }
            Transition::EnterReward => {
                if self.victory_pending && !self.phase.is_terminal() {
                    self.enter_reward();
                }
            }
        }
    }

    // === Rewards ===

    fn enter_reward(&mut self) {
        self.victory_pending = false;
        let boss_defeated = self.state.as_ref().is_some_and(CombatState::has_boss);
        let offer = roll_rewards(
            self.content.reward_pools(),
            self.config.reward_card_count,
            boss_defeated,
            &mut self.rng,
        );
        tracing::info!(level = self.level, cards = ?offer.cards, skill = ?offer.skill, "rewards offered");
        self.timeline.emit(GameEvent::RewardsOffered {
            cards: offer.cards.clone(),
            skill: offer.skill,
        });
        self.rewards = Some(offer);
        self.set_phase(Phase::Reward);
    }

    fn try_select_reward(&mut self, choice: RewardChoice) -> Result<(), CommandError> {
        self.require_phase(Phase::Reward)?;
        let offer = self.rewards.as_ref().ok_or(CommandError::NoRewardPending)?;

        match choice {
            RewardChoice::Card(index) => {
                let template = *offer.cards.get(index).ok_or(CommandError::InvalidRewardChoice)?;
                let card = CardInstance::from_definition(self.ids.alloc(), self.content.card(template));
                let id = card.id;
                if let Some(state) = self.state.as_mut() {
                    state.deck.push_back(card);
                }
                tracing::info!(?template, %id, "card reward taken");
                self.timeline.emit(GameEvent::CardRewardTaken { template, card: id });
            }
            RewardChoice::Skill => {
                let template = offer.skill.ok_or(CommandError::InvalidRewardChoice)?;
                let skill = Skill::from_definition(self.ids.alloc(), &self.content.skill(template));
                let id = skill.id;
                if let Some(state) = self.state.as_mut() {
                    state.player.skills.push(skill);
                }
                tracing::info!(?template, %id, "skill reward taken");
                self.timeline.emit(GameEvent::SkillRewardTaken { template, skill: id });
            }
        }

        self.next_level();
        Ok(())
    }

    /// Heal, bump and report the level, then load it.
    fn next_level(&mut self) {
        self.rewards = None;
        if let Some(state) = self.state.as_mut() {
            let healed = state.player.heal(self.config.reward_heal);
            self.timeline.emit(GameEvent::Healed {
                target: Combatant::Player,
                amount: healed,
            });
        }

        let level = self.level + 1;
        self.progress.record_level(level);
        self.timeline.emit(GameEvent::LevelReached { level });
        self.set_phase(Phase::Loading);
        self.begin_level(level);
    }
}
