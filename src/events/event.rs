//! Result events.
//!
//! Every state change the session makes is reported as a `GameEvent`. The
//! state is already final when the event is emitted; events exist so a
//! presentation layer can animate what happened, in order.

use serde::{Deserialize, Serialize};

use crate::cards::CardTemplateId;
use crate::core::{Combatant, EntityId, Intent, Phase};
use crate::error::CommandError;
use crate::skills::SkillTemplateId;
use crate::status::StatusKind;

/// Something that happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    // === Flow ===
    PhaseChanged { from: Phase, to: Phase },
    LevelStarted { level: u32, enemies: Vec<EntityId> },
    TurnStarted { turn: u32 },
    TurnEnded { turn: u32, auto: bool },
    /// No card or skill is usable; the turn will end on its own.
    AutoEndScheduled { delay_ms: u64 },
    Victory { level: u32 },
    Defeat { level: u32 },

    // === Player actions ===
    CardPlayed { card: EntityId, template: CardTemplateId, target: Option<EntityId> },
    SkillUsed { skill: EntityId, template: SkillTemplateId, target: Option<EntityId> },

    // === Effects ===
    /// `amount` is HP actually lost; `blocked` is what block absorbed.
    DamageDealt { source: Combatant, target: Combatant, amount: i32, blocked: i32 },
    BlockGained { target: Combatant, amount: i32 },
    Healed { target: Combatant, amount: i32 },
    EnergyGained { amount: i32 },
    /// `total` is the stack after merging.
    StatusApplied { target: Combatant, status: StatusKind, value: i32, total: i32 },
    StatusConsumed { target: Combatant, status: StatusKind },
    CardsDrawn { requested: usize, drawn: Vec<EntityId> },
    DeckReshuffled,
    HandDiscarded { count: usize },
    /// Burn damage at the start of the holder's turn, ignoring block.
    BurnTick { target: Combatant, amount: i32 },

    // === Enemies ===
    EnemyDied { enemy: EntityId },
    EnemyActed { enemy: EntityId, intent: Intent },
    FrozenSkip { enemy: EntityId },
    EnemySummoned { summoner: EntityId, enemy: EntityId },
    /// A summon at the population cap did nothing.
    SummonFailed { summoner: EntityId },
    IntentChosen { enemy: EntityId, intent: Intent },
    Enraged { turn: u32 },

    // === Rewards and progress ===
    RewardsOffered { cards: Vec<CardTemplateId>, skill: Option<SkillTemplateId> },
    CardRewardTaken { template: CardTemplateId, card: EntityId },
    SkillRewardTaken { template: SkillTemplateId, skill: EntityId },
    RewardSkipped,
    LevelReached { level: u32 },

    /// A command was rejected; nothing changed.
    Notice(CommandError),
}

impl GameEvent {
    /// Whether this is a rejection notice rather than a state change.
    #[must_use]
    pub fn is_notice(&self) -> bool {
        matches!(self, GameEvent::Notice(_))
    }
}
