//! Command rejections.
//!
//! Every player-facing command returns `Result<_, CommandError>`. A
//! rejected command changes no state; the session also emits a
//! `GameEvent::Notice` carrying the same error so a UI can flash a message.
//!
//! Short draws and capped summons are not errors; they are reported as
//! events.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, Phase};

/// Why a command was refused.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandError {
    /// The command is not legal in the current phase.
    WrongPhase { phase: Phase },
    NotEnoughEnergy { needed: i32, available: i32 },
    SkillOnCooldown { skill: EntityId, remaining: u32 },
    /// The card id is not in the hand.
    UnknownCard(EntityId),
    /// The player does not own this skill.
    UnknownSkill(EntityId),
    /// Passive skills cannot be activated.
    PassiveSkill(EntityId),
    /// A single-target effect was played without a target.
    TargetRequired,
    /// The target is not a living enemy.
    InvalidTarget(EntityId),
    NoRewardPending,
    InvalidRewardChoice,
    CharacterLocked { unlock_level: u32, reached: u32 },
    /// A batch play named no cards.
    EmptyGroup,
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::WrongPhase { phase } => write!(f, "not allowed during {}", phase),
            CommandError::NotEnoughEnergy { needed, available } => {
                write!(f, "not enough energy: need {}, have {}", needed, available)
            }
            CommandError::SkillOnCooldown { remaining, .. } => {
                write!(f, "skill on cooldown for {} more turn(s)", remaining)
            }
            CommandError::UnknownCard(id) => write!(f, "card {} is not in hand", id),
            CommandError::UnknownSkill(id) => write!(f, "no skill {}", id),
            CommandError::PassiveSkill(id) => write!(f, "skill {} is passive", id),
            CommandError::TargetRequired => write!(f, "choose a target"),
            CommandError::InvalidTarget(id) => write!(f, "{} is not a living enemy", id),
            CommandError::NoRewardPending => write!(f, "no reward to claim"),
            CommandError::InvalidRewardChoice => write!(f, "no such reward"),
            CommandError::CharacterLocked { unlock_level, reached } => write!(
                f,
                "character unlocks at level {} (best so far: {})",
                unlock_level, reached
            ),
            CommandError::EmptyGroup => write!(f, "no cards selected"),
        }
    }
}

impl std::error::Error for CommandError {}
