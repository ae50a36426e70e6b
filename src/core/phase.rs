//! Session phases.
//!
//! ```text
//! CharacterSelect → Loading → PlayerTurn ⇄ EnemyTurn → Reward → Loading ...
//!                                  └──────────┴──→ GameOver
//! ```

use serde::{Deserialize, Serialize};

/// Where the session is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    CharacterSelect,
    /// Waiting for the enemy profile before a level can begin.
    Loading,
    PlayerTurn,
    EnemyTurn,
    Reward,
    /// Terminal.
    GameOver,
}

impl Phase {
    /// Whether the session accepts combat commands (card plays, skills, end turn).
    #[must_use]
    pub const fn is_player_turn(self) -> bool {
        matches!(self, Phase::PlayerTurn)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver)
    }

    /// Whether a fight is in progress.
    #[must_use]
    pub const fn in_combat(self) -> bool {
        matches!(self, Phase::PlayerTurn | Phase::EnemyTurn)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::CharacterSelect => "character select",
            Phase::Loading => "loading",
            Phase::PlayerTurn => "player turn",
            Phase::EnemyTurn => "enemy turn",
            Phase::Reward => "reward",
            Phase::GameOver => "game over",
        };
        f.write_str(name)
    }
}
