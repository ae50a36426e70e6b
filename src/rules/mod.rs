//! Game rules: the session state machine and everything it drives.
//!
//! - `GameSession`: the command surface and phase machine
//! - `enemy_ai`: the enemy phase and intent rolls
//! - `level`: encounter spawning and reward rolls
//! - `Scheduler`: transitions that wait for the clock
//!
//! Hosts only need `GameSession`; the rest is public so a custom session
//! or a balance tool can reuse the pieces.

pub mod enemy_ai;
pub mod level;
mod schedule;
mod session;

pub use enemy_ai::{roll_intent, run_enemy_turn, spawn_minion, EnemyTurn};
pub use level::{roll_rewards, spawn_encounter, RewardChoice, RewardOffer};
pub use schedule::{Scheduler, Transition};
pub use session::{GameSession, GameSessionBuilder, SessionSnapshot};
