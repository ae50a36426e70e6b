//! Enemy templates and the profile generator seam.
//!
//! Templates are the fixed roster minions are drawn from. The boss of a
//! level comes from a `ProfileGenerator`, which may be slow or external:
//! returning `None` tells the session to wait for the profile to be
//! supplied later.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// A fixed enemy archetype.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub name: String,
    pub description: String,
    pub emoji: String,
    pub is_boss: bool,
}

impl EnemyTemplate {
    fn new(name: &str, description: &str, emoji: &str, is_boss: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            emoji: emoji.into(),
            is_boss,
        }
    }
}

/// Identity of the enemy leading a level's encounter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyProfile {
    pub name: String,
    pub description: String,
    pub emoji: String,
    pub is_boss: bool,
}

impl From<&EnemyTemplate> for EnemyProfile {
    fn from(template: &EnemyTemplate) -> Self {
        Self {
            name: template.name.clone(),
            description: template.description.clone(),
            emoji: template.emoji.clone(),
            is_boss: template.is_boss,
        }
    }
}

/// The built-in roster: six minions, four bosses.
#[must_use]
pub fn enemy_templates() -> Vec<EnemyTemplate> {
    vec![
        EnemyTemplate::new("Grumpy Slime", "In a foul mood, probably because it is green.", "🤢", false),
        EnemyTemplate::new("Slacking Skeleton", "Caught playing on its phone during work hours.", "💀", false),
        EnemyTemplate::new("Intern Goblin", "Has to beat you to get a permanent contract.", "👺", false),
        EnemyTemplate::new("Night-Owl Bat", "Darker eye bags than yours and a worse temper.", "🦇", false),
        EnemyTemplate::new("Antisocial Cactus", "Does not want to talk. Only wants to prick.", "🌵", false),
        EnemyTemplate::new("Lost Ghost", "Cannot find its way home, so it haunts you instead.", "👻", false),
        EnemyTemplate::new("996 Overlord", "Commands endless projects and endless overtime.", "😈", true),
        EnemyTemplate::new("Rampaging Mech", "A system bug convinced it to destroy the world.", "🤖", true),
        EnemyTemplate::new("Ancient Dragon", "Looks fierce, but is only guarding its snacks.", "🐉", true),
        EnemyTemplate::new("Alien Commander", "Plans to conquer Earth with memes.", "👽", true),
    ]
}

/// Produces the boss profile for a level.
pub trait ProfileGenerator {
    /// The profile for `level`, or `None` if it is not ready yet.
    ///
    /// When `None` is returned the session stays in `Loading` until
    /// `GameSession::finish_level` is called with a profile.
    fn generate_profile(&mut self, level: u32, templates: &[EnemyTemplate], rng: &mut GameRng) -> Option<EnemyProfile>;
}

/// Picks a boss template uniformly at random.
#[derive(Clone, Copy, Debug, Default)]
pub struct BossPicker;

impl ProfileGenerator for BossPicker {
    fn generate_profile(&mut self, level: u32, templates: &[EnemyTemplate], rng: &mut GameRng) -> Option<EnemyProfile> {
        let bosses: Vec<&EnemyTemplate> = templates.iter().filter(|t| t.is_boss).collect();
        let picked = rng.choose(&bosses).map(|t| EnemyProfile::from(*t));
        tracing::debug!(level, profile = ?picked.as_ref().map(|p| &p.name), "boss profile picked");
        picked
    }
}

/// Never answers; profiles arrive through `GameSession::finish_level`.
///
/// Stands in for a generator that lives outside the engine (a network
/// service, a UI-side prompt).
#[derive(Clone, Copy, Debug, Default)]
pub struct ExternalProfiles;

impl ProfileGenerator for ExternalProfiles {
    fn generate_profile(&mut self, level: u32, _templates: &[EnemyTemplate], _rng: &mut GameRng) -> Option<EnemyProfile> {
        tracing::debug!(level, "waiting for external boss profile");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_split() {
        let templates = enemy_templates();
        assert_eq!(templates.iter().filter(|t| t.is_boss).count(), 4);
        assert_eq!(templates.iter().filter(|t| !t.is_boss).count(), 6);
    }

    #[test]
    fn test_boss_picker_only_bosses() {
        let templates = enemy_templates();
        let mut rng = GameRng::new(5);
        let mut picker = BossPicker;

        for level in 1..20 {
            let profile = picker.generate_profile(level, &templates, &mut rng).unwrap();
            assert!(profile.is_boss);
        }
    }

    #[test]
    fn test_boss_picker_without_bosses() {
        let minions: Vec<EnemyTemplate> = enemy_templates().into_iter().filter(|t| !t.is_boss).collect();
        let mut rng = GameRng::new(5);

        assert!(BossPicker.generate_profile(1, &minions, &mut rng).is_none());
    }
}
