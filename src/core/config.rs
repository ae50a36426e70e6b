//! Rules configuration.
//!
//! Every tunable number the engine uses lives here rather than inline in
//! the rules code:
//! - `RulesConfig`: HP curves, enemy magnitudes, caps, rewards
//! - `IntentWeights`: boss intent roll weights
//! - `TimingConfig`: presentation pacing offsets stamped onto events
//!
//! The session takes a config at construction and never mutates it.

use serde::{Deserialize, Serialize};

/// Relative weights for a boss's next-intent roll.
///
/// `summon` is only in play while the living enemy count is below the
/// population cap; otherwise its weight folds into `attack`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntentWeights {
    pub summon: f32,
    pub attack: f32,
    pub buff: f32,
    pub special: f32,
}

impl Default for IntentWeights {
    fn default() -> Self {
        Self {
            summon: 0.30,
            attack: 0.35,
            buff: 0.20,
            special: 0.15,
        }
    }
}

/// Presentation pacing, in milliseconds.
///
/// These never change state; they only advance the timeline cursor that
/// stamps `TimedEvent::at_ms`, and set how long a deferred transition
/// waits before firing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Projectile travel before a damage/status hit on an enemy lands.
    pub projectile_ms: u64,
    /// Gap between cards of a batch play.
    pub batch_stagger_ms: u64,
    /// Pause before each enemy acts.
    pub enemy_action_ms: u64,
    /// Pause after the enrage announcement.
    pub enrage_pause_ms: u64,
    /// Delay before a stuck player turn auto-ends.
    pub auto_end_delay_ms: u64,
    /// Delay between the last enemy dying and the reward screen.
    pub reward_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            projectile_ms: 300,
            batch_stagger_ms: 200,
            enemy_action_ms: 600,
            enrage_pause_ms: 800,
            auto_end_delay_ms: 1500,
            reward_delay_ms: 800,
        }
    }
}

/// Complete rules configuration.
///
/// ## Example
///
/// ```
/// use deck_descent::core::RulesConfig;
///
/// let config = RulesConfig::default()
///     .with_enrage_threshold(5)
///     .with_population_cap(3);
///
/// assert_eq!(config.enrage_threshold, 5);
/// assert_eq!(config.boss_hp(1), 100);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Turn count above which enemies gain +1 Strength every enemy turn.
    pub enrage_threshold: u32,
    /// Maximum number of living enemies a summon can bring the field to.
    pub population_cap: usize,

    /// Boss HP at level 1.
    pub boss_base_hp: i32,
    /// Per-level multiplicative HP growth.
    pub hp_growth: f64,
    /// Minion HP as a fraction of the boss's max HP.
    pub minion_hp_fraction: f64,
    /// Minimum and maximum minions spawned alongside the boss.
    pub initial_minions: (u32, u32),

    /// Boss attack = base + floor(level * scale).
    pub boss_attack_base: i32,
    pub boss_attack_scale: f64,
    /// Boss special = base + floor(level * scale).
    pub boss_special_base: i32,
    pub boss_special_scale: f64,
    /// Minion attack = base + floor(level * scale).
    pub minion_attack_base: i32,
    pub minion_attack_scale: f64,
    /// Multiplier a Special applies to its intent value at execution.
    pub special_multiplier: f64,
    /// Block an enemy gains from Defend/Buff.
    pub enemy_block: i32,
    /// Probability a minion rolls Buff instead of Attack.
    pub minion_buff_chance: f64,
    pub boss_weights: IntentWeights,

    /// Card choices offered after a victory.
    pub reward_card_count: usize,
    /// HP restored whenever a reward is taken or skipped.
    pub reward_heal: i32,

    pub timing: TimingConfig,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            enrage_threshold: 10,
            population_cap: 4,
            boss_base_hp: 100,
            hp_growth: 1.15,
            minion_hp_fraction: 0.3,
            initial_minions: (1, 2),
            boss_attack_base: 6,
            boss_attack_scale: 1.5,
            boss_special_base: 10,
            boss_special_scale: 2.0,
            minion_attack_base: 3,
            minion_attack_scale: 0.8,
            special_multiplier: 1.5,
            enemy_block: 10,
            minion_buff_chance: 0.4,
            boss_weights: IntentWeights::default(),
            reward_card_count: 3,
            reward_heal: 10,
            timing: TimingConfig::default(),
        }
    }
}

impl RulesConfig {
    /// Set the enrage threshold.
    #[must_use]
    pub fn with_enrage_threshold(mut self, turns: u32) -> Self {
        self.enrage_threshold = turns;
        self
    }

    /// Set the living-enemy population cap.
    #[must_use]
    pub fn with_population_cap(mut self, cap: usize) -> Self {
        self.population_cap = cap;
        self
    }

    /// Set the boss HP curve.
    #[must_use]
    pub fn with_boss_hp(mut self, base: i32, growth: f64) -> Self {
        self.boss_base_hp = base;
        self.hp_growth = growth;
        self
    }

    /// Fix the number of initial minions (min and max).
    #[must_use]
    pub fn with_initial_minions(mut self, min: u32, max: u32) -> Self {
        assert!(min <= max, "initial minion range is empty");
        self.initial_minions = (min, max);
        self
    }

    /// Replace the boss intent weights.
    #[must_use]
    pub fn with_boss_weights(mut self, weights: IntentWeights) -> Self {
        self.boss_weights = weights;
        self
    }

    /// Set the minion Buff probability.
    #[must_use]
    pub fn with_minion_buff_chance(mut self, chance: f64) -> Self {
        self.minion_buff_chance = chance;
        self
    }

    /// Set the reward card count and heal.
    #[must_use]
    pub fn with_rewards(mut self, cards: usize, heal: i32) -> Self {
        self.reward_card_count = cards;
        self.reward_heal = heal;
        self
    }

    /// Replace the pacing table.
    #[must_use]
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Boss max HP for a level: `base * growth^(level-1)`, floored.
    #[must_use]
    pub fn boss_hp(&self, level: u32) -> i32 {
        let exponent = level.saturating_sub(1) as i32;
        (f64::from(self.boss_base_hp) * self.hp_growth.powi(exponent)).floor() as i32
    }

    /// Minion max HP derived from a boss's max HP.
    #[must_use]
    pub fn minion_hp(&self, boss_max_hp: i32) -> i32 {
        (f64::from(boss_max_hp) * self.minion_hp_fraction).floor() as i32
    }

    #[must_use]
    pub fn boss_attack(&self, level: u32) -> i32 {
        scaled(self.boss_attack_base, self.boss_attack_scale, level)
    }

    #[must_use]
    pub fn boss_special(&self, level: u32) -> i32 {
        scaled(self.boss_special_base, self.boss_special_scale, level)
    }

    #[must_use]
    pub fn minion_attack(&self, level: u32) -> i32 {
        scaled(self.minion_attack_base, self.minion_attack_scale, level)
    }

    /// Special damage before modifiers: intent value times the multiplier.
    #[must_use]
    pub fn special_damage(&self, intent_value: i32) -> i32 {
        (f64::from(intent_value) * self.special_multiplier).floor() as i32
    }
}

fn scaled(base: i32, scale: f64, level: u32) -> i32 {
    base + (f64::from(level) * scale).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_curves() {
        let config = RulesConfig::default();

        assert_eq!(config.boss_hp(1), 100);
        assert_eq!(config.boss_hp(2), 114);
        assert_eq!(config.boss_hp(3), 132);
        assert_eq!(config.minion_hp(100), 30);
        assert_eq!(config.minion_hp(114), 34);
    }

    #[test]
    fn test_intent_magnitudes() {
        let config = RulesConfig::default();

        assert_eq!(config.boss_attack(1), 7);
        assert_eq!(config.boss_attack(4), 12);
        assert_eq!(config.boss_special(3), 16);
        assert_eq!(config.minion_attack(1), 3);
        assert_eq!(config.minion_attack(5), 7);
        assert_eq!(config.special_damage(16), 24);
        assert_eq!(config.special_damage(7), 10);
    }

    #[test]
    fn test_builder() {
        let config = RulesConfig::default()
            .with_enrage_threshold(3)
            .with_population_cap(6)
            .with_boss_hp(50, 1.0)
            .with_initial_minions(0, 0)
            .with_rewards(5, 0)
            .with_minion_buff_chance(1.0)
            .with_timing(TimingConfig {
                auto_end_delay_ms: 0,
                ..TimingConfig::default()
            });

        assert_eq!(config.enrage_threshold, 3);
        assert_eq!(config.population_cap, 6);
        assert_eq!(config.boss_hp(9), 50);
        assert_eq!(config.initial_minions, (0, 0));
        assert_eq!(config.reward_card_count, 5);
        assert_eq!(config.reward_heal, 0);
        assert_eq!(config.minion_buff_chance, 1.0);
        assert_eq!(config.timing.auto_end_delay_ms, 0);
        assert_eq!(config.timing.projectile_ms, 300);
    }

    #[test]
    #[should_panic(expected = "initial minion range is empty")]
    fn test_inverted_minion_range() {
        let _ = RulesConfig::default().with_initial_minions(3, 1);
    }

    #[test]
    fn test_config_serde() {
        let config = RulesConfig::default().with_enrage_threshold(7);
        let json = serde_json::to_string(&config).unwrap();
        let restored: RulesConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
