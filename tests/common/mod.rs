//! Shared fixtures for integration tests.

#![allow(dead_code)]

use deck_descent::content::{character_definition, CharacterDefinition, CharacterId, StaticContent};
use deck_descent::{CardTemplateId, EntityId, GameEvent, GameSession, Intent, RulesConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Route engine logs to the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env())
        .try_init();
}

/// The Warrior with a 30-card deck of one template.
pub fn warrior_with(template: CardTemplateId) -> CharacterDefinition {
    let mut warrior = character_definition(CharacterId::Warrior);
    warrior.starting_deck = vec![template; 30];
    warrior
}

/// A started Warrior session built from `warrior`.
pub fn session_with(warrior: CharacterDefinition, config: RulesConfig, seed: u64) -> GameSession {
    init_tracing();
    let mut session = GameSession::builder(seed)
        .config(config)
        .content(StaticContent::new().with_character(warrior))
        .build();
    session
        .select_character(CharacterId::Warrior)
        .expect("warrior is always unlocked");
    session.drain_events();
    session
}

/// Strip the encounter down to its leader with `hp` HP and a weak attack.
pub fn solo_enemy(session: &mut GameSession, hp: i32) -> EntityId {
    let combat = session.combat_mut().expect("combat running");
    combat.enemies.truncate(1);
    let enemy = &mut combat.enemies[0];
    enemy.max_hp = hp;
    enemy.current_hp = hp;
    enemy.block = 0;
    enemy.statuses.clear();
    enemy.intent = Intent::attack(1);
    enemy.id
}

/// First card in hand.
pub fn first_card(session: &GameSession) -> EntityId {
    session.hand()[0].id
}

pub fn events(session: &mut GameSession) -> Vec<GameEvent> {
    session.drain_events().into_iter().map(|e| e.event).collect()
}
