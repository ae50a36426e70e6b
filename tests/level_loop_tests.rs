//! Level loop tests.
//!
//! Victory, the reward screen, level advance and defeat:
//! - Victory waits for the reward delay and locks out commands
//! - Rewards grow the deck or the skill list, heal, and load the next level
//! - Defeat pre-empts anything scheduled
//! - Progress unlocks characters

mod common;

use common::{events, first_card, init_tracing, session_with, solo_enemy, warrior_with};
use deck_descent::content::{CharacterId, EnemyProfile, ExternalProfiles};
use deck_descent::{
    CardTemplateId, CommandError, GameEvent, GameSession, MemoryProgress, Phase, RewardChoice, RulesConfig,
    StatusKind,
};

fn won_fight(seed: u64) -> GameSession {
    let mut session = session_with(warrior_with(CardTemplateId::Strike), RulesConfig::default(), seed);
    let enemy = solo_enemy(&mut session, 5);
    session.play_card(first_card(&session), Some(enemy)).unwrap();
    session
}

/// The last kill schedules the reward screen instead of opening it.
#[test]
fn test_victory_waits_for_reward_delay() {
    let mut session = won_fight(1);

    assert!(session.is_victory_pending());
    assert_eq!(session.phase(), Phase::PlayerTurn);
    assert!(events(&mut session).contains(&GameEvent::Victory { level: 1 }));
    assert_eq!(
        session.end_turn(),
        Err(CommandError::WrongPhase { phase: Phase::PlayerTurn })
    );

    session.advance(5_000);

    assert_eq!(session.phase(), Phase::Reward);
    let offer = session.pending_rewards().unwrap();
    assert_eq!(offer.cards.len(), 3);
    assert!(offer.skill.is_some(), "a boss fell");
}

/// Taking a card adds it to the deck and loads level 2.
#[test]
fn test_card_reward_advances_level() {
    let mut session = won_fight(2);
    session.advance(5_000);
    session.combat_mut().unwrap().player.current_hp = 50;
    let offered = session.pending_rewards().unwrap().cards[0];

    session.select_reward(RewardChoice::Card(0)).unwrap();

    assert_eq!(session.level(), 2);
    assert_eq!(session.turn(), 1);
    assert_eq!(session.phase(), Phase::PlayerTurn);
    let combat = session.combat().unwrap();
    assert_eq!(combat.deck.len(), 31);
    assert_eq!(combat.piles.total(), 31);
    assert!(combat.deck.iter().any(|c| c.template == offered));
    assert_eq!(combat.player.current_hp, 60);
    assert_eq!(combat.enemies[0].max_hp, 114);
    assert_eq!(session.progress().max_level_reached(), 2);
    assert!(events(&mut session).contains(&GameEvent::LevelReached { level: 2 }));
}

#[test]
fn test_skill_reward() {
    let mut session = won_fight(3);
    session.advance(5_000);
    let offered = session.pending_rewards().unwrap().skill.unwrap();

    session.select_reward(RewardChoice::Skill).unwrap();

    let skills = &session.player().unwrap().skills;
    assert_eq!(skills.len(), 2);
    assert_eq!(skills[1].template, offered);
}

#[test]
fn test_no_skill_without_boss() {
    let mut session = session_with(warrior_with(CardTemplateId::Strike), RulesConfig::default(), 4);
    let enemy = solo_enemy(&mut session, 5);
    session.combat_mut().unwrap().enemies[0].is_boss = false;
    session.play_card(first_card(&session), Some(enemy)).unwrap();
    session.advance(5_000);

    assert!(session.pending_rewards().unwrap().skill.is_none());
    assert_eq!(
        session.select_reward(RewardChoice::Skill),
        Err(CommandError::InvalidRewardChoice)
    );
    assert_eq!(
        session.select_reward(RewardChoice::Card(7)),
        Err(CommandError::InvalidRewardChoice)
    );
    assert_eq!(session.phase(), Phase::Reward);
}

/// Skipping still heals and advances.
#[test]
fn test_skip_reward() {
    let mut session = won_fight(5);
    session.advance(5_000);
    session.combat_mut().unwrap().player.current_hp = 75;

    session.skip_reward().unwrap();

    assert_eq!(session.level(), 2);
    assert_eq!(session.player().unwrap().current_hp, 80);
    assert_eq!(session.combat().unwrap().deck.len(), 30);
    let events = events(&mut session);
    assert!(events.contains(&GameEvent::RewardSkipped));
    assert!(events.contains(&GameEvent::LevelStarted {
        level: 2,
        enemies: session.enemies().iter().map(|e| e.id).collect(),
    }));
}

/// Statuses follow the player into the next fight; Strength is permanent.
#[test]
fn test_statuses_carry_between_levels() {
    let mut session = won_fight(6);
    session
        .combat_mut()
        .unwrap()
        .player
        .statuses
        .apply(StatusKind::Strength, 4);
    session.advance(5_000);

    session.skip_reward().unwrap();

    assert_eq!(session.level(), 2);
    assert_eq!(session.player().unwrap().statuses.get(StatusKind::Strength), 4);
}

/// Dark Pact at 3 HP ends the run on the spot.
#[test]
fn test_self_damage_defeat() {
    let mut session = session_with(warrior_with(CardTemplateId::DarkPact), RulesConfig::default(), 7);
    session.combat_mut().unwrap().player.current_hp = 3;

    session.play_card(first_card(&session), None).unwrap();

    assert_eq!(session.phase(), Phase::GameOver);
    assert_eq!(session.player().unwrap().current_hp, 0);
    assert!(events(&mut session).contains(&GameEvent::Defeat { level: 1 }));
}

/// Death during an auto-ended turn clears the scheduler.
#[test]
fn test_defeat_clears_scheduler() {
    let mut warrior = warrior_with(CardTemplateId::Uppercut);
    warrior.max_energy = 1;
    let mut session = session_with(warrior, RulesConfig::default(), 8);
    {
        let combat = session.combat_mut().unwrap();
        combat.player.current_hp = 1;
    }
    assert!(session.is_auto_end_scheduled());

    session.advance(1_500);

    assert_eq!(session.phase(), Phase::GameOver);
    assert!(!session.is_auto_end_scheduled());
    let before = session.turn();
    session.advance(60_000);
    assert_eq!(session.turn(), before);
    assert_eq!(session.phase(), Phase::GameOver);
}

/// Every command is refused after game over.
#[test]
fn test_game_over_is_terminal() {
    let mut session = session_with(warrior_with(CardTemplateId::Strike), RulesConfig::default(), 9);
    session.abandon_run();

    assert!(session.end_turn().is_err());
    assert!(session.play_card(first_card(&session), None).is_err());
    assert!(session.skip_reward().is_err());
    assert_eq!(session.phase(), Phase::GameOver);
}

#[test]
fn test_progress_unlocks_mage() {
    init_tracing();
    let mut locked = GameSession::new(10);
    assert!(!locked.is_unlocked(CharacterId::Mage));
    assert_eq!(
        locked.select_character(CharacterId::Mage),
        Err(CommandError::CharacterLocked { unlock_level: 3, reached: 0 })
    );

    let mut unlocked = GameSession::builder(10).progress(MemoryProgress::starting_at(3)).build();
    unlocked.select_character(CharacterId::Mage).unwrap();

    assert_eq!(unlocked.player().unwrap().max_hp, 70);
    assert_eq!(unlocked.phase(), Phase::PlayerTurn);
}

/// With an external generator the level waits in Loading.
#[test]
fn test_deferred_profile_on_next_level() {
    init_tracing();
    let mut session = GameSession::builder(11).profiles(ExternalProfiles).build();
    session.select_character(CharacterId::Warrior).unwrap();
    assert_eq!(session.phase(), Phase::Loading);
    assert!(session.combat().unwrap().enemies.is_empty());

    assert_eq!(
        session.play_card(deck_descent::EntityId(0), None),
        Err(CommandError::WrongPhase { phase: Phase::Loading })
    );

    session.start_level(1).unwrap();
    assert_eq!(session.phase(), Phase::Loading);

    session
        .finish_level(EnemyProfile {
            name: "Alien Commander".into(),
            description: "Plans to conquer Earth with memes.".into(),
            emoji: "👽".into(),
            is_boss: true,
        })
        .unwrap();

    assert_eq!(session.phase(), Phase::PlayerTurn);
    assert_eq!(session.enemies()[0].emoji, "👽");
    assert_eq!(session.hand().len(), 8);
}
