// Property-based tests for pile conservation, HP bounds and status stacking
use deck_descent::cards::{card_definition, CardInstance};
use deck_descent::content::CharacterId;
use deck_descent::zones::Piles;
use deck_descent::{
    CardTemplateId, EntityId, GameRng, GameSession, Phase, Player, StatusKind, StatusLedger,
};
use im::Vector;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum PileOp {
    Draw(usize),
    Play(usize),
    DiscardHand,
}

fn pile_op() -> impl Strategy<Value = PileOp> {
    prop_oneof![
        (0usize..10).prop_map(PileOp::Draw),
        (0usize..10).prop_map(PileOp::Play),
        Just(PileOp::DiscardHand),
    ]
}

#[derive(Clone, Debug)]
enum Command {
    PlayFirst,
    EndTurn,
    Advance(u64),
    Reward,
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => Just(Command::PlayFirst),
        2 => Just(Command::EndTurn),
        1 => (0u64..3_000).prop_map(Command::Advance),
        1 => Just(Command::Reward),
    ]
}

fn deck(size: usize) -> Vector<CardInstance> {
    (0..size)
        .map(|i| {
            let template = CardTemplateId::ALL[i % CardTemplateId::ALL.len()];
            CardInstance::from_definition(EntityId(i as u32), &card_definition(template))
        })
        .collect()
}

proptest! {
    #[test]
    fn proptest_piles_conserve_deck(
        size in 0usize..40,
        seed in any::<u64>(),
        ops in prop::collection::vec(pile_op(), 0..40)
    ) {
        let deck = deck(size);
        let expected: Vec<EntityId> = (0..size as u32).map(EntityId).collect();
        let mut rng = GameRng::new(seed);
        let mut piles = Piles::new();
        piles.reset(&deck, &mut rng);

        for op in ops {
            match op {
                PileOp::Draw(n) => {
                    let report = piles.draw(n, &mut rng);
                    prop_assert!(report.drawn.len() <= n);
                    prop_assert_eq!(report.is_short(), report.drawn.len() < n);
                }
                PileOp::Play(i) => {
                    if let Some(id) = piles.hand().get(i).map(|c| c.id) {
                        let card = piles.take_from_hand(id).unwrap();
                        piles.discard(card);
                    }
                }
                PileOp::DiscardHand => {
                    piles.discard_hand();
                }
            }
            prop_assert_eq!(piles.all_ids(), expected.clone());
        }
    }

    #[test]
    fn proptest_player_hp_stays_in_bounds(
        max_hp in 1i32..200,
        hits in prop::collection::vec((any::<bool>(), 0i32..150), 0..30)
    ) {
        let mut player = Player::new("P", "🙂", max_hp, 3);
        for (is_heal, amount) in hits {
            if is_heal {
                player.heal(amount);
            } else {
                player.take_hit(amount);
            }
            prop_assert!(player.current_hp >= 0);
            prop_assert!(player.current_hp <= player.max_hp);
        }
    }

    #[test]
    fn proptest_status_merges(
        values in prop::collection::vec(1i32..10, 1..10),
        kind in prop::sample::select(StatusKind::ALL.to_vec())
    ) {
        let mut ledger = StatusLedger::new();
        for value in &values {
            ledger.apply(kind, *value);
        }
        prop_assert_eq!(ledger.len(), 1);
        prop_assert_eq!(ledger.get(kind), values.iter().sum::<i32>());
    }

    #[test]
    fn proptest_session_invariants(
        seed in any::<u64>(),
        commands in prop::collection::vec(command(), 0..60)
    ) {
        let mut session = GameSession::new(seed);
        session.select_character(CharacterId::Warrior).unwrap();

        for command in commands {
            match command {
                Command::PlayFirst => {
                    let target = session.enemies().iter().find(|e| e.is_alive()).map(|e| e.id);
                    if let Some(card) = session.playable_cards().first().copied() {
                        let _ = session.play_card(card, target);
                    }
                }
                Command::EndTurn => {
                    let _ = session.end_turn();
                }
                Command::Advance(ms) => session.advance(ms),
                Command::Reward => {
                    let _ = session.select_reward(deck_descent::RewardChoice::Card(0));
                }
            }

            let combat = session.combat().unwrap();
            let player = &combat.player;
            prop_assert!(player.current_hp >= 0 && player.current_hp <= player.max_hp);
            for enemy in &combat.enemies {
                prop_assert!(enemy.current_hp >= 0 && enemy.current_hp <= enemy.max_hp);
            }
            if session.phase() != Phase::Loading {
                prop_assert_eq!(combat.piles.total(), combat.deck.len());
            }
            if session.phase() == Phase::GameOver {
                prop_assert!(!session.is_auto_end_scheduled());
            }
        }
    }
}
