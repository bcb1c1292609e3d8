use std::fs;

use holdem_engine::cards::parse_cards;
use holdem_engine::config::{TableConfig, SEED_ENV};
use holdem_engine::deck::Deck;
use holdem_engine::engine::Engine;
use holdem_engine::errors::{ErrorKind, GameError};
use holdem_engine::player::PlayerAction;
use holdem_engine::table::Phase;

fn check_or_call(can_check: bool) -> PlayerAction {
    if can_check {
        PlayerAction::Check
    } else {
        PlayerAction::Call
    }
}

/// Everyone checks or calls until the hand is over.
fn check_down(engine: &mut Engine) {
    while engine.phase().is_betting() {
        if engine.is_automated_turn() {
            engine
                .play_automated_turn(|view, _| check_or_call(view.can_check()))
                .unwrap();
        } else {
            let seat = engine.current_player().unwrap();
            let view = engine.decision_view(seat).unwrap();
            engine.submit_action(seat, check_or_call(view.can_check())).unwrap();
        }
    }
}

#[test]
fn configure_seats_human_and_automated_players() {
    let mut engine = Engine::new(Some(1));
    engine.configure(4, 1500).unwrap();
    assert_eq!(engine.phase(), Phase::Waiting);
    let players = engine.players();
    assert_eq!(players.len(), 4);
    assert!(players.iter().all(|p| p.chips() == 1500));
    assert_eq!(players[0].name(), "You");
    assert!(!players[0].is_automated());
    assert_eq!(players[1].name(), "Alex");
    assert!(players[1..].iter().all(|p| p.is_automated()));
}

#[test]
fn configure_rejects_bad_player_counts() {
    let mut engine = Engine::new(None);
    for count in [0, 1, 9] {
        let err = engine.configure(count, 1000).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }
    assert_eq!(engine.phase(), Phase::Setup);
}

#[test]
fn configure_rejects_stacks_whose_total_overflows_the_pot() {
    let mut engine = Engine::new(Some(6));
    let err = engine.configure(2, u32::MAX).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    assert_eq!(engine.phase(), Phase::Setup);

    // the largest accepted stacks can all go in without losing a chip
    let stack = u32::MAX / 2;
    engine.configure(2, stack).unwrap();
    engine.start_hand().unwrap();
    engine.play_automated_turn(|_, _| PlayerAction::AllIn).unwrap();
    engine.submit_action(0, PlayerAction::Call).unwrap();
    assert_eq!(engine.phase(), Phase::Showdown);
    let total: u64 = engine.players().iter().map(|p| u64::from(p.chips())).sum();
    assert_eq!(total, 2 * u64::from(stack));
}

#[test]
fn commands_are_rejected_in_the_wrong_phase() {
    let mut engine = Engine::new(Some(3));
    assert!(matches!(
        engine.start_hand(),
        Err(GameError::IllegalPhase {
            phase: Phase::Setup,
            ..
        })
    ));
    assert!(matches!(
        engine.submit_action(0, PlayerAction::Check),
        Err(GameError::IllegalPhase { .. })
    ));

    engine.configure(3, 1000).unwrap();
    engine.start_hand().unwrap();
    let err = engine.configure(3, 1000).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalPhase);
    let err = engine.start_hand().unwrap_err();
    assert_eq!(
        err,
        GameError::IllegalPhase {
            phase: Phase::Preflop,
            command: "start_hand"
        }
    );
    assert!(engine.close_hand().is_err());
}

#[test]
fn blinds_and_hole_cards_for_four_players() {
    let mut engine = Engine::new(Some(5));
    engine.configure(4, 1000).unwrap();
    engine.start_hand().unwrap();

    let players = engine.players();
    assert!(players[0].is_dealer());
    assert!(players[1].is_small_blind());
    assert!(players[2].is_big_blind());
    assert_eq!(players[1].chips(), 990);
    assert_eq!(players[2].chips(), 980);
    assert_eq!(engine.pot(), 30);
    assert_eq!(engine.table().current_bet(), 20);
    assert_eq!(engine.current_player(), Some(3));
    assert!(players.iter().all(|p| p.hole_pair().is_some()));
    assert_eq!(engine.table().deck_remaining(), 52 - 8);
    assert_eq!(engine.hand_number(), 1);
}

#[test]
fn heads_up_small_blind_acts_first() {
    let mut engine = Engine::new(Some(5));
    engine.configure(2, 1000).unwrap();
    engine.start_hand().unwrap();
    let players = engine.players();
    assert!(players[0].is_dealer() && players[0].is_big_blind());
    assert!(players[1].is_small_blind());
    assert_eq!(engine.current_player(), Some(1));
}

#[test]
fn dealer_button_rotates_each_hand() {
    let mut engine = Engine::new(Some(8));
    engine.configure(3, 1000).unwrap();
    for expected in [0, 1, 2, 0] {
        engine.start_hand().unwrap();
        assert_eq!(engine.table().dealer(), Some(expected));
        check_down(&mut engine);
        assert_eq!(engine.phase(), Phase::Showdown);
    }
}

#[test]
fn same_seed_deals_same_cards() {
    let deal = |seed| {
        let mut engine = Engine::new(Some(seed));
        engine.configure(6, 1000).unwrap();
        engine.start_hand().unwrap();
        (0..6)
            .map(|s| engine.private_view(s).unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(deal(42), deal(42));
    assert_ne!(deal(42), deal(43));
}

#[test]
fn config_seed_reseeds_the_engine() {
    let mut a = Engine::new(Some(1));
    let mut b = Engine::new(Some(2));
    a.configure_with(TableConfig::new(3, 1000).with_seed(77)).unwrap();
    b.configure_with(TableConfig::new(3, 1000).with_seed(77)).unwrap();
    assert_eq!(a.seed(), 77);
    a.start_hand().unwrap();
    b.start_hand().unwrap();
    assert_eq!(a.private_view(0).unwrap(), b.private_view(0).unwrap());
}

#[test]
fn burn_cards_leave_forty_in_the_deck_heads_up() {
    let mut engine = Engine::new(Some(123));
    let config = TableConfig {
        burn_cards: true,
        ..TableConfig::new(2, 1000)
    };
    engine.configure_with(config).unwrap();
    engine.start_hand().unwrap();
    check_down(&mut engine);
    assert_eq!(engine.board().len(), 5);
    // 52 - 4 hole - 5 board - 3 burns
    assert_eq!(engine.table().deck_remaining(), 40);
}

#[test]
fn busted_seats_sit_out_and_last_stack_ends_the_game() {
    let mut engine = Engine::new(Some(1));
    engine.configure(4, 40).unwrap();
    // seat 0 gets trip aces; seats 1 and 2 are drawing dead
    let deck = Deck::stacked(parse_cards("As Ad 2c 7d 3h 8s Qc Jc Ah Kc 9d 5s 4c").unwrap()).unwrap();
    engine.start_hand_with_deck(deck).unwrap();

    assert_eq!(engine.current_player(), Some(3));
    engine.play_automated_turn(|_, _| PlayerAction::Fold).unwrap();
    engine.submit_action(0, PlayerAction::AllIn).unwrap();
    engine.run_automated(|_, _| PlayerAction::Call).unwrap();

    assert_eq!(engine.phase(), Phase::Showdown);
    let chips: Vec<u32> = engine.players().iter().map(|p| p.chips()).collect();
    assert_eq!(chips, vec![120, 0, 0, 40]);

    engine.start_hand().unwrap();
    let players = engine.players();
    assert!(players[1].is_sitting_out() && players[2].is_sitting_out());
    assert!(players[1].hole_pair().is_none());
    assert_eq!(engine.table().dealer(), Some(3));
    assert!(players[0].is_small_blind());
    assert!(players[3].is_big_blind());
    assert_eq!(engine.current_player(), Some(0));

    // heads-up all-in; seat 3 can only cover 40 of it
    engine.submit_action(0, PlayerAction::AllIn).unwrap();
    engine.run_automated(|_, _| PlayerAction::Call).unwrap();
    assert_eq!(engine.phase(), Phase::Showdown);
    let funded = engine.players().iter().filter(|p| p.chips() > 0).count();
    if funded < 2 {
        assert_eq!(engine.start_hand().unwrap_err(), GameError::NotEnoughPlayers);
    }
}

#[test]
fn short_deck_is_rejected_before_the_hand_starts() {
    let mut engine = Engine::new(Some(9));
    engine.configure(3, 1000).unwrap();
    let before = engine.snapshot(Some(0));

    let deck = Deck::stacked(parse_cards("Ah As 7c").unwrap()).unwrap();
    let err = engine.start_hand_with_deck(deck).unwrap_err();
    assert_eq!(
        err,
        GameError::DeckTooShort {
            needed: 11,
            remaining: 3
        }
    );
    assert_eq!(engine.snapshot(Some(0)), before);
    assert_eq!(engine.phase(), Phase::Waiting);
    assert_eq!(engine.hand_number(), 0);

    // one card short of a full board
    let deck = Deck::stacked(parse_cards("2c 3c 4c 5c 6c 7c 8c 9c Tc Jc").unwrap()).unwrap();
    assert!(engine.start_hand_with_deck(deck).is_err());
    assert_eq!(engine.snapshot(Some(0)), before);

    engine.start_hand().unwrap();
    assert_eq!(engine.phase(), Phase::Preflop);
    assert_eq!(engine.pot(), 30);
}

#[test]
fn burn_cards_need_three_more_cards_in_a_stacked_deck() {
    let mut engine = Engine::new(Some(9));
    engine
        .configure_with(TableConfig {
            burn_cards: true,
            ..TableConfig::new(2, 1000)
        })
        .unwrap();
    let deck = Deck::stacked(parse_cards("Ks Qs 7h 7d Js Ts 9c 7c 2h").unwrap()).unwrap();
    assert_eq!(
        engine.start_hand_with_deck(deck).unwrap_err(),
        GameError::DeckTooShort {
            needed: 12,
            remaining: 9
        }
    );
    assert_eq!(engine.phase(), Phase::Waiting);
}

#[test]
fn reset_to_setup_clears_the_table() {
    let mut engine = Engine::new(Some(4));
    engine.configure(3, 1000).unwrap();
    engine.start_hand().unwrap();
    engine.reset_to_setup();
    assert_eq!(engine.phase(), Phase::Setup);
    assert!(engine.players().is_empty());
    assert_eq!(engine.hand_number(), 0);
    assert!(engine.config().is_none());
    engine.configure(5, 500).unwrap();
    assert_eq!(engine.players().len(), 5);
}

#[test]
fn config_parses_toml_and_applies_seed_env() {
    let cfg = TableConfig::from_toml_str(
        r#"
player_count = 6
starting_chips = 1500
burn_cards = true
"#,
    )
    .unwrap();
    assert_eq!(cfg.player_count, 6);
    assert_eq!(cfg.starting_chips, 1500);
    assert!(cfg.burn_cards);
    assert_eq!(cfg.seed, None);
    assert_eq!(cfg.seat_name(1), "Alex");

    assert!(TableConfig::from_toml_str("player_count = 12").is_err());
    assert!(TableConfig::from_toml_str("player_count = \"four\"").is_err());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.toml");
    fs::write(&path, "player_count = 3\nseed = 1\n").unwrap();

    std::env::remove_var(SEED_ENV);
    assert_eq!(TableConfig::load(&path).unwrap().seed, Some(1));
    std::env::set_var(SEED_ENV, "99");
    assert_eq!(TableConfig::load(&path).unwrap().seed, Some(99));
    std::env::set_var(SEED_ENV, "not-a-number");
    assert!(TableConfig::load(&path).is_err());
    std::env::remove_var(SEED_ENV);

    let err: GameError = TableConfig::load(dir.path().join("missing.toml")).unwrap_err().into();
    assert_eq!(err.kind(), ErrorKind::InvalidConfig);
}
