//! Turn sequencing tests: advance, skip credits, draws and recycling.

mod common;

use bugsquash::cards::{Card, CardId, Color, ModuleState};
use bugsquash::core::{
    Action, EngineConfig, GameRng, Phase, Player, PlayerId, RoomCode, RoomSettings, ValidationError,
};
use bugsquash::zones::Piles;
use bugsquash::GameStateMachine;
use common::{pid, Table};

fn started(players: usize, seed: u64) -> GameStateMachine {
    let mut machine = GameStateMachine::new(
        RoomCode::new("TURN01"),
        RoomSettings::default().max_players(6),
        EngineConfig::default(),
        GameRng::new(seed),
    );
    for n in 0..players {
        let player = Player::human(PlayerId::new(format!("p{n}")), format!("Player {n}"));
        machine
            .seat(if n == 0 { player.as_host() } else { player })
            .unwrap();
    }
    machine.start(&pid("p0")).unwrap();
    machine
}

/// The turn counter goes up each time play wraps back to the first seat.
#[test]
fn test_turn_counter_wraps() {
    let mut machine = started(3, 1);

    for (n, expected_turn) in [(0, 1), (1, 1), (2, 2)] {
        let state = machine.process_action(&Action::pass(pid(&format!("p{n}")))).unwrap();
        assert_eq!(state.turn, expected_turn);
    }
    assert!(machine.state().is_current(&pid("p0")));
}

/// Actions out of turn are refused without touching state.
#[test]
fn test_out_of_turn() {
    let mut machine = started(3, 2);
    let before = machine.snapshot();

    assert_eq!(
        machine.process_action(&Action::pass(pid("p2"))),
        Err(ValidationError::NotYourTurn)
    );
    assert_eq!(
        machine.process_action(&Action::pass(pid("nobody"))),
        Err(ValidationError::PlayerNotFound)
    );
    assert_eq!(machine.state(), &before);
}

/// A skip credit costs exactly one turn.
#[test]
fn test_skip_credit_consumed_once() {
    let mut table = Table::new(3);
    table.state.players[1].skip_turns = 1;
    let mut machine = table.machine();

    let state = machine.process_action(&Action::pass(pid("p0"))).unwrap();
    assert!(state.is_current(&pid("p2")));
    assert_eq!(state.players[1].skip_turns, 0);

    machine.process_action(&Action::pass(pid("p2"))).unwrap();
    let state = machine.process_action(&Action::pass(pid("p0"))).unwrap();
    assert!(state.is_current(&pid("p1")));
}

/// When everyone holds credits the advance still terminates.
#[test]
fn test_everyone_skipping_terminates() {
    let mut table = Table::new(3);
    for player in table.state.players.iter_mut() {
        player.skip_turns = 3;
    }
    let mut machine = table.machine();

    let state = machine.process_action(&Action::pass(pid("p0"))).unwrap();

    // One lap: p1, p2 and p0 each lose a credit and p0 is up again.
    assert!(state.is_current(&pid("p0")));
    let credits: Vec<u32> = state.players.iter().map(|p| p.skip_turns).collect();
    assert_eq!(credits, vec![2, 2, 2]);
}

/// Discarding draws back up to the previous hand size.
#[test]
fn test_discard_and_redraw() {
    let mut machine = started(2, 3);
    let hand: Vec<CardId> = machine.state().players[0].hand.iter().map(|c| c.id).collect();

    let state = machine
        .process_action(&Action::discard(pid("p0"), &hand))
        .unwrap();

    assert_eq!(state.players[0].hand.len(), 3);
    let discarded: Vec<CardId> = state.piles.discard_pile.iter().map(|c| c.id).collect();
    assert_eq!(discarded, hand);
}

/// Discards must name one to three cards that are in hand.
#[test]
fn test_discard_validation() {
    let mut machine = started(2, 4);
    let before = machine.snapshot();

    assert_eq!(
        machine.process_action(&Action::discard(pid("p0"), &[])),
        Err(ValidationError::InvalidDiscardCount(0))
    );
    assert_eq!(
        machine.process_action(&Action::discard(pid("p0"), &[CardId::new(9999)])),
        Err(ValidationError::CardNotInHand)
    );
    assert_eq!(machine.state(), &before);
}

/// With the draw pile nearly empty, the discard pile is shuffled back in.
#[test]
fn test_recycle_on_draw() {
    let mut table = Table::new(2);
    let discard: Vec<Card> = (0..20).map(|n| Card::bug(CardId::new(5000 + n), Color::Mobile)).collect();
    table.state.piles = Piles {
        draw_pile: std::iter::once(Card::bug(CardId::new(4999), Color::Mobile)).collect(),
        discard_pile: discard.into_iter().collect(),
    };
    let mut machine = table.machine();

    // p1 has an empty hand and needs three cards when their turn starts.
    let state = machine.process_action(&Action::pass(pid("p0"))).unwrap();

    assert_eq!(state.players[1].hand.len(), 3);
    assert_eq!(state.piles.draw_pile.len(), 18);
    assert!(state.piles.discard_pile.is_empty());
}

/// Discarding with only one card left to draw refills the hand to three.
#[test]
fn test_discard_with_one_card_left() {
    let mut table = Table::new(2);
    let discarded = table.give_bug(0, Color::Backend);
    table.give_bug(0, Color::Mobile);
    table.give_bug(0, Color::Frontend);
    for _ in 0..3 {
        table.give_bug(1, Color::Backend);
    }
    let discard: Vec<Card> = (0..20).map(|n| Card::bug(CardId::new(5000 + n), Color::Mobile)).collect();
    table.state.piles = Piles {
        draw_pile: std::iter::once(Card::bug(CardId::new(4999), Color::Mobile)).collect(),
        discard_pile: discard.into_iter().collect(),
    };
    let mut machine = table.machine();

    let state = machine.process_action(&Action::discard(pid("p0"), &[discarded])).unwrap();

    let hand = &state.players[0].hand;
    assert_eq!(hand.len(), 3);
    assert!(hand.iter().any(|c| c.id == CardId::new(4999)));
    assert_eq!(state.piles.discard_pile.len(), 21);
    assert!(state.piles.draw_pile.is_empty());
}

/// An empty draw pile is refilled from the discards mid-redraw, including
/// the cards just thrown away.
#[test]
fn test_discard_recycles_mid_redraw() {
    let mut table = Table::new(2);
    let first = table.give_bug(0, Color::Backend);
    let second = table.give_bug(0, Color::Mobile);
    table.give_bug(0, Color::Frontend);
    for _ in 0..3 {
        table.give_bug(1, Color::Backend);
    }
    let discard: Vec<Card> = (0..20).map(|n| Card::bug(CardId::new(5000 + n), Color::Mobile)).collect();
    table.state.piles = Piles {
        draw_pile: Default::default(),
        discard_pile: discard.into_iter().collect(),
    };
    let mut machine = table.machine();

    let state = machine
        .process_action(&Action::discard(pid("p0"), &[first, second]))
        .unwrap();

    assert_eq!(state.players[0].hand.len(), 3);
    assert!(state.piles.discard_pile.is_empty());
    assert_eq!(state.piles.draw_pile.len(), 20);
    assert!(state.is_current(&pid("p1")));
    assert_eq!(state.players[1].hand.len(), 3);
}

/// With nothing left anywhere, hands simply stay short.
#[test]
fn test_draw_with_empty_piles() {
    let mut table = Table::new(2);
    table.state.piles = Piles::default();
    let module = table.give_module(0, Color::Backend);
    let mut machine = table.machine();

    let state = machine.process_action(&Action::play(pid("p0"), module)).unwrap();

    assert!(state.players[0].hand.is_empty());
    assert!(state.players[1].hand.is_empty());
    assert!(state.is_current(&pid("p1")));
}

/// A started game conserves every card of the pool.
#[test]
fn test_card_conservation_after_moves() {
    let mut machine = started(4, 5);
    let total = EngineConfig::default().deck.total();
    assert_eq!(machine.state().card_count(), total);

    for round in 0..8 {
        let state = machine.snapshot();
        let Some(current) = state.current_player().map(|p| p.id.clone()) else {
            break;
        };
        let hand: Vec<CardId> = state.player(&current).unwrap().hand.iter().map(|c| c.id).collect();
        let action = if round % 2 == 0 {
            Action::discard(current, &hand[..1])
        } else {
            Action::pass(current)
        };
        let state = machine.process_action(&action).unwrap();
        assert_eq!(state.card_count(), total);
    }
}

/// Restarting a finished game deals a fresh table.
#[test]
fn test_restart_after_finish() {
    let mut table = Table::new(2);
    for color in Color::CONCRETE.iter().take(3) {
        table.install(0, *color, ModuleState::Free);
    }
    let module = table.give_module(0, Color::DataScience);
    let mut machine = table.machine();
    let state = machine.process_action(&Action::play(pid("p0"), module)).unwrap();
    assert_eq!(state.phase, Phase::Finished);

    let state = machine.start(&pid("p0")).unwrap();

    assert_eq!(state.phase, Phase::InProgress);
    assert_eq!(state.winner, None);
    assert!(state.players.iter().all(|p| p.modules.is_empty() && p.hand.len() == 3));
    assert_eq!(state.card_count(), EngineConfig::default().deck.total());
}
