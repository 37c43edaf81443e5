//! Unit tests for war round resolution: plain rounds, war escalation,
//! exhaustion, and the pinned double-tie discard behavior.

use std::collections::VecDeque;

use crate::domain::rules::{resolve_round, OutcomeKind, RoundOutcome, Side, SideNames};
use crate::domain::{try_parse_cards, Card};

const NAMES: SideNames<'static> = SideNames {
    a: "Player",
    b: "Bot",
};

fn deck(tokens: &[&str]) -> VecDeque<Card> {
    try_parse_cards(tokens.iter().copied())
        .expect("test deck tokens must parse")
        .into()
}

fn card(token: &str) -> Card {
    token.parse().expect("test card token must parse")
}

#[test]
fn higher_rank_wins_the_round() {
    let mut a = deck(&["KH", "2D"]);
    let mut b = deck(&["QS", "5D"]);

    let outcome = resolve_round(&mut a, &mut b, NAMES);

    assert_eq!(outcome.kind, OutcomeKind::RoundWon { by: Side::A });
    assert_eq!(outcome.message, "Player wins this round!");
    assert_eq!(outcome.drawn, Some((card("KH"), card("QS"))));
    // Winner nets +1 (own card returns plus the loser's), loser nets -1.
    assert_eq!(a, deck(&["2D", "KH", "QS"]));
    assert_eq!(b, deck(&["5D"]));
}

#[test]
fn lower_rank_loses_the_round() {
    let mut a = deck(&["3H"]);
    let mut b = deck(&["JC", "4D"]);

    let outcome = resolve_round(&mut a, &mut b, NAMES);

    assert_eq!(outcome.kind, OutcomeKind::RoundWon { by: Side::B });
    assert_eq!(outcome.message, "Bot wins this round!");
    assert_eq!(a, deck(&[]));
    assert_eq!(b, deck(&["4D", "JC", "3H"]));
}

#[test]
fn not_started_reports_without_mutation() {
    let outcome = RoundOutcome::not_started();
    assert_eq!(outcome.kind, OutcomeKind::NotStarted);
    assert_eq!(outcome.message, "Game has not started!");
    assert!(outcome.stake.is_empty());
}

#[test]
fn empty_deck_means_game_over_for_the_other_side() {
    let mut a = deck(&[]);
    let mut b = deck(&["2C", "3C"]);
    let outcome = resolve_round(&mut a, &mut b, NAMES);
    assert_eq!(outcome.kind, OutcomeKind::GameOver { winner: Side::B });
    assert_eq!(outcome.message, "Bot wins the game! Player ran out of cards :)");
    assert_eq!(b.len(), 2);

    let mut a = deck(&["2C"]);
    let mut b = deck(&[]);
    let outcome = resolve_round(&mut a, &mut b, NAMES);
    assert_eq!(outcome.kind, OutcomeKind::GameOver { winner: Side::A });
    assert_eq!(outcome.message, "Player wins the game! Bot ran out of cards :)");
}

#[test]
fn both_empty_degenerates_to_a_side_b_win() {
    // The empty check is ordered: side A is examined first.
    let mut a = deck(&[]);
    let mut b = deck(&[]);
    let outcome = resolve_round(&mut a, &mut b, NAMES);
    assert_eq!(outcome.kind, OutcomeKind::GameOver { winner: Side::B });
}

#[test]
fn game_over_is_stable_across_repeated_calls() {
    let mut a = deck(&[]);
    let mut b = deck(&["2C", "9H"]);
    let first = resolve_round(&mut a, &mut b, NAMES);
    let second = resolve_round(&mut a, &mut b, NAMES);
    assert_eq!(first, second);
    assert_eq!(b, deck(&["2C", "9H"]));
}

#[test]
fn war_awards_the_full_stake() {
    let mut a = deck(&["9H", "2C", "3C", "4C", "KS", "8D"]);
    let mut b = deck(&["9D", "5C", "6C", "7C", "QS", "8H"]);

    let outcome = resolve_round(&mut a, &mut b, NAMES);

    assert_eq!(outcome.kind, OutcomeKind::WarWon { by: Side::A });
    assert_eq!(outcome.message, "Player wins the war!");
    assert_eq!(outcome.drawn, Some((card("9H"), card("9D"))));
    // Stake: tie pair + 3 + 3 escalation + both war cards, winner's first.
    assert_eq!(
        outcome.stake,
        try_parse_cards(["9H", "9D", "2C", "3C", "4C", "5C", "6C", "7C", "KS", "QS"]).unwrap()
    );
    assert_eq!(
        a,
        deck(&["8D", "9H", "9D", "2C", "3C", "4C", "5C", "6C", "7C", "KS", "QS"])
    );
    assert_eq!(b, deck(&["8H"]));
    // Conservation: 12 cards in, 12 cards out.
    assert_eq!(a.len() + b.len(), 12);
}

#[test]
fn war_with_short_deck_stakes_fewer_cards() {
    // Side B holds tie card + 2 escalation + war card: escalation stops at
    // 2, reserving the last card for the war draw.
    let mut a = deck(&["9H", "2C", "3C", "4C", "KS"]);
    let mut b = deck(&["9D", "5C", "6C", "QS"]);

    let outcome = resolve_round(&mut a, &mut b, NAMES);

    assert_eq!(outcome.kind, OutcomeKind::WarWon { by: Side::A });
    assert_eq!(outcome.stake.len(), 2 + 3 + 2 + 2);
    assert_eq!(a.len(), 9);
    assert!(b.is_empty());
}

#[test]
fn war_with_two_cards_skips_escalation() {
    // After the tie draw side A holds a single card; it goes straight to
    // the war draw and still decides the round.
    let mut a = deck(&["9H", "AC"]);
    let mut b = deck(&["9D", "5C", "6C", "7C", "KD", "8S"]);

    let outcome = resolve_round(&mut a, &mut b, NAMES);

    assert_eq!(outcome.kind, OutcomeKind::WarWon { by: Side::A });
    // Stake: tie pair + 0 + 3 escalation + both war cards.
    assert_eq!(outcome.stake.len(), 2 + 0 + 3 + 2);
    assert_eq!(a.len(), 7);
    assert_eq!(b, deck(&["8S"]));
}

#[test]
fn exhaustion_at_the_war_card_ends_the_game_immediately() {
    // Side A's tie card was its last: no war card, opponent takes the game.
    let mut a = deck(&["9H"]);
    let mut b = deck(&["9D", "5C", "6C", "7C", "KD", "8S"]);

    let outcome = resolve_round(&mut a, &mut b, NAMES);

    assert_eq!(outcome.kind, OutcomeKind::GameOver { winner: Side::B });
    assert_eq!(outcome.message, "Bot wins the game! Player ran out of cards :)");
    assert!(a.is_empty());
    // No comparison happened: side B never drew its war card.
    assert_eq!(b, deck(&["KD", "8S"]));
}

#[test]
fn exhaustion_checks_side_a_first() {
    // Both sides run dry at the war card; side A's exhaustion is seen first.
    let mut a = deck(&["9H"]);
    let mut b = deck(&["9D"]);

    let outcome = resolve_round(&mut a, &mut b, NAMES);
    assert_eq!(outcome.kind, OutcomeKind::GameOver { winner: Side::B });
}

#[test]
fn double_tie_returns_war_cards_and_discards_the_rest() {
    let mut a = deck(&["9H", "2C", "3C", "4C", "KS"]);
    let mut b = deck(&["9D", "5C", "6C", "7C", "KD"]);

    let outcome = resolve_round(&mut a, &mut b, NAMES);

    assert_eq!(outcome.kind, OutcomeKind::DoubleTie);
    assert_eq!(outcome.message, "Another tie in war! War continues!");
    // Only the war cards survive, back with their owners.
    assert_eq!(a, deck(&["KS"]));
    assert_eq!(b, deck(&["KD"]));
    // Regression pin: 10 cards entered the round, 8 left play.
    assert_eq!(a.len() + b.len(), 2);
    assert_eq!(outcome.stake.len(), 10);
}

#[test]
fn winner_can_finish_opponent_through_a_war() {
    let mut a = deck(&["9H", "2C", "3C", "4C", "AS"]);
    let mut b = deck(&["9D", "5C", "6C", "7C", "2S"]);

    let outcome = resolve_round(&mut a, &mut b, NAMES);
    assert_eq!(outcome.kind, OutcomeKind::WarWon { by: Side::A });
    assert!(b.is_empty());
    assert_eq!(a.len(), 10);

    // The terminal state is reported on the next call.
    let outcome = resolve_round(&mut a, &mut b, NAMES);
    assert_eq!(outcome.kind, OutcomeKind::GameOver { winner: Side::A });
}
