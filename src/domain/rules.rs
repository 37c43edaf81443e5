//! War round resolution: the single rule evaluator shared by the
//! single-player and multiplayer drivers.
//!
//! Decks are FIFO queues: cards are drawn from the front, won cards are
//! appended to the back. The resolver mutates the two decks in place and
//! reports the outcome as state plus a user-facing message; expected game
//! flow never produces an `Err`.

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::domain::Card;

/// Face-down cards each side stakes when a round ties.
pub const WAR_FACEDOWN: usize = 3;

/// The two sides of a game. Side A is the local player (or the table host),
/// side B the bot (or the guest).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Display names for the two sides, used to render outcome messages.
#[derive(Debug, Copy, Clone)]
pub struct SideNames<'a> {
    pub a: &'a str,
    pub b: &'a str,
}

impl SideNames<'_> {
    fn name(&self, side: Side) -> &str {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeKind {
    /// A round was requested before any deal.
    NotStarted,
    /// Plain round, higher rank took both cards.
    RoundWon { by: Side },
    /// Tie escalated to war and the war card decided it.
    WarWon { by: Side },
    /// The war cards tied as well; war cards returned, the rest of the
    /// stake left play.
    DoubleTie,
    /// A deck ran out; the other side holds the game.
    GameOver { winner: Side },
}

/// Result of resolving one round. Transient: drives deck mutation and the
/// user-facing message, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    pub kind: OutcomeKind,
    /// User-facing description of the round result.
    pub message: String,
    /// Every card contested this round, in the order it was staked.
    pub stake: Vec<Card>,
    /// The two face-up cards drawn this round (side A's, side B's).
    pub drawn: Option<(Card, Card)>,
}

impl RoundOutcome {
    pub fn not_started() -> Self {
        Self {
            kind: OutcomeKind::NotStarted,
            message: "Game has not started!".to_string(),
            stake: Vec::new(),
            drawn: None,
        }
    }

    fn game_over(
        winner: Side,
        names: SideNames<'_>,
        drawn: Option<(Card, Card)>,
        stake: Vec<Card>,
    ) -> Self {
        let message = format!(
            "{} wins the game! {} ran out of cards :)",
            names.name(winner),
            names.name(winner.other())
        );
        Self {
            kind: OutcomeKind::GameOver { winner },
            message,
            stake,
            drawn,
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.kind, OutcomeKind::GameOver { .. })
    }
}

/// Resolve one round of War between two decks.
///
/// Callers guarantee the game has been dealt; an exhausted deck here means
/// the game is over, and repeated calls in that state keep reporting the
/// terminal outcome without mutating anything.
///
/// The empty-deck check is ordered: side A is examined first, so a
/// both-empty pair reports side B as the winner.
pub fn resolve_round(
    a: &mut VecDeque<Card>,
    b: &mut VecDeque<Card>,
    names: SideNames<'_>,
) -> RoundOutcome {
    if a.is_empty() {
        return RoundOutcome::game_over(Side::B, names, None, Vec::new());
    }
    if b.is_empty() {
        return RoundOutcome::game_over(Side::A, names, None, Vec::new());
    }

    let (card_a, card_b) = match (a.pop_front(), b.pop_front()) {
        (Some(ca), Some(cb)) => (ca, cb),
        _ => return RoundOutcome::game_over(Side::B, names, None, Vec::new()),
    };

    match card_a.rank.cmp(&card_b.rank) {
        Ordering::Greater => award_round(a, Side::A, card_a, card_b, names),
        Ordering::Less => award_round(b, Side::B, card_b, card_a, names),
        Ordering::Equal => resolve_war(a, b, card_a, card_b, names),
    }
}

/// Plain round win: the winner's deck gains its own card first, then the
/// loser's.
fn award_round(
    winner_deck: &mut VecDeque<Card>,
    winner: Side,
    winner_card: Card,
    loser_card: Card,
    names: SideNames<'_>,
) -> RoundOutcome {
    winner_deck.push_back(winner_card);
    winner_deck.push_back(loser_card);
    let drawn = match winner {
        Side::A => (winner_card, loser_card),
        Side::B => (loser_card, winner_card),
    };
    RoundOutcome {
        kind: OutcomeKind::RoundWon { by: winner },
        message: format!("{} wins this round!", names.name(winner)),
        stake: vec![winner_card, loser_card],
        drawn: Some(drawn),
    }
}

/// Tie escalation: both current cards go into the stake, each side adds up
/// to [`WAR_FACEDOWN`] face-down cards (fewer if short), then one war card
/// each decides the whole stake. A side that cannot produce a war card loses
/// the game on the spot.
fn resolve_war(
    a: &mut VecDeque<Card>,
    b: &mut VecDeque<Card>,
    card_a: Card,
    card_b: Card,
    names: SideNames<'_>,
) -> RoundOutcome {
    let drawn = Some((card_a, card_b));
    let mut stake = vec![card_a, card_b];
    // Each side stakes up to WAR_FACEDOWN cards but never its last one:
    // that card is reserved for the war draw below.
    let take_a = a.len().saturating_sub(1).min(WAR_FACEDOWN);
    stake.extend(a.drain(..take_a));
    let take_b = b.len().saturating_sub(1).min(WAR_FACEDOWN);
    stake.extend(b.drain(..take_b));

    let Some(war_a) = a.pop_front() else {
        return RoundOutcome::game_over(Side::B, names, drawn, stake);
    };
    let Some(war_b) = b.pop_front() else {
        a.push_front(war_a);
        return RoundOutcome::game_over(Side::A, names, drawn, stake);
    };

    match war_a.rank.cmp(&war_b.rank) {
        Ordering::Greater => award_war(a, Side::A, war_a, war_b, stake, drawn, names),
        Ordering::Less => award_war(b, Side::B, war_b, war_a, stake, drawn, names),
        Ordering::Equal => {
            // Double tie: each war card returns to its owner, the rest of
            // the stake leaves play. Pinned by a regression test.
            a.push_back(war_a);
            b.push_back(war_b);
            stake.push(war_a);
            stake.push(war_b);
            RoundOutcome {
                kind: OutcomeKind::DoubleTie,
                message: "Another tie in war! War continues!".to_string(),
                stake,
                drawn,
            }
        }
    }
}

/// War win: the whole accumulated stake plus both war cards append to the
/// winner, the winner's war card first.
fn award_war(
    winner_deck: &mut VecDeque<Card>,
    winner: Side,
    winner_war_card: Card,
    loser_war_card: Card,
    mut stake: Vec<Card>,
    drawn: Option<(Card, Card)>,
    names: SideNames<'_>,
) -> RoundOutcome {
    stake.push(winner_war_card);
    stake.push(loser_war_card);
    winner_deck.extend(stake.iter().copied());
    RoundOutcome {
        kind: OutcomeKind::WarWon { by: winner },
        message: format!("{} wins the war!", names.name(winner)),
        stake,
        drawn,
    }
}
