// Proptest generators for domain types.
// Deck generators always draw from a shuffled full deck, so generated
// configurations never contain duplicate cards.

use std::collections::VecDeque;

use proptest::prelude::*;

use crate::domain::dealing::{full_deck, shuffle_with_seed};
use crate::domain::{Card, Rank, Suit};

/// Generate a random Suit
pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Clubs),
        Just(Suit::Diamonds),
        Just(Suit::Hearts),
        Just(Suit::Spades),
    ]
}

/// Generate a random Rank
pub fn rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ALL.to_vec())
}

/// Generate a single Card
pub fn card() -> impl Strategy<Value = Card> {
    (suit(), rank()).prop_map(|(suit, rank)| Card { suit, rank })
}

/// Generate a pair of disjoint decks: a shuffled full deck truncated to
/// `total` cards and split at an arbitrary point. Either deck may be empty.
pub fn deck_pair() -> impl Strategy<Value = (VecDeque<Card>, VecDeque<Card>)> {
    (any::<u64>(), 0..=52usize).prop_flat_map(|(seed, total)| {
        (Just(seed), Just(total), 0..=total)
    })
    .prop_map(|(seed, total, split)| {
        let mut deck = full_deck();
        shuffle_with_seed(&mut deck, seed);
        deck.truncate(total);
        let back = deck.split_off(split);
        (deck.into(), back.into())
    })
}

/// Like [`deck_pair`], but both decks are guaranteed non-empty.
pub fn populated_deck_pair() -> impl Strategy<Value = (VecDeque<Card>, VecDeque<Card>)> {
    (any::<u64>(), 2..=52usize).prop_flat_map(|(seed, total)| {
        (Just(seed), Just(total), 1..total)
    })
    .prop_map(|(seed, total, split)| {
        let mut deck = full_deck();
        shuffle_with_seed(&mut deck, seed);
        deck.truncate(total);
        let back = deck.split_off(split);
        (deck.into(), back.into())
    })
}

/// Deck pair whose front cards share a rank, forcing a war. `extra_a` and
/// `extra_b` are the card counts behind each front card, drawn disjointly
/// from the rest of a shuffled deck.
pub fn tied_front_pair(
    extra_a: impl Strategy<Value = usize>,
    extra_b: impl Strategy<Value = usize>,
) -> impl Strategy<Value = (VecDeque<Card>, VecDeque<Card>)> {
    (any::<u64>(), rank(), extra_a, extra_b).prop_map(|(seed, tied, extra_a, extra_b)| {
        let mut deck = full_deck();
        shuffle_with_seed(&mut deck, seed);
        let mut fronts = Vec::with_capacity(2);
        deck.retain(|c| {
            if c.rank == tied && fronts.len() < 2 {
                fronts.push(*c);
                false
            } else {
                true
            }
        });
        let mut a = VecDeque::with_capacity(1 + extra_a);
        a.push_back(fronts[0]);
        a.extend(deck.iter().take(extra_a.min(25)).copied());
        let mut b = VecDeque::with_capacity(1 + extra_b);
        b.push_back(fronts[1]);
        b.extend(deck.iter().skip(25).take(extra_b.min(25)).copied());
        (a, b)
    })
}
