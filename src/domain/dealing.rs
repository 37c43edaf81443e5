//! Deck construction, shuffling, and halving.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use crate::domain::{Card, Rank, Suit};

pub const DECK_SIZE: usize = 52;

/// Generate a full 52-card deck in canonical order (suits C,D,H,S, ranks 2..A).
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Fisher-Yates shuffle driven by a seeded ChaCha RNG.
///
/// Deterministic per seed; preserves the card multiset.
pub fn shuffle_with_seed(deck: &mut [Card], seed: u64) {
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    deck.shuffle(&mut rng);
}

/// Fresh seed for a non-deterministic deal.
pub fn fresh_seed() -> u64 {
    rand::random::<u64>()
}

/// Split a deck into two contiguous halves.
///
/// The front half gets `ceil(n/2)` cards, the remainder goes to the back
/// half. For a full 52-card deck this is exactly 26/26.
pub fn deal_halves(deck: Vec<Card>) -> (Vec<Card>, Vec<Card>) {
    let split = deck.len().div_ceil(2);
    let mut front = deck;
    let back = front.split_off(split);
    (front, back)
}

/// Derive a seed for a specific deal at a table.
///
/// Unique per (table_seed, deal_no) so re-deals at the same table produce
/// different shuffles while remaining reconstructible by either client.
pub fn derive_deal_seed(table_seed: u64, deal_no: u32) -> u64 {
    table_seed
        .wrapping_add((deal_no as u64).wrapping_mul(1_000_000))
        .wrapping_add(1)
}
