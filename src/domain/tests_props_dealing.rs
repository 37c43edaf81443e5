//! Property tests for deck construction, shuffling, and halving.
//!
//! Properties tested:
//! - Shuffling is a permutation: same multiset, same length, any seed
//! - Halving is exhaustive: the two halves partition the deck
//! - The front half always gets the ceiling of n/2

use proptest::prelude::*;

use crate::domain::dealing::{deal_halves, full_deck, shuffle_with_seed, DECK_SIZE};
use crate::domain::test_prelude;
use crate::domain::Card;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: shuffle preserves the 52-card multiset for every seed
    #[test]
    fn prop_shuffle_is_a_permutation(seed in any::<u64>()) {
        let mut deck = full_deck();
        shuffle_with_seed(&mut deck, seed);
        prop_assert_eq!(deck.len(), DECK_SIZE);

        let mut sorted = deck.clone();
        sorted.sort();
        let mut reference = full_deck();
        reference.sort();
        prop_assert_eq!(sorted, reference);
    }

    /// Property: halves partition the shuffled deck, order-independent
    #[test]
    fn prop_halves_partition_the_deck(seed in any::<u64>()) {
        let mut deck = full_deck();
        shuffle_with_seed(&mut deck, seed);
        let original = deck.clone();

        let (front, back) = deal_halves(deck);
        prop_assert_eq!(front.len(), 26);
        prop_assert_eq!(back.len(), 26);

        let mut union: Vec<Card> = front.iter().chain(back.iter()).copied().collect();
        union.sort();
        let mut reference = original;
        reference.sort();
        prop_assert_eq!(union, reference);
    }

    /// Property: front half gets ceil(n/2) for any deck size
    #[test]
    fn prop_front_half_gets_the_ceiling(n in 0..=DECK_SIZE) {
        let deck: Vec<Card> = full_deck().into_iter().take(n).collect();
        let (front, back) = deal_halves(deck);
        prop_assert_eq!(front.len(), n.div_ceil(2));
        prop_assert_eq!(back.len(), n / 2);
    }
}
