//! Shuffle engine.
//!
//! Two passes over a copy of the deck:
//!
//! 1. **Orientation**: one fresh coin per card, in deck order, attached to
//!    the cards before anything moves.
//! 2. **Permutation**: backward Fisher-Yates. For `i` from `len - 1` down
//!    to 1, draw `j` uniformly in `0..=i` and swap `i` and `j`.
//!
//! The input is never touched, so one built deck can be reshuffled as
//! often as a session likes. The pass order is fixed so scripted random
//! sources reproduce the same result.

use crate::cards::Card;
use crate::core::rng::RandomSource;

/// Shuffle a deck into a new sequence with random orientations.
///
/// ## Example
///
/// ```
/// use tarot_deck::assets::NoAssets;
/// use tarot_deck::cards::DeckCatalog;
/// use tarot_deck::core::SeededRandom;
/// use tarot_deck::shuffle::shuffle;
///
/// let deck = DeckCatalog::builtin().build("standard", &NoAssets).unwrap();
/// let mut rng = SeededRandom::new(42);
///
/// let shuffled = shuffle(&deck, &mut rng);
/// assert_eq!(shuffled.len(), deck.len());
/// assert!(deck.iter().all(|c| !c.reversed));
/// ```
pub fn shuffle<R: RandomSource + ?Sized>(deck: &[Card], rng: &mut R) -> Vec<Card> {
    let mut shuffled: Vec<Card> = deck.iter().map(|card| card.oriented(rng.coin())).collect();

    for i in (1..shuffled.len()).rev() {
        let j = draw_index(rng, i);
        shuffled.swap(i, j);
    }

    shuffled
}

/// Uniform index in `0..=upper`.
fn draw_index<R: RandomSource + ?Sized>(rng: &mut R, upper: usize) -> usize {
    let bound = u32::try_from(upper + 1).unwrap_or(u32::MAX);
    rng.below(bound) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardTemplate;
    use crate::core::rng::{SeededRandom, SequenceRandom};

    fn deck(n: usize) -> Vec<Card> {
        (0..n)
            .map(|i| Card::new(i, CardTemplate::minor("Cups", format!("Card {}", i)), None))
            .collect()
    }

    fn slots(cards: &[Card]) -> Vec<usize> {
        cards.iter().map(|c| c.slot).collect()
    }

    #[test]
    fn test_empty_deck() {
        let mut rng = SequenceRandom::constant(0);
        assert!(shuffle(&[], &mut rng).is_empty());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_single_card_still_oriented() {
        let mut rng = SequenceRandom::constant(0);
        let out = shuffle(&deck(1), &mut rng);

        assert_eq!(out.len(), 1);
        assert!(out[0].reversed);
        // one orientation draw, no permutation draws
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn test_orientation_drawn_before_permutation() {
        // Orientation draws: reversed, upright, reversed; then two index draws.
        let script = vec![0, u32::MAX, 0, 3, 4];
        let mut rng = SequenceRandom::new(script);
        let out = shuffle(&deck(3), &mut rng);

        // i=2: below(3) with 3 -> 0, swap(2, 0) -> [2, 1, 0]
        // i=1: below(2) with 4 -> 0, swap(1, 0) -> [1, 2, 0]
        assert_eq!(slots(&out), vec![1, 2, 0]);
        let reversed: Vec<_> = out.iter().map(|c| (c.slot, c.reversed)).collect();
        assert_eq!(reversed, vec![(1, false), (2, true), (0, true)]);
        assert_eq!(rng.draws(), 5);
    }

    #[test]
    fn test_constant_zero_source_finishes() {
        // 0 is rejected for bound 3 by plain rejection sampling
        let mut rng = SequenceRandom::constant(0);
        let out = shuffle(&deck(3), &mut rng);

        assert_eq!(slots(&out), vec![1, 2, 0]);
        assert!(out.iter().all(|c| c.reversed));
        assert_eq!(rng.draws(), 5);

        let mut rng = SequenceRandom::constant(0);
        let mut full = slots(&shuffle(&deck(78), &mut rng));
        full.sort_unstable();
        assert_eq!(full, (0..78).collect::<Vec<_>>());
    }

    #[test]
    fn test_input_untouched() {
        let original = deck(10);
        let copy = original.clone();
        let mut rng = SeededRandom::new(3);

        let _ = shuffle(&original, &mut rng);
        assert_eq!(original, copy);
    }

    #[test]
    fn test_is_permutation() {
        let original = deck(78);
        let mut rng = SeededRandom::new(11);
        let mut out = slots(&shuffle(&original, &mut rng));
        out.sort_unstable();
        assert_eq!(out, (0..78).collect::<Vec<_>>());
    }

    #[test]
    fn test_identity_when_all_draws_hit_top() {
        // below(i + 1) returning i every time swaps each element with itself
        let original = deck(4);
        let mut rng = SequenceRandom::new(vec![u32::MAX; 4].into_iter().chain([3, 2, 1]).collect());
        let out = shuffle(&original, &mut rng);
        assert_eq!(slots(&out), vec![0, 1, 2, 3]);
        assert!(out.iter().all(|c| !c.reversed));
    }
}
