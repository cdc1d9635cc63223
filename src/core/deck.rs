//! The 52-card deck.
//!
//! A `Deck` owns an ordered list of cards (index 0 is the bottom, the last
//! element is the top) and the random source used to shuffle it.
//!
//! ## Usage
//!
//! ```
//! use klondike_rules::core::{Deck, GameRng};
//!
//! let mut deck = Deck::with_rng(GameRng::new(42));
//! deck.shuffle();
//!
//! let top = deck.deal_card();
//! assert!(top.is_some());
//! assert_eq!(deck.len(), 51);
//! ```

use std::fmt;

use super::card::{Card, Rank, Suit};
use super::rng::{GameRng, RandomSource};

/// Number of cards in one standard deck.
pub const DECK_SIZE: usize = 52;

/// An ordered deck of cards with an injectable random source.
#[derive(Clone)]
pub struct Deck<R = GameRng> {
    cards: Vec<Card>,
    rng: R,
}

impl Deck<GameRng> {
    /// A fresh canonical deck with an entropy-seeded RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(GameRng::from_entropy())
    }
}

impl Default for Deck<GameRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> Deck<R> {
    /// A fresh canonical deck using `rng` for shuffling.
    ///
    /// Cards are ordered suit-major, then rank-major: all Hearts Ace to
    /// King, then Clubs, Diamonds, Spades.
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self::with_decks(1, rng)
    }

    /// `count` canonical decks concatenated, for multi-deck variants.
    #[must_use]
    pub fn with_decks(count: usize, rng: R) -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE * count);
        for _ in 0..count {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(rank, suit));
                }
            }
        }
        Self { cards, rng }
    }

    /// Fisher-Yates shuffle in place.
    ///
    /// For `n` from `len` down to 2, picks `k = floor(random() * n)` and
    /// swaps positions `k` and `n - 1`. Every position is visited once.
    pub fn shuffle(&mut self) {
        let mut n = self.cards.len();
        while n > 1 {
            let k = pick_index(self.rng.next_f64(), n);
            self.cards.swap(k, n - 1);
            n -= 1;
        }
    }

    /// Remove and return the top card, or `None` if the deck is empty.
    pub fn deal_card(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Put a card on top of the deck.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Cards bottom to top.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Seed of the random source, if it has one.
    ///
    /// A fresh deck built from the same seed and shuffled once reproduces
    /// this deck's first shuffle.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.rng.replay_seed()
    }

    /// Move every card out of the deck, leaving it empty.
    pub(crate) fn take_cards(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }
}

/// Map a float in `[0, 1)` onto `0..n`.
///
/// Out-of-range floats from a misbehaving source are clamped rather than
/// indexing out of bounds.
fn pick_index(random: f64, n: usize) -> usize {
    let k = (random * n as f64).floor();
    if k.is_nan() || k < 0.0 {
        0
    } else {
        (k as usize).min(n - 1)
    }
}

impl<R> fmt::Debug for Deck<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deck").field("cards", &self.cards).finish_non_exhaustive()
    }
}
