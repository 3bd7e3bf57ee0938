use rand::seq::SliceRandom;
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

use crate::error::{Error, Result};
use crate::Card;

/// A multi-deck shoe. Cards are dealt from the back of `cards`.
#[derive(Debug, Clone)]
pub struct Shoe {
    decks: u8,
    cards: Vec<Card>,
    total: usize,
    rng: ChaCha8Rng,
}

impl Shoe {
    pub fn new(decks: u8, seed: u64) -> Self {
        Self::with_rng(decks, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy(decks: u8) -> Self {
        Self::with_rng(decks, ChaCha8Rng::from_entropy())
    }

    fn with_rng(decks: u8, rng: ChaCha8Rng) -> Self {
        let decks = decks.max(1);
        let mut shoe = Self {
            decks,
            cards: Vec::new(),
            total: decks as usize * 52,
            rng,
        };
        shoe.shuffle();
        shoe
    }

    /// A shoe that deals exactly `cards`, first card first. Reshuffling it
    /// rebuilds a regular single deck.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let total = cards.len();
        let mut cards = cards;
        cards.reverse();
        Self {
            decks: 1,
            cards,
            total,
            rng: ChaCha8Rng::seed_from_u64(0),
        }
    }

    pub fn shuffle(&mut self) {
        self.cards.clear();
        for _ in 0..self.decks {
            self.cards.extend((0..52).map(Card::from_index));
        }
        self.total = self.cards.len();
        self.cards.shuffle(&mut self.rng);
        log::debug!("Shuffled {} deck shoe", self.decks);
    }

    pub fn deal(&mut self) -> Result<Card> {
        self.cards.pop().ok_or_else(|| {
            log::warn!("Shoe exhausted after {} cards", self.total);
            Error::ShoeExhausted
        })
    }

    pub fn decks(&self) -> u8 {
        self.decks
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Fraction of the shoe already dealt.
    pub fn penetration(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        1.0 - self.cards.len() as f64 / self.total as f64
    }

    pub fn needs_reshuffle(&self, threshold: f64) -> bool {
        self.penetration() >= threshold
    }
}
