use crate::Card;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandOutcome {
    Win,
    Loss,
    Push,
    Surrender,
    Blackjack,
}

/// Derived state of a card sequence, computed from visible cards only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandValue {
    pub value: u8,
    pub is_soft: bool,
    pub is_blackjack: bool,
    pub is_busted: bool,
}

/// Evaluate a blackjack hand. Hidden cards are ignored entirely.
pub fn evaluate(cards: &[Card]) -> HandValue {
    let mut total: u16 = 0;
    let mut aces = 0;
    let mut visible = 0;

    for card in cards.iter().filter(|c| !c.hidden) {
        visible += 1;
        if card.rank.is_ace() {
            aces += 1;
        }
        total += card.value() as u16;
    }

    // Demote aces from 11 to 1 one at a time
    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    let value = total.min(u8::MAX as u16) as u8;
    HandValue {
        value,
        is_soft: aces > 0 && value <= 21,
        is_blackjack: visible == 2 && value == 21,
        is_busted: value > 21,
    }
}

/// Calculate the value of a blackjack hand
pub fn calculate_hand_value(cards: &[Card]) -> u8 {
    evaluate(cards).value
}

/// Check if a hand is soft (has an ace counted as 11)
pub fn is_soft_hand(cards: &[Card]) -> bool {
    evaluate(cards).is_soft
}

pub fn is_busted(cards: &[Card]) -> bool {
    evaluate(cards).is_busted
}

/// Check if a hand is blackjack (21 with 2 cards)
pub fn is_blackjack(cards: &[Card]) -> bool {
    evaluate(cards).is_blackjack
}

/// Check if two cards can be split (same rank)
pub fn can_split_cards(card1: &Card, card2: &Card) -> bool {
    card1.rank == card2.rank
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    pub cards: Vec<Card>,
    pub doubled: bool,
    pub stood: bool,
    pub surrendered: bool,
    /// Hand was formed by splitting a pair; it can never be a natural.
    pub from_split: bool,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards,
            ..Self::default()
        }
    }

    pub fn evaluate(&self) -> HandValue {
        evaluate(&self.cards)
    }

    pub fn value(&self) -> u8 {
        self.evaluate().value
    }

    pub fn is_soft(&self) -> bool {
        self.evaluate().is_soft
    }

    pub fn is_busted(&self) -> bool {
        self.evaluate().is_busted
    }

    pub fn is_blackjack(&self) -> bool {
        self.evaluate().is_blackjack
    }

    /// Two-card 21 dealt before any further action.
    pub fn is_natural(&self) -> bool {
        !self.from_split && self.is_blackjack()
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn reveal(&mut self) {
        self.cards.iter_mut().for_each(Card::reveal);
    }

    pub fn has_hidden(&self) -> bool {
        self.cards.iter().any(|c| c.hidden)
    }

    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && can_split_cards(&self.cards[0], &self.cards[1])
    }

    /// No further player action is possible on this hand.
    pub fn is_finished(&self) -> bool {
        let value = self.evaluate();
        self.stood || self.surrendered || self.doubled || value.is_busted || value.value == 21
    }

    pub fn to_display(&self) -> String {
        self.cards
            .iter()
            .map(Card::to_display)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
