use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn symbol(&self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Blackjack value of the rank. Aces count 11 here; the hand evaluator
    /// demotes them to 1 as needed.
    pub fn value(&self) -> u8 {
        match self {
            Rank::Ace => 11,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
        }
    }

    pub fn is_ace(&self) -> bool {
        matches!(self, Rank::Ace)
    }

    pub fn is_ten_value(&self) -> bool {
        self.value() == 10
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// A playing card. `hidden` only controls visibility (the dealer's hole card),
/// never rank or suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub hidden: bool,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            suit,
            rank,
            hidden: false,
        }
    }

    pub fn face_down(rank: Rank, suit: Suit) -> Self {
        Self {
            suit,
            rank,
            hidden: true,
        }
    }

    /// Card for a 0..52 index, suit-major (0 = A♠, 13 = A♥, ...).
    pub fn from_index(index: usize) -> Self {
        let index = index % 52;
        Self::new(Rank::ALL[index % 13], Suit::ALL[index / 13])
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    pub fn reveal(&mut self) {
        self.hidden = false;
    }

    pub fn to_display(&self) -> String {
        if self.hidden {
            "??".to_string()
        } else {
            format!("{}{}", self.rank.symbol(), self.suit.symbol())
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_is_suit_major() {
        assert_eq!(Card::from_index(0), Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(Card::from_index(12), Card::new(Rank::King, Suit::Spades));
        assert_eq!(Card::from_index(13), Card::new(Rank::Ace, Suit::Hearts));
        assert_eq!(Card::from_index(51), Card::new(Rank::King, Suit::Clubs));
    }

    #[test]
    fn test_face_cards_are_ten() {
        for rank in [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King] {
            assert_eq!(rank.value(), 10);
            assert!(rank.is_ten_value());
        }
        assert_eq!(Rank::Ace.value(), 11);
    }

    #[test]
    fn test_hidden_card_display() {
        let mut card = Card::face_down(Rank::Queen, Suit::Diamonds);
        assert_eq!(card.to_display(), "??");
        card.reveal();
        assert_eq!(card.to_display(), "Q♦");
        assert_eq!(card.rank, Rank::Queen);
    }
}
