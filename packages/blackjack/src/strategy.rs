use serde::{Deserialize, Serialize};

use crate::{Card, Hand, Rank, RuleSet};

/// A player decision, both as taken and as recommended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Hit,
    Stand,
    Double,
    Split,
    Surrender,
}

/// Descriptive only; never gates legality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    pub action: Move,
    pub reason: String,
    pub confidence: Confidence,
}

impl Advice {
    fn new(action: Move, confidence: Confidence, reason: impl Into<String>) -> Self {
        Self {
            action,
            reason: reason.into(),
            confidence,
        }
    }
}

/// Basic-strategy recommendation for `hand` against the dealer up-card.
///
/// `can_double` and `can_split` are taken as given: the advisor never
/// recommends an action the caller has not marked legal. Surrender is
/// additionally gated on the rules and on the hand never having been split.
pub fn advise(
    hand: &Hand,
    dealer_up: &Card,
    can_double: bool,
    can_split: bool,
    rules: &RuleSet,
    splits_so_far: u8,
    is_after_split: bool,
) -> Advice {
    let value = hand.evaluate();
    let total = value.value;
    let up = dealer_up.value();

    if rules.surrender_allowed
        && splits_so_far == 0
        && !is_after_split
        && !value.is_soft
        && hand.cards.len() == 2
    {
        if let Some(advice) = surrender_advice(total, up) {
            return advice;
        }
    }

    if can_split && hand.is_pair() {
        if let Some(advice) = pair_advice(hand.cards[0].rank, up, can_double) {
            return advice;
        }
    }

    if value.is_soft {
        soft_advice(total, up, can_double)
    } else {
        hard_advice(total, up, can_double)
    }
}

fn surrender_advice(total: u8, up: u8) -> Option<Advice> {
    match (total, up) {
        (16, 9..=11) => Some(Advice::new(
            Move::Surrender,
            Confidence::High,
            "Hard 16 against a 9, 10 or Ace loses more than half the time",
        )),
        (15, 10) => Some(Advice::new(
            Move::Surrender,
            Confidence::High,
            "Hard 15 against a 10 is better surrendered",
        )),
        _ => None,
    }
}

/// `None` when the pair should not be split and plays as a regular total.
fn pair_advice(rank: Rank, up: u8, can_double: bool) -> Option<Advice> {
    let split = |confidence, reason: &str| Some(Advice::new(Move::Split, confidence, reason));

    match rank {
        Rank::Ace => split(Confidence::High, "Always split Aces"),
        Rank::Eight => split(Confidence::High, "Always split 8s; 16 is the worst total"),
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => None,
        Rank::Five => Some(if can_double && (2..=9).contains(&up) {
            Advice::new(
                Move::Double,
                Confidence::High,
                "Pair of 5s plays as hard 10: double against 2 through 9",
            )
        } else {
            Advice::new(
                Move::Hit,
                Confidence::Medium,
                "Pair of 5s plays as hard 10: never split",
            )
        }),
        Rank::Four if (5..=6).contains(&up) => {
            split(Confidence::Low, "Split 4s only against a 5 or 6")
        }
        Rank::Two | Rank::Three | Rank::Seven if (2..=7).contains(&up) => {
            split(Confidence::Medium, "Split against a dealer 2 through 7")
        }
        Rank::Six if (2..=6).contains(&up) => {
            split(Confidence::Medium, "Split 6s against a dealer 2 through 6")
        }
        Rank::Nine if matches!(up, 2..=6 | 8 | 9) => split(
            Confidence::Medium,
            "Split 9s against 2 through 9, except 7",
        ),
        _ => None,
    }
}

fn soft_advice(total: u8, up: u8, can_double: bool) -> Advice {
    match total {
        19..=u8::MAX => Advice::new(Move::Stand, Confidence::High, "Soft 19 or better stands"),
        18 => match up {
            2..=6 if can_double => Advice::new(
                Move::Double,
                Confidence::Medium,
                "Soft 18 doubles against a weak dealer card",
            ),
            2..=8 => Advice::new(
                Move::Stand,
                Confidence::Medium,
                "Soft 18 stands against 2 through 8",
            ),
            _ => Advice::new(
                Move::Hit,
                Confidence::Medium,
                "Soft 18 is behind against 9, 10 or Ace; hit",
            ),
        },
        13..=17 if can_double && (4..=6).contains(&up) => Advice::new(
            Move::Double,
            Confidence::Medium,
            "Double soft 13 to 17 against a 4, 5 or 6",
        ),
        _ => Advice::new(
            Move::Hit,
            Confidence::High,
            "A soft hand cannot bust on one card; hit",
        ),
    }
}

fn hard_advice(total: u8, up: u8, can_double: bool) -> Advice {
    match total {
        17..=u8::MAX => Advice::new(Move::Stand, Confidence::High, "Hard 17 or better stands"),
        12..=16 if (2..=6).contains(&up) => Advice::new(
            Move::Stand,
            Confidence::Medium,
            "Stand and let the dealer bust from a weak up-card",
        ),
        12..=16 => Advice::new(
            Move::Hit,
            Confidence::Medium,
            "Dealer shows 7 or better; hit a stiff hand",
        ),
        9..=11 if double_favorable(total, up) => {
            if !can_double {
                return Advice::new(
                    Move::Hit,
                    Confidence::Medium,
                    "Doubling would be favorable but is not allowed; hit",
                );
            }
            let (confidence, reason) = match total {
                11 => (Confidence::High, "Double 11 against anything but an Ace"),
                10 => (Confidence::High, "Double 10 against 2 through 9"),
                _ => (Confidence::Medium, "Double 9 against 3 through 6"),
            };
            Advice::new(Move::Double, confidence, reason)
        }
        9..=11 => Advice::new(Move::Hit, Confidence::Medium, "Hit; doubling is not favorable"),
        _ => Advice::new(Move::Hit, Confidence::High, "Hard 8 or less always hits"),
    }
}

fn double_favorable(total: u8, up: u8) -> bool {
    match total {
        11 => up <= 10,
        10 => up <= 9,
        9 => (3..=6).contains(&up),
        _ => false,
    }
}
