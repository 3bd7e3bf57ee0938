use serde::{Deserialize, Serialize};

use crate::{Hand, RuleSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player,
    Dealer,
    Push,
}

/// Decide a hand against the dealer. The dealer hand must already be revealed.
pub fn winner(player: &Hand, dealer: &Hand) -> Winner {
    let p = player.evaluate();
    let d = dealer.evaluate();

    if p.is_busted {
        return Winner::Dealer;
    }
    if d.is_busted {
        return Winner::Player;
    }

    match (player.is_natural(), dealer.is_natural()) {
        (true, false) => return Winner::Player,
        (false, true) => return Winner::Dealer,
        _ => {}
    }

    match p.value.cmp(&d.value) {
        std::cmp::Ordering::Greater => Winner::Player,
        std::cmp::Ordering::Less => Winner::Dealer,
        std::cmp::Ordering::Equal => Winner::Push,
    }
}

/// Total returned to the player for `bet` (stake included).
pub fn payout(bet: u64, player: &Hand, dealer: &Hand, rules: &RuleSet) -> u64 {
    match winner(player, dealer) {
        Winner::Push => bet,
        Winner::Dealer => 0,
        Winner::Player if player.is_natural() => {
            bet + rules.blackjack_payout.calculate_payout(bet)
        }
        Winner::Player => bet * 2,
    }
}

/// Amount returned when a hand is surrendered.
pub fn surrender_refund(bet: u64) -> u64 {
    bet / 2
}

/// Insurance costs half the main bet, rounded down.
pub fn insurance_cost(bet: u64) -> u64 {
    bet / 2
}

/// Insurance pays 2:1 when the dealer holds blackjack.
pub fn insurance_payout(insurance_bet: u64, dealer: &Hand) -> u64 {
    if dealer.is_natural() {
        insurance_bet * 3
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Card, Rank, Suit};

    fn hand(ranks: &[Rank]) -> Hand {
        Hand::from_cards(ranks.iter().map(|&r| Card::new(r, Suit::Spades)).collect())
    }

    fn samples() -> Vec<Hand> {
        vec![
            hand(&[Rank::Ace, Rank::King]),
            hand(&[Rank::Ten, Rank::Queen]),
            hand(&[Rank::Seven, Rank::Four, Rank::Jack]),
            hand(&[Rank::Ten, Rank::Seven]),
            hand(&[Rank::Nine, Rank::Nine]),
            hand(&[Rank::Ten, Rank::Six, Rank::Nine]),
            hand(&[Rank::Two, Rank::Three]),
        ]
    }

    #[test]
    fn test_player_bust_loses_even_if_dealer_busts() {
        let busted = hand(&[Rank::Ten, Rank::Six, Rank::Nine]);
        assert_eq!(winner(&busted, &busted.clone()), Winner::Dealer);
    }

    #[test]
    fn test_winner_is_antisymmetric() {
        for a in samples() {
            for b in samples() {
                if a.is_busted() && b.is_busted() {
                    continue;
                }
                let ab = winner(&a, &b);
                let ba = winner(&b, &a);
                assert_eq!(ab == Winner::Player, ba == Winner::Dealer);
                assert_eq!(ab == Winner::Push, ba == Winner::Push);
            }
        }
    }

    #[test]
    fn test_natural_beats_three_card_twenty_one() {
        let natural = hand(&[Rank::Ace, Rank::King]);
        let three_card = hand(&[Rank::Seven, Rank::Four, Rank::Jack]);
        assert_eq!(winner(&natural, &three_card), Winner::Player);
        assert_eq!(winner(&three_card, &natural), Winner::Dealer);
        assert_eq!(winner(&natural, &natural.clone()), Winner::Push);
    }

    #[test]
    fn test_push_returns_bet() {
        for rules in [RuleSet::vegas(), RuleSet::european(), RuleSet::atlantic_city()] {
            for bet in [1, 7, 10, 250] {
                let twenty = hand(&[Rank::Ten, Rank::Queen]);
                assert_eq!(payout(bet, &twenty, &twenty.clone(), &rules), bet);
            }
        }
    }

    #[test]
    fn test_blackjack_pays_three_to_two() {
        let natural = hand(&[Rank::Ace, Rank::King]);
        let twenty = hand(&[Rank::Ten, Rank::Queen]);
        assert_eq!(payout(10, &natural, &twenty, &RuleSet::vegas()), 25);
        assert_eq!(payout(10, &natural, &twenty, &RuleSet::atlantic_city()), 25);
        // floor(5 * 1.5) = 7
        assert_eq!(payout(5, &natural, &twenty, &RuleSet::vegas()), 12);
    }

    #[test]
    fn test_split_twenty_one_pays_even_money() {
        let mut split_21 = hand(&[Rank::Ace, Rank::King]);
        split_21.from_split = true;
        let twenty = hand(&[Rank::Ten, Rank::Queen]);
        assert_eq!(payout(10, &split_21, &twenty, &RuleSet::vegas()), 20);
    }

    #[test]
    fn test_loss_and_regular_win() {
        let rules = RuleSet::vegas();
        let seventeen = hand(&[Rank::Ten, Rank::Seven]);
        let eighteen = hand(&[Rank::Nine, Rank::Nine]);
        assert_eq!(payout(10, &eighteen, &seventeen, &rules), 20);
        assert_eq!(payout(10, &seventeen, &eighteen, &rules), 0);
    }

    #[test]
    fn test_side_amounts() {
        assert_eq!(surrender_refund(25), 12);
        assert_eq!(insurance_cost(25), 12);
        assert_eq!(insurance_payout(5, &hand(&[Rank::Ace, Rank::Queen])), 15);
        assert_eq!(insurance_payout(5, &hand(&[Rank::Ace, Rank::Nine])), 0);
    }
}
