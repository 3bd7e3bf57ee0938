use serde::{Deserialize, Serialize};

use crate::RuleSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealerAction {
    Hit,
    Stand,
}

/// Dealer drawing rule. Dealing the delayed second card under no-hole-card
/// rules is sequenced by the round, not here.
pub fn dealer_action(rules: &RuleSet, value: u8, is_soft: bool) -> DealerAction {
    if value < 17 || (value == 17 && is_soft && rules.dealer_hits_soft_17) {
        DealerAction::Hit
    } else {
        DealerAction::Stand
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Card, Hand, Rank, Suit};

    #[test]
    fn test_dealer_hits_below_seventeen() {
        let rules = RuleSet::vegas();
        assert_eq!(dealer_action(&rules, 16, false), DealerAction::Hit);
        assert_eq!(dealer_action(&rules, 12, true), DealerAction::Hit);
        assert_eq!(dealer_action(&rules, 17, false), DealerAction::Stand);
        assert_eq!(dealer_action(&rules, 21, false), DealerAction::Stand);
    }

    #[test]
    fn test_soft_seventeen_depends_on_rules() {
        let hand = Hand::from_cards(vec![
            Card::new(Rank::Ace, Suit::Hearts),
            Card::new(Rank::Six, Suit::Spades),
        ]);
        let value = hand.evaluate();
        assert_eq!((value.value, value.is_soft), (17, true));

        let vegas = RuleSet::vegas();
        assert_eq!(
            dealer_action(&vegas, value.value, value.is_soft),
            DealerAction::Stand
        );

        let h17 = RuleSet {
            dealer_hits_soft_17: true,
            ..vegas
        };
        assert_eq!(
            dealer_action(&h17, value.value, value.is_soft),
            DealerAction::Hit
        );
        assert_eq!(dealer_action(&h17, 17, false), DealerAction::Stand);
        assert_eq!(dealer_action(&h17, 18, true), DealerAction::Stand);
    }
}
