//! Pure action-legality predicates. Every rule toggle comes from the
//! `RuleSet` argument.

use crate::{Card, Hand, RuleSet};

pub fn can_split(hand: &Hand, rules: &RuleSet, splits_so_far: u8) -> bool {
    if !hand.is_pair() {
        return false;
    }
    if splits_so_far >= rules.max_splits() {
        return false;
    }
    if splits_so_far > 0 && !rules.resplit_to_four_hands {
        return false;
    }
    // Re-splitting aces needs its own rule
    !(hand.cards[0].rank.is_ace() && splits_so_far > 0 && !rules.resplit_aces)
}

pub fn can_double(hand: &Hand, rules: &RuleSet) -> bool {
    if hand.cards.len() != 2 || hand.doubled || hand.stood || hand.surrendered {
        return false;
    }
    if hand.is_busted() {
        return false;
    }
    !hand.from_split || rules.double_after_split
}

/// Surrender is only offered as the first decision on an unsplit hand.
pub fn can_surrender(hand: &Hand, rules: &RuleSet) -> bool {
    rules.surrender_allowed
        && hand.cards.len() == 2
        && !hand.is_blackjack()
        && !hand.from_split
        && !hand.doubled
        && !hand.stood
        && !hand.surrendered
}

pub fn can_insurance(dealer_up_card: &Card, rules: &RuleSet) -> bool {
    rules.insurance_allowed && !dealer_up_card.hidden && dealer_up_card.rank.is_ace()
}
