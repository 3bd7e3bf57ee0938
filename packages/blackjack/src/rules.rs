use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

/// Blackjack payout multiplier as a ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRatio {
    pub numerator: u16,
    pub denominator: u16,
}

impl PayoutRatio {
    pub const THREE_TO_TWO: Self = Self {
        numerator: 3,
        denominator: 2,
    };
    pub const SIX_TO_FIVE: Self = Self {
        numerator: 6,
        denominator: 5,
    };

    pub fn new(numerator: u16, denominator: u16) -> Result<Self, Error> {
        if denominator == 0 {
            return Err(Error::InvalidPayoutRatio);
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Winnings on top of the returned stake, rounded down.
    pub fn calculate_payout(&self, bet: u64) -> u64 {
        ((bet as u128 * self.numerator as u128) / self.denominator as u128) as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    Vegas,
    European,
    AtlanticCity,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Vegas, Variant::European, Variant::AtlanticCity];

    pub fn rules(&self) -> RuleSet {
        match self {
            Variant::Vegas => RuleSet::vegas(),
            Variant::European => RuleSet::european(),
            Variant::AtlanticCity => RuleSet::atlantic_city(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Variant::Vegas => "vegas",
            Variant::European => "european",
            Variant::AtlanticCity => "atlantic-city",
        }
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "vegas" => Ok(Variant::Vegas),
            "european" => Ok(Variant::European),
            "atlantic-city" | "atlantic" => Ok(Variant::AtlanticCity),
            _ => Err(Error::UnknownVariant(s.to_string())),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rule toggles for one table. Immutable once a table picks its variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub variant: Variant,

    /// Dealer hits on soft 17
    pub dealer_hits_soft_17: bool,

    /// Dealer checks the hole card for blackjack with an Ace or ten-value up
    pub dealer_peeks_for_blackjack: bool,

    /// Dealer's second card is only dealt once every player hand is finished
    pub no_hole_card: bool,

    pub double_after_split: bool,

    pub resplit_aces: bool,

    /// Allow re-splitting up to four hands
    pub resplit_to_four_hands: bool,

    pub surrender_allowed: bool,

    /// Surrender is only offered after the dealer's blackjack check. Early
    /// surrender is not modeled: the round always peeks before any player
    /// decision, so surrender behaves as late surrender either way.
    pub late_surrender_only: bool,

    pub blackjack_payout: PayoutRatio,

    pub insurance_allowed: bool,

    pub number_of_decks: u8,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::vegas()
    }
}

impl RuleSet {
    pub fn vegas() -> Self {
        Self {
            variant: Variant::Vegas,
            dealer_hits_soft_17: false,
            dealer_peeks_for_blackjack: true,
            no_hole_card: false,
            double_after_split: true,
            resplit_aces: false,
            resplit_to_four_hands: true,
            surrender_allowed: false,
            late_surrender_only: false,
            blackjack_payout: PayoutRatio::THREE_TO_TWO,
            insurance_allowed: true,
            number_of_decks: 6,
        }
    }

    /// European rules (no hole card, dealer doesn't peek, no surrender)
    pub fn european() -> Self {
        Self {
            variant: Variant::European,
            dealer_hits_soft_17: false,
            dealer_peeks_for_blackjack: false,
            no_hole_card: true,
            double_after_split: true,
            resplit_aces: false,
            resplit_to_four_hands: false,
            surrender_allowed: false,
            late_surrender_only: false,
            blackjack_payout: PayoutRatio::THREE_TO_TWO,
            insurance_allowed: false,
            number_of_decks: 6,
        }
    }

    /// Atlantic City rules
    pub fn atlantic_city() -> Self {
        Self {
            variant: Variant::AtlanticCity,
            dealer_hits_soft_17: false,
            dealer_peeks_for_blackjack: true,
            no_hole_card: false,
            double_after_split: true,
            resplit_aces: true,
            resplit_to_four_hands: true,
            surrender_allowed: true,
            late_surrender_only: true,
            blackjack_payout: PayoutRatio::THREE_TO_TWO,
            insurance_allowed: true,
            number_of_decks: 8,
        }
    }

    /// Maximum number of splits per seat.
    pub fn max_splits(&self) -> u8 {
        if self.resplit_to_four_hands {
            3
        } else {
            1
        }
    }
}

/// Betting limits for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLimits {
    pub min_bet: u64,
    pub max_bet: u64,
}

impl TableLimits {
    pub fn new(min_bet: u64, max_bet: u64) -> Result<Self, Error> {
        if min_bet == 0 || min_bet > max_bet {
            return Err(Error::InvalidLimits {
                min: min_bet,
                max: max_bet,
            });
        }
        Ok(Self { min_bet, max_bet })
    }

    /// Smallest bet a seat holding `chips` may place. A short stack can only
    /// go all in.
    pub fn effective_min(&self, chips: u64) -> u64 {
        self.min_bet.min(chips)
    }
}

impl Default for TableLimits {
    fn default() -> Self {
        Self {
            min_bet: 10,
            max_bet: 500,
        }
    }
}
