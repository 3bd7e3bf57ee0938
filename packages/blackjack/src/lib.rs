mod card;
mod dealer;
mod error;
mod events;
mod hand;
pub mod legality;
mod payout;
mod round;
mod rules;
mod shoe;
mod strategy;

pub use card::{Card, Rank, Suit};
pub use dealer::{dealer_action, DealerAction};
pub use error::{Error, Result};
pub use events::{
    dispatch, ActiveHand, HandResult, RoundEvent, StatisticsSink, StrategyDecision, TableContext,
};
pub use hand::{
    calculate_hand_value, can_split_cards, evaluate, is_blackjack, is_busted, is_soft_hand, Hand,
    HandOutcome, HandValue,
};
pub use legality::{can_double, can_insurance, can_split, can_surrender};
pub use payout::{insurance_cost, insurance_payout, payout, surrender_refund, winner, Winner};
pub use round::{PlayerRoundState, Round, RoundPhase, Transition, MAX_SEATS};
pub use rules::{PayoutRatio, RuleSet, TableLimits, Variant};
pub use shoe::Shoe;
pub use strategy::{advise, Advice, Confidence, Move};
