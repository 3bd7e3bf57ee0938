use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Shoe exhausted")]
    ShoeExhausted,
    #[error("Invalid bet of {amount} for seat {seat}: must be between {min} and {max}")]
    InvalidBet {
        seat: usize,
        amount: u64,
        min: u64,
        max: u64,
    },
    #[error("Invalid seat: {0}")]
    InvalidSeat(usize),
    #[error("Number of seats must be between 1 and 7, got {0}")]
    InvalidSeatCount(usize),
    #[error("Invalid table limits: min {min}, max {max}")]
    InvalidLimits { min: u64, max: u64 },
    #[error("Payout ratio denominator cannot be zero")]
    InvalidPayoutRatio,
    #[error("Unknown variant: {0}")]
    UnknownVariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;
