//! Error types for the bulb wheel engine

use thiserror::Error;

/// Invalid wheel, prize or weight configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Slot count {slots} outside supported range {min}..={max}")]
    SlotCount { slots: usize, min: usize, max: usize },

    #[error("Prize {prize} at slot {slot} is not an allowed denomination")]
    InvalidPrize { slot: usize, prize: u64 },

    #[error("Expected {expected} weights, got {actual}")]
    WeightCount { expected: usize, actual: usize },

    #[error("Weight {value} at slot {slot} is negative or not finite")]
    InvalidWeight { slot: usize, value: f64 },

    #[error("Weights sum to {sum}, expected 1.0")]
    WeightSum { sum: f64 },

    #[error("Initial bank {bank} is negative")]
    NegativeBank { bank: i64 },

    #[error("Insufficient balance: {balance} available, {required} required")]
    InsufficientBalance { balance: u64, required: u64 },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Limit exceeded: {0}")]
    Limit(String),
}

/// Single-weight edit that cannot be applied
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RedistributionError {
    #[error("All weights other than slot {slot} are zero; nothing to rescale")]
    ZeroRemainder { slot: usize },

    #[error("Weight {value} for slot {slot} must lie in 0.0..=1.0")]
    OutOfRange { slot: usize, value: f64 },

    #[error("Rescaling around slot {slot} does not yield a finite distribution")]
    NonFinite { slot: usize },

    #[error("Slot {slot} does not exist on a {slots}-slot wheel")]
    NoSuchSlot { slot: usize, slots: usize },
}

/// Rejected bet
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BetError {
    #[error("Bet targets slot {slot}, wheel has {slots} slots")]
    SlotOutOfRange { slot: usize, slots: usize },

    #[error("Bet amount must be positive")]
    ZeroAmount,

    #[error("Bet amount {amount} exceeds the {max} stake limit")]
    StakeTooLarge { amount: u64, max: u64 },

    #[error("Round already holds {max} bets")]
    TooManyBets { max: usize },
}

/// Umbrella error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BwError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Redistribution(#[from] RedistributionError),

    #[error(transparent)]
    Bet(#[from] BetError),
}

/// Result type alias
pub type BwResult<T> = Result<T, BwError>;
