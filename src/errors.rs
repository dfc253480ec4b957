//! Error definitions for the staking rewards contracts
use odra::prelude::*;

/// Errors raised by the reward ledger
#[odra::odra_error]
pub enum RewardsError {
    /// Claim attempted before the configured start time
    NotStarted = 1,

    /// Reward rate would exceed what the ledger's reward balance can pay out
    RewardTooHigh = 2,

    /// Rewards duration must be non-zero
    InvalidDuration = 3,

    /// Overflow error
    Overflow = 4,

    /// Underflow error
    Underflow = 5,

    /// Division by zero
    DivisionByZero = 6,

    /// Ledger state read before `init`
    NotInitialized = 7,
}

/// Errors raised by the reward token
#[odra::odra_error]
pub enum TokenError {
    /// Insufficient balance for operation
    InsufficientBalance = 100,
}
