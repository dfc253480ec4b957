//! Checked arithmetic and fixed-point helpers for reward accounting
use odra::casper_types::U256;
use crate::errors::RewardsError;

/// Scale of the reward-per-share accumulator (1e18).
///
/// Every division in the ledger rounds down, so accrued amounts never exceed
/// what was funded.
pub const REWARD_PRECISION: u128 = 1_000_000_000_000_000_000;

/// Safe math operations for U256
pub struct SafeMath;

impl SafeMath {
    /// Safe addition with overflow check
    pub fn add(a: U256, b: U256) -> Result<U256, RewardsError> {
        a.checked_add(b).ok_or(RewardsError::Overflow)
    }

    /// Safe subtraction with underflow check
    pub fn sub(a: U256, b: U256) -> Result<U256, RewardsError> {
        a.checked_sub(b).ok_or(RewardsError::Underflow)
    }

    /// Safe multiplication with overflow check
    pub fn mul(a: U256, b: U256) -> Result<U256, RewardsError> {
        a.checked_mul(b).ok_or(RewardsError::Overflow)
    }

    /// Safe division with zero check
    pub fn div(a: U256, b: U256) -> Result<U256, RewardsError> {
        if b.is_zero() {
            return Err(RewardsError::DivisionByZero);
        }
        Ok(a / b)
    }

    /// `a * b / denominator`, rounded down
    pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, RewardsError> {
        Self::div(Self::mul(a, b)?, denominator)
    }

    /// Returns the minimum of two timestamps
    pub fn min_time(a: u64, b: u64) -> u64 {
        if a < b { a } else { b }
    }

    /// Elapsed time between two timestamps, failing if `to` precedes `from`
    pub fn elapsed(from: u64, to: u64) -> Result<U256, RewardsError> {
        to.checked_sub(from)
            .map(U256::from)
            .ok_or(RewardsError::Underflow)
    }
}

/// The accumulator scale as a `U256`
pub fn precision() -> U256 {
    U256::from(REWARD_PRECISION)
}
