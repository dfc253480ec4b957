//! Reward-per-share accrual state machine
//!
//! Pure accounting over three owned state structs. The contract loads them
//! from storage, runs the transitions below and writes them back, so every
//! rule here can be exercised without a host environment.
//!
//! Numeric contract: `reward_per_share_stored` is scaled by
//! [`REWARD_PRECISION`](crate::math::REWARD_PRECISION) and every division
//! rounds down. `reward_rate` is an unscaled integer (reward units per time
//! unit), so a funded amount that is not a multiple of the duration leaves
//! its remainder undistributed.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::RewardsError;
use crate::math::{precision, SafeMath};

/// Distribution window and emission rate
#[odra::odra_type]
pub struct DistributionWindow {
    /// Claims are rejected before this time
    pub start_time: u64,
    /// Length of every funded window
    pub duration: u64,
    /// End of the current window
    pub period_finish: u64,
    /// Time the accumulator was last advanced to
    pub last_update_time: u64,
    /// Reward units released per time unit
    pub reward_rate: U256,
}

/// Global reward accumulator
#[odra::odra_type]
pub struct GlobalAccrual {
    /// Cumulative reward per staked unit, scaled by 1e18
    pub reward_per_share_stored: U256,
    /// Sum of all account balances
    pub total_staked: U256,
}

/// Per-account stake and reward bookkeeping
#[odra::odra_type]
pub struct AccountState {
    /// Staked amount
    pub balance: U256,
    /// Accumulator value at the last settlement
    pub reward_per_share_paid: U256,
    /// Settled but unclaimed reward
    pub accrued_unclaimed: U256,
}

impl DistributionWindow {
    pub fn new(start_time: u64, duration: u64) -> Result<Self, RewardsError> {
        if duration == 0 {
            return Err(RewardsError::InvalidDuration);
        }
        Ok(Self {
            start_time,
            duration,
            period_finish: 0,
            last_update_time: 0,
            reward_rate: U256::zero(),
        })
    }

    /// `min(now, period_finish)`
    pub fn last_time_reward_applicable(&self, now: u64) -> u64 {
        SafeMath::min_time(now, self.period_finish)
    }

    pub fn has_started(&self, now: u64) -> bool {
        now >= self.start_time
    }

    /// Total reward released over one full window at the current rate
    pub fn reward_for_duration(&self) -> Result<U256, RewardsError> {
        SafeMath::mul(self.reward_rate, U256::from(self.duration))
    }

    /// Open a new window at `now` funded with `reward`.
    ///
    /// Reward still undistributed in an active window is folded into the
    /// new rate. The accumulator must already be checkpointed to `now`.
    pub fn fund(&mut self, reward: U256, now: u64) -> Result<(), RewardsError> {
        let duration = U256::from(self.duration);
        self.reward_rate = if now >= self.period_finish {
            SafeMath::div(reward, duration)?
        } else {
            let remaining = SafeMath::elapsed(now, self.period_finish)?;
            let leftover = SafeMath::mul(remaining, self.reward_rate)?;
            SafeMath::div(SafeMath::add(reward, leftover)?, duration)?
        };
        self.last_update_time = now;
        self.period_finish = now
            .checked_add(self.duration)
            .ok_or(RewardsError::Overflow)?;
        Ok(())
    }

    /// Reward scheduled for release between `now` and the end of the window
    pub fn unreleased(&self, now: u64) -> Result<U256, RewardsError> {
        if now >= self.period_finish {
            return Ok(U256::zero());
        }
        let remaining = SafeMath::elapsed(now, self.period_finish)?;
        SafeMath::mul(remaining, self.reward_rate)
    }

    /// Reward the ledger owes once this window has been funded.
    ///
    /// `outstanding` is what was owed before funding and `folded` the
    /// unreleased tail of the previous window, now part of the new rate.
    /// Call after [`fund`](Self::fund).
    pub fn commitments_after_funding(
        &self,
        outstanding: U256,
        folded: U256,
    ) -> Result<U256, RewardsError> {
        let released_unclaimed = SafeMath::sub(outstanding, folded)?;
        SafeMath::add(released_unclaimed, self.reward_for_duration()?)
    }
}

impl GlobalAccrual {
    pub fn new() -> Self {
        Self {
            reward_per_share_stored: U256::zero(),
            total_staked: U256::zero(),
        }
    }

    /// Accumulator value as of `now`, without committing it
    pub fn reward_per_share(
        &self,
        window: &DistributionWindow,
        now: u64,
    ) -> Result<U256, RewardsError> {
        if self.total_staked.is_zero() {
            return Ok(self.reward_per_share_stored);
        }
        let applicable = window.last_time_reward_applicable(now);
        let elapsed = SafeMath::elapsed(window.last_update_time, applicable)?;
        let released = SafeMath::mul(elapsed, window.reward_rate)?;
        let increase = SafeMath::mul_div(released, precision(), self.total_staked)?;
        SafeMath::add(self.reward_per_share_stored, increase)
    }

    /// Advance the accumulator and the window's update time to `now`.
    /// Calling it again with the same `now` changes nothing.
    pub fn checkpoint(
        &mut self,
        window: &mut DistributionWindow,
        now: u64,
    ) -> Result<(), RewardsError> {
        self.reward_per_share_stored = self.reward_per_share(window, now)?;
        window.last_update_time = window.last_time_reward_applicable(now);
        Ok(())
    }

    pub fn add_stake(&mut self, amount: U256) -> Result<(), RewardsError> {
        self.total_staked = SafeMath::add(self.total_staked, amount)?;
        Ok(())
    }
}

impl AccountState {
    pub fn new() -> Self {
        Self {
            balance: U256::zero(),
            reward_per_share_paid: U256::zero(),
            accrued_unclaimed: U256::zero(),
        }
    }

    /// Settled plus unsettled reward given the accumulator value
    pub fn earned(&self, reward_per_share: U256) -> Result<U256, RewardsError> {
        let delta = SafeMath::sub(reward_per_share, self.reward_per_share_paid)?;
        let pending = SafeMath::mul_div(self.balance, delta, precision())?;
        SafeMath::add(pending, self.accrued_unclaimed)
    }

    /// Move the account's share of accumulator growth into `accrued_unclaimed`
    pub fn settle(&mut self, reward_per_share: U256) -> Result<(), RewardsError> {
        self.accrued_unclaimed = self.earned(reward_per_share)?;
        self.reward_per_share_paid = reward_per_share;
        Ok(())
    }

    pub fn add_stake(&mut self, amount: U256) -> Result<(), RewardsError> {
        self.balance = SafeMath::add(self.balance, amount)?;
        Ok(())
    }

    /// Take the whole unclaimed reward, leaving zero behind
    pub fn take_accrued(&mut self) -> U256 {
        core::mem::replace(&mut self.accrued_unclaimed, U256::zero())
    }
}
