//! Staking Rewards - reward-per-share distribution ledger
//!
//! Participants hold stake credited by a minter and earn a share of each
//! funded reward window proportional to their stake and time staked.

pub mod accrual;
pub mod staking_rewards;

#[cfg(test)]
mod tests;

pub use accrual::{AccountState, DistributionWindow, GlobalAccrual};
pub use staking_rewards::StakingRewards;
