//! Event definitions for the staking rewards contracts
use odra::prelude::*;
use odra::casper_types::U256;

/// Event emitted when a distributor funds a new reward window
#[odra::event]
pub struct RewardAdded {
    /// Amount of reward token added to the window
    pub reward: U256,
}

/// Event emitted when the minter credits stake to an account
#[odra::event]
pub struct Minted {
    /// Address credited with stake
    pub account: Address,
    /// Amount of stake credited
    pub amount: U256,
}

/// Event emitted when a participant claims accrued rewards
#[odra::event]
pub struct RewardPaid {
    /// Address receiving the payout
    pub account: Address,
    /// Amount of reward token paid
    pub reward: U256,
}

/// Event emitted when reward tokens are transferred
#[odra::event]
pub struct Transfer {
    /// Sender address
    pub from: Address,
    /// Recipient address
    pub to: Address,
    /// Amount transferred
    pub value: U256,
}
