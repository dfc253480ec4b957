//! Staking Rewards - time-weighted reward distribution over minted stake
//!
//! A distributor funds fixed-length reward windows, a minter credits stake
//! to participants and every participant accrues its proportional share of
//! the released reward, claimable once the start time has passed.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::accrual::{AccountState, DistributionWindow, GlobalAccrual};
use crate::access::{AccessControl, Role};
use crate::errors::RewardsError;
use crate::events::{Minted, RewardAdded, RewardPaid};
use crate::math::SafeMath;
use crate::token::Cep18TokenContractRef;

/// Staking Rewards contract
#[odra::module]
pub struct StakingRewards {
    /// Pool token name
    name: Var<String>,
    /// Pool token symbol
    symbol: Var<String>,
    /// Asset rewards are paid in
    reward_token: Var<Address>,
    /// Distribution window and emission rate
    window: Var<DistributionWindow>,
    /// Global reward-per-share accumulator
    accrual: Var<GlobalAccrual>,
    /// Reward scheduled or released but not yet paid out
    outstanding_rewards: Var<U256>,
    /// Per-account stake and reward bookkeeping
    accounts: Mapping<Address, AccountState>,
    /// Role registry gating `notify_reward_amount` and `mint`
    access_control: SubModule<AccessControl>,
}

#[odra::module]
impl StakingRewards {
    /// Initialize the ledger
    ///
    /// # Arguments
    /// * `start_time` - Claims are rejected before this block time
    /// * `rewards_duration` - Length of every funded window
    /// * `reward_token` - CEP-18 token rewards are paid in
    /// * `rewards_distribution` - Account allowed to fund windows
    /// * `minter` - Account allowed to credit stake
    /// * `name`, `symbol` - Pool token identification
    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &mut self,
        start_time: u64,
        rewards_duration: u64,
        reward_token: Address,
        rewards_distribution: Address,
        minter: Address,
        name: String,
        symbol: String,
    ) {
        let window = DistributionWindow::new(start_time, rewards_duration)
            .unwrap_or_revert(&self.env());
        let deployer = self.env().caller();

        self.name.set(name);
        self.symbol.set(symbol);
        self.reward_token.set(reward_token);
        self.window.set(window);
        self.accrual.set(GlobalAccrual::new());
        self.outstanding_rewards.set(U256::zero());

        self.access_control.unchecked_grant_role(Role::Admin, deployer);
        self.access_control
            .unchecked_grant_role(Role::RewardDistribution, rewards_distribution);
        self.access_control.unchecked_grant_role(Role::Minter, minter);
    }

    // ========================================
    // Privileged Mutators
    // ========================================

    /// Open a new reward window funded with `reward`
    ///
    /// The reward tokens must already be held by this contract, on top of
    /// everything still owed from earlier windows. Reward left undistributed
    /// in an active window rolls into the new one.
    pub fn notify_reward_amount(&mut self, reward: U256) {
        let caller = self.env().caller();
        self.access_control.check_role(Role::RewardDistribution, caller);

        let now = self.env().get_block_time();
        let mut window = self.load_window();
        let mut accrual = self.load_accrual();
        accrual
            .checkpoint(&mut window, now)
            .unwrap_or_revert(&self.env());
        let folded = window.unreleased(now).unwrap_or_revert(&self.env());
        window.fund(reward, now).unwrap_or_revert(&self.env());

        let outstanding = window
            .commitments_after_funding(self.outstanding_rewards(), folded)
            .unwrap_or_revert(&self.env());
        let available = self.reward_token_ref().balance_of(self.env().self_address());
        if available < outstanding {
            self.env().revert(RewardsError::RewardTooHigh);
        }

        self.window.set(window);
        self.accrual.set(accrual);
        self.outstanding_rewards.set(outstanding);

        self.env().emit_event(RewardAdded { reward });
    }

    /// Credit `amount` of stake to `account`
    pub fn mint(&mut self, account: Address, amount: U256) {
        let caller = self.env().caller();
        self.access_control.check_role(Role::Minter, caller);

        // settle against the pre-mint total before the balance changes
        let (mut accrual, mut state) = self.update_reward(account);
        state.add_stake(amount).unwrap_or_revert(&self.env());
        accrual.add_stake(amount).unwrap_or_revert(&self.env());

        self.accrual.set(accrual);
        self.accounts.set(&account, state);

        self.env().emit_event(Minted { account, amount });
    }

    // ========================================
    // Participant Functions
    // ========================================

    /// Pay out everything the caller has accrued
    ///
    /// Returns the amount paid; zero when nothing is pending.
    pub fn claim(&mut self) -> U256 {
        let now = self.env().get_block_time();
        if !self.load_window().has_started(now) {
            self.env().revert(RewardsError::NotStarted);
        }

        let caller = self.env().caller();
        let (accrual, mut state) = self.update_reward(caller);
        let reward = state.take_accrued();

        self.accrual.set(accrual);
        self.accounts.set(&caller, state);

        if !reward.is_zero() {
            let outstanding = SafeMath::sub(self.outstanding_rewards(), reward)
                .unwrap_or_revert(&self.env());
            self.outstanding_rewards.set(outstanding);
            self.reward_token_ref().transfer(caller, reward);
            self.env().emit_event(RewardPaid { account: caller, reward });
        }
        reward
    }

    // ========================================
    // View Functions
    // ========================================

    /// Reward accrued by `account` as of the current block time
    pub fn earned(&self, account: Address) -> U256 {
        let reward_per_share = self.reward_per_token();
        self.account_state(account)
            .earned(reward_per_share)
            .unwrap_or_revert(&self.env())
    }

    /// Reward-per-share accumulator as of the current block time, scaled by 1e18
    pub fn reward_per_token(&self) -> U256 {
        let now = self.env().get_block_time();
        self.load_accrual()
            .reward_per_share(&self.load_window(), now)
            .unwrap_or_revert(&self.env())
    }

    /// Latest time rewards have been released up to: `min(now, period_finish)`
    pub fn last_time_reward_applicable(&self) -> u64 {
        let now = self.env().get_block_time();
        self.load_window().last_time_reward_applicable(now)
    }

    /// Reward released over a full window at the current rate
    pub fn get_reward_for_duration(&self) -> U256 {
        self.load_window()
            .reward_for_duration()
            .unwrap_or_revert(&self.env())
    }

    /// Time the accumulator was last advanced to
    pub fn last_update_time(&self) -> u64 {
        self.load_window().last_update_time
    }

    /// End of the current reward window
    pub fn period_finish(&self) -> u64 {
        self.load_window().period_finish
    }

    /// Reward released per time unit, unscaled
    pub fn reward_rate(&self) -> U256 {
        self.load_window().reward_rate
    }

    /// Earliest time `claim` is accepted
    pub fn start_time(&self) -> u64 {
        self.load_window().start_time
    }

    /// Length of every funded window
    pub fn rewards_duration(&self) -> u64 {
        self.load_window().duration
    }

    /// Address of the CEP-18 token rewards are paid in
    pub fn reward_token(&self) -> Address {
        self.reward_token.get_or_revert_with(RewardsError::NotInitialized)
    }

    /// Pool token name
    pub fn name(&self) -> String {
        self.name.get_or_default()
    }

    /// Pool token symbol
    pub fn symbol(&self) -> String {
        self.symbol.get_or_default()
    }

    /// Pool token decimals; stake amounts use 18 like the reward token
    pub fn decimals(&self) -> u8 {
        18
    }

    /// Reward the ledger still owes: the unreleased part of the current
    /// window plus everything released and not yet claimed
    pub fn outstanding_rewards(&self) -> U256 {
        self.outstanding_rewards.get_or_default()
    }

    /// Stake credited to `account`
    pub fn balance_of(&self, account: Address) -> U256 {
        self.account_state(account).balance
    }

    /// Total stake across all accounts
    pub fn total_supply(&self) -> U256 {
        self.load_accrual().total_staked
    }

    // ========================================
    // Role Administration
    // ========================================

    pub fn has_role(&self, role: Role, account: Address) -> bool {
        self.access_control.has_role(role, account)
    }

    pub fn grant_role(&mut self, role: Role, account: Address) {
        self.access_control.grant_role(role, account);
    }

    pub fn revoke_role(&mut self, role: Role, account: Address) {
        self.access_control.revoke_role(role, account);
    }

    pub fn renounce_role(&mut self, role: Role) {
        self.access_control.renounce_role(role);
    }
}

impl StakingRewards {
    /// Advance the accumulator to now and settle `account` against it.
    ///
    /// The updated window is stored here; the accumulator and account state
    /// are handed back so the caller can apply its own changes before
    /// writing them.
    fn update_reward(&mut self, account: Address) -> (GlobalAccrual, AccountState) {
        let now = self.env().get_block_time();
        let mut window = self.load_window();
        let mut accrual = self.load_accrual();
        accrual
            .checkpoint(&mut window, now)
            .unwrap_or_revert(&self.env());

        let mut state = self.account_state(account);
        state
            .settle(accrual.reward_per_share_stored)
            .unwrap_or_revert(&self.env());

        self.window.set(window);
        (accrual, state)
    }

    fn load_window(&self) -> DistributionWindow {
        self.window.get_or_revert_with(RewardsError::NotInitialized)
    }

    fn load_accrual(&self) -> GlobalAccrual {
        self.accrual.get_or_revert_with(RewardsError::NotInitialized)
    }

    fn account_state(&self, account: Address) -> AccountState {
        self.accounts.get(&account).unwrap_or_else(AccountState::new)
    }

    fn reward_token_ref(&self) -> Cep18TokenContractRef {
        Cep18TokenContractRef::new(self.env(), self.reward_token())
    }
}
