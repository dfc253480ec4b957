//! Scenario tests for the Staking Rewards ledger

use odra::host::{Deployer, HostEnv};
use odra::prelude::*;
use odra::casper_types::U256;
use crate::access::{AccessControlError, Role, RoleGranted, RoleRevoked};
use crate::errors::RewardsError;
use crate::events::{Minted, RewardAdded, RewardPaid};
use crate::math::REWARD_PRECISION;
use crate::rewards::staking_rewards::{StakingRewardsHostRef, StakingRewardsInitArgs};
use crate::rewards::StakingRewards;
use crate::token::{RewardToken, RewardTokenHostRef, RewardTokenInitArgs};

/// One day in block-time units (milliseconds)
const DAY: u64 = 86_400_000;
const REWARDS_DURATION: u64 = 60 * DAY;

fn e18(n: u64) -> U256 {
    U256::from(n) * U256::from(REWARD_PRECISION)
}

/// Assert `actual` is within 0.01% of `expected`
fn assert_close(expected: U256, actual: U256) {
    let diff = if expected > actual { expected - actual } else { actual - expected };
    assert!(
        diff <= expected / U256::from(10_000),
        "expected ~{}, got {}",
        expected,
        actual
    );
}

struct Fixture {
    env: HostEnv,
    staking: StakingRewardsHostRef,
    token: RewardTokenHostRef,
    staking_address: Address,
    owner: Address,
    staker1: Address,
    staker2: Address,
    distributor: Address,
    minter: Address,
}

fn setup() -> Fixture {
    let env = odra_test::env();
    let owner = env.get_account(0);
    let staker1 = env.get_account(1);
    let staker2 = env.get_account(2);
    let distributor = env.get_account(3);
    let minter = env.get_account(4);

    env.set_caller(distributor);
    let token = RewardToken::deploy(
        &env,
        RewardTokenInitArgs {
            name: String::from("Reward Token"),
            symbol: String::from("RTOK"),
            initial_supply: e18(1_000_000),
        },
    );

    env.set_caller(owner);
    let staking = StakingRewards::deploy(
        &env,
        StakingRewardsInitArgs {
            start_time: env.block_time() + DAY,
            rewards_duration: REWARDS_DURATION,
            reward_token: token.address().clone(),
            rewards_distribution: distributor,
            minter,
            name: String::from("Pool token"),
            symbol: String::from("PPT"),
        },
    );
    let staking_address = staking.address().clone();

    Fixture {
        env,
        staking,
        token,
        staking_address,
        owner,
        staker1,
        staker2,
        distributor,
        minter,
    }
}

impl Fixture {
    /// Fund the ledger and open a window; returns (last_update_time, period_finish)
    fn notify(&mut self, reward: U256) -> (u64, u64) {
        self.env.set_caller(self.distributor);
        self.token.transfer(self.staking_address, reward);
        self.staking.notify_reward_amount(reward);
        (self.staking.last_update_time(), self.staking.period_finish())
    }

    fn mint(&mut self, account: Address, amount: U256) {
        self.env.set_caller(self.minter);
        self.staking.mint(account, amount);
    }

    /// Claim as `account`; returns the reward-token balance gained
    fn claim(&mut self, account: Address) -> U256 {
        let before = self.token.balance_of(account);
        self.env.set_caller(account);
        self.staking.claim();
        self.token.balance_of(account) - before
    }

    fn advance_to(&self, time: u64) {
        let now = self.env.block_time();
        if time > now {
            self.env.advance_block_time(time - now);
        }
    }
}

// ========================================
// Function permissions
// ========================================

#[test]
fn test_only_distributor_can_notify() {
    let mut f = setup();

    f.env.set_caller(f.distributor);
    f.staking.notify_reward_amount(U256::one());
    assert!(f.env.emitted_event(&f.staking_address, RewardAdded { reward: U256::one() }));
    let last_update = f.staking.last_update_time();
    assert_eq!(f.staking.period_finish(), last_update + REWARDS_DURATION);

    f.env.set_caller(f.staker1);
    let result = f.staking.try_notify_reward_amount(U256::one());
    assert_eq!(
        result,
        Err(AccessControlError::MissingRewardDistributionRole.into())
    );
    assert_eq!(f.staking.period_finish(), last_update + REWARDS_DURATION);
}

#[test]
fn test_claim_before_start_time_fails() {
    let mut f = setup();
    f.notify(e18(100));
    f.mint(f.staker1, e18(2));
    f.advance_to(f.staking.start_time() - 1);
    assert!(f.staking.earned(f.staker1) > U256::zero());

    f.env.set_caller(f.staker1);
    assert_eq!(f.staking.try_claim(), Err(RewardsError::NotStarted.into()));
}

#[test]
fn test_only_minter_can_mint() {
    let mut f = setup();

    f.mint(f.owner, U256::one());
    assert_eq!(f.staking.balance_of(f.owner), U256::one());
    assert_eq!(f.staking.total_supply(), U256::one());
    assert!(f.env.emitted_event(
        &f.staking_address,
        Minted {
            account: f.owner,
            amount: U256::one(),
        }
    ));

    f.env.set_caller(f.staker1);
    let result = f.staking.try_mint(f.owner, U256::one());
    assert_eq!(result, Err(AccessControlError::MissingMinterRole.into()));
    assert_eq!(f.staking.balance_of(f.owner), U256::one());
    assert_eq!(f.staking.total_supply(), U256::one());
}

#[test]
fn test_role_administration() {
    let mut f = setup();
    assert!(f.staking.has_role(Role::Admin, f.owner));
    assert!(f.staking.has_role(Role::RewardDistribution, f.distributor));
    assert!(f.staking.has_role(Role::Minter, f.minter));

    // only admins manage roles
    f.env.set_caller(f.staker1);
    assert_eq!(
        f.staking.try_grant_role(Role::Minter, f.staker1),
        Err(AccessControlError::MissingAdminRole.into())
    );

    f.env.set_caller(f.owner);
    f.staking.grant_role(Role::Minter, f.staker2);
    f.staking.revoke_role(Role::Minter, f.minter);
    assert!(f.env.emitted_event(
        &f.staking_address,
        RoleGranted {
            role: Role::Minter,
            account: f.staker2,
            sender: f.owner,
        }
    ));
    assert!(f.env.emitted_event(
        &f.staking_address,
        RoleRevoked {
            role: Role::Minter,
            account: f.minter,
            sender: f.owner,
        }
    ));

    f.env.set_caller(f.staker2);
    f.staking.mint(f.staker1, e18(1));
    assert_eq!(f.staking.balance_of(f.staker1), e18(1));

    f.env.set_caller(f.minter);
    assert_eq!(
        f.staking.try_mint(f.staker1, e18(1)),
        Err(AccessControlError::MissingMinterRole.into())
    );

    f.env.set_caller(f.staker2);
    f.staking.renounce_role(Role::Minter);
    assert!(!f.staking.has_role(Role::Minter, f.staker2));
}

#[test]
fn test_pool_token_metadata() {
    let f = setup();
    assert_eq!(f.staking.name(), "Pool token");
    assert_eq!(f.staking.symbol(), "PPT");
    assert_eq!(f.staking.decimals(), 18);
    assert_eq!(f.staking.reward_token(), f.token.address().clone());
    assert_eq!(f.staking.rewards_duration(), REWARDS_DURATION);
}

// ========================================
// notify_reward_amount
// ========================================

#[test]
fn test_notify_twice_keeps_period_finish_and_folds_leftover() {
    let mut f = setup();
    let reward = e18(100);

    let (first_start, first_end) = f.notify(reward);
    assert_eq!(first_end, first_start + REWARDS_DURATION);
    let first_rate = f.staking.reward_rate();
    assert_eq!(first_rate, reward / U256::from(REWARDS_DURATION));

    let (_, second_end) = f.notify(reward);
    assert_eq!(second_end, first_end);
    assert_eq!(f.staking.reward_rate(), first_rate * U256::from(2));
}

#[test]
fn test_notify_after_window_lapsed_resets_rate() {
    let mut f = setup();
    let (_, end) = f.notify(e18(100));
    f.advance_to(end + DAY);

    let (start, new_end) = f.notify(e18(30));
    assert_eq!(start, end + DAY);
    assert_eq!(new_end, start + REWARDS_DURATION);
    assert_eq!(
        f.staking.reward_rate(),
        e18(30) / U256::from(REWARDS_DURATION)
    );
}

#[test]
fn test_notify_without_funds_fails() {
    let mut f = setup();

    f.env.set_caller(f.distributor);
    let result = f.staking.try_notify_reward_amount(e18(100));
    assert_eq!(result, Err(RewardsError::RewardTooHigh.into()));
    assert_eq!(f.staking.period_finish(), 0);
    assert_eq!(f.staking.reward_rate(), U256::zero());
}

#[test]
fn test_notify_cannot_reuse_unclaimed_rewards() {
    let mut f = setup();
    let (_, end) = f.notify(e18(100));
    f.mint(f.staker1, e18(1));
    let committed = f.staking.outstanding_rewards();
    assert_close(e18(100), committed);

    f.advance_to(end + DAY);

    // the balance still holds staker1's unclaimed reward
    f.env.set_caller(f.distributor);
    let result = f.staking.try_notify_reward_amount(e18(100));
    assert_eq!(result, Err(RewardsError::RewardTooHigh.into()));
    assert_eq!(f.staking.period_finish(), end);
    assert_eq!(f.staking.outstanding_rewards(), committed);

    let paid = f.claim(f.staker1);
    assert_close(e18(100), paid);
    assert_eq!(f.staking.outstanding_rewards(), committed - paid);

    f.notify(e18(100));
    assert_close(e18(100), f.staking.get_reward_for_duration());
}

// ========================================
// earned
// ========================================

#[test]
fn test_earned_is_zero_when_not_staking() {
    let mut f = setup();
    assert_eq!(f.staking.earned(f.staker1), U256::zero());

    let (start, end) = f.notify(e18(100));
    f.mint(f.staker2, e18(2));
    f.advance_to(start + (end - start) / 2);
    assert_eq!(f.staking.earned(f.staker1), U256::zero());
}

#[test]
fn test_earned_is_positive_when_staking() {
    let mut f = setup();
    let (start, end) = f.notify(e18(100));
    f.mint(f.staker1, e18(2));

    f.advance_to(start + (end - start) / 3);
    let earned = f.staking.earned(f.staker1);
    assert!(earned > U256::zero());
    // pure query
    assert_eq!(f.staking.earned(f.staker1), earned);
}

#[test]
fn test_earned_for_multiple_stakers() {
    let mut f = setup();
    let reward = e18(100);
    let (start, end) = f.notify(reward);
    let third = (end - start) / 3;
    let stake = e18(2);

    f.mint(f.staker1, stake);
    f.advance_to(start + third);
    assert_close(reward / U256::from(3), f.staking.earned(f.staker1));

    f.mint(f.staker2, stake);
    f.advance_to(start + 2 * third);
    // 1/3 + half of 1/3
    assert_close(reward / U256::from(2), f.staking.earned(f.staker1));
    // half of 1/3
    assert_close(reward / U256::from(6), f.staking.earned(f.staker2));

    let staker3 = f.owner;
    f.mint(staker3, stake);
    f.advance_to(end + 1);
    // 1/3 + half of 1/3 + a third of 1/3
    assert_close(reward * U256::from(11) / U256::from(18), f.staking.earned(f.staker1));
    assert_close(reward * U256::from(5) / U256::from(18), f.staking.earned(f.staker2));
    assert_close(reward / U256::from(9), f.staking.earned(staker3));
}

// ========================================
// claim
// ========================================

#[test]
fn test_single_staker_claims_full_window() {
    let mut f = setup();
    let reward = e18(100);
    let (_, end) = f.notify(reward);

    f.mint(f.staker1, e18(1));
    let stake_start = f.staking.last_update_time();

    f.advance_to(end + 1);
    let paid = f.claim(f.staker1);

    assert_close(reward, paid);
    assert_eq!(paid, f.staking.reward_rate() * U256::from(end - stake_start));
    assert!(f.env.emitted_event(
        &f.staking_address,
        RewardPaid { account: f.staker1, reward: paid }
    ));
    assert_eq!(f.staking.earned(f.staker1), U256::zero());
}

#[test]
fn test_staker_joining_halfway_claims_half() {
    let mut f = setup();
    let reward = e18(100);
    let (start, end) = f.notify(reward);

    f.advance_to(start + (end - start) / 2);
    f.mint(f.staker1, e18(1));
    let stake_start = f.staking.last_update_time();

    f.advance_to(end + 1);
    let paid = f.claim(f.staker1);
    assert_eq!(f.staking.last_update_time(), end);

    assert_eq!(paid, f.staking.reward_rate() * U256::from(end - stake_start));
    assert_close(reward / U256::from(2), paid);
}

#[test]
fn test_two_stakers_simultaneously_split_three_to_one() {
    let mut f = setup();
    let reward = e18(100);
    let (start, end) = f.notify(reward);
    let stake = e18(2);

    f.mint(f.staker1, stake);
    f.advance_to(start + (end - start) / 2);
    f.mint(f.staker2, stake);
    f.advance_to(end + 1);

    let staker1_reward = f.claim(f.staker1);
    let staker2_reward = f.claim(f.staker2);
    let total = staker1_reward + staker2_reward;

    assert_close(reward, total);
    assert_close(total * U256::from(3) / U256::from(4), staker1_reward);
    assert_close(total / U256::from(4), staker2_reward);
}

#[test]
fn test_claim_midway_then_share_second_half() {
    let mut f = setup();
    let reward = e18(100);
    let (start, end) = f.notify(reward);
    let stake = e18(2);

    f.mint(f.staker1, stake);
    f.advance_to(start + (end - start) / 2);
    let staker1_reward = f.claim(f.staker1);
    assert_close(reward / U256::from(2), staker1_reward);

    f.mint(f.staker2, stake);
    f.advance_to(end + 1);
    let staker2_reward = f.claim(f.staker2);

    // staker1 keeps earning alongside staker2 after its claim
    assert_close(reward / U256::from(4), staker2_reward);
    assert_close(reward / U256::from(4), f.staking.earned(f.staker1));
}

#[test]
fn test_claim_with_nothing_pending_succeeds() {
    let mut f = setup();
    f.advance_to(f.staking.start_time());

    assert_eq!(f.claim(f.staker1), U256::zero());
    assert_eq!(f.claim(f.staker1), U256::zero());
}

#[test]
fn test_second_claim_pays_nothing() {
    let mut f = setup();
    let (_, end) = f.notify(e18(100));
    f.mint(f.staker1, e18(2));
    f.advance_to(end + 1);

    assert!(f.claim(f.staker1) > U256::zero());
    assert_eq!(f.claim(f.staker1), U256::zero());
}

// ========================================
// Accounting properties
// ========================================

#[test]
fn test_earned_never_exceeds_funded_minus_paid() {
    let mut f = setup();
    let funded = e18(100);
    let (start, end) = f.notify(funded);
    let step = (end - start) / 8;
    let stakers = [f.owner, f.staker1, f.staker2];
    let mut paid = U256::zero();

    f.mint(f.staker1, e18(3));
    for round in 1..=9u64 {
        f.advance_to(start + round * step);
        let staker = stakers[(round % 3) as usize];
        f.mint(staker, U256::from(round) * U256::from(7_000_000_000_000_000u64));
        if round % 2 == 0 && f.env.block_time() >= f.staking.start_time() {
            paid = paid + f.claim(f.staker1);
        }

        let outstanding = stakers
            .iter()
            .fold(U256::zero(), |sum, account| sum + f.staking.earned(*account));
        assert!(outstanding + paid <= funded);
    }
}

#[test]
fn test_reward_per_token_never_decreases() {
    let mut f = setup();
    let (start, end) = f.notify(e18(100));
    let step = (end - start) / 5;
    let mut previous = f.staking.reward_per_token();

    for round in 1..=7u64 {
        f.mint(f.staker1, e18(round));
        f.advance_to(start + round * step);
        let current = f.staking.reward_per_token();
        assert!(current >= previous);
        previous = current;
    }
    assert_eq!(f.staking.last_time_reward_applicable(), end);
}

#[test]
fn test_reward_for_duration() {
    let mut f = setup();
    let reward = e18(100);
    f.notify(reward);
    let for_duration = f.staking.get_reward_for_duration();
    assert!(for_duration <= reward);
    assert_close(reward, for_duration);
}
