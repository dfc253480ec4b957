//! CLI tool for deploying and interacting with the staking rewards contracts.

use staking_rewards_contracts::rewards::StakingRewards;
use staking_rewards_contracts::token::RewardToken;
use odra::casper_types::U256;
use odra::prelude::{Address, Addressable};
use odra::host::HostEnv;
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};

/// One day in block-time units (milliseconds)
const DAY: u64 = 86_400_000;

/// Length of each reward window: 60 days
const REWARDS_DURATION: u64 = 60 * DAY;

/// Supply of the reward token minted to the deployer
const REWARD_SUPPLY: u128 = 1_000_000_000_000_000_000_000_000; // 1M tokens (18 decimals)

/// Deploys the reward token.
pub struct RewardTokenDeployScript;

impl DeployScript for RewardTokenDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use staking_rewards_contracts::token::RewardTokenInitArgs;

        let _reward_token = RewardToken::load_or_deploy(
            &env,
            RewardTokenInitArgs {
                name: String::from("Reward Token"),
                symbol: String::from("RTOK"),
                initial_supply: U256::from(REWARD_SUPPLY),
            },
            container,
            300_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the StakingRewards ledger.
/// Requires the reward token to be deployed first; the deployer becomes
/// admin, distributor and minter, and claims open one day from now.
pub struct StakingRewardsDeployScript;

impl DeployScript for StakingRewardsDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use staking_rewards_contracts::rewards::staking_rewards::StakingRewardsInitArgs;

        let reward_token = container.contract_ref::<RewardToken>(env)?;
        let reward_token_address = reward_token.address().clone();
        let deployer = env.caller();
        let start_time = env.block_time() + DAY;

        let staking_rewards = StakingRewards::load_or_deploy(
            &env,
            StakingRewardsInitArgs {
                start_time,
                rewards_duration: REWARDS_DURATION,
                reward_token: reward_token_address,
                rewards_distribution: deployer,
                minter: deployer,
                name: String::from("pool-token"),
                symbol: String::from("PPT"),
            },
            container,
            500_000_000_000
        )?;

        println!("Deployer: {:?}", deployer);
        println!("StakingRewards deployed to: {:?}", staking_rewards.address());
        println!("Claims open at block time {}", start_time);
        Ok(())
    }
}

/// Deploys the reward token and the StakingRewards ledger.
pub struct FullDeployScript;

impl DeployScript for FullDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        RewardTokenDeployScript.deploy(env, container)?;
        StakingRewardsDeployScript.deploy(env, container)?;
        Ok(())
    }
}

/// Scenario to fund a new reward window.
/// Transfers the reward into the ledger, then notifies it.
pub struct NotifyRewardScenario;

impl Scenario for NotifyRewardScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "amount",
                "Amount of reward token to distribute over the window",
                NamedCLType::U256,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut reward_token = container.contract_ref::<RewardToken>(env)?;
        let mut staking_rewards = container.contract_ref::<StakingRewards>(env)?;
        let amount = args.get_single::<U256>("amount")?;

        env.set_gas(100_000_000_000);
        reward_token.try_transfer(staking_rewards.address().clone(), amount)?;

        env.set_gas(200_000_000_000);
        staking_rewards.try_notify_reward_amount(amount)?;

        println!(
            "Reward window funded until {}",
            staking_rewards.period_finish()
        );
        Ok(())
    }
}

impl ScenarioMetadata for NotifyRewardScenario {
    const NAME: &'static str = "notify-reward";
    const DESCRIPTION: &'static str = "Funds the StakingRewards ledger and opens a reward window";
}

/// Scenario to credit stake to a participant.
pub struct MintStakeScenario;

impl Scenario for MintStakeScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "account",
                "Address of the participant",
                NamedCLType::Key,
            ),
            CommandArg::new(
                "amount",
                "Amount of stake to credit",
                NamedCLType::U256,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut staking_rewards = container.contract_ref::<StakingRewards>(env)?;
        let account = args.get_single::<Address>("account")?;
        let amount = args.get_single::<U256>("amount")?;

        env.set_gas(200_000_000_000);
        staking_rewards.try_mint(account, amount)?;

        println!("Stake of {:?}: {}", account, staking_rewards.balance_of(account));
        Ok(())
    }
}

impl ScenarioMetadata for MintStakeScenario {
    const NAME: &'static str = "mint-stake";
    const DESCRIPTION: &'static str = "Credits stake to a participant (minter only)";
}

/// Scenario to claim the caller's accrued rewards.
pub struct ClaimScenario;

impl Scenario for ClaimScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        _args: Args
    ) -> Result<(), Error> {
        let mut staking_rewards = container.contract_ref::<StakingRewards>(env)?;

        env.set_gas(200_000_000_000);
        let paid = staking_rewards.try_claim()?;

        println!("Claimed {} reward tokens", paid);
        Ok(())
    }
}

impl ScenarioMetadata for ClaimScenario {
    const NAME: &'static str = "claim";
    const DESCRIPTION: &'static str = "Claims the caller's accrued rewards";
}

/// Scenario to query a participant's accrued rewards.
pub struct EarnedScenario;

impl Scenario for EarnedScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "account",
                "Address of the participant",
                NamedCLType::Key,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let staking_rewards = container.contract_ref::<StakingRewards>(env)?;
        let account = args.get_single::<Address>("account")?;

        println!("Earned by {:?}: {}", account, staking_rewards.earned(account));
        Ok(())
    }
}

impl ScenarioMetadata for EarnedScenario {
    const NAME: &'static str = "earned";
    const DESCRIPTION: &'static str = "Shows the rewards accrued by a participant";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the StakingRewards contracts")
        // Deploy scripts
        .deploy(RewardTokenDeployScript)
        .deploy(StakingRewardsDeployScript)
        .deploy(FullDeployScript)
        // Contract references
        .contract::<RewardToken>()
        .contract::<StakingRewards>()
        // Scenarios
        .scenario(NotifyRewardScenario)
        .scenario(MintStakeScenario)
        .scenario(ClaimScenario)
        .scenario(EarnedScenario)
        .build()
        .run();
}
