//! Binary for building WASM contracts from odra modules.
#![doc = "Binary for building WASM contracts from odra modules."]

#[allow(unused_imports)]
use staking_rewards_contracts;

fn main() {
    // Compilation of StakingRewards and RewardToken is driven by odra-build.
}
