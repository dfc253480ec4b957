//! CEP-18 compatible reward token
//!
//! The reward ledger only needs `balance_of` and `transfer` from the asset it
//! pays out; `RewardToken` is a minimal implementation used for deployment
//! and tests.
use odra::prelude::*;
use odra::casper_types::U256;
use crate::events::Transfer;
use crate::errors::TokenError;

/// Reward token module implementing the CEP-18 subset the ledger relies on
#[odra::module]
pub struct RewardToken {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Token decimals
    decimals: Var<u8>,
    /// Total supply of tokens
    total_supply: Var<U256>,
    /// Balance mapping: owner -> balance
    balances: Mapping<Address, U256>,
}

#[odra::module]
impl RewardToken {
    /// Initialize the token and credit the whole supply to the deployer
    pub fn init(&mut self, name: String, symbol: String, initial_supply: U256) {
        let deployer = self.env().caller();
        self.name.set(name);
        self.symbol.set(symbol);
        self.decimals.set(18);
        self.total_supply.set(initial_supply);
        self.balances.set(&deployer, initial_supply);

        self.env().emit_event(Transfer {
            from: Address::from(self.env().self_address()),
            to: deployer,
            value: initial_supply,
        });
    }

    pub fn name(&self) -> String {
        self.name.get_or_default()
    }

    pub fn symbol(&self) -> String {
        self.symbol.get_or_default()
    }

    pub fn decimals(&self) -> u8 {
        self.decimals.get_or_default()
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    /// Transfer tokens from the caller to `to`
    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        let from = self.env().caller();
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(TokenError::InsufficientBalance);
        }

        self.balances.set(&from, from_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.set(&to, to_balance + amount);

        self.env().emit_event(Transfer { from, to, value: amount });
        true
    }
}

/// External interface of the reward asset as seen by the ledger
#[odra::external_contract]
pub trait Cep18Token {
    /// Get the balance of an address
    fn balance_of(&self, owner: Address) -> U256;

    /// Transfer tokens from the calling contract
    fn transfer(&mut self, to: Address, amount: U256) -> bool;
}
