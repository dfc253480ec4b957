#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]
extern crate alloc;

pub mod errors;
pub mod events;
pub mod math;

// Reward asset
pub mod token;

// Role-based access control
pub mod access;

// Reward distribution ledger
pub mod rewards;
