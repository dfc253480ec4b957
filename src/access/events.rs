//! Events for access control

use odra::prelude::*;
use super::access_control::Role;

/// Event emitted when a role is granted to an account
#[odra::event]
pub struct RoleGranted {
    pub role: Role,
    pub account: Address,
    pub sender: Address,
}

/// Event emitted when a role is revoked or renounced
#[odra::event]
pub struct RoleRevoked {
    pub role: Role,
    pub account: Address,
    pub sender: Address,
}
