//! Access Control - role membership registry
//!
//! Contracts embed `AccessControl` as a submodule, seed roles during `init`
//! through the unchecked helpers and guard entry points with `check_role`.

use odra::prelude::*;
use super::errors::AccessControlError;
use super::events::*;

/// Roles recognised by the staking rewards contracts
#[odra::odra_type]
pub enum Role {
    /// May grant and revoke every role
    Admin,
    /// May fund reward windows
    RewardDistribution,
    /// May credit stake to participants
    Minter,
}

impl Role {
    /// The error reported when a caller lacks this role
    pub fn missing_role_error(&self) -> AccessControlError {
        match self {
            Role::Admin => AccessControlError::MissingAdminRole,
            Role::RewardDistribution => AccessControlError::MissingRewardDistributionRole,
            Role::Minter => AccessControlError::MissingMinterRole,
        }
    }
}

/// Access Control module
#[odra::module]
pub struct AccessControl {
    /// Role grants: (role, account) -> member
    roles: Mapping<(Role, Address), bool>,
}

#[odra::module]
impl AccessControl {
    /// Whether `account` holds `role`
    pub fn has_role(&self, role: Role, account: Address) -> bool {
        self.roles.get(&(role, account)).unwrap_or(false)
    }

    /// Grant `role` to `account`. Caller must be an admin.
    pub fn grant_role(&mut self, role: Role, account: Address) {
        let caller = self.env().caller();
        self.check_role(Role::Admin, caller);
        self.unchecked_grant_role(role, account);
    }

    /// Revoke `role` from `account`. Caller must be an admin.
    pub fn revoke_role(&mut self, role: Role, account: Address) {
        let caller = self.env().caller();
        self.check_role(Role::Admin, caller);
        self.unchecked_revoke_role(role, account);
    }

    /// Drop one of the caller's own roles
    pub fn renounce_role(&mut self, role: Role) {
        let caller = self.env().caller();
        self.unchecked_revoke_role(role, caller);
    }
}

impl AccessControl {
    /// Revert with the role-specific error unless `account` holds `role`
    pub fn check_role(&self, role: Role, account: Address) {
        if !self.has_role(role.clone(), account) {
            self.env().revert(role.missing_role_error());
        }
    }

    /// Grant without checking the caller; used while seeding roles in `init`
    pub fn unchecked_grant_role(&mut self, role: Role, account: Address) {
        if self.has_role(role.clone(), account) {
            return;
        }
        self.roles.set(&(role.clone(), account), true);

        let sender = self.env().caller();
        self.env().emit_event(RoleGranted { role, account, sender });
    }

    fn unchecked_revoke_role(&mut self, role: Role, account: Address) {
        if !self.has_role(role.clone(), account) {
            return;
        }
        self.roles.set(&(role.clone(), account), false);

        let sender = self.env().caller();
        self.env().emit_event(RoleRevoked { role, account, sender });
    }
}
