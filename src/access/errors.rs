//! Error types for access control

use odra::prelude::*;

/// Raised when a caller lacks the role an operation requires.
/// Each variant names the missing role.
#[odra::odra_error]
pub enum AccessControlError {
    /// Caller is not a role administrator
    MissingAdminRole = 200,
    /// Caller may not fund reward windows
    MissingRewardDistributionRole = 201,
    /// Caller may not mint stake
    MissingMinterRole = 202,
}
