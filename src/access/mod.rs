//! Role-based access control
//!
//! Generic role registry composed into contracts that gate entry points on
//! role membership. Role administration is restricted to `Role::Admin`.

pub mod access_control;
pub mod errors;
pub mod events;

pub use access_control::{AccessControl, Role};
pub use errors::AccessControlError;
pub use events::*;
