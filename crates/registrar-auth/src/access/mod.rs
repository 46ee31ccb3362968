//! Access policy table and enforcement.

pub mod enforcer;
pub mod policies;

pub use enforcer::{AccessEnforcer, Scope};
pub use policies::{AccessPolicies, Action, ReadAccess, ResourceKind, WriteAccess};
