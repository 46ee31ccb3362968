//! Account domain entities.

pub mod model;
pub mod role;

pub use model::{Account, AccountProfile};
pub use role::Role;
