//! # registrar-auth
//!
//! Identity and authorization for Registrar.
//!
//! ## Modules
//!
//! - `token` — identity token signing and verification
//! - `password` — Argon2id password hashing and policy enforcement
//! - `access` — declarative per-resource access rules and their enforcement

pub mod access;
pub mod password;
pub mod token;

pub use access::{AccessEnforcer, AccessPolicies, Action, ResourceKind, Scope};
pub use password::{PasswordHasher, PasswordPolicy};
pub use token::{Claims, SignedToken, TokenCodec};
