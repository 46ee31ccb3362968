//! # registrar-core
//!
//! Core crate for Registrar. Contains the record traits, configuration
//! schemas, identifier types, logging setup, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Registrar crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
