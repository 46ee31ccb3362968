//! Core traits defined in `registrar-core` and implemented by other crates.

pub mod record;

pub use record::{CollectionRecord, Identified};
