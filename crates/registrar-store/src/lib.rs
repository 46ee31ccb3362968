//! # registrar-store
//!
//! Persistence layer for Registrar. Each collection is one JSON array
//! document on disk; [`CollectionStore`] owns the files, the id sequences,
//! and the per-collection writer locks, and [`JsonCollection`] layers the
//! typed record operations on top.

pub mod collection;
pub mod store;

pub use collection::JsonCollection;
pub use store::CollectionStore;
