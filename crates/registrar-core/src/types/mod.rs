//! Core type definitions used across the Registrar workspace.

pub mod id;

pub use id::RecordId;
