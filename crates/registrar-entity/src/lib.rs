//! # registrar-entity
//!
//! Domain entity models for Registrar. Every struct in this crate
//! represents a record in one of the JSON collections or a domain value
//! object. All entities derive `Debug`, `Clone`, `Serialize`,
//! `Deserialize`, and `PartialEq`, and persisted structs rename their
//! fields to camelCase so the collection documents keep the field names
//! other tooling expects.

pub mod account;
pub mod attendance;
pub mod document;
pub mod marks;
pub mod policy;
pub mod routine;
pub mod subject;
