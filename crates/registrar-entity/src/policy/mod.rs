//! School policy domain entities.

pub mod model;

pub use model::{Policy, PolicyFileType};
