//! School policy publication.

mod service;

pub use service::{PolicyService, PolicyUpload};
