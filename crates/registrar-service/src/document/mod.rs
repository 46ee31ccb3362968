//! Shared document metadata management.

mod service;

pub use service::{DocumentService, DocumentUpload};
