//! Marks submission with grade derivation.

mod service;

pub use service::{MarksService, MarksSubmission};
