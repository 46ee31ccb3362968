//! Class routine management and scoped reads.

mod service;

pub use service::{RoutineDraft, RoutineService};
