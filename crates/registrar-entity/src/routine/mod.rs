//! Routine domain entities.

pub mod day;
pub mod model;

pub use day::Weekday;
pub use model::Routine;
