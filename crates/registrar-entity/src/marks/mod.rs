//! Marks domain entities.

pub mod grade;
pub mod model;

pub use grade::Grade;
pub use model::Mark;
