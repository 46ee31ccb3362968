//! Attendance domain entities.

pub mod model;
pub mod status;

pub use model::Attendance;
pub use status::AttendanceStatus;
