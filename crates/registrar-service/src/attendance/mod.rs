//! Attendance recording and scoped reads.

mod service;

pub use service::{AttendanceService, AttendanceSubmission};
