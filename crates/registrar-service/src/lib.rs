//! # registrar-service
//!
//! Business logic service layer for Registrar. Each service orchestrates
//! the collection store and the access enforcer to implement one
//! resource's operations:
//!
//! - `account` - Signup, signin, and token authentication
//! - `attendance` - Attendance recording and scoped reads
//! - `routine` - Class routine management
//! - `document` - Shared document metadata
//! - `policy` - School policy publication
//! - `marks` - Marks submission with grade derivation
//!
//! Services follow constructor injection: every dependency is provided
//! at construction time as an `Arc` reference, so the same instances can
//! be shared across tasks.

pub mod account;
pub mod attendance;
pub mod context;
pub mod document;
pub mod marks;
pub mod policy;
pub mod routine;

pub use account::{AccountService, AuthResponse, SigninRequest, SignupRequest};
pub use attendance::{AttendanceService, AttendanceSubmission};
pub use context::RequestContext;
pub use document::{DocumentService, DocumentUpload};
pub use marks::{MarksService, MarksSubmission};
pub use policy::{PolicyService, PolicyUpload};
pub use routine::{RoutineDraft, RoutineService};
