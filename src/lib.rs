//! # Registrar
//!
//! School record service core: accounts with role-based access, class
//! routines, attendance, marks with derived letter grades, shared documents,
//! and school policies. Every resource is persisted as a JSON collection
//! under a single data directory.
//!
//! The workspace is split into focused crates:
//!
//! - `registrar-core` - Errors, configuration, logging, shared types
//! - `registrar-entity` - Domain records and their serialized forms
//! - `registrar-store` - JSON collection store with durable id sequences
//! - `registrar-auth` - Identity tokens, password hashing, access policies
//! - `registrar-service` - Business logic services, one per resource
//!
//! [`Registrar::open`] wires them together: it opens the collection store,
//! builds the auth system, and hands every service a shared `Arc` of what
//! it needs.

use std::sync::Arc;

use tracing::info;

use registrar_auth::{AccessEnforcer, PasswordHasher, PasswordPolicy, TokenCodec};
use registrar_core::config::AppConfig;
use registrar_entity::account::Account;
use registrar_entity::attendance::Attendance;
use registrar_entity::document::Document;
use registrar_entity::marks::Mark;
use registrar_entity::policy::Policy;
use registrar_entity::routine::Routine;
use registrar_service::{
    AccountService, AttendanceService, DocumentService, MarksService, PolicyService,
    RoutineService,
};
use registrar_store::{CollectionStore, JsonCollection};

pub use registrar_core::config;
pub use registrar_core::error::ErrorKind;
pub use registrar_core::logging;
pub use registrar_core::types::RecordId;
pub use registrar_core::{AppError, AppResult};

pub use registrar_entity::account::{AccountProfile, Role};
pub use registrar_entity::attendance::AttendanceStatus;
pub use registrar_entity::marks::Grade;
pub use registrar_entity::policy::PolicyFileType;
pub use registrar_entity::routine::Weekday;
pub use registrar_entity::subject::Subject;

pub use registrar_auth::{Claims, Scope, SignedToken};

pub use registrar_service::{
    AttendanceSubmission, AuthResponse, DocumentUpload, MarksSubmission, PolicyUpload,
    RequestContext, RoutineDraft, SigninRequest, SignupRequest,
};

/// The assembled school record service.
///
/// Holds one shared instance of every service, all wired over the same
/// collection store and access enforcer. Cloning is cheap; clones share
/// the underlying state.
#[derive(Clone)]
pub struct Registrar {
    /// Account signup, signin, and token authentication.
    pub accounts: AccountService,
    /// Attendance recording and scoped reads.
    pub attendance: AttendanceService,
    /// Class routine management.
    pub routines: RoutineService,
    /// Shared document metadata.
    pub documents: DocumentService,
    /// School policy publication.
    pub policies: PolicyService,
    /// Marks submission with derived grades.
    pub marks: MarksService,
}

impl Registrar {
    /// Opens the data directory and wires every service together.
    pub async fn open(config: &AppConfig) -> AppResult<Self> {
        // Storage
        let store = Arc::new(CollectionStore::open(&config.storage).await?);

        // Auth system
        let codec = Arc::new(TokenCodec::new(&config.auth));
        let hasher = Arc::new(PasswordHasher::new());
        let password_policy = Arc::new(PasswordPolicy::new(&config.auth));
        let access = Arc::new(AccessEnforcer::new());

        // Collections
        let accounts = Arc::new(JsonCollection::<Account>::new(Arc::clone(&store)));
        let attendance = Arc::new(JsonCollection::<Attendance>::new(Arc::clone(&store)));
        let routines = Arc::new(JsonCollection::<Routine>::new(Arc::clone(&store)));
        let documents = Arc::new(JsonCollection::<Document>::new(Arc::clone(&store)));
        let policies = Arc::new(JsonCollection::<Policy>::new(Arc::clone(&store)));
        let marks = Arc::new(JsonCollection::<Mark>::new(Arc::clone(&store)));

        info!(data_dir = %config.storage.data_dir, "Registrar opened");

        Ok(Self {
            accounts: AccountService::new(
                Arc::clone(&accounts),
                Arc::clone(&codec),
                Arc::clone(&hasher),
                Arc::clone(&password_policy),
                Arc::clone(&access),
            ),
            attendance: AttendanceService::new(
                Arc::clone(&attendance),
                Arc::clone(&accounts),
                Arc::clone(&access),
            ),
            routines: RoutineService::new(
                Arc::clone(&routines),
                Arc::clone(&accounts),
                Arc::clone(&access),
            ),
            documents: DocumentService::new(Arc::clone(&documents), Arc::clone(&access)),
            policies: PolicyService::new(Arc::clone(&policies), Arc::clone(&access)),
            marks: MarksService::new(
                Arc::clone(&marks),
                Arc::clone(&accounts),
                Arc::clone(&access),
            ),
        })
    }
}
