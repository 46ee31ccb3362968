//! Request context carrying the verified caller identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use registrar_auth::Claims;
use registrar_core::types::RecordId;
use registrar_entity::account::Role;

/// Context for the current authenticated request.
///
/// Built from verified token claims, so every service method knows who
/// is acting without re-reading the accounts collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Verified claims of the caller's identity token.
    pub claims: Claims,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a request context from verified claims.
    pub fn new(claims: Claims) -> Self {
        Self {
            claims,
            request_time: Utc::now(),
        }
    }

    /// The caller's account id.
    pub fn account_id(&self) -> RecordId {
        self.claims.sub
    }

    /// The caller's login email.
    pub fn email(&self) -> &str {
        &self.claims.email
    }

    /// The caller's role.
    pub fn role(&self) -> Role {
        self.claims.role
    }

    /// The caller's class section, present on student accounts.
    pub fn section(&self) -> Option<&str> {
        self.claims.section.as_deref()
    }

    /// Whether the caller holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.claims.role.is_admin()
    }
}

impl From<Claims> for RequestContext {
    fn from(claims: Claims) -> Self {
        Self::new(claims)
    }
}
