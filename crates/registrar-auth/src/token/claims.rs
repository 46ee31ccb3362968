//! Identity token claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use registrar_core::types::RecordId;
use registrar_entity::account::Role;

/// Claims payload embedded in every identity token.
///
/// The claims carry everything authorization needs, so a request is
/// checked without re-reading the accounts collection. Role and section
/// are as of issuance time and go stale if the account changes before the
/// token expires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the account id.
    pub sub: RecordId,
    /// Login email at issuance time.
    pub email: String,
    /// Account role at issuance time.
    pub role: Role,
    /// Class section, for student accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the account id from the subject claim.
    pub fn account_id(&self) -> RecordId {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}
