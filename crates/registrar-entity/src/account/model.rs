//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use registrar_core::traits::{CollectionRecord, Identified};
use registrar_core::types::RecordId;

use super::role::Role;

/// A registered account, as persisted in the accounts collection.
///
/// The password hash is part of the persisted record; services never hand
/// this struct to callers directly, they return [`AccountProfile`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique account identifier.
    pub id: RecordId,
    /// Login email address, unique within the collection.
    pub email: String,
    /// Argon2 password hash.
    pub password_hash: String,
    /// Account role.
    pub role: Role,
    /// Class section; present exactly for student accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl CollectionRecord for Account {
    const COLLECTION: &'static str = "accounts";
}

impl Identified for Account {
    fn id(&self) -> RecordId {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

/// Hash-free view of an account, safe to return to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    /// Unique account identifier.
    pub id: RecordId,
    /// Login email address.
    pub email: String,
    /// Account role.
    pub role: Role,
    /// Class section; present exactly for student accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountProfile {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            role: account.role,
            section: account.section.clone(),
            created_at: account.created_at,
        }
    }
}
