use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use registrar_auth::access::{AccessEnforcer, Action, ResourceKind};
use registrar_auth::password::{PasswordHasher, PasswordPolicy};
use registrar_auth::token::{SignedToken, TokenCodec};
use registrar_core::error::AppError;
use registrar_core::result::AppResult;
use registrar_entity::account::{Account, AccountProfile, Role};
use registrar_store::JsonCollection;

use crate::context::RequestContext;

/// Message returned when signin credentials do not match.
///
/// Unknown email and wrong password answer identically, so the response
/// does not reveal which emails have accounts.
const BAD_CREDENTIALS: &str = "Invalid email or password";

/// Data for creating a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    /// Login email address.
    pub email: String,
    /// Plaintext password; hashed before anything is persisted.
    pub password: String,
    /// Requested role.
    pub role: Role,
    /// Class section; required for students and rejected for other roles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

/// Credentials for signing in to an existing account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// A successful signup or signin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The account, without its password hash.
    pub account: AccountProfile,
    /// Identity token for subsequent requests.
    pub token: SignedToken,
}

/// Handles account signup, signin, and token authentication.
#[derive(Clone)]
pub struct AccountService {
    /// Accounts collection.
    accounts: Arc<JsonCollection<Account>>,
    /// Identity token codec.
    codec: Arc<TokenCodec>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password strength policy.
    policy: Arc<PasswordPolicy>,
    /// Access enforcer.
    access: Arc<AccessEnforcer>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        accounts: Arc<JsonCollection<Account>>,
        codec: Arc<TokenCodec>,
        hasher: Arc<PasswordHasher>,
        policy: Arc<PasswordPolicy>,
        access: Arc<AccessEnforcer>,
    ) -> Self {
        Self {
            accounts,
            codec,
            hasher,
            policy,
            access,
        }
    }

    /// Creates an account and signs the new caller in.
    ///
    /// Emails are unique case-insensitively. Student accounts must name a
    /// section; admin and teacher accounts must not.
    pub async fn signup(&self, request: SignupRequest) -> AppResult<AuthResponse> {
        self.access
            .authorize_write(None, ResourceKind::Accounts, Action::Create)?;

        let email = request.email.trim().to_string();
        if !email.contains('@') || !email.contains('.') {
            return Err(AppError::validation("Invalid email format"));
        }

        let section = match request.role {
            Role::Student => {
                let section = request.section.as_deref().map(str::trim).unwrap_or_default();
                if section.is_empty() {
                    return Err(AppError::validation("Student accounts must name a section"));
                }
                Some(section.to_string())
            }
            Role::Admin | Role::Teacher => {
                if request.section.is_some() {
                    return Err(AppError::validation(
                        "Only student accounts carry a section",
                    ));
                }
                None
            }
        };

        self.policy.check(&request.password)?;
        let password_hash = self.hasher.hash(&request.password)?;

        let account = Account {
            id: 0,
            email: email.clone(),
            password_hash,
            role: request.role,
            section,
            created_at: Utc::now(),
        };

        let created = self
            .accounts
            .create_unique(
                |existing| existing.email.eq_ignore_ascii_case(&email),
                "An account with this email already exists",
                account,
            )
            .await?;

        let token = self.codec.issue(&created)?;
        info!(account_id = created.id, role = %created.role, "Account created");

        Ok(AuthResponse {
            account: AccountProfile::from(&created),
            token,
        })
    }

    /// Verifies credentials and issues a fresh identity token.
    pub async fn signin(&self, request: SigninRequest) -> AppResult<AuthResponse> {
        let email = request.email.trim();
        let account = self
            .accounts
            .find_where(|account| account.email.eq_ignore_ascii_case(email))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::authentication(BAD_CREDENTIALS))?;

        let password_valid = self
            .hasher
            .verify(&request.password, &account.password_hash)?;
        if !password_valid {
            return Err(AppError::authentication(BAD_CREDENTIALS));
        }

        let token = self.codec.issue(&account)?;
        info!(account_id = account.id, "Account signed in");

        Ok(AuthResponse {
            account: AccountProfile::from(&account),
            token,
        })
    }

    /// Verifies an identity token and builds the request context for it.
    pub fn authenticate(&self, token: &str) -> AppResult<RequestContext> {
        Ok(RequestContext::new(self.codec.verify(token)?))
    }
}
