//! Identity token signing and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use registrar_core::config::auth::AuthConfig;
use registrar_core::error::AppError;
use registrar_entity::account::Account;

use super::claims::Claims;

/// Message returned for every verification failure.
///
/// Callers cannot tell an expired token from a tampered or malformed one;
/// the specific cause is logged at debug level only.
const VERIFY_FAILED: &str = "Invalid or expired token";

/// Signs and verifies identity tokens (HMAC-SHA256).
#[derive(Clone)]
pub struct TokenCodec {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    /// Token lifetime.
    ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("validation", &self.validation)
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// A freshly issued token together with its expiry.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SignedToken {
    /// The encoded token.
    pub token: String,
    /// Token expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl TokenCodec {
    /// Creates a new codec from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // No leeway: a token is rejected the moment its expiry passes.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            ttl: Duration::hours(config.token_ttl_hours as i64),
        }
    }

    /// Issues a token for the account, expiring one TTL from now.
    pub fn issue(&self, account: &Account) -> Result<SignedToken, AppError> {
        self.issue_at(account, Utc::now())
    }

    /// Issues a token with an explicit issuance instant.
    ///
    /// The expiry is `issued_at` plus the configured TTL. Tests use this to
    /// mint already-expired tokens without sleeping.
    pub fn issue_at(
        &self,
        account: &Account,
        issued_at: DateTime<Utc>,
    ) -> Result<SignedToken, AppError> {
        let expires_at = issued_at + self.ttl;
        let claims = Claims {
            sub: account.id,
            email: account.email.clone(),
            role: account.role,
            section: account.section.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode identity token: {e}")))?;

        Ok(SignedToken { token, expires_at })
    }

    /// Verifies a token string and returns its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "Token verification failed");
                AppError::authentication(VERIFY_FAILED)
            })?;
        Ok(token_data.claims)
    }
}
