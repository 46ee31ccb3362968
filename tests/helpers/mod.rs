//! Shared test helpers for integration tests.

#![allow(dead_code)]

use tempfile::TempDir;

use registrar::config::AppConfig;
use registrar::{AuthResponse, Registrar, RequestContext, Role, SignupRequest};

/// Test application context.
///
/// Owns the temporary data directory, so the stored collections disappear
/// when the test ends.
pub struct TestApp {
    /// The wired service registry.
    pub registrar: Registrar,
    /// Configuration the registry was built from.
    pub config: AppConfig,
    /// Temporary data directory backing the collection store.
    _data_dir: TempDir,
}

impl TestApp {
    /// Create a new test application over a fresh temporary directory.
    pub async fn new() -> Self {
        let data_dir = TempDir::new().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.auth.token_ttl_hours = 1;
        config.storage.data_dir = data_dir.path().to_string_lossy().into_owned();

        let registrar = Registrar::open(&config)
            .await
            .expect("Failed to open registrar");

        Self {
            registrar,
            config,
            _data_dir: data_dir,
        }
    }

    /// Rebuild the registry over the same data directory.
    ///
    /// Simulates a process restart: collections and id sequences must come
    /// back from disk.
    pub async fn reopen(&mut self) {
        self.registrar = Registrar::open(&self.config)
            .await
            .expect("Failed to reopen registrar");
    }

    /// Sign up an account and return the auth response.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        role: Role,
        section: Option<&str>,
    ) -> AuthResponse {
        self.registrar
            .accounts
            .signup(SignupRequest {
                email: email.to_string(),
                password: password.to_string(),
                role,
                section: section.map(str::to_string),
            })
            .await
            .expect("Signup failed")
    }

    /// Sign up an admin account and return its request context.
    pub async fn admin(&self, email: &str) -> RequestContext {
        let auth = self.signup(email, "password123", Role::Admin, None).await;
        self.context(&auth)
    }

    /// Sign up a teacher account and return its request context.
    pub async fn teacher(&self, email: &str) -> RequestContext {
        let auth = self.signup(email, "password123", Role::Teacher, None).await;
        self.context(&auth)
    }

    /// Sign up a student account in a section and return its request context.
    pub async fn student(&self, email: &str, section: &str) -> RequestContext {
        let auth = self
            .signup(email, "password123", Role::Student, Some(section))
            .await;
        self.context(&auth)
    }

    /// Authenticate an auth response's token into a request context.
    pub fn context(&self, auth: &AuthResponse) -> RequestContext {
        self.registrar
            .accounts
            .authenticate(&auth.token.token)
            .expect("Token authentication failed")
    }
}
