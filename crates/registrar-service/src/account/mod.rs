//! Account signup, signin, and token authentication.

mod service;

pub use service::{AccountService, AuthResponse, SigninRequest, SignupRequest};
