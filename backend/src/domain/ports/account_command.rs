//! Driving port for account registration and login.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User};

/// Token plus the account it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// Domain use-case port for account creation and authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account and issue a token for it.
    async fn register(&self, registration: &Registration) -> Result<AuthSession, Error>;

    /// Check credentials and issue a token.
    ///
    /// Unknown email and wrong password produce the same error.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, Error>;
}
