//! Driving port for reading the caller's own account.

use async_trait::async_trait;

use crate::domain::{Error, IdentityContext, User};

/// Domain use-case port behind the `me` query.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurrentUserQuery: Send + Sync {
    /// Load the account of the authenticated caller.
    async fn me(&self, context: &IdentityContext) -> Result<User, Error>;
}
