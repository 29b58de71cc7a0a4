//! Account domain service.
//!
//! Implements the driving ports for registration, login, the `me` query and
//! saved-book changes on top of the credential store, password hasher and
//! token service ports. Every operation that needs an identity checks the
//! [`IdentityContext`] itself; the auth gate never rejects a request.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    AccountCommand, AuthSession, CurrentUserQuery, PasswordHashError, PasswordHasher,
    SavedBooksCommand, TokenService, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Book, BookId, EmailAddress, Error, Identity, IdentityContext, LoginCredentials,
    PasswordHash, Registration, User, UserId,
};

/// Client-visible message for every failed login.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// Client-visible message when an authenticated identity has no account.
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found!";

/// Plaintext hashed once to give unknown-email logins a real hash to verify
/// against, so both failure paths cost the same.
const TIMING_DECOY_PASSWORD: &str = "timing-decoy-password";

/// Account service implementing the driving ports.
pub struct AccountService<R: ?Sized, H: ?Sized, T: ?Sized> {
    users: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    decoy_hash: OnceCell<PasswordHash>,
}

impl<R: ?Sized, H: ?Sized, T: ?Sized> AccountService<R, H, T> {
    /// Create a service over the given ports.
    pub fn new(users: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            decoy_hash: OnceCell::new(),
        }
    }
}

impl<R, H, T> AccountService<R, H, T>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenService + ?Sized,
{
    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::DuplicateUsername { .. } => {
                Error::duplicate_user("Username is already taken")
                    .with_details(json!({ "field": "username" }))
            }
            UserPersistenceError::DuplicateEmail { .. } => {
                Error::duplicate_user("Email is already registered")
                    .with_details(json!({ "field": "email" }))
            }
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
        }
    }

    fn map_hash_error(error: &PasswordHashError) -> Error {
        Error::internal(format!("password hasher error: {error}"))
    }

    fn issue_session(&self, user: User) -> Result<AuthSession, Error> {
        let token = self
            .tokens
            .issue(&Identity::from(&user))
            .map_err(|error| Error::internal(format!("token issuance failed: {error}")))?;
        Ok(AuthSession { token, user })
    }

    async fn decoy_hash(&self) -> Result<&PasswordHash, Error> {
        self.decoy_hash
            .get_or_try_init(|| async {
                self.hasher
                    .hash(TIMING_DECOY_PASSWORD)
                    .await
                    .map_err(|error| Self::map_hash_error(&error))
            })
            .await
    }

    async fn reject_unknown_email(&self, credentials: &LoginCredentials) -> Error {
        match self.decoy_hash().await {
            Ok(decoy) => {
                if let Err(error) = self.hasher.verify(credentials.password(), decoy).await {
                    warn!(%error, "decoy password verification failed");
                }
            }
            Err(error) => warn!(%error, "decoy password hash unavailable"),
        }
        debug!("login rejected: unknown email");
        Error::invalid_credentials(INVALID_CREDENTIALS_MESSAGE)
    }

    async fn find_by_email(&self, raw: &str) -> Result<Option<User>, Error> {
        let Ok(email) = EmailAddress::new(raw) else {
            return Ok(None);
        };
        self.users
            .find_by_email(&email)
            .await
            .map_err(Self::map_persistence_error)
    }

    fn resolve(user: Option<User>, id: &UserId) -> Result<User, Error> {
        user.ok_or_else(|| {
            warn!(user_id = %id, "authenticated identity has no account");
            Error::user_not_found(USER_NOT_FOUND_MESSAGE)
        })
    }
}

#[async_trait]
impl<R, H, T> AccountCommand for AccountService<R, H, T>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenService + ?Sized,
{
    async fn register(&self, registration: &Registration) -> Result<AuthSession, Error> {
        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(|error| Self::map_hash_error(&error))?;
        let user = User::new(
            UserId::random(),
            registration.username().clone(),
            registration.email().clone(),
            password_hash,
        );
        self.users
            .insert(&user)
            .await
            .map_err(Self::map_persistence_error)?;
        info!(user_id = %user.id(), "account registered");
        self.issue_session(user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, Error> {
        let Some(user) = self.find_by_email(credentials.email()).await? else {
            return Err(self.reject_unknown_email(credentials).await);
        };

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
            .map_err(|error| Self::map_hash_error(&error))?;
        if !matches {
            debug!(user_id = %user.id(), "login rejected: password mismatch");
            return Err(Error::invalid_credentials(INVALID_CREDENTIALS_MESSAGE));
        }

        info!(user_id = %user.id(), "login succeeded");
        self.issue_session(user)
    }
}

#[async_trait]
impl<R, H, T> CurrentUserQuery for AccountService<R, H, T>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenService + ?Sized,
{
    async fn me(&self, context: &IdentityContext) -> Result<User, Error> {
        let identity = context.require()?;
        let user = self
            .users
            .find_by_id(&identity.id)
            .await
            .map_err(Self::map_persistence_error)?;
        Self::resolve(user, &identity.id)
    }
}

#[async_trait]
impl<R, H, T> SavedBooksCommand for AccountService<R, H, T>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenService + ?Sized,
{
    async fn save_book(&self, context: &IdentityContext, book: Book) -> Result<User, Error> {
        let identity = context.require()?;
        let user = self
            .users
            .add_book(&identity.id, &book)
            .await
            .map_err(Self::map_persistence_error)?;
        let user = Self::resolve(user, &identity.id)?;
        debug!(user_id = %identity.id, book_id = %book.id(), "book saved");
        Ok(user)
    }

    async fn remove_book(
        &self,
        context: &IdentityContext,
        book_id: &BookId,
    ) -> Result<User, Error> {
        let identity = context.require()?;
        let user = self
            .users
            .remove_book(&identity.id, book_id)
            .await
            .map_err(Self::map_persistence_error)?;
        let user = Self::resolve(user, &identity.id)?;
        debug!(user_id = %identity.id, book_id = %book_id, "book removed");
        Ok(user)
    }
}
