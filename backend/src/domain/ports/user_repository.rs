//! Credential store port: persistence of user accounts and saved books.
//!
//! Adapters must make each mutation atomic with respect to concurrent
//! callers. Uniqueness of username and email is enforced by the store;
//! saved-book updates apply the set semantics of
//! [`SavedBooks`](crate::domain::SavedBooks) inside the adapter's own
//! atomic update.
use async_trait::async_trait;

use crate::domain::{Book, BookId, EmailAddress, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Another account already uses the username.
        DuplicateUsername { username: String } => "username already registered: {username}",
        /// Another account already uses the email address.
        DuplicateEmail { email: String } => "email already registered: {email}",
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Port for storing and updating user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account, rejecting duplicate usernames or emails.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by normalised email address.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Add `book` to the user's list unless its id is already present.
    ///
    /// Returns the updated user, or `None` when `id` does not resolve.
    async fn add_book(
        &self,
        id: &UserId,
        book: &Book,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove every saved entry with `book_id`.
    ///
    /// Returns the updated user, or `None` when `id` does not resolve.
    async fn remove_book(
        &self,
        id: &UserId,
        book_id: &BookId,
    ) -> Result<Option<User>, UserPersistenceError>;
}
