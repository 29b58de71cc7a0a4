//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`UserRepository`], [`PasswordHasher`], [`TokenService`]) are
//! implemented by outbound adapters. Driving ports ([`AccountCommand`],
//! [`SavedBooksCommand`], [`CurrentUserQuery`]) are implemented by
//! [`AccountService`](crate::domain::AccountService) and called by the GraphQL
//! resolvers.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod current_user_query;
mod password_hasher;
mod saved_books_command;
mod token_service;
mod user_repository;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::{AccountCommand, AuthSession};
pub use current_user_query::CurrentUserQuery;
#[cfg(test)]
pub use current_user_query::MockCurrentUserQuery;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use saved_books_command::MockSavedBooksCommand;
pub use saved_books_command::SavedBooksCommand;
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
