//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed account and saved-book model, the
//! ports that connect it to adapters, and the service implementing the
//! account use cases. Nothing in here knows about HTTP or GraphQL.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User (alias to `user::User`): stored account with its saved books.
//! - IdentityContext (alias to `identity::IdentityContext`): per-request
//!   caller identity.
//! - AccountService (alias to `account_service::AccountService`): driving
//!   port implementation.

pub mod account_service;
pub mod auth;
pub mod book;
pub mod error;
pub mod identity;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::{
    AccountService, INVALID_CREDENTIALS_MESSAGE, USER_NOT_FOUND_MESSAGE,
};
pub use self::auth::{LoginCredentials, LoginValidationError, Registration};
pub use self::book::{Book, BookDetails, BookId, BookValidationError, SavedBooks};
pub use self::error::{Error, ErrorCode};
pub use self::identity::{Identity, IdentityContext, UNAUTHENTICATED_MESSAGE};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, PASSWORD_MAX_BYTES, PasswordHash, USERNAME_MAX, User, UserId,
    UserValidationError, Username,
};
