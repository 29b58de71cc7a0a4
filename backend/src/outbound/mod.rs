//! Outbound adapters implementing domain ports for infrastructure concerns.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of the driven ports:
//!
//! - **persistence**: in-memory credential store
//! - **crypto**: bcrypt password hashing on the blocking pool
//! - **token**: HS256 JSON Web Tokens
//!
//! Adapters are thin translators that convert between domain types and
//! library-specific representations. They contain no business logic.

pub mod crypto;
pub mod persistence;
pub mod token;
