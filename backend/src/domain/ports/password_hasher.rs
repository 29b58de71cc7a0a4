//! Port for one-way password hashing.
//!
//! Hashing and verification are CPU-bound; adapters are expected to move the
//! work off the async executor threads.

use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hasher adapters.
    ///
    /// A wrong password is not an error: `verify` returns `Ok(false)`.
    pub enum PasswordHashError {
        /// The hashing primitive rejected its input.
        Hashing { message: String } => "password hashing failed: {message}",
        /// The plaintext is longer than the algorithm reads.
        PlaintextTooLong { max: usize } => "password exceeds {max} bytes",
        /// The blocking worker running the computation did not complete.
        Worker { message: String } => "password hashing worker failed: {message}",
    }
}

/// Salted, adaptive password hashing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `plaintext` with a freshly generated salt embedded in the output.
    ///
    /// Plaintexts the algorithm would only read in part are rejected, never
    /// silently shortened.
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check `plaintext` against `hash` using the salt stored in `hash`.
    ///
    /// A plaintext that `hash` would have rejected never matches.
    async fn verify(&self, plaintext: &str, hash: &PasswordHash)
    -> Result<bool, PasswordHashError>;
}
