//! Port for issuing and verifying signed identity tokens.
//!
//! Tokens are stateless: nothing is stored server-side, so a token stays
//! valid until it expires.

use crate::domain::Identity;

use super::define_port_error;

define_port_error! {
    /// Token issuance and verification failures.
    pub enum TokenError {
        /// The token could not be decoded or its claims are unusable.
        Malformed { message: String } => "token is malformed: {message}",
        /// The signature does not match the configured secret.
        InvalidSignature => "token signature is invalid",
        /// The token's expiry time has passed.
        Expired => "token has expired",
        /// Encoding a new token failed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Signed, time-limited identity tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a token for `identity` that expires after the configured TTL.
    fn issue(&self, identity: &Identity) -> Result<String, TokenError>;

    /// Check signature and expiry and return the embedded identity.
    fn verify(&self, token: &str) -> Result<Identity, TokenError>;
}
