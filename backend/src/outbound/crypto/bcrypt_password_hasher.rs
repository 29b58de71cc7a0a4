//! bcrypt-backed [`PasswordHasher`].
//!
//! bcrypt embeds the salt and cost in its output, so a hash produced at one
//! cost still verifies after the configured cost changes. bcrypt only reads
//! the first 72 bytes of its input, so longer plaintexts are refused on
//! `hash` and never match on `verify`.

use async_trait::async_trait;
use tokio::task;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::domain::{PASSWORD_MAX_BYTES, PasswordHash};
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Work factor used when none is configured.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Password hasher running bcrypt on the blocking thread pool.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the given work factor (4–31).
    #[must_use]
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Configured work factor.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

fn worker_error(error: task::JoinError) -> PasswordHashError {
    PasswordHashError::worker(error.to_string())
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError> {
        if plaintext.len() > PASSWORD_MAX_BYTES {
            return Err(PasswordHashError::plaintext_too_long(PASSWORD_MAX_BYTES));
        }
        let plaintext = Zeroizing::new(plaintext.to_owned());
        let cost = self.cost;
        let encoded = task::spawn_blocking(move || bcrypt::hash(plaintext.as_bytes(), cost))
            .await
            .map_err(worker_error)?
            .map_err(|error| PasswordHashError::hashing(error.to_string()))?;
        Ok(PasswordHash::new(encoded))
    }

    async fn verify(
        &self,
        plaintext: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        if plaintext.len() > PASSWORD_MAX_BYTES {
            debug!("password longer than bcrypt input limit; treating as mismatch");
            return Ok(false);
        }
        let plaintext = Zeroizing::new(plaintext.to_owned());
        let encoded = hash.as_str().to_owned();
        let outcome = task::spawn_blocking(move || bcrypt::verify(plaintext.as_bytes(), &encoded))
            .await
            .map_err(worker_error)?;
        match outcome {
            Ok(matches) => Ok(matches),
            Err(error) => {
                warn!(%error, "stored password hash could not be parsed");
                Ok(false)
            }
        }
    }
}
