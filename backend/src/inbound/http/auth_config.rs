//! Credential configuration parsing and validation.
//!
//! The token signing secret, token lifetime and bcrypt work factor come from
//! the environment. They are validated here so startup fails before the
//! server binds when a value is unusable.

use chrono::TimeDelta;
use mockable::Env;
use tracing::warn;

use crate::outbound::crypto::DEFAULT_BCRYPT_COST;
use crate::outbound::token::{DEFAULT_TOKEN_TTL_SECS, TokenSettings};

const SECRET_ENV: &str = "JWT_SECRET_KEY";
const TTL_ENV: &str = "JWT_TTL_SECS";
const BCRYPT_COST_ENV: &str = "BCRYPT_COST";
const SECRET_MIN_LEN: usize = 32;
const BCRYPT_COST_MIN: u32 = 4;
const BCRYPT_COST_MAX: u32 = 31;
/// Longest accepted token lifetime: one year.
pub const TOKEN_TTL_MAX_SECS: i64 = 365 * 24 * 60 * 60;
const TTL_EXPECTED: &str = "a number of seconds between 1 and 31536000";
const BCRYPT_COST_EXPECTED: &str = "an integer between 4 and 31";

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for invalid toggles.
    Debug,
    /// Release builds require valid values and a full-length secret.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bookshelf::inbound::http::auth_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Credential settings derived from the environment.
#[derive(Debug)]
pub struct AuthSettings {
    /// Token signing secret and lifetime.
    pub token: TokenSettings,
    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: u32,
}

/// Errors raised while validating credential configuration.
#[derive(thiserror::Error, Debug)]
pub enum AuthConfigError {
    /// A required environment variable is missing or blank.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The signing secret is too short for release builds.
    #[error("JWT_SECRET_KEY too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort { length: usize, min_len: usize },
}

/// Build credential settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use bookshelf::inbound::http::auth_config::{BuildMode, auth_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "JWT_SECRET_KEY" => Some("0123456789abcdef0123456789abcdef".to_owned()),
///     "JWT_TTL_SECS" => Some("900".to_owned()),
///     _ => None,
/// });
///
/// let settings = auth_settings_from_env(&env, BuildMode::Release).expect("valid settings");
/// assert_eq!(settings.token.ttl().num_seconds(), 900);
/// assert_eq!(settings.bcrypt_cost, 10);
/// ```
pub fn auth_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<AuthSettings, AuthConfigError> {
    let secret = secret_from_env(env, mode)?;
    let ttl = ttl_from_env(env, mode)?;
    let bcrypt_cost = bcrypt_cost_from_env(env, mode)?;

    Ok(AuthSettings {
        token: TokenSettings::new(secret).with_ttl(ttl),
        bcrypt_cost,
    })
}

fn secret_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Vec<u8>, AuthConfigError> {
    let secret = env
        .string(SECRET_ENV)
        .filter(|value| !value.trim().is_empty())
        .ok_or(AuthConfigError::MissingEnv { name: SECRET_ENV })?
        .into_bytes();

    let length = secret.len();
    if length < SECRET_MIN_LEN {
        if mode.is_debug() {
            warn!(length, min_len = SECRET_MIN_LEN, "JWT_SECRET_KEY is short (dev only)");
        } else {
            return Err(AuthConfigError::SecretTooShort {
                length,
                min_len: SECRET_MIN_LEN,
            });
        }
    }
    Ok(secret)
}

fn ttl_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<TimeDelta, AuthConfigError> {
    let default_ttl = TimeDelta::seconds(DEFAULT_TOKEN_TTL_SECS);
    let Some(value) = env.string(TTL_ENV) else {
        return Ok(default_ttl);
    };

    match value.trim().parse::<i64>() {
        Ok(seconds) if (1..=TOKEN_TTL_MAX_SECS).contains(&seconds) => {
            TimeDelta::try_seconds(seconds).ok_or_else(|| AuthConfigError::InvalidEnv {
                name: TTL_ENV,
                value,
                expected: TTL_EXPECTED,
            })
        }
        _ if mode.is_debug() => {
            warn!(value = %value, "invalid JWT_TTL_SECS; using default");
            Ok(default_ttl)
        }
        _ => Err(AuthConfigError::InvalidEnv {
            name: TTL_ENV,
            value,
            expected: TTL_EXPECTED,
        }),
    }
}

fn bcrypt_cost_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<u32, AuthConfigError> {
    let Some(value) = env.string(BCRYPT_COST_ENV) else {
        return Ok(DEFAULT_BCRYPT_COST);
    };

    match value.trim().parse::<u32>() {
        Ok(cost) if (BCRYPT_COST_MIN..=BCRYPT_COST_MAX).contains(&cost) => Ok(cost),
        _ if mode.is_debug() => {
            warn!(value = %value, "invalid BCRYPT_COST; using default");
            Ok(DEFAULT_BCRYPT_COST)
        }
        _ => Err(AuthConfigError::InvalidEnv {
            name: BCRYPT_COST_ENV,
            value,
            expected: BCRYPT_COST_EXPECTED,
        }),
    }
}

#[cfg(test)]
mod tests;
