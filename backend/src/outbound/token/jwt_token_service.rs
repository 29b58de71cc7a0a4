//! HS256 JSON Web Token implementation of [`TokenService`].
//!
//! Claims carry the identity (`sub`, `username`, `email`) plus `iat` and
//! `exp`. Expiry is checked against the injected [`Clock`] rather than the
//! library's wall-clock check, so tests can move time explicitly.

use std::fmt;
use std::sync::Arc;

use chrono::TimeDelta;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{EmailAddress, Identity, UserId, Username};

/// Token lifetime in seconds used when none is configured.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Signing secret and token lifetime.
///
/// # Examples
/// ```
/// use bookshelf::outbound::token::{DEFAULT_TOKEN_TTL_SECS, TokenSettings};
///
/// let settings = TokenSettings::new(b"0123456789abcdef0123456789abcdef".to_vec());
/// assert_eq!(settings.ttl().num_seconds(), DEFAULT_TOKEN_TTL_SECS);
/// assert!(!format!("{settings:?}").contains("0123"));
/// ```
#[derive(Clone)]
pub struct TokenSettings {
    secret: Zeroizing<Vec<u8>>,
    ttl: TimeDelta,
}

impl TokenSettings {
    /// Settings with the default one-hour lifetime.
    #[must_use]
    pub fn new(secret: Vec<u8>) -> Self {
        Self {
            secret: Zeroizing::new(secret),
            ttl: TimeDelta::seconds(DEFAULT_TOKEN_TTL_SECS),
        }
    }

    /// Override the token lifetime.
    #[must_use]
    pub fn with_ttl(mut self, ttl: TimeDelta) -> Self {
        self.ttl = ttl;
        self
    }

    /// Token lifetime.
    #[must_use]
    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Length of the signing secret in bytes.
    #[must_use]
    pub fn secret_len(&self) -> usize {
        self.secret.len()
    }
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    username: String,
    email: String,
    iat: i64,
    exp: i64,
}

impl Claims {
    fn into_identity(self) -> Result<Identity, TokenError> {
        let malformed = |error: crate::domain::UserValidationError| {
            TokenError::malformed(format!("invalid identity claim: {error}"))
        };
        Ok(Identity {
            id: UserId::new(&self.sub).map_err(malformed)?,
            username: Username::new(&self.username).map_err(malformed)?,
            email: EmailAddress::new(&self.email).map_err(malformed)?,
        })
    }
}

/// Stateless token service signing with a shared HMAC secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Build a service from explicit settings and a time source.
    pub fn new(settings: &TokenSettings, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(&settings.secret),
            decoding: DecodingKey::from_secret(&settings.secret),
            validation,
            ttl: settings.ttl,
            clock,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        let now = self.clock.utc();
        let expires = now.checked_add_signed(self.ttl).ok_or_else(|| {
            TokenError::signing(format!("expiry out of range for ttl {}", self.ttl))
        })?;
        let claims = Claims {
            sub: identity.id.to_string(),
            username: identity.username.to_string(),
            email: identity.email.to_string(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|error| TokenError::signing(error.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|error| match error.kind() {
                ErrorKind::InvalidSignature => TokenError::invalid_signature(),
                _ => TokenError::malformed(error.to_string()),
            })?
            .claims;
        if claims.exp <= self.clock.utc().timestamp() {
            return Err(TokenError::expired());
        }
        claims.into_identity()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::test_support::MutableClock;

    const SECRET: &[u8] = b"test-secret-test-secret-test-sec";

    fn identity() -> Identity {
        Identity {
            id: UserId::random(),
            username: Username::new("alice").expect("username"),
            email: EmailAddress::new("a@x.com").expect("email"),
        }
    }

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        let start = Utc
            .with_ymd_and_hms(2026, 1, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        Arc::new(MutableClock::new(start))
    }

    fn service_with(secret: &[u8], clock: &Arc<MutableClock>) -> JwtTokenService {
        let clock: Arc<dyn Clock> = clock.clone();
        JwtTokenService::new(&TokenSettings::new(secret.to_vec()), clock)
    }

    #[rstest]
    fn verify_returns_the_issued_identity(clock: Arc<MutableClock>) {
        let service = service_with(SECRET, &clock);
        let expected = identity();

        let token = service.issue(&expected).expect("issue");
        clock.advance_seconds(59 * 60);

        assert_eq!(service.verify(&token).expect("verify"), expected);
    }

    #[rstest]
    #[case::at_expiry(60 * 60)]
    #[case::past_expiry(60 * 60 + 1)]
    #[case::much_later(24 * 60 * 60)]
    fn tokens_expire_after_the_ttl(clock: Arc<MutableClock>, #[case] elapsed: i64) {
        let service = service_with(SECRET, &clock);
        let token = service.issue(&identity()).expect("issue");

        clock.advance_seconds(elapsed);

        assert_eq!(service.verify(&token), Err(TokenError::expired()));
    }

    #[rstest]
    fn custom_ttl_is_honoured(clock: Arc<MutableClock>) {
        let settings = TokenSettings::new(SECRET.to_vec()).with_ttl(TimeDelta::minutes(5));
        let dyn_clock: Arc<dyn Clock> = clock.clone();
        let service = JwtTokenService::new(&settings, dyn_clock);
        let token = service.issue(&identity()).expect("issue");

        clock.advance_seconds(5 * 60);

        assert_eq!(service.verify(&token), Err(TokenError::expired()));
    }

    #[rstest]
    fn unrepresentable_expiry_is_a_signing_error(clock: Arc<MutableClock>) {
        let settings = TokenSettings::new(SECRET.to_vec())
            .with_ttl(TimeDelta::try_seconds(9_000_000_000_000).expect("in TimeDelta range"));
        let dyn_clock: Arc<dyn Clock> = clock.clone();
        let service = JwtTokenService::new(&settings, dyn_clock);

        let error = service.issue(&identity()).expect_err("expiry past chrono's range");
        assert_eq!(error.kind(), "signing");
    }

    #[rstest]
    fn tokens_from_another_secret_are_rejected(clock: Arc<MutableClock>) {
        let issuer = service_with(b"another-secret-another-secret-an", &clock);
        let verifier = service_with(SECRET, &clock);
        let token = issuer.issue(&identity()).expect("issue");

        assert_eq!(verifier.verify(&token), Err(TokenError::invalid_signature()));
    }

    #[rstest]
    fn tampered_signatures_are_rejected(clock: Arc<MutableClock>) {
        let service = service_with(SECRET, &clock);
        let token = service.issue(&identity()).expect("issue");
        let (unsigned, signature) = token.rsplit_once('.').expect("three segments");
        let flipped = if signature.starts_with('A') { 'B' } else { 'A' };
        let tampered = format!("{unsigned}.{flipped}{}", &signature[1..]);

        assert_eq!(service.verify(&tampered), Err(TokenError::invalid_signature()));
    }

    #[rstest]
    #[case::garbage("not-a-token")]
    #[case::empty("")]
    #[case::two_segments("abc.def")]
    fn garbage_is_malformed(clock: Arc<MutableClock>, #[case] token: &str) {
        let service = service_with(SECRET, &clock);

        let error = service.verify(token).expect_err("garbage must fail");
        assert_eq!(error.kind(), "malformed");
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let settings = TokenSettings::new(SECRET.to_vec());

        let rendered = format!("{settings:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("test-secret"));
    }
}
