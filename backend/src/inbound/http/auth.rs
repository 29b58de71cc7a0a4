//! Auth gate: turns the `Authorization` header into an [`IdentityContext`].
//!
//! The gate never rejects a request. A missing, malformed or unverifiable
//! token yields an anonymous context and each operation decides whether it
//! needs an identity.

use tracing::{debug, info};

use crate::domain::IdentityContext;
use crate::domain::ports::TokenService;

const BEARER_SCHEME: &str = "bearer";

fn bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() || !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    Some(token)
}

/// Derive the request identity from an optional `Authorization` header value.
///
/// # Examples
/// ```
/// use bookshelf::domain::IdentityContext;
/// use bookshelf::domain::ports::{TokenError, TokenService};
/// use bookshelf::domain::Identity;
/// use bookshelf::inbound::http::auth::derive_context;
///
/// struct RejectAll;
///
/// impl TokenService for RejectAll {
///     fn issue(&self, _: &Identity) -> Result<String, TokenError> {
///         Err(TokenError::signing("disabled"))
///     }
///     fn verify(&self, _: &str) -> Result<Identity, TokenError> {
///         Err(TokenError::expired())
///     }
/// }
///
/// assert_eq!(derive_context(None, &RejectAll), IdentityContext::anonymous());
/// assert_eq!(
///     derive_context(Some("Bearer abc"), &RejectAll),
///     IdentityContext::anonymous()
/// );
/// ```
pub fn derive_context(header: Option<&str>, tokens: &dyn TokenService) -> IdentityContext {
    let Some(header) = header else {
        return IdentityContext::anonymous();
    };
    let Some(token) = bearer_token(header) else {
        debug!("authorization header is not a bearer token");
        return IdentityContext::anonymous();
    };
    match tokens.verify(token) {
        Ok(identity) => IdentityContext::authenticated(identity),
        Err(error) => {
            info!(cause = error.kind(), %error, "token rejected");
            IdentityContext::anonymous()
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockTokenService, TokenError};
    use crate::domain::{EmailAddress, Identity, UserId, Username};
    use rstest::rstest;

    fn alice() -> Identity {
        Identity {
            id: UserId::random(),
            username: Username::new("alice").expect("username"),
            email: EmailAddress::new("a@x.com").expect("email"),
        }
    }

    fn untouched() -> MockTokenService {
        let mut tokens = MockTokenService::new();
        tokens.expect_verify().times(0);
        tokens
    }

    #[rstest]
    #[case::absent(None)]
    #[case::empty(Some(""))]
    #[case::basic(Some("Basic YWxpY2U6cHcx"))]
    #[case::scheme_only(Some("Bearer"))]
    #[case::extra_segment(Some("Bearer abc def"))]
    #[case::no_scheme(Some("abc"))]
    fn non_bearer_headers_give_anonymous_context(#[case] header: Option<&str>) {
        let tokens = untouched();

        assert_eq!(
            derive_context(header, &tokens),
            IdentityContext::anonymous()
        );
    }

    #[rstest]
    #[case("Bearer good")]
    #[case("bearer good")]
    #[case("BEARER   good ")]
    fn valid_tokens_give_identity(#[case] header: &str) {
        let expected = alice();
        let returned = expected.clone();
        let mut tokens = MockTokenService::new();
        tokens
            .expect_verify()
            .withf(|token| token == "good")
            .times(1)
            .return_once(move |_| Ok(returned));

        assert_eq!(
            derive_context(Some(header), &tokens),
            IdentityContext::authenticated(expected)
        );
    }

    #[rstest]
    #[case(TokenError::expired())]
    #[case(TokenError::invalid_signature())]
    #[case(TokenError::malformed("bad base64"))]
    fn rejected_tokens_give_anonymous_context(#[case] failure: TokenError) {
        let mut tokens = MockTokenService::new();
        tokens
            .expect_verify()
            .times(1)
            .return_once(move |_| Err(failure));

        assert_eq!(
            derive_context(Some("Bearer stale"), &tokens),
            IdentityContext::anonymous()
        );
    }
}
