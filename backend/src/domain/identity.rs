//! Authenticated identity carried by tokens and the per-request context.

use super::{EmailAddress, Error, User, UserId, Username};

/// Client-visible message for every authentication failure.
///
/// Missing, malformed, forged and expired tokens all collapse to this one
/// message; the specific cause is only logged.
pub const UNAUTHENTICATED_MESSAGE: &str = "You need to be logged in!";

/// Who the caller is, as asserted by a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().clone(),
            username: user.username().clone(),
            email: user.email().clone(),
        }
    }
}

/// Per-request identity, empty when no valid token was presented.
///
/// Built once per request by the auth gate and handed to each operation,
/// which decides for itself whether an identity is required.
///
/// # Examples
/// ```
/// use bookshelf::domain::{ErrorCode, IdentityContext};
///
/// let context = IdentityContext::anonymous();
/// let err = context.require().unwrap_err();
/// assert_eq!(err.code(), ErrorCode::Unauthenticated);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityContext(Option<Identity>);

impl IdentityContext {
    /// Context for a request without a usable token.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self(None)
    }

    /// Context for a request carrying a verified token.
    #[must_use]
    pub const fn authenticated(identity: Identity) -> Self {
        Self(Some(identity))
    }

    /// Identity, when present.
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }

    /// Whether a verified identity is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }

    /// Return the identity or an [`ErrorCode::Unauthenticated`](super::ErrorCode) error.
    pub fn require(&self) -> Result<&Identity, Error> {
        self.0
            .as_ref()
            .ok_or_else(|| Error::unauthenticated(UNAUTHENTICATED_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{ErrorCode, PasswordHash};

    fn identity() -> Identity {
        let user = User::new(
            UserId::random(),
            Username::new("alice").expect("username"),
            EmailAddress::new("a@x.com").expect("email"),
            PasswordHash::new("$2b$10$fixture"),
        );
        Identity::from(&user)
    }

    #[test]
    fn anonymous_context_requires_login() {
        let context = IdentityContext::default();
        assert!(!context.is_authenticated());
        let error = context.require().expect_err("anonymous must fail");
        assert_eq!(error.code(), ErrorCode::Unauthenticated);
        assert_eq!(error.message(), UNAUTHENTICATED_MESSAGE);
    }

    #[test]
    fn authenticated_context_yields_identity() {
        let expected = identity();
        let context = IdentityContext::authenticated(expected.clone());
        assert_eq!(context.require().expect("identity"), &expected);
        assert_eq!(context.identity(), Some(&expected));
    }
}
