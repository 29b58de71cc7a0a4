//! Authentication inputs: login credentials and registration details.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a resolver talks to a port.

use std::fmt;

use zeroize::Zeroizing;

use super::{EmailAddress, PASSWORD_MAX_BYTES, UserValidationError, Username};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Login credentials as supplied by the caller.
///
/// ## Invariants
/// - `email` is trimmed and non-empty. Its format is not checked here: a
///   malformed address is simply an unknown account, so login reports it
///   the same way as a wrong password.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use bookshelf::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" a@x.com ", "pw1").unwrap();
/// assert_eq!(creds.email(), "a@x.com");
/// assert_eq!(creds.password(), "pw1");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string used for the account lookup.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated registration request.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration fields.
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, UserValidationError> {
        let username = Username::new(username)?;
        let email = EmailAddress::new(email)?;
        if password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        if password.len() > PASSWORD_MAX_BYTES {
            return Err(UserValidationError::PasswordTooLong {
                max: PASSWORD_MAX_BYTES,
            });
        }
        Ok(Self {
            username,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested username.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Requested email address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password, zeroised on drop.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
