//! User account model.
//!
//! A [`User`] is the stored record: identity, unique username and email, the
//! bcrypt hash of the password and the saved-book list. Inbound strings are
//! validated by the newtype constructors before they reach a port.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;

use super::{Book, BookId, SavedBooks};

/// Maximum username length in characters.
pub const USERNAME_MAX: usize = 64;

/// Longest password bcrypt reads in full; later bytes would be ignored.
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Validation errors returned by the user newtype constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyUsername,
    UsernameTooLong { max: usize },
    EmptyEmail,
    InvalidEmail,
    EmptyPassword,
    PasswordTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "Must use a valid email address"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooLong { max } => write!(f, "password must be at most {max} bytes"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id.to_owned()))
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Unique login handle chosen at registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Trim and validate a username.
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address in `local@domain.tld` form.
///
/// ## Invariants
/// - Surrounding whitespace is trimmed and the address is lowercased, so
///   uniqueness and lookups are case-insensitive.
///
/// # Examples
/// ```
/// use bookshelf::domain::EmailAddress;
///
/// let email = EmailAddress::new("  Alice@Example.COM ").unwrap();
/// assert_eq!(email.as_ref(), "alice@example.com");
/// assert!(EmailAddress::new("alice@localhost").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate an email address.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_lowercase()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// One-way password hash produced by a
/// [`PasswordHasher`](crate::domain::ports::PasswordHasher).
///
/// The plaintext never lives in this type; `Debug` output is redacted so
/// hashes do not end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash string.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash, salt and cost included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Stored user account.
///
/// ## Invariants
/// - `password_hash` always holds a hash, never plaintext.
/// - `saved_books` contains at most one entry per [`BookId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
    password_hash: PasswordHash,
    saved_books: SavedBooks,
}

impl User {
    /// Build a new account with an empty saved-book list.
    pub fn new(
        id: UserId,
        username: Username,
        email: EmailAddress,
        password_hash: PasswordHash,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            saved_books: SavedBooks::default(),
        }
    }

    /// Stable user identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique username.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Unique, normalised email address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Saved books in insertion order.
    #[must_use]
    pub fn saved_books(&self) -> &SavedBooks {
        &self.saved_books
    }

    /// Number of saved books.
    #[must_use]
    pub fn book_count(&self) -> usize {
        self.saved_books.len()
    }

    /// Save `book` unless an entry with the same id exists; returns whether
    /// the list changed.
    pub fn save_book(&mut self, book: Book) -> bool {
        self.saved_books.insert_if_absent(book)
    }

    /// Remove every entry with `book_id`; returns how many were removed.
    pub fn remove_book(&mut self, book_id: &BookId) -> usize {
        self.saved_books.remove_matching(book_id)
    }
}
