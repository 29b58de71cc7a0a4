//! Driving port for changes to the caller's saved-book list.

use async_trait::async_trait;

use crate::domain::{Book, BookId, Error, IdentityContext, User};

/// Domain use-case port for saving and removing books.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SavedBooksCommand: Send + Sync {
    /// Save `book` for the authenticated caller; saving an id twice keeps
    /// one entry.
    async fn save_book(&self, context: &IdentityContext, book: Book) -> Result<User, Error>;

    /// Remove every entry with `book_id`; an unknown id leaves the list as is.
    async fn remove_book(&self, context: &IdentityContext, book_id: &BookId)
    -> Result<User, Error>;
}
