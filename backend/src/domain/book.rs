//! Saved books embedded in a user account.
//!
//! Books are never stored on their own. A user's list behaves as a set keyed
//! by the external [`BookId`]: saving an id that is already present is a
//! no-op and removing an id drops every matching entry.

use std::fmt;

/// Validation errors for book payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    /// The external identifier was blank once trimmed.
    EmptyBookId,
}

impl fmt::Display for BookValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBookId => write!(f, "bookId must not be empty"),
        }
    }
}

impl std::error::Error for BookValidationError {}

/// External book identifier, as issued by the upstream catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookId(String);

impl BookId {
    /// Trim and validate an identifier.
    pub fn new(id: impl AsRef<str>) -> Result<Self, BookValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(BookValidationError::EmptyBookId);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for BookId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Descriptive fields of a saved book. Missing values are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDetails {
    pub authors: Vec<String>,
    pub description: String,
    pub title: String,
    pub image: String,
    pub link: String,
}

/// A book saved to a user's list. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id: BookId,
    details: BookDetails,
}

impl Book {
    /// Build a book from its identifier and descriptive fields.
    #[must_use]
    pub fn new(id: BookId, details: BookDetails) -> Self {
        Self { id, details }
    }

    /// External identifier.
    #[must_use]
    pub fn id(&self) -> &BookId {
        &self.id
    }

    /// Author names in catalogue order.
    #[must_use]
    pub fn authors(&self) -> &[String] {
        &self.details.authors
    }

    /// Catalogue description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.details.description
    }

    /// Title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.details.title
    }

    /// Cover image URL.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.details.image
    }

    /// Link to the catalogue entry.
    #[must_use]
    pub fn link(&self) -> &str {
        &self.details.link
    }
}

/// Ordered saved-book list with set semantics on [`BookId`].
///
/// # Examples
/// ```
/// use bookshelf::domain::{Book, BookDetails, BookId, SavedBooks};
///
/// let id = BookId::new("b1").unwrap();
/// let mut books = SavedBooks::default();
/// assert!(books.insert_if_absent(Book::new(id.clone(), BookDetails::default())));
/// assert!(!books.insert_if_absent(Book::new(id.clone(), BookDetails::default())));
/// assert_eq!(books.len(), 1);
/// assert_eq!(books.remove_matching(&id), 1);
/// assert!(books.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedBooks(Vec<Book>);

impl SavedBooks {
    /// Append `book` unless an entry with the same id exists.
    ///
    /// Returns `true` when the list changed.
    pub fn insert_if_absent(&mut self, book: Book) -> bool {
        if self.contains(book.id()) {
            return false;
        }
        self.0.push(book);
        true
    }

    /// Remove all entries whose id equals `book_id`.
    ///
    /// Returns the number of entries removed; zero is not an error.
    pub fn remove_matching(&mut self, book_id: &BookId) -> usize {
        let before = self.0.len();
        self.0.retain(|book| book.id() != book_id);
        before - self.0.len()
    }

    /// Whether an entry with `book_id` is present.
    #[must_use]
    pub fn contains(&self, book_id: &BookId) -> bool {
        self.0.iter().any(|book| book.id() == book_id)
    }

    /// Number of saved books.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Book> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a SavedBooks {
    type Item = &'a Book;
    type IntoIter = std::slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for saved-book set semantics.
    use super::*;
    use rstest::rstest;

    fn titled(id: &str, title: &str) -> Book {
        Book::new(
            BookId::new(id).expect("book id"),
            BookDetails {
                title: title.to_owned(),
                ..BookDetails::default()
            },
        )
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_book_id_is_rejected(#[case] raw: &str) {
        assert_eq!(
            BookId::new(raw).expect_err("blank id"),
            BookValidationError::EmptyBookId
        );
    }

    #[rstest]
    fn duplicate_insert_keeps_first_entry() {
        let mut books = SavedBooks::default();
        assert!(books.insert_if_absent(titled("b1", "first")));
        assert!(!books.insert_if_absent(titled("b1", "second")));

        let titles: Vec<&str> = books.iter().map(Book::title).collect();
        assert_eq!(titles, vec!["first"]);
    }

    #[rstest]
    fn insertion_order_is_preserved() {
        let mut books = SavedBooks::default();
        books.insert_if_absent(titled("b2", "two"));
        books.insert_if_absent(titled("b1", "one"));
        books.insert_if_absent(titled("b3", "three"));

        let ids: Vec<&str> = books.iter().map(|book| book.id().as_ref()).collect();
        assert_eq!(ids, vec!["b2", "b1", "b3"]);
    }

    #[rstest]
    fn remove_matching_leaves_other_entries() {
        let mut books = SavedBooks::default();
        books.insert_if_absent(titled("b1", "one"));
        books.insert_if_absent(titled("b2", "two"));

        let removed = books.remove_matching(&BookId::new("b1").expect("book id"));
        assert_eq!(removed, 1);
        assert_eq!(books.len(), 1);
        assert!(books.contains(&BookId::new("b2").expect("book id")));
    }

    #[rstest]
    fn remove_missing_id_changes_nothing() {
        let mut books = SavedBooks::default();
        books.insert_if_absent(titled("b1", "one"));

        let before = books.clone();
        assert_eq!(books.remove_matching(&BookId::new("zz").expect("book id")), 0);
        assert_eq!(books, before);
    }
}
