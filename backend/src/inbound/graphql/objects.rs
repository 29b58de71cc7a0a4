//! GraphQL output objects and input types.
//!
//! Output objects wrap domain values so the password hash never has a path
//! into a response.

use async_graphql::{ID, InputObject, Object, SimpleObject};

use crate::domain::{Book, BookDetails, BookId, BookValidationError, User};

/// Account as seen by its owner.
pub struct UserObject(User);

impl From<User> for UserObject {
    fn from(user: User) -> Self {
        Self(user)
    }
}

#[Object(name = "User")]
impl UserObject {
    async fn id(&self) -> ID {
        ID::from(self.0.id().to_string())
    }

    async fn username(&self) -> &str {
        self.0.username().as_ref()
    }

    async fn email(&self) -> &str {
        self.0.email().as_ref()
    }

    /// Number of saved books.
    async fn book_count(&self) -> i32 {
        i32::try_from(self.0.book_count()).unwrap_or(i32::MAX)
    }

    /// Saved books in the order they were added.
    async fn saved_books(&self) -> Vec<BookObject> {
        self.0
            .saved_books()
            .iter()
            .cloned()
            .map(BookObject::from)
            .collect()
    }
}

/// Saved book entry.
pub struct BookObject(Book);

impl From<Book> for BookObject {
    fn from(book: Book) -> Self {
        Self(book)
    }
}

#[Object(name = "Book")]
impl BookObject {
    /// Identifier issued by the upstream book catalogue.
    async fn book_id(&self) -> ID {
        ID::from(self.0.id().to_string())
    }

    async fn authors(&self) -> Vec<String> {
        self.0.authors().to_vec()
    }

    async fn description(&self) -> &str {
        self.0.description()
    }

    async fn title(&self) -> &str {
        self.0.title()
    }

    async fn image(&self) -> &str {
        self.0.image()
    }

    async fn link(&self) -> &str {
        self.0.link()
    }
}

/// Result of `login` and `addUser`.
#[derive(SimpleObject)]
#[graphql(name = "Auth")]
pub struct AuthPayload {
    /// Bearer token for the `Authorization` header.
    pub token: String,
    pub user: UserObject,
}

/// Book to save; only `bookId` is required.
#[derive(Debug, InputObject)]
pub struct BookInput {
    pub book_id: ID,
    pub authors: Option<Vec<String>>,
    pub description: Option<String>,
    pub title: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
}

impl TryFrom<BookInput> for Book {
    type Error = BookValidationError;

    fn try_from(input: BookInput) -> Result<Self, Self::Error> {
        let id = BookId::new(input.book_id.as_str())?;
        Ok(Book::new(
            id,
            BookDetails {
                authors: input.authors.unwrap_or_default(),
                description: input.description.unwrap_or_default(),
                title: input.title.unwrap_or_default(),
                image: input.image.unwrap_or_default(),
                link: input.link.unwrap_or_default(),
            },
        ))
    }
}
