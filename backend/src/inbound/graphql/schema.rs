//! Query and mutation roots.

use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, ID, Object, Schema};
use zeroize::Zeroizing;

use crate::domain::ports::{AccountCommand, CurrentUserQuery, SavedBooksCommand};
use crate::domain::{Book, BookId, Error, IdentityContext, LoginCredentials, Registration};

use super::error::{book_validation_error, into_graphql_error, user_validation_error};
use super::objects::{AuthPayload, BookInput, UserObject};

/// Executable schema type served at `/graphql`.
pub type BookshelfSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Driving ports the resolvers call, stored as schema data.
#[derive(Clone)]
pub struct GraphqlPorts {
    pub accounts: Arc<dyn AccountCommand>,
    pub saved_books: Arc<dyn SavedBooksCommand>,
    pub current_user: Arc<dyn CurrentUserQuery>,
}

/// Build the executable schema over the given ports.
pub fn build_schema(ports: GraphqlPorts) -> BookshelfSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(ports)
        .finish()
}

/// Render the schema definition language document.
///
/// # Examples
/// ```
/// let sdl = bookshelf::inbound::graphql::sdl();
/// assert!(sdl.contains("bookCount: Int!"));
/// ```
#[must_use]
pub fn sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

static ANONYMOUS: IdentityContext = IdentityContext::anonymous();

fn identity<'a>(ctx: &Context<'a>) -> &'a IdentityContext {
    ctx.data_opt::<IdentityContext>().unwrap_or(&ANONYMOUS)
}

fn ports<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a GraphqlPorts> {
    ctx.data::<GraphqlPorts>()
        .map_err(|_| into_graphql_error(Error::internal("GraphQL ports are not configured")))
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The authenticated caller's account.
    async fn me(&self, ctx: &Context<'_>) -> async_graphql::Result<UserObject> {
        let user = ports(ctx)?
            .current_user
            .me(identity(ctx))
            .await
            .map_err(into_graphql_error)?;
        Ok(user.into())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Exchange email and password for a token.
    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> async_graphql::Result<AuthPayload> {
        let password = Zeroizing::new(password);
        let credentials = LoginCredentials::try_from_parts(&email, &password)
            .map_err(|err| into_graphql_error(Error::invalid_request(err.to_string())))?;
        let session = ports(ctx)?
            .accounts
            .login(&credentials)
            .await
            .map_err(into_graphql_error)?;
        Ok(AuthPayload {
            token: session.token,
            user: session.user.into(),
        })
    }

    /// Register an account and return a token for it.
    async fn add_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        email: String,
        password: String,
    ) -> async_graphql::Result<AuthPayload> {
        let password = Zeroizing::new(password);
        let registration = Registration::try_from_parts(&username, &email, &password)
            .map_err(|err| user_validation_error(&err))?;
        let session = ports(ctx)?
            .accounts
            .register(&registration)
            .await
            .map_err(into_graphql_error)?;
        Ok(AuthPayload {
            token: session.token,
            user: session.user.into(),
        })
    }

    /// Add a book to the caller's list; saving an id twice keeps one entry.
    async fn save_book(
        &self,
        ctx: &Context<'_>,
        input: BookInput,
    ) -> async_graphql::Result<UserObject> {
        let caller = identity(ctx);
        caller.require().map_err(into_graphql_error)?;
        let book = Book::try_from(input).map_err(|err| book_validation_error(&err))?;
        let user = ports(ctx)?
            .saved_books
            .save_book(caller, book)
            .await
            .map_err(into_graphql_error)?;
        Ok(user.into())
    }

    /// Remove every entry with `bookId` from the caller's list.
    async fn remove_book(
        &self,
        ctx: &Context<'_>,
        book_id: ID,
    ) -> async_graphql::Result<UserObject> {
        let caller = identity(ctx);
        caller.require().map_err(into_graphql_error)?;
        let book_id = BookId::new(book_id.as_str()).map_err(|err| book_validation_error(&err))?;
        let user = ports(ctx)?
            .saved_books
            .remove_book(caller, &book_id)
            .await
            .map_err(into_graphql_error)?;
        Ok(user.into())
    }
}
