//! GraphQL inbound adapter.
//!
//! Resolvers translate arguments into domain values, call the driving ports
//! and map domain errors onto GraphQL error extensions. The per-request
//! [`IdentityContext`](crate::domain::IdentityContext) arrives as request data
//! attached by the HTTP handler.

pub mod error;
pub mod objects;
pub mod schema;

pub use error::into_graphql_error;
pub use objects::{AuthPayload, BookInput, BookObject, UserObject};
pub use schema::{BookshelfSchema, GraphqlPorts, MutationRoot, QueryRoot, build_schema, sdl};
