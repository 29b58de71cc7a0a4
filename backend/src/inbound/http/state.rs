//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the schema and the token port, and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::TokenService;
use crate::inbound::graphql::{BookshelfSchema, GraphqlPorts, build_schema};

/// Dependency bundle for the GraphQL endpoint.
#[derive(Clone)]
pub struct HttpState {
    pub schema: BookshelfSchema,
    pub tokens: Arc<dyn TokenService>,
}

impl HttpState {
    /// Build the schema over `ports` and keep `tokens` for the auth gate.
    pub fn new(ports: GraphqlPorts, tokens: Arc<dyn TokenService>) -> Self {
        Self {
            schema: build_schema(ports),
            tokens,
        }
    }
}
