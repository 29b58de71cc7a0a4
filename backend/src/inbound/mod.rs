//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! The actix-web transport lives under [`http`]; the GraphQL schema it
//! serves lives under [`graphql`].

pub mod graphql;
pub mod http;
