//! HTTP inbound adapter exposing the GraphQL endpoint and health endpoints.

pub mod auth;
pub mod auth_config;
pub mod graphql;
pub mod health;
pub mod state;
