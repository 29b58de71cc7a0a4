//! Identity token adapters.

mod jwt_token_service;

pub use jwt_token_service::{DEFAULT_TOKEN_TTL_SECS, JwtTokenService, TokenSettings};
