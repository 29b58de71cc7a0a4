//! Builders wiring the adapters behind the HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use bookshelf::domain::AccountService;
use bookshelf::domain::ports::TokenService;
use bookshelf::inbound::graphql::GraphqlPorts;
use bookshelf::inbound::http::auth_config::AuthSettings;
use bookshelf::inbound::http::state::HttpState;
use bookshelf::outbound::crypto::BcryptPasswordHasher;
use bookshelf::outbound::persistence::InMemoryUserRepository;
use bookshelf::outbound::token::JwtTokenService;

/// Build the HTTP state over the in-memory store, bcrypt and JWT adapters.
pub(crate) fn build_http_state(auth: &AuthSettings) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(&auth.token, clock));
    let hasher = Arc::new(BcryptPasswordHasher::new(auth.bcrypt_cost));
    let bcrypt_cost = hasher.cost();
    let service = Arc::new(AccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        hasher,
        Arc::clone(&tokens),
    ));
    info!(
        bcrypt_cost,
        token_ttl_secs = auth.token.ttl().num_seconds(),
        "account service ready"
    );

    HttpState::new(
        GraphqlPorts {
            accounts: service.clone(),
            saved_books: service.clone(),
            current_user: service,
        },
        tokens,
    )
}
