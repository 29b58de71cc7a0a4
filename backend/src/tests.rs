//! Tests for the application bootstrap and readiness signalling.

use super::server::{ServerConfig, create_server};
use actix_web::web;
use bookshelf::inbound::http::auth_config::AuthSettings;
use bookshelf::inbound::http::health::HealthState;
use bookshelf::outbound::token::TokenSettings;
use bookshelf::test_support::{TEST_BCRYPT_COST, TEST_TOKEN_SECRET};
use rstest::{fixture, rstest};
use std::net::SocketAddr;

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn config() -> ServerConfig {
    let auth = AuthSettings {
        token: TokenSettings::new(TEST_TOKEN_SECRET.to_vec()),
        bcrypt_cost: TEST_BCRYPT_COST,
    };
    ServerConfig::new(auth, SocketAddr::from(([127, 0, 0, 1], 0)))
}

#[rstest]
fn config_reports_its_bind_address(config: ServerConfig) {
    assert_eq!(config.bind_addr().port(), 0);
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>, config: ServerConfig) {
    assert!(!health_state.is_ready(), "state should start unready");

    let _server = create_server(health_state.clone(), config).expect("server should build");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}
