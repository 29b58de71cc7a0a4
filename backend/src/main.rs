//! Backend entry-point: validates configuration, then serves GraphQL over actix-web.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bookshelf::inbound::http::auth_config::{BuildMode, auth_settings_from_env};
use bookshelf::inbound::http::health::HealthState;
use server::{ServerConfig, bind_addr_from_env, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let env = DefaultEnv::new();
    let mode = BuildMode::from_debug_assertions();
    let auth = auth_settings_from_env(&env, mode).map_err(|e| {
        error!(error = %e, "invalid credential configuration");
        std::io::Error::other(e)
    })?;
    let bind_addr = bind_addr_from_env(&env, mode).map_err(|e| {
        error!(error = %e, "invalid listen configuration");
        std::io::Error::other(e)
    })?;

    let config = ServerConfig::new(auth, bind_addr);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::prometheus_metrics());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let outcome = server.await;
    health_state.mark_draining();
    outcome
}

#[cfg(test)]
mod tests;
