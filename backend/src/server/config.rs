//! HTTP server configuration object and helpers.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use bookshelf::inbound::http::auth_config::{AuthSettings, BuildMode};
use mockable::Env;
use tracing::warn;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

const PORT_ENV: &str = "PORT";
const BIND_HOST_ENV: &str = "BIND_HOST";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_BIND_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const PORT_EXPECTED: &str = "a TCP port number";
const BIND_HOST_EXPECTED: &str = "an IPv4 or IPv6 address";

/// Errors raised while validating the listen address.
#[derive(thiserror::Error, Debug)]
pub enum ListenConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Resolve the socket address from `BIND_HOST` and `PORT`.
pub fn bind_addr_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<SocketAddr, ListenConfigError> {
    let host = match env.string(BIND_HOST_ENV) {
        Some(value) => value
            .trim()
            .parse::<IpAddr>()
            .map_err(|_| ListenConfigError::InvalidEnv {
                name: BIND_HOST_ENV,
                value,
                expected: BIND_HOST_EXPECTED,
            })?,
        None => DEFAULT_BIND_HOST,
    };
    let port = match env.string(PORT_ENV) {
        Some(value) => match value.trim().parse::<u16>() {
            Ok(port) => port,
            Err(_) if mode == BuildMode::Debug => {
                warn!(value = %value, "invalid PORT; using default");
                DEFAULT_PORT
            }
            Err(_) => {
                return Err(ListenConfigError::InvalidEnv {
                    name: PORT_ENV,
                    value,
                    expected: PORT_EXPECTED,
                });
            }
        },
        None => DEFAULT_PORT,
    };
    Ok(SocketAddr::new(host, port))
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) auth: AuthSettings,
    pub(crate) bind_addr: SocketAddr,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration from validated settings.
    #[must_use]
    pub fn new(auth: AuthSettings, bind_addr: SocketAddr) -> Self {
        Self {
            auth,
            bind_addr,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
