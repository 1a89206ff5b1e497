//! HTTP adapter.
//!
//! Serves the proxy over HTTP for workflow tools:
//!
//! | Method    | Path              | Response                                   |
//! |-----------|-------------------|--------------------------------------------|
//! | `GET`     | `/`, `/health`    | `200 {status, service}`                    |
//! | `GET`     | `/graphql`        | `200` description of the proxy             |
//! | `POST`    | `/graphql`        | `200 {data}` or `4xx/5xx {errors}`         |
//! | `OPTIONS` | any               | `204` with CORS headers and an empty body  |
//!
//! Unknown paths answer `404`, known paths with an unsupported method `405`.

mod routes;

pub use routes::{configure_routes, cors_headers, AppState, MAX_BODY_BYTES, SERVICE_NAME};

use std::io::ErrorKind;

use actix_web::{web, App, HttpServer};
use thiserror::Error;
use tracing_actix_web::TracingLogger;

use crate::config::env::{self, Environment};
use crate::config::SharedSecret;
use crate::error::ConfigError;
use crate::proxy::{Proxy, ProxyError};

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Listener settings for the HTTP adapter.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Bearer secret required on `POST /graphql`, if any.
    pub shared_secret: Option<SharedSecret>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            shared_secret: None,
        }
    }
}

impl ServerConfig {
    /// Resolves the listener settings from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] if `PORT` is not a valid port number.
    pub fn resolve(source: &dyn Environment) -> Result<Self, ConfigError> {
        let host = source
            .get_non_empty(env::HOST)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match source.get_non_empty(env::PORT) {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value })?,
            None => DEFAULT_PORT,
        };

        let shared_secret = source
            .get_non_empty(env::PROXY_SHARED_SECRET)
            .map(SharedSecret::new)
            .transpose()?;

        Ok(Self {
            host,
            port,
            shared_secret,
        })
    }
}

/// Errors that stop the server process.
#[derive(Error)]
pub enum ServerError {
    #[error("Port {0} is already in use. Check if there is another process running at that port.")]
    PortInUse(u16),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Proxy(#[from] ProxyError),
}

// Delegates to Display so the process exit message stays readable
impl std::fmt::Debug for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

/// Binds the listener and serves requests until shutdown.
///
/// # Errors
///
/// Returns [`ServerError::PortInUse`] if the port is taken, or
/// [`ServerError::Io`] for any other bind or runtime failure.
pub async fn run(server_config: ServerConfig, proxy: Proxy) -> Result<(), ServerError> {
    let state = web::Data::new(AppState::new(proxy, server_config.shared_secret.clone()));

    tracing::info!(
        shop = %state.proxy().config().shop(),
        api_version = %state.proxy().config().api_version(),
        authenticated = server_config.shared_secret.is_some(),
        "Starting GraphQL proxy server"
    );

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors_headers())
            .wrap(TracingLogger::default())
            .configure(configure_routes(state.clone()))
    });

    let server = server
        .bind((server_config.host.as_str(), server_config.port))
        .map_err(|e| {
            if e.kind() == ErrorKind::AddrInUse {
                ServerError::PortInUse(server_config.port)
            } else {
                ServerError::Io(e)
            }
        })?;

    for addr in server.addrs() {
        tracing::info!("Listening on http://{addr}/graphql");
    }

    Ok(server.run().await?)
}
