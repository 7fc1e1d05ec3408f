//! REST API server.

pub mod auth;
mod routes;
mod state;
pub mod v1;


use std::net::IpAddr;

use miette::Diagnostic;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::HabitStore;
use auth::Authenticator;
pub use state::AppState;

/// API server configuration.
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".parse().expect("static address"),
            port: 3000,
        }
    }
}

/// API server errors.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(code(habitd::api::bind))]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(habitd::api::serve))]
    Serve(#[from] std::io::Error),
}

/// Initialize tracing subscriber with env filter.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "habitd=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the API server with the given configuration, store and
/// authenticator. The store handle is opened by the caller and lives for
/// the duration of the server.
pub async fn run<S, A>(config: Config, store: S, authenticator: A) -> Result<(), ApiError>
where
    S: HabitStore + 'static,
    A: Authenticator + 'static,
{
    init_tracing();

    let state = AppState::new(store, authenticator);
    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ApiError::Bind {
            addr: addr.clone(),
            source: e,
        })?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
