//! Habitd MCP forwarder binary.
//!
//! Serves MCP (streamable HTTP) at /mcp and forwards every tool call to
//! the REST API with the configured bearer token. Runs as its own
//! process, next to or away from the API server.

use std::net::IpAddr;

use clap::Parser;
use habitd::mcp::{HabitApiClient, create_mcp_service};
use miette::Diagnostic;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Server error: {0}")]
    #[diagnostic(code(habitd::binary::mcp))]
    Io(#[from] std::io::Error),

    #[error("Missing bearer token")]
    #[diagnostic(
        code(habitd::binary::config),
        help("Pass --bearer or set the HABITD_API_BEARER environment variable.")
    )]
    MissingBearer,
}

#[derive(Parser)]
#[command(name = "habitd-mcp")]
#[command(author, version, about = "Habitd MCP tool forwarder", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Base URL of the habitd API server (falls back to HABITD_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Bearer token used for every forwarded request (falls back to HABITD_API_BEARER)
    #[arg(long)]
    bearer: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    habitd::api::init_tracing();

    let cli = Cli::parse();

    let bearer = cli
        .bearer
        .or_else(|| std::env::var("HABITD_API_BEARER").ok())
        .ok_or(BinaryError::MissingBearer)?;

    let client = HabitApiClient::new(cli.api_url, bearer);
    info!("Forwarding tool calls to {}", client.base_url());

    let ct = CancellationToken::new();
    let service = create_mcp_service(client, ct.clone());

    let app = axum::Router::new()
        .nest_service("/mcp", service)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("MCP server listening on http://{}/mcp", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            ct.cancel();
        })
        .await?;

    Ok(())
}
