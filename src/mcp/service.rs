//! MCP Streamable HTTP service creation.
//!
//! Produces a `StreamableHttpService` that can be nested into an Axum
//! router; a fresh `McpServer` is created per MCP session over the shared
//! API client.

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use super::client::HabitApiClient;
use super::server::McpServer;

/// Create the MCP Streamable HTTP service.
pub fn create_mcp_service(
    client: HabitApiClient,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<McpServer> {
    let client = Arc::new(client);

    // Service factory: creates a new McpServer instance per session.
    // Returns io::Error to match rmcp's expected signature.
    let service_factory = move || -> Result<McpServer, std::io::Error> {
        Ok(McpServer::new(Arc::clone(&client)))
    };

    let config = StreamableHttpServerConfig {
        sse_keep_alive: None,
        sse_retry: None,
        stateful_mode: true,
        cancellation_token,
    };

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}
