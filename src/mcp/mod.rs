//! Model Context Protocol (MCP) tool forwarder.
//!
//! Exposes habit operations as MCP tools for a model assistant. The
//! forwarder is an ordinary authenticated client of the REST API: every
//! tool call becomes an HTTP request carrying the configured bearer token,
//! and the API's JSON responses are passed through verbatim. No habit
//! logic lives here.

mod client;
pub mod server;
mod service;

#[cfg(test)]
mod client_test;

pub use client::{ForwardError, ForwardResult, HabitApiClient};
pub use server::McpServer;
pub use service::create_mcp_service;
