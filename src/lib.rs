//! habitd - a small habit-tracking backend.
//!
//! The crate is split into the storage layer (`db`), the periodic reset
//! task (`reset`), the REST API (`api`), and an MCP tool forwarder
//! (`mcp`) that lets a model assistant drive the same API.

pub mod api;
pub mod db;
pub mod mcp;
pub mod reset;
