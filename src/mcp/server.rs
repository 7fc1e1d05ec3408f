//! MCP server exposing habit tools.
//!
//! Each tool forwards to the REST API through [`HabitApiClient`] and
//! returns the API's JSON as text content. The assistant gets exactly the
//! view an ordinary authenticated client would.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    schemars,
    schemars::JsonSchema,
    tool, tool_handler, tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::client::{ForwardError, HabitApiClient};

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListHabitsParams {
    #[schemars(description = "Number of habits to skip (default: 0)")]
    pub skip: Option<i64>,
    #[schemars(description = "Maximum number of habits to return (default: 100)")]
    pub limit: Option<i64>,
    #[schemars(description = "Include inactive (hidden) habits in the listing")]
    pub include_inactive: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetHabitParams {
    #[schemars(description = "Habit ID")]
    pub habit_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateHabitParams {
    #[schemars(description = "Habit title (what the user wants to do regularly)")]
    pub title: String,
    #[schemars(description = "Optional free-form description")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateHabitParams {
    #[schemars(description = "Habit ID to update")]
    pub habit_id: String,
    #[schemars(description = "New title")]
    pub title: String,
    #[schemars(description = "New description (omit to clear)")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateStatusParams {
    #[schemars(description = "Habit ID to update")]
    pub habit_id: String,
    #[schemars(
        description = "Target status: 'pending', 'in_progress' or 'done'. Any status may move to any other."
    )]
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ToggleActiveParams {
    #[schemars(description = "Habit ID to hide or unhide")]
    pub habit_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteHabitParams {
    #[schemars(description = "Habit ID to permanently delete")]
    pub habit_id: String,
}

// =============================================================================
// Server
// =============================================================================

/// MCP server forwarding habit tools to the REST API.
#[derive(Clone)]
pub struct McpServer {
    client: Arc<HabitApiClient>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl McpServer {
    pub fn new(client: Arc<HabitApiClient>) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    /// Get the tool router for this server
    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    #[tool(description = "Habitd API health check (/health).")]
    pub async fn health(&self) -> Result<CallToolResult, McpError> {
        let value = self.client.health().await.map_err(map_forward_error)?;
        json_result(&value)
    }

    #[tool(
        description = "List the authenticated user's habits in creation order. Inactive habits are hidden unless include_inactive is set."
    )]
    pub async fn list_habits(
        &self,
        params: Parameters<ListHabitsParams>,
    ) -> Result<CallToolResult, McpError> {
        let value = self
            .client
            .list_habits(
                params.0.skip,
                params.0.limit,
                params.0.include_inactive.unwrap_or(false),
            )
            .await
            .map_err(map_forward_error)?;
        json_result(&value)
    }

    #[tool(description = "Get a habit by ID with full details.")]
    pub async fn get_habit(
        &self,
        params: Parameters<GetHabitParams>,
    ) -> Result<CallToolResult, McpError> {
        let value = self
            .client
            .get_habit(&params.0.habit_id)
            .await
            .map_err(map_forward_error)?;
        json_result(&value)
    }

    #[tool(description = "Create a new habit. New habits start 'pending' and active.")]
    pub async fn create_habit(
        &self,
        params: Parameters<CreateHabitParams>,
    ) -> Result<CallToolResult, McpError> {
        let value = self
            .client
            .create_habit(&params.0.title, params.0.description.as_deref())
            .await
            .map_err(map_forward_error)?;
        json_result(&value)
    }

    #[tool(description = "Replace a habit's title and description.")]
    pub async fn update_habit(
        &self,
        params: Parameters<UpdateHabitParams>,
    ) -> Result<CallToolResult, McpError> {
        let value = self
            .client
            .update_habit(
                &params.0.habit_id,
                &params.0.title,
                params.0.description.as_deref(),
            )
            .await
            .map_err(map_forward_error)?;
        json_result(&value)
    }

    #[tool(
        description = "Change a habit's status to 'pending', 'in_progress' or 'done'. Use this to mark progress or correct a mistaken entry."
    )]
    pub async fn update_status(
        &self,
        params: Parameters<UpdateStatusParams>,
    ) -> Result<CallToolResult, McpError> {
        let value = self
            .client
            .update_status(&params.0.habit_id, &params.0.status)
            .await
            .map_err(map_forward_error)?;
        json_result(&value)
    }

    #[tool(
        description = "Hide or unhide a habit. Hidden habits keep their status and history but disappear from default listings and from the daily reset."
    )]
    pub async fn toggle_active(
        &self,
        params: Parameters<ToggleActiveParams>,
    ) -> Result<CallToolResult, McpError> {
        let value = self
            .client
            .toggle_active(&params.0.habit_id)
            .await
            .map_err(map_forward_error)?;
        json_result(&value)
    }

    #[tool(description = "Permanently delete a habit. This cannot be undone.")]
    pub async fn delete_habit(
        &self,
        params: Parameters<DeleteHabitParams>,
    ) -> Result<CallToolResult, McpError> {
        self.client
            .delete_habit(&params.0.habit_id)
            .await
            .map_err(map_forward_error)?;
        json_result(&json!({ "deleted": params.0.habit_id }))
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Habitd MCP server - track, update and reset personal habits".to_string(),
            ),
            ..Default::default()
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn json_result(value: &Value) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn map_forward_error(e: ForwardError) -> McpError {
    match &e {
        ForwardError::ApiError { status, .. } if *status == 404 => {
            McpError::resource_not_found("habit_not_found", Some(json!({"error": e.to_string()})))
        }
        ForwardError::ApiError { status, .. } if *status < 500 => {
            McpError::invalid_params(e.to_string(), None)
        }
        _ => McpError::internal_error(e.to_string(), None),
    }
}
