//! HTTP client for forwarding tool calls to the habitd REST API.

use std::env;

use miette::Diagnostic;
use reqwest::{Client, Response, StatusCode};
use serde_json::{Value, json};
use thiserror::Error;

/// Forwarding errors.
#[derive(Error, Diagnostic, Debug)]
pub enum ForwardError {
    #[error("Failed to connect to habitd API server")]
    #[diagnostic(
        code(habitd::mcp::connection_failed),
        help(
            "Is the API server running? Try: habitd-api --db /path/to/db\nOr set HABITD_API_URL to point to the correct server."
        )
    )]
    ConnectionFailed {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from API server: {message}")]
    #[diagnostic(code(habitd::mcp::invalid_response))]
    InvalidResponse { message: String },

    #[error("API error ({status}): {message}")]
    #[diagnostic(code(habitd::mcp::api_error))]
    ApiError { status: u16, message: String },
}

impl From<reqwest::Error> for ForwardError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ForwardError::ConnectionFailed { source: e }
        } else {
            ForwardError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

pub type ForwardResult<T> = Result<T, ForwardError>;

/// Bearer-authenticated client for the habitd REST API.
pub struct HabitApiClient {
    base_url: String,
    bearer: String,
    client: Client,
}

impl HabitApiClient {
    /// Create a new API client.
    ///
    /// Priority for base URL:
    /// 1. Explicit `api_url` parameter
    /// 2. HABITD_API_URL environment variable
    /// 3. Default: http://localhost:3000
    pub fn new(api_url: Option<String>, bearer: String) -> Self {
        let base_url = api_url
            .or_else(|| env::var("HABITD_API_URL").ok())
            .unwrap_or_else(|| "http://localhost:3000".to_string());

        Self {
            base_url,
            bearer,
            client: Client::new(),
        }
    }

    /// Get the base URL being used.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> ForwardResult<Value> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn list_habits(
        &self,
        skip: Option<i64>,
        limit: Option<i64>,
        include_inactive: bool,
    ) -> ForwardResult<Value> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(skip) = skip {
            query.push(("skip", skip.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        if include_inactive {
            query.push(("include_inactive", "true".to_string()));
        }

        let response = self
            .client
            .get(format!("{}/v1/habits", self.base_url))
            .query(&query)
            .bearer_auth(&self.bearer)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn get_habit(&self, id: &str) -> ForwardResult<Value> {
        let response = self
            .client
            .get(format!("{}/v1/habits/{}", self.base_url, id))
            .bearer_auth(&self.bearer)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn create_habit(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> ForwardResult<Value> {
        let response = self
            .client
            .post(format!("{}/v1/habits", self.base_url))
            .bearer_auth(&self.bearer)
            .json(&json!({ "title": title, "description": description }))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn update_habit(
        &self,
        id: &str,
        title: &str,
        description: Option<&str>,
    ) -> ForwardResult<Value> {
        let response = self
            .client
            .put(format!("{}/v1/habits/{}", self.base_url, id))
            .bearer_auth(&self.bearer)
            .json(&json!({ "title": title, "description": description }))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn update_status(&self, id: &str, status: &str) -> ForwardResult<Value> {
        let response = self
            .client
            .patch(format!(
                "{}/v1/habits/{}/status/{}",
                self.base_url, id, status
            ))
            .bearer_auth(&self.bearer)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn toggle_active(&self, id: &str) -> ForwardResult<Value> {
        let response = self
            .client
            .patch(format!("{}/v1/habits/{}/toggle-active", self.base_url, id))
            .bearer_auth(&self.bearer)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn delete_habit(&self, id: &str) -> ForwardResult<()> {
        let response = self
            .client
            .delete(format!("{}/v1/habits/{}", self.base_url, id))
            .bearer_auth(&self.bearer)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    /// Handle API response with standardized error handling.
    ///
    /// Returns the JSON response body on success, or `ApiError` on
    /// non-success status codes. A 204 becomes an empty object.
    async fn handle_response(response: Response) -> ForwardResult<Value> {
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(json!({}));
        }

        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| ForwardError::InvalidResponse {
                    message: e.to_string(),
                })
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn error_from(response: Response) -> ForwardError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        ForwardError::ApiError { status, message }
    }
}
