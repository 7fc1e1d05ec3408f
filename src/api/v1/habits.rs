//! Habit management handlers.
//!
//! Every endpoint is owner-scoped through the [`Owner`] extractor: a habit
//! belonging to another user is indistinguishable from a missing one.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

use crate::api::AppState;
use crate::api::auth::{Authenticator, Owner};
use crate::db::{DbError, Habit, HabitQuery, HabitStore, NewHabit, UpdateHabit, transition};

// =============================================================================
// DTOs
// =============================================================================

/// Error response returned by all endpoints.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, ToSchema)]
pub struct HabitResponse {
    #[schema(example = "a1b2c3d4")]
    pub id: String,
    #[schema(example = "Morning run")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "pending")]
    pub status: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Habit> for HabitResponse {
    fn from(h: Habit) -> Self {
        Self {
            id: h.id,
            title: h.title,
            description: h.description,
            status: h.status.to_string(),
            is_active: h.is_active,
            created_at: h.created_at,
            updated_at: h.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateHabitRequest {
    #[schema(example = "Morning run")]
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateHabitRequest {
    #[schema(example = "Evening run")]
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListHabitsQuery {
    /// Number of habits to skip
    #[param(example = 0)]
    pub skip: Option<i64>,
    /// Maximum number of habits to return
    #[param(example = 20)]
    pub limit: Option<i64>,
    /// Include inactive habits in the listing
    #[param(example = false)]
    pub include_inactive: Option<bool>,
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedHabits {
    pub items: Vec<HabitResponse>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/v1/habits",
    tag = "habits",
    params(ListHabitsQuery),
    responses(
        (status = 200, description = "Paginated list of habits", body = PaginatedHabits),
        (status = 400, description = "Invalid pagination bounds", body = ErrorResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_habits<S: HabitStore + 'static, A: Authenticator + 'static>(
    State(state): State<AppState<S, A>>,
    Owner(owner_id): Owner,
    Query(query): Query<ListHabitsQuery>,
) -> Result<Json<PaginatedHabits>, (StatusCode, Json<ErrorResponse>)> {
    let defaults = HabitQuery::default();
    let db_query = HabitQuery {
        skip: query.skip.unwrap_or(defaults.skip),
        limit: query.limit.unwrap_or(defaults.limit),
        include_inactive: query.include_inactive.unwrap_or(false),
    };

    let result = state
        .store()
        .list(&owner_id, &db_query)
        .await
        .map_err(error_response)?;

    let items: Vec<HabitResponse> = result.items.into_iter().map(HabitResponse::from).collect();

    Ok(Json(PaginatedHabits {
        items,
        total: result.total,
        limit: result.limit,
        offset: result.offset,
    }))
}

#[utoipa::path(
    get,
    path = "/v1/habits/{id}",
    tag = "habits",
    params(("id" = String, Path, description = "Habit ID")),
    responses(
        (status = 200, description = "Habit found", body = HabitResponse),
        (status = 404, description = "Habit not found", body = ErrorResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_habit<S: HabitStore + 'static, A: Authenticator + 'static>(
    State(state): State<AppState<S, A>>,
    Owner(owner_id): Owner,
    Path(id): Path<String>,
) -> Result<Json<HabitResponse>, (StatusCode, Json<ErrorResponse>)> {
    let habit = state
        .store()
        .get(&id, &owner_id)
        .await
        .map_err(error_response)?;

    Ok(Json(HabitResponse::from(habit)))
}

#[utoipa::path(
    post,
    path = "/v1/habits",
    tag = "habits",
    request_body = CreateHabitRequest,
    responses(
        (status = 201, description = "Habit created", body = HabitResponse),
        (status = 400, description = "Empty title", body = ErrorResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_habit<S: HabitStore + 'static, A: Authenticator + 'static>(
    State(state): State<AppState<S, A>>,
    Owner(owner_id): Owner,
    Json(req): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<HabitResponse>), (StatusCode, Json<ErrorResponse>)> {
    let habit = state
        .store()
        .create(
            &owner_id,
            NewHabit {
                title: req.title,
                description: req.description,
            },
        )
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(HabitResponse::from(habit))))
}

#[utoipa::path(
    put,
    path = "/v1/habits/{id}",
    tag = "habits",
    params(("id" = String, Path, description = "Habit ID")),
    request_body = UpdateHabitRequest,
    responses(
        (status = 200, description = "Habit updated", body = HabitResponse),
        (status = 400, description = "Empty title", body = ErrorResponse),
        (status = 404, description = "Habit not found", body = ErrorResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_habit<S: HabitStore + 'static, A: Authenticator + 'static>(
    State(state): State<AppState<S, A>>,
    Owner(owner_id): Owner,
    Path(id): Path<String>,
    Json(req): Json<UpdateHabitRequest>,
) -> Result<Json<HabitResponse>, (StatusCode, Json<ErrorResponse>)> {
    let habit = state
        .store()
        .update(
            &id,
            &owner_id,
            UpdateHabit {
                title: req.title,
                description: req.description,
            },
        )
        .await
        .map_err(error_response)?;

    Ok(Json(HabitResponse::from(habit)))
}

/// Change a habit's status
///
/// Any of the three statuses may move to any other; only unknown literals
/// are rejected.
#[utoipa::path(
    patch,
    path = "/v1/habits/{id}/status/{status}",
    tag = "habits",
    params(
        ("id" = String, Path, description = "Habit ID"),
        ("status" = String, Path, description = "Target status: pending, in_progress or done")
    ),
    responses(
        (status = 200, description = "Status updated", body = HabitResponse),
        (status = 400, description = "Unknown status literal", body = ErrorResponse),
        (status = 404, description = "Habit not found", body = ErrorResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_status<S: HabitStore + 'static, A: Authenticator + 'static>(
    State(state): State<AppState<S, A>>,
    Owner(owner_id): Owner,
    Path((id, status)): Path<(String, String)>,
) -> Result<Json<HabitResponse>, (StatusCode, Json<ErrorResponse>)> {
    let status = transition::parse_status(&status).map_err(error_response)?;

    let habit = state
        .store()
        .update_status(&id, &owner_id, status)
        .await
        .map_err(error_response)?;

    Ok(Json(HabitResponse::from(habit)))
}

/// Toggle a habit's active flag
///
/// Inactive habits disappear from default listings and from reset
/// eligibility; their status and history stay intact.
#[utoipa::path(
    patch,
    path = "/v1/habits/{id}/toggle-active",
    tag = "habits",
    params(("id" = String, Path, description = "Habit ID")),
    responses(
        (status = 200, description = "Active flag toggled", body = HabitResponse),
        (status = 404, description = "Habit not found", body = ErrorResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn toggle_active<S: HabitStore + 'static, A: Authenticator + 'static>(
    State(state): State<AppState<S, A>>,
    Owner(owner_id): Owner,
    Path(id): Path<String>,
) -> Result<Json<HabitResponse>, (StatusCode, Json<ErrorResponse>)> {
    let habit = state
        .store()
        .toggle_active(&id, &owner_id)
        .await
        .map_err(error_response)?;

    Ok(Json(HabitResponse::from(habit)))
}

#[utoipa::path(
    delete,
    path = "/v1/habits/{id}",
    tag = "habits",
    params(("id" = String, Path, description = "Habit ID")),
    responses(
        (status = 204, description = "Habit deleted"),
        (status = 404, description = "Habit not found", body = ErrorResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_habit<S: HabitStore + 'static, A: Authenticator + 'static>(
    State(state): State<AppState<S, A>>,
    Owner(owner_id): Owner,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state
        .store()
        .delete(&id, &owner_id)
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Helpers
// =============================================================================

fn error_response(e: DbError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &e {
        DbError::NotFound { .. } => StatusCode::NOT_FOUND,
        DbError::Validation { .. } | DbError::InvalidStatus { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}
