//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, patch, post, put};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::auth::Authenticator;
use super::state::AppState;
use super::v1::{
    self, CreateHabitRequest, ErrorResponse, HabitResponse, HealthResponse, PaginatedHabits,
    UpdateHabitRequest,
};
use crate::db::HabitStore;

/// Build routes with generic store and authenticator types.
///
/// This macro reduces boilerplate when registering handlers that are
/// generic over the HabitStore and Authenticator traits. It applies the
/// turbofish operator automatically.
macro_rules! routes {
    ($S:ty, $A:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$S, $A>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Habitd API",
        version = "0.3.0",
        description = "Personal habit tracking API",
        license(name = "GPL-2.0")
    ),
    paths(
        v1::root,
        v1::health,
        v1::list_habits,
        v1::get_habit,
        v1::create_habit,
        v1::update_habit,
        v1::update_status,
        v1::toggle_active,
        v1::delete_habit,
    ),
    components(
        schemas(
            HealthResponse,
            HabitResponse,
            PaginatedHabits,
            CreateHabitRequest,
            UpdateHabitRequest,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "habits", description = "Habit management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
pub fn create_router<S, A>(state: AppState<S, A>) -> Router
where
    S: HabitStore + 'static,
    A: Authenticator + 'static,
{
    let api = ApiDoc::openapi();

    // System routes (non-generic, unauthenticated)
    let system_routes = Router::new()
        .route("/", get(v1::root))
        .route("/health", get(v1::health));

    // Habit routes (generic, owner-scoped)
    let habit_routes = routes!(S, A => {
        get "/v1/habits" => v1::list_habits,
        post "/v1/habits" => v1::create_habit,
        get "/v1/habits/{id}" => v1::get_habit,
        put "/v1/habits/{id}" => v1::update_habit,
        patch "/v1/habits/{id}/status/{status}" => v1::update_status,
        patch "/v1/habits/{id}/toggle-active" => v1::toggle_active,
        delete "/v1/habits/{id}" => v1::delete_habit,
    });

    system_routes
        .merge(habit_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
