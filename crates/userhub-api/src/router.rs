//! Route definitions for the UserHub HTTP API.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the route table and thread `AppState` through every handler.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::hello))
        .route("/health", get(handlers::health::health))
        .route("/login", post(handlers::auth::login))
        .route("/user", post(handlers::user::create_user))
        .route("/users", get(handlers::user::list_users))
        .route("/user/{id}", get(handlers::user::get_user))
        .nest("/me", me_routes(state.clone()))
        .with_state(state)
}

/// Endpoints that require a valid, unrevoked bearer token.
fn me_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
        .route("/{id}/password", put(handlers::auth::change_password))
        .route("/refresh-token", post(handlers::auth::refresh))
        .route("/logout", post(handlers::auth::logout))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::auth::require_auth,
        ))
}
