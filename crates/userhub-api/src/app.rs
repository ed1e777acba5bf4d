//! Application builder: wires router, middleware, and state into an Axum app.

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::trace::TraceLayer;

use crate::middleware::{logging, rate_limit};
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application.
///
/// Layers run outermost first: tracing span, request log, then the global
/// rate limiter, which sees every request before routing or authentication.
pub fn build_app(state: AppState) -> Router {
    build_router(state.clone())
        .layer(axum_middleware::from_fn_with_state(
            state,
            rate_limit::rate_limit,
        ))
        .layer(axum_middleware::from_fn(logging::request_logging))
        .layer(TraceLayer::new_for_http())
}
