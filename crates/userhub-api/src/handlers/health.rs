//! Liveness and health check handlers.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use userhub_core::traits::cache::CacheProvider;
use userhub_database::repositories::UserStore;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /
pub async fn hello() -> &'static str {
    "Hello World!"
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.users.health_check().await {
        Ok(true) => "connected",
        Ok(false) => "unavailable",
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            "unavailable"
        }
    };
    let cache = match state.cache.health_check().await {
        Ok(true) => "connected",
        Ok(false) => "unavailable",
        Err(e) => {
            warn!(error = %e, "Cache health check failed");
            "unavailable"
        }
    };

    let status = if database == "connected" && cache == "connected" {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        database: database.to_string(),
        cache: cache.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
