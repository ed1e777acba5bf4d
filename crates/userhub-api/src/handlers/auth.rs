//! Session handlers: login, logout, refresh, password change.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::request::{ChangePasswordRequest, LoginRequest};
use crate::dto::response::{MessageResponse, TokenResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson, parse_uuid};
use crate::state::AppState;

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let issued = state
        .session_manager
        .login(req.email.trim(), &req.password)
        .await?;
    Ok(Json(issued.into()))
}

/// POST /me/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state.session_manager.logout(&auth.token).await?;
    Ok(Json(MessageResponse::new("Successfully logged out")))
}

/// POST /me/refresh-token
pub async fn refresh(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<TokenResponse>, ApiError> {
    let issued = state.session_manager.refresh(&auth.token).await?;
    Ok(Json(issued.into()))
}

/// PUT /me/{id}/password
///
/// The account is the token's subject; the path id is only checked for form.
pub async fn change_password(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    parse_uuid(&id)?;
    state
        .session_manager
        .change_password(&auth.token, &req.old_password, &req.new_password)
        .await?;
    Ok(Json(MessageResponse::new("Password updated successfully")))
}
