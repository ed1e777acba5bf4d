//! User account handlers.

use axum::Json;
use axum::extract::{Path, State};

use userhub_entity::user::UpdateUser;

use crate::dto::request::{CreateUserRequest, UpdateUserRequest};
use crate::dto::response::{
    CreateUserResponse, MessageResponse, UpdateUserResponse, UserResponse,
};
use crate::error::ApiError;
use crate::extractors::{ValidatedJson, parse_uuid};
use crate::state::AppState;

/// POST /user
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> Result<Json<CreateUserResponse>, ApiError> {
    let user = state
        .user_service
        .create_user(&req.name, &req.email, &req.password)
        .await?;

    Ok(Json(CreateUserResponse {
        message: format!("user created {}", user.name),
        user: user.into(),
    }))
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /user/{id} and GET /me/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.user_service.get_user(parse_uuid(&id)?).await?;
    Ok(Json(user.into()))
}

/// PUT /me/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UpdateUserResponse>, ApiError> {
    let id = parse_uuid(&id)?;
    let (user, issued) = state
        .user_service
        .update_user(
            id,
            UpdateUser {
                name: req.name,
                email: req.email,
            },
        )
        .await?;

    Ok(Json(UpdateUserResponse {
        token: issued.token,
        user: user.into(),
        message: "User updated successfully".to_string(),
    }))
}

/// DELETE /me/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.user_service.delete_user(parse_uuid(&id)?).await?;
    Ok(Json(MessageResponse::new("user deleted")))
}
