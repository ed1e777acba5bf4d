//! `AuthUser` extractor: resolves the bearer token into an authenticated subject.

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header::AUTHORIZATION, request::Parts};

use userhub_auth::session::extract_bearer;
use userhub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller of a request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Token subject (account email).
    pub subject: String,
    /// The raw bearer token presented with the request.
    pub token: String,
}

/// Reads the `Authorization` header, rejecting values that are not UTF-8.
pub fn authorization_header(headers: &HeaderMap) -> Result<Option<&str>, AppError> {
    headers
        .get(AUTHORIZATION)
        .map(|value| {
            value
                .to_str()
                .map_err(|_| AppError::malformed_token("Authorization header is not valid text"))
        })
        .transpose()
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let token = extract_bearer(authorization_header(&parts.headers)?)?.to_string();
        let claims = state.session_manager.authenticate(&token).await?;

        Ok(AuthUser {
            subject: claims.sub,
            token,
        })
    }
}
