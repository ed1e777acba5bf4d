//! `Authorization: Bearer <token>` parsing.

use userhub_core::error::AppError;

const BEARER_PREFIX: &str = "Bearer ";

/// Extracts the token from an `Authorization` header value.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AppError> {
    let header = header
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| AppError::missing_credentials("Authorization header required"))?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .ok_or_else(|| AppError::malformed_token("Authorization header must use Bearer scheme"))?;

    if token.is_empty() {
        return Err(AppError::malformed_token("Bearer token is empty"));
    }
    Ok(token)
}
