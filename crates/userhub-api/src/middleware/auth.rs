//! Bearer-token guard for authenticated route groups.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::extractors::AuthUser;

/// Rejects the request unless it carries a valid, unrevoked bearer token.
///
/// The resolved [`AuthUser`] is stored in request extensions so handlers
/// extracting it do not authenticate a second time.
pub async fn require_auth(auth: AuthUser, mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(auth);
    next.run(request).await
}
