//! Token revocation (blacklist) capability.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Shared store of revoked bearer tokens.
///
/// Implementations must make a revocation visible to every subsequent
/// [`is_revoked`](RevocationStore::is_revoked) call as soon as
/// [`revoke`](RevocationStore::revoke) returns, and must drop the entry once
/// `ttl` has elapsed. Connectivity failures are reported as
/// [`ErrorKind::StoreUnavailable`](crate::error::ErrorKind::StoreUnavailable);
/// callers deny access on that error.
#[async_trait]
pub trait RevocationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Marks `token` as revoked for `ttl`. A zero `ttl` is a successful no-op.
    async fn revoke(&self, token: &str, ttl: Duration) -> AppResult<()>;

    /// Returns `true` iff an unexpired revocation entry exists for `token`.
    async fn is_revoked(&self, token: &str) -> AppResult<bool>;
}
