//! [`RevocationStore`] over the configured cache provider.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use userhub_cache::keys;
use userhub_cache::provider::CacheManager;
use userhub_core::error::{AppError, ErrorKind};
use userhub_core::result::AppResult;
use userhub_core::traits::cache::CacheProvider;
use userhub_core::traits::revocation::RevocationStore;

/// Marker value written for each revoked token.
const REVOKED_MARKER: &str = "true";

/// Stores revoked tokens as `revoked:<sha256(token)>` with the token's
/// remaining lifetime as TTL.
///
/// Every round-trip is bounded by the cache operation timeout; failures and
/// timeouts surface as `StoreUnavailable`.
#[derive(Debug, Clone)]
pub struct CacheRevocationStore {
    cache: Arc<CacheManager>,
    timeout: Duration,
}

impl CacheRevocationStore {
    /// Creates a store using the cache manager's operation timeout.
    pub fn new(cache: Arc<CacheManager>) -> Self {
        let timeout = cache.operation_timeout();
        Self { cache, timeout }
    }

    fn key(token: &str) -> String {
        keys::revoked_token(&format!("{:x}", Sha256::digest(token.as_bytes())))
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = AppResult<T>> + Send,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                warn!(operation, error = %e, "Revocation store call failed");
                Err(AppError::with_source(
                    ErrorKind::StoreUnavailable,
                    "Revocation store unavailable",
                    e,
                ))
            }
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Revocation store call timed out"
                );
                Err(AppError::store_unavailable("Revocation store timed out"))
            }
        }
    }
}

#[async_trait]
impl RevocationStore for CacheRevocationStore {
    async fn revoke(&self, token: &str, ttl: Duration) -> AppResult<()> {
        if ttl.is_zero() {
            debug!("Token already past expiry; nothing to revoke");
            return Ok(());
        }
        let key = Self::key(token);
        self.bounded("revoke", self.cache.set(&key, REVOKED_MARKER, ttl))
            .await
    }

    async fn is_revoked(&self, token: &str) -> AppResult<bool> {
        let key = Self::key(token);
        self.bounded("is_revoked", self.cache.exists(&key)).await
    }
}
