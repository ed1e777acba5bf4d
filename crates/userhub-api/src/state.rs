//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use userhub_auth::jwt::TokenCodec;
use userhub_auth::password::PasswordHasher;
use userhub_auth::revocation::CacheRevocationStore;
use userhub_auth::session::SessionManager;
use userhub_cache::provider::CacheManager;
use userhub_core::clock::Clock;
use userhub_core::config::AppConfig;
use userhub_database::repositories::UserStore;
use userhub_service::user::UserService;

use crate::middleware::rate_limit::RateLimiter;

/// Shared application state, cloned into every request.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Key-value store (revocation backend).
    pub cache: Arc<CacheManager>,
    /// User persistence.
    pub users: Arc<dyn UserStore>,
    /// Session lifecycle manager.
    pub session_manager: Arc<SessionManager>,
    /// User account service.
    pub user_service: Arc<UserService>,
    /// Process-wide admission controller.
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Constructs the auth and service layers on top of the given backends.
    pub fn new(
        config: AppConfig,
        cache: Arc<CacheManager>,
        users: Arc<dyn UserStore>,
        password_hasher: Arc<PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let codec = Arc::new(TokenCodec::new(&config.auth, Arc::clone(&clock)));
        let revocations = Arc::new(CacheRevocationStore::new(Arc::clone(&cache)));

        let session_manager = Arc::new(SessionManager::new(
            codec,
            revocations,
            Arc::clone(&users),
            Arc::clone(&password_hasher),
        ));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&users),
            password_hasher,
            Arc::clone(&session_manager),
        ));
        let rate_limiter = Arc::new(RateLimiter::from_config(&config.rate_limit, clock));

        Self {
            config: Arc::new(config),
            cache,
            users,
            session_manager,
            user_service,
            rate_limiter,
        }
    }
}
