//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use argon2::Params;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use userhub_api::{AppState, build_app};
use userhub_auth::password::PasswordHasher;
use userhub_cache::memory::MemoryCacheProvider;
use userhub_cache::provider::CacheManager;
use userhub_core::clock::ManualClock;
use userhub_core::config::AppConfig;
use userhub_core::error::AppError;
use userhub_core::result::AppResult;
use userhub_core::traits::cache::CacheProvider;
use userhub_database::repositories::MemoryUserRepository;

/// In-process application backed by the in-memory stores.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Clock shared by the token codec and the rate limiter.
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    /// Application with a rate limit high enough not to interfere.
    pub fn new() -> Self {
        Self::with_rate_limit(10_000)
    }

    /// Application admitting `capacity` requests per minute.
    pub fn with_rate_limit(capacity: u32) -> Self {
        let memory = MemoryCacheProvider::new(&AppConfig::default().cache.memory, 60);
        Self::build(capacity, Arc::new(memory))
    }

    /// Application whose revocation store sits on `provider`.
    pub fn with_cache_provider(provider: Arc<dyn CacheProvider>) -> Self {
        Self::build(10_000, provider)
    }

    fn build(capacity: u32, provider: Arc<dyn CacheProvider>) -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.database.url = "postgres://unused".to_string();
        config.rate_limit.requests_per_minute = capacity;
        config.rate_limit.window_seconds = 60;

        let cache = CacheManager::from_provider(provider, Duration::from_secs(1));
        let hasher = PasswordHasher::with_params(Params::new(1024, 1, 1, None).unwrap());
        let clock = Arc::new(ManualClock::starting_now());

        let state = AppState::new(
            config,
            Arc::new(cache),
            Arc::new(MemoryUserRepository::new()),
            Arc::new(hasher),
            clock.clone(),
        );

        Self {
            router: build_app(state),
            clock,
        }
    }

    /// Sends a request and returns the status with the body parsed as JSON
    /// (or `Value::String` for non-JSON bodies).
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    /// Sends a pre-built request.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }

    /// Registers an account and returns its id.
    pub async fn create_user(&self, name: &str, email: &str, password: &str) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/user",
                None,
                Some(serde_json::json!({ "name": name, "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create_user failed: {body}");
        body["user"]["id"].as_str().unwrap().to_string()
    }

    /// Logs in and returns the bearer token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/login",
                None,
                Some(serde_json::json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }
}

/// Key-value backend that refuses every call.
#[derive(Debug)]
pub struct UnreachableCache;

#[async_trait::async_trait]
impl CacheProvider for UnreachableCache {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Err(AppError::store_unavailable("connection refused"))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<()> {
        Err(AppError::store_unavailable("connection refused"))
    }

    async fn set_default(&self, _key: &str, _value: &str) -> AppResult<()> {
        Err(AppError::store_unavailable("connection refused"))
    }

    async fn delete(&self, _key: &str) -> AppResult<()> {
        Err(AppError::store_unavailable("connection refused"))
    }

    async fn exists(&self, _key: &str) -> AppResult<bool> {
        Err(AppError::store_unavailable("connection refused"))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Err(AppError::store_unavailable("connection refused"))
    }
}
