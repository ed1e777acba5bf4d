//! UserHub Server: user accounts and bearer-token sessions over HTTP.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use userhub_api::{AppState, build_app};
use userhub_auth::password::PasswordHasher;
use userhub_cache::provider::CacheManager;
use userhub_core::clock::SystemClock;
use userhub_core::config::AppConfig;
use userhub_core::error::AppError;
use userhub_database::connection::DatabasePool;
use userhub_database::migration::run_migrations;
use userhub_database::repositories::UserRepository;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment, then check it is complete.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("USERHUB_ENV").unwrap_or_else(|_| "development".to_string());
    let config = AppConfig::load(&env)?;
    config.validate()?;
    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting UserHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = DatabasePool::connect(&config.database).await?;
    run_migrations(db_pool.pool()).await?;

    // ── Step 2: Key-value store ──────────────────────────────────
    tracing::info!(provider = %config.cache.provider, "Initializing cache");
    let cache = Arc::new(CacheManager::new(&config.cache).await?);

    // ── Step 3: Auth, services, admission control ────────────────
    let users = Arc::new(UserRepository::new(db_pool.pool().clone()));
    let state = AppState::new(
        config.clone(),
        cache,
        users,
        Arc::new(PasswordHasher::new()),
        Arc::new(SystemClock),
    );
    tracing::info!(
        requests_per_window = config.rate_limit.requests_per_minute,
        window_seconds = config.rate_limit.window_seconds,
        "Rate limiter configured"
    );

    // ── Step 4: Build and start HTTP server ──────────────────────
    let app = build_app(state);
    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("UserHub server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db_pool.close().await;
    tracing::info!("UserHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
