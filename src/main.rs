//! ExpenseHub server.
//!
//! Main entry point that wires all crates together and starts the server.

use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use expensehub_api::{AppState, build_router};
use expensehub_auth::SessionCleanup;
use expensehub_core::config::AppConfig;
use expensehub_core::error::AppError;
use expensehub_database::Stores;

#[tokio::main]
async fn main() {
    let env = std::env::var("EXPENSEHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
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
    tracing::info!("Starting ExpenseHub v{}", env!("CARGO_PKG_VERSION"));

    if config.insecure_jwt_secret() {
        tracing::warn!(
            "auth.jwt_secret is still the shipped placeholder; set EXPENSEHUB__AUTH__JWT_SECRET before deploying"
        );
    }

    // ── Step 1: Stores (connects and migrates when using PostgreSQL) ──
    let stores = Stores::connect(&config.database).await?;
    tracing::info!(backend = stores.backend_name(), "Stores ready");

    // ── Step 2: Background session cleanup ───────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let cleanup = SessionCleanup::new(
        stores.sessions.clone(),
        config.session.cleanup_interval_minutes,
    );
    let cleanup_handle = tokio::spawn(async move {
        cleanup.run(shutdown_rx).await;
    });

    // ── Step 3: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_router(AppState::new(config, stores.clone()));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("ExpenseHub server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 4: Wait for background tasks ────────────────────────
    let _ = tokio::time::timeout(Duration::from_secs(10), cleanup_handle).await;
    stores.close().await;

    tracing::info!("ExpenseHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
