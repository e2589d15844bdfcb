//! Cattery Backend
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! - Routes: HTTP request handling and the auth/role gates
//! - Services: Registration, login, cat and breed rules
//! - Repositories: Credential and record stores (PostgreSQL or in-memory)

use anyhow::Result;
use cattery_backend::{
    config::{self, StorageBackend},
    db, routes,
    state::{AppState, Stores},
};
use cattery_shared::{Normalize, RegisterRequest};
use secrecy::ExposeSecret;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    // Fails when no signing secret is configured
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting Cattery Backend"
    );

    let stores = match config.database.backend {
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let db_pool =
                db::create_pool(&config.database.url, config.database.max_connections).await?;

            // Skip in production if using separate migration job
            if !config::AppConfig::is_production() {
                info!("Running database migrations...");
                db::run_migrations(&db_pool).await?;
            }
            Stores::postgres(db_pool)
        }
        StorageBackend::Memory => {
            warn!("Using in-memory stores; all data is lost on shutdown");
            Stores::memory()
        }
    };

    let state = AppState::new(stores, config.clone())?;

    if let Some(admin) = &config.bootstrap_admin {
        let req = RegisterRequest {
            name: admin.name.clone(),
            email: admin.email.clone(),
            password: admin.password.expose_secret().clone(),
        }
        .normalize()?;
        state.auth.ensure_admin(req).await?;
    }

    let app = routes::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "cattery_backend=info,tower_http=info".into()
        } else {
            "cattery_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
