// Main entry point for the portal API server

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use portal_core::{
    kernel::{spawn_maintenance, GeminiClient, HttpIdentityProvider, PgAccountStore, ServerDeps},
    server::build_app,
    Config,
};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,portal_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting School Portal API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Wire dependencies - lifecycle is owned here, nothing is global
    let deps = Arc::new(ServerDeps::new(
        Some(pool.clone()),
        Arc::new(PgAccountStore::new(pool)),
        Arc::new(HttpIdentityProvider::new(
            config.identity_base_url.clone(),
            config.identity_api_key.clone(),
        )),
        Arc::new(GeminiClient::new(&config.gemini_api_key)),
        Duration::from_secs(config.assistant_timeout_secs),
    ));

    // Evict expired sessions and dead auth-event channels hourly
    spawn_maintenance(deps.clone(), Duration::from_secs(3600));

    // Build application
    let app = build_app(deps, config.allowed_origins.clone());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
