//! Transfer Service - Main Application Entry Point
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Open the account store (PostgreSQL + migrations, or in-memory)
//! 3. Optionally seed the demo accounts
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use transfer_service::{
    AppState,
    config::Config,
    create_router, db,
    services::account_service,
    store::{MemoryAccountStore, PgAccountStore, SharedStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded, transfer mode: {:?}", config.transfer_mode);

    let store: SharedStore = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = db::create_pool(database_url).await?;
            tracing::info!("Database pool created");

            db::run_migrations(&pool).await?;
            tracing::info!("Database migrations complete");

            Arc::new(PgAccountStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, accounts are kept in memory only");
            Arc::new(MemoryAccountStore::new())
        }
    };

    if config.seed_demo_accounts {
        let inserted = account_service::seed_demo_accounts(store.as_ref(), &config.currency).await?;
        tracing::info!("Seeded {} demo accounts", inserted);
    }

    let app = create_router(AppState::new(store, &config));

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
