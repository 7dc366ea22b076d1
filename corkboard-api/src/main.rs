//! # Corkboard API Server
//!
//! REST backend for the Corkboard Kanban application: users, boards,
//! columns, tasks, tags, and memberships over PostgreSQL, with JWT
//! authentication.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p corkboard-api
//! ```
//!
//! Set `CORKBOARD_STORE=memory` to run without a database (nothing
//! persists across restarts; intended for tests and CI).

use std::sync::Arc;

use corkboard_api::app::{build_router, AppState};
use corkboard_api::config::{Config, StoreMode};
use corkboard_shared::db::{migrations, pool};
use corkboard_shared::store::{memory::MemStore, postgres::PgStore, Store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "corkboard_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Corkboard API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let mut pg_pool_handle = None;
    let store: Arc<dyn Store> = match config.api.store_mode {
        StoreMode::Postgres => {
            let url = config.database.url();
            migrations::create_database_if_missing(&url).await?;

            let pg_pool = pool::connect(pool::PoolSettings {
                url,
                max_connections: config.database.max_connections,
            })
            .await?;

            let schema_version = migrations::apply_migrations(&pg_pool).await?;
            tracing::info!(
                schema_version = ?schema_version,
                "Database connected successfully"
            );

            pg_pool_handle = Some(pg_pool.clone());
            Arc::new(PgStore::new(pg_pool))
        }
        StoreMode::Memory => {
            tracing::warn!("Running with the in-memory store; nothing will persist");
            Arc::new(MemStore::new())
        }
    };

    let bind_address = config.bind_address();
    let state = AppState::new(store, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server running on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pg_pool) = pg_pool_handle {
        pool::shutdown(pg_pool).await;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolves when the process receives Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
