use crate::api::{api_router, AppState, SharedState};
use crate::config::{ServerConfig, StorageBackend};
use crate::error::{GoalboardError, Result};
use crate::storage::{MemStorage, Storage};
use anyhow::Context;
use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

pub fn build_router(state: SharedState, permissive_cors: bool) -> Router {
    let app = api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if permissive_cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Opens and initializes the configured backend
pub async fn open_storage(config: &ServerConfig) -> Result<Arc<dyn Storage>> {
    let storage: Arc<dyn Storage> = match config.storage {
        StorageBackend::Memory if config.no_seed => Arc::new(MemStorage::new()),
        StorageBackend::Memory => Arc::new(MemStorage::seeded()),
        #[cfg(feature = "file-storage")]
        StorageBackend::File => Arc::new(crate::storage::FileStorage::new(&config.data_dir)),
        #[cfg(not(feature = "file-storage"))]
        StorageBackend::File => {
            return Err(GoalboardError::ConfigError(
                "built without the file-storage feature".to_string(),
            ))
        }
    };

    storage.initialize().await?;
    if !storage.is_initialized().await {
        return Err(GoalboardError::StorageError(
            "storage did not initialize".to_string(),
        ));
    }
    Ok(storage)
}

pub async fn start_server(config: &ServerConfig, storage: Arc<dyn Storage>) -> anyhow::Result<()> {
    let addr = config.bind_addr()?;
    let app = build_router(AppState::shared(storage), config.permissive_cors);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, backend = ?config.storage, "goalboard listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}
