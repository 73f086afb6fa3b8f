//! HTTP surface for the region search engine.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/v1/search?q=` | Substring search over the full hierarchy |
//! | `GET`  | `/v1/search/district?q=` | Typo-tolerant district search |
//! | `GET`  | `/v1/search/subdistrict?q=` | Typo-tolerant subdistrict search |
//! | `GET`  | `/v1/search/city?q=` | Typo-tolerant city/regency search |
//! | `GET`  | `/v1/search/province?q=` | Typo-tolerant province search |
//! | `GET`  | `/v1/search/postal/{postal_code}` | Exact postal code lookup |
//! | `GET`  | `/healthz` | Store reachability |
//!
//! Errors are `{"error": "<message>"}` with status 400, 404 or 500.

pub mod config;
pub mod error;
pub mod handlers;

use crate::config::ServerConfig;
use anyhow::Context;
use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use wilayah_core::{DefaultRegionDb, RegionStore, SearchService};

/// Shared state for every handler.
pub struct AppState<S: RegionStore> {
    pub service: SearchService<S>,
}

impl<S: RegionStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<S: RegionStore> AppState<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            service: SearchService::new(store),
        }
    }
}

pub fn router<S: RegionStore + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/v1/search", get(handlers::search::<S>))
        .route("/v1/search/district", get(handlers::search_district::<S>))
        .route("/v1/search/subdistrict", get(handlers::search_subdistrict::<S>))
        .route("/v1/search/city", get(handlers::search_city::<S>))
        .route("/v1/search/province", get(handlers::search_province::<S>))
        .route(
            "/v1/search/postal/{postal_code}",
            get(handlers::search_postal_code::<S>),
        )
        .route("/healthz", get(handlers::healthz::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Load the compiled database. Runs before the listener binds, so no
/// request ever sees a partial relation.
pub fn load_state(db_path: &Path) -> anyhow::Result<AppState<DefaultRegionDb>> {
    let db = DefaultRegionDb::load_from_path(db_path)
        .with_context(|| format!("loading region database from {}", db_path.display()))?;
    tracing::info!(path = %db_path.display(), regions = db.len(), "region database ready");
    Ok(AppState::new(Arc::new(db)))
}

pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let state = load_state(&config.db_path)?;
    let app = router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
