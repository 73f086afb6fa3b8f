//! Route handlers.
//!
//! Every search route funnels into [`run_search`], which hands the blocking
//! scan to tokio's blocking pool and maps [`SearchError`] to HTTP.

use crate::error::{internal, ApiError};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use wilayah_core::{Region, RegionStore, SearchKind};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub type SearchResponse = Result<Json<Vec<Region>>, ApiError>;

// ---- GET /v1/search/* ----

pub async fn search<S: RegionStore + 'static>(
    State(state): State<AppState<S>>,
    Query(params): Query<SearchParams>,
) -> SearchResponse {
    run_search(state, SearchKind::General, params.q.unwrap_or_default()).await
}

pub async fn search_district<S: RegionStore + 'static>(
    State(state): State<AppState<S>>,
    Query(params): Query<SearchParams>,
) -> SearchResponse {
    run_search(state, SearchKind::District, params.q.unwrap_or_default()).await
}

pub async fn search_subdistrict<S: RegionStore + 'static>(
    State(state): State<AppState<S>>,
    Query(params): Query<SearchParams>,
) -> SearchResponse {
    run_search(state, SearchKind::Subdistrict, params.q.unwrap_or_default()).await
}

pub async fn search_city<S: RegionStore + 'static>(
    State(state): State<AppState<S>>,
    Query(params): Query<SearchParams>,
) -> SearchResponse {
    run_search(state, SearchKind::City, params.q.unwrap_or_default()).await
}

pub async fn search_province<S: RegionStore + 'static>(
    State(state): State<AppState<S>>,
    Query(params): Query<SearchParams>,
) -> SearchResponse {
    run_search(state, SearchKind::Province, params.q.unwrap_or_default()).await
}

pub async fn search_postal_code<S: RegionStore + 'static>(
    State(state): State<AppState<S>>,
    Path(postal_code): Path<String>,
) -> SearchResponse {
    run_search(state, SearchKind::PostalCode, postal_code).await
}

pub async fn run_search<S: RegionStore + 'static>(
    state: AppState<S>,
    kind: SearchKind,
    query: String,
) -> SearchResponse {
    let service = state.service.clone();
    let results = tokio::task::spawn_blocking(move || service.search(kind, &query))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, kind = %kind, "search task failed");
            internal("Database query failed")
        })??;
    Ok(Json(results))
}

// ---- GET /healthz ----

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

pub async fn healthz<S: RegionStore + 'static>(State(state): State<AppState<S>>) -> Response {
    match state.service.store().ping() {
        Ok(()) => Json(HealthResponse {
            status: "ok".into(),
            message: "Service is healthy".into(),
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "error".into(),
                    message: "Database connection failed".into(),
                }),
            )
                .into_response()
        }
    }
}
