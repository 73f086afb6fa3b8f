use axum::{
    body::to_bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use wilayah_core::raw::{RawPostalRecord, RawRegionRecord};
use wilayah_core::traits::RegionsIter;
use wilayah_core::{denormalize, DbStats, DefaultBackend, DefaultRegionDb, RegionStore, WilayahError};
use wilayah_server::handlers::{self, HealthResponse, SearchParams};
use wilayah_server::AppState;

fn db() -> DefaultRegionDb {
    let raw = vec![
        RawRegionRecord::new("31", "DKI Jakarta"),
        RawRegionRecord::new("31.71", "Kota Jakarta Pusat"),
        RawRegionRecord::new("31.71.06", "Menteng"),
        RawRegionRecord::new("31.71.06.1001", "Menteng"),
        RawRegionRecord::new("31.71.06.1002", "Pegangsaan"),
        RawRegionRecord::new("32", "Jawa Barat"),
        RawRegionRecord::new("32.73", "Kota Bandung"),
        RawRegionRecord::new("32.04", "Kabupaten Bandung"),
        RawRegionRecord::new("32.73.01", "Sukasari"),
        RawRegionRecord::new("32.73.01.1001", "Sarijadi"),
        RawRegionRecord::new("32.04.05", "Cileunyi"),
        RawRegionRecord::new("32.04.05.2001", "Cibiru Wetan"),
    ];
    let postal = vec![
        RawPostalRecord::new("31.71.06.1001", "10310"),
        RawPostalRecord::new("32.73.01.1001", "40151"),
    ];
    denormalize(raw, postal).unwrap().0
}

fn state() -> AppState<DefaultRegionDb> {
    AppState::new(Arc::new(db()))
}

fn q(s: &str) -> Query<SearchParams> {
    Query(SearchParams { q: Some(s.to_string()) })
}

async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn general_search_returns_regions() {
    let resp = handlers::search(State(state()), q("menteng")).await.unwrap();
    let names: Vec<_> = resp.0.iter().map(|r| r.subdistrict.as_str()).collect();
    assert_eq!(names, ["Menteng", "Pegangsaan"]);
}

#[tokio::test]
async fn missing_query_is_bad_request() {
    let err = handlers::search_city(State(state()), Query(SearchParams::default()))
        .await
        .unwrap_err();
    let resp = err.into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await,
        serde_json::json!({"error": "query parameter is required"})
    );
}

#[tokio::test]
async fn level_searches_tolerate_typos() {
    let s = state();

    let city = handlers::search_city(State(s.clone()), q("bandung")).await.unwrap();
    let cities: Vec<_> = city.0.iter().map(|r| r.city.as_str()).collect();
    assert_eq!(cities, ["Kota Bandung", "Kabupaten Bandung"]);

    let district = handlers::search_district(State(s.clone()), q("sukasri")).await.unwrap();
    assert_eq!(district.0[0].district, "Sukasari");

    let sub = handlers::search_subdistrict(State(s.clone()), q("sarijad")).await.unwrap();
    assert_eq!(sub.0[0].subdistrict, "Sarijadi");

    let province = handlers::search_province(State(s), q("jawa barat")).await.unwrap();
    assert_eq!(province.0.len(), 2);
}

#[tokio::test]
async fn postal_lookup_status_codes() {
    let s = state();

    let ok = handlers::search_postal_code(State(s.clone()), Path("40151".to_string()))
        .await
        .unwrap();
    assert_eq!(ok.0[0].postal_code.as_deref(), Some("40151"));

    let resp = handlers::search_postal_code(State(s.clone()), Path("4015x".to_string()))
        .await
        .unwrap_err()
        .into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["error"],
        "postal code must be a 5-digit number"
    );

    let resp = handlers::search_postal_code(State(s), Path("99999".to_string()))
        .await
        .unwrap_err()
        .into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(resp).await["error"],
        "no regions found for the provided postal code"
    );
}

#[tokio::test]
async fn region_json_shape() {
    let resp = handlers::search_postal_code(State(state()), Path("10310".to_string()))
        .await
        .into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(
        json[0],
        serde_json::json!({
            "id": "31.71.06.1001",
            "subdistrict": "Menteng",
            "district": "Menteng",
            "city": "Kota Jakarta Pusat",
            "province": "DKI Jakarta",
            "postal_code": "10310",
            "full_text": "dki jakarta kota jakarta pusat menteng menteng"
        })
    );
}

#[tokio::test]
async fn healthz_reports_ok() {
    let resp = handlers::healthz(State(state())).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let health: HealthResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.message, "Service is healthy");
}

/// A store whose backing storage is gone.
struct Unreachable;

impl RegionStore for Unreachable {
    type Backend = DefaultBackend;

    fn scan(&self) -> wilayah_core::Result<RegionsIter<'_, DefaultBackend>> {
        Err(WilayahError::NotFound("regions.bin".into()))
    }

    fn ping(&self) -> wilayah_core::Result<()> {
        Err(WilayahError::NotFound("regions.bin".into()))
    }

    fn stats(&self) -> wilayah_core::Result<DbStats> {
        Err(WilayahError::NotFound("regions.bin".into()))
    }
}

#[tokio::test]
async fn store_failure_is_generic_500() {
    let s = AppState::new(Arc::new(Unreachable));

    let resp = handlers::search(State(s.clone()), q("menteng"))
        .await
        .unwrap_err()
        .into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(resp).await,
        serde_json::json!({"error": "Database query failed"})
    );

    let resp = handlers::healthz(State(s)).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(resp).await,
        serde_json::json!({"status": "error", "message": "Database connection failed"})
    );
}

#[test]
fn load_state_reads_compiled_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regions.bin");
    db().save_as(&path).unwrap();

    let state = wilayah_server::load_state(&path).unwrap();
    assert_eq!(state.service.store().len(), 4);

    assert!(wilayah_server::load_state(&dir.path().join("missing.bin")).is_err());
}
