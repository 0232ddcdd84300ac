//! JSON REST API for the FIR ledger.
//!
//! Exposes an axum [`Router`] backed by any [`fir_core::store::FirStore`].
//! TLS, CORS and request tracing are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = fir_api::api_router(state).layer(TraceLayer::new_for_http());
//! ```

pub mod auth;
pub mod error;
pub mod firs;
pub mod statistics;

use std::sync::Arc;

use axum::{
  Json, Router,
  routing::{get, post},
};
use fir_core::{service::RecordService, store::FirStore};
use serde_json::{Value, json};

pub use auth::AuthConfig;
pub use error::ApiError;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub records: Arc<RecordService<S>>,
  pub auth:    Arc<AuthConfig>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { records: self.records.clone(), auth: self.auth.clone() }
  }
}

impl<S> AppState<S> {
  pub fn new(records: RecordService<S>, auth: AuthConfig) -> Self {
    Self { records: Arc::new(records), auth: Arc::new(auth) }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: FirStore + 'static,
{
  Router::new()
    .route("/firs", get(firs::list::<S>).post(firs::create::<S>))
    .route("/firs/{id}", get(firs::get_one::<S>))
    .route("/firs/{id}/verify", post(firs::verify::<S>))
    .route("/statistics", get(statistics::handler::<S>))
    .route("/health", get(health))
    .with_state(state)
}

/// Liveness probe; never requires credentials.
async fn health() -> Json<Value> { Json(json!({ "status": "ok" })) }

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use argon2::{
    Algorithm, Argon2, Params, PasswordHasher, Version, password_hash::SaltString,
  };
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
  use chrono::{Datelike as _, Utc};
  use fir_core::service::ServiceConfig;
  use fir_store_sqlite::SqliteStore;
  use rand_core::OsRng;
  use tower::ServiceExt as _;

  use super::*;
  use crate::auth::{Role, UserConfig};

  fn hash(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::new(8, 1, 1, None).unwrap())
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string()
  }

  fn users() -> AuthConfig {
    AuthConfig {
      users: vec![
        UserConfig {
          username:      "citizen".into(),
          password_hash: hash("c-pass"),
          role:          Role::Citizen,
        },
        UserConfig {
          username:      "officer".into(),
          password_hash: hash("p-pass"),
          role:          Role::Police,
        },
      ],
    }
  }

  async fn make_state(auth: AuthConfig) -> AppState<SqliteStore> {
    let store   = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let records = RecordService::new(
      store,
      ServiceConfig { verify_delay: Duration::ZERO, ..Default::default() },
    );
    records.seed_demo().await.unwrap();
    AppState::new(records, auth)
  }

  async fn send(
    state: AppState<SqliteStore>,
    method: &str,
    uri: &str,
    creds: Option<(&str, &str)>,
    body: Option<String>,
  ) -> (StatusCode, axum::http::HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((user, pass)) = creds {
      builder = builder.header(
        header::AUTHORIZATION,
        format!("Basic {}", B64.encode(format!("{user}:{pass}"))),
      );
    }
    let req = match body {
      Some(b) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(b))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };

    let resp    = api_router(state).oneshot(req).await.unwrap();
    let status  = resp.status();
    let headers = resp.headers().clone();
    let bytes   = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json    = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, json)
  }

  fn new_fir() -> Value {
    json!({
      "title": "Stolen Bike",
      "description": "Bicycle taken from outside the metro station",
      "victimName": "Asha Rao",
      "complainantName": "Asha Rao",
      "natureOfOffence": "Theft",
      "policeName": "Officer Priya Singh",
      "policeBatchId": "PB-4567",
      "policeStationName": "South Zone Police Station",
      "witnessName": "Anand Verma",
      "location": "MG Road, Bangalore",
      "dateTime": "2023-11-10T19:45",
      "status": "pending",
      "evidence": [{
        "type": "image",
        "content": "https://example.com/cctv.jpg",
        "description": "CCTV still",
        "timestamp": 1699636800000i64
      }]
    })
  }

  fn ids(json: &Value) -> Vec<&str> {
    json
      .as_array()
      .unwrap()
      .iter()
      .map(|f| f["id"].as_str().unwrap())
      .collect()
  }

  // ── Filing ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn file_returns_201_with_server_fields() {
    let state = make_state(AuthConfig::default()).await;
    let (status, _, fir) =
      send(state.clone(), "POST", "/firs", None, Some(new_fir().to_string())).await;

    assert_eq!(status, StatusCode::CREATED);
    let id = fir["id"].as_str().unwrap();
    assert!(id.starts_with(&format!("FIR-{}-", Utc::now().year())), "{id}");
    assert_eq!(fir["isVerified"], true);
    assert!(fir["ipfsCID"].as_str().unwrap().starts_with("QmX"));
    assert!(fir["blockchainTxHash"].as_str().unwrap().starts_with("0x"));

    let (status, _, fetched) =
      send(state, "GET", &format!("/firs/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, fir);
    assert_eq!(fetched["title"], "Stolen Bike");
    assert_eq!(fetched["evidence"][0]["type"], "image");
  }

  #[tokio::test]
  async fn blank_required_field_is_400() {
    let state    = make_state(AuthConfig::default()).await;
    let mut body = new_fir();
    body["witnessName"] = "".into();
    let (status, _, json) =
      send(state, "POST", "/firs", None, Some(body.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("witnessName"));
  }

  #[tokio::test]
  async fn malformed_json_is_400() {
    let state = make_state(AuthConfig::default()).await;
    let (status, _, json) =
      send(state, "POST", "/firs", None, Some("{not json".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
  }

  #[tokio::test]
  async fn missing_status_is_400() {
    let state    = make_state(AuthConfig::default()).await;
    let mut body = new_fir();
    body.as_object_mut().unwrap().remove("status");
    let (status, ..) = send(state, "POST", "/firs", None, Some(body.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── Reads ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn unknown_id_is_404() {
    let state = make_state(AuthConfig::default()).await;
    let (status, _, json) = send(state, "GET", "/firs/FIR-2023-999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "error": "FIR not found" }));
  }

  #[tokio::test]
  async fn list_newest_first() {
    let state = make_state(AuthConfig::default()).await;
    let (status, _, json) = send(state, "GET", "/firs", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&json), ["FIR-2023-003", "FIR-2023-002", "FIR-2023-001"]);
  }

  #[tokio::test]
  async fn list_filters_by_status_and_location() {
    let state = make_state(AuthConfig::default()).await;

    let (_, _, pending) = send(state.clone(), "GET", "/firs?status=pending", None, None).await;
    assert_eq!(ids(&pending), ["FIR-2023-002"]);

    let (_, _, both) = send(
      state.clone(),
      "GET",
      "/firs?status=investigating&location=bangalore",
      None,
      None,
    )
    .await;
    assert_eq!(ids(&both), ["FIR-2023-003"]);

    let (_, _, officer) =
      send(state, "GET", "/firs?policeName=James%20Wilson", None, None).await;
    assert_eq!(ids(&officer), ["FIR-2023-001"]);
  }

  #[tokio::test]
  async fn list_date_range_includes_whole_end_day() {
    let state = make_state(AuthConfig::default()).await;
    let (status, _, json) = send(
      state,
      "GET",
      "/firs?startDate=2023-11-01&endDate=2023-11-10",
      None,
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&json), ["FIR-2023-003", "FIR-2023-002"]);
  }

  #[tokio::test]
  async fn bad_filter_is_400() {
    let state = make_state(AuthConfig::default()).await;
    let (status, ..) = send(state.clone(), "GET", "/firs?startDate=yesterday", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, ..) = send(state, "GET", "/firs?status=archived", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn undecodable_query_is_json_400() {
    let state = make_state(AuthConfig::default()).await;
    let (status, headers, json) = send(
      state,
      "GET",
      "/firs?status=pending&status=closed",
      None,
      None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert!(json["error"].as_str().unwrap().contains("status"), "{json}");
  }

  #[tokio::test]
  async fn exhausted_ids_are_500() {
    let state = make_state(AuthConfig::default()).await;
    // Three demo records plus these eight: sequential draws 12..=19 all collide.
    let year = Utc::now().year();
    for seq in 12..=19 {
      let mut fir = fir_core::seed::demo_records().remove(0);
      fir.id = format!("FIR-{year}-{seq:03}");
      assert!(state.records.store().insert(&fir).await.unwrap());
    }

    let (status, _, json) =
      send(state, "POST", "/firs", None, Some(new_fir().to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].is_string(), "{json}");
  }

  // ── Verify ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn verify_existing_and_missing() {
    let state = make_state(AuthConfig::default()).await;

    let (status, _, json) =
      send(state.clone(), "POST", "/firs/FIR-2023-002/verify", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "success": true }));

    let (_, _, fir) = send(state.clone(), "GET", "/firs/FIR-2023-002", None, None).await;
    assert_eq!(fir["isVerified"], true);

    let (status, _, json) =
      send(state, "POST", "/firs/FIR-2023-404/verify", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "FIR not found");
  }

  // ── Statistics ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn statistics_are_consistent_and_track_filings() {
    let state = make_state(AuthConfig::default()).await;

    let (status, _, before) = send(state.clone(), "GET", "/statistics", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let status_sum = before["pendingCount"].as_u64().unwrap()
      + before["investigatingCount"].as_u64().unwrap()
      + before["closedCount"].as_u64().unwrap();
    assert_eq!(status_sum, 3);

    let officers = before["firsByOfficer"].as_array().unwrap();
    let counts: Vec<u64> = officers.iter().map(|o| o["count"].as_u64().unwrap()).collect();
    assert_eq!(counts.iter().sum::<u64>(), 3);
    assert!(counts.windows(2).all(|w| w[0] >= w[1]));

    send(state.clone(), "POST", "/firs", None, Some(new_fir().to_string())).await;
    let (_, _, after) = send(state, "GET", "/statistics", None, None).await;

    assert_eq!(after["pendingCount"], before["pendingCount"].as_u64().unwrap() + 1);
    let bangalore = |s: &Value| {
      s["firsByLocation"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["location"] == "Bangalore")
        .map_or(0, |l| l["count"].as_u64().unwrap())
    };
    assert_eq!(bangalore(&after), bangalore(&before) + 1);
  }

  // ── Auth ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn health_is_open() {
    let state = make_state(users()).await;
    let (status, _, json) = send(state, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
  }

  #[tokio::test]
  async fn missing_credentials_are_401() {
    let state = make_state(users()).await;
    let (status, headers, _) = send(state, "GET", "/firs", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(headers.contains_key(header::WWW_AUTHENTICATE));
  }

  #[tokio::test]
  async fn citizen_cannot_file_or_verify() {
    let state = make_state(users()).await;
    let citizen = Some(("citizen", "c-pass"));

    let (status, ..) =
      send(state.clone(), "POST", "/firs", citizen, Some(new_fir().to_string())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, ..) =
      send(state.clone(), "POST", "/firs/FIR-2023-001/verify", citizen, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, ..) = send(
      state,
      "POST",
      "/firs",
      Some(("officer", "p-pass")),
      Some(new_fir().to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
  }

  #[tokio::test]
  async fn citizen_reads_omit_evidence() {
    let state = make_state(users()).await;

    let (_, _, one) = send(
      state.clone(),
      "GET",
      "/firs/FIR-2023-001",
      Some(("citizen", "c-pass")),
      None,
    )
    .await;
    assert!(one.get("evidence").is_none());

    let (_, _, list) = send(state.clone(), "GET", "/firs", Some(("citizen", "c-pass")), None).await;
    assert!(list.as_array().unwrap().iter().all(|f| f.get("evidence").is_none()));

    let (_, _, officer_view) = send(
      state,
      "GET",
      "/firs/FIR-2023-001",
      Some(("officer", "p-pass")),
      None,
    )
    .await;
    assert!(officer_view["evidence"].is_array());
  }
}
