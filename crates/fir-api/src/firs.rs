//! Handlers for `/firs` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/firs` | Optional `location`, `startDate`, `endDate`, `policeName`, `status` |
//! | `GET`  | `/firs/{id}` | Single record |
//! | `POST` | `/firs` | Body: [`NewFir`]; returns 201 + stored record |
//! | `POST` | `/firs/{id}/verify` | Returns `{"success":true}` |

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use fir_core::{
  filter::ListFilter,
  fir::{Fir, NewFir},
  store::FirStore,
};
use serde_json::{Value, json};

use crate::{AppState, auth::Caller, error::ApiError};

fn redact(caller: &Caller, fir: Fir) -> Fir {
  if caller.sees_evidence() { fir } else { fir.without_evidence() }
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /firs[?location=..][&startDate=..][&endDate=..][&policeName=..][&status=..]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  caller: Caller,
  query: Result<Query<ListFilter>, QueryRejection>,
) -> Result<Json<Vec<Fir>>, ApiError>
where
  S: FirStore + 'static,
{
  let Query(filter) = query?;
  let firs = state.records.list(filter).await?;
  Ok(Json(firs.into_iter().map(|f| redact(&caller, f)).collect()))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /firs/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  caller: Caller,
  Path(id): Path<String>,
) -> Result<Json<Fir>, ApiError>
where
  S: FirStore + 'static,
{
  let fir = state
    .records
    .get(&id)
    .await?
    .ok_or(fir_core::Error::NotFound)?;
  Ok(Json(redact(&caller, fir)))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /firs`: returns 201 + the stored [`Fir`].
pub async fn create<S>(
  State(state): State<AppState<S>>,
  caller: Caller,
  body: Result<Json<NewFir>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FirStore + 'static,
{
  caller.require_officer()?;
  let Json(input) = body?;
  let fir = state.records.file(input).await?;
  Ok((StatusCode::CREATED, Json(fir)))
}

// ─── Verify ──────────────────────────────────────────────────────────────────

/// `POST /firs/{id}/verify`
pub async fn verify<S>(
  State(state): State<AppState<S>>,
  caller: Caller,
  Path(id): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  S: FirStore + 'static,
{
  caller.require_officer()?;
  let verified = state
    .records
    .verify(&id)
    .await?
    .ok_or(fir_core::Error::NotFound)?;
  Ok(Json(json!({ "success": verified })))
}
