//! Handler for `GET /statistics`.

use axum::{Json, extract::State};
use fir_core::{stats::FirStatistics, store::FirStore};

use crate::{AppState, auth::Caller, error::ApiError};

/// Status, location, officer and month breakdowns over every stored record.
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  _caller: Caller,
) -> Result<Json<FirStatistics>, ApiError>
where
  S: FirStore + 'static,
{
  Ok(Json(state.records.statistics().await?))
}
