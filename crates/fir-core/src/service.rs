//! [`RecordService`]: the operations behind every endpoint.
//!
//! The service owns no record state. It validates input, assigns the
//! server-side fields, and delegates persistence to a [`FirStore`].

use std::{sync::Arc, time::Duration};

use chrono::{Datelike, Utc};

use crate::{
  Error, Result,
  filter::ListFilter,
  fir::{Fir, NewFir},
  id::{self, IdStrategy},
  seed::demo_records,
  stats::FirStatistics,
  store::{FirQuery, FirStore},
};

/// Inserts attempted before [`Error::IdAllocation`] is returned.
pub const MAX_ID_ATTEMPTS: usize = 8;

/// Tunables fixed at construction.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
  pub id_strategy:  IdStrategy,
  /// Simulated ledger round-trip applied before every verification.
  pub verify_delay: Duration,
}

impl Default for ServiceConfig {
  fn default() -> Self {
    Self {
      id_strategy:  IdStrategy::Sequential,
      verify_delay: Duration::from_millis(1500),
    }
  }
}

/// Request-scoped operations over a shared store.
pub struct RecordService<S> {
  store:  Arc<S>,
  config: ServiceConfig,
}

impl<S: FirStore> RecordService<S> {
  pub fn new(store: Arc<S>, config: ServiceConfig) -> Self {
    Self { store, config }
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  pub fn config(&self) -> &ServiceConfig { &self.config }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Validate `input`, assign id/timestamp/placeholders, and persist it.
  ///
  /// An id already present in the store is never overwritten: the insert is
  /// retried with a fresh id up to [`MAX_ID_ATTEMPTS`] times.
  pub async fn file(&self, input: NewFir) -> Result<Fir> {
    input.validate()?;
    let year = Utc::now().year();

    for attempt in 1..=MAX_ID_ATTEMPTS {
      let seq = match self.config.id_strategy {
        // Offset by the attempt so a racing writer's id is skipped.
        IdStrategy::Sequential => {
          self.store.count().await.map_err(Error::store)? + attempt as u64
        }
        IdStrategy::Random => id::random_sequence(),
      };

      let fir = Fir::from_new(
        input.clone(),
        id::format_fir_id(year, seq),
        Utc::now().timestamp_millis(),
        id::ipfs_cid(),
        id::tx_hash(),
      );

      if self.store.insert(&fir).await.map_err(Error::store)? {
        tracing::info!(id = %fir.id, status = %fir.status, "filed FIR");
        return Ok(fir);
      }
      tracing::warn!(id = %fir.id, attempt, "FIR id already taken; retrying");
    }

    Err(Error::IdAllocation(MAX_ID_ATTEMPTS))
  }

  /// Simulate a ledger confirmation for `id`.
  ///
  /// Returns the stored verification flag, or `None` if no such record exists.
  pub async fn verify(&self, id: &str) -> Result<Option<bool>> {
    if !self.config.verify_delay.is_zero() {
      tokio::time::sleep(self.config.verify_delay).await;
    }

    if !self.store.mark_verified(id).await.map_err(Error::store)? {
      return Ok(None);
    }
    let fir = self.store.get(id).await.map_err(Error::store)?;
    Ok(fir.map(|f| f.is_verified))
  }

  /// Insert the demonstration records if the store is empty. Returns the
  /// number of records written.
  pub async fn seed_demo(&self) -> Result<usize> {
    if self.store.count().await.map_err(Error::store)? > 0 {
      return Ok(0);
    }
    let mut written = 0;
    for fir in demo_records() {
      if self.store.insert(&fir).await.map_err(Error::store)? {
        written += 1;
      }
    }
    Ok(written)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub async fn get(&self, id: &str) -> Result<Option<Fir>> {
    self.store.get(id).await.map_err(Error::store)
  }

  /// Newest first. Fails with [`Error::InvalidFilter`] before touching the
  /// store if a date or status cannot be parsed.
  pub async fn list(&self, filter: ListFilter) -> Result<Vec<Fir>> {
    let query = filter.into_query()?;
    self.store.list(&query).await.map_err(Error::store)
  }

  pub async fn statistics(&self) -> Result<FirStatistics> {
    let all = self
      .store
      .list(&FirQuery::default())
      .await
      .map_err(Error::store)?;
    Ok(FirStatistics::from_records(&all))
  }
}
