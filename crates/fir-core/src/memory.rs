//! [`MemoryStore`], a process-local [`FirStore`] for tests and demos.

use std::convert::Infallible;

use tokio::sync::RwLock;

use crate::{
  fir::Fir,
  store::{FirQuery, FirStore},
};

/// An in-memory record store. Records live for the lifetime of the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
  records: RwLock<Vec<Fir>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Start from an existing set of records, kept in the given order.
  pub fn with_records(records: Vec<Fir>) -> Self {
    Self { records: RwLock::new(records) }
  }
}

impl FirStore for MemoryStore {
  type Error = Infallible;

  async fn insert(&self, fir: &Fir) -> Result<bool, Infallible> {
    let mut records = self.records.write().await;
    if records.iter().any(|r| r.id == fir.id) {
      return Ok(false);
    }
    records.push(fir.clone());
    Ok(true)
  }

  async fn count(&self) -> Result<u64, Infallible> {
    Ok(self.records.read().await.len() as u64)
  }

  async fn get(&self, id: &str) -> Result<Option<Fir>, Infallible> {
    Ok(self.records.read().await.iter().find(|r| r.id == id).cloned())
  }

  async fn list(&self, query: &FirQuery) -> Result<Vec<Fir>, Infallible> {
    let mut matched: Vec<Fir> = self
      .records
      .read()
      .await
      .iter()
      .rev()
      .filter(|r| query.matches(r))
      .cloned()
      .collect();
    // Stable over the reversed input: equal timestamps list the later insert first.
    matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(matched)
  }

  async fn mark_verified(&self, id: &str) -> Result<bool, Infallible> {
    let mut records = self.records.write().await;
    match records.iter_mut().find(|r| r.id == id) {
      Some(fir) => {
        fir.is_verified = true;
        Ok(true)
      }
      None => Ok(false),
    }
  }
}
