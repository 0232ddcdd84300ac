//! The `FirStore` trait and its query type.
//!
//! Implemented by storage backends (`fir-store-sqlite`, [`crate::memory`]).
//! The record service and the HTTP layer depend on this abstraction only.

use std::future::Future;

use crate::fir::{Fir, FirStatus};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Typed parameters for [`FirStore::list`]. Every field is optional; set
/// fields combine with logical AND.
///
/// Built from raw query-string values by
/// [`ListFilter::into_query`](crate::filter::ListFilter::into_query).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirQuery {
  /// Case-insensitive substring of `location`.
  pub location:        Option<String>,
  /// Case-insensitive substring of `police_name`.
  pub police_name:     Option<String>,
  pub status:          Option<FirStatus>,
  /// Inclusive lower bound on `timestamp` (epoch ms).
  pub recorded_from:   Option<i64>,
  /// Exclusive upper bound on `timestamp` (epoch ms).
  pub recorded_before: Option<i64>,
}

impl FirQuery {
  /// Evaluate the query against a single record in memory.
  pub fn matches(&self, fir: &Fir) -> bool {
    if let Some(loc) = &self.location
      && !contains_ignore_case(&fir.location, loc)
    {
      return false;
    }
    if let Some(name) = &self.police_name
      && !contains_ignore_case(&fir.police_name, name)
    {
      return false;
    }
    if self.status.is_some_and(|s| s != fir.status) {
      return false;
    }
    if self.recorded_from.is_some_and(|from| fir.timestamp < from) {
      return false;
    }
    if self.recorded_before.is_some_and(|before| fir.timestamp >= before) {
      return false;
    }
    true
  }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
  haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a FIR record store backend.
///
/// Records are never deleted. The only mutation after insertion is
/// [`mark_verified`](FirStore::mark_verified).
pub trait FirStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert `fir` unless a record with the same `id` already exists.
  ///
  /// Returns `false` (and writes nothing) on an id collision.
  fn insert<'a>(
    &'a self,
    fir: &'a Fir,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Total number of stored records.
  fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Exact match on `id`. Returns `None` if absent.
  fn get<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Fir>, Self::Error>> + Send + 'a;

  /// All records matching `query`, newest (`timestamp` descending) first.
  fn list<'a>(
    &'a self,
    query: &'a FirQuery,
  ) -> impl Future<Output = Result<Vec<Fir>, Self::Error>> + Send + 'a;

  /// Set `is_verified = true` on the record with this `id`.
  ///
  /// Returns `false` if no such record exists.
  fn mark_verified<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
