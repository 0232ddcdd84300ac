//! [`SqliteStore`], the SQLite implementation of [`FirStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, types::Value};

use fir_core::{
  fir::Fir,
  store::{FirQuery, FirStore},
};

use crate::{
  Result,
  encode::{
    FOLD_FN, RawFir, encode_evidence, encode_status, like_contains,
    register_fold,
  },
  schema::{FIR_COLUMNS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A FIR store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        register_fold(conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Build the `WHERE` clause and its positional parameters for `query`.
fn where_clause(query: &FirQuery) -> (String, Vec<Value>) {
  let mut conds: Vec<String> = Vec::new();
  let mut params: Vec<Value> = Vec::new();

  if let Some(loc) = &query.location {
    params.push(Value::Text(like_contains(loc)));
    conds.push(format!(
      "{FOLD_FN}(location) LIKE ?{} ESCAPE '\\'",
      params.len()
    ));
  }
  if let Some(name) = &query.police_name {
    params.push(Value::Text(like_contains(name)));
    conds.push(format!(
      "{FOLD_FN}(police_name) LIKE ?{} ESCAPE '\\'",
      params.len()
    ));
  }
  if let Some(status) = query.status {
    params.push(Value::Text(encode_status(status)));
    conds.push(format!("status = ?{}", params.len()));
  }
  if let Some(from) = query.recorded_from {
    params.push(Value::Integer(from));
    conds.push(format!("timestamp >= ?{}", params.len()));
  }
  if let Some(before) = query.recorded_before {
    params.push(Value::Integer(before));
    conds.push(format!("timestamp < ?{}", params.len()));
  }

  let clause = if conds.is_empty() {
    String::new()
  } else {
    format!("WHERE {}", conds.join(" AND "))
  };
  (clause, params)
}

// ─── FirStore impl ───────────────────────────────────────────────────────────

impl FirStore for SqliteStore {
  type Error = crate::Error;

  async fn insert(&self, fir: &Fir) -> Result<bool> {
    let evidence = encode_evidence(fir.evidence.as_deref())?;
    let status = encode_status(fir.status);
    let fir = fir.clone();

    let inserted = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "INSERT INTO firs (
             fir_id, title, description, victim_name, complainant_name,
             nature_of_offence, police_name, police_batch_id,
             police_station_name, witness_name, location, date_time,
             status, is_verified, timestamp, ipfs_cid, blockchain_tx_hash,
             evidence
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                     ?13, ?14, ?15, ?16, ?17, ?18)
           ON CONFLICT(fir_id) DO NOTHING",
          rusqlite::params![
            fir.id,
            fir.title,
            fir.description,
            fir.victim_name,
            fir.complainant_name,
            fir.nature_of_offence,
            fir.police_name,
            fir.police_batch_id,
            fir.police_station_name,
            fir.witness_name,
            fir.location,
            fir.date_time,
            status,
            fir.is_verified,
            fir.timestamp,
            fir.ipfs_cid,
            fir.blockchain_tx_hash,
            evidence,
          ],
        )?;
        Ok(changed == 1)
      })
      .await?;

    Ok(inserted)
  }

  async fn count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM firs", [], |r| r.get(0))?)
      })
      .await?;
    Ok(n.max(0) as u64)
  }

  async fn get(&self, id: &str) -> Result<Option<Fir>> {
    let id = id.to_owned();

    let raw: Option<RawFir> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {FIR_COLUMNS} FROM firs WHERE fir_id = ?1
                 ORDER BY rowid LIMIT 1"
              ),
              rusqlite::params![id],
              RawFir::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawFir::into_fir).transpose()
  }

  async fn list(&self, query: &FirQuery) -> Result<Vec<Fir>> {
    let (clause, params) = where_clause(query);

    let raws: Vec<RawFir> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {FIR_COLUMNS} FROM firs {clause}
           ORDER BY timestamp DESC, rowid DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawFir::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFir::into_fir).collect()
  }

  async fn mark_verified(&self, id: &str) -> Result<bool> {
    let id = id.to_owned();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE firs SET is_verified = 1 WHERE fir_id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn where_clause_numbers_params_in_order() {
    let query = FirQuery {
      police_name: Some("Singh".into()),
      recorded_before: Some(10),
      ..Default::default()
    };
    let (clause, params) = where_clause(&query);
    assert_eq!(
      clause,
      "WHERE fir_fold(police_name) LIKE ?1 ESCAPE '\\' AND timestamp < ?2"
    );
    assert_eq!(params, [Value::Text("%singh%".into()), Value::Integer(10)]);
  }

  #[test]
  fn empty_query_has_no_where() {
    let (clause, params) = where_clause(&FirQuery::default());
    assert!(clause.is_empty());
    assert!(params.is_empty());
  }
}
