//! Encoding and decoding helpers between [`Fir`] and its SQLite row.
//!
//! Enums are stored as their lowercase names. The evidence list is stored as
//! a compact JSON array, or NULL when the record carries none.

use fir_core::fir::{Evidence, Fir, FirStatus};
use rusqlite::functions::FunctionFlags;

use crate::{Error, Result};

// ─── Status ──────────────────────────────────────────────────────────────────

pub fn encode_status(s: FirStatus) -> String { s.as_ref().to_owned() }

pub fn decode_status(s: &str) -> Result<FirStatus> {
  s.parse().map_err(|_| Error::UnknownValue {
    column: "status",
    value:  s.to_owned(),
  })
}

// ─── Evidence ────────────────────────────────────────────────────────────────

pub fn encode_evidence(evidence: Option<&[Evidence]>) -> Result<Option<String>> {
  evidence
    .map(serde_json::to_string)
    .transpose()
    .map_err(Error::from)
}

pub fn decode_evidence(s: Option<&str>) -> Result<Option<Vec<Evidence>>> {
  s.map(serde_json::from_str).transpose().map_err(Error::from)
}

// ─── Escaping ────────────────────────────────────────────────────────────────

/// A `LIKE` pattern matching the case-folded `needle` anywhere, with `%`, `_`
/// and `\` escaped. Use with `ESCAPE '\'` against a [`FOLD_FN`] column.
pub fn like_contains(needle: &str) -> String {
  let mut pattern = String::with_capacity(needle.len() + 2);
  pattern.push('%');
  for c in needle.to_lowercase().chars() {
    if matches!(c, '%' | '_' | '\\') {
      pattern.push('\\');
    }
    pattern.push(c);
  }
  pattern.push('%');
  pattern
}

// ─── Case folding ────────────────────────────────────────────────────────────

/// SQL name of the Unicode lowercase function registered on every connection.
/// SQLite's own `LIKE` only folds ASCII.
pub const FOLD_FN: &str = "fir_fold";

pub fn register_fold(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    FOLD_FN,
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|s| s.to_lowercase())),
  )
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `firs` row.
pub struct RawFir {
  pub fir_id:              String,
  pub title:               String,
  pub description:         String,
  pub victim_name:         String,
  pub complainant_name:    String,
  pub nature_of_offence:   String,
  pub police_name:         String,
  pub police_batch_id:     String,
  pub police_station_name: String,
  pub witness_name:        String,
  pub location:            String,
  pub date_time:           String,
  pub status:              String,
  pub is_verified:         bool,
  pub timestamp:           i64,
  pub ipfs_cid:            Option<String>,
  pub blockchain_tx_hash:  Option<String>,
  pub evidence:            Option<String>,
}

impl RawFir {
  /// Read a row selected with [`FIR_COLUMNS`](crate::schema::FIR_COLUMNS).
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      fir_id:              row.get(0)?,
      title:               row.get(1)?,
      description:         row.get(2)?,
      victim_name:         row.get(3)?,
      complainant_name:    row.get(4)?,
      nature_of_offence:   row.get(5)?,
      police_name:         row.get(6)?,
      police_batch_id:     row.get(7)?,
      police_station_name: row.get(8)?,
      witness_name:        row.get(9)?,
      location:            row.get(10)?,
      date_time:           row.get(11)?,
      status:              row.get(12)?,
      is_verified:         row.get(13)?,
      timestamp:           row.get(14)?,
      ipfs_cid:            row.get(15)?,
      blockchain_tx_hash:  row.get(16)?,
      evidence:            row.get(17)?,
    })
  }

  pub fn into_fir(self) -> Result<Fir> {
    let status = decode_status(&self.status)?;
    let evidence = decode_evidence(self.evidence.as_deref())?;

    Ok(Fir {
      id: self.fir_id,
      title: self.title,
      description: self.description,
      victim_name: self.victim_name,
      complainant_name: self.complainant_name,
      nature_of_offence: self.nature_of_offence,
      police_name: self.police_name,
      police_batch_id: self.police_batch_id,
      police_station_name: self.police_station_name,
      witness_name: self.witness_name,
      location: self.location,
      date_time: self.date_time,
      status,
      is_verified: self.is_verified,
      timestamp: self.timestamp,
      ipfs_cid: self.ipfs_cid,
      blockchain_tx_hash: self.blockchain_tx_hash,
      evidence,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn like_pattern_escapes_wildcards() {
    assert_eq!(like_contains("MG Road"), "%mg road%");
    assert_eq!(like_contains("MÜNCHEN"), "%münchen%");
    assert_eq!(like_contains("50%_off\\"), "%50\\%\\_off\\\\%");
  }

  #[test]
  fn status_roundtrip_and_unknown() {
    for s in [FirStatus::Pending, FirStatus::Investigating, FirStatus::Closed] {
      assert_eq!(decode_status(&encode_status(s)).unwrap(), s);
    }
    assert_eq!(encode_status(FirStatus::Investigating), "investigating");
    assert!(matches!(
      decode_status("archived"),
      Err(Error::UnknownValue { column: "status", .. })
    ));
  }

  #[test]
  fn absent_evidence_stays_null() {
    assert_eq!(encode_evidence(None).unwrap(), None);
    assert_eq!(decode_evidence(None).unwrap(), None);
  }
}
