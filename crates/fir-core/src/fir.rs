//! FIR record types: the single entity managed by the ledger.
//!
//! Field names serialise in camelCase so the JSON shape matches what the web
//! front end has always sent and received.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{Error, Result};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Investigation status. Any value may be replaced by any other; there is no
/// transition graph.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
  EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FirStatus {
  Pending,
  Investigating,
  Closed,
}

// ─── Evidence ────────────────────────────────────────────────────────────────

/// The medium of an evidence item.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EvidenceKind {
  Text,
  Image,
  Video,
}

/// An embedded evidence item. Not independently addressable; immutable once
/// the owning record has been filed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
  #[serde(rename = "type")]
  pub kind:        EvidenceKind,
  /// Raw text for [`EvidenceKind::Text`], otherwise a URL.
  pub content:     String,
  pub description: String,
  /// Capture time, epoch milliseconds.
  pub timestamp:   i64,
}

// ─── Fir ─────────────────────────────────────────────────────────────────────

/// A persisted First Information Report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fir {
  /// `FIR-<year>-<sequence>`; server-assigned.
  pub id:                  String,
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
  /// Incident date/time exactly as submitted (e.g. `2023-10-15T14:30`).
  pub date_time:           String,
  pub status:              FirStatus,
  pub is_verified:         bool,
  /// Creation time, epoch milliseconds.
  pub timestamp:           i64,
  #[serde(rename = "ipfsCID", default, skip_serializing_if = "Option::is_none")]
  pub ipfs_cid:            Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub blockchain_tx_hash:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub evidence:            Option<Vec<Evidence>>,
}

impl Fir {
  /// Build a record from a filing request plus the server-assigned fields.
  /// `is_verified` is always `true` at creation.
  pub fn from_new(
    input: NewFir,
    id: String,
    timestamp: i64,
    ipfs_cid: String,
    blockchain_tx_hash: String,
  ) -> Self {
    Self {
      id,
      title: input.title,
      description: input.description,
      victim_name: input.victim_name,
      complainant_name: input.complainant_name,
      nature_of_offence: input.nature_of_offence,
      police_name: input.police_name,
      police_batch_id: input.police_batch_id,
      police_station_name: input.police_station_name,
      witness_name: input.witness_name,
      location: input.location,
      date_time: input.date_time,
      status: input.status,
      is_verified: true,
      timestamp,
      ipfs_cid: Some(ipfs_cid),
      blockchain_tx_hash: Some(blockchain_tx_hash),
      evidence: input.evidence,
    }
  }

  /// The same record with its evidence list removed.
  pub fn without_evidence(mut self) -> Self {
    self.evidence = None;
    self
  }
}

// ─── NewFir ──────────────────────────────────────────────────────────────────

/// A filing request: a [`Fir`] minus every server-assigned field.
///
/// Unknown fields (including a client-supplied `id`) are ignored on
/// deserialisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFir {
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
  pub status:              FirStatus,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub evidence:            Option<Vec<Evidence>>,
}

impl NewFir {
  /// Reject requests with a blank required field. Evidence is optional, but
  /// every submitted item must carry content.
  pub fn validate(&self) -> Result<()> {
    let required = [
      ("title", &self.title),
      ("description", &self.description),
      ("victimName", &self.victim_name),
      ("complainantName", &self.complainant_name),
      ("natureOfOffence", &self.nature_of_offence),
      ("policeName", &self.police_name),
      ("policeBatchId", &self.police_batch_id),
      ("policeStationName", &self.police_station_name),
      ("witnessName", &self.witness_name),
      ("location", &self.location),
      ("dateTime", &self.date_time),
    ];

    if let Some((field, _)) =
      required.iter().find(|(_, value)| value.trim().is_empty())
    {
      return Err(Error::Validation(format!("{field} is required")));
    }

    for (i, item) in self.evidence.iter().flatten().enumerate() {
      if item.content.trim().is_empty() {
        return Err(Error::Validation(format!(
          "evidence[{i}].content is required"
        )));
      }
    }

    Ok(())
  }
}
