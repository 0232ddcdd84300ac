//! Aggregation over the full record set: status counts plus breakdowns by
//! location, officer, and month.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::fir::{Fir, FirStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCount {
  pub location: String,
  pub count:    usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficerCount {
  pub officer: String,
  pub count:   usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
  /// Short month name and year, e.g. `Nov 2023`.
  pub month: String,
  pub count: usize,
}

/// The `/statistics` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirStatistics {
  pub pending_count:       usize,
  pub investigating_count: usize,
  pub closed_count:        usize,
  /// Count descending; ties alphabetical.
  pub firs_by_location:    Vec<LocationCount>,
  /// Count descending; ties alphabetical.
  pub firs_by_officer:     Vec<OfficerCount>,
  /// Chronological.
  pub firs_by_month:       Vec<MonthCount>,
}

impl FirStatistics {
  pub fn from_records(records: &[Fir]) -> Self {
    let count_status =
      |status: FirStatus| records.iter().filter(|f| f.status == status).count();

    let mut by_location: BTreeMap<&str, usize> = BTreeMap::new();
    let mut by_officer: BTreeMap<&str, usize> = BTreeMap::new();
    let mut by_month: BTreeMap<(i32, u32), usize> = BTreeMap::new();

    for fir in records {
      *by_location.entry(location_key(&fir.location)).or_default() += 1;
      *by_officer.entry(fir.police_name.as_str()).or_default() += 1;
      if let Some(dt) = DateTime::from_timestamp_millis(fir.timestamp) {
        *by_month.entry((dt.year(), dt.month())).or_default() += 1;
      }
    }

    Self {
      pending_count:       count_status(FirStatus::Pending),
      investigating_count: count_status(FirStatus::Investigating),
      closed_count:        count_status(FirStatus::Closed),
      firs_by_location:    ranked(by_location)
        .into_iter()
        .map(|(location, count)| LocationCount { location, count })
        .collect(),
      firs_by_officer:     ranked(by_officer)
        .into_iter()
        .map(|(officer, count)| OfficerCount { officer, count })
        .collect(),
      firs_by_month:       by_month
        .into_iter()
        .map(|((year, month), count)| MonthCount {
          month: month_label(year, month),
          count,
        })
        .collect(),
    }
  }

  /// Sum of the three status counts.
  pub fn total(&self) -> usize {
    self.pending_count + self.investigating_count + self.closed_count
  }
}

/// The "city" of a free-text address: the trimmed text after the last comma,
/// or the whole trimmed string when that segment is empty.
pub fn location_key(location: &str) -> &str {
  let last = location.rsplit(',').next().unwrap_or_default().trim();
  if last.is_empty() { location.trim() } else { last }
}

fn month_label(year: i32, month: u32) -> String {
  NaiveDate::from_ymd_opt(year, month, 1)
    .map(|d| d.format("%b %Y").to_string())
    .unwrap_or_else(|| format!("{month:02}/{year}"))
}

/// Alphabetical input, stable sort by count descending.
fn ranked(groups: BTreeMap<&str, usize>) -> Vec<(String, usize)> {
  let mut entries: Vec<(String, usize)> =
    groups.into_iter().map(|(k, n)| (k.to_owned(), n)).collect();
  entries.sort_by(|a, b| b.1.cmp(&a.1));
  entries
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::seed::demo_records;

  fn with(mut fir: Fir, location: &str, officer: &str, ts: i64) -> Fir {
    fir.location = location.into();
    fir.police_name = officer.into();
    fir.timestamp = ts;
    fir
  }

  #[test]
  fn location_key_takes_last_segment() {
    assert_eq!(location_key("MG Road, Bangalore"), "Bangalore");
    assert_eq!(location_key("12 Park St, Kolkata ,  West Bengal "), "West Bengal");
    assert_eq!(location_key("Connaught Place"), "Connaught Place");
    assert_eq!(location_key("Juhu Beach, "), "Juhu Beach,");
  }

  #[test]
  fn empty_store_yields_empty_statistics() {
    assert_eq!(FirStatistics::from_records(&[]), FirStatistics::default());
  }

  #[test]
  fn demo_records_aggregate() {
    let records = demo_records();
    let stats = FirStatistics::from_records(&records);

    assert_eq!(stats.pending_count, 1);
    assert_eq!(stats.investigating_count, 2);
    assert_eq!(stats.closed_count, 0);
    assert_eq!(stats.total(), records.len());

    let officer_total: usize = stats.firs_by_officer.iter().map(|o| o.count).sum();
    assert_eq!(officer_total, records.len());

    let months: Vec<_> = stats.firs_by_month.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(months, ["Oct 2023", "Nov 2023"]);
    assert_eq!(stats.firs_by_month[1].count, 2);
  }

  #[test]
  fn groups_sorted_by_count_then_name() {
    let base = demo_records().remove(0);
    let records = vec![
      with(base.clone(), "Linking Rd, Mumbai", "Officer B", 1_700_000_000_000),
      with(base.clone(), "MG Road, Bangalore", "Officer A", 1_700_000_000_000),
      with(base.clone(), "Colaba, Mumbai", "Officer B", 1_700_000_000_000),
      with(base, "Indiranagar, Bangalore", "Officer C", 1_700_000_000_000),
    ];
    let stats = FirStatistics::from_records(&records);

    let locs: Vec<_> = stats
      .firs_by_location
      .iter()
      .map(|l| (l.location.as_str(), l.count))
      .collect();
    assert_eq!(locs, [("Bangalore", 2), ("Mumbai", 2)]);

    let officers: Vec<_> = stats
      .firs_by_officer
      .iter()
      .map(|o| (o.officer.as_str(), o.count))
      .collect();
    assert_eq!(officers, [("Officer B", 2), ("Officer A", 1), ("Officer C", 1)]);
  }

  #[test]
  fn months_are_chronological_across_years() {
    let base = demo_records().remove(0);
    let records = vec![
      with(base.clone(), "x", "o", 1_706_745_600_000), // Feb 2024
      with(base.clone(), "x", "o", 1_701_388_800_000), // Dec 2023
      with(base, "x", "o", 1_675_209_600_000),         // Feb 2023
    ];
    let stats = FirStatistics::from_records(&records);
    let months: Vec<_> = stats.firs_by_month.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(months, ["Feb 2023", "Dec 2023", "Feb 2024"]);
  }
}
