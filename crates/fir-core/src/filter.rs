//! Raw list filters as they arrive on the query string, and their conversion
//! into a typed [`FirQuery`].

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, fir::FirStatus, store::FirQuery};

/// Untyped list filters. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilter {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub location:    Option<String>,
  /// `YYYY-MM-DD` or RFC 3339; inclusive.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub start_date:  Option<String>,
  /// `YYYY-MM-DD` or RFC 3339; the whole named day is included.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub end_date:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub police_name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status:      Option<String>,
}

impl ListFilter {
  /// Parse dates and status into a [`FirQuery`].
  ///
  /// The end bound is `end_date + 24h`, exclusive, so a record filed at any
  /// moment of the end day is returned.
  pub fn into_query(self) -> Result<FirQuery> {
    let recorded_from = non_empty(self.start_date)
      .map(|s| parse_instant(&s))
      .transpose()?;

    let recorded_before = non_empty(self.end_date)
      .map(|s| parse_instant(&s).map(|ms| ms + TimeDelta::days(1).num_milliseconds()))
      .transpose()?;

    let status = non_empty(self.status)
      .map(|s| {
        s.parse::<FirStatus>()
          .map_err(|_| Error::InvalidFilter(format!("unknown status {s:?}")))
      })
      .transpose()?;

    Ok(FirQuery {
      location: non_empty(self.location),
      police_name: non_empty(self.police_name),
      status,
      recorded_from,
      recorded_before,
    })
  }
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|s| !s.trim().is_empty())
}

/// A bare date is read as UTC midnight; anything else must be RFC 3339.
fn parse_instant(s: &str) -> Result<i64> {
  let s = s.trim();
  if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
    return Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis());
  }
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.timestamp_millis())
    .map_err(|_| Error::InvalidFilter(format!("invalid date {s:?}")))
}
