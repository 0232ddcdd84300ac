//! Identifier allocation and the synthetic ledger fields.
//!
//! `ipfsCID` and `blockchainTxHash` are random placeholders. Nothing is
//! hashed, stored off-site, or anchored anywhere.

use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How the numeric suffix of a FIR id is chosen.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IdStrategy {
  /// Existing record count plus one.
  #[default]
  Sequential,
  /// A random three-digit number.
  Random,
}

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `FIR-<year>-<seq>`, with the sequence zero-padded to three digits.
pub fn format_fir_id(year: i32, seq: u64) -> String {
  format!("FIR-{year}-{seq:03}")
}

/// A uniformly-ish random suffix in `100..=999`.
pub fn random_sequence() -> u64 {
  100 + u64::from(OsRng.next_u32() % 900)
}

/// Placeholder content identifier: `QmX` followed by 13 base36 characters.
pub fn ipfs_cid() -> String {
  let mut cid = String::with_capacity(16);
  cid.push_str("QmX");
  for _ in 0..13 {
    cid.push(BASE36[(OsRng.next_u32() % 36) as usize] as char);
  }
  cid
}

/// Placeholder transaction hash: `0x` followed by 64 hex digits.
pub fn tx_hash() -> String {
  let mut bytes = [0u8; 32];
  OsRng.fill_bytes(&mut bytes);
  format!("0x{}", hex::encode(bytes))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn id_is_zero_padded() {
    assert_eq!(format_fir_id(2024, 7), "FIR-2024-007");
    assert_eq!(format_fir_id(2024, 1234), "FIR-2024-1234");
  }

  #[test]
  fn random_sequence_stays_three_digits() {
    for _ in 0..500 {
      let n = random_sequence();
      assert!((100..=999).contains(&n), "{n}");
    }
  }

  #[test]
  fn placeholders_have_fixed_prefixes() {
    let cid = ipfs_cid();
    assert!(cid.starts_with("QmX"));
    assert_eq!(cid.len(), 16);
    assert!(cid[3..].bytes().all(|b| BASE36.contains(&b)));

    let tx = tx_hash();
    assert!(tx.starts_with("0x"));
    assert_eq!(tx.len(), 66);
    assert!(tx[2..].bytes().all(|b| b.is_ascii_hexdigit()));
  }

  #[test]
  fn strategy_parses_from_config_strings() {
    assert_eq!("random".parse::<IdStrategy>().unwrap(), IdStrategy::Random);
    assert_eq!(IdStrategy::default().to_string(), "sequential");
  }
}
