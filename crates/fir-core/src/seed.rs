//! Demonstration records loaded by `server --seed-demo` into an empty store.

use crate::fir::{Evidence, EvidenceKind, Fir, FirStatus};

#[allow(clippy::too_many_arguments)]
fn record(
  id: &str,
  title: &str,
  description: &str,
  person: &str,
  offence: &str,
  officer: (&str, &str, &str),
  witness: &str,
  location: &str,
  date_time: &str,
  status: FirStatus,
  timestamp: i64,
  ledger: (&str, &str),
  evidence: Vec<Evidence>,
) -> Fir {
  let (police_name, police_batch_id, police_station_name) = officer;
  Fir {
    id: id.into(),
    title: title.into(),
    description: description.into(),
    victim_name: person.into(),
    complainant_name: person.into(),
    nature_of_offence: offence.into(),
    police_name: police_name.into(),
    police_batch_id: police_batch_id.into(),
    police_station_name: police_station_name.into(),
    witness_name: witness.into(),
    location: location.into(),
    date_time: date_time.into(),
    status,
    is_verified: true,
    timestamp,
    ipfs_cid: Some(ledger.0.into()),
    blockchain_tx_hash: Some(ledger.1.into()),
    evidence: Some(evidence),
  }
}

fn evidence(kind: EvidenceKind, content: &str, description: &str, timestamp: i64) -> Evidence {
  Evidence {
    kind,
    content: content.into(),
    description: description.into(),
    timestamp,
  }
}

/// Three records spanning October and November 2023.
pub fn demo_records() -> Vec<Fir> {
  vec![
    record(
      "FIR-2023-001",
      "Stolen Vehicle Report",
      "My car was stolen from the shopping mall parking lot",
      "John Doe",
      "Theft",
      ("Officer James Wilson", "PB-2345", "Central Police Station"),
      "Sarah Johnson",
      "Central Mall, New Delhi",
      "2023-10-15T14:30",
      FirStatus::Investigating,
      1_697_379_000_000,
      (
        "QmX7TJmx5xW8zzF9eSHUQZvCq6c2tpk95Gbq3xhMGxPHWr",
        "0x7f5d96c42e3d3b11f62b41b26e8b2ac98329c81dbca6e48f3d49feb4d13469a2",
      ),
      vec![
        evidence(
          EvidenceKind::Text,
          "Witness statement: I saw a tall man with a black jacket near the vehicle around 2:15 PM.",
          "Witness statement from Sarah Johnson",
          1_697_379_600_000,
        ),
        evidence(
          EvidenceKind::Image,
          "https://example.com/cctv-image-1.jpg",
          "CCTV image from mall entrance",
          1_697_379_000_000,
        ),
      ],
    ),
    record(
      "FIR-2023-002",
      "Apartment Break-in",
      "My apartment was broken into while I was at work",
      "Jane Smith",
      "Burglary",
      ("Officer Robert Chen", "PB-3456", "West District Police Station"),
      "Mark Thompson",
      "Green Heights, Mumbai",
      "2023-11-02T08:15",
      FirStatus::Pending,
      1_698_902_100_000,
      (
        "QmUJf2aeSV2vxKfS1K8HAwwgHj8ya71uEA96nYKWr1XG2M",
        "0x3a1b2c3d4e5f67890123456789abcdef0123456789abcdef0123456789abcdef",
      ),
      vec![evidence(
        EvidenceKind::Text,
        "Fingerprint analysis shows three distinct prints on the door handle.",
        "Forensic report",
        1_698_912_000_000,
      )],
    ),
    record(
      "FIR-2023-003",
      "Mobile Phone Snatching",
      "My phone was snatched by a person on motorcycle",
      "Raj Kumar",
      "Robbery",
      ("Officer Priya Singh", "PB-4567", "South Zone Police Station"),
      "Anand Verma",
      "MG Road, Bangalore",
      "2023-11-10T19:45",
      FirStatus::Investigating,
      1_699_636_500_000,
      (
        "QmZ9VxZEEGLBzMYzQnY5q6a54GJy6aMNTXJ6zwrBBqQS1d",
        "0xdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789abc",
      ),
      vec![
        evidence(
          EvidenceKind::Image,
          "https://example.com/traffic-cam-1.jpg",
          "Traffic camera footage showing suspect on motorcycle",
          1_699_636_800_000,
        ),
        evidence(
          EvidenceKind::Video,
          "https://example.com/cctv-clip-1.mp4",
          "CCTV clip from nearby shop",
          1_699_637_000_000,
        ),
      ],
    ),
  ]
}
