//! SQL schema for the FIR SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per record. `rowid` is the storage key; `fir_id` is the logical,
-- human-readable identifier and must be unique.
-- Rows are never deleted; only `is_verified` is ever updated.
CREATE TABLE IF NOT EXISTS firs (
    fir_id              TEXT    NOT NULL UNIQUE,
    title               TEXT    NOT NULL,
    description         TEXT    NOT NULL,
    victim_name         TEXT    NOT NULL,
    complainant_name    TEXT    NOT NULL,
    nature_of_offence   TEXT    NOT NULL,
    police_name         TEXT    NOT NULL,
    police_batch_id     TEXT    NOT NULL,
    police_station_name TEXT    NOT NULL,
    witness_name        TEXT    NOT NULL,
    location            TEXT    NOT NULL,
    date_time           TEXT    NOT NULL,
    status              TEXT    NOT NULL,   -- 'pending' | 'investigating' | 'closed'
    is_verified         INTEGER NOT NULL DEFAULT 1,
    timestamp           INTEGER NOT NULL,   -- epoch ms; server-assigned
    ipfs_cid            TEXT,
    blockchain_tx_hash  TEXT,
    evidence            TEXT               -- JSON array or NULL
);

CREATE INDEX IF NOT EXISTS firs_timestamp_idx ON firs(timestamp);
CREATE INDEX IF NOT EXISTS firs_status_idx    ON firs(status);

PRAGMA user_version = 1;
";

/// Column list shared by every `SELECT`; order matches
/// [`RawFir::from_row`](crate::encode::RawFir::from_row).
pub const FIR_COLUMNS: &str = "
    fir_id, title, description, victim_name, complainant_name,
    nature_of_offence, police_name, police_batch_id, police_station_name,
    witness_name, location, date_time, status, is_verified, timestamp,
    ipfs_cid, blockchain_tx_hash, evidence";
