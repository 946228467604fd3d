//! SQL schema for the potty store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- The implicit rowid gives list() its insertion order.
CREATE TABLE IF NOT EXISTS potties (
    id        TEXT PRIMARY KEY,
    name      TEXT,
    image     TEXT,
    comments  TEXT,
    posted    TEXT NOT NULL    -- ISO 8601 UTC; server-assigned, never updated
);

PRAGMA user_version = 1;
";
