//! SQL schema for the Quill SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS research_sessions (
    session_id    TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    results_json  TEXT NOT NULL,     -- JSON array of scored keyword results
    keyword_count INTEGER NOT NULL,  -- denormalised so listings skip the blob
    created_at    TEXT NOT NULL,     -- ISO 8601 UTC; store-assigned
    updated_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS favorite_keywords (
    favorite_id TEXT PRIMARY KEY,
    keyword     TEXT NOT NULL UNIQUE,
    notes       TEXT,
    session_id  TEXT REFERENCES research_sessions(session_id) ON DELETE SET NULL,
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS sessions_created_idx  ON research_sessions(created_at);
CREATE INDEX IF NOT EXISTS favorites_created_idx ON favorite_keywords(created_at);

PRAGMA user_version = 1;
";
