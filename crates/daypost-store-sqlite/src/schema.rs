//! SQL schema for the daypost SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout version for any future migration.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per document key ('subjects', 'posts', 'settings').
-- Every write replaces the whole document.
CREATE TABLE IF NOT EXISTS documents (
    key         TEXT PRIMARY KEY,
    value_json  TEXT NOT NULL,
    updated_at  TEXT NOT NULL    -- ISO 8601 UTC
);

PRAGMA user_version = 1;
";
