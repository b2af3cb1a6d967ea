//! SQL schema for the Lectio SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Single-row-per-key user settings, e.g. the current plan.
CREATE TABLE IF NOT EXISTS settings (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- Day 1 of each plan the user has started.
CREATE TABLE IF NOT EXISTS plan_starts (
    plan       TEXT PRIMARY KEY,   -- 'nt90' | 'ot365' | 'ethiopian'
    start_date TEXT NOT NULL       -- ISO 8601 calendar date
);

-- Completion history is append-only.
CREATE TABLE IF NOT EXISTS completions (
    completion_id TEXT PRIMARY KEY,
    plan          TEXT NOT NULL,
    day           INTEGER NOT NULL CHECK (day >= 1),
    completed_at  TEXT NOT NULL    -- RFC 3339 UTC
);

CREATE INDEX IF NOT EXISTS completions_at_idx ON completions(completed_at);

PRAGMA user_version = 1;
";

/// `settings` key holding the current plan's wire name.
pub const CURRENT_PLAN_KEY: &str = "current_plan";
