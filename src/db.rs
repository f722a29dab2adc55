// ==========================================
// Medication Shortage CDS Service - SQLite connection init
// ==========================================
// Goals:
// - unify PRAGMA behavior across every Connection::open call
// - unify busy_timeout so concurrent readers don't hit spurious busy errors
//   while an import cycle commits
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// Default busy_timeout (milliseconds)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Apply the unified PRAGMA set to a SQLite connection.
///
/// foreign_keys and busy_timeout are per-connection settings, so every
/// connection has to go through here.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the unified configuration applied.
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Create the dataset tables if they do not exist yet.
///
/// `shortage` is the ledger of reported unavailability events. Names are NOT
/// unique here: one medication can carry several historical entries, and the
/// whole table is replaced per import cycle.
///
/// `registry` maps a medication name to its ATC classification code and
/// registration number. One row per name, written by bulk seeding only.
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS shortage (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            name            TEXT NOT NULL,
            usage_text      TEXT NOT NULL DEFAULT '',
            status_text     TEXT NOT NULL DEFAULT '',
            numeric_detail  REAL,
            reporter        TEXT NOT NULL DEFAULT '',
            pzn_unavailable TEXT NOT NULL DEFAULT '',
            pzn_restricted  TEXT NOT NULL DEFAULT '',
            pzn_restored    TEXT NOT NULL DEFAULT '',
            reported_at     TEXT NOT NULL DEFAULT '',
            changed_at      TEXT NOT NULL DEFAULT ''
        );
        CREATE INDEX IF NOT EXISTS idx_shortage_name ON shortage(name);

        CREATE TABLE IF NOT EXISTS registry (
            name            TEXT PRIMARY KEY,
            atc_code        TEXT,
            registration_id TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_registry_atc ON registry(atc_code);
        "#,
    )
}

/// Check that the dataset tables exist (health probe).
pub fn schema_present(conn: &Connection) -> rusqlite::Result<bool> {
    let shortage: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='shortage' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    let registry: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='registry' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    Ok(shortage && registry)
}
