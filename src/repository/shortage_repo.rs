use crate::db::open_sqlite_connection;
use crate::domain::medication::ShortageRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// ShortageLedgerRepository - shortage ledger access
// ==========================================
/// Shortage ledger repository.
/// Owns access to the `shortage` table; no resolution logic lives here.
pub struct ShortageLedgerRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ShortageLedgerRepository {
    /// Open a new repository against the database at `db_path`.
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Build a repository over an existing shared connection.
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Existence check: does at least one ledger entry carry this exact name?
    ///
    /// Case-sensitive, no trimming. The status text is deliberately ignored.
    pub fn exists_by_name(&self, name: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT 1 FROM shortage WHERE name = ?1 LIMIT 1")?;
        let found = stmt.exists(params![name])?;
        Ok(found)
    }

    /// All ledger entries for an exact name, in storage order.
    pub fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<ShortageRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                name, usage_text, status_text, numeric_detail, reporter,
                pzn_unavailable, pzn_restricted, pzn_restored,
                reported_at, changed_at
            FROM shortage
            WHERE name = ?1
            ORDER BY id
            "#,
        )?;

        let records = stmt
            .query_map(params![name], |row| {
                Ok(ShortageRecord {
                    name: row.get(0)?,
                    usage_text: row.get(1)?,
                    status_text: row.get(2)?,
                    numeric_detail: row.get(3)?,
                    reporter: row.get(4)?,
                    pzn_unavailable: row.get(5)?,
                    pzn_restricted: row.get(6)?,
                    pzn_restored: row.get(7)?,
                    reported_at: row.get(8)?,
                    changed_at: row.get(9)?,
                })
            })?
            .collect::<SqliteResult<Vec<ShortageRecord>>>()?;

        Ok(records)
    }

    /// Number of ledger entries currently stored.
    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM shortage", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    /// Replace the entire ledger with `records` in one transaction.
    ///
    /// Readers never observe a half-cleared set: the DELETE and all INSERTs
    /// commit atomically, or the previous ledger stays in place.
    pub fn replace_all(&self, records: &[ShortageRecord]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute("DELETE FROM shortage", [])?;

        let mut inserted = 0;
        for record in records {
            tx.execute(
                r#"
                INSERT INTO shortage (
                    name, usage_text, status_text, numeric_detail, reporter,
                    pzn_unavailable, pzn_restricted, pzn_restored,
                    reported_at, changed_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
                params![
                    record.name,
                    record.usage_text,
                    record.status_text,
                    record.numeric_detail,
                    record.reporter,
                    record.pzn_unavailable,
                    record.pzn_restricted,
                    record.pzn_restored,
                    record.reported_at,
                    record.changed_at,
                ],
            )?;
            inserted += 1;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(inserted)
    }
}
