use crate::db::open_sqlite_connection;
use crate::domain::medication::MedicationRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

/// Maximum number of typeahead suggestions returned per query.
pub const SUGGESTION_LIMIT: usize = 15;

// ==========================================
// MedicationRegistryRepository - registry access
// ==========================================
/// Medication registry repository.
/// Owns access to the `registry` table (name -> ATC code, registration id).
///
/// Prefix queries use substr() comparisons instead of LIKE: LIKE is
/// case-insensitive for ASCII in SQLite, and both the grouping rule and the
/// typeahead contract are case-sensitive.
pub struct MedicationRegistryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MedicationRegistryRepository {
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

    /// Exact-name lookup.
    pub fn find_by_name(&self, name: &str) -> RepositoryResult<Option<MedicationRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT name, atc_code, registration_id FROM registry WHERE name = ?1",
        )?;

        let result = stmt.query_row(params![name], |row| {
            Ok(MedicationRecord {
                name: row.get(0)?,
                atc_code: row.get(1)?,
                registration_id: row.get(2)?,
            })
        });

        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All registry entries whose ATC code starts with `prefix`, excluding
    /// the entry named `exclude_name`, in storage order.
    pub fn find_by_atc_prefix(
        &self,
        prefix: &str,
        exclude_name: &str,
    ) -> RepositoryResult<Vec<MedicationRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT name, atc_code, registration_id
            FROM registry
            WHERE atc_code IS NOT NULL
              AND substr(atc_code, 1, length(?1)) = ?1
              AND name != ?2
            ORDER BY rowid
            "#,
        )?;

        let records = stmt
            .query_map(params![prefix, exclude_name], |row| {
                Ok(MedicationRecord {
                    name: row.get(0)?,
                    atc_code: row.get(1)?,
                    registration_id: row.get(2)?,
                })
            })?
            .collect::<SqliteResult<Vec<MedicationRecord>>>()?;

        Ok(records)
    }

    /// Case-sensitive name-prefix search for the typeahead surface,
    /// capped at `limit` results.
    pub fn suggest_names(&self, term: &str, limit: usize) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT name
            FROM registry
            WHERE substr(name, 1, length(?1)) = ?1
            ORDER BY rowid
            LIMIT ?2
            "#,
        )?;

        let names = stmt
            .query_map(params![term, limit as i64], |row| row.get::<_, String>(0))?
            .collect::<SqliteResult<Vec<String>>>()?;

        Ok(names)
    }

    /// Bulk upsert of registry entries (deployment seeding and tests).
    ///
    /// One transaction; INSERT OR REPLACE keyed on name.
    pub fn upsert_all(&self, records: &[MedicationRecord]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut count = 0;
        for record in records {
            tx.execute(
                r#"
                INSERT OR REPLACE INTO registry (name, atc_code, registration_id)
                VALUES (?1, ?2, ?3)
                "#,
                params![record.name, record.atc_code, record.registration_id],
            )?;
            count += 1;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(count)
    }
}
