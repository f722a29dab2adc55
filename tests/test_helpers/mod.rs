// ==========================================
// Shared test helpers
// ==========================================
#![allow(dead_code)]

use async_trait::async_trait;
use rusqlite::params;
use shortage_cds::db;
use shortage_cds::domain::MedicationRecord;
use shortage_cds::download::{DownloadResult, ExportFetcher};
use shortage_cds::hooks::{CdsHookRequest, HookDispatchOutcome, HookDispatcher};
use shortage_cds::repository::MedicationRegistryRepository;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Scratch database with the dataset schema in place.
pub fn create_test_db() -> (NamedTempFile, String) {
    let temp = NamedTempFile::new().expect("failed to create temp db file");
    let path = temp.path().to_string_lossy().to_string();
    let conn = db::open_sqlite_connection(&path).expect("failed to open test db");
    db::ensure_schema(&conn).expect("failed to create schema");
    (temp, path)
}

/// Scratch database WITHOUT the schema. Queries against it fail, which is
/// how tests simulate an unreachable dataset store.
pub fn create_bare_db() -> (NamedTempFile, String) {
    let temp = NamedTempFile::new().expect("failed to create temp db file");
    let path = temp.path().to_string_lossy().to_string();
    db::open_sqlite_connection(&path).expect("failed to open test db");
    (temp, path)
}

/// Seed registry entries: (name, atc_code, registration_id).
pub fn seed_registry(db_path: &str, entries: &[(&str, Option<&str>, Option<&str>)]) {
    let repo = MedicationRegistryRepository::new(db_path).expect("registry repo");
    let records: Vec<MedicationRecord> = entries
        .iter()
        .map(|(name, atc, reg)| MedicationRecord {
            name: name.to_string(),
            atc_code: atc.map(str::to_string),
            registration_id: reg.map(str::to_string),
        })
        .collect();
    repo.upsert_all(&records).expect("seed registry");
}

/// Append minimal ledger entries for the given names (one row each).
pub fn seed_shortage(db_path: &str, names: &[&str]) {
    let conn = db::open_sqlite_connection(db_path).expect("open for seeding");
    for name in names {
        conn.execute(
            r#"
            INSERT INTO shortage (name, usage_text, status_text, reporter)
            VALUES (?1, 'Human', 'eingeschränkt verfügbar', 'Testmelder')
            "#,
            params![name],
        )
        .expect("seed shortage row");
    }
}

// ==========================================
// Collaborator stubs
// ==========================================

/// Records every dispatched hook request and answers 200 with an empty
/// card list.
pub struct StubDispatcher {
    pub sent: Mutex<Vec<CdsHookRequest>>,
}

impl StubDispatcher {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl HookDispatcher for StubDispatcher {
    async fn dispatch(&self, request: &CdsHookRequest) -> HookDispatchOutcome {
        self.sent.lock().unwrap().push(request.clone());
        HookDispatchOutcome {
            target_url: "stub://cds".to_string(),
            status_code: Some(200),
            body: Some(serde_json::json!({ "cards": [] })),
            raw_body: None,
            error: None,
        }
    }

    fn target_url(&self) -> &str {
        "stub://cds"
    }
}

/// Copies a fixture file into place instead of talking to the portal.
pub struct StubFetcher {
    pub source: PathBuf,
    pub target: PathBuf,
}

#[async_trait]
impl ExportFetcher for StubFetcher {
    async fn fetch(&self, log: &mut Vec<String>) -> DownloadResult<PathBuf> {
        std::fs::copy(&self.source, &self.target)?;
        log.push(format!("stub export landed: {}", self.target.display()));
        Ok(self.target.clone())
    }
}

/// Always fails the download with a trigger-budget overrun.
pub struct FailingFetcher;

#[async_trait]
impl ExportFetcher for FailingFetcher {
    async fn fetch(&self, log: &mut Vec<String>) -> DownloadResult<PathBuf> {
        log.push("stub portal never answered".to_string());
        Err(shortage_cds::download::DownloadError::TriggerTimeout)
    }
}
