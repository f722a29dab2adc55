// ==========================================
// Medication Shortage CDS Service - dataset update API
// ==========================================
// Drives one refresh cycle: fetch the portal export, import it into the
// ledger, clean up. Cycles serialize against each other; readers keep
// answering from the pre-commit ledger until the replace commits.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::download::ExportFetcher;
use crate::importer::ShortageImporter;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of one successful refresh cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReport {
    pub status: String,
    pub message: String,
    pub inserted: usize,
    pub skipped: usize,
    pub details: Vec<String>,
}

pub struct UpdateApi {
    fetcher: Arc<dyn ExportFetcher>,
    importer: Arc<ShortageImporter>,
    cycle_lock: tokio::sync::Mutex<()>,
}

impl UpdateApi {
    pub fn new(fetcher: Arc<dyn ExportFetcher>, importer: Arc<ShortageImporter>) -> Self {
        Self {
            fetcher,
            importer,
            cycle_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Run one download-and-import cycle.
    ///
    /// The step log is carried through success and failure responses alike,
    /// so the caller can always see how far the cycle got.
    pub async fn run(&self) -> ApiResult<UpdateReport> {
        let _cycle = self.cycle_lock.lock().await;
        let mut log: Vec<String> = Vec::new();

        info!("refresh cycle started");

        // === step 1: download ===
        let export_path = match self.fetcher.fetch(&mut log).await {
            Ok(path) => path,
            Err(e) => {
                log.push(format!("download failed: {}", e));
                return Err(ApiError::DownloadFailed {
                    message: e.to_string(),
                    log,
                });
            }
        };
        log.push("download complete, starting ledger import".to_string());

        // === step 2: import ===
        let report = match self.importer.import_from_file(&export_path) {
            Ok(report) => report,
            Err(e) => {
                log.push(format!("ledger import failed: {}", e));
                return Err(ApiError::ImportFailed {
                    message: e.to_string(),
                    log,
                });
            }
        };
        log.extend(report.issue_messages());
        log.push(format!(
            "imported {} ledger records ({} rows skipped)",
            report.inserted, report.skipped
        ));

        // === step 3: cleanup ===
        match std::fs::remove_file(&export_path) {
            Ok(()) => log.push("temporary export removed".to_string()),
            Err(e) => {
                warn!(path = %export_path.display(), error = %e, "temporary export could not be removed");
                log.push(format!("temporary export could not be removed: {}", e));
            }
        }

        info!(inserted = report.inserted, skipped = report.skipped, "refresh cycle finished");

        Ok(UpdateReport {
            status: "success".to_string(),
            message: "download and ledger import completed".to_string(),
            inserted: report.inserted,
            skipped: report.skipped,
            details: log,
        })
    }
}
