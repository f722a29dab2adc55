// ==========================================
// Medication Shortage CDS Service - portal export fetch
// ==========================================
// Collaborator that lands the portal's spreadsheet export on disk. The
// contract keeps the portal URL, the export trigger id and the two wait
// budgets; how the portal is driven stays behind the trait.
// ==========================================

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Budget for the portal to accept the export trigger.
pub const DEFAULT_TRIGGER_WAIT: Duration = Duration::from_secs(45);

/// Budget for the export transfer to land after the trigger.
pub const DEFAULT_TRANSFER_WAIT: Duration = Duration::from_secs(30);

/// File name the portal hands out for its export.
pub const DEFAULT_EXPORT_FILENAME: &str = "Vertriebseinschraenkungen.xlsx";

#[derive(Debug, Clone)]
pub struct DownloadConfig {
    pub portal_url: String,
    pub export_trigger_id: String,
    pub target_path: PathBuf,
    pub trigger_wait: Duration,
    pub transfer_wait: Duration,
}

/// Download failure reasons; budget overruns stay distinct from transport
/// breakage so the caller's log can say which budget ran out.
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("stale export could not be removed: {0}")]
    StaleExport(String),

    #[error("portal did not accept the export trigger within the budget")]
    TriggerTimeout,

    #[error("export transfer did not finish within the budget")]
    TransferTimeout,

    #[error("portal answered with status {0}")]
    PortalStatus(u16),

    #[error("downloaded export is empty")]
    EmptyExport,

    #[error("export transfer failed: {0}")]
    Transfer(String),

    #[error("export file write failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type DownloadResult<T> = Result<T, DownloadError>;

/// Fetches the current export and returns the landed file path.
///
/// Implementations append human-readable step messages to `log`; the update
/// surface relays that log to the caller on success and failure alike.
#[async_trait]
pub trait ExportFetcher: Send + Sync {
    async fn fetch(&self, log: &mut Vec<String>) -> DownloadResult<PathBuf>;
}

// ==========================================
// HttpExportFetcher - reqwest implementation
// ==========================================
/// Drives the portal's export over plain HTTP: the trigger id goes along as
/// the `event` request parameter, the trigger budget bounds the portal's
/// answer and the transfer budget bounds the body download.
pub struct HttpExportFetcher {
    http: reqwest::Client,
    config: DownloadConfig,
}

impl HttpExportFetcher {
    pub fn new(config: DownloadConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, config })
    }

    fn remove_stale_export(&self, log: &mut Vec<String>) -> DownloadResult<()> {
        let path: &Path = &self.config.target_path;
        if path.exists() {
            std::fs::remove_file(path).map_err(|e| {
                warn!(path = %path.display(), error = %e, "stale export could not be removed");
                DownloadError::StaleExport(e.to_string())
            })?;
            log.push(format!("removed stale export at {}", path.display()));
        }
        Ok(())
    }
}

#[async_trait]
impl ExportFetcher for HttpExportFetcher {
    async fn fetch(&self, log: &mut Vec<String>) -> DownloadResult<PathBuf> {
        log.push(format!("export target: {}", self.config.target_path.display()));
        self.remove_stale_export(log)?;

        log.push(format!(
            "requesting export from {} (trigger {})",
            self.config.portal_url, self.config.export_trigger_id
        ));
        info!(portal = %self.config.portal_url, "requesting portal export");

        let response = self
            .http
            .get(&self.config.portal_url)
            .query(&[("event", self.config.export_trigger_id.as_str())])
            .timeout(self.config.trigger_wait)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!("portal trigger budget ran out");
                    DownloadError::TriggerTimeout
                } else {
                    DownloadError::Transfer(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "portal refused the export request");
            return Err(DownloadError::PortalStatus(status.as_u16()));
        }
        log.push(format!("portal accepted the trigger (status {})", status.as_u16()));

        let bytes = tokio::time::timeout(self.config.transfer_wait, response.bytes())
            .await
            .map_err(|_| {
                warn!("export transfer budget ran out");
                DownloadError::TransferTimeout
            })?
            .map_err(|e| {
                if e.is_timeout() {
                    DownloadError::TransferTimeout
                } else {
                    DownloadError::Transfer(e.to_string())
                }
            })?;

        if bytes.is_empty() {
            warn!("portal delivered an empty export");
            return Err(DownloadError::EmptyExport);
        }

        std::fs::write(&self.config.target_path, &bytes)?;
        log.push(format!(
            "export landed: {} ({} bytes)",
            self.config.target_path.display(),
            bytes.len()
        ));
        info!(path = %self.config.target_path.display(), size = bytes.len(), "export downloaded");

        Ok(self.config.target_path.clone())
    }
}
