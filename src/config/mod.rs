// ==========================================
// Medication Shortage CDS Service - runtime configuration
// ==========================================
// clap derive with environment fallbacks; every knob has a default that
// matches the deployed portal and CDS sandbox.
// ==========================================

use crate::download::{DownloadConfig, DEFAULT_EXPORT_FILENAME};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for the service.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "shortage-cds",
    version,
    about = "Medication shortage & alternative resolution service with CDS hook relay"
)]
pub struct AppConfig {
    /// Listen address for the HTTP server
    #[arg(long, env = "SHORTAGE_CDS_LISTEN", default_value = "0.0.0.0:5001")]
    pub listen: String,

    /// SQLite database path (default: <data dir>/shortage-cds/drug.db)
    #[arg(long, env = "SHORTAGE_CDS_DB")]
    pub db: Option<PathBuf>,

    /// Endpoint of the external CDS service the hook is relayed to
    #[arg(
        long,
        env = "SHORTAGE_CDS_HOOK_URL",
        default_value = "http://cql-sandbox.projekte.fh-hagenberg.at:8080/cds-services/EngpassMed"
    )]
    pub cds_hook_url: String,

    /// Hook dispatch timeout in seconds
    #[arg(long, env = "SHORTAGE_CDS_HOOK_TIMEOUT_SECS", default_value_t = 20)]
    pub hook_timeout_secs: u64,

    /// Portal page serving the shortage export
    #[arg(
        long,
        env = "SHORTAGE_CDS_PORTAL_URL",
        default_value = "https://medicineshortage.basg.gv.at/vertriebseinschraenkungen/faces/adf.task-flow?_document=WEB-INF%2Fmain-btf.xml&_id=main-btf"
    )]
    pub portal_url: String,

    /// Export trigger control id on the portal page
    #[arg(long, env = "SHORTAGE_CDS_EXPORT_TRIGGER_ID", default_value = "t:pc1:ctb2")]
    pub export_trigger_id: String,

    /// Directory the export lands in (default: the database directory)
    #[arg(long, env = "SHORTAGE_CDS_DOWNLOAD_DIR")]
    pub download_dir: Option<PathBuf>,

    /// Budget for the portal to accept the export trigger, in seconds
    #[arg(long, env = "SHORTAGE_CDS_TRIGGER_WAIT_SECS", default_value_t = 45)]
    pub trigger_wait_secs: u64,

    /// Budget for the export transfer to land, in seconds
    #[arg(long, env = "SHORTAGE_CDS_TRANSFER_WAIT_SECS", default_value_t = 30)]
    pub transfer_wait_secs: u64,
}

impl AppConfig {
    /// Resolved database path.
    pub fn db_path(&self) -> PathBuf {
        self.db.clone().unwrap_or_else(default_db_path)
    }

    pub fn hook_timeout(&self) -> Duration {
        Duration::from_secs(self.hook_timeout_secs)
    }

    /// Download collaborator configuration derived from this config.
    pub fn download_config(&self) -> DownloadConfig {
        let dir = self
            .download_dir
            .clone()
            .unwrap_or_else(|| self.db_path().parent().map(PathBuf::from).unwrap_or_default());

        DownloadConfig {
            portal_url: self.portal_url.clone(),
            export_trigger_id: self.export_trigger_id.clone(),
            target_path: dir.join(DEFAULT_EXPORT_FILENAME),
            trigger_wait: Duration::from_secs(self.trigger_wait_secs),
            transfer_wait: Duration::from_secs(self.transfer_wait_secs),
        }
    }
}

/// Default database location under the platform data directory.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shortage-cds")
        .join("drug.db")
}
