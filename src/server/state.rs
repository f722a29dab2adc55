// ==========================================
// Medication Shortage CDS Service - application state
// ==========================================
// Role: wire repositories, engines and APIs into the shared state the
// route handlers clone.
// ==========================================

use crate::api::{CheckApi, MedicationApi, UpdateApi};
use crate::config::AppConfig;
use crate::download::{ExportFetcher, HttpExportFetcher};
use crate::engine::{AlternativeFinder, ClassificationLookup, ShortageResolver};
use crate::hooks::client::{CdsHookClient, HookDispatcher};
use crate::importer::ShortageImporter;
use crate::repository::{MedicationRegistryRepository, ShortageLedgerRepository};
use std::sync::Arc;
use tracing::info;

/// Shared application state.
///
/// Every field is behind an `Arc`; cloning the state per request is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Check & notify orchestration
    pub check_api: Arc<CheckApi>,

    /// Typeahead / registry queries
    pub medication_api: Arc<MedicationApi>,

    /// Dataset refresh cycle
    pub update_api: Arc<UpdateApi>,

    /// Database path (health probe)
    pub db_path: String,
}

impl AppState {
    /// Build the full production state from configuration.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let dispatcher: Arc<dyn HookDispatcher> = Arc::new(CdsHookClient::new(
            config.cds_hook_url.clone(),
            config.hook_timeout(),
        )?);
        let fetcher: Arc<dyn ExportFetcher> =
            Arc::new(HttpExportFetcher::new(config.download_config())?);

        let db_path = config.db_path().to_string_lossy().to_string();
        Self::with_collaborators(&db_path, dispatcher, fetcher)
    }

    /// Build state over explicit collaborators (tests substitute stubs for
    /// the hook dispatcher and the export fetcher).
    pub fn with_collaborators(
        db_path: &str,
        dispatcher: Arc<dyn HookDispatcher>,
        fetcher: Arc<dyn ExportFetcher>,
    ) -> anyhow::Result<Self> {
        info!(db_path = %db_path, "initializing application state");

        // separate connections per repository keep readers concurrent;
        // the importer gets its own ledger handle for the replace cycle
        let ledger = Arc::new(ShortageLedgerRepository::new(db_path)?);
        let registry = Arc::new(MedicationRegistryRepository::new(db_path)?);
        let import_ledger = Arc::new(ShortageLedgerRepository::new(db_path)?);

        let resolver = Arc::new(ShortageResolver::new(ledger.clone()));
        let lookup = Arc::new(ClassificationLookup::new(registry.clone()));
        let finder = Arc::new(AlternativeFinder::new(registry.clone(), resolver.clone()));

        let importer = Arc::new(ShortageImporter::new(import_ledger));

        Ok(Self {
            check_api: Arc::new(CheckApi::new(resolver, lookup, finder, dispatcher)),
            medication_api: Arc::new(MedicationApi::new(registry)),
            update_api: Arc::new(UpdateApi::new(fetcher, importer)),
            db_path: db_path.to_string(),
        })
    }
}
