// ==========================================
// Medication Shortage CDS Service - check & notify API
// ==========================================
// Orchestrates one check cycle: shortage status, ATC lookup, alternatives,
// hook assembly and dispatch. The combined report mirrors what the caller
// needs to render: local findings plus the external call outcome.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::medication::MedicationRecord;
use crate::domain::types::ShortageCheck;
use crate::engine::{AlternativeFinder, ClassificationLookup, ShortageResolver};
use crate::hooks::client::{HookDispatchOutcome, HookDispatcher};
use crate::hooks::payload::build_order_sign_request;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Local resolution result inside a check report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalCheck {
    pub status: ShortageCheck,
    pub atc_code_found: Option<String>,
    pub alternatives_found_count: usize,
    pub alternatives_details: Vec<MedicationRecord>,
}

/// Combined outcome of one check-and-notify cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub medication_checked: String,
    pub local_check: LocalCheck,
    pub external_cds_hook_call: HookDispatchOutcome,
}

pub struct CheckApi {
    resolver: Arc<ShortageResolver>,
    lookup: Arc<ClassificationLookup>,
    finder: Arc<AlternativeFinder>,
    dispatcher: Arc<dyn HookDispatcher>,
}

impl CheckApi {
    pub fn new(
        resolver: Arc<ShortageResolver>,
        lookup: Arc<ClassificationLookup>,
        finder: Arc<AlternativeFinder>,
        dispatcher: Arc<dyn HookDispatcher>,
    ) -> Self {
        Self {
            resolver,
            lookup,
            finder,
            dispatcher,
        }
    }

    /// Resolve a medication locally, relay the hook, report both outcomes.
    ///
    /// An unknown shortage status (store unreachable) aborts with
    /// `StoreUnavailable` instead of reporting "available"; a failed
    /// registry lookup or alternatives query aborts the same way.
    pub async fn check_and_notify(&self, medication_name: &str) -> ApiResult<CheckReport> {
        if medication_name.is_empty() {
            return Err(ApiError::InvalidInput(
                "'medication_name' must not be empty".to_string(),
            ));
        }

        info!(medication = %medication_name, "local check started");

        let status = self.resolver.check(medication_name);
        if status.is_unknown() {
            return Err(ApiError::StoreUnavailable(
                "shortage ledger could not be queried".to_string(),
            ));
        }

        let details = self.lookup.resolve(medication_name)?;
        let atc_code = details.and_then(|d| d.atc_code);

        let alternatives = match (&status, &atc_code) {
            (ShortageCheck::InShortage, Some(code)) => {
                self.finder.find_alternatives(code, medication_name)?
            }
            _ => Vec::new(),
        };

        info!(
            medication = %medication_name,
            status = %status,
            atc_code = atc_code.as_deref().unwrap_or("-"),
            alternatives = alternatives.len(),
            "local check finished"
        );

        let payload = build_order_sign_request(medication_name, atc_code.as_deref());
        let outcome = self.dispatcher.dispatch(&payload).await;

        Ok(CheckReport {
            medication_checked: medication_name.to_string(),
            local_check: LocalCheck {
                status,
                atc_code_found: atc_code,
                alternatives_found_count: alternatives.len(),
                alternatives_details: alternatives,
            },
            external_cds_hook_call: outcome,
        })
    }
}
