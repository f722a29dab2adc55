// ==========================================
// Medication Shortage CDS Service - medication query API
// ==========================================

use crate::api::error::ApiResult;
use crate::repository::{MedicationRegistryRepository, SUGGESTION_LIMIT};
use std::sync::Arc;

/// Shortest term the typeahead answers for.
pub const MIN_SUGGESTION_TERM_LEN: usize = 2;

pub struct MedicationApi {
    registry: Arc<MedicationRegistryRepository>,
}

impl MedicationApi {
    pub fn new(registry: Arc<MedicationRegistryRepository>) -> Self {
        Self { registry }
    }

    /// Typeahead suggestions: case-sensitive name-prefix match, capped at
    /// 15 results. Terms shorter than 2 characters yield an empty list.
    pub fn suggest(&self, term: &str) -> ApiResult<Vec<String>> {
        if term.chars().count() < MIN_SUGGESTION_TERM_LEN {
            return Ok(Vec::new());
        }
        Ok(self.registry.suggest_names(term, SUGGESTION_LIMIT)?)
    }
}
