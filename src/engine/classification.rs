// ==========================================
// Medication Shortage CDS Service - classification lookup
// ==========================================

use crate::domain::medication::MedicationRecord;
use crate::repository::{MedicationRegistryRepository, RepositoryResult};
use std::sync::Arc;

/// Resolves a medication name to its registry entry (ATC code and
/// registration id).
///
/// `Ok(None)` means the name is legitimately absent from the registry;
/// `Err` means the store could not be queried. Callers that retry must be
/// able to tell the two apart.
pub struct ClassificationLookup {
    registry: Arc<MedicationRegistryRepository>,
}

impl ClassificationLookup {
    pub fn new(registry: Arc<MedicationRegistryRepository>) -> Self {
        Self { registry }
    }

    /// Exact-name registry lookup. An empty name resolves to absent.
    pub fn resolve(&self, name: &str) -> RepositoryResult<Option<MedicationRecord>> {
        if name.is_empty() {
            return Ok(None);
        }
        self.registry.find_by_name(name)
    }
}
