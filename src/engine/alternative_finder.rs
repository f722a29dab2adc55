// ==========================================
// Medication Shortage CDS Service - alternative finder
// ==========================================
// Grouping rule: two medications belong to the same therapeutic group when
// their ATC codes share everything but the last two characters. The rule is
// a pure string convention of the coding scheme, not schema-derived.
// ==========================================

use crate::domain::medication::MedicationRecord;
use crate::engine::shortage_resolver::ShortageResolver;
use crate::repository::{MedicationRegistryRepository, RepositoryResult};
use std::sync::Arc;
use tracing::{debug, warn};

/// Enumerates currently-available substitutes within an ATC group.
pub struct AlternativeFinder {
    registry: Arc<MedicationRegistryRepository>,
    resolver: Arc<ShortageResolver>,
}

impl AlternativeFinder {
    pub fn new(
        registry: Arc<MedicationRegistryRepository>,
        resolver: Arc<ShortageResolver>,
    ) -> Self {
        Self { registry, resolver }
    }

    /// Same-group medications not currently in shortage, in registry storage
    /// order, never including `exclude_name` itself.
    ///
    /// Codes shorter than 2 characters cannot be grouped, and an empty
    /// exclude name leaves the group undefined; both yield an empty list
    /// rather than an error.
    ///
    /// Candidates whose shortage re-check comes back `Unknown` are skipped
    /// without failing the request. That trades completeness for having
    /// *some* answer when the ledger is flaky; the skip is logged.
    ///
    /// A registry query failure fails the whole operation; no partial list.
    pub fn find_alternatives(
        &self,
        atc_code: &str,
        exclude_name: &str,
    ) -> RepositoryResult<Vec<MedicationRecord>> {
        if atc_code.chars().count() < 2 || exclude_name.is_empty() {
            return Ok(Vec::new());
        }

        let cut = atc_code
            .char_indices()
            .rev()
            .nth(1)
            .map(|(i, _)| i)
            .unwrap_or(0);
        let group_prefix = &atc_code[..cut];

        let candidates = self
            .registry
            .find_by_atc_prefix(group_prefix, exclude_name)?;
        debug!(
            atc_code = %atc_code,
            group_prefix = %group_prefix,
            candidates = candidates.len(),
            "collected group candidates"
        );

        let mut available = Vec::new();
        for candidate in candidates {
            let check = self.resolver.check(&candidate.name);
            if check.is_unknown() {
                warn!(name = %candidate.name, "candidate re-check unavailable, skipping");
                continue;
            }
            if check.is_available() {
                available.push(candidate);
            }
        }

        Ok(available)
    }
}
