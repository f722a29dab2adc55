// ==========================================
// Medication Shortage CDS Service - shortage resolver
// ==========================================
// Rule: a name is "in shortage" iff at least one ledger entry exists for it.
// The status text of the entries is ignored.
// ==========================================

use crate::domain::types::ShortageCheck;
use crate::repository::ShortageLedgerRepository;
use std::sync::Arc;
use tracing::warn;

/// Resolves a medication name against the shortage ledger.
///
/// Read-only; repeated calls with unchanged data return the same result.
pub struct ShortageResolver {
    ledger: Arc<ShortageLedgerRepository>,
}

impl ShortageResolver {
    pub fn new(ledger: Arc<ShortageLedgerRepository>) -> Self {
        Self { ledger }
    }

    /// Tri-state shortage check for an exact, case-sensitive name.
    ///
    /// - empty name: `Available`, since there is nothing to check, which is
    ///   not a failure and therefore never `Unknown`
    /// - ledger entry present (any status): `InShortage`
    /// - no entry: `Available`
    /// - ledger unreachable or query failed: `Unknown`, so callers cannot
    ///   mistake an infrastructure failure for "available"
    pub fn check(&self, name: &str) -> ShortageCheck {
        if name.is_empty() {
            warn!("shortage check invoked without a name");
            return ShortageCheck::Available;
        }

        match self.ledger.exists_by_name(name) {
            Ok(true) => ShortageCheck::InShortage,
            Ok(false) => ShortageCheck::Available,
            Err(e) => {
                warn!(name = %name, error = %e, "shortage ledger query failed");
                ShortageCheck::Unknown
            }
        }
    }
}
