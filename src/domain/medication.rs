// ==========================================
// Medication Shortage CDS Service - medication domain model
// ==========================================
// registry: one row per medication name (bulk-seeded, read-only at query time)
// shortage: ledger of reported unavailability events (replaced per import)
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// MedicationRecord - registry entry
// ==========================================
// Written by bulk seeding only; engines read it.
// Group membership: ATC code minus its last two characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationRecord {
    pub name: String,                    // unique medication name (registry key)
    pub atc_code: Option<String>,        // ATC classification code
    pub registration_id: Option<String>, // national registration number
}

// ==========================================
// ShortageRecord - shortage ledger entry
// ==========================================
// Names are NOT unique: a medication may carry several historical entries.
// The status text is informational only; presence of any row means
// "in shortage" regardless of its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortageRecord {
    pub name: String,
    pub usage_text: String,
    pub status_text: String,
    pub numeric_detail: Option<f64>,
    pub reporter: String,
    pub pzn_unavailable: String, // package numbers reported unavailable
    pub pzn_restricted: String,  // package numbers with restricted availability
    pub pzn_restored: String,    // package numbers reported available again
    pub reported_at: String,     // report date as exported (opaque text)
    pub changed_at: String,      // last-change date as exported (opaque text)
}

// ==========================================
// RawShortageRecord - import intermediate
// ==========================================
// Pipeline product (file parse -> field mapping -> this struct).
// Lives only inside an import cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawShortageRecord {
    pub record: ShortageRecord,
    pub row_number: usize, // source file row (for the issue log)
}

// ==========================================
// Import reporting
// ==========================================

/// One skipped or degraded row from an import cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowIssue {
    pub row_number: usize,
    pub message: String,
}

/// Outcome of one ledger import cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub batch_id: String,
    pub total_rows: usize,
    pub inserted: usize,
    pub skipped: usize,
    pub issues: Vec<RowIssue>,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

impl ImportReport {
    pub fn issue_messages(&self) -> Vec<String> {
        self.issues
            .iter()
            .map(|i| format!("row {}: {}", i.row_number, i.message))
            .collect()
    }
}
