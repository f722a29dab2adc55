// ==========================================
// Medication Shortage CDS Service - domain layer
// ==========================================
// Entities and value types shared by repositories, engines and APIs.
// ==========================================

pub mod medication;
pub mod types;

pub use medication::{ImportReport, MedicationRecord, RawShortageRecord, RowIssue, ShortageRecord};
pub use types::ShortageCheck;
