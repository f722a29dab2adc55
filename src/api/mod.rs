// ==========================================
// Medication Shortage CDS Service - API layer
// ==========================================
// Role: business interfaces for the HTTP route layer
// ==========================================

pub mod check_api;
pub mod error;
pub mod medication_api;
pub mod update_api;

pub use check_api::{CheckApi, CheckReport, LocalCheck};
pub use error::{ApiError, ApiResult};
pub use medication_api::{MedicationApi, MIN_SUGGESTION_TERM_LEN};
pub use update_api::{UpdateApi, UpdateReport};
