// ==========================================
// Medication Shortage CDS Service - core library
// ==========================================
// Stack: axum + Rust + SQLite
// Role: decision support relay (shortage check, ATC alternatives, CDS hook)
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and types
pub mod domain;

// Repository layer - data access
pub mod repository;

// Engine layer - resolution rules
pub mod engine;

// Import layer - external data
pub mod importer;

// Download layer - portal export fetch
pub mod download;

// CDS hook layer - payload assembly and dispatch
pub mod hooks;

// Configuration layer
pub mod config;

// Database infrastructure (connection init / unified PRAGMAs)
pub mod db;

// Logging
pub mod logging;

// API layer - business interfaces
pub mod api;

// Server layer - HTTP routes and shared state
pub mod server;

// ==========================================
// Re-exports of core types
// ==========================================

// Domain types
pub use domain::types::ShortageCheck;

// Domain entities
pub use domain::{ImportReport, MedicationRecord, RawShortageRecord, RowIssue, ShortageRecord};

// Engines
pub use engine::{AlternativeFinder, ClassificationLookup, ShortageResolver};

// Hooks
pub use hooks::{CdsHookClient, CdsHookRequest, HookDispatchOutcome, HookDispatcher};

// API
pub use api::{CheckApi, MedicationApi, UpdateApi};

// ==========================================
// Constants
// ==========================================

// System version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// System name
pub const APP_NAME: &str = "Medication Shortage CDS Service";
