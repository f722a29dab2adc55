// ==========================================
// Medication Shortage CDS Service - domain value types
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ShortageCheck - tri-state shortage result
// ==========================================
// A store failure must never read as "available", so the failure branch is
// a first-class variant rather than an error the caller could drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortageCheck {
    /// At least one ledger entry exists for the name (any status).
    InShortage,
    /// No ledger entry exists for the name.
    Available,
    /// The ledger could not be queried; the answer is not known.
    Unknown,
}

impl ShortageCheck {
    /// True when the name is confirmed present in the ledger.
    pub fn is_in_shortage(self) -> bool {
        matches!(self, ShortageCheck::InShortage)
    }

    /// True when the name is confirmed absent from the ledger.
    pub fn is_available(self) -> bool {
        matches!(self, ShortageCheck::Available)
    }

    /// True when the ledger could not be consulted.
    pub fn is_unknown(self) -> bool {
        matches!(self, ShortageCheck::Unknown)
    }
}

impl std::fmt::Display for ShortageCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ShortageCheck::InShortage => "in_shortage",
            ShortageCheck::Available => "available",
            ShortageCheck::Unknown => "unknown",
        };
        f.write_str(s)
    }
}
