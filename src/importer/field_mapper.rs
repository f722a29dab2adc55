// ==========================================
// Medication Shortage CDS Service - export field mapping
// ==========================================
// Maps the portal export's fixed column headers onto ShortageRecord.
// The source export carries trailing spaces in two PZN headers; the file
// parsers trim headers, so the map below uses the trimmed forms.
// ==========================================

use crate::domain::medication::{RawShortageRecord, RowIssue, ShortageRecord};
use std::collections::HashMap;
use tracing::warn;

pub const COL_NAME: &str = "Name";
pub const COL_USAGE: &str = "Verwendung";
pub const COL_STATUS: &str = "Status";
pub const COL_DETAILS: &str = "Details";
pub const COL_REPORTER: &str = "Melder";
pub const COL_PZN_UNAVAILABLE: &str = "PZN nicht verfügbarer Packungen";
pub const COL_PZN_RESTRICTED: &str = "PZN eingeschränkt verfügbarer Packungen";
pub const COL_PZN_RESTORED: &str = "PZN wieder verfügbarer Packungen";
pub const COL_REPORTED_AT: &str = "Datum der Meldung";
pub const COL_CHANGED_AT: &str = "Datum der letzten Änderung";

/// Status fallback for rows exported without one; matches the portal's own
/// wording so it blends with the real status values.
pub const STATUS_FALLBACK: &str = "UNBEKANNT";

/// Every column the export must carry for an import to start.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    COL_NAME,
    COL_USAGE,
    COL_STATUS,
    COL_DETAILS,
    COL_REPORTER,
    COL_PZN_UNAVAILABLE,
    COL_PZN_RESTRICTED,
    COL_PZN_RESTORED,
    COL_REPORTED_AT,
    COL_CHANGED_AT,
];

pub struct FieldMapper;

impl FieldMapper {
    /// Required columns absent from a parsed sample row.
    pub fn missing_columns(sample_row: &HashMap<String, String>) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|col| !sample_row.contains_key(**col))
            .map(|col| col.to_string())
            .collect()
    }

    /// Map one parsed row onto a ledger record.
    ///
    /// Rows without a name are skipped (issue recorded, not fatal). A
    /// non-numeric detail value degrades to None with an issue recorded,
    /// keeping the rest of the row.
    pub fn map_row(
        row: &HashMap<String, String>,
        row_number: usize,
        issues: &mut Vec<RowIssue>,
    ) -> Option<RawShortageRecord> {
        let get = |col: &str| row.get(col).cloned().unwrap_or_default();

        let name = get(COL_NAME);
        if name.is_empty() {
            issues.push(RowIssue {
                row_number,
                message: "row has no medication name, skipped".to_string(),
            });
            return None;
        }

        let numeric_detail = {
            let value = get(COL_DETAILS);
            if value.is_empty() {
                None
            } else {
                // decimal comma in the export
                match value.replace(',', ".").parse::<f64>() {
                    Ok(n) => Some(n),
                    Err(_) => {
                        warn!(row_number, value = %value, "detail value is not numeric, storing NULL");
                        issues.push(RowIssue {
                            row_number,
                            message: format!(
                                "detail value '{}' is not numeric, stored as NULL",
                                value
                            ),
                        });
                        None
                    }
                }
            }
        };

        let status_text = {
            let value = get(COL_STATUS);
            if value.is_empty() {
                STATUS_FALLBACK.to_string()
            } else {
                value
            }
        };

        Some(RawShortageRecord {
            record: ShortageRecord {
                name,
                usage_text: get(COL_USAGE),
                status_text,
                numeric_detail,
                reporter: get(COL_REPORTER),
                pzn_unavailable: get(COL_PZN_UNAVAILABLE),
                pzn_restricted: get(COL_PZN_RESTRICTED),
                pzn_restored: get(COL_PZN_RESTORED),
                reported_at: get(COL_REPORTED_AT),
                changed_at: get(COL_CHANGED_AT),
            },
            row_number,
        })
    }
}
