// ==========================================
// Medication Shortage CDS Service - ledger importer
// ==========================================
// Flow: parse -> column check -> map -> transactional replace
// Malformed rows are skipped and logged, never fatal; a missing column
// aborts before the old ledger is touched.
// ==========================================

use crate::domain::medication::{ImportReport, RowIssue, ShortageRecord};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::repository::ShortageLedgerRepository;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct ShortageImporter {
    parser: UniversalFileParser,
    ledger: Arc<ShortageLedgerRepository>,
}

impl ShortageImporter {
    pub fn new(ledger: Arc<ShortageLedgerRepository>) -> Self {
        Self {
            parser: UniversalFileParser,
            ledger,
        }
    }

    /// Run one import cycle from a downloaded export file.
    ///
    /// The previous ledger content survives every failure path: the
    /// delete-and-insert happens inside a single repository transaction,
    /// entered only after parsing and the column check succeed.
    pub fn import_from_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ImportReport> {
        let batch_id = Uuid::new_v4().to_string();
        let path = file_path.as_ref();
        info!(batch_id = %batch_id, file = %path.display(), "starting ledger import");

        // === step 1: parse file ===
        debug!("step 1: parse export file");
        let raw_rows = self.parser.parse(path)?;
        let total_rows = raw_rows.len();
        info!(total_rows, "export parsed");

        // === step 2: column check ===
        debug!("step 2: column check");
        if let Some(sample) = raw_rows.first() {
            let missing = FieldMapper::missing_columns(sample);
            if !missing.is_empty() {
                warn!(missing = ?missing, "export is missing required columns, aborting import");
                return Err(ImportError::MissingColumns(missing));
            }
        }

        // === step 3: field mapping ===
        debug!("step 3: field mapping");
        let mut issues: Vec<RowIssue> = Vec::new();
        let mut records: Vec<ShortageRecord> = Vec::new();
        for (idx, row) in raw_rows.iter().enumerate() {
            // +2: header row plus 1-based counting, matching the source file
            let row_number = idx + 2;
            if let Some(mapped) = FieldMapper::map_row(row, row_number, &mut issues) {
                records.push(mapped.record);
            }
        }
        let skipped = total_rows - records.len();
        info!(mapped = records.len(), skipped, "field mapping done");

        // === step 4: transactional replace ===
        debug!("step 4: replace ledger");
        let inserted = self.ledger.replace_all(&records)?;
        info!(batch_id = %batch_id, inserted, "ledger replaced");

        Ok(ImportReport {
            batch_id,
            total_rows,
            inserted,
            skipped,
            issues,
            completed_at: chrono::Utc::now(),
        })
    }
}
