//! The flat CSV ledger.
//!
//! Header: Date,Category,Description,Amount,Payment_Mode
//!
//! Columns are located by header name, so files with reordered or missing
//! columns still load (missing ones read as empty text).

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tally_core::{ExpenseRecord, LEDGER_HEADERS, NewExpense, RawRow, normalize};

use crate::error::{Result, StoreError};

const TMP_SUFFIX: &str = "tmp";

/// Owner of the ledger file. All reads and writes go through here.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with just the header if it is missing or empty.
    /// Existing content is never touched.
    pub fn ensure(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let empty = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        if empty {
            let mut wtr = csv::Writer::from_path(&self.path)?;
            wtr.write_record(LEDGER_HEADERS)?;
            wtr.flush()?;
            tracing::info!(path = %self.path.display(), "created ledger");
        }
        Ok(())
    }

    /// Strict read of every data row.
    pub fn try_load(&self) -> Result<Vec<RawRow>> {
        self.ensure()?;

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_path(&self.path)?;

        let headers = rdr.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
        };
        let idx: Vec<Option<usize>> = LEDGER_HEADERS.iter().map(|h| column(*h)).collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let field = |i: usize| {
                idx[i]
                    .and_then(|col| record.get(col))
                    .unwrap_or("")
                    .to_string()
            };

            // Skip completely blank lines
            if record.iter().all(|f| f.trim().is_empty()) {
                continue;
            }

            rows.push(RawRow {
                date: field(0),
                category: field(1),
                description: field(2),
                amount: field(3),
                payment_mode: field(4),
            });
        }

        Ok(rows)
    }

    /// Column names from the header row, as written in the file.
    pub fn headers(&self) -> Result<Vec<String>> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;
        Ok(rdr
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect())
    }

    /// Read every data row. Any failure is logged and yields an empty ledger.
    pub fn load(&self) -> Vec<RawRow> {
        match self.try_load() {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not load ledger");
                Vec::new()
            }
        }
    }

    /// Load and normalize. This is what every summary, query and chart reads.
    pub fn load_normalized(&self) -> Vec<ExpenseRecord> {
        normalize(&self.load())
    }

    /// Validate and add one expense at the end of the ledger.
    pub fn append(&self, expense: NewExpense) -> Result<ExpenseRecord> {
        let record = expense.validate()?;

        // A failed read must not turn into a rewrite with only the new row
        let mut rows = self.try_load()?;
        rows.push(record.to_raw());
        self.rewrite(&rows)?;

        tracing::info!(
            date = %record.date,
            category = %record.category,
            amount = record.amount,
            rows = rows.len(),
            "appended expense"
        );
        Ok(record)
    }

    /// Replace the whole ledger with `rows`.
    ///
    /// Written to a sibling temp file first and renamed over the ledger, so a
    /// failed write leaves the previous content in place.
    pub fn rewrite(&self, rows: &[RawRow]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.tmp_path();
        let written = write_rows(&tmp, rows);
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            StoreError::from(e)
        })?;

        tracing::debug!(path = %self.path.display(), rows = rows.len(), "rewrote ledger");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(TMP_SUFFIX);
        self.path.with_file_name(name)
    }
}

fn write_rows(path: &Path, rows: &[RawRow]) -> Result<()> {
    let file = File::create(path)?;
    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record(LEDGER_HEADERS)?;
    for row in rows {
        wtr.write_record(row.fields())?;
    }
    let mut file = wtr.into_inner().map_err(|e| StoreError::Io(e.into_error()))?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}
