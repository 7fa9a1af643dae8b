use crate::record::{self, RawRow};
use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::path::PathBuf;

/// Placeholder replaced with the sheet key in a [`CsvFileSource`] template.
pub const SHEET_PLACEHOLDER: &str = "{sheet}";

/// Supplies the raw rows of one sheet, e.g. one year of sessions.
pub trait RowSource {
    fn fetch(&self, sheet: &str) -> Result<Vec<RawRow>>;
}

/// Sheets exported as CSV files, located through a path template such as
/// `sheets/{sheet}.csv`.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    template: String,
}

impl CsvFileSource {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn path_for(&self, sheet: &str) -> PathBuf {
        PathBuf::from(self.template.replace(SHEET_PLACEHOLDER, sheet))
    }
}

impl RowSource for CsvFileSource {
    fn fetch(&self, sheet: &str) -> Result<Vec<RawRow>> {
        if sheet.trim().is_empty() {
            return Err(anyhow!("No sheet given"));
        }
        let path = self.path_for(sheet);
        let file = File::open(&path)
            .with_context(|| format!("Failed to open sheet {}", path.display()))?;
        let rows = record::read_rows(file)
            .with_context(|| format!("Failed to parse sheet {}", path.display()))?;
        tracing::debug!(path = %path.display(), rows = rows.len(), "sheet loaded");
        Ok(rows)
    }
}
