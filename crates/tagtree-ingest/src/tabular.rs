//! In-memory tabular model: workbooks, sheets, named columns.
//!
//! Deliberately minimal — the registry only ever extracts one identifier
//! column, so a sheet is a header row plus string cells. File-backed
//! loading is limited to delimiter-separated text; anything richer (xlsx
//! and friends) is converted upstream.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use tagtree_core::{Error, Result};

/// One named sheet: a header row of column names and string-cell rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Create an empty sheet with the given header.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Index of a named column, if present.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// All cells of a named column, top to bottom. Rows shorter than the
    /// header contribute an empty cell.
    pub fn column(&self, column: &str) -> Result<Vec<&str>> {
        let idx = self
            .column_index(column)
            .ok_or_else(|| Error::MissingColumn(column.to_string()))?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
            .collect())
    }
}

/// A set of named sheets, mirroring the shape of the source workbook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Build a workbook from pre-parsed sheets.
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Pick the first sheet whose name appears in `preference`, falling
    /// back to the workbook's first sheet. `None` only for an empty
    /// workbook.
    pub fn select_sheet(&self, preference: &[&str]) -> Option<&Sheet> {
        for wanted in preference {
            if let Some(sheet) = self.sheets.iter().find(|s| s.name == *wanted) {
                return Some(sheet);
            }
        }
        self.sheets.first()
    }

    /// Load a single-sheet workbook from a delimiter-separated text file.
    ///
    /// The first line is the header; the sheet is named after the file
    /// stem. A missing file is [`Error::SourceNotFound`] — the dataset
    /// handle could not be located.
    pub fn from_delimited_path(path: impl AsRef<Path>, delimiter: char) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::SourceNotFound(path.display().to_string()));
        }

        let text = std::fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Sheet1".to_string());

        let mut lines = text.lines();
        let columns: Vec<String> = match lines.next() {
            Some(header) => header.split(delimiter).map(str::to_string).collect(),
            None => Vec::new(),
        };
        let rows: Vec<Vec<String>> = lines
            .map(|line| line.split(delimiter).map(str::to_string).collect())
            .collect();

        debug!(
            subsystem = "ingest",
            component = "tabular",
            op = "load",
            source = %path.display(),
            row_count = rows.len(),
            "Loaded delimited dataset"
        );

        Ok(Self {
            sheets: vec![Sheet {
                name,
                columns,
                rows,
            }],
        })
    }
}
