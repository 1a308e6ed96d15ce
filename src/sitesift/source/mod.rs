//! # Source Layer
//!
//! The engine never reads a page or a database itself. It asks a [`RecordSource`] for the
//! initial records exactly once (and again only on an explicit reload), so tests and other
//! front ends can swap the origin of the data freely.
//!
//! ## Implementations
//!
//! - [`json_file::JsonFileSource`]: a JSON array of department tables, the data-transfer form of
//!   the server-rendered page
//! - [`csv_file::CsvFileSource`]: a file in the export format, so an export can be loaded again
//! - [`memory::InMemorySource`]: tables held in memory, for tests
//!
//! [`FileSource`] picks between the two file formats by extension, which is what the CLI uses.
//!
//! ## The Extractor
//!
//! Department tables are turned into records by [`extract_records`]: every row with at
//! least eleven cells becomes one record, shorter rows are dropped without complaint.

use crate::error::Result;
use crate::model::Record;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod csv_file;
pub mod json_file;
pub mod memory;

/// One department's rendered table: a label plus rows of cell text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentTable {
    pub department: String,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl DepartmentTable {
    pub fn new(department: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            rows: Vec::new(),
        }
    }

    pub fn with_row<C: Into<String>>(mut self, cells: impl IntoIterator<Item = C>) -> Self {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }
}

/// Where the initial dataset comes from.
pub trait RecordSource {
    /// Produce the full, ordered dataset.
    fn load_initial_records(&self) -> Result<Vec<Record>>;

    /// Short human readable origin, used in log lines.
    fn describe(&self) -> String;
}

/// A data file on disk: `.csv` reads the export format, anything else the JSON tables.
pub enum FileSource {
    Json(json_file::JsonFileSource),
    Csv(csv_file::CsvFileSource),
}

impl FileSource {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            FileSource::Csv(csv_file::CsvFileSource::new(path))
        } else {
            FileSource::Json(json_file::JsonFileSource::new(path))
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            FileSource::Json(source) => source.path(),
            FileSource::Csv(source) => source.path(),
        }
    }
}

impl RecordSource for FileSource {
    fn load_initial_records(&self) -> Result<Vec<Record>> {
        match self {
            FileSource::Json(source) => source.load_initial_records(),
            FileSource::Csv(source) => source.load_initial_records(),
        }
    }

    fn describe(&self) -> String {
        match self {
            FileSource::Json(source) => source.describe(),
            FileSource::Csv(source) => source.describe(),
        }
    }
}

/// Converts department tables into records, table order then row order.
pub fn extract_records(tables: &[DepartmentTable]) -> Vec<Record> {
    let mut records = Vec::new();
    for table in tables {
        for (row_idx, cells) in table.rows.iter().enumerate() {
            match Record::from_row(&table.department, cells) {
                Some(record) => records.push(record),
                None => debug!(
                    department = %table.department,
                    row = row_idx,
                    cells = cells.len(),
                    "skipping short row"
                ),
            }
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_row(id: &str, title: &str) -> Vec<String> {
        let mut cells = vec![id.to_string(), title.to_string()];
        cells.extend(std::iter::repeat(String::new()).take(9));
        cells
    }

    #[test]
    fn test_extract_preserves_table_then_row_order() {
        let tables = vec![
            DepartmentTable::new("Admissions")
                .with_row(full_row("1", "Apply"))
                .with_row(full_row("2", "Visit")),
            DepartmentTable::new("IT").with_row(full_row("3", "Portal")),
        ];
        let records = extract_records(&tables);
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Apply", "Visit", "Portal"]);
        assert_eq!(records[2].department, "IT");
    }

    #[test]
    fn test_extract_skips_short_rows_silently() {
        let tables = vec![DepartmentTable::new("IT")
            .with_row(vec!["no data"])
            .with_row(full_row("1", "Portal"))
            .with_row(Vec::<String>::new())];
        let records = extract_records(&tables);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Portal");
    }

    #[test]
    fn test_file_source_picks_format_by_extension() {
        assert!(matches!(FileSource::from_path("sites.CSV"), FileSource::Csv(_)));
        assert!(matches!(FileSource::from_path("sites.json"), FileSource::Json(_)));
        assert!(matches!(FileSource::from_path("sites"), FileSource::Json(_)));
        assert_eq!(FileSource::from_path("a/b.csv").path(), Path::new("a/b.csv"));
    }

    #[test]
    fn test_extract_empty_tables() {
        let tables = vec![DepartmentTable::new("Empty")];
        assert!(extract_records(&tables).is_empty());
    }
}
