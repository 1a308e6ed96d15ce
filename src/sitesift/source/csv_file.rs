use super::RecordSource;
use crate::commands::export::EXPORT_HEADERS;
use crate::error::{Result, SiftError};
use crate::model::Record;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads records back from a file in the export format.
///
/// The export has no id column, so loaded records carry an empty id. Columns are read by
/// position; a header that does not match the export header is logged and tolerated.
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for CsvFileSource {
    fn load_initial_records(&self) -> Result<Vec<Record>> {
        if !self.path.exists() {
            return Err(SiftError::Source(format!(
                "data file not found: {}",
                self.path.display()
            )));
        }
        let file = File::open(&self.path).map_err(SiftError::Io)?;
        read_export(BufReader::new(file))
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}

/// Parses export-formatted CSV into records.
pub fn read_export<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if !headers.iter().eq(EXPORT_HEADERS.iter().copied()) {
        warn!(?headers, "unexpected export header, reading columns by position");
    }

    let mut records = Vec::new();
    for (row_idx, result) in rdr.records().enumerate() {
        let row = result?;
        if row.len() < EXPORT_HEADERS.len() {
            debug!(row = row_idx + 2, fields = row.len(), "skipping short CSV row");
            continue;
        }
        // Department leads the export; the table cells start at title with no id.
        let mut cells: Vec<&str> = Vec::with_capacity(EXPORT_HEADERS.len());
        cells.push("");
        cells.extend(row.iter().skip(1).take(EXPORT_HEADERS.len() - 1));
        if let Some(record) = Record::from_row(&row[0], &cells) {
            records.push(record);
        }
    }
    Ok(records)
}
