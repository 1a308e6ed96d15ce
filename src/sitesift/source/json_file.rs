use super::{extract_records, DepartmentTable, RecordSource};
use crate::error::{Result, SiftError};
use crate::model::Record;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads a JSON array of [`DepartmentTable`]s from disk.
///
/// ```json
/// [
///   { "department": "Admissions",
///     "rows": [["1", "Apply", "prod, staging", "", "", "https://…", "", "true", "", "true", "Drupal"]] }
/// ]
/// ```
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_tables(&self) -> Result<Vec<DepartmentTable>> {
        if !self.path.exists() {
            return Err(SiftError::Source(format!(
                "data file not found: {}",
                self.path.display()
            )));
        }
        let content = fs::read_to_string(&self.path).map_err(SiftError::Io)?;
        let tables: Vec<DepartmentTable> =
            serde_json::from_str(&content).map_err(SiftError::Json)?;
        Ok(tables)
    }
}

impl RecordSource for JsonFileSource {
    fn load_initial_records(&self) -> Result<Vec<Record>> {
        let tables = self.load_tables()?;
        Ok(extract_records(&tables))
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}
