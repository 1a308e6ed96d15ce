use super::{extract_records, DepartmentTable, RecordSource};
use crate::error::Result;
use crate::model::Record;
use std::cell::RefCell;

/// Department tables held in memory.
///
/// Tables can be swapped after construction so reload behaviour can be exercised
/// without a filesystem.
#[derive(Debug, Default)]
pub struct InMemorySource {
    tables: RefCell<Vec<DepartmentTable>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tables(tables: Vec<DepartmentTable>) -> Self {
        Self {
            tables: RefCell::new(tables),
        }
    }

    /// Replaces the tables, standing in for an out-of-band create/edit/delete.
    pub fn replace_tables(&self, tables: Vec<DepartmentTable>) {
        *self.tables.borrow_mut() = tables;
    }
}

impl RecordSource for InMemorySource {
    fn load_initial_records(&self) -> Result<Vec<Record>> {
        Ok(extract_records(&self.tables.borrow()))
    }

    fn describe(&self) -> String {
        format!("memory:{} tables", self.tables.borrow().len())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// Builds a full eleven-cell row from the columns tests usually care about.
    pub struct RowSpec<'a> {
        pub id: &'a str,
        pub title: &'a str,
        pub environments: &'a str,
        pub pope_tech: &'a str,
        pub active: &'a str,
        pub cms: &'a str,
    }

    impl RowSpec<'_> {
        pub fn cells(&self) -> Vec<String> {
            vec![
                self.id.to_string(),
                self.title.to_string(),
                self.environments.to_string(),
                String::new(),
                String::new(),
                format!("https://{}.example.edu", self.title.to_lowercase()),
                String::new(),
                self.pope_tech.to_string(),
                String::new(),
                self.active.to_string(),
                self.cms.to_string(),
            ]
        }
    }

    /// The two-department dataset used throughout the engine tests.
    ///
    /// Admissions/Apply: prod, staging; pope_tech true; active true; Drupal.
    /// IT/Portal: prod; pope_tech false; active false; WordPress, Drupal.
    pub fn scenario_tables() -> Vec<DepartmentTable> {
        vec![
            DepartmentTable::new("Admissions").with_row(
                RowSpec {
                    id: "1",
                    title: "Apply",
                    environments: "prod, staging",
                    pope_tech: "true",
                    active: "true",
                    cms: "Drupal",
                }
                .cells(),
            ),
            DepartmentTable::new("IT").with_row(
                RowSpec {
                    id: "2",
                    title: "Portal",
                    environments: "prod",
                    pope_tech: "false",
                    active: "false",
                    cms: "WordPress, Drupal",
                }
                .cells(),
            ),
        ]
    }

    pub fn scenario_records() -> Vec<Record> {
        extract_records(&scenario_tables())
    }

    /// A wider dataset: several departments, mixed tokens, a few empty fields.
    pub fn campus_tables() -> Vec<DepartmentTable> {
        let rows = [
            ("Admissions", "1", "Apply", "prod, staging", "true", "true", "Drupal"),
            ("Admissions", "2", "Visit", "prod", "false", "true", "Drupal 7"),
            ("Athletics", "3", "Gophers", "dev, prod", "true", "false", "WordPress"),
            ("IT", "4", "Portal", "prod", "false", "false", "WordPress, Drupal"),
            ("IT", "5", "Status", "", "yes", "1", ""),
            ("Libraries", "6", "Catalog", "staging", "", "true", "Drupal"),
        ];
        let mut tables: Vec<DepartmentTable> = Vec::new();
        for (dept, id, title, envs, pope, active, cms) in rows {
            let cells = RowSpec {
                id,
                title,
                environments: envs,
                pope_tech: pope,
                active,
                cms,
            }
            .cells();
            match tables.iter_mut().find(|t| t.department == dept) {
                Some(table) => table.rows.push(cells),
                None => tables.push(DepartmentTable::new(dept).with_row(cells)),
            }
        }
        tables
    }

    pub fn campus_records() -> Vec<Record> {
        extract_records(&campus_tables())
    }
}
