use crate::error::SiftError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Number of cells a table row needs before it becomes a [`Record`].
pub const MIN_ROW_CELLS: usize = 11;

/// Raw tokens that count as an affirmative boolean, compared after trim + lowercase.
pub const TRUTHY_TOKENS: [&str; 3] = ["true", "yes", "1"];

/// A boolean-like column (Pope Tech, Active).
///
/// The raw token is kept verbatim: filters match it exactly and the CSV export writes it
/// back unchanged. `value` is the canonical reading used for badges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    pub raw: String,
    pub value: bool,
}

impl Flag {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        Self {
            raw: raw.to_string(),
            value: TRUTHY_TOKENS.contains(&normalized.as_str()),
        }
    }

    /// Badge text shown instead of the raw token.
    pub fn label(&self) -> &'static str {
        if self.value {
            "Yes"
        } else {
            "No"
        }
    }
}

/// A comma-joined multi-value column (Environments, CMS).
///
/// `tokens` is parsed once at ingestion: split on commas, trimmed, empties and repeats
/// dropped, source order kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiValue {
    pub raw: String,
    pub tokens: Vec<String>,
}

impl MultiValue {
    pub fn parse(raw: &str) -> Self {
        let mut tokens: Vec<String> = Vec::new();
        for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if !tokens.iter().any(|existing| existing == token) {
                tokens.push(token.to_string());
            }
        }
        Self {
            raw: raw.to_string(),
            tokens,
        }
    }
}

/// One row of the inventory, owned by a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub department: String,
    pub id: String,
    pub title: String,
    pub environments: MultiValue,
    pub aliases: String,
    pub owners: String,
    pub primary_url: String,
    pub notes: String,
    pub pope_tech: Flag,
    pub errors: String,
    pub active: Flag,
    pub cms: MultiValue,
}

impl Record {
    /// Builds a record from the cells of a rendered department table row.
    ///
    /// Cells are read from fixed positions 0..=10; anything past that is ignored. Returns
    /// `None` for short rows.
    pub fn from_row<C: AsRef<str>>(department: &str, cells: &[C]) -> Option<Self> {
        if cells.len() < MIN_ROW_CELLS {
            return None;
        }
        let cell = |i: usize| cells[i].as_ref().trim().to_string();
        Some(Self {
            department: department.trim().to_string(),
            id: cell(0),
            title: cell(1),
            environments: MultiValue::parse(&cell(2)),
            aliases: cell(3),
            owners: cell(4),
            primary_url: cell(5),
            notes: cell(6),
            pope_tech: Flag::parse(&cell(7)),
            errors: cell(8),
            active: Flag::parse(&cell(9)),
            cms: MultiValue::parse(&cell(10)),
        })
    }

    /// Every raw field value, the haystack for free-text search.
    pub fn field_values(&self) -> [&str; 12] {
        [
            &self.department,
            &self.id,
            &self.title,
            &self.environments.raw,
            &self.aliases,
            &self.owners,
            &self.primary_url,
            &self.notes,
            &self.pope_tech.raw,
            &self.errors,
            &self.active.raw,
            &self.cms.raw,
        ]
    }

    /// The raw field a filter category inspects.
    pub fn category_value(&self, category: Category) -> &str {
        match category {
            Category::Departments => &self.department,
            Category::Environments => &self.environments.raw,
            Category::PopeTech => &self.pope_tech.raw,
            Category::Active => &self.active.raw,
            Category::Cms => &self.cms.raw,
        }
    }
}

/// The fixed set of filter categories, declared in evaluation order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Departments,
    Environments,
    PopeTech,
    Active,
    Cms,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Departments,
        Category::Environments,
        Category::PopeTech,
        Category::Active,
        Category::Cms,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Departments => "departments",
            Category::Environments => "environments",
            Category::PopeTech => "popetech",
            Category::Active => "active",
            Category::Cms => "cms",
        }
    }

    /// Heading used by the options panel.
    pub fn heading(&self) -> &'static str {
        match self {
            Category::Departments => "Departments",
            Category::Environments => "Environments",
            Category::PopeTech => "Pope Tech",
            Category::Active => "Active",
            Category::Cms => "CMS",
        }
    }

    /// Environments and CMS hold comma-joined lists; the rest hold one token.
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, Category::Environments | Category::Cms)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Category::PopeTech | Category::Active)
    }

    /// Display text for an option value: booleans read as Yes/No.
    pub fn option_label(&self, value: &str) -> String {
        if self.is_boolean() {
            match value {
                "true" => return "Yes".to_string(),
                "false" => return "No".to_string(),
                _ => {}
            }
        }
        value.to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "departments" | "department" | "dept" => Ok(Category::Departments),
            "environments" | "environment" | "env" => Ok(Category::Environments),
            "popetech" | "pope_tech" | "pope-tech" | "pope" => Ok(Category::PopeTech),
            "active" => Ok(Category::Active),
            "cms" => Ok(Category::Cms),
            other => Err(SiftError::UnknownCategory(other.to_string())),
        }
    }
}

/// The single mutable piece of the engine: search term, selections, highlight toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    search_term: String,
    selections: BTreeMap<Category, Vec<String>>,
    pub highlight_enabled: bool,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Stores the trimmed, lowercased term.
    pub fn set_search_term(&mut self, raw: &str) {
        self.search_term = raw.trim().to_lowercase();
    }

    pub fn clear_search(&mut self) {
        self.search_term.clear();
    }

    pub fn has_search(&self) -> bool {
        !self.search_term.is_empty()
    }

    pub fn selection(&self, category: Category) -> &[String] {
        self.selections
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Replaces a category's selection. Repeated values collapse to the first occurrence.
    pub fn set_selection<I, V>(&mut self, category: Category, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let mut deduped: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !deduped.contains(&value) {
                deduped.push(value);
            }
        }
        if deduped.is_empty() {
            self.selections.remove(&category);
        } else {
            self.selections.insert(category, deduped);
        }
    }

    /// Adds one value; returns false when it was already selected.
    pub fn add_selection(&mut self, category: Category, value: impl Into<String>) -> bool {
        let value = value.into();
        let values = self.selections.entry(category).or_default();
        if values.contains(&value) {
            return false;
        }
        values.push(value);
        true
    }

    /// Removes exactly one (category, value) pair; returns false when it was not selected.
    pub fn remove_selection(&mut self, category: Category, value: &str) -> bool {
        let Some(values) = self.selections.get_mut(&category) else {
            return false;
        };
        let before = values.len();
        values.retain(|v| v != value);
        let removed = values.len() != before;
        if values.is_empty() {
            self.selections.remove(&category);
        }
        removed
    }

    pub fn clear_selections(&mut self) {
        self.selections.clear();
    }

    pub fn has_active_filters(&self) -> bool {
        self.selections.values().any(|values| !values.is_empty())
    }

    /// Non-empty selections in evaluation order.
    pub fn active_filters(&self) -> impl Iterator<Item = (Category, &[String])> {
        self.selections
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(category, values)| (*category, values.as_slice()))
    }

    /// Back to an empty term and no selections. The highlight toggle survives.
    pub fn reset(&mut self) {
        self.clear_search();
        self.clear_selections();
    }
}
