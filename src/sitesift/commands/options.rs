//! Filter option derivation.
//!
//! Options are always computed from the search-only context: the records that match the
//! current term, ignoring selections. That way choosing one category never hides the
//! alternatives in another.

use crate::commands::evaluate::search_only;
use crate::model::{Category, FilterState, Record};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Values offered for boolean categories when there is nothing to look at.
const BOOLEAN_DEFAULTS: [&str; 2] = ["true", "false"];

/// Distinct selectable values per category, each list sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    values: BTreeMap<Category, Vec<String>>,
}

impl FilterOptions {
    pub fn values(&self, category: Category) -> &[String] {
        self.values
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.values(category)))
    }
}

pub fn derive_options(context: &[Record]) -> FilterOptions {
    let mut values = BTreeMap::new();

    if context.is_empty() {
        for category in Category::ALL {
            let defaults = if category.is_boolean() {
                BOOLEAN_DEFAULTS.iter().map(|v| v.to_string()).collect()
            } else {
                Vec::new()
            };
            values.insert(category, defaults);
        }
        return FilterOptions { values };
    }

    for category in Category::ALL {
        let mut distinct: BTreeSet<String> = BTreeSet::new();
        for record in context {
            let raw = record.category_value(category);
            if category.is_multi_valued() {
                distinct.extend(
                    raw.split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(String::from),
                );
            } else if !raw.is_empty() {
                distinct.insert(raw.to_string());
            }
        }
        values.insert(category, distinct.into_iter().collect());
    }
    FilterOptions { values }
}

/// The records options are derived from: search matches when a term is set, else everything.
pub fn options_context(dataset: &[Record], state: &FilterState) -> Vec<Record> {
    search_only(dataset, state.search_term())
}

/// Whether the filters currently narrow search results or the whole dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelScope {
    SearchResults,
    AllData,
}

impl PanelScope {
    pub fn describe(&self) -> &'static str {
        match self {
            PanelScope::SearchResults => "search results",
            PanelScope::AllData => "all data",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionEntry {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOptions {
    pub category: Category,
    pub heading: &'static str,
    pub count: usize,
    pub entries: Vec<OptionEntry>,
}

/// Everything the filter panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterPanel {
    pub scope: PanelScope,
    pub scope_label: &'static str,
    pub categories: Vec<CategoryOptions>,
}

/// Derives options for `state` and marks the ones already selected.
pub fn build_panel(dataset: &[Record], state: &FilterState) -> FilterPanel {
    let options = derive_options(&options_context(dataset, state));
    let scope = if state.has_search() {
        PanelScope::SearchResults
    } else {
        PanelScope::AllData
    };

    let categories = options
        .iter()
        .map(|(category, values)| {
            let selected = state.selection(category);
            let entries: Vec<OptionEntry> = values
                .iter()
                .map(|value| OptionEntry {
                    value: value.clone(),
                    label: category.option_label(value),
                    selected: selected.contains(value),
                })
                .collect();
            CategoryOptions {
                category,
                heading: category.heading(),
                count: entries.len(),
                entries,
            }
        })
        .collect();

    FilterPanel {
        scope,
        scope_label: scope.describe(),
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::fixtures::{campus_records, scenario_records};

    fn is_sorted_distinct(values: &[String]) -> bool {
        values.windows(2).all(|w| w[0] < w[1])
    }

    #[test]
    fn test_values_are_distinct_and_sorted() {
        let options = derive_options(&campus_records());
        for (category, values) in options.iter() {
            assert!(is_sorted_distinct(values), "{} not sorted: {:?}", category, values);
        }
        assert_eq!(
            options.values(Category::Departments),
            ["Admissions", "Athletics", "IT", "Libraries"]
        );
        assert_eq!(
            options.values(Category::Environments),
            ["dev", "prod", "staging"]
        );
        assert_eq!(
            options.values(Category::Cms),
            ["Drupal", "Drupal 7", "WordPress"]
        );
        // raw tokens, empty pope_tech dropped
        assert_eq!(options.values(Category::PopeTech), ["false", "true", "yes"]);
        assert_eq!(options.values(Category::Active), ["1", "false", "true"]);
    }

    #[test]
    fn test_empty_context_defaults() {
        let options = derive_options(&[]);
        assert_eq!(options.values(Category::PopeTech), ["true", "false"]);
        assert_eq!(options.values(Category::Active), ["true", "false"]);
        assert!(options.values(Category::Departments).is_empty());
        assert!(options.values(Category::Environments).is_empty());
        assert!(options.values(Category::Cms).is_empty());
    }

    #[test]
    fn test_context_ignores_selections() {
        let data = scenario_records();
        let mut state = FilterState::new();
        state.set_selection(Category::Departments, ["IT"]);
        let panel = build_panel(&data, &state);
        let depts = &panel.categories[0];
        assert_eq!(depts.category, Category::Departments);
        assert_eq!(depts.count, 2);
        assert!(depts.entries.iter().any(|e| e.value == "Admissions" && !e.selected));
        assert!(depts.entries.iter().any(|e| e.value == "IT" && e.selected));
        assert_eq!(panel.scope, PanelScope::AllData);
    }

    #[test]
    fn test_search_narrows_options() {
        let data = scenario_records();
        let mut state = FilterState::new();
        state.set_search_term("portal");
        let panel = build_panel(&data, &state);
        assert_eq!(panel.scope_label, "search results");
        let cms: Vec<_> = panel.categories[4]
            .entries
            .iter()
            .map(|e| e.value.as_str())
            .collect();
        assert_eq!(cms, vec!["Drupal", "WordPress"]);
        let active = &panel.categories[3];
        assert_eq!(active.heading, "Active");
        assert_eq!(active.entries[0].label, "No");
    }

    #[test]
    fn test_search_with_no_matches_falls_back_to_defaults() {
        let data = scenario_records();
        let mut state = FilterState::new();
        state.set_search_term("zzz");
        let panel = build_panel(&data, &state);
        let pope = &panel.categories[2];
        assert_eq!(pope.heading, "Pope Tech");
        let labels: Vec<_> = pope.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Yes", "No"]);
    }
}
