//! The query engine: free-text search intersected with every active category filter.
//!
//! Stages run in a fixed order (search, then departments, environments, popetech, active,
//! cms) and each one only narrows what the previous stage left. The dataset itself is never
//! touched; every call rebuilds the result from scratch.

use crate::config::MatchMode;
use crate::model::{Category, FilterState, Record};
use tracing::debug;

/// Evaluates `state` against `dataset` with the default multi-value matching.
pub fn evaluate(dataset: &[Record], state: &FilterState) -> Vec<Record> {
    evaluate_with(dataset, state, MatchMode::default())
}

pub fn evaluate_with(dataset: &[Record], state: &FilterState, mode: MatchMode) -> Vec<Record> {
    let mut results = search_only(dataset, state.search_term());

    for (category, selected) in state.active_filters() {
        if results.is_empty() {
            break;
        }
        results.retain(|record| matches_selection(record, category, selected, mode));
    }

    debug!(
        "Applied search \"{}\" and filters. Results: {}/{}",
        state.search_term(),
        results.len(),
        dataset.len()
    );
    results
}

/// Records containing `term` in any field. An empty term keeps everything.
///
/// `term` is expected to be normalized already (trimmed, lowercased).
pub fn search_only(dataset: &[Record], term: &str) -> Vec<Record> {
    if term.is_empty() {
        return dataset.to_vec();
    }
    dataset
        .iter()
        .filter(|record| matches_search(record, term))
        .cloned()
        .collect()
}

fn matches_search(record: &Record, term: &str) -> bool {
    record
        .field_values()
        .iter()
        .any(|value| value.to_lowercase().contains(term))
}

fn matches_selection(record: &Record, category: Category, selected: &[String], mode: MatchMode) -> bool {
    if !category.is_multi_valued() {
        let value = record.category_value(category);
        return selected.iter().any(|s| s == value);
    }

    match mode {
        MatchMode::Substring => {
            let haystack = record.category_value(category).to_lowercase();
            selected
                .iter()
                .any(|s| haystack.contains(&s.to_lowercase()))
        }
        MatchMode::Token => {
            let tokens = match category {
                Category::Environments => &record.environments.tokens,
                _ => &record.cms.tokens,
            };
            selected.iter().any(|s| {
                let wanted = s.to_lowercase();
                tokens.iter().any(|t| t.to_lowercase() == wanted)
            })
        }
    }
}
