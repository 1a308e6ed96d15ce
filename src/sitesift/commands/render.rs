//! Turns a result set into a display model.
//!
//! The view carries no markup. Text cells are lists of [`Segment`]s so any front end can
//! decide how a highlighted match looks; the CLI styles them through its templates.

use crate::highlight::{Highlighter, Segment};
use crate::model::{Flag, FilterState, Record};
use serde::Serialize;

pub const FOOTER: &str = "End of matching results";

/// Yes/No display of a boolean-like column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub affirmative: bool,
    pub label: Vec<Segment>,
    /// The token as it appeared in the source, used for tooltips.
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub ordinal: usize,
    pub department: Vec<Segment>,
    pub title: Vec<Segment>,
    pub environments: Vec<Segment>,
    pub aliases: Vec<Segment>,
    pub owners: Vec<Segment>,
    pub primary_url: Vec<Segment>,
    pub notes: Vec<Segment>,
    pub pope_tech: Badge,
    pub errors: Vec<Segment>,
    pub active: Badge,
    pub cms: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ResultsView {
    /// Neither a search term nor a filter is active.
    Hidden,
    Empty {
        message: String,
    },
    Table {
        header: String,
        count_line: String,
        rows: Vec<ResultRow>,
        footer: String,
    },
}

impl ResultsView {
    pub fn is_hidden(&self) -> bool {
        matches!(self, ResultsView::Hidden)
    }

    pub fn rows(&self) -> &[ResultRow] {
        match self {
            ResultsView::Table { rows, .. } => rows,
            _ => &[],
        }
    }
}

pub fn render(results: &[Record], dataset_len: usize, state: &FilterState) -> ResultsView {
    let has_search = state.has_search();
    let has_filters = state.has_active_filters();

    if !has_search && !has_filters {
        return ResultsView::Hidden;
    }

    if results.is_empty() {
        let message = match (has_search, has_filters) {
            (true, true) => "No results matching search and filter criteria",
            (true, false) => "No results matching search criteria",
            _ => "No results matching filter criteria",
        };
        return ResultsView::Empty {
            message: message.to_string(),
        };
    }

    let header = match (has_search, has_filters) {
        (true, true) => "Search & Filter Results",
        (true, false) => "Search Results",
        _ => "Filter Results",
    };

    let highlighter = if state.highlight_enabled && has_search {
        Highlighter::new(state.search_term())
    } else {
        Highlighter::none()
    };

    let rows = results
        .iter()
        .enumerate()
        .map(|(i, record)| render_row(i + 1, record, &highlighter))
        .collect();

    ResultsView::Table {
        header: header.to_string(),
        count_line: count_line(results.len(), dataset_len, state.search_term()),
        rows,
        footer: FOOTER.to_string(),
    }
}

pub fn count_line(shown: usize, total: usize, term: &str) -> String {
    let matching = if term.is_empty() {
        String::new()
    } else {
        format!(" matching \"{}\"", term)
    };
    format!("Showing {} of {} results{}", shown, total, matching)
}

fn render_row(ordinal: usize, record: &Record, highlighter: &Highlighter) -> ResultRow {
    let text = |value: &str| highlighter.segments(value);
    ResultRow {
        ordinal,
        department: text(&record.department),
        title: text(&record.title),
        environments: text(&record.environments.raw),
        aliases: text(&record.aliases),
        owners: text(&record.owners),
        primary_url: text(&record.primary_url),
        notes: text(&record.notes),
        pope_tech: badge(&record.pope_tech, highlighter),
        errors: text(&record.errors),
        active: badge(&record.active, highlighter),
        cms: text(&record.cms.raw),
    }
}

fn badge(flag: &Flag, highlighter: &Highlighter) -> Badge {
    Badge {
        affirmative: flag.value,
        label: highlighter.segments(flag.label()),
        raw: flag.raw.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::evaluate::evaluate;
    use crate::highlight::plain_text;
    use crate::model::Category;
    use crate::source::memory::fixtures::scenario_records;

    #[test]
    fn test_hidden_without_search_or_filters() {
        let data = scenario_records();
        let state = FilterState::new();
        assert_eq!(evaluate(&data, &state), data);
        assert!(render(&data, data.len(), &state).is_hidden());
    }

    #[test]
    fn test_empty_messages() {
        let mut state = FilterState::new();
        state.set_search_term("x");
        assert_eq!(
            render(&[], 2, &state),
            ResultsView::Empty {
                message: "No results matching search criteria".into()
            }
        );
        state.add_selection(Category::Active, "true");
        assert_eq!(
            render(&[], 2, &state),
            ResultsView::Empty {
                message: "No results matching search and filter criteria".into()
            }
        );
        state.clear_search();
        assert_eq!(
            render(&[], 2, &state),
            ResultsView::Empty {
                message: "No results matching filter criteria".into()
            }
        );
    }

    #[test]
    fn test_table_header_and_count() {
        let data = scenario_records();
        let mut state = FilterState::new();
        state.set_search_term("apply");
        let results = evaluate(&data, &state);
        match render(&results, data.len(), &state) {
            ResultsView::Table {
                header,
                count_line,
                rows,
                footer,
            } => {
                assert_eq!(header, "Search Results");
                assert_eq!(count_line, "Showing 1 of 2 results matching \"apply\"");
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].ordinal, 1);
                assert_eq!(footer, "End of matching results");
            }
            other => panic!("expected table, got {:?}", other),
        }

        state.clear_search();
        state.add_selection(Category::Cms, "Drupal");
        let results = evaluate(&data, &state);
        match render(&results, data.len(), &state) {
            ResultsView::Table {
                header, count_line, ..
            } => {
                assert_eq!(header, "Filter Results");
                assert_eq!(count_line, "Showing 2 of 2 results");
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_highlights_single_prod_in_it_environments() {
        let data = scenario_records();
        let mut state = FilterState::new();
        state.highlight_enabled = true;
        state.set_search_term("prod");
        let results = evaluate(&data, &state);
        let view = render(&results, data.len(), &state);

        let it_row = view
            .rows()
            .iter()
            .find(|row| plain_text(&row.department) == "IT")
            .unwrap();
        let matches: Vec<_> = it_row.environments.iter().filter(|s| s.is_match()).collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text(), "prod");
        assert_eq!(plain_text(&it_row.environments), "prod");
    }

    #[test]
    fn test_no_highlight_when_toggle_off() {
        let data = scenario_records();
        let mut state = FilterState::new();
        state.set_search_term("prod");
        let results = evaluate(&data, &state);
        let view = render(&results, data.len(), &state);
        assert!(view
            .rows()
            .iter()
            .all(|row| row.environments.iter().all(|s| !s.is_match())));
    }

    #[test]
    fn test_badges_highlight_label_not_raw() {
        let data = scenario_records();
        let mut state = FilterState::new();
        state.highlight_enabled = true;
        state.set_search_term("yes");
        // "yes" matches no record field, but check the badge directly
        let view = render(&data, data.len(), &state);
        let apply = &view.rows()[0];
        assert!(apply.pope_tech.affirmative);
        assert_eq!(apply.pope_tech.raw, "true");
        assert_eq!(apply.pope_tech.label, vec![Segment::Match("Yes".into())]);
        let portal = &view.rows()[1];
        assert_eq!(portal.active.label, vec![Segment::Plain("No".into())]);
    }
}
