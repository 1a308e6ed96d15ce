//! # Session API
//!
//! [`SiteSift`] is the single entry point for every front end. It owns the dataset, the one
//! [`FilterState`], the current result set and the options panel flag, and nothing else in
//! the crate keeps state.
//!
//! ## Recompute, never patch
//!
//! Every handler mutates the filter state and then rebuilds the result set from scratch:
//!
//! ```text
//! event -> FilterState -> evaluate -> derive options (panel open) -> view
//! ```
//!
//! Handlers return nothing. Callers pull what they need afterwards through [`SiteSift::view`],
//! [`SiteSift::options`], [`SiteSift::chips`] and friends.
//!
//! ## Typed search input
//!
//! [`SiteSift::input_search`] goes through a [`Debouncer`]: the term is committed once
//! [`SiteSift::tick`] sees the quiet window pass, or at once on [`SiteSift::flush`]. Input that
//! trims to nothing skips the window and clears the search immediately.
//!
//! ## Generic Over RecordSource
//!
//! - Production: `SiteSift<FileSource>`, JSON tables or an exported CSV picked by extension
//! - Testing: `SiteSift<InMemorySource>`

use crate::commands::{self, chips::Chip, options::FilterPanel, render::ResultsView};
use crate::config::SiftConfig;
use crate::debounce::Debouncer;
use crate::error::{Result, SiftError};
use crate::model::{Category, FilterState, Record};
use crate::source::RecordSource;
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct SiteSift<S: RecordSource> {
    source: S,
    config: SiftConfig,
    dataset: Vec<Record>,
    state: FilterState,
    current: Vec<Record>,
    panel: Option<FilterPanel>,
    panel_open: bool,
    search_input: Debouncer<String>,
}

impl<S: RecordSource> SiteSift<S> {
    /// Loads the dataset once and starts with an empty filter state.
    pub fn open(source: S, config: SiftConfig) -> Result<Self> {
        let dataset = source.load_initial_records()?;
        info!(
            records = dataset.len(),
            source = %source.describe(),
            "loaded dataset"
        );

        let mut state = FilterState::new();
        state.highlight_enabled = config.highlight;
        let mut session = Self {
            source,
            search_input: Debouncer::new(Duration::from_millis(config.debounce_ms)),
            config,
            current: Vec::new(),
            dataset,
            state,
            panel: None,
            panel_open: false,
        };
        session.recompute();
        Ok(session)
    }

    // --- search ---

    /// Typed input. Committed after the quiet window, or immediately when it trims to empty.
    pub fn input_search(&mut self, raw: &str, now: Instant) {
        if raw.trim().is_empty() {
            self.search_input.cancel();
            self.clear_search();
        } else {
            self.search_input.schedule(raw.to_string(), now);
        }
    }

    /// Commits pending input whose window has passed. Returns true when a search ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.search_input.poll(now) {
            Some(raw) => {
                self.commit_search(&raw);
                true
            }
            None => false,
        }
    }

    /// Commits pending input right away. Returns true when a search ran.
    pub fn flush(&mut self) -> bool {
        match self.search_input.flush() {
            Some(raw) => {
                self.commit_search(&raw);
                true
            }
            None => false,
        }
    }

    pub fn has_pending_search(&self) -> bool {
        self.search_input.is_pending()
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.search_input.deadline()
    }

    /// Immediate search, superseding any pending typed input.
    pub fn set_search(&mut self, raw: &str) {
        self.search_input.cancel();
        self.commit_search(raw);
    }

    /// Clears the term. Active filters keep applying to the whole dataset.
    pub fn clear_search(&mut self) {
        self.state.clear_search();
        self.recompute();
    }

    fn commit_search(&mut self, raw: &str) {
        self.state.set_search_term(raw);
        self.recompute();
    }

    // --- filters ---

    pub fn set_filter<I, V>(&mut self, category: Category, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.state.set_selection(category, values);
        self.recompute();
    }

    pub fn add_filter(&mut self, category: Category, value: &str) {
        if self.state.add_selection(category, value) {
            debug!(%category, value, "filter added");
        }
        self.recompute();
    }

    /// Removes exactly one (category, value) pair, as when a chip is dismissed.
    pub fn remove_filter(&mut self, category: Category, value: &str) {
        if self.state.remove_selection(category, value) {
            debug!(%category, value, "filter removed");
        }
        self.recompute();
    }

    pub fn clear_all_filters(&mut self) {
        self.state.clear_selections();
        self.recompute();
    }

    // --- toggles ---

    pub fn toggle_highlight(&mut self) {
        self.state.highlight_enabled = !self.state.highlight_enabled;
        self.recompute();
    }

    pub fn open_filter_panel(&mut self) {
        self.panel_open = true;
        self.recompute();
    }

    pub fn close_filter_panel(&mut self) {
        self.panel_open = false;
        self.recompute();
    }

    pub fn toggle_filter_panel(&mut self) {
        self.panel_open = !self.panel_open;
        self.recompute();
    }

    // --- refresh ---

    /// Re-reads the source after an out-of-band change. The filter state is kept.
    pub fn reload(&mut self) -> Result<()> {
        self.dataset = self.source.load_initial_records()?;
        info!(records = self.dataset.len(), "reloaded dataset");
        self.recompute();
        Ok(())
    }

    fn recompute(&mut self) {
        self.current = commands::evaluate::evaluate_with(
            &self.dataset,
            &self.state,
            self.config.multi_value_match,
        );
        self.panel = if self.panel_open {
            Some(commands::options::build_panel(&self.dataset, &self.state))
        } else {
            None
        };
    }

    // --- accessors ---

    /// Records matching the current search and filters, in dataset order.
    pub fn current_dataset(&self) -> &[Record] {
        &self.current
    }

    pub fn dataset(&self) -> &[Record] {
        &self.dataset
    }

    pub fn search_term(&self) -> &str {
        self.state.search_term()
    }

    pub fn active_filters(&self) -> impl Iterator<Item = (Category, &[String])> {
        self.state.active_filters()
    }

    pub fn has_active_filters(&self) -> bool {
        self.state.has_active_filters()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn highlight_enabled(&self) -> bool {
        self.state.highlight_enabled
    }

    pub fn is_filter_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn config(&self) -> &SiftConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn view(&self) -> ResultsView {
        commands::render::render(&self.current, self.dataset.len(), &self.state)
    }

    /// The filter panel, present only while it is open.
    pub fn options(&self) -> Option<&FilterPanel> {
        self.panel.as_ref()
    }

    pub fn chips(&self) -> Vec<Chip> {
        commands::chips::derive_chips(&self.state)
    }

    /// Writes the current results as CSV. An empty result set is refused.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<()> {
        if self.current.is_empty() {
            return Err(SiftError::NothingToExport);
        }
        commands::export::write_csv(&self.current, writer)
    }

    pub fn export_to(&self, path: &Path) -> Result<commands::CmdResult> {
        commands::export::export(&self.current, path)
    }

    pub fn default_export_filename(&self, now: DateTime<Utc>) -> String {
        commands::export::default_export_filename(
            &self.config.export_prefix,
            self.state.search_term(),
            self.state.has_active_filters(),
            now,
        )
    }
}
