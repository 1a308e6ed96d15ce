//! # Sitesift Architecture
//!
//! Sitesift is a **UI-agnostic search and filter engine** over a site inventory that arrives
//! already grouped by department. The engine takes the inventory once, then answers every
//! search keystroke and filter change locally: no server round trip, no persistence.
//!
//! The CLI is one client of the library. A browser shell or a TUI could drive the same
//! session type without changes to anything below `api.rs`.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders views, runs the event shell    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session Layer (api.rs)                                     │
//! │  - Owns the dataset and the single FilterState              │
//! │  - Every handler mutates state, then recomputes everything  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure functions of (dataset, state)                       │
//! │  - evaluate, derive_options, render, derive_chips, export   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Source Layer (source/)                                     │
//! │  - RecordSource trait + the one-time table extractor        │
//! │  - JSON tables, CSV export files, in-memory (tests)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recompute, never patch
//!
//! Result sets and filter options are never updated incrementally. Each event writes to the
//! [`model::FilterState`] and the session re-derives the result set, the options panel (when
//! open) and the view from scratch. The last write always wins.
//!
//! ## Module Overview
//!
//! - [`api`]: `SiteSift`, the session that owns state and exposes the event handlers
//! - [`commands`]: query engine, option deriver, renderer, chips, CSV export
//! - [`source`]: data-source abstraction and the dataset extractor
//! - [`model`]: `Record`, `Flag`, `MultiValue`, `Category`, `FilterState`
//! - [`highlight`]: literal, case-insensitive match segmentation
//! - [`debounce`]: cancel-and-reschedule timer driven by caller time
//! - [`config`]: configuration management
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod debounce;
pub mod error;
pub mod highlight;
pub mod model;
pub mod source;
