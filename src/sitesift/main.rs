//! # Sitesift CLI Architecture
//!
//! The binary is thin: the CLI lives in `src/sitesift/cli/`, and this file only invokes
//! `cli::run()` and handles process termination.
//!
//! ## Layering
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/sitesift/cli/)                               │
//! │  - clap argument parsing (setup.rs)                          │
//! │  - context wiring and handlers (commands.rs, shell.rs)       │
//! │  - terminal rendering via minijinja templates (render.rs)    │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  API Layer (src/sitesift/api.rs)                             │
//! │  - owns the dataset, the filter state and the debouncer      │
//! │  - recomputes results after every change                     │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Command Layer (src/sitesift/commands/*)                     │
//! │  - pure evaluate / options / render / chips / export         │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Source Layer (src/sitesift/source/*)                        │
//! │  - JSON tables, exported CSV, in-memory tables               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI owns argument parsing, context
//! initialization, error reporting and rendering.
//!
//! ## Testing Approach
//!
//! - Command layer: unit tests of the pure operations against fixture tables.
//! - API layer: session tests over an in-memory source.
//! - CLI layer: rendering tests with canned views, shell tests over a scripted reader, and
//!   end-to-end tests in `tests/` that run the binary against temporary data files.

use colored::Colorize;

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
