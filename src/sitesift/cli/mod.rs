//! # CLI Behavior
//!
//! One possible front end for sitesift. The CLI is the only place that knows about terminal
//! I/O, exit codes, and output formatting.
//!
//! ## One-shot Commands
//!
//! `query`, `options` and `export` each open the data file, apply the search and filter flags
//! once, and print. They are how the engine is scripted:
//!
//! ```text
//! sitesift --data sites.json query --search apply --cms Drupal
//! sitesift --data sites.json options --search portal
//! sitesift --data sites.json export --env prod -o prod-sites
//! ```
//!
//! With no search and no filters, `query` prints no table, only a loaded-records line.
//! An export with nothing to write is refused and exits non-zero.
//!
//! ## The Shell
//!
//! `sitesift shell` keeps one session alive and reads commands line by line, the terminal
//! counterpart of typing into the search box and ticking checkboxes. See [`shell`].
//!
//! ## Module Structure
//!
//! - `commands`: context setup and one handler per subcommand
//! - `render`: table layout and template rendering
//! - `setup`: argument parsing via clap
//! - `shell`: the interactive loop
//! - `styles` / `theme`: named terminal styles
//! - `templates`: output templates

mod commands;
mod render;
pub mod setup;
mod shell;
mod styles;
mod templates;
mod theme;

pub use commands::run;
