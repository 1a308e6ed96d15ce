//! # CLI Templates
//!
//! Terminal output is produced by minijinja templates kept as stand-alone `.tmp` files and
//! embedded here at compile time, so layout can be edited and diffed without touching code.
//!
//! Templates use explicit `{{ "\n" }}` line breaks and whitespace-trimming tags. Loops and
//! conditionals stay readable that way, and it is always clear where a blank line comes from.
//!
//! Width math (column sizes, truncation, padding) happens in Rust before the data reaches a
//! template; templates only pick style names and arrange pieces. `chips` is a partial that
//! the results and panel templates include.

pub const CHIPS_TEMPLATE: &str = include_str!("templates/chips.tmp");
pub const RESULTS_TEMPLATE: &str = include_str!("templates/results.tmp");
pub const PANEL_TEMPLATE: &str = include_str!("templates/panel.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
pub const CONFIG_TEMPLATE: &str = include_str!("templates/config.tmp");

/// Every template with the name it is registered and included under.
pub const ALL: [(&str, &str); 5] = [
    ("chips", CHIPS_TEMPLATE),
    ("results", RESULTS_TEMPLATE),
    ("panel", PANEL_TEMPLATE),
    ("messages", MESSAGES_TEMPLATE),
    ("config", CONFIG_TEMPLATE),
];
