//! Styles for the sitesift CLI.
//!
//! Templates use semantic names only (a count line is `muted`, a highlighted match is
//! `match`). The chip styles reuse the chip color classes from the library, so a chip's
//! `color_class` is also its style name.

use super::theme::{rgb_to_ansi256, Theme};
use console::Style;
use once_cell::sync::Lazy;

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const REGULAR: &str = "regular";
    pub const HEADER: &str = "header";
    pub const COLUMN: &str = "column";
    pub const MUTED: &str = "muted";
    pub const FAINT: &str = "faint";
    pub const MATCH: &str = "match";
    pub const BADGE_YES: &str = "badge-yes";
    pub const BADGE_NO: &str = "badge-no";
    pub const SELECTED: &str = "selected";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
    pub const CHIP_RED: &str = "chip-red";
    pub const CHIP_BLUE: &str = "chip-blue";
    pub const CHIP_GREEN: &str = "chip-green";
    pub const CHIP_YELLOW: &str = "chip-yellow";
    pub const CHIP_PURPLE: &str = "chip-purple";
    pub const CHIP_GRAY: &str = "chip-gray";
}

pub static SITESIFT_THEME: Lazy<Theme> = Lazy::new(build_theme);

fn build_theme() -> Theme {
    let maroon = Style::new().color256(rgb_to_ansi256((122, 0, 25)));
    let muted = Style::new().color256(rgb_to_ansi256((128, 128, 128)));
    let faint = Style::new().color256(rgb_to_ansi256((170, 170, 170)));
    let gold = rgb_to_ansi256((255, 204, 51));

    Theme::new()
        .add(names::REGULAR, Style::new())
        .add(names::HEADER, maroon.bold())
        .add(names::COLUMN, Style::new().bold())
        .add(names::MUTED, muted.clone())
        .add(names::FAINT, faint)
        .add(names::MATCH, Style::new().black().on_color256(gold))
        .add(names::BADGE_YES, Style::new().green().bold())
        .add(names::BADGE_NO, muted.clone())
        .add(names::SELECTED, Style::new().cyan().bold())
        .add(names::ERROR, Style::new().red().bold())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::SUCCESS, Style::new().green())
        .add(names::INFO, muted)
        .add(names::CHIP_RED, Style::new().red())
        .add(names::CHIP_BLUE, Style::new().blue())
        .add(names::CHIP_GREEN, Style::new().green())
        .add(names::CHIP_YELLOW, Style::new().yellow())
        .add(names::CHIP_PURPLE, Style::new().magenta())
        .add(names::CHIP_GRAY, Style::new().color256(rgb_to_ansi256((128, 128, 128))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_chip_color_has_a_style() {
        for class in [
            "chip-red",
            "chip-blue",
            "chip-green",
            "chip-yellow",
            "chip-purple",
            "chip-gray",
        ] {
            assert!(SITESIFT_THEME.has(class), "missing {}", class);
        }
    }
}
