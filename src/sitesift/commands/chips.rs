use crate::model::{Category, FilterState};
use serde::Serialize;

const FALLBACK_COLOR: &str = "chip-gray";

/// One active (category, value) selection, ready to display and remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chip {
    pub category: Category,
    pub value: String,
    pub label: String,
    pub category_label: &'static str,
    pub color_class: &'static str,
}

impl Category {
    pub fn chip_color(&self) -> &'static str {
        match self {
            Category::Departments => "chip-red",
            Category::Environments => "chip-blue",
            Category::PopeTech => "chip-green",
            Category::Active => "chip-yellow",
            Category::Cms => "chip-purple",
        }
    }

    pub fn chip_label(&self) -> &'static str {
        match self {
            Category::Departments => "Dept",
            Category::Environments => "Env",
            Category::PopeTech => "Pope",
            Category::Active => "Active",
            Category::Cms => "CMS",
        }
    }
}

fn canonical(name: &str) -> Option<Category> {
    Category::ALL.into_iter().find(|c| c.name() == name)
}

/// Color class by canonical category name; unknown names get the gray fallback.
pub fn chip_color(name: &str) -> &'static str {
    canonical(name).map_or(FALLBACK_COLOR, |c| c.chip_color())
}

/// Short label by canonical category name; unknown names are returned as given.
pub fn category_label(name: &str) -> String {
    canonical(name).map_or_else(|| name.to_string(), |c| c.chip_label().to_string())
}

/// Chips in category order, then in the order values were selected.
pub fn derive_chips(state: &FilterState) -> Vec<Chip> {
    state
        .active_filters()
        .flat_map(|(category, values)| {
            values.iter().map(move |value| Chip {
                category,
                value: value.clone(),
                label: category.option_label(value),
                category_label: category.chip_label(),
                color_class: category.chip_color(),
            })
        })
        .collect()
}
