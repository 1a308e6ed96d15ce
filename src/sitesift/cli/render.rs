//! # Rendering Module
//!
//! Turns the library's display models into terminal text through the templates in
//! `templates/`, or into JSON for `--format json`.
//!
//! Layout calculations (column widths, truncation, padding) stay in Rust because they need
//! Unicode-aware width handling. Templates only select style names and arrange pieces.
//!
//! Highlighted matches are styled with the `match` style. Without color that style is
//! invisible, so matches are wrapped in `*` before layout instead.

use super::styles::{names, SITESIFT_THEME};
use super::templates;
use super::theme::Renderer;
use serde::Serialize;
use sitesift::commands::chips::Chip;
use sitesift::commands::export::EXPORT_HEADERS;
use sitesift::commands::options::FilterPanel;
use sitesift::commands::render::{Badge, ResultRow, ResultsView};
use sitesift::commands::{CmdMessage, MessageLevel};
use sitesift::config::SiftConfig;
use sitesift::error::{Result, SiftError};
use sitesift::highlight::Segment;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a result column may get before its cells are truncated.
pub const COLUMN_MAX_WIDTH: usize = 32;
const ELLIPSIS: &str = "…";
const PLAIN_MATCH_MARKER: &str = "*";

#[derive(Serialize)]
struct Part {
    text: String,
    style: &'static str,
}

#[derive(Serialize)]
struct Cell {
    parts: Vec<Part>,
    padding: String,
}

#[derive(Serialize)]
struct ChipData {
    label: String,
    style: &'static str,
}

#[derive(Serialize)]
struct ResultsData {
    chips: Vec<ChipData>,
    state: &'static str,
    message: String,
    header: String,
    count_line: String,
    footer: String,
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

#[derive(Serialize)]
struct PanelData<'a> {
    scope_label: &'a str,
    categories: &'a [sitesift::commands::options::CategoryOptions],
    chips: Vec<ChipData>,
}

#[derive(Serialize)]
struct ChipsData {
    chips: Vec<ChipData>,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

#[derive(Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
}

#[derive(Serialize)]
struct ConfigData {
    entries: Vec<ConfigEntry>,
}

fn build_renderer(use_color: bool) -> std::result::Result<Renderer, minijinja::Error> {
    let mut renderer = Renderer::new(&SITESIFT_THEME, use_color);
    for (name, source) in templates::ALL {
        renderer.add_template(name, source)?;
    }
    Ok(renderer)
}

fn render_template<T: Serialize>(name: &str, data: &T, use_color: bool) -> String {
    build_renderer(use_color)
        .and_then(|renderer| renderer.render(name, data))
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

/// Renders the chips line followed by the results view.
pub fn render_results(view: &ResultsView, chips: &[Chip], total: usize, use_color: bool) -> String {
    let mut data = ResultsData {
        chips: chip_data(chips),
        state: "hidden",
        message: String::new(),
        header: String::new(),
        count_line: String::new(),
        footer: String::new(),
        columns: Vec::new(),
        rows: Vec::new(),
    };

    match view {
        ResultsView::Hidden => {
            data.message = format!(
                "No search or filters active. {} records loaded.",
                total
            );
        }
        ResultsView::Empty { message } => {
            data.state = "empty";
            data.message = message.clone();
        }
        ResultsView::Table {
            header,
            count_line,
            rows,
            footer,
        } => {
            data.state = "table";
            data.header = header.clone();
            data.count_line = count_line.clone();
            data.footer = footer.clone();
            let (columns, rows) = layout_table(rows, use_color);
            data.columns = columns;
            data.rows = rows;
        }
    }

    render_template("results", &data, use_color)
}

pub fn render_panel(panel: &FilterPanel, chips: &[Chip], use_color: bool) -> String {
    let data = PanelData {
        scope_label: panel.scope_label,
        categories: &panel.categories,
        chips: chip_data(chips),
    };
    render_template("panel", &data, use_color)
}

pub fn render_chips(chips: &[Chip], use_color: bool) -> String {
    if chips.is_empty() {
        return render_messages(&[CmdMessage::info("No active filters")], use_color);
    }
    let data = ChipsData {
        chips: chip_data(chips),
    };
    let mut out = render_template("chips", &data, use_color);
    out.push('\n');
    out
}

/// Renders command messages using the template system with themed styles.
pub fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let data = MessagesData {
        messages: messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                },
            })
            .collect(),
    };
    render_template("messages", &data, use_color)
}

pub fn print_messages(messages: &[CmdMessage], use_color: bool) {
    let output = render_messages(messages, use_color);
    if !output.is_empty() {
        print!("{}", output);
    }
}

pub fn render_config(config: &SiftConfig, use_color: bool) -> String {
    let data = ConfigData {
        entries: config
            .entries()
            .into_iter()
            .map(|(key, value)| ConfigEntry { key, value })
            .collect(),
    };
    render_template("config", &data, use_color)
}

/// Pretty JSON for `--format json`.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(SiftError::Json)
}

fn chip_data(chips: &[Chip]) -> Vec<ChipData> {
    chips
        .iter()
        .map(|chip| ChipData {
            label: format!("{}: {}", chip.category_label, chip.label),
            style: if SITESIFT_THEME.has(chip.color_class) {
                chip.color_class
            } else {
                names::CHIP_GRAY
            },
        })
        .collect()
}

/// One table cell before layout: its segments and the style for unhighlighted text.
struct RawCell {
    segments: Vec<Segment>,
    style: &'static str,
}

fn raw_cells(row: &ResultRow) -> Vec<RawCell> {
    let text = |segments: &Vec<Segment>| RawCell {
        segments: segments.clone(),
        style: names::REGULAR,
    };
    let badge = |badge: &Badge| RawCell {
        segments: badge.label.clone(),
        style: if badge.affirmative {
            names::BADGE_YES
        } else {
            names::BADGE_NO
        },
    };
    vec![
        RawCell {
            segments: vec![Segment::Plain(row.ordinal.to_string())],
            style: names::MUTED,
        },
        text(&row.department),
        text(&row.title),
        text(&row.environments),
        text(&row.aliases),
        text(&row.owners),
        text(&row.primary_url),
        text(&row.notes),
        badge(&row.pope_tech),
        text(&row.errors),
        badge(&row.active),
        text(&row.cms),
    ]
}

fn layout_table(rows: &[ResultRow], use_color: bool) -> (Vec<String>, Vec<Vec<Cell>>) {
    let headers: Vec<&str> = std::iter::once("#").chain(EXPORT_HEADERS).collect();

    let raw_rows: Vec<Vec<RawCell>> = rows
        .iter()
        .map(|row| {
            raw_cells(row)
                .into_iter()
                .map(|cell| {
                    let segments = one_line(&cell.segments);
                    RawCell {
                        segments: if use_color {
                            segments
                        } else {
                            mark_matches(&segments)
                        },
                        style: cell.style,
                    }
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let widest = raw_rows
                .iter()
                .map(|cells| segments_width(&cells[i].segments))
                .max()
                .unwrap_or(0);
            widest.max(header.width()).min(COLUMN_MAX_WIDTH)
        })
        .collect();

    let columns = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad_to(header, *width))
        .collect();

    let cells = raw_rows
        .into_iter()
        .map(|cells| {
            cells
                .into_iter()
                .zip(&widths)
                .map(|(cell, width)| {
                    let (fitted, used) = fit_segments(&cell.segments, *width);
                    Cell {
                        parts: fitted
                            .into_iter()
                            .map(|segment| Part {
                                style: if segment.is_match() {
                                    names::MATCH
                                } else {
                                    cell.style
                                },
                                text: segment.text().to_string(),
                            })
                            .collect(),
                        padding: " ".repeat(width.saturating_sub(used)),
                    }
                })
                .collect()
        })
        .collect();

    (columns, cells)
}

/// Line breaks inside a cell become spaces so every record stays on one table row.
fn one_line(segments: &[Segment]) -> Vec<Segment> {
    segments
        .iter()
        .map(|segment| {
            let text = segment.text().replace("\r\n", " ").replace(['\n', '\r'], " ");
            match segment {
                Segment::Match(_) => Segment::Match(text),
                Segment::Plain(_) => Segment::Plain(text),
            }
        })
        .collect()
}

fn mark_matches(segments: &[Segment]) -> Vec<Segment> {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Match(t) => {
                Segment::Match(format!("{0}{1}{0}", PLAIN_MATCH_MARKER, t))
            }
            plain => plain.clone(),
        })
        .collect()
}

fn segments_width(segments: &[Segment]) -> usize {
    segments.iter().map(|s| s.text().width()).sum()
}

fn pad_to(text: &str, width: usize) -> String {
    let (fitted, used) = fit_segments(&[Segment::Plain(text.to_string())], width);
    let mut out: String = fitted.iter().map(Segment::text).collect();
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Cuts segments down to `max_width` display columns, ending in an ellipsis when cut.
fn fit_segments(segments: &[Segment], max_width: usize) -> (Vec<Segment>, usize) {
    let total = segments_width(segments);
    if total <= max_width {
        return (segments.to_vec(), total);
    }

    let limit = max_width.saturating_sub(ELLIPSIS.width());
    let mut fitted = Vec::new();
    let mut used = 0;
    let mut full = false;

    for segment in segments {
        let mut text = String::new();
        for c in segment.text().chars() {
            let char_width = c.width().unwrap_or(0);
            if used + char_width > limit {
                full = true;
                break;
            }
            text.push(c);
            used += char_width;
        }
        if !text.is_empty() {
            fitted.push(match segment {
                Segment::Match(_) => Segment::Match(text),
                Segment::Plain(_) => Segment::Plain(text),
            });
        }
        if full {
            break;
        }
    }

    fitted.push(Segment::Plain(ELLIPSIS.to_string()));
    (fitted, used + ELLIPSIS.width())
}
