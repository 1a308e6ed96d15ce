use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SiftError};
use crate::model::Record;
use chrono::{DateTime, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const EXPORT_HEADERS: [&str; 11] = [
    "Department",
    "Title",
    "Environments",
    "Aliases",
    "Owners",
    "Primary URL",
    "Notes",
    "Pope Tech",
    "Errors",
    "Active",
    "CMS",
];

const EXTENSION: &str = ".csv";

/// Writes `records` as CSV: a bare header line, then every field quoted.
pub fn write_csv<W: Write>(records: &[Record], mut writer: W) -> Result<()> {
    {
        let mut header = WriterBuilder::new()
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut writer);
        header.write_record(EXPORT_HEADERS)?;
        header.flush()?;
    }

    let mut rows = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(&mut writer);
    for record in records {
        rows.write_record(export_fields(record))?;
    }
    rows.flush()?;
    Ok(())
}

/// Export columns in header order. The id is not exported.
fn export_fields(record: &Record) -> [&str; 11] {
    [
        &record.department,
        &record.title,
        &record.environments.raw,
        &record.aliases,
        &record.owners,
        &record.primary_url,
        &record.notes,
        &record.pope_tech.raw,
        &record.errors,
        &record.active.raw,
        &record.cms.raw,
    ]
}

/// Writes `records` to `path`. Nothing is created when there is nothing to export.
pub fn export(records: &[Record], path: &Path) -> Result<CmdResult> {
    if records.is_empty() {
        return Err(SiftError::NothingToExport);
    }

    let file = File::create(path).map_err(SiftError::Io)?;
    write_csv(records, BufWriter::new(file))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} records to {}",
        records.len(),
        path.display()
    )));
    Ok(result)
}

/// `<prefix>[_search-<term>][_filtered]_<YYYY-MM-DDTHH-MM-SS>`, without an extension.
pub fn default_export_filename(
    prefix: &str,
    term: &str,
    filtered: bool,
    now: DateTime<Utc>,
) -> String {
    let mut name = prefix.to_string();
    if !term.is_empty() {
        name.push_str("_search-");
        name.push_str(&filename_safe(term));
    }
    if filtered {
        name.push_str("_filtered");
    }
    name.push('_');
    name.push_str(&now.format("%Y-%m-%dT%H-%M-%S").to_string());
    name
}

/// Characters that are not allowed in a file name on common platforms become `-`.
fn filename_safe(term: &str) -> String {
    term.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect()
}

/// Trims user input and drops a trailing `.csv`; the caller appends the extension.
pub fn normalize_export_filename(input: &str) -> Result<String> {
    let trimmed = input.trim();
    let stem = match trimmed.len().checked_sub(EXTENSION.len()) {
        Some(split)
            if trimmed.is_char_boundary(split)
                && trimmed[split..].eq_ignore_ascii_case(EXTENSION) =>
        {
            trimmed[..split].trim_end()
        }
        _ => trimmed,
    };
    if stem.is_empty() {
        return Err(SiftError::EmptyFileName);
    }
    Ok(stem.to_string())
}

/// The file name a stem is written under.
pub fn with_extension(stem: &str) -> String {
    format!("{}{}", stem, EXTENSION)
}
