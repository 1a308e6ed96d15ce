//! Line-oriented interactive session.
//!
//! Each input line is one UI event: a keystroke burst in the search box (`type`), a checkbox
//! toggle (`filter`/`unfilter`), a chip dismissal, a button. `type` goes through the
//! session's debouncer, so a run of `type` lines commits only the last one. Pending input
//! commits on its own once no line arrives for the debounce window. Any other command except
//! `quit` flushes it first, and so does end of input.

use super::render::{render_chips, render_messages, render_panel, render_results};
use chrono::Utc;
use colored::Colorize;
use sitesift::api::SiteSift;
use sitesift::commands::export::{normalize_export_filename, with_extension};
use sitesift::commands::render::ResultsView;
use sitesift::commands::CmdMessage;
use sitesift::error::Result;
use sitesift::model::Category;
use sitesift::source::RecordSource;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Instant;
use tracing::debug;

const PROMPT: &str = "sitesift>";

const HELP: &str = "\
search <text>            search immediately (no text clears the search)
type <text>              search once no new line arrives for debounce_ms
clear-search             clear the search term
filter <category> <v>    select a filter value
unfilter <category> <v>  remove one filter value
clear                    remove all filters
highlight                toggle match highlighting
panel                    open or close the filter panel
show                     print the results
chips                    print the active filters
export [file]            export the results to CSV
reload                   re-read the data file
quit                     leave the shell
Categories: departments, environments, popetech, active, cms";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(String),
    Type(String),
    ClearSearch,
    Filter(Category, String),
    Unfilter(Category, String),
    Clear,
    Highlight,
    Panel,
    Show,
    Chips,
    Export(Option<String>),
    Reload,
    Help,
    Quit,
    Nothing,
}

/// Parses one input line. The error is a usage message for the user.
pub fn parse_line(line: &str) -> std::result::Result<ShellCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ShellCommand::Nothing);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "search" | "s" => Ok(ShellCommand::Search(rest.to_string())),
        "type" | "t" => Ok(ShellCommand::Type(rest.to_string())),
        "clear-search" => Ok(ShellCommand::ClearSearch),
        "filter" | "f" => parse_selection(rest).map(|(cat, value)| ShellCommand::Filter(cat, value)),
        "unfilter" | "u" => {
            parse_selection(rest).map(|(cat, value)| ShellCommand::Unfilter(cat, value))
        }
        "clear" => Ok(ShellCommand::Clear),
        "highlight" | "h" => Ok(ShellCommand::Highlight),
        "panel" | "p" => Ok(ShellCommand::Panel),
        "show" => Ok(ShellCommand::Show),
        "chips" => Ok(ShellCommand::Chips),
        "export" | "e" => Ok(ShellCommand::Export(
            (!rest.is_empty()).then(|| rest.to_string()),
        )),
        "reload" => Ok(ShellCommand::Reload),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        other => Err(format!("Unknown command: {} (try help)", other)),
    }
}

fn parse_selection(rest: &str) -> std::result::Result<(Category, String), String> {
    let (category, value) = rest
        .split_once(char::is_whitespace)
        .map(|(cat, value)| (cat, value.trim()))
        .ok_or_else(|| "Usage: filter <category> <value>".to_string())?;
    let category: Category = category.parse().map_err(|e| format!("{}", e))?;
    Ok((category, value.to_string()))
}

/// Reads lines on a background thread, so the shell can wake up for a pending search while
/// no input arrives. The channel closes at end of input.
pub fn spawn_line_reader<R>(input: R) -> Receiver<io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in input.lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Drives a session from `lines` until `quit` or end of input.
///
/// While typed input is pending the loop waits for the next line only until the search
/// deadline, then commits the search without further input.
pub fn run_shell<S, W>(
    session: &mut SiteSift<S>,
    lines: Receiver<io::Result<String>>,
    mut out: W,
    use_color: bool,
    interactive: bool,
) -> Result<()>
where
    S: RecordSource,
    W: Write,
{
    write!(out, "{}", status(session, use_color))?;

    let mut prompt = true;
    loop {
        if interactive && prompt {
            write!(out, "{} ", PROMPT.bold().cyan())?;
            out.flush()?;
        }

        let next = match session.search_deadline() {
            Some(deadline) => {
                match lines.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                    Ok(line) => Some(line),
                    Err(RecvTimeoutError::Timeout) => {
                        prompt = session.tick(Instant::now());
                        if prompt {
                            if interactive {
                                writeln!(out)?;
                            }
                            write!(out, "{}", status(session, use_color))?;
                        }
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => None,
                }
            }
            None => lines.recv().ok(),
        };
        let Some(line) = next else { break };
        let line = line?;
        prompt = true;

        if session.tick(Instant::now()) {
            write!(out, "{}", status(session, use_color))?;
        }

        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(usage) => {
                write!(out, "{}", render_messages(&[CmdMessage::error(usage)], use_color))?;
                continue;
            }
        };
        debug!(?command, "shell command");

        let settles_input = !matches!(
            command,
            ShellCommand::Type(_) | ShellCommand::Nothing | ShellCommand::Quit
        );
        if settles_input && session.flush() {
            write!(out, "{}", status(session, use_color))?;
        }

        if !apply(session, command, &mut out, use_color)? {
            return Ok(());
        }
    }

    if session.flush() {
        write!(out, "{}", status(session, use_color))?;
    }
    Ok(())
}

/// Runs one command. Returns false when the shell should stop.
fn apply<S: RecordSource, W: Write>(
    session: &mut SiteSift<S>,
    command: ShellCommand,
    out: &mut W,
    use_color: bool,
) -> Result<bool> {
    match command {
        ShellCommand::Nothing => return Ok(true),
        ShellCommand::Quit => return Ok(false),
        ShellCommand::Help => {
            writeln!(out, "{}", HELP)?;
            return Ok(true);
        }
        ShellCommand::Type(text) => {
            session.input_search(&text, Instant::now());
            if session.has_pending_search() {
                return Ok(true);
            }
        }
        ShellCommand::Search(text) => session.set_search(&text),
        ShellCommand::ClearSearch => session.clear_search(),
        ShellCommand::Filter(category, value) => session.add_filter(category, &value),
        ShellCommand::Unfilter(category, value) => session.remove_filter(category, &value),
        ShellCommand::Clear => session.clear_all_filters(),
        ShellCommand::Highlight => {
            session.toggle_highlight();
            let state = if session.highlight_enabled() { "on" } else { "off" };
            let message = CmdMessage::info(format!("Highlighting {}", state));
            write!(out, "{}", render_messages(&[message], use_color))?;
            return Ok(true);
        }
        ShellCommand::Panel => {
            session.toggle_filter_panel();
            if !session.is_filter_panel_open() {
                let message = CmdMessage::info("Filter panel closed");
                write!(out, "{}", render_messages(&[message], use_color))?;
            }
        }
        ShellCommand::Show => {
            write!(
                out,
                "{}",
                render_results(
                    &session.view(),
                    &session.chips(),
                    session.dataset().len(),
                    use_color
                )
            )?;
            return Ok(true);
        }
        ShellCommand::Chips => {
            write!(out, "{}", render_chips(&session.chips(), use_color))?;
            return Ok(true);
        }
        ShellCommand::Export(name) => {
            let message = match export(session, name.as_deref()) {
                Ok(messages) => messages,
                Err(e) => vec![CmdMessage::error(e.to_string())],
            };
            write!(out, "{}", render_messages(&message, use_color))?;
            return Ok(true);
        }
        ShellCommand::Reload => {
            if let Err(e) = session.reload() {
                let message = CmdMessage::error(e.to_string());
                write!(out, "{}", render_messages(&[message], use_color))?;
                return Ok(true);
            }
        }
    }

    write!(out, "{}", status(session, use_color))?;
    if let Some(panel) = session.options() {
        write!(out, "{}", render_panel(panel, &session.chips(), use_color))?;
    }
    Ok(true)
}

fn export<S: RecordSource>(session: &SiteSift<S>, name: Option<&str>) -> Result<Vec<CmdMessage>> {
    let file_name = match name {
        Some(name) => with_extension(&normalize_export_filename(name)?),
        None => with_extension(&session.default_export_filename(Utc::now())),
    };
    Ok(session.export_to(Path::new(&file_name))?.messages)
}

/// One line summarizing the current results.
fn status<S: RecordSource>(session: &SiteSift<S>, use_color: bool) -> String {
    let message = match session.view() {
        ResultsView::Hidden => CmdMessage::info(format!(
            "No search or filters active. {} records loaded.",
            session.dataset().len()
        )),
        ResultsView::Empty { message } => CmdMessage::warning(message),
        ResultsView::Table { count_line, .. } => CmdMessage::info(count_line),
    };
    render_messages(&[message], use_color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitesift::config::SiftConfig;
    use sitesift::source::memory::InMemorySource;
    use sitesift::source::DepartmentTable;
    use std::io::Cursor;

    fn session() -> SiteSift<InMemorySource> {
        session_with(SiftConfig::default())
    }

    fn session_with(config: SiftConfig) -> SiteSift<InMemorySource> {
        let tables = vec![
            DepartmentTable::new("Admissions").with_row([
                "1",
                "Apply",
                "prod, staging",
                "apply.example.edu",
                "Enrollment",
                "https://apply.example.edu",
                "",
                "true",
                "0",
                "true",
                "Drupal",
            ]),
            DepartmentTable::new("IT").with_row([
                "2",
                "Portal",
                "prod",
                "",
                "OIT",
                "https://portal.example.edu",
                "",
                "false",
                "2",
                "false",
                "WordPress",
            ]),
        ];
        SiteSift::open(InMemorySource::from_tables(tables), config).unwrap()
    }

    fn run(script: &str) -> (SiteSift<InMemorySource>, String) {
        let mut session = session();
        let mut out = Vec::new();
        let lines = spawn_line_reader(Cursor::new(script.to_string()));
        run_shell(&mut session, lines, &mut out, false, false).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("  "), Ok(ShellCommand::Nothing));
        assert_eq!(
            parse_line("search  apply now "),
            Ok(ShellCommand::Search("apply now".into()))
        );
        assert_eq!(parse_line("search"), Ok(ShellCommand::Search(String::new())));
        assert_eq!(
            parse_line("filter cms Drupal 7"),
            Ok(ShellCommand::Filter(Category::Cms, "Drupal 7".into()))
        );
        assert_eq!(
            parse_line("unfilter dept IT"),
            Ok(ShellCommand::Unfilter(Category::Departments, "IT".into()))
        );
        assert_eq!(parse_line("export"), Ok(ShellCommand::Export(None)));
        assert_eq!(
            parse_line("export report"),
            Ok(ShellCommand::Export(Some("report".into())))
        );
        assert_eq!(parse_line("QUIT"), Ok(ShellCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_line("dance").unwrap_err().contains("Unknown command"));
        assert!(parse_line("filter cms").unwrap_err().starts_with("Usage"));
        assert!(parse_line("filter colour red")
            .unwrap_err()
            .contains("Unknown filter category"));
    }

    #[test]
    fn test_typed_input_commits_only_the_last_value() {
        let (session, _) = run("type p\ntype po\ntype portal\n");
        assert_eq!(session.search_term(), "portal");
        assert_eq!(session.current_dataset().len(), 1);
        assert!(!session.has_pending_search());
    }

    #[test]
    fn test_other_commands_flush_typed_input() {
        let (session, out) = run("type apply\nfilter env prod\nquit\n");
        assert_eq!(session.search_term(), "apply");
        assert_eq!(session.current_dataset()[0].title, "Apply");
        assert!(out.contains("Showing 1 of 2 results"));
    }

    #[test]
    fn test_filters_and_chips() {
        let (session, out) = run("filter active false\nchips\nunfilter active false\n");
        assert!(!session.has_active_filters());
        assert!(out.contains("[Active: No]"));
        assert!(out.contains("No search or filters active. 2 records loaded."));
    }

    #[test]
    fn test_empty_results_and_refused_export() {
        let (_, out) = run("search nothing-here\nexport\n");
        assert!(out.contains("No results matching search criteria"));
        assert!(out.contains("No data to export"));
    }

    #[test]
    fn test_blank_export_name_is_refused() {
        let (_, out) = run("search portal\nexport .csv\n");
        assert!(out.contains("Please enter a filename"));
    }

    #[test]
    fn test_panel_shows_options() {
        let (session, out) = run("panel\n");
        assert!(session.is_filter_panel_open());
        assert!(out.contains("Filter and Sort"));
        assert!(out.contains("Filters will be applied to all data."));
    }

    #[test]
    fn test_quit_stops_reading() {
        let (session, out) = run("quit\nsearch apply\n");
        assert_eq!(session.search_term(), "");
        assert!(!out.contains("Showing"));
    }

    #[test]
    fn test_bad_line_keeps_going() {
        let (session, out) = run("dance\nsearch portal\n");
        assert!(out.contains("Unknown command: dance"));
        assert_eq!(session.search_term(), "portal");
    }

    #[test]
    fn test_typed_input_commits_without_another_line() {
        let mut session = session_with(SiftConfig {
            debounce_ms: 20,
            ..SiftConfig::default()
        });
        let (tx, rx) = mpsc::channel();
        tx.send(Ok("type portal".to_string())).unwrap();
        let sender = thread::spawn(move || {
            thread::sleep(std::time::Duration::from_millis(300));
            // quit does not flush, so only the timer can have committed the search
            tx.send(Ok("quit".to_string())).unwrap();
        });

        let mut out = Vec::new();
        run_shell(&mut session, rx, &mut out, false, false).unwrap();
        sender.join().unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(session.search_term(), "portal");
        assert!(out.contains("Showing 1 of 2 results matching \"portal\""));
    }

    #[test]
    fn test_quit_drops_pending_input() {
        let (session, _) = run("type portal\nquit\n");
        assert_eq!(session.search_term(), "");
    }
}
