use super::render::{print_messages, render_config, render_panel, render_results, to_json};
use super::setup::{Cli, Commands, FilterArgs, OutputFormat};
use super::shell;
use chrono::Utc;
use clap::Parser;
use serde::Serialize;
use sitesift::api::SiteSift;
use sitesift::commands::chips::Chip;
use sitesift::commands::config::{self as config_cmd, ConfigAction};
use sitesift::commands::export::{normalize_export_filename, with_extension};
use sitesift::commands::options::FilterPanel;
use sitesift::commands::render::ResultsView;
use sitesift::commands::MessageLevel;
use sitesift::config::{default_config_dir, SiftConfig};
use sitesift::error::{Result, SiftError};
use sitesift::model::Category;
use sitesift::source::FileSource;
use std::io::{BufReader, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

struct AppContext {
    config_dir: PathBuf,
    config: SiftConfig,
    data: Option<PathBuf>,
    format: OutputFormat,
    use_color: bool,
}

#[derive(Serialize)]
struct QueryOutput<'a> {
    chips: &'a [Chip],
    view: &'a ResultsView,
}

#[derive(Serialize)]
struct OptionsOutput<'a> {
    chips: &'a [Chip],
    panel: &'a FilterPanel,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = init_context(&cli)?;

    match cli.command {
        Commands::Query { filters } => handle_query(&ctx, &filters),
        Commands::Options { filters } => handle_options(&ctx, &filters),
        Commands::Export { filters, output } => handle_export(&ctx, &filters, output.as_deref()),
        Commands::Shell => handle_shell(&ctx),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
    }
}

/// Logs go to stderr so they never mix with rendered output.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    if !use_color {
        colored::control::set_override(false);
    }

    let config_dir = match &cli.config {
        Some(dir) => dir.clone(),
        None => default_config_dir()?,
    };
    let config = SiftConfig::load(&config_dir)?;
    debug!(config_dir = %config_dir.display(), "loaded config");

    Ok(AppContext {
        config_dir,
        config,
        data: cli.data.clone(),
        format: cli.format,
        use_color,
    })
}

fn open_session(ctx: &AppContext) -> Result<SiteSift<FileSource>> {
    let path = ctx.data.as_ref().ok_or_else(|| {
        SiftError::Source("No data file given (use --data or SITESIFT_DATA)".to_string())
    })?;
    SiteSift::open(FileSource::from_path(path), ctx.config.clone())
}

fn apply_filters(session: &mut SiteSift<FileSource>, filters: &FilterArgs) {
    if let Some(term) = &filters.search {
        session.set_search(term);
    }
    let selections = [
        (Category::Departments, &filters.departments),
        (Category::Environments, &filters.environments),
        (Category::PopeTech, &filters.pope_tech),
        (Category::Active, &filters.active),
        (Category::Cms, &filters.cms),
    ];
    for (category, values) in selections {
        if !values.is_empty() {
            session.set_filter(category, values.iter().cloned());
        }
    }
    if filters.highlight && !session.highlight_enabled() {
        session.toggle_highlight();
    }
}

fn handle_query(ctx: &AppContext, filters: &FilterArgs) -> Result<()> {
    let mut session = open_session(ctx)?;
    apply_filters(&mut session, filters);

    let chips = session.chips();
    let view = session.view();
    match ctx.format {
        OutputFormat::Json => println!(
            "{}",
            to_json(&QueryOutput {
                chips: &chips,
                view: &view,
            })?
        ),
        OutputFormat::Text => print!(
            "{}",
            render_results(&view, &chips, session.dataset().len(), ctx.use_color)
        ),
    }
    Ok(())
}

fn handle_options(ctx: &AppContext, filters: &FilterArgs) -> Result<()> {
    let mut session = open_session(ctx)?;
    apply_filters(&mut session, filters);
    session.open_filter_panel();

    let chips = session.chips();
    let panel = session
        .options()
        .ok_or_else(|| SiftError::Source("Filter panel did not open".to_string()))?;
    match ctx.format {
        OutputFormat::Json => println!(
            "{}",
            to_json(&OptionsOutput {
                chips: &chips,
                panel,
            })?
        ),
        OutputFormat::Text => print!("{}", render_panel(panel, &chips, ctx.use_color)),
    }
    Ok(())
}

fn handle_export(ctx: &AppContext, filters: &FilterArgs, output: Option<&str>) -> Result<()> {
    let mut session = open_session(ctx)?;
    apply_filters(&mut session, filters);

    let file_name = match output {
        Some(name) => with_extension(&normalize_export_filename(name)?),
        None => with_extension(&session.default_export_filename(Utc::now())),
    };
    let result = session.export_to(Path::new(&file_name))?;
    match ctx.format {
        OutputFormat::Json => println!("{}", to_json(&result.messages)?),
        OutputFormat::Text => print_messages(&result.messages, ctx.use_color),
    }
    Ok(())
}

fn handle_shell(ctx: &AppContext) -> Result<()> {
    let mut session = open_session(ctx)?;
    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    shell::run_shell(
        &mut session,
        shell::spawn_line_reader(BufReader::new(stdin)),
        std::io::stdout().lock(),
        ctx.use_color,
        interactive,
    )
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let is_show_all = matches!(action, ConfigAction::ShowAll);
    let result = config_cmd::run(&ctx.config_dir, action)?;
    if let Some(failure) = result
        .messages
        .iter()
        .find(|msg| msg.level == MessageLevel::Error)
    {
        return Err(SiftError::Config(failure.content.clone()));
    }

    if ctx.format == OutputFormat::Json {
        match &result.config {
            Some(config) if is_show_all => println!("{}", to_json(config)?),
            _ => println!("{}", to_json(&result.messages)?),
        }
        return Ok(());
    }

    print_messages(&result.messages, ctx.use_color);
    if is_show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config, ctx.use_color));
        }
    }
    Ok(())
}

