use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "sitesift", bin_name = "sitesift", version)]
#[command(
    about = "Search and filter a department site inventory",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data file: a JSON array of department tables, or an exported .csv
    #[arg(long, env = "SITESIFT_DATA", global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Directory holding config.json (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Search and filter selections shared by query, options and export.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Free-text search across every field
    #[arg(short, long)]
    pub search: Option<String>,

    /// Department (repeatable)
    #[arg(long = "dept", value_name = "DEPARTMENT")]
    pub departments: Vec<String>,

    /// Environment (repeatable)
    #[arg(long = "env", value_name = "ENVIRONMENT")]
    pub environments: Vec<String>,

    /// Pope Tech value, e.g. true or false (repeatable)
    #[arg(long = "popetech", value_name = "VALUE")]
    pub pope_tech: Vec<String>,

    /// Active value, e.g. true or false (repeatable)
    #[arg(long = "active", value_name = "VALUE")]
    pub active: Vec<String>,

    /// CMS (repeatable)
    #[arg(long = "cms", value_name = "CMS")]
    pub cms: Vec<String>,

    /// Highlight search matches in the results
    #[arg(long)]
    pub highlight: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show results for a search and filters
    Query {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show the filter options available for a search
    Options {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Export matching results to CSV
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output file name (a generated name is used when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<String>,
    },

    /// Interactive session reading commands from stdin
    Shell,

    /// Get or set configuration
    Config {
        /// Configuration key
        key: Option<String>,
        /// Value to set
        value: Option<String>,
    },
}
