//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "leadsearch")]
#[command(
    author,
    version,
    about = "Keyword search over CRM customer records with AI-assisted field targeting"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Never call the text-generation service
    #[arg(long, global = true)]
    pub offline: bool,

    /// Config file (defaults to LEADSEARCH_CONFIG or the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve search text into tokens and fields
    Resolve(QueryArgs),

    /// Print the where clause a search text resolves to
    Filter(QueryArgs),

    /// Search a JSON file of customer records
    Search(SearchArgs),

    /// Print the classifier instruction prompt
    Prompt,

    /// List searchable fields
    Fields,
}

#[derive(Args)]
pub struct QueryArgs {
    /// Search text
    pub query: Vec<String>,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search text
    pub query: Vec<String>,

    /// JSON array of customer records
    #[arg(short, long)]
    pub data: PathBuf,

    /// Maximum number of results
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Match tokens case-sensitively
    #[arg(long)]
    pub case_sensitive: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Cli,
    Json,
    Csv,
}
