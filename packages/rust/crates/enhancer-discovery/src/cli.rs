use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(name = "enhancer-discover")]
#[command(
    about = "Discover agents, skills and project facts under .claude/ and package.json, served from a fingerprint-validated cache."
)]
pub(crate) struct Cli {
    /// Project root to scan (default: current directory).
    pub(crate) project_root: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub(crate) format: OutputFormat,

    /// Run discovery directly without reading or writing the cache.
    #[arg(long)]
    pub(crate) no_cache: bool,

    /// Log discovery and cache decisions to stderr.
    #[arg(long, short)]
    pub(crate) verbose: bool,

    /// Print the JSON Schema of the discovery snapshot and exit.
    #[arg(long)]
    pub(crate) schema: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Pretty-printed JSON snapshot.
    Json,
    /// Prompt-ready text block.
    Text,
}
