//! enhancer-discover CLI: print the discovery snapshot for a project.
//!
//! Logging: set `RUST_LOG=enhancer_discovery=debug` (or pass `--verbose`) to
//! see cache hits, misses and skipped files on stderr.

mod cli;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use enhancer_discovery::{DiscoveredContext, DiscoveryCache, discover, format_context};

use crate::cli::{Cli, OutputFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides; --verbose => debug; else warnings only.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "enhancer_discovery=debug,enhancer_scanner=debug"
        } else {
            "enhancer_discovery=warn"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    if cli.schema {
        let schema = enhancer_types::get_schema_json("DiscoveredContext")?;
        println!("{schema}");
        return Ok(());
    }

    let project_root = match cli.project_root {
        Some(root) => root,
        None => std::env::current_dir().context("cannot resolve current directory")?,
    };

    let context = if cli.no_cache {
        discover(&project_root).await?
    } else {
        DiscoveryCache::new(&project_root).load_or_discover().await?
    };

    println!("{}", render(&context, cli.format)?);
    Ok(())
}

fn render(context: &DiscoveredContext, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(context)?),
        OutputFormat::Text => Ok(format_context(context)),
    }
}
