//! capnpc-pgo - Cap'n Proto compiler plugin emitting Go
//!
//! Reads a decoded code generator request rendered as JSON (from `--request`
//! or stdin) and writes one `.go` file per requested schema file. Every file
//! is generated and formatted in memory before anything is written.

use anyhow::{Context, Result};
use clap::Parser;
use pgo::codegen::{Generator, Gofmt, SourceFormatter, Unformatted};
use pgo::config::Config;
use pgo::schema::{SchemaIr, load_request, read_request};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "capnpc-pgo")]
#[command(author, version, about = "Generate Go code from Cap'n Proto schemas", long_about = None)]
struct Cli {
    /// Request JSON file (default: stdin)
    #[arg(short, long)]
    request: Option<PathBuf>,

    /// Output directory for generated files
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Path to a pgo TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fail instead of emitting placeholders for unsupported values
    #[arg(long)]
    strict: bool,

    /// Emit stub MarshalJSON methods instead of JSON writers
    #[arg(long)]
    no_json: bool,

    /// Format generated files with gofmt
    #[arg(long)]
    gofmt: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.strict |= cli.strict;
    config.json_writers &= !cli.no_json;
    config.gofmt |= cli.gofmt;
    if cli.out_dir.is_some() {
        config.out_dir = cli.out_dir;
    }

    let request = match &cli.request {
        Some(path) => load_request(path)
            .with_context(|| format!("Failed to load request: {}", path.display()))?,
        None => read_request(std::io::stdin().lock()).context("Failed to read request from stdin")?,
    };
    let ir = SchemaIr::from_request(request, config.catalog).context("Failed to resolve request")?;
    let files = Generator::new(&ir, config.options())
        .generate()
        .context("Code generation failed")?;

    let formatter: Box<dyn SourceFormatter> = if config.gofmt {
        Box::new(Gofmt::default())
    } else {
        Box::new(Unformatted)
    };
    let sources = files
        .iter()
        .map(|file| {
            formatter
                .format(&file.render())
                .with_context(|| format!("Failed to format {}", file.path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    for (file, source) in files.iter().zip(&sources) {
        file.write_source(config.out_dir(), source)
            .with_context(|| format!("Failed to write {}", file.path.display()))?;
        if !file.limitations.is_empty() {
            tracing::warn!(
                file = %file.path.display(),
                placeholders = file.limitations.len(),
                "generated with placeholders"
            );
        }
    }

    tracing::info!(files = files.len(), "done");
    Ok(())
}
